//! Canned replies: a named image from the image directory and a short
//! greeting. The image set is whatever files are on disk at call time, so
//! adding a meme is just dropping a file in the directory.

use std::fs;
use std::path::{Path, PathBuf};

use ::serenity::all::CreateAttachment;
use poise::CreateReply;
use tracing::warn;

use crate::{CommandResult, Context};

/// Post a meme image by name.
#[poise::command(slash_command, category = "General")]
pub async fn meme(
    ctx: Context<'_>,
    #[description = "Name of the image to post"] name: String,
) -> CommandResult {
    let images_dir = &ctx.data().deps.config.images_dir;

    let Some(path) = find_image(images_dir, &name) else {
        let available = image_names(images_dir);
        let reply = if available.is_empty() {
            "No images available.".to_string()
        } else {
            format!(
                "No image named `{}`. Here's what we've got in stock: {}",
                name,
                available.join(", ")
            )
        };
        ctx.send(CreateReply::default().content(reply)).await?;
        return Ok(());
    };

    let attachment = CreateAttachment::path(&path).await?;
    ctx.send(CreateReply::default().attachment(attachment))
        .await?;

    Ok(())
}

/// Say hello.
#[poise::command(slash_command, category = "General")]
pub async fn greet(ctx: Context<'_>) -> CommandResult {
    ctx.say(format!("Hello there, {}!", ctx.author().name))
        .await?;
    Ok(())
}

/// Case-insensitive match of `name` against the file stems in `dir`.
fn find_image(dir: &Path, name: &str) -> Option<PathBuf> {
    for entry in fs::read_dir(dir).ok()? {
        let Ok(entry) = entry else { continue };
        let path = entry.path();
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if stem.eq_ignore_ascii_case(name) {
            return Some(path);
        }
    }
    None
}

fn image_names(dir: &Path) -> Vec<String> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Failed to read image directory {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut names: Vec<String> = entries
        .flatten()
        .filter_map(|entry| {
            entry
                .path()
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string)
        })
        .collect();
    names.sort();
    names
}
