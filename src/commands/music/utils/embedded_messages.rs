//! Every user-facing embed and reply for the music commands lives here, so
//! the commands themselves stay focused on state handling.

use poise::CreateReply;
use serenity::all::CreateEmbed;

use super::MusicError;
use crate::commands::music::audio_sources::Song;

fn error_reply(title: &str, description: String) -> CreateReply {
    CreateReply::default()
        .embed(
            CreateEmbed::new()
                .title(format!("❌ {}", title))
                .description(description)
                .color(0xff0000),
        )
        .ephemeral(true)
}

pub fn join_a_voice_channel(err: &MusicError) -> CreateReply {
    error_reply(
        "Error",
        format!("You need to be in a voice channel: {}", err),
    )
}

pub fn search_failed(err: &MusicError) -> CreateReply {
    let description = match err {
        MusicError::SearchQuotaExceeded => {
            "The daily search quota has been used up. Try again tomorrow.".to_string()
        }
        MusicError::SearchEmpty => {
            "No results for that query. Try changing your search terms slightly.".to_string()
        }
        other => format!("Search failed: {}", other),
    };
    error_reply("Search Error", description)
}

pub fn download_failed(err: &MusicError) -> CreateReply {
    error_reply("Download Error", format!("{}", err))
}

pub fn join_failed(err: &MusicError) -> CreateReply {
    error_reply("Error", format!("Failed to join voice channel: {}", err))
}

pub fn added_to_queue(song: &Song, position: usize) -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .title("🎵 Added to Queue")
            .description(format!("[{}]({})", song.title, song.url()))
            .field("Position", format!("`#{}`", position), true)
            .color(0x00ff00),
    )
}

pub fn skipping(song: &Song) -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .title("⏭️ Skipping")
            .description(format!("[{}]({})", song.title, song.url()))
            .color(0x00ff00),
    )
}

pub fn queue_already_empty() -> CreateReply {
    CreateReply::default().embed(CreateEmbed::new().title("Queue is already empty."))
}

pub fn queue_display(current: Option<&Song>, upcoming: &[&Song]) -> CreateReply {
    let mut description = String::new();

    match current {
        Some(song) => {
            description.push_str(&format!("**🎵 Playing: [{}]({})**\n\n", song.title, song.url()))
        }
        None => description.push_str("**🔇 Nothing playing**\n\n"),
    }

    if upcoming.is_empty() {
        description.push_str("**📭 Queue is empty**");
    } else {
        description.push_str(&format!("**📋 Queue - {} tracks**\n", upcoming.len()));
        for (index, song) in upcoming.iter().enumerate() {
            description.push_str(&format!(
                "{}: [{}]({})\n",
                index + 1,
                song.title,
                song.url()
            ));
        }
    }

    CreateReply::default().embed(
        CreateEmbed::new()
            .title("Current Queue")
            .description(description)
            .color(0x00ff00),
    )
}

pub fn history_display(recent: &[&Song]) -> CreateReply {
    if recent.is_empty() {
        return CreateReply::default()
            .embed(CreateEmbed::new().title("No songs have been played yet."));
    }

    let mut description = String::new();
    // Most recent first
    for (index, song) in recent.iter().rev().enumerate() {
        description.push_str(&format!(
            "{}: [{}]({}) `{}`\n",
            index + 1,
            song.title,
            song.url(),
            song.requested_at.format("%H:%M UTC"),
        ));
    }

    CreateReply::default().embed(
        CreateEmbed::new()
            .title("Recently Played")
            .description(description)
            .color(0x00ff00),
    )
}

pub fn current_song(current: Option<&Song>) -> CreateReply {
    let embed = match current {
        Some(song) => CreateEmbed::new()
            .title("Current Song")
            .description(format!("[{}]({})", song.title, song.url()))
            .color(0x00ff00),
        None => CreateEmbed::new().title("Nothing playing right now."),
    };
    CreateReply::default().embed(embed)
}

pub fn kicked() -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .title("👢 Kicked")
            .description("Disconnected from voice and reset playback state."),
    )
}

pub fn guild_list(names: &[String]) -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .title("Guilds")
            .description(names.join(", ")),
    )
}

/// Background announcement for the idle-disconnect task.
pub fn left_due_to_inactivity() -> CreateEmbed {
    CreateEmbed::new().title("Left voice chat due to inactivity.")
}

/// Voice teardown failed; state was cleared anyway.
pub fn disconnect_failed(err: &MusicError) -> CreateEmbed {
    CreateEmbed::new()
        .title("❌ Disconnect Error")
        .description(format!("{}. Playback state was reset anyway.", err))
        .color(0xff0000)
}
