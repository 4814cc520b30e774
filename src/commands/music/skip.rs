use tracing::info;

use crate::commands::music::utils::embedded_messages;
use crate::commands::music::utils::registry;
use crate::{CommandResult, Context};

/// Stop the current song and move on to the next one in the queue.
#[poise::command(slash_command, category = "Music")]
pub async fn skip(ctx: Context<'_>) -> CommandResult {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.send(embedded_messages::queue_already_empty()).await?;
        return Ok(());
    };

    // Without a live connection there is nothing to stop.
    if registry::get_call(ctx.serenity_context(), guild_id)
        .await
        .is_err()
    {
        ctx.send(embedded_messages::queue_already_empty()).await?;
        return Ok(());
    }

    let player = ctx.data().registry.get_or_create(guild_id);
    let (skipped, track) = {
        let mut p = player.lock().await;
        let Some(skipped) = p.playlist.take_current() else {
            drop(p);
            ctx.send(embedded_messages::queue_already_empty()).await?;
            return Ok(());
        };
        p.playlist.set_previous(Some(skipped.clone()));
        p.playing = false;
        (skipped, p.take_track())
    };

    info!("guild {}: skipping '{}'", guild_id, skipped.title);
    ctx.send(embedded_messages::skipping(&skipped)).await?;

    // Stopping fires the track-end event, which advances the queue through
    // the same path a natural completion takes.
    if let Some(track) = track {
        let _ = track.stop();
    }

    Ok(())
}
