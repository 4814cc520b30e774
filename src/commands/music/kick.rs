use tracing::{error, info};

use crate::commands::music::utils::MusicError;
use crate::commands::music::utils::embedded_messages;
use crate::commands::music::utils::registry;
use crate::{CommandResult, Context};

/// Force the bot out of voice chat and reset playback for this server.
#[poise::command(slash_command, category = "Music")]
pub async fn kick(ctx: Context<'_>) -> CommandResult {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.send(embedded_messages::kicked()).await?;
        return Ok(());
    };

    let player = ctx.data().registry.get_or_create(guild_id);
    {
        let mut p = player.lock().await;
        p.abort_idle_task();
        p.reset_connection_state();
    }

    // Local state is already cleared; a failed voice teardown is reported but
    // never leaves the player stuck in a playing state.
    match registry::get_songbird(ctx.serenity_context()).await {
        Ok(songbird) if songbird.get(guild_id).is_some() => {
            if let Err(e) = songbird.remove(guild_id).await {
                let err = MusicError::DisconnectFailed(e.to_string());
                error!("guild {}: {}", guild_id, err);
                ctx.send(poise::CreateReply::default().embed(
                    embedded_messages::disconnect_failed(&err),
                ))
                .await?;
                return Ok(());
            }
            info!("guild {}: kicked from voice chat", guild_id);
        }
        _ => {}
    }

    ctx.send(embedded_messages::kicked()).await?;
    Ok(())
}

/// List the servers this bot is a member of.
#[poise::command(slash_command, category = "Music")]
pub async fn servers(ctx: Context<'_>) -> CommandResult {
    let cache = &ctx.serenity_context().cache;
    let names: Vec<String> = cache
        .guilds()
        .into_iter()
        .filter_map(|id| cache.guild(id).map(|guild| guild.name.clone()))
        .collect();

    ctx.send(embedded_messages::guild_list(&names)).await?;
    Ok(())
}
