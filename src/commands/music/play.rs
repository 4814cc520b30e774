use tracing::{debug, info};

use crate::commands::music::audio_sources::{Song, resolve_query};
use crate::commands::music::utils::MusicError;
use crate::commands::music::utils::embedded_messages;
use crate::commands::music::utils::event_handlers;
use crate::commands::music::utils::player::{EAGER_QUEUE_WINDOW, arm_idle_disconnect};
use crate::commands::music::utils::registry;
use crate::commands::music::utils::storage;
use crate::{CommandResult, Context};

/// Search for a song and add it to the queue.
#[poise::command(slash_command, category = "Music")]
pub async fn play(
    ctx: Context<'_>,
    #[description = "URL or search query"]
    #[rest]
    query: String,
) -> CommandResult {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.send(embedded_messages::join_a_voice_channel(&MusicError::NotInGuild))
            .await?;
        return Ok(());
    };

    // Queueing only makes sense if the requester can be followed into voice.
    let voice_channel = match registry::get_user_voice_channel(
        ctx.serenity_context(),
        guild_id,
        ctx.author().id,
    ) {
        Ok(channel) => channel,
        Err(err) => {
            ctx.send(embedded_messages::join_a_voice_channel(&err)).await?;
            return Ok(());
        }
    };

    // Search and download can both take a while.
    ctx.defer().await?;

    let deps = ctx.data().deps.clone();
    let hit = match resolve_query(deps.search.as_ref(), &query).await {
        Ok(hit) => hit,
        Err(err) => {
            ctx.send(embedded_messages::search_failed(&err)).await?;
            return Ok(());
        }
    };
    debug!("Resolved '{}' to '{}' ({})", query, hit.title, hit.video_id);

    let song = Song::new(hit.title, hit.video_id, &deps.config.data_dir);
    let player = ctx.data().registry.get_or_create(guild_id);

    {
        let mut p = player.lock().await;
        p.playlist.add(song.clone());
        let position = p.playlist.len();
        info!(
            "guild {}: queued '{}' at position {}",
            guild_id, song.title, position
        );
        ctx.send(embedded_messages::added_to_queue(&song, position))
            .await?;

        // Near the front of the queue the look-ahead may never reach this
        // song before it is needed, so fetch it from here.
        if position < EAGER_QUEUE_WINDOW {
            if let Err(err) = deps.downloader.fetch(&song).await {
                p.playlist.retract(&song);
                storage::remove_song_file(&song.path);
                ctx.send(embedded_messages::download_failed(&err)).await?;
                return Ok(());
            }
            p.playlist.mark_downloaded(&song.video_id);
        }
    }

    let songbird = match registry::get_songbird(ctx.serenity_context()).await {
        Ok(songbird) => songbird,
        Err(err) => {
            ctx.send(embedded_messages::join_failed(&err)).await?;
            return Ok(());
        }
    };
    let http = ctx.serenity_context().http.clone();
    let text_channel = ctx.channel_id();

    match songbird.get(guild_id) {
        None => {
            let call =
                match registry::join_channel(ctx.serenity_context(), guild_id, voice_channel).await
                {
                    Ok(call) => call,
                    Err(err) => {
                        ctx.send(embedded_messages::join_failed(&err)).await?;
                        return Ok(());
                    }
                };
            event_handlers::advance(
                player.clone(),
                call,
                http.clone(),
                text_channel,
                deps.clone(),
            )
            .await?;
            arm_idle_disconnect(
                player,
                songbird,
                http,
                text_channel,
                deps.config.idle_timeout,
            )
            .await;
        }
        Some(call) => {
            let idle = !player.lock().await.playing;
            if idle {
                event_handlers::advance(player, call, http, text_channel, deps).await?;
            }
        }
    }

    Ok(())
}
