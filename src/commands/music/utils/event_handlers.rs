//! The queue-draining step and the track-end event handler that re-enters it.
//! Natural completion and `/skip` both stop the running track, so both arrive
//! here through the same path.

use std::sync::Arc;

use serenity::async_trait;
use serenity::http::Http;
use serenity::model::id::ChannelId;
use serenity::prelude::Mutex as SerenityMutex;
use songbird::input::{File, Input};
use songbird::{Call, Event, EventContext, TrackEvent};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use super::MusicResult;
use super::player::{Player, PlayerDeps, ensure_front_downloaded, prefetch_lookahead};
use super::storage;

/// Event handler for when a song ends (naturally or via a stop).
pub struct SongEndNotifier {
    pub player: Arc<Mutex<Player>>,
    pub call: Arc<SerenityMutex<Call>>,
    pub http: Arc<Http>,
    pub channel_id: ChannelId,
    pub deps: Arc<PlayerDeps>,
}

#[async_trait]
impl songbird::EventHandler for SongEndNotifier {
    async fn act(&self, ctx: &EventContext<'_>) -> Option<Event> {
        if let EventContext::Track(_) = ctx {
            // The stream is over; record that before re-entering advance,
            // which refuses to run while a track is streaming.
            {
                let mut p = self.player.lock().await;
                p.playing = false;
                p.take_track();
            }
            if let Err(e) = advance(
                self.player.clone(),
                self.call.clone(),
                self.http.clone(),
                self.channel_id,
                self.deps.clone(),
            )
            .await
            {
                error!("Failed to advance queue after track end: {}", e);
            }
        }
        None
    }
}

/// Advance to the next queued song: promote the queue front to the current
/// slot, stream it into the call, and re-register this step as the track-end
/// handler so playback is self-perpetuating.
///
/// Returns `Ok(false)` when nothing was started: the queue is drained, the
/// connection is gone, or a track is already streaming.
pub async fn advance(
    player: Arc<Mutex<Player>>,
    call: Arc<SerenityMutex<Call>>,
    http: Arc<Http>,
    channel_id: ChannelId,
    deps: Arc<PlayerDeps>,
) -> MusicResult<bool> {
    // A /kick can race a track-end event; never stream into a dead call.
    if call.lock().await.current_connection().is_none() {
        player.lock().await.reset_connection_state();
        return Ok(false);
    }

    let mut p = player.lock().await;
    let guild_id = p.guild_id();
    // Two commands can race into this step; only the first may stream.
    if !p.begin_advance() {
        debug!("guild {}: a track is already streaming", guild_id);
        return Ok(false);
    }

    ensure_front_downloaded(&mut p.playlist, deps.downloader.as_ref(), guild_id).await;

    let Some(song) = p.playlist.pop() else {
        if let Err(e) =
            storage::prune_stale_files(&deps.config.data_dir, &p.playlist.retained_files())
        {
            warn!("guild {}: disk hygiene failed: {}", guild_id, e);
        }
        debug!("guild {}: queue drained", guild_id);
        return Ok(false);
    };
    p.playlist.set_current(song.clone());

    if let Err(e) = storage::prune_stale_files(&deps.config.data_dir, &p.playlist.retained_files())
    {
        warn!("guild {}: disk hygiene failed: {}", guild_id, e);
    }

    let input: Input = File::new(song.path.clone()).into();
    let track = {
        let mut handler = call.lock().await;
        handler.play_input(input)
    };
    p.playing = true;
    p.set_track(track.clone());
    info!("guild {}: now playing '{}'", guild_id, song.title);

    let notifier = SongEndNotifier {
        player: player.clone(),
        call: call.clone(),
        http,
        channel_id,
        deps: deps.clone(),
    };
    if let Err(e) = track.add_event(Event::Track(TrackEvent::End), notifier) {
        error!(
            "guild {}: failed to register track-end handler: {}",
            guild_id, e
        );
    }

    // Look-ahead: the next undownloaded song, plus one more opportunistically.
    prefetch_lookahead(&mut p.playlist, deps.downloader.as_ref(), guild_id, 2).await;

    Ok(true)
}
