//! Per-guild playback driver. The `Player` owns the queue, the handle of the
//! running track, and the idle-disconnect task; the actual voice connection
//! is songbird's per-guild `Call`.

use std::sync::Arc;
use std::time::Duration;

use serenity::all::CreateMessage;
use serenity::http::Http;
use serenity::model::id::{ChannelId, GuildId};
use songbird::Songbird;
use songbird::tracks::TrackHandle;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::commands::music::audio_sources::{Downloader, SearchProvider};
use crate::commands::music::utils::MusicError;
use crate::commands::music::utils::embedded_messages;
use crate::commands::music::utils::playlist::Playlist;
use crate::commands::music::utils::storage;
use crate::config::Config;

/// A song landing at a queue position below this is downloaded eagerly from
/// the requesting command instead of waiting for the look-ahead.
pub const EAGER_QUEUE_WINDOW: usize = 4;

/// What the idle watchdog does on one of its ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleAction {
    /// Connection already gone; clear local state and stop watching.
    ClearState,
    /// A track is streaming; check again next tick.
    KeepWaiting,
    /// Connected but idle for a full period; leave the channel.
    Disconnect,
}

/// Shared collaborators injected into every playback step and event handler.
pub struct PlayerDeps {
    pub config: Arc<Config>,
    pub search: Arc<dyn SearchProvider>,
    pub downloader: Arc<dyn Downloader>,
}

pub struct Player {
    guild_id: GuildId,
    pub playlist: Playlist,
    /// True exactly while audio is streaming into the call.
    pub playing: bool,
    track: Option<TrackHandle>,
    idle_task: Option<JoinHandle<()>>,
}

impl Player {
    pub fn new(guild_id: GuildId) -> Self {
        Self {
            guild_id,
            playlist: Playlist::new(),
            playing: false,
            track: None,
            idle_task: None,
        }
    }

    pub fn guild_id(&self) -> GuildId {
        self.guild_id
    }

    pub fn set_track(&mut self, track: TrackHandle) {
        self.track = Some(track);
    }

    pub fn take_track(&mut self) -> Option<TrackHandle> {
        self.track.take()
    }

    /// Clear everything tied to the voice connection. The queue and history
    /// survive; only current-song and streaming state are dropped.
    pub fn reset_connection_state(&mut self) {
        self.playing = false;
        self.track = None;
        self.playlist.clear_current();
    }

    /// Start a queue-advance step. Refused while a track is streaming, so
    /// concurrent entries collapse into one; otherwise the finished song,
    /// if any, moves into the previous slot.
    pub fn begin_advance(&mut self) -> bool {
        if self.playing {
            return false;
        }
        if let Some(finished) = self.playlist.take_current() {
            self.playlist.set_previous(Some(finished));
        }
        true
    }

    /// The watchdog decision for one tick, given whether the voice
    /// connection still exists.
    pub fn idle_action(&self, connected: bool) -> IdleAction {
        if !connected {
            IdleAction::ClearState
        } else if self.playing {
            IdleAction::KeepWaiting
        } else {
            IdleAction::Disconnect
        }
    }

    pub fn abort_idle_task(&mut self) {
        if let Some(task) = self.idle_task.take() {
            task.abort();
        }
    }

    fn set_idle_task(&mut self, task: JoinHandle<()>) {
        self.abort_idle_task();
        self.idle_task = Some(task);
    }
}

/// Make sure the queue front is playable: fetch it if needed, and drop
/// entries that can never be ready (retract + delete, no history entry)
/// instead of stalling the queue on them.
pub async fn ensure_front_downloaded(
    playlist: &mut Playlist,
    downloader: &dyn Downloader,
    guild_id: GuildId,
) {
    while let Some(front) = playlist.front().cloned() {
        if front.downloaded {
            break;
        }
        match downloader.fetch(&front).await {
            Ok(()) => {
                playlist.mark_downloaded(&front.video_id);
                break;
            }
            Err(e) => {
                error!(
                    "guild {}: dropping '{}' from queue: {}",
                    guild_id, front.title, e
                );
                playlist.retract(&front);
                storage::remove_song_file(&front.path);
            }
        }
    }
}

/// Fetch up to `count` undownloaded songs, scanning from the queue front.
/// Failures retract the song and clean up its file; playback is never blocked
/// on a prefetch.
pub async fn prefetch_lookahead(
    playlist: &mut Playlist,
    downloader: &dyn Downloader,
    guild_id: GuildId,
    count: usize,
) {
    for _ in 0..count {
        let Some(next) = playlist.next_undownloaded().cloned() else {
            break;
        };
        match downloader.fetch(&next).await {
            Ok(()) => playlist.mark_downloaded(&next.video_id),
            Err(e) => {
                error!(
                    "guild {}: prefetch of '{}' failed, dropping it: {}",
                    guild_id, next.title, e
                );
                playlist.retract(&next);
                storage::remove_song_file(&next.path);
            }
        }
    }
}

/// Arm the idle-disconnect watchdog for a freshly established connection.
///
/// One cancellable task per connection: it wakes every `timeout`, re-arms
/// while something is streaming, and otherwise leaves the channel and clears
/// the player's connection state. A connection torn down externally is
/// detected by the liveness check and only clears local state.
pub async fn arm_idle_disconnect(
    player: Arc<Mutex<Player>>,
    songbird: Arc<Songbird>,
    http: Arc<Http>,
    channel_id: ChannelId,
    timeout: Duration,
) {
    let guild_id = player.lock().await.guild_id();
    let task_player = player.clone();

    let task = tokio::spawn(async move {
        loop {
            tokio::time::sleep(timeout).await;

            let connected = songbird.get(guild_id).is_some();
            match task_player.lock().await.idle_action(connected) {
                IdleAction::KeepWaiting => continue,
                IdleAction::ClearState => {
                    // Torn down externally, nothing to disconnect.
                    task_player.lock().await.reset_connection_state();
                    break;
                }
                IdleAction::Disconnect => {}
            }

            match songbird.remove(guild_id).await {
                Ok(()) => {
                    info!("guild {}: left voice chat due to inactivity", guild_id);
                    let message =
                        CreateMessage::new().embed(embedded_messages::left_due_to_inactivity());
                    if let Err(e) = channel_id.send_message(http.clone(), message).await {
                        warn!("guild {}: failed to announce idle disconnect: {}", guild_id, e);
                    }
                }
                Err(e) => {
                    let err = MusicError::DisconnectFailed(e.to_string());
                    error!("guild {}: {}", guild_id, err);
                    let message =
                        CreateMessage::new().embed(embedded_messages::disconnect_failed(&err));
                    let _ = channel_id.send_message(http.clone(), message).await;
                }
            }

            task_player.lock().await.reset_connection_state();
            break;
        }
    });

    player.lock().await.set_idle_task(task);
}
