//! Top-level per-guild registry: routes each command to the player owned by
//! the invoking guild, creating it on first use. Also home to the voice
//! helpers shared by the music commands.

use std::sync::Arc;

use dashmap::DashMap;
use serenity::client::Context;
use serenity::model::id::{ChannelId, GuildId, UserId};
use serenity::prelude::Mutex as SerenityMutex;
use songbird::{Call, Songbird};
use tokio::sync::Mutex;

use super::player::Player;
use super::{MusicError, MusicResult};

/// Maps each guild to its player. Pairs are created lazily and live for the
/// process (a `/kick` resets a player's state but does not remove it).
pub struct PlayerRegistry {
    players: DashMap<GuildId, Arc<Mutex<Player>>>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self {
            players: DashMap::new(),
        }
    }

    pub fn get_or_create(&self, guild_id: GuildId) -> Arc<Mutex<Player>> {
        self.players
            .entry(guild_id)
            .or_insert_with(|| Arc::new(Mutex::new(Player::new(guild_id))))
            .clone()
    }

    /// Guilds that have interacted with the music subsystem.
    pub fn guild_ids(&self) -> Vec<GuildId> {
        self.players.iter().map(|entry| *entry.key()).collect()
    }
}

impl Default for PlayerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the songbird voice client from the serenity context.
pub async fn get_songbird(ctx: &Context) -> MusicResult<Arc<Songbird>> {
    songbird::get(ctx).await.ok_or(MusicError::NoVoiceManager)
}

/// Get the current voice call handle for a guild, if connected.
pub async fn get_call(ctx: &Context, guild_id: GuildId) -> MusicResult<Arc<SerenityMutex<Call>>> {
    let songbird = get_songbird(ctx).await?;
    songbird.get(guild_id).ok_or(MusicError::NotConnected)
}

/// The voice channel the given user is currently in.
pub fn get_user_voice_channel(
    ctx: &Context,
    guild_id: GuildId,
    user_id: UserId,
) -> MusicResult<ChannelId> {
    let guild = ctx.cache.guild(guild_id).ok_or(MusicError::NotInGuild)?;

    let voice_state = guild
        .voice_states
        .get(&user_id)
        .ok_or(MusicError::UserNotInVoiceChannel)?;

    voice_state
        .channel_id
        .ok_or(MusicError::UserNotInVoiceChannel)
}

/// Join the given voice channel, returning the call handle.
pub async fn join_channel(
    ctx: &Context,
    guild_id: GuildId,
    channel_id: ChannelId,
) -> MusicResult<Arc<SerenityMutex<Call>>> {
    let songbird = get_songbird(ctx).await?;
    songbird
        .join(guild_id, channel_id)
        .await
        .map_err(|e| MusicError::JoinError(e.to_string()))
}
