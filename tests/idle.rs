//! Idle-disconnect watchdog behavior that can be exercised without a live
//! gateway: a connection torn down externally must leave the player in a
//! clean state instead of a phantom "playing" one.

mod common;

use std::sync::Arc;
use std::time::Duration;

use serenity::http::Http;
use serenity::model::id::{ChannelId, GuildId};
use songbird::Songbird;
use tokio::sync::Mutex;

use jukebot::commands::music::utils::player::{IdleAction, Player, arm_idle_disconnect};

#[tokio::test]
async fn torn_down_connection_clears_playback_state() {
    let dir = tempfile::tempdir().unwrap();
    let player = Arc::new(Mutex::new(Player::new(GuildId::new(1))));
    {
        let mut p = player.lock().await;
        p.playing = true;
        p.playlist.set_current(common::song("stuck", dir.path()));
    }

    // A songbird instance with no call registered looks exactly like a
    // connection someone else already tore down.
    let songbird = Songbird::serenity();
    let http = Arc::new(Http::new(""));

    arm_idle_disconnect(
        player.clone(),
        songbird,
        http,
        ChannelId::new(1),
        Duration::from_millis(20),
    )
    .await;

    tokio::time::sleep(Duration::from_millis(150)).await;

    let p = player.lock().await;
    assert!(!p.playing);
    assert!(p.playlist.current().is_none());
}

#[test]
fn watchdog_keeps_waiting_while_a_track_streams() {
    let mut player = Player::new(GuildId::new(3));
    player.playing = true;

    assert_eq!(player.idle_action(true), IdleAction::KeepWaiting);
}

#[test]
fn watchdog_disconnects_only_a_connected_idle_player() {
    let player = Player::new(GuildId::new(4));

    assert_eq!(player.idle_action(true), IdleAction::Disconnect);
    assert_eq!(player.idle_action(false), IdleAction::ClearState);
}

#[tokio::test]
async fn rearming_replaces_the_previous_watchdog() {
    let player = Arc::new(Mutex::new(Player::new(GuildId::new(2))));
    let songbird = Songbird::serenity();
    let http = Arc::new(Http::new(""));

    // Arm twice with a long timeout; the first task must be aborted rather
    // than left running alongside the second.
    for _ in 0..2 {
        arm_idle_disconnect(
            player.clone(),
            songbird.clone(),
            http.clone(),
            ChannelId::new(1),
            Duration::from_secs(3600),
        )
        .await;
    }

    let mut p = player.lock().await;
    p.abort_idle_task();
}
