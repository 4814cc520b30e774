use crate::commands::music::utils::embedded_messages;
use crate::{CommandResult, Context};

/// Show the current song and everything queued behind it.
#[poise::command(slash_command, category = "Music")]
pub async fn queue(ctx: Context<'_>) -> CommandResult {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.send(embedded_messages::queue_display(None, &[])).await?;
        return Ok(());
    };

    let player = ctx.data().registry.get_or_create(guild_id);
    let p = player.lock().await;
    let upcoming: Vec<_> = p.playlist.songs().collect();
    ctx.send(embedded_messages::queue_display(
        p.playlist.current(),
        &upcoming,
    ))
    .await?;

    Ok(())
}

/// Show the songs played most recently in this server.
#[poise::command(slash_command, category = "Music")]
pub async fn history(ctx: Context<'_>) -> CommandResult {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.send(embedded_messages::history_display(&[])).await?;
        return Ok(());
    };

    let player = ctx.data().registry.get_or_create(guild_id);
    let p = player.lock().await;
    let recent: Vec<_> = p.playlist.history().collect();
    ctx.send(embedded_messages::history_display(&recent)).await?;

    Ok(())
}

/// Show what is playing right now.
#[poise::command(slash_command, category = "Music")]
pub async fn current(ctx: Context<'_>) -> CommandResult {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.send(embedded_messages::current_song(None)).await?;
        return Ok(());
    };

    let player = ctx.data().registry.get_or_create(guild_id);
    let p = player.lock().await;
    ctx.send(embedded_messages::current_song(p.playlist.current()))
        .await?;

    Ok(())
}
