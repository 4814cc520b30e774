pub mod commands;
pub mod config;

use std::sync::Arc;

use commands::music::utils::player::PlayerDeps;
use commands::music::utils::registry::PlayerRegistry;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;
pub type CommandResult = Result<(), Error>;

/// User data stored on the framework and accessible in all command invocations.
pub struct Data {
    /// Per-guild playback registry; created at startup, lives for the process.
    pub registry: Arc<PlayerRegistry>,
    /// Shared collaborators injected into every playback step.
    pub deps: Arc<PlayerDeps>,
}

#[poise::command(slash_command, category = "General")]
pub async fn help(
    ctx: Context<'_>,
    #[description = "Specific command to show help about"]
    #[autocomplete = "poise::builtins::autocomplete_command"]
    command: Option<String>,
) -> CommandResult {
    poise::builtins::help(
        ctx,
        command.as_deref(),
        poise::builtins::HelpConfiguration {
            show_context_menu_commands: true,
            ..Default::default()
        },
    )
    .await
    .map_err(|e| e.into())
}

#[poise::command(prefix_command, hide_in_help)]
pub async fn register(ctx: Context<'_>) -> Result<(), Error> {
    poise::builtins::register_application_commands_buttons(ctx)
        .await
        .map_err(|e| e.into())
}
