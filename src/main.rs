use std::sync::Arc;

use ::serenity::all::ClientBuilder;
use dotenv::dotenv;
use poise::serenity_prelude as serenity;
use songbird::SerenityInit;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use jukebot::commands::general::{meme::*, ping::*};
use jukebot::commands::music::{kick::*, play::*, queue::*, skip::*};
use jukebot::commands::music::audio_sources::youtube::YoutubeSearchClient;
use jukebot::commands::music::audio_sources::ytdlp::YtDlpDownloader;
use jukebot::commands::music::utils::player::PlayerDeps;
use jukebot::commands::music::utils::registry::PlayerRegistry;
use jukebot::config::Config;
use jukebot::{Data, Error, help, register};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize logging with debug level for our crate
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("jukebot=debug,warn")),
        )
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .with_target(true)
        .with_ansi(true)
        .pretty()
        .init();

    dotenv().ok();

    let config = Arc::new(Config::load()?);
    info!("{}", config.summary());

    let intents = serenity::GatewayIntents::non_privileged()
        | serenity::GatewayIntents::MESSAGE_CONTENT
        | serenity::GatewayIntents::GUILD_VOICE_STATES;

    let commands = vec![
        // Default commands
        register(),
        help(),
        // General commands
        ping(),
        meme(),
        greet(),
        // Music commands
        play(),
        skip(),
        queue(),
        history(),
        current(),
        kick(),
        servers(),
    ];

    let deps = Arc::new(PlayerDeps {
        config: config.clone(),
        search: Arc::new(YoutubeSearchClient::new(config.youtube_api_key.clone())),
        downloader: Arc::new(YtDlpDownloader::new(config.clone())),
    });
    let registry = Arc::new(PlayerRegistry::new());

    let token = config.discord_token.clone();
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands,
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(Data { registry, deps })
            })
        });

    let mut client = ClientBuilder::new(token, intents)
        .framework(framework.build())
        .register_songbird()
        .await?;

    client.start().await.map_err(Into::into)
}
