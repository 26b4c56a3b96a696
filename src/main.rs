mod commands;
mod config;
mod fetcher;
mod providers;
mod utils;

use std::time::Duration;

use config::Config;
use serenity::all::{ClientBuilder, GatewayIntents};
use tokio::sync::RwLock;
use tracing::{error, info};

type Error = Box<dyn std::error::Error + Send + Sync>;
type Context<'a> = poise::Context<'a, Data, Error>;

pub const CONFIG_PATH: &str = "config.json";

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

pub struct Data {
    pub config: RwLock<Config>,
    pub http: reqwest::Client,
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => panic!("Failed to start bot: {:?}", error),
        error => {
            // TODO: dm all bot admins about the error
            error!("ERROR: {:#?}", error.to_string());
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = Config::load_or_create(CONFIG_PATH)
        .await
        .expect("FAILED TO LOAD CONFIG!");
    let token = config.discord_token.clone();

    // One client for the whole process; every command invocation shares the
    // connection pool.
    let http = reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .expect("FAILED TO BUILD HTTP CLIENT!");

    let opt = poise::FrameworkOptions {
        commands: vec![
            commands::cat(),
            commands::cat_bomb(),
            commands::shibe(),
            commands::shibe_bomb(),
            commands::test(),
            commands::reload_settings(),
            commands::stop(),
        ],
        prefix_options: poise::PrefixFrameworkOptions {
            prefix: None,
            ..Default::default()
        },
        on_error: |error| Box::pin(on_error(error)),
        pre_command: |ctx| {
            Box::pin(async move {
                info!("STARTING COMMAND: {}", ctx.command().qualified_name);
            })
        },
        post_command: |ctx| {
            Box::pin(async move {
                info!("FINISHED COMMAND: {}", ctx.command().qualified_name);
            })
        },
        event_handler: |_ctx, event, _framework, _data| {
            Box::pin(async move {
                info!("EVENT RECEIVED: {:?}", event.snake_case_name());
                Ok(())
            })
        },
        ..Default::default()
    };

    let framework = poise::Framework::builder()
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("LOGGED IN AS: {}", ready.user.name);
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(Data {
                    config: RwLock::new(config),
                    http,
                })
            })
        })
        .options(opt)
        .build();

    let intents = GatewayIntents::non_privileged();

    let client = ClientBuilder::new(token, intents)
        .framework(framework)
        .await;

    client.unwrap().start().await.unwrap();
}
