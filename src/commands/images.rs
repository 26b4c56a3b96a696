use poise::CreateReply;
use serenity::all::CreateAttachment;

use crate::{
    Context, Error,
    fetcher::{self, FetchSpec, ImageProvider},
    providers::{ShibeOnline, TheCatApi},
    utils::bot::{self, error_text, is_images},
};

// Discord rejects uploads above this for unboosted guilds.
const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

const BOMB_COUNT: u32 = 10;

#[poise::command(slash_command)]
pub async fn cat(
    ctx: Context<'_>,
    #[description = "Send the response directly to you?"] ephemeral: Option<bool>,
) -> Result<(), Error> {
    let provider = cat_provider(ctx).await;
    send_images(ctx, &provider, 1, "cat", ephemeral).await
}

#[poise::command(slash_command)]
pub async fn cat_bomb(
    ctx: Context<'_>,
    #[description = "Send the response directly to you?"] ephemeral: Option<bool>,
) -> Result<(), Error> {
    let provider = cat_provider(ctx).await;
    send_images(ctx, &provider, BOMB_COUNT, "cat", ephemeral).await
}

#[poise::command(slash_command)]
pub async fn shibe(
    ctx: Context<'_>,
    #[description = "Send the response directly to you?"] ephemeral: Option<bool>,
) -> Result<(), Error> {
    send_images(ctx, &ShibeOnline, 1, "shibe", ephemeral).await
}

#[poise::command(slash_command)]
pub async fn shibe_bomb(
    ctx: Context<'_>,
    #[description = "Send the response directly to you?"] ephemeral: Option<bool>,
) -> Result<(), Error> {
    send_images(ctx, &ShibeOnline, BOMB_COUNT, "shibe", ephemeral).await
}

async fn cat_provider(ctx: Context<'_>) -> TheCatApi {
    TheCatApi {
        api_key: ctx.data().config.read().await.cat_api_token.clone(),
    }
}

async fn send_images(
    ctx: Context<'_>,
    provider: &dyn ImageProvider,
    count: u32,
    prefix: &str,
    ephemeral: Option<bool>,
) -> Result<(), Error> {
    let ephemeral = bot::defer_based_on_ephemeral(ctx, ephemeral).await?;

    if !is_images(ctx).await? {
        error_text(&ctx, ephemeral, "You are not allowed to use the image commands!").await;
        return Ok(());
    }

    let spec = FetchSpec {
        count,
        prefix,
        max_file_size: MAX_FILE_SIZE,
    };
    let files = fetcher::fetch_files(&ctx.data().http, provider, &spec).await;

    if files.is_empty() {
        error_text(&ctx, ephemeral, "Error getting images!").await;
        return Ok(());
    }

    let mut reply = CreateReply::default().ephemeral(ephemeral);
    for file in files {
        reply = reply.attachment(CreateAttachment::bytes(file.data, file.file_name));
    }
    ctx.send(reply).await?;

    Ok(())
}
