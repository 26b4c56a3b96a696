use poise::CreateReply;

use crate::{Context, Error};

/// Defers the response either ephemerally or normally, based on `direct`.
/// Returns `true` if ephemeral defer was used, otherwise `false`.
pub async fn defer_based_on_ephemeral(
    ctx: Context<'_>,
    direct: Option<bool>,
) -> Result<bool, Error> {
    match direct.unwrap_or(false) {
        true => {
            ctx.defer_ephemeral()
                .await
                .map_err(|e| Box::new(e) as Error)?;
            Ok(true)
        }
        false => {
            ctx.defer().await.map_err(|e| Box::new(e) as Error)?;
            Ok(false)
        }
    }
}

pub async fn error_text(ctx: &Context<'_>, ephemeral: bool, text: &str) {
    let _ = ctx
        .send(CreateReply::default().content(text).ephemeral(ephemeral))
        .await;
}

pub async fn is_admin(ctx: Context<'_>) -> Result<bool, Error> {
    let config = ctx.data().config.read().await;
    let author_id = ctx.author().id.to_string();
    Ok(config.admin_list.contains(&author_id))
}

pub async fn is_images(ctx: Context<'_>) -> Result<bool, Error> {
    let config = ctx.data().config.read().await;
    if !config.image_whitelist_active {
        return Ok(true);
    }
    Ok(config.image_whitelist.contains(&ctx.author().id.to_string()))
}
