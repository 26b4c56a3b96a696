use std::collections::HashSet;
use std::time::Duration;

use reqwest::{Client, StatusCode, header};
use serenity::futures::future::join_all;
use thiserror::Error;
use tracing::warn;

const DISCOVERY_RETRIES: u32 = 3;
const DISCOVERY_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Provider metadata for one candidate image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRef {
    pub id: String,
    pub url: String,
    pub extension: String,
}

/// An image that survived the download filters, ready to attach.
pub struct DownloadedFile {
    pub file_name: String,
    pub data: Vec<u8>,
}

pub struct FetchSpec<'a> {
    pub count: u32,
    pub prefix: &'a str,
    /// Upload cap of the host platform. Anything reporting more is dropped unsent.
    pub max_file_size: u64,
}

/// A remote API that hands out one random image reference per request.
pub trait ImageProvider: Send + Sync {
    fn request_url(&self) -> String;

    fn parse_response(&self, body: &[u8]) -> Result<ItemRef, FetchError>;
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(StatusCode),
    #[error("malformed provider response: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("provider response missing {0}")]
    MissingField(&'static str),
}

/// Fetches up to `spec.count` random images from `provider`.
///
/// Runs the discovery requests concurrently, drops duplicate ids, then
/// downloads the survivors concurrently. Every per-item failure degrades to
/// that item being skipped; the returned list keeps request order.
pub async fn fetch_files(
    client: &Client,
    provider: &dyn ImageProvider,
    spec: &FetchSpec<'_>,
) -> Vec<DownloadedFile> {
    let discoveries = join_all((0..spec.count).map(|_| discover(client, provider))).await;

    let found: Vec<ItemRef> = discoveries
        .into_iter()
        .filter_map(|result| match result {
            Ok(item) => Some(item),
            Err(e) => {
                warn!("Discovery request dropped: {e}");
                None
            }
        })
        .collect();
    let items = dedup_by_id(found);

    let downloads = join_all(items.iter().map(|item| download(client, item, spec))).await;

    downloads.into_iter().flatten().collect()
}

async fn discover(client: &Client, provider: &dyn ImageProvider) -> Result<ItemRef, FetchError> {
    let url = provider.request_url();
    let response = get_with_retry(client, &url).await?;
    let body = response.bytes().await?;
    provider.parse_response(&body)
}

/// Discovery-phase GET: up to three retries on any non-success status,
/// with a fixed five second delay. Transport errors are not retried.
async fn get_with_retry(client: &Client, url: &str) -> Result<reqwest::Response, FetchError> {
    let mut attempt = 0u32;
    loop {
        let response = client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;
        if response.status().is_success() {
            return Ok(response);
        }
        attempt += 1;
        if attempt > DISCOVERY_RETRIES {
            return Err(FetchError::Status(response.status()));
        }
        tokio::time::sleep(DISCOVERY_RETRY_DELAY).await;
    }
}

/// One raw download. Not retried; any failure just drops the item.
async fn download(client: &Client, item: &ItemRef, spec: &FetchSpec<'_>) -> Option<DownloadedFile> {
    let response = match client.get(&item.url).send().await {
        Ok(response) => response,
        Err(e) => {
            warn!("Download of {} failed: {e}", item.url);
            return None;
        }
    };

    // Missing Content-Length counts as 0 and passes the cap.
    let content_length = response
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(0);

    if !response.status().is_success() || content_length > spec.max_file_size {
        warn!(
            "Dropping {}: status {}, {} bytes",
            item.url,
            response.status(),
            content_length
        );
        return None;
    }

    let data = match response.bytes().await {
        Ok(bytes) => bytes.to_vec(),
        Err(e) => {
            warn!("Reading body of {} failed: {e}", item.url);
            return None;
        }
    };

    Some(DownloadedFile {
        file_name: build_file_name(spec.prefix, &item.id, &item.extension),
        data,
    })
}

fn dedup_by_id(items: Vec<ItemRef>) -> Vec<ItemRef> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.id.clone()))
        .collect()
}

fn build_file_name(prefix: &str, id: &str, extension: &str) -> String {
    format!("{prefix}-{id}.{}", normalize_extension(extension))
}

fn normalize_extension(extension: &str) -> String {
    if extension.eq_ignore_ascii_case("jpeg") {
        "jpg".to_string()
    } else {
        extension.to_lowercase()
    }
}
