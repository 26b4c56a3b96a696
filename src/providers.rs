use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::fetcher::{FetchError, ImageProvider, ItemRef};

// Trailing "<stem>.<extension>" of an image URL.
static FILE_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^/.]+)\.([A-Za-z0-9]+)$").expect("Invalid regex"));

/// thecatapi.com random cat pictures. Works without a key, but a key
/// raises the rate limit.
pub struct TheCatApi {
    pub api_key: Option<String>,
}

#[derive(Deserialize)]
struct CatImage {
    id: String,
    url: String,
}

impl ImageProvider for TheCatApi {
    fn request_url(&self) -> String {
        match &self.api_key {
            Some(key) => format!("https://api.thecatapi.com/v1/images/search?api_key={key}"),
            None => "https://api.thecatapi.com/v1/images/search".to_string(),
        }
    }

    fn parse_response(&self, body: &[u8]) -> Result<ItemRef, FetchError> {
        let images: Vec<CatImage> = serde_json::from_slice(body)?;
        let image = images
            .into_iter()
            .next()
            .ok_or(FetchError::MissingField("images[0]"))?;
        let extension = split_file_name(&image.url)?.1.to_string();
        Ok(ItemRef {
            id: image.id,
            url: image.url,
            extension,
        })
    }
}

/// shibe.online random shiba pictures. The payload is a bare array of CDN
/// URLs, so id and extension both come out of the file name.
pub struct ShibeOnline;

impl ImageProvider for ShibeOnline {
    fn request_url(&self) -> String {
        "https://shibe.online/api/shibes?count=1&urls=true".to_string()
    }

    fn parse_response(&self, body: &[u8]) -> Result<ItemRef, FetchError> {
        let urls: Vec<String> = serde_json::from_slice(body)?;
        let url = urls
            .into_iter()
            .next()
            .ok_or(FetchError::MissingField("urls[0]"))?;
        let (id, extension) = {
            let (stem, extension) = split_file_name(&url)?;
            (stem.to_string(), extension.to_string())
        };
        Ok(ItemRef { id, url, extension })
    }
}

fn split_file_name(url: &str) -> Result<(&str, &str), FetchError> {
    FILE_NAME_REGEX
        .captures(url)
        .and_then(|caps| Some((caps.get(1)?.as_str(), caps.get(2)?.as_str())))
        .ok_or(FetchError::MissingField("image file name"))
}
