use std::{io::Write, path::Path};

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub discord_token: String,
    pub cat_api_token: Option<String>,
    pub admin_list: Vec<String>,
    pub image_whitelist_active: bool,
    pub image_whitelist: Vec<String>,
}

impl Config {
    pub async fn load_or_create(path: &str) -> tokio::io::Result<Self> {
        if Path::new(path).exists() {
            let data = tokio::fs::read_to_string(path).await?;
            Ok(serde_json::from_str(&data)?)
        } else {
            let discord_token = Self::ask("DISCORD TOKEN").await?;
            let admin_id = Self::ask("ADMIN USER ID").await?;
            let cat_api_token =
                Self::ask_optional("CAT API TOKEN", Some("https://thecatapi.com/signup")).await?;

            let config = Self {
                discord_token,
                cat_api_token,
                admin_list: vec![admin_id],
                ..Default::default()
            };

            config.save(path).await?;
            Ok(config)
        }
    }

    async fn ask(prompt: &str) -> tokio::io::Result<String> {
        print!("{prompt} => ");
        std::io::stdout().flush().unwrap();

        let mut input = String::new();
        BufReader::new(tokio::io::stdin())
            .read_line(&mut input)
            .await?;
        Ok(input.trim().to_owned())
    }

    async fn ask_optional(
        prompt: &str,
        help_url: Option<&str>,
    ) -> tokio::io::Result<Option<String>> {
        if let Some(url) = help_url {
            println!("{url}");
            println!("Keep empty to not set.");
        }

        let value = Self::ask(prompt).await?;
        Ok(if value.is_empty() { None } else { Some(value) })
    }

    pub async fn save(&self, path: &str) -> tokio::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json).await
    }

    pub async fn reload(&mut self, path: &str) -> tokio::io::Result<()> {
        let data = tokio::fs::read_to_string(path).await?;
        *self = serde_json::from_str(&data)?;
        Ok(())
    }
}
