use std::net::SocketAddr;

use anyhow::{Context, bail};

const MIN_SECRET_KEY_LEN: usize = 32;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub tmdb_api_key: String,
    pub tmdb_base_url: String,
    pub tmdb_image_url: String,
    pub tmdb_rps: u32,
    pub secret_key: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().context("PORT")?;

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://top-movie-list.db?mode=rwc".to_string());

        let tmdb_api_key = std::env::var("TMDB_API_KEY").unwrap_or_else(|_| "".to_string());
        let tmdb_base_url = std::env::var("TMDB_BASE_URL")
            .unwrap_or_else(|_| "https://api.themoviedb.org/3".to_string());
        let tmdb_image_url = std::env::var("TMDB_IMAGE_URL")
            .unwrap_or_else(|_| "https://image.tmdb.org/t/p/w500".to_string());

        let tmdb_rps: u32 = parse_or("TMDB_RPS", 4)?;

        let secret_key = std::env::var("SECRET_KEY").context("SECRET_KEY must be set")?;
        if secret_key.len() < MIN_SECRET_KEY_LEN {
            bail!("SECRET_KEY must be at least {MIN_SECRET_KEY_LEN} bytes");
        }

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            database_url,
            tmdb_api_key,
            tmdb_base_url,
            tmdb_image_url,
            tmdb_rps,
            secret_key,
        })
    }
}

/// Reads `var`, falling back to `default` only when it is unset.
fn parse_or<T>(var: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(var) {
        Ok(raw) => raw.trim().parse().with_context(|| format!("{var}={raw:?}")),
        Err(_) => Ok(default),
    }
}
