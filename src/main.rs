mod config;
mod csrf;
mod db;
mod entities;
mod error;
mod models;
mod ranking;
mod routes;
mod service;
mod store;
mod templates;
mod tmdb;

use std::sync::Arc;

use axum::{Router, extract::FromRef, routing::get};
use axum_extra::extract::cookie::Key;
use tower_http::trace::TraceLayer;

use crate::{config::Config, store::MovieStore, tmdb::TmdbClient};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: MovieStore,
    pub tmdb: Arc<TmdbClient>,
    pub cookie_key: Key,
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/add", get(routes::add_form).post(routes::add_submit))
        .route("/find_movie/{id}", get(routes::find_movie))
        .route("/edit/{id}", get(routes::edit_form).post(routes::edit_submit))
        .route("/delete/{id}", get(routes::delete))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,movierank=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Arc::new(Config::from_env()?);

    let http = reqwest::Client::builder().user_agent("movierank/0.1").build()?;

    let db = db::connect_and_migrate(&config.database_url).await?;
    let store = MovieStore::new(db);

    let tmdb = TmdbClient::new(
        http,
        config.tmdb_api_key.clone(),
        config.tmdb_base_url.clone(),
        config.tmdb_rps,
    );

    let state = AppState {
        config: config.clone(),
        store,
        tmdb: Arc::new(tmdb),
        cookie_key: Key::derive_from(config.secret_key.as_bytes()),
    };

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, router(state)).await?;

    Ok(())
}

#[cfg(test)]
impl AppState {
    pub fn for_tests(db: sea_orm::DatabaseConnection) -> Self {
        let config = Config {
            addr: "127.0.0.1:0".parse().expect("addr"),
            database_url: "sqlite::memory:".into(),
            tmdb_api_key: String::new(),
            tmdb_base_url: "http://localhost".into(),
            tmdb_image_url: "https://image.tmdb.org/t/p/w500".into(),
            tmdb_rps: 4,
            secret_key: "x".repeat(64),
        };
        let tmdb = TmdbClient::new(
            reqwest::Client::new(),
            config.tmdb_api_key.clone(),
            config.tmdb_base_url.clone(),
            config.tmdb_rps,
        );
        Self {
            cookie_key: Key::derive_from(config.secret_key.as_bytes()),
            config: Arc::new(config),
            store: MovieStore::new(db),
            tmdb: Arc::new(tmdb),
        }
    }
}
