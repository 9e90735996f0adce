use std::{num::NonZeroU32, sync::Arc};

use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{CandidateDetail, CandidateSummary, Collection},
};

pub struct TmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl TmdbClient {
    pub fn new(client: reqwest::Client, api_key: String, base_url: String, rps: u32) -> Self {
        if api_key.trim().is_empty() {
            tracing::warn!("Using mock TMDB data - no TMDB_API_KEY provided");
        }

        let rps = NonZeroU32::new(rps).unwrap_or(NonZeroU32::MIN);
        let limiter = Arc::new(RateLimiter::direct(Quota::per_second(rps)));
        Self { client, api_key, base_url, limiter }
    }

    fn is_mock(&self) -> bool {
        self.api_key.trim().is_empty()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Candidates in the provider's own order.
    pub async fn search(&self, query: &str) -> AppResult<Vec<CandidateSummary>> {
        if self.is_mock() {
            return Ok(mock::search(query));
        }

        self.limiter.until_ready().await;

        let resp: SearchResponse = self
            .client
            .get(self.url("/search/movie"))
            .query(&[("query", query), ("api_key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        tracing::debug!(query, results = resp.results.len(), "tmdb search");
        Ok(resp.results)
    }

    pub async fn fetch(&self, external_id: i64) -> AppResult<CandidateDetail> {
        if self.is_mock() {
            return mock::detail(external_id)
                .ok_or_else(|| AppError::NotFound(format!("catalog entry {external_id}")));
        }

        self.limiter.until_ready().await;

        let detail: CandidateDetail = self
            .client
            .get(self.url(&format!("/movie/{external_id}")))
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        tracing::debug!(external_id, "tmdb movie detail");
        Ok(detail)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<CandidateSummary>,
}

mod mock {
    use super::*;

    struct Entry {
        id: i64,
        title: &'static str,
        release_date: &'static str,
        overview: &'static str,
        poster_path: &'static str,
        collection_poster: Option<&'static str>,
    }

    const CATALOG: &[Entry] = &[
        Entry {
            id: 550,
            title: "Fight Club",
            release_date: "1999-10-15",
            overview: "A ticking-time-bomb insomniac and a slippery soap salesman channel \
                       primal male aggression into a shocking new form of therapy.",
            poster_path: "/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg",
            collection_poster: None,
        },
        Entry {
            id: 120,
            title: "The Lord of the Rings: The Fellowship of the Ring",
            release_date: "2001-12-18",
            overview: "Young hobbit Frodo Baggins, after inheriting a mysterious ring from his \
                       uncle Bilbo, must leave his home in order to keep it from falling into \
                       the hands of its evil creator.",
            poster_path: "/6oom5QYQ2yQTMJIbnvbkBL9cHo6.jpg",
            collection_poster: Some("/oENY593nKRVL2PnxXsMtlh8izb4.jpg"),
        },
    ];

    pub(super) fn search(query: &str) -> Vec<CandidateSummary> {
        let needle = query.trim().to_lowercase();
        CATALOG
            .iter()
            .filter(|e| e.title.to_lowercase().contains(&needle))
            .map(|e| CandidateSummary {
                id: e.id,
                title: e.title.to_string(),
                release_date: Some(e.release_date.to_string()),
                overview: Some(e.overview.to_string()),
                poster_path: Some(e.poster_path.to_string()),
            })
            .collect()
    }

    pub(super) fn detail(id: i64) -> Option<CandidateDetail> {
        CATALOG.iter().find(|e| e.id == id).map(|e| CandidateDetail {
            original_title: Some(e.title.to_string()),
            release_date: Some(e.release_date.to_string()),
            overview: Some(e.overview.to_string()),
            belongs_to_collection: e
                .collection_poster
                .map(|p| Collection { poster_path: Some(p.to_string()) }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_client() -> TmdbClient {
        TmdbClient::new(reqwest::Client::new(), String::new(), "http://localhost".into(), 4)
    }

    #[test]
    fn test_search_response_tolerates_sparse_results() {
        let body = serde_json::json!({
            "page": 1,
            "results": [
                { "id": 11, "title": "Star Wars", "release_date": "1977-05-25", "poster_path": null },
                { "id": 12 }
            ]
        });
        let resp: SearchResponse = serde_json::from_value(body).unwrap();
        assert_eq!(resp.results.len(), 2);
        assert_eq!(resp.results[0].title, "Star Wars");
        assert_eq!(resp.results[0].poster_path, None);
        assert_eq!(resp.results[1].release_date, None);
    }

    #[test]
    fn test_detail_with_null_collection() {
        let body = serde_json::json!({
            "original_title": "Primer",
            "release_date": "2004-10-08",
            "overview": "Friends build a box.",
            "belongs_to_collection": null
        });
        let detail: CandidateDetail = serde_json::from_value(body).unwrap();
        assert_eq!(detail.belongs_to_collection, None);
        assert_eq!(detail.original_title.as_deref(), Some("Primer"));
    }

    /// Serves a TMDB stand-in on an ephemeral port and returns its base URL.
    async fn serve_fake_tmdb() -> String {
        use std::collections::HashMap;

        use axum::{
            Json, Router,
            extract::{Path, Query},
            http::StatusCode,
            routing::get,
        };

        async fn search() -> StatusCode {
            StatusCode::INTERNAL_SERVER_ERROR
        }

        async fn movie(
            Path(id): Path<i64>,
            Query(params): Query<HashMap<String, String>>,
        ) -> Result<Json<serde_json::Value>, StatusCode> {
            if params.get("api_key").map(String::as_str) != Some("KEY") {
                return Err(StatusCode::UNAUTHORIZED);
            }
            Ok(Json(serde_json::json!({
                "id": id,
                "original_title": "Amélie",
                "release_date": "2001-04-25",
                "overview": "A shy waitress decides to change the lives of those around her.",
                "belongs_to_collection": { "id": 1, "poster_path": "/amelie.jpg" }
            })))
        }

        let app = Router::new()
            .route("/3/search/movie", get(search))
            .route("/3/movie/{id}", get(movie));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        format!("http://{addr}/3/")
    }

    #[tokio::test]
    async fn test_http_search_error_status_is_upstream() {
        let base = serve_fake_tmdb().await;
        let client = TmdbClient::new(reqwest::Client::new(), "KEY".into(), base, 100);

        let inner = match client.search("x").await {
            Err(AppError::Upstream(inner)) => inner,
            other => panic!("expected upstream error, got {other:?}"),
        };
        assert_eq!(inner.status(), Some(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
        let url = inner.url().unwrap();
        assert_eq!(url.path(), "/3/search/movie");
        assert!(url.query_pairs().any(|(k, v)| k == "api_key" && v == "KEY"));
        assert!(url.query_pairs().any(|(k, v)| k == "query" && v == "x"));
    }

    #[tokio::test]
    async fn test_http_fetch_decodes_detail() {
        let base = serve_fake_tmdb().await;
        let client = TmdbClient::new(reqwest::Client::new(), "KEY".into(), base.clone(), 100);

        let detail = client.fetch(194).await.unwrap();
        assert_eq!(detail.original_title.as_deref(), Some("Amélie"));
        assert_eq!(detail.release_date.as_deref(), Some("2001-04-25"));
        assert_eq!(
            detail.belongs_to_collection.and_then(|c| c.poster_path).as_deref(),
            Some("/amelie.jpg")
        );

        let wrong_key = TmdbClient::new(reqwest::Client::new(), "OTHER".into(), base, 100);
        assert!(matches!(wrong_key.fetch(194).await, Err(AppError::Upstream(_))));
    }

    #[tokio::test]
    async fn test_mock_search_filters_by_title() {
        let client = mock_client();
        let results = client.search("fight").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 550);
        assert!(client.search("nothing like this").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mock_fetch_unknown_id() {
        let client = mock_client();
        assert!(client.fetch(120).await.unwrap().belongs_to_collection.is_some());
        assert!(matches!(client.fetch(1).await, Err(AppError::NotFound(_))));
    }
}
