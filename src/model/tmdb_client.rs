//! TMDB API client and the `MovieApi` seam used by the controller

use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use super::movie::{MovieDetail, MoviePage};
use crate::config::Config;
use crate::error::ApiError;
use crate::{log_api_request, log_api_result};

const POSTER_SIZE: &str = "w500";
const BACKDROP_SIZE: &str = "w1280";

/// Remote movie operations the application needs.
///
/// Implemented by [`TmdbClient`]; tests substitute an in-process fake.
#[async_trait]
pub trait MovieApi: Send + Sync {
    async fn fetch_now_playing(&self) -> Result<MoviePage, ApiError>;
    async fn fetch_popular(&self) -> Result<MoviePage, ApiError>;
    async fn fetch_top_rated(&self) -> Result<MoviePage, ApiError>;
    async fn fetch_movie_detail(&self, movie_id: u64) -> Result<MovieDetail, ApiError>;
    /// The caller must not pass an empty query.
    async fn search_movies(&self, query: &str) -> Result<MoviePage, ApiError>;
}

/// Builds display URLs for poster and backdrop images.
#[derive(Clone, Debug)]
pub struct ImageUrls {
    base: String,
}

impl ImageUrls {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    pub fn poster_url(&self, path: &str) -> String {
        format!("{}/{}{}", self.base, POSTER_SIZE, path)
    }

    pub fn backdrop_url(&self, path: &str) -> String {
        format!("{}/{}{}", self.base, BACKDROP_SIZE, path)
    }
}

/// Thin passthrough over the TMDB v3 REST API. No retries, no caching.
#[derive(Clone)]
pub struct TmdbClient {
    http: Client,
    api_base: String,
}

impl TmdbClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", config.access_token))
            .context("access token contains characters not allowed in a header")?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            api_base: config.api_base.clone(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.api_base, endpoint)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let response = self.http.get(self.url(endpoint)).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status,
            });
        }

        Ok(response.json::<T>().await?)
    }

    async fn fetch_list(&self, operation: &str, endpoint: &str) -> Result<MoviePage, ApiError> {
        log_api_request!(operation, endpoint);
        let result = self.get_json::<MoviePage>(endpoint, &[]).await;
        log_api_result!(operation, endpoint, result);
        result
    }
}

#[async_trait]
impl MovieApi for TmdbClient {
    async fn fetch_now_playing(&self) -> Result<MoviePage, ApiError> {
        self.fetch_list("now_playing", "/movie/now_playing").await
    }

    async fn fetch_popular(&self) -> Result<MoviePage, ApiError> {
        self.fetch_list("popular", "/movie/popular").await
    }

    async fn fetch_top_rated(&self) -> Result<MoviePage, ApiError> {
        self.fetch_list("top_rated", "/movie/top_rated").await
    }

    async fn fetch_movie_detail(&self, movie_id: u64) -> Result<MovieDetail, ApiError> {
        let endpoint = format!("/movie/{movie_id}");
        log_api_request!("movie_detail", endpoint, movie_id);

        let result = match self.get_json::<MovieDetail>(&endpoint, &[]).await {
            Err(ApiError::Status { status, .. }) if status == StatusCode::NOT_FOUND => {
                Err(ApiError::NotFound(movie_id))
            }
            other => other,
        };

        log_api_result!("movie_detail", endpoint, result);
        result
    }

    async fn search_movies(&self, query: &str) -> Result<MoviePage, ApiError> {
        let endpoint = "/search/movie";
        log_api_request!("search", endpoint, query);
        let result = self.get_json::<MoviePage>(endpoint, &[("query", query)]).await;
        log_api_result!("search", endpoint, result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_IMAGE_BASE;

    #[test]
    fn image_urls_use_fixed_size_tiers() {
        let urls = ImageUrls::new(DEFAULT_IMAGE_BASE);
        assert_eq!(
            urls.poster_url("/abc.jpg"),
            "https://image.tmdb.org/t/p/w500/abc.jpg"
        );
        assert_eq!(
            urls.backdrop_url("/abc.jpg"),
            "https://image.tmdb.org/t/p/w1280/abc.jpg"
        );
    }

    #[test]
    fn image_urls_stay_valid_for_empty_paths() {
        let urls = ImageUrls::new(DEFAULT_IMAGE_BASE);
        assert_eq!(urls.poster_url(""), "https://image.tmdb.org/t/p/w500");
        assert!(reqwest::Url::parse(&urls.backdrop_url("")).is_ok());
    }

    #[test]
    fn endpoints_are_joined_to_the_base() {
        let config = Config::from_lookup(|var| {
            (var == crate::config::TOKEN_VAR).then(|| "token".to_string())
        })
        .unwrap();
        let client = TmdbClient::new(&config).unwrap();
        assert_eq!(
            client.url("/movie/popular"),
            "https://api.themoviedb.org/3/movie/popular"
        );
    }

    #[test]
    fn not_found_is_distinguished() {
        assert!(ApiError::NotFound(42).is_not_found());
        let status = ApiError::Status {
            endpoint: "/movie/popular".to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        };
        assert!(!status.is_not_found());
        assert_eq!(status.to_string(), "/movie/popular returned HTTP 500 Internal Server Error");
    }

    #[test]
    fn failures_carry_the_status_that_gets_logged() {
        let unavailable = ApiError::Status {
            endpoint: "/movie/top_rated".to_string(),
            status: StatusCode::SERVICE_UNAVAILABLE,
        };
        assert_eq!(unavailable.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
        assert_eq!(ApiError::NotFound(7).status(), Some(StatusCode::NOT_FOUND));

        let results: [Result<(), ApiError>; 3] =
            [Ok(()), Err(ApiError::NotFound(7)), Err(unavailable)];
        for result in results {
            log_api_request!("movie_detail", "/movie/7", movie_id = 7);
            log_api_result!("movie_detail", "/movie/7", result);
        }
    }
}
