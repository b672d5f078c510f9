//! Movie records as returned by the metadata API.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A movie as it appears in list and search pages
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub release_date: Option<String>,
}

impl MovieSummary {
    /// Year part of the release date, if the API sent a well-formed one.
    pub fn release_year(&self) -> Option<i32> {
        let date = self.release_date.as_deref()?;
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .ok()
            .map(|d| d.year())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// Full movie record for the detail screen
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    #[serde(flatten)]
    pub summary: MovieSummary,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

/// One page of a list or search endpoint
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MoviePage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<MovieSummary>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

/// A favorited movie, stored exactly as it was received.
///
/// The typed summary fields drive lookups and rendering; any other field of
/// the original object lands in `extra` and is written back unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    #[serde(flatten)]
    pub movie: MovieSummary,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FavoriteRecord {
    pub fn id(&self) -> u64 {
        self.movie.id
    }
}

impl From<MovieSummary> for FavoriteRecord {
    fn from(movie: MovieSummary) -> Self {
        Self {
            movie,
            extra: Map::new(),
        }
    }
}

impl From<&MovieDetail> for FavoriteRecord {
    fn from(detail: &MovieDetail) -> Self {
        let mut extra = Map::new();
        extra.insert("runtime".to_string(), detail.runtime.into());
        extra.insert("overview".to_string(), detail.overview.clone().into());
        extra.insert(
            "genres".to_string(),
            Value::Array(
                detail
                    .genres
                    .iter()
                    .map(|g| serde_json::json!({ "id": g.id, "name": g.name }))
                    .collect(),
            ),
        );
        Self {
            movie: detail.summary.clone(),
            extra,
        }
    }
}
