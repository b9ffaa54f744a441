/// TVMaze show directory implementation.
use super::tvmaze_types::{TvMazeEpisode, TvMazeSearchResult, TvMazeShow};
use super::{
    Episode, EpisodeId, PLACEHOLDER_IMAGE, Show, ShowDirectory, ShowDirectoryError, ShowId,
};
use reqwest::StatusCode;
use reqwest::header::USER_AGENT as USER_AGENT_HEADER;
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use url::Url;

/// Base URL of the public TVMaze API.
const DEFAULT_BASE_URL: &str = "https://api.tvmaze.com";

/// User agent sent with every request.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Name used for episodes TVMaze lists without a title.
const UNTITLED_EPISODE: &str = "Unknown";

/// Show directory backed by the TVMaze API.
///
/// Searches go through the multi-result `/search/shows` endpoint, episode
/// lists through `/shows/{id}/episodes`.
#[derive(Debug, Clone)]
pub struct TvMazeDirectory {
    client: Client,
    base_url: String,
}

impl TvMazeDirectory {
    /// Creates a new TVMaze directory pointing at the public API.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Points the directory at a different server, e.g. a local mock.
    ///
    /// A trailing slash on the URL is ignored.
    #[must_use]
    pub fn with_base_url(mut self, base_url: &Url) -> Self {
        self.base_url = base_url.as_str().trim_end_matches('/').to_string();
        self
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Converts a TVMaze show to our internal Show structure.
    ///
    /// Substitutes the placeholder image when TVMaze has no usable image.
    fn convert_show(tvmaze_show: TvMazeShow) -> Show {
        let image = tvmaze_show
            .image
            .and_then(|image| image.medium)
            .filter(|medium| !medium.trim().is_empty())
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());

        Show {
            id: ShowId(tvmaze_show.id),
            name: tvmaze_show.name,
            summary: tvmaze_show.summary.unwrap_or_default(),
            image,
        }
    }

    /// Converts a TVMaze episode to our internal Episode structure.
    fn convert_episode(tvmaze_episode: TvMazeEpisode) -> Episode {
        Episode {
            id: EpisodeId(tvmaze_episode.id),
            name: tvmaze_episode
                .name
                .unwrap_or_else(|| UNTITLED_EPISODE.to_string()),
            season: tvmaze_episode.season,
            number: tvmaze_episode.number,
        }
    }

    /// Checks the response status and decodes the JSON body.
    fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ShowDirectoryError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ShowDirectoryError::RequestError(format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .json()
            .map_err(|e| ShowDirectoryError::ParseError(e.to_string()))
    }
}

impl Default for TvMazeDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl ShowDirectory for TvMazeDirectory {
    fn search_shows(&self, query: &str) -> Result<Vec<Show>, ShowDirectoryError> {
        let url = format!("{}/search/shows", self.base_url);
        tracing::debug!(%url, query, "searching shows");

        let response = self
            .client
            .get(&url)
            .header(USER_AGENT_HEADER, USER_AGENT)
            .query(&[("q", query)])
            .send()
            .map_err(|e| ShowDirectoryError::RequestError(e.to_string()))?;

        let results: Vec<TvMazeSearchResult> = Self::decode(response)?;
        let shows: Vec<Show> = results
            .into_iter()
            .map(|result| Self::convert_show(result.show))
            .collect();

        tracing::info!(query, count = shows.len(), "show search complete");
        Ok(shows)
    }

    fn get_episodes(&self, show_id: ShowId) -> Result<Vec<Episode>, ShowDirectoryError> {
        let url = format!("{}/shows/{}/episodes", self.base_url, show_id);
        tracing::debug!(%url, %show_id, "fetching episodes");

        let response = self
            .client
            .get(&url)
            .header(USER_AGENT_HEADER, USER_AGENT)
            .send()
            .map_err(|e| ShowDirectoryError::RequestError(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ShowDirectoryError::ShowNotFound(show_id));
        }

        let raw: Vec<TvMazeEpisode> = Self::decode(response)?;
        let episodes: Vec<Episode> = raw.into_iter().map(Self::convert_episode).collect();

        tracing::info!(%show_id, count = episodes.len(), "episode list complete");
        Ok(episodes)
    }
}
