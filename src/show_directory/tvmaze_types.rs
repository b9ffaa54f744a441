/// TVMaze API response types for deserialization.
///
/// These structures mirror the JSON response format from the TVMaze API.
use serde::Deserialize;

/// A single entry of the `/search/shows` response array.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeSearchResult {
    /// The matched show
    pub show: TvMazeShow,
}

/// A show record as embedded in search results.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeShow {
    /// TVMaze show id
    pub id: u64,
    /// The name of the TV show
    pub name: String,
    /// Show summary in HTML format (may be null)
    pub summary: Option<String>,
    /// Poster images (null when TVMaze has none)
    pub image: Option<TvMazeImage>,
}

/// Image URLs of a show.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeImage {
    /// Medium sized poster URL
    pub medium: Option<String>,
}

/// A single episode from the `/shows/{id}/episodes` endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeEpisode {
    /// TVMaze episode id
    pub id: u64,
    /// Episode title (may be null for episodes without a title)
    pub name: Option<String>,
    /// Season number
    pub season: u32,
    /// Episode number within the season (null for specials)
    pub number: Option<u32>,
}
