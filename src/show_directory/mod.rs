/// Data structures and traits for querying a TV show directory.
///
/// This module provides the normalized `Show` and `Episode` shapes the
/// renderer works with, as well as the `ShowDirectory` trait implemented by
/// directory backends.
mod tvmaze;
mod tvmaze_types;

pub use tvmaze::TvMazeDirectory;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

/// Image shown on a card when the directory has no image for a show.
pub const PLACEHOLDER_IMAGE: &str = "https://tinyurl.com/tv-missing";

/// Errors that can occur while querying the show directory.
#[derive(Debug, Error)]
pub enum ShowDirectoryError {
    /// Request to the directory service failed
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Failed to parse the directory's JSON response
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// The requested show does not exist
    #[error("Show not found: {0}")]
    ShowNotFound(ShowId),
}

/// Opaque identifier of a show in the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShowId(pub u64);

impl fmt::Display for ShowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ShowId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Opaque identifier of an episode in the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EpisodeId(pub u64);

impl fmt::Display for EpisodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EpisodeId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A TV show as returned by a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Show {
    /// Directory identifier of the show
    pub id: ShowId,
    /// The show's title
    pub name: String,
    /// Summary of the show, may contain HTML markup
    pub summary: String,
    /// URL of the show's poster image, never empty
    pub image: String,
}

/// A single episode of a show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    /// Directory identifier of the episode
    pub id: EpisodeId,
    /// The episode title
    pub name: String,
    /// The season number this episode belongs to
    pub season: u32,
    /// The episode number within the season (None for specials)
    pub number: Option<u32>,
}

/// Trait for directory services that can search shows and list episodes.
///
/// Implementors issue exactly one request per call. Nothing is cached, so
/// identical queries hit the service again.
pub trait ShowDirectory {
    /// Searches the directory for shows matching the given query.
    ///
    /// # Arguments
    ///
    /// * `query` - Free text search term
    ///
    /// # Returns
    ///
    /// The matching shows in the order the directory ranked them, or a
    /// ShowDirectoryError if the request or the response was bad
    fn search_shows(&self, query: &str) -> Result<Vec<Show>, ShowDirectoryError>;

    /// Fetches the full episode list of a show.
    ///
    /// # Arguments
    ///
    /// * `show_id` - The show to list episodes for
    ///
    /// # Returns
    ///
    /// The episodes in directory order, or a ShowDirectoryError
    fn get_episodes(&self, show_id: ShowId) -> Result<Vec<Episode>, ShowDirectoryError>;
}

impl<D> ShowDirectory for &D
where
    D: ShowDirectory + ?Sized,
{
    fn search_shows(&self, query: &str) -> Result<Vec<Show>, ShowDirectoryError> {
        (**self).search_shows(query)
    }

    fn get_episodes(&self, show_id: ShowId) -> Result<Vec<Episode>, ShowDirectoryError> {
        (**self).get_episodes(show_id)
    }
}
