//! ShowFinder - Search a TV show directory and browse episode lists
//!
//! This library provides the core functionality for querying the TVMaze
//! show directory, rendering matching shows as cards and listing the
//! episodes of a selected show.

mod generation;
mod page;
mod render;
mod show_directory;
mod widget;

// Re-export error types
pub use show_directory::ShowDirectoryError;
pub use widget::WidgetError;

// Re-export directory types
pub use show_directory::{
    Episode, EpisodeId, PLACEHOLDER_IMAGE, Show, ShowDirectory, ShowId, TvMazeDirectory,
};

// Re-export rendering and wiring types
pub use page::{Page, SearchForm};
pub use render::{
    EpisodesArea, EpisodesButton, ShowCard, ShowsList, format_episode, populate_episodes,
    populate_shows,
};
pub use widget::{Outcome, SearchWidget};

use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Top-level error type for ShowFinder operations
#[derive(Debug, Error)]
pub enum ShowFinderError {
    /// Error while handling a widget event
    #[error("{0}")]
    Widget(#[from] WidgetError),

    /// Error while rendering page markup
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Searches the directory and optionally lists the episodes of one result
///
/// This runs the same pipeline a user triggers on the page: submit the
/// query, then click the "Episodes" control of the card at
/// `episodes_for`. The resulting page is returned for display or export.
///
/// # Arguments
///
/// * `directory` - The show directory to query
/// * `query` - The search term; an empty query leaves the page empty
/// * `episodes_for` - Optional zero-based card position to list episodes for
///
/// # Examples
///
/// ```no_run
/// use show_finder::{TvMazeDirectory, search_and_render};
///
/// let page = search_and_render(TvMazeDirectory::new(), "Breaking Bad", Some(0)).unwrap();
/// for item in page.episodes.items() {
///     println!("{item}");
/// }
/// ```
pub fn search_and_render<D>(
    directory: D,
    query: &str,
    episodes_for: Option<usize>,
) -> Result<Page, ShowFinderError>
where
    D: ShowDirectory,
{
    let widget = SearchWidget::new(directory);
    widget.submit_search(query)?;

    if let Some(index) = episodes_for {
        let button = widget.episodes_button(index)?;
        widget.click_episodes(&button)?;
    }

    Ok(widget.page())
}

/// Writes a page as a standalone HTML document
///
/// # Errors
///
/// Returns `ShowFinderError::Render` if the markup cannot be rendered and
/// `ShowFinderError::Io` if the file cannot be written.
pub fn export_page(page: &Page, path: &Path) -> Result<(), ShowFinderError> {
    let html = page.to_html()?;
    fs::write(path, html)?;
    tracing::info!(path = %path.display(), "page exported");
    Ok(())
}
