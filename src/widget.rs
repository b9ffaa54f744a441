//! Event wiring between the directory and the page
//!
//! The widget owns a page and a show directory. Its handlers correspond to
//! the two user actions: submitting the search form and clicking the
//! "Episodes" control of a card.

use crate::generation::Generation;
use crate::page::Page;
use crate::render::{EpisodesButton, populate_episodes, populate_shows};
use crate::show_directory::{ShowDirectory, ShowDirectoryError};
use parking_lot::Mutex;
use thiserror::Error;

/// Errors that can occur while handling a widget event
#[derive(Debug, Error)]
pub enum WidgetError {
    /// The directory request failed
    #[error(transparent)]
    Directory(#[from] ShowDirectoryError),

    /// No card exists at the given zero-based index; the message reports
    /// the one-based position cards are numbered with
    #[error("No show card at position {}", .0 + 1)]
    UnknownCard(usize),
}

/// Result of handling a widget event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The event was a no-op (empty search query)
    Ignored,
    /// The response was rendered into the page
    Rendered {
        /// Number of shows or episodes rendered
        count: usize,
    },
    /// A newer request was issued while this one was in flight, the
    /// response was dropped without touching the page
    Superseded,
}

/// The show search widget
///
/// Handlers take `&self` and may be invoked from several threads. The page
/// lock is never held while a request is in flight; generation tickets make
/// sure a late response never renders over a fresher one.
#[derive(Debug)]
pub struct SearchWidget<D> {
    directory: D,
    page: Mutex<Page>,
    searches: Generation,
    episode_requests: Generation,
}

impl<D> SearchWidget<D>
where
    D: ShowDirectory,
{
    /// Creates a widget with an empty page
    pub fn new(directory: D) -> Self {
        Self {
            directory,
            page: Mutex::new(Page::new()),
            searches: Generation::new(),
            episode_requests: Generation::new(),
        }
    }

    /// The directory used by this widget
    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Returns a snapshot of the current page
    pub fn page(&self) -> Page {
        self.page.lock().clone()
    }

    /// Handles a submission of the search form
    ///
    /// An empty (or whitespace-only) query is ignored without touching the
    /// page or the network. Otherwise the episode area is hidden, the shows
    /// are fetched and the shows list is replaced with the results.
    ///
    /// # Errors
    ///
    /// Returns an error if the search request fails. The page keeps its
    /// previous cards in that case.
    pub fn submit_search(&self, query: &str) -> Result<Outcome, WidgetError> {
        let query = query.trim();
        if query.is_empty() {
            tracing::debug!("ignoring empty search query");
            return Ok(Outcome::Ignored);
        }

        let ticket = self.searches.issue();
        {
            let mut page = self.page.lock();
            page.episodes.hide();
            page.form.set_query(query);
        }

        let shows = self.directory.search_shows(query)?;

        let mut page = self.page.lock();
        if !self.searches.is_current(ticket) {
            tracing::debug!(query, "dropping superseded search response");
            return Ok(Outcome::Superseded);
        }

        let count = shows.len();
        populate_shows(&mut page.shows, shows);
        Ok(Outcome::Rendered { count })
    }

    /// Handles a click on the "Episodes" control of a card
    ///
    /// Fetches the episode list of the control's show and renders it into
    /// the episode area, which is revealed afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the episode request fails.
    pub fn click_episodes(&self, button: &EpisodesButton) -> Result<Outcome, WidgetError> {
        let search = self.searches.current();
        let ticket = self.episode_requests.issue();
        let show_id = button.show_id();

        let episodes = self.directory.get_episodes(show_id)?;

        let mut page = self.page.lock();
        if !self.searches.is_current(search) || !self.episode_requests.is_current(ticket) {
            tracing::debug!(%show_id, "dropping superseded episode response");
            return Ok(Outcome::Superseded);
        }

        populate_episodes(&mut page.episodes, &episodes);
        Ok(Outcome::Rendered {
            count: episodes.len(),
        })
    }

    /// Resolves the "Episodes" control of the card at `index`
    ///
    /// # Errors
    ///
    /// Returns `WidgetError::UnknownCard` if the shows list has no card at
    /// that position.
    pub fn episodes_button(&self, index: usize) -> Result<EpisodesButton, WidgetError> {
        self.page
            .lock()
            .shows
            .cards()
            .get(index)
            .map(|card| card.episodes_button())
            .ok_or(WidgetError::UnknownCard(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::show_directory::{Episode, EpisodeId, Show, ShowId};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc::{self, Receiver, Sender};
    use std::thread;

    /// In-memory directory counting the requests it receives
    #[derive(Default)]
    struct FakeDirectory {
        shows: HashMap<String, Vec<Show>>,
        episodes: HashMap<ShowId, Vec<Episode>>,
        calls: AtomicUsize,
        /// Query whose response is held back until the gate is released
        gated: Option<(String, std::sync::Mutex<Receiver<()>>, std::sync::Mutex<Sender<()>>)>,
    }

    impl FakeDirectory {
        fn with_show(mut self, query: &str, id: u64, name: &str) -> Self {
            self.shows.entry(query.to_string()).or_default().push(Show {
                id: ShowId(id),
                name: name.to_string(),
                summary: String::new(),
                image: "https://example.com/poster.jpg".to_string(),
            });
            self
        }

        fn with_episodes(mut self, id: u64, names: &[&str]) -> Self {
            let episodes = names
                .iter()
                .zip(1u32..)
                .map(|(name, number)| Episode {
                    id: EpisodeId(u64::from(number) + id * 100),
                    name: (*name).to_string(),
                    season: 1,
                    number: Some(number),
                })
                .collect();
            self.episodes.insert(ShowId(id), episodes);
            self
        }

        /// Holds back the response for `query` until the returned sender
        /// fires. The fake signals `started` once the request arrived.
        fn gate(mut self, query: &str) -> (Self, Sender<()>, Receiver<()>) {
            let (release_tx, release_rx) = mpsc::channel();
            let (started_tx, started_rx) = mpsc::channel();
            self.gated = Some((
                query.to_string(),
                std::sync::Mutex::new(release_rx),
                std::sync::Mutex::new(started_tx),
            ));
            (self, release_tx, started_rx)
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn wait_if_gated(&self, key: &str) {
            if let Some((gated, release, started)) = &self.gated {
                if gated == key {
                    started.lock().unwrap().send(()).unwrap();
                    release.lock().unwrap().recv().unwrap();
                }
            }
        }
    }

    impl ShowDirectory for FakeDirectory {
        fn search_shows(&self, query: &str) -> Result<Vec<Show>, ShowDirectoryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.wait_if_gated(query);
            Ok(self.shows.get(query).cloned().unwrap_or_default())
        }

        fn get_episodes(&self, show_id: ShowId) -> Result<Vec<Episode>, ShowDirectoryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.wait_if_gated(&show_id.to_string());
            self.episodes
                .get(&show_id)
                .cloned()
                .ok_or(ShowDirectoryError::ShowNotFound(show_id))
        }
    }

    #[test]
    fn test_empty_query_short_circuits() {
        let widget = SearchWidget::new(FakeDirectory::default());
        let before = widget.page();

        assert_eq!(widget.submit_search("").unwrap(), Outcome::Ignored);
        assert_eq!(widget.submit_search("   ").unwrap(), Outcome::Ignored);

        assert_eq!(widget.directory().calls(), 0);
        assert_eq!(widget.page(), before);
    }

    #[test]
    fn test_search_then_episodes() {
        let directory = FakeDirectory::default()
            .with_show("girls", 139, "Girls")
            .with_show("girls", 41734, "Gilmore Girls")
            .with_episodes(139, &["Pilot", "Vagina Panic"]);
        let widget = SearchWidget::new(directory);

        assert_eq!(
            widget.submit_search("girls").unwrap(),
            Outcome::Rendered { count: 2 }
        );
        assert_eq!(widget.page().shows.len(), 2);
        assert_eq!(widget.page().form.query(), "girls");

        let button = widget.episodes_button(0).unwrap();
        assert_eq!(button.show_id(), ShowId(139));
        assert_eq!(
            widget.click_episodes(&button).unwrap(),
            Outcome::Rendered { count: 2 }
        );

        let page = widget.page();
        assert!(page.episodes.is_visible());
        assert_eq!(
            page.episodes.items(),
            [
                "Pilot (season 1, number 1)".to_string(),
                "Vagina Panic (season 1, number 2)".to_string()
            ]
        );
    }

    #[test]
    fn test_new_search_hides_episodes_and_replaces_cards() {
        let directory = FakeDirectory::default()
            .with_show("girls", 139, "Girls")
            .with_show("girls", 41734, "Gilmore Girls")
            .with_show("lost", 123, "Lost")
            .with_episodes(139, &["Pilot"]);
        let widget = SearchWidget::new(directory);

        widget.submit_search("girls").unwrap();
        let button = widget.episodes_button(0).unwrap();
        widget.click_episodes(&button).unwrap();
        assert!(widget.page().episodes.is_visible());

        widget.submit_search("lost").unwrap();
        let page = widget.page();
        assert!(!page.episodes.is_visible());
        assert_eq!(page.shows.len(), 1);
        assert_eq!(page.shows.cards()[0].show().name, "Lost");
    }

    #[test]
    fn test_unknown_card_position() {
        let widget = SearchWidget::new(FakeDirectory::default().with_show("lost", 123, "Lost"));
        widget.submit_search("lost").unwrap();

        let result = widget.episodes_button(2);
        assert!(matches!(result, Err(WidgetError::UnknownCard(2))));
        assert_eq!(
            result.unwrap_err().to_string(),
            "No show card at position 3"
        );
    }

    #[test]
    fn test_failed_episode_request_propagates() {
        let widget = SearchWidget::new(FakeDirectory::default().with_show("lost", 123, "Lost"));
        widget.submit_search("lost").unwrap();
        let button = widget.episodes_button(0).unwrap();

        let result = widget.click_episodes(&button);
        assert!(matches!(
            result,
            Err(WidgetError::Directory(ShowDirectoryError::ShowNotFound(ShowId(123))))
        ));
        assert!(!widget.page().episodes.is_visible());
    }

    #[test]
    fn test_superseded_search_does_not_render() {
        let (directory, release, started) = FakeDirectory::default()
            .with_show("slow", 1, "Slow Show")
            .with_show("fast", 2, "Fast Show")
            .gate("slow");
        let widget = SearchWidget::new(directory);

        thread::scope(|scope| {
            let slow = scope.spawn(|| widget.submit_search("slow"));
            started.recv().unwrap();

            assert_eq!(
                widget.submit_search("fast").unwrap(),
                Outcome::Rendered { count: 1 }
            );
            release.send(()).unwrap();

            assert_eq!(slow.join().unwrap().unwrap(), Outcome::Superseded);
        });

        let page = widget.page();
        assert_eq!(page.shows.len(), 1);
        assert_eq!(page.shows.cards()[0].show().name, "Fast Show");
    }

    #[test]
    fn test_episode_response_after_new_search_does_not_render() {
        let (directory, release, started) = FakeDirectory::default()
            .with_show("girls", 139, "Girls")
            .with_show("lost", 123, "Lost")
            .with_episodes(139, &["Pilot"])
            .gate("139");
        let widget = SearchWidget::new(directory);
        widget.submit_search("girls").unwrap();
        let button = widget.episodes_button(0).unwrap();

        thread::scope(|scope| {
            let episodes = scope.spawn(|| widget.click_episodes(&button));
            started.recv().unwrap();

            widget.submit_search("lost").unwrap();
            release.send(()).unwrap();

            assert_eq!(episodes.join().unwrap().unwrap(), Outcome::Superseded);
        });

        let page = widget.page();
        assert!(!page.episodes.is_visible());
        assert!(page.episodes.items().is_empty());
    }
}
