//! Rendering of shows and episodes into page containers
//!
//! The containers are plain values handed to the render functions
//! explicitly. Every render call fully replaces the previous content of its
//! container, so rendering is a stateless re-projection of the latest data.

use crate::show_directory::{Episode, Show, ShowId};
use askama::Template;

/// Markup of a single show card
#[derive(Template)]
#[template(path = "card.html")]
struct CardTemplate<'a> {
    id: String,
    name: &'a str,
    summary: &'a str,
    image: &'a str,
}

/// Markup of the `#shows-list` element wrapping pre-rendered cards
#[derive(Template)]
#[template(path = "shows_list.html")]
struct ShowsListTemplate {
    cards: Vec<String>,
}

/// Markup of the `#episodes-area` section
#[derive(Template)]
#[template(path = "episodes_area.html")]
struct EpisodesAreaTemplate<'a> {
    items: &'a [String],
    visible: bool,
}

/// The "Episodes" control of a show card
///
/// The control carries the id of the show it was generated for, so a click
/// handler never has to look the id up from surrounding markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodesButton {
    show_id: ShowId,
}

impl EpisodesButton {
    /// The show this control lists episodes for
    pub fn show_id(&self) -> ShowId {
        self.show_id
    }
}

/// A single show card inside the shows list
#[derive(Debug, Clone, PartialEq)]
pub struct ShowCard {
    show: Show,
}

impl ShowCard {
    fn new(show: Show) -> Self {
        Self { show }
    }

    /// The show rendered by this card
    pub fn show(&self) -> &Show {
        &self.show
    }

    /// Value of the card's `data-show-id` attribute
    pub fn data_show_id(&self) -> String {
        self.show.id.to_string()
    }

    /// The card's "Episodes" control
    pub fn episodes_button(&self) -> EpisodesButton {
        EpisodesButton {
            show_id: self.show.id,
        }
    }

    /// Renders the card as a Bootstrap card column
    ///
    /// The summary is inserted as markup; everything else is escaped.
    pub fn to_html(&self) -> Result<String, askama::Error> {
        CardTemplate {
            id: self.data_show_id(),
            name: &self.show.name,
            summary: &self.show.summary,
            image: &self.show.image,
        }
        .render()
    }
}

/// Container receiving the show cards
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShowsList {
    cards: Vec<ShowCard>,
}

impl ShowsList {
    /// Creates an empty shows list
    pub fn new() -> Self {
        Self::default()
    }

    /// The cards currently in the list, in render order
    pub fn cards(&self) -> &[ShowCard] {
        &self.cards
    }

    /// Number of cards in the list
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the list has no cards
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Renders the list as the `#shows-list` element
    pub fn to_html(&self) -> Result<String, askama::Error> {
        let cards = self
            .cards
            .iter()
            .map(ShowCard::to_html)
            .collect::<Result<Vec<_>, _>>()?;
        ShowsListTemplate { cards }.render()
    }
}

/// Container receiving the episode list, toggled visible or hidden
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EpisodesArea {
    items: Vec<String>,
    visible: bool,
}

impl EpisodesArea {
    /// Creates an empty, hidden episode area
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of the list items currently shown
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Whether the area is currently revealed
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Reveals the area
    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Hides the area, its items stay in place
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Renders the area as the `#episodes-area` section
    pub fn to_html(&self) -> Result<String, askama::Error> {
        EpisodesAreaTemplate {
            items: &self.items,
            visible: self.visible,
        }
        .render()
    }
}

/// Replaces the content of the shows list with one card per show
///
/// Any card from a previous call is discarded, the resulting card count
/// always equals `shows.len()`.
pub fn populate_shows(list: &mut ShowsList, shows: Vec<Show>) {
    list.cards.clear();
    list.cards.extend(shows.into_iter().map(ShowCard::new));
}

/// Replaces the content of the episode area and reveals it
pub fn populate_episodes(area: &mut EpisodesArea, episodes: &[Episode]) {
    area.items.clear();
    area.items.extend(episodes.iter().map(format_episode));
    area.show();
}

/// Formats an episode as "name (season S, number N)"
///
/// Specials without an episode number render as "number n/a".
pub fn format_episode(episode: &Episode) -> String {
    match episode.number {
        Some(number) => format!(
            "{} (season {}, number {})",
            episode.name, episode.season, number
        ),
        None => format!("{} (season {}, number n/a)", episode.name, episode.season),
    }
}
