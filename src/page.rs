//! Page model
//!
//! Composes the search form and the two render containers into one page
//! that can be exported as a standalone HTML document.

use crate::render::{EpisodesArea, ShowsList};
use askama::Template;

/// Markup of the search form
#[derive(Template)]
#[template(path = "search_form.html")]
struct SearchFormTemplate<'a> {
    query: &'a str,
}

/// The full document around pre-rendered page parts
#[derive(Template)]
#[template(path = "page.html")]
struct PageTemplate {
    form: String,
    shows: String,
    episodes: String,
}

/// The search form with its text input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchForm {
    query: String,
}

impl SearchForm {
    /// The query last submitted through the form
    pub fn query(&self) -> &str {
        &self.query
    }

    pub(crate) fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    /// Renders the form as `#search-form`
    pub fn to_html(&self) -> Result<String, askama::Error> {
        SearchFormTemplate { query: &self.query }.render()
    }
}

/// A full widget page: search form, shows list and episode area
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// The search form
    pub form: SearchForm,
    /// Container receiving show cards
    pub shows: ShowsList,
    /// Container receiving the episode list
    pub episodes: EpisodesArea,
}

impl Page {
    /// Creates an empty page with a hidden episode area
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders the page as a complete HTML document
    pub fn to_html(&self) -> Result<String, askama::Error> {
        PageTemplate {
            form: self.form.to_html()?,
            shows: self.shows.to_html()?,
            episodes: self.episodes.to_html()?,
        }
        .render()
    }
}
