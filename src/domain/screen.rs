// Screen models: pure state for the list and detail views
use super::{
    filter_summaries, EntityConfig, EntityKind, ResourceDetail, ResourceSummary, UNKNOWN_VALUE,
};
use crate::error::Result;
use tracing::{error, warn};

/// Lifecycle of a screen's single fetch.
///
/// Moves forward only: `Loading` resolves once into `Loaded` or `Empty`
/// and stays there until the screen is remounted.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenState<T> {
    Loading,
    Loaded(T),
    Empty,
}

impl<T> ScreenState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ScreenState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ScreenState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    /// Applies a fetch result; failures collapse into `Empty`.
    ///
    /// Returns `false` (and changes nothing) if the state already resolved.
    pub fn resolve(&mut self, outcome: Result<T>) -> bool {
        if !self.is_loading() {
            return false;
        }
        *self = match outcome {
            Ok(data) => ScreenState::Loaded(data),
            Err(_) => ScreenState::Empty,
        };
        true
    }
}

/// A user's choice of a row, decoupled from the gesture that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Position in the filtered sequence
    pub index: usize,
    pub url: String,
}

/// State of one mounted list screen
#[derive(Debug)]
pub struct ListScreen {
    kind: EntityKind,
    state: ScreenState<Vec<ResourceSummary>>,
    query: String,
    highlighted: usize,
}

impl ListScreen {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            state: ScreenState::Loading,
            query: String::new(),
            highlighted: 0,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn config(&self) -> &'static EntityConfig {
        self.kind.config()
    }

    pub fn state(&self) -> &ScreenState<Vec<ResourceSummary>> {
        &self.state
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// Stores the collection fetch result
    pub fn apply_collection(&mut self, outcome: Result<Vec<ResourceSummary>>) {
        if let Err(e) = &outcome {
            error!(entity = ?self.kind, error = %e, "Error fetching collection");
        }
        if !self.state.resolve(outcome) {
            warn!(entity = ?self.kind, "Ignoring collection result for an already resolved screen");
        }
        self.clamp_highlight();
    }

    /// Rows currently visible under the search query
    pub fn visible(&self) -> Vec<&ResourceSummary> {
        match &self.state {
            ScreenState::Loaded(items) => filter_summaries(items, self.config(), &self.query),
            _ => Vec::new(),
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.clamp_highlight();
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.clamp_highlight();
    }

    pub fn pop_char(&mut self) {
        self.query.pop();
        self.clamp_highlight();
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
        self.clamp_highlight();
    }

    pub fn move_down(&mut self) {
        let len = self.visible().len();
        if self.highlighted + 1 < len {
            self.highlighted += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.highlighted = self.highlighted.saturating_sub(1);
    }

    /// Selects row `index` of the filtered sequence.
    ///
    /// Returns `None` for out-of-range rows and rows without a `url`.
    pub fn select(&self, index: usize) -> Option<Selection> {
        let visible = self.visible();
        let summary = visible.get(index)?;
        match summary.url() {
            Some(url) => Some(Selection {
                index,
                url: url.to_string(),
            }),
            None => {
                warn!(entity = ?self.kind, index, "Selected row has no url");
                None
            }
        }
    }

    pub fn select_highlighted(&self) -> Option<Selection> {
        self.select(self.highlighted)
    }

    fn clamp_highlight(&mut self) {
        let len = self.visible().len();
        if self.highlighted >= len {
            self.highlighted = len.saturating_sub(1);
        }
    }
}

/// A labeled reference list as it should be displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSection {
    pub label: &'static str,
    pub items: Vec<String>,
    pub placeholder: &'static str,
}

impl ReferenceSection {
    /// The entries, or the placeholder alone when there are none
    pub fn lines(&self) -> Vec<String> {
        if self.items.is_empty() {
            vec![self.placeholder.to_string()]
        } else {
            self.items.clone()
        }
    }
}

/// Display model of a populated detail screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPage {
    pub title: String,
    pub fields: Vec<(&'static str, String)>,
    pub text_sections: Vec<(&'static str, String)>,
    pub references: Vec<ReferenceSection>,
}

impl DetailPage {
    pub fn build(config: &EntityConfig, detail: &ResourceDetail) -> Self {
        let title = match detail.get(config.primary_field) {
            Some(v) if !v.is_null() => detail.display(config.primary_field),
            _ => UNKNOWN_VALUE.to_string(),
        };
        Self {
            title,
            fields: config
                .detail_fields
                .iter()
                .map(|f| (f.label, detail.display(f.key)))
                .collect(),
            text_sections: config
                .text_sections
                .iter()
                .map(|f| (f.label, detail.display(f.key)))
                .collect(),
            references: config
                .reference_lists
                .iter()
                .map(|r| ReferenceSection {
                    label: r.label,
                    items: detail.references(r.key),
                    placeholder: r.placeholder,
                })
                .collect(),
        }
    }
}

/// State of one mounted detail screen
#[derive(Debug)]
pub struct DetailScreen {
    kind: EntityKind,
    url: String,
    state: ScreenState<ResourceDetail>,
    scroll: u16,
}

impl DetailScreen {
    pub fn new(kind: EntityKind, url: impl Into<String>) -> Self {
        Self {
            kind,
            url: url.into(),
            state: ScreenState::Loading,
            scroll: 0,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn config(&self) -> &'static EntityConfig {
        self.kind.config()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn state(&self) -> &ScreenState<ResourceDetail> {
        &self.state
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Stores the detail fetch result
    pub fn apply_detail(&mut self, outcome: Result<ResourceDetail>) {
        if let Err(e) = &outcome {
            error!(entity = ?self.kind, url = %self.url, error = %e, "Error fetching detail");
        }
        if !self.state.resolve(outcome) {
            warn!(url = %self.url, "Ignoring detail result for an already resolved screen");
        }
    }

    /// Display model, available only once the fetch has populated the screen
    pub fn page(&self) -> Option<DetailPage> {
        self.state
            .data()
            .map(|detail| DetailPage::build(self.config(), detail))
    }

    /// Moves the scroll offset, keeping the last of `line_count` lines on screen
    pub fn scroll_by(&mut self, delta: i32, line_count: usize) {
        let max = line_count.saturating_sub(1).min(u16::MAX as usize) as i32;
        self.scroll = (self.scroll as i32 + delta).clamp(0, max) as u16;
    }
}
