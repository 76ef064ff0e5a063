//! Dashboard state: the current result, loading status and active tab.
//!
//! Refreshes are single-flight. [`Dashboard::begin_refresh`] hands out a
//! [`RefreshTicket`] tagged with a generation number and refuses to start a
//! second fetch while one is outstanding; [`Dashboard::complete`] discards
//! results whose ticket is not the current generation.

use crate::agent::{AgentError, NewsProvider};
use crate::category::Category;
use crate::news::{GroundingSource, NewsResponse};
use crate::sections::Sections;
use chrono::{DateTime, Local};

/// Message shown to the user for any fetch failure
pub const FETCH_FAILED_MESSAGE: &str = "Falha na sincronização. Tente atualizar manualmente.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Nothing fetched yet
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// Proof that a refresh was started; must be handed back on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket {
    generation: u64,
}

impl RefreshTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What the main pane should show for the active tab.
#[derive(Debug, PartialEq, Eq)]
pub enum View<'a> {
    /// No fetch has been started yet
    Idle,
    Loading,
    Failed(&'a str),
    /// Loaded, but the active category has no lines
    Empty,
    Lines(&'a [String]),
}

#[derive(Debug)]
pub struct Dashboard {
    status: Status,
    news: Option<NewsResponse>,
    sections: Sections,
    active: Category,
    last_update: Option<DateTime<Local>>,
    generation: u64,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    /// Tab shown when the dashboard opens
    pub const INITIAL_TAB: Category = Category::Piso;

    /// A fresh dashboard, idle until the first refresh is started.
    pub fn new() -> Self {
        Self {
            status: Status::Idle,
            news: None,
            sections: Sections::default(),
            active: Self::INITIAL_TAB,
            last_update: None,
            generation: 0,
        }
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == Status::Loading
    }

    /// Start a refresh, or `None` if one is already in flight.
    pub fn begin_refresh(&mut self) -> Option<RefreshTicket> {
        if self.is_loading() {
            tracing::debug!(generation = self.generation, "refresh already in flight");
            return None;
        }
        self.generation += 1;
        self.status = Status::Loading;
        tracing::debug!(generation = self.generation, "refresh started");
        Some(RefreshTicket {
            generation: self.generation,
        })
    }

    /// Apply a fetch outcome. Returns `false` if the ticket was stale.
    pub fn complete(
        &mut self,
        ticket: RefreshTicket,
        outcome: Result<NewsResponse, AgentError>,
    ) -> bool {
        if ticket.generation != self.generation || !self.is_loading() {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding superseded result"
            );
            return false;
        }

        match outcome {
            Ok(news) => {
                self.sections = news.sections();
                self.news = Some(news);
                self.last_update = Some(Local::now());
                self.status = Status::Ready;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch news");
                self.status = Status::Failed(FETCH_FAILED_MESSAGE.to_string());
            }
        }
        true
    }

    /// Run one refresh against `provider`, if none is in flight.
    pub async fn refresh(&mut self, provider: &dyn NewsProvider) -> bool {
        let Some(ticket) = self.begin_refresh() else {
            return false;
        };
        tracing::debug!(provider = provider.name(), "fetching");
        let outcome = provider.fetch_news().await;
        self.complete(ticket, outcome)
    }

    pub fn view(&self) -> View<'_> {
        match &self.status {
            Status::Idle => View::Idle,
            Status::Loading => View::Loading,
            Status::Failed(message) => View::Failed(message),
            Status::Ready => {
                let lines = self.sections.get(self.active);
                if lines.is_empty() {
                    View::Empty
                } else {
                    View::Lines(lines)
                }
            }
        }
    }

    pub fn active(&self) -> Category {
        self.active
    }

    pub fn select(&mut self, category: Category) {
        self.active = category;
    }

    /// Select the tab at `index` in [`Category::TABS`], if it exists.
    pub fn select_index(&mut self, index: usize) {
        if let Some(category) = Category::TABS.get(index) {
            self.active = *category;
        }
    }

    /// Index of the active tab, or `None` for the untabbed default category.
    pub fn active_index(&self) -> Option<usize> {
        Category::TABS.iter().position(|c| *c == self.active)
    }

    pub fn next_tab(&mut self) {
        let next = self.active_index().map_or(0, |i| (i + 1) % Category::TABS.len());
        self.active = Category::TABS[next];
    }

    pub fn previous_tab(&mut self) {
        let len = Category::TABS.len();
        let prev = self.active_index().map_or(len - 1, |i| (i + len - 1) % len);
        self.active = Category::TABS[prev];
    }

    pub fn sections(&self) -> &Sections {
        &self.sections
    }

    pub fn sources(&self) -> &[GroundingSource] {
        self.news
            .as_ref()
            .map(|n| n.sources.as_slice())
            .unwrap_or_default()
    }

    /// Local time of the last successful update, as `HH:MM`.
    pub fn last_update(&self) -> Option<String> {
        self.last_update.map(|t| t.format("%H:%M").to_string())
    }
}
