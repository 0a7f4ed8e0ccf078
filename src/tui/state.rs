use std::collections::VecDeque;

use ratatui::widgets::ListState;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::api::query::COUNTRY_CODES;
use crate::app::AppMessage;
use crate::filter::filter_bands;
use crate::models::{BandRecord, BandStatus, FilterSelection};
use crate::render::results_label;
use crate::store::Generation;

use super::controller::AppController;

const LOG_CAPACITY: usize = 200;

pub const GENRE_OPTIONS: [&str; 11] = [
    "heavy metal",
    "thrash metal",
    "death metal",
    "black metal",
    "doom metal",
    "power metal",
    "progressive metal",
    "speed metal",
    "symphonic metal",
    "folk metal",
    "metalcore",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusArea {
    Search,
    Genre,
    Country,
    Status,
    Results,
    Logs,
}

impl FocusArea {
    pub fn next(self) -> Self {
        match self {
            FocusArea::Search => FocusArea::Genre,
            FocusArea::Genre => FocusArea::Country,
            FocusArea::Country => FocusArea::Status,
            FocusArea::Status => FocusArea::Results,
            FocusArea::Results => FocusArea::Logs,
            FocusArea::Logs => FocusArea::Search,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            FocusArea::Search => FocusArea::Logs,
            FocusArea::Genre => FocusArea::Search,
            FocusArea::Country => FocusArea::Genre,
            FocusArea::Status => FocusArea::Country,
            FocusArea::Results => FocusArea::Status,
            FocusArea::Logs => FocusArea::Results,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsView {
    Popular,
    Search(String),
}

/// One filter dropdown. Index 0 is "Any".
#[derive(Debug, Clone)]
pub struct FilterChoice {
    options: Vec<String>,
    selected: usize,
}

impl FilterChoice {
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            selected: 0,
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self.selected {
            0 => None,
            idx => self.options.get(idx - 1).map(String::as_str),
        }
    }

    pub fn label(&self) -> &str {
        self.value().unwrap_or("Any")
    }

    pub fn cycle(&mut self, delta: isize) {
        let len = self.options.len() as isize + 1;
        self.selected = (self.selected as isize + delta).rem_euclid(len) as usize;
    }

    pub fn reset(&mut self) {
        self.selected = 0;
    }
}

pub struct App {
    pub controller: AppController,
    pub msg_rx: UnboundedReceiver<AppMessage>,
    pub search_input: String,
    pub genre: FilterChoice,
    pub country: FilterChoice,
    pub status: FilterChoice,
    pub view: ResultsView,
    pub popular_query: FilterSelection,
    pub results: Vec<BandRecord>,
    pub result_state: ListState,
    pub notice: Option<String>,
    pub pending: Option<Generation>,
    pub logs: VecDeque<String>,
    pub focus: FocusArea,
    pub should_quit: bool,
}

impl App {
    pub fn new(controller: AppController, msg_rx: UnboundedReceiver<AppMessage>) -> Self {
        Self {
            controller,
            msg_rx,
            search_input: String::new(),
            genre: FilterChoice::new(GENRE_OPTIONS),
            country: FilterChoice::new(COUNTRY_CODES.iter().map(|(name, _)| *name)),
            status: FilterChoice::new(BandStatus::ALL.iter().map(|status| status.label())),
            view: ResultsView::Popular,
            popular_query: FilterSelection::default(),
            results: Vec::new(),
            result_state: ListState::default(),
            notice: None,
            pending: None,
            logs: VecDeque::with_capacity(LOG_CAPACITY),
            focus: FocusArea::Search,
            should_quit: false,
        }
    }

    pub fn bootstrap(&mut self) {
        self.load_popular();
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn filters(&self) -> FilterSelection {
        FilterSelection::new(self.genre.value(), self.country.value(), self.status.value())
    }

    pub fn submit_search(&mut self) {
        let term = self.search_input.trim().to_string();
        if let Some(generation) = self.controller.search_bands(&term) {
            self.view = ResultsView::Search(term);
            self.pending = Some(generation);
            self.notice = None;
        }
    }

    pub fn load_popular(&mut self) {
        self.view = ResultsView::Popular;
        self.popular_query = self.filters();
        self.pending = Some(self.controller.load_popular(self.popular_query.clone()));
        self.notice = None;
    }

    pub fn cycle_filter(&mut self, area: FocusArea, delta: isize) {
        match area {
            FocusArea::Genre => self.genre.cycle(delta),
            FocusArea::Country => self.country.cycle(delta),
            FocusArea::Status => self.status.cycle(delta),
            _ => return,
        }
        self.on_filters_changed();
    }

    pub fn clear_filters(&mut self) {
        self.genre.reset();
        self.country.reset();
        self.status.reset();
        self.on_filters_changed();
    }

    /// No search term means the filters drive a fresh popular query.
    fn on_filters_changed(&mut self) {
        if self.search_input.trim().is_empty() {
            self.load_popular();
        } else {
            self.refresh_results();
        }
    }

    pub fn handle_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::BandsLoaded {
                generation,
                count,
                enriched,
            } => {
                if self.controller.store().published() != Some(generation) {
                    return;
                }
                if self.pending == Some(generation) {
                    self.pending = None;
                }
                self.refresh_results();
                self.push_log(format!(
                    "{} loaded, {enriched} with Wikipedia details",
                    results_label(count)
                ));
            }
            AppMessage::SearchFailed { generation, reason } => {
                match generation {
                    None => self.notice = Some(reason.clone()),
                    Some(_) if generation == self.pending => {
                        self.pending = None;
                        self.notice = Some(reason.clone());
                    }
                    Some(_) => {}
                }
                self.push_log(reason);
            }
            AppMessage::Log(entry) => {
                self.push_log(entry);
            }
        }
    }

    pub fn refresh_results(&mut self) {
        let all = self.controller.store().current();
        let filters = match self.view {
            ResultsView::Popular => self.filters().beyond(&self.popular_query),
            ResultsView::Search(_) => self.filters(),
        };

        self.results = filter_bands(&all, &filters);
        self.notice = empty_state_notice(&self.view, all.len(), self.results.len());
        self.result_state.select(if self.results.is_empty() {
            None
        } else {
            Some(0)
        });
    }

    pub fn results_title(&self) -> String {
        let count = results_label(self.results.len());
        match &self.view {
            ResultsView::Popular => format!("Popular • {count}"),
            ResultsView::Search(term) => format!("Search Results for \"{term}\" • {count}"),
        }
    }

    pub fn next_focus(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn previous_focus(&mut self) {
        self.focus = self.focus.previous();
    }

    pub fn push_log<S: Into<String>>(&mut self, message: S) {
        if self.logs.len() == LOG_CAPACITY {
            self.logs.pop_front();
        }
        self.logs.push_back(message.into());
    }

    pub fn selected_band(&self) -> Option<&BandRecord> {
        self.result_state
            .selected()
            .and_then(|idx| self.results.get(idx))
    }

    pub fn move_result_selection(&mut self, delta: isize) {
        let len = self.results.len();
        update_list_state(&mut self.result_state, len, delta);
    }
}

fn empty_state_notice(view: &ResultsView, total: usize, shown: usize) -> Option<String> {
    if total == 0 {
        let text = match view {
            ResultsView::Popular => "No artists found for current filters.",
            ResultsView::Search(_) => "No artists found. Try another search term.",
        };
        Some(text.to_string())
    } else if shown == 0 {
        Some("No bands match your filters. Try adjusting your criteria.".to_string())
    } else {
        None
    }
}

fn update_list_state(state: &mut ListState, len: usize, delta: isize) {
    if len == 0 {
        state.select(None);
        return;
    }

    let current = state.selected().unwrap_or(0);
    let step = delta.unsigned_abs();
    let new_index = if delta < 0 {
        current.saturating_sub(step)
    } else {
        (current + step).min(len - 1)
    };
    state.select(Some(new_index));
}
