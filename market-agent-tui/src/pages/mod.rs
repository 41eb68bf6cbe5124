//! Per-page view state.
//!
//! Each page owns its state exclusively and is rebuilt from scratch on every
//! mount; nothing is shared or cached between pages.

pub mod dashboard;
pub mod instruments;
pub mod rules;
pub mod signals;

use market_agent_core::ApiError;

pub use dashboard::DashboardState;
pub use instruments::{FormField, InstrumentForm, InstrumentKind, InstrumentsState, Notice};
pub use rules::{RuleRow, RulesState};
pub use signals::SignalsState;

use crate::worker::ApiRequest;

/// Which page is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Instruments,
    Rules,
    Signals,
}

impl Page {
    pub const COUNT: usize = 4;

    pub fn index(self) -> usize {
        match self {
            Page::Dashboard => 0,
            Page::Instruments => 1,
            Page::Rules => 2,
            Page::Signals => 3,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Page::Dashboard),
            1 => Some(Page::Instruments),
            2 => Some(Page::Rules),
            3 => Some(Page::Signals),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Instruments => "Instruments",
            Page::Rules => "Rules",
            Page::Signals => "Signals",
        }
    }

    pub fn next(self) -> Page {
        Self::from_index((self.index() + 1) % Self::COUNT).unwrap_or(Page::Dashboard)
    }

    pub fn prev(self) -> Page {
        Self::from_index((self.index() + Self::COUNT - 1) % Self::COUNT).unwrap_or(Page::Dashboard)
    }
}

/// One fetch slot of a page.
#[derive(Debug, Clone, PartialEq)]
pub enum Remote<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Remote<T> {
    pub fn from_result(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(v) => Remote::Ready(v),
            Err(e) => Remote::Failed(e.to_string()),
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Remote::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Remote::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Remote::Loading)
    }
}

/// State of the mounted page.
#[derive(Debug, Clone)]
pub enum PageState {
    Dashboard(DashboardState),
    Instruments(InstrumentsState),
    Rules(RulesState),
    Signals(SignalsState),
}

impl PageState {
    /// Fresh state for `page` and the requests its mount issues.
    pub fn mount(page: Page) -> (Self, Vec<ApiRequest>) {
        match page {
            Page::Dashboard => (
                PageState::Dashboard(DashboardState::new()),
                DashboardState::mount_requests(),
            ),
            Page::Instruments => (
                PageState::Instruments(InstrumentsState::new()),
                vec![ApiRequest::Instruments],
            ),
            Page::Rules => (PageState::Rules(RulesState::new()), vec![ApiRequest::Rules]),
            Page::Signals => (
                PageState::Signals(SignalsState::new()),
                vec![ApiRequest::Signals],
            ),
        }
    }

    pub fn page(&self) -> Page {
        match self {
            PageState::Dashboard(_) => Page::Dashboard,
            PageState::Instruments(_) => Page::Instruments,
            PageState::Rules(_) => Page::Rules,
            PageState::Signals(_) => Page::Signals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_cycle() {
        assert_eq!(Page::Dashboard.next(), Page::Instruments);
        assert_eq!(Page::Signals.next(), Page::Dashboard);
        assert_eq!(Page::Dashboard.prev(), Page::Signals);
        assert_eq!(Page::Instruments.prev(), Page::Dashboard);
    }

    #[test]
    fn page_from_index() {
        for i in 0..Page::COUNT {
            assert_eq!(Page::from_index(i).unwrap().index(), i);
        }
        assert!(Page::from_index(Page::COUNT).is_none());
    }

    #[test]
    fn mount_requests_per_page() {
        let (state, reqs) = PageState::mount(Page::Dashboard);
        assert_eq!(state.page(), Page::Dashboard);
        assert_eq!(
            reqs,
            vec![ApiRequest::Health, ApiRequest::Rules, ApiRequest::Status, ApiRequest::Instruments]
        );
        assert_eq!(PageState::mount(Page::Signals).1, vec![ApiRequest::Signals]);
        assert_eq!(PageState::mount(Page::Rules).1, vec![ApiRequest::Rules]);
        assert_eq!(PageState::mount(Page::Instruments).1, vec![ApiRequest::Instruments]);
    }

    #[test]
    fn remote_from_error_keeps_message() {
        let r: Remote<u8> = Remote::from_result(Err(ApiError::Network("refused".into())));
        assert_eq!(r.error(), Some("network error: refused"));
        assert!(r.ready().is_none());
        assert!(!r.is_loading());
    }
}
