use crate::errors::Result;
use crate::fuzzy::{Candidate, FuzzyMatcher, Labeled};
use crate::logging::{LogTarget, Logger};
use crate::prompter::models::{Flow, FlowCtrl};
use crate::selector::{Menu, Notice, Selector, SelectorState};
use crate::ui::ansi::{STYLE_DIM, STYLE_RESET};
use crate::ui::chrome::UiChrome;
use crate::ui::width_util::WidthUtil;

/// How a selection session ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectOutcome {
    Selected(Candidate),
    Cancelled,
}

/// Terminal shell around [`Selector`]: draws the current state and feeds it lines.
pub struct SelectFlow<'a, T> {
    selector: Selector<'a, T>,
    state: SelectorState,
    notice: Option<Notice>,
    noun: &'static str,
    chrome: UiChrome,
    width: WidthUtil,
    logger: Logger,
}

impl<'a, T: Labeled> SelectFlow<'a, T> {
    pub fn new(items: &'a [T], matcher: FuzzyMatcher, logger: &Logger) -> Self {
        Self {
            selector: Selector::new(items, matcher),
            state: SelectorState::AwaitingQuery,
            notice: None,
            noun: "item",
            chrome: UiChrome::new(),
            width: WidthUtil::default(),
            logger: logger.scoped("select"),
        }
    }

    /// Word used in prompts, e.g. "playlist".
    pub fn with_noun(mut self, noun: &'static str) -> Self {
        self.noun = noun;
        self
    }

    pub fn state(&self) -> &SelectorState {
        &self.state
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Anything short of an explicit pick counts as cancelled.
    pub fn outcome(&self) -> SelectOutcome {
        match &self.state {
            SelectorState::Selected(candidate) => SelectOutcome::Selected(candidate.clone()),
            _ => SelectOutcome::Cancelled,
        }
    }

    /// The selected item itself, looked up in the original slice.
    pub fn selected_item(&self) -> Option<&'a T> {
        match &self.state {
            SelectorState::Selected(candidate) => self.selector.items().get(candidate.index),
            _ => None,
        }
    }

    pub(crate) fn body_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(notice) = &self.notice {
            lines.push(String::new());
            lines.push(self.describe(notice));
        }
        if let SelectorState::ShowingResults { candidates, .. } = &self.state {
            let menu = Menu {
                count: candidates.len(),
            };
            lines.push(String::new());
            lines.push("Search results:".to_string());
            for (n, candidate) in candidates.iter().enumerate() {
                let label = self.width.fit_to_terminal(&candidate.label, 16);
                lines.push(format!(
                    "{}. {label} {STYLE_DIM}({:.2}%){STYLE_RESET}",
                    n + 1,
                    candidate.score
                ));
            }
            lines.push(String::new());
            lines.push(format!("{}. Search again", menu.search_again()));
            lines.push(format!("{}. Exit", menu.exit()));
        }
        lines
    }

    pub(crate) fn prompt_text(&self) -> String {
        match (&self.state, &self.notice) {
            (SelectorState::ShowingResults { .. }, _) => format!("Choose a {}: ", self.noun),
            (_, Some(Notice::NoResults { .. })) => "Search again: ".to_string(),
            _ => format!("Search for a {}: ", self.noun),
        }
    }

    fn describe(&self, notice: &Notice) -> String {
        match notice {
            Notice::EmptyQuery => "Please type something to search for.".to_string(),
            Notice::NoResults { query } => format!("No results found for '{query}'."),
            Notice::InvalidChoice { input, max } => {
                format!("Invalid choice '{input}'. Enter a number from 1 to {max}.")
            }
        }
    }

    fn log_transition(&self) {
        match (&self.state, &self.notice) {
            (SelectorState::ShowingResults { query, candidates }, None) => self.logger.info(
                format!("Search '{query}' matched {} item(s).", candidates.len()),
                LogTarget::FileOnly,
            ),
            (_, Some(Notice::NoResults { query })) => self.logger.info(
                format!("Search '{query}' matched nothing."),
                LogTarget::FileOnly,
            ),
            (SelectorState::Selected(candidate), _) => self.logger.info(
                format!("Selected '{}' (#{}).", candidate.label, candidate.index),
                LogTarget::FileOnly,
            ),
            (SelectorState::Cancelled, _) => {
                self.logger
                    .info("Selection cancelled.", LogTarget::FileOnly)
            }
            _ => {}
        }
    }
}

impl<'a, T: Labeled> Flow for SelectFlow<'a, T> {
    fn render(&mut self) -> Result<()> {
        self.chrome.print_lines(&self.body_lines());
        self.chrome.print_prompt(&self.prompt_text());
        Ok(())
    }

    fn handle_input(&mut self, input: &str) -> Result<FlowCtrl> {
        self.chrome.end_prompt();
        let state = std::mem::replace(&mut self.state, SelectorState::AwaitingQuery);
        let transition = self.selector.handle(state, input);
        self.state = transition.state;
        self.notice = transition.notice;
        self.log_transition();

        if self.state.is_terminal() {
            Ok(FlowCtrl::Finish)
        } else {
            Ok(FlowCtrl::Continue)
        }
    }

    fn interrupted(&mut self) {
        if !self.state.is_terminal() {
            self.state = SelectorState::Cancelled;
            self.notice = None;
            self.log_transition();
        }
    }
}
