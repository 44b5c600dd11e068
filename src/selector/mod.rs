//! Interactive pick-one-by-name, as a pure state machine.
//!
//! `AwaitingQuery → ShowingResults → {AwaitingQuery | Selected | Cancelled}`.
//! Nothing here reads or prints; the prompter flow does that around [`Selector::handle`].


use crate::extensions::string::ToMatchKey;
use crate::fuzzy::{Candidate, FuzzyMatcher, Labeled};

#[derive(Debug, Clone, PartialEq)]
pub enum SelectorState {
    AwaitingQuery,
    ShowingResults {
        query: String,
        candidates: Vec<Candidate>,
    },
    Selected(Candidate),
    Cancelled,
}

impl SelectorState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SelectorState::Selected(_) | SelectorState::Cancelled)
    }
}

/// One line of user input, read against the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorEvent {
    Query(String),
    Choose(usize),
    SearchAgain,
    Exit,
    Invalid(String),
}

/// User-visible, recoverable conditions. None of them changes the item set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    EmptyQuery,
    NoResults { query: String },
    InvalidChoice { input: String, max: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: SelectorState,
    pub notice: Option<Notice>,
}

impl Transition {
    fn to(state: SelectorState) -> Self {
        Self {
            state,
            notice: None,
        }
    }

    fn stay(state: SelectorState, notice: Notice) -> Self {
        Self {
            state,
            notice: Some(notice),
        }
    }
}

/// Menu numbering for a result list of `count` entries: picks are `1..=count`,
/// then "search again", then "exit".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Menu {
    pub count: usize,
}

impl Menu {
    pub fn search_again(&self) -> usize {
        self.count + 1
    }

    pub fn exit(&self) -> usize {
        self.count + 2
    }
}

pub struct Selector<'a, T> {
    items: &'a [T],
    matcher: FuzzyMatcher,
}

impl<'a, T: Labeled> Selector<'a, T> {
    pub fn new(items: &'a [T], matcher: FuzzyMatcher) -> Self {
        Self { items, matcher }
    }

    pub fn items(&self) -> &'a [T] {
        self.items
    }

    pub fn interpret(&self, state: &SelectorState, line: &str) -> SelectorEvent {
        let line = line.trim();
        match state {
            SelectorState::AwaitingQuery => SelectorEvent::Query(line.to_string()),
            SelectorState::ShowingResults { candidates, .. } => {
                if line.eq_ignore_ascii_case("exit") {
                    return SelectorEvent::Exit;
                }
                let menu = Menu {
                    count: candidates.len(),
                };
                match line.parse::<usize>() {
                    Ok(n) if (1..=menu.count).contains(&n) => SelectorEvent::Choose(n),
                    Ok(n) if n == menu.search_again() => SelectorEvent::SearchAgain,
                    Ok(n) if n == menu.exit() => SelectorEvent::Exit,
                    _ => SelectorEvent::Invalid(line.to_string()),
                }
            }
            SelectorState::Selected(_) | SelectorState::Cancelled => {
                SelectorEvent::Invalid(line.to_string())
            }
        }
    }

    /// The decision function. Terminal states absorb every event.
    pub fn step(&self, state: SelectorState, event: SelectorEvent) -> Transition {
        if state.is_terminal() {
            return Transition::to(state);
        }

        match (state, event) {
            (_, SelectorEvent::Exit) => Transition::to(SelectorState::Cancelled),

            (SelectorState::AwaitingQuery, SelectorEvent::Query(query)) => self.search(query),

            (SelectorState::ShowingResults { mut candidates, .. }, SelectorEvent::Choose(n))
                if (1..=candidates.len()).contains(&n) =>
            {
                Transition::to(SelectorState::Selected(candidates.swap_remove(n - 1)))
            }

            (SelectorState::ShowingResults { .. }, SelectorEvent::SearchAgain) => {
                Transition::to(SelectorState::AwaitingQuery)
            }

            (SelectorState::ShowingResults { query, candidates }, SelectorEvent::Invalid(input)) => {
                let max = Menu {
                    count: candidates.len(),
                }
                .exit();
                Transition::stay(
                    SelectorState::ShowingResults { query, candidates },
                    Notice::InvalidChoice { input, max },
                )
            }

            // Events that make no sense in the current state leave it untouched.
            (state, _) => Transition::to(state),
        }
    }

    pub fn handle(&self, state: SelectorState, line: &str) -> Transition {
        let event = self.interpret(&state, line);
        self.step(state, event)
    }

    fn search(&self, query: String) -> Transition {
        // Nothing left to match once punctuation is stripped.
        if query.to_match_key().is_empty() {
            return Transition::stay(SelectorState::AwaitingQuery, Notice::EmptyQuery);
        }
        let candidates = self.matcher.rank(self.items, &query);
        if candidates.is_empty() {
            return Transition::stay(SelectorState::AwaitingQuery, Notice::NoResults { query });
        }
        Transition::to(SelectorState::ShowingResults { query, candidates })
    }
}
