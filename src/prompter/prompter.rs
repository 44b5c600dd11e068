use crate::errors::Result;
use crate::prompter::models::{Flow, FlowCtrl};
use crate::ui::ansi::{
    CURSOR_BLINKING_BLOCK, CURSOR_HOME, ENTER_ALT_SCREEN, EXIT_ALT_SCREEN, HIDE_CURSOR, SHOW_CURSOR,
};
use std::io::{self, BufRead, Write};

/// Typed at any prompt, ends the session whatever the flow is doing.
pub const EXIT_WORD: &str = "exit";

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The flow returned [`FlowCtrl::Finish`].
    Finished,
    /// Input ran out or the user typed [`EXIT_WORD`].
    Interrupted,
}

enum Input {
    Line(String),
    Exit,
    Eof,
}

fn read_input<R: BufRead>(reader: &mut R) -> Result<Input> {
    let mut raw = String::new();
    if reader.read_line(&mut raw)? == 0 {
        return Ok(Input::Eof);
    }
    let line = raw.trim();
    if line.eq_ignore_ascii_case(EXIT_WORD) {
        Ok(Input::Exit)
    } else {
        Ok(Input::Line(line.to_string()))
    }
}

fn emit(seq: &str) {
    let mut out = io::stdout().lock();
    let _ = out.write_all(seq.as_bytes());
    let _ = out.flush();
}

/// Puts the terminal back however the session ends, panics included.
struct TerminalGuard {
    alt_screen: bool,
}

impl TerminalGuard {
    fn enter(alt_screen: bool) -> Self {
        if alt_screen {
            emit(&format!("{ENTER_ALT_SCREEN}{CURSOR_HOME}"));
        }
        Self { alt_screen }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        emit(SHOW_CURSOR);
        if self.alt_screen {
            emit(EXIT_ALT_SCREEN);
        }
    }
}

/// Blocking line-at-a-time driver for a [`Flow`].
#[derive(Debug, Default, Clone)]
pub struct Prompter {
    alt_screen: bool,
}

impl Prompter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the session on the alternate screen buffer.
    pub fn with_alt_screen(mut self) -> Self {
        self.alt_screen = true;
        self
    }

    pub fn run<F: Flow>(&self, flow: &mut F) -> Result<SessionEnd> {
        let stdin = io::stdin();
        self.run_with_reader(flow, stdin.lock())
    }

    /// The flow is borrowed so the caller can read its outcome afterwards.
    /// Lines reach the flow trimmed.
    pub fn run_with_reader<F: Flow, R: BufRead>(
        &self,
        flow: &mut F,
        mut reader: R,
    ) -> Result<SessionEnd> {
        let _terminal = TerminalGuard::enter(self.alt_screen);

        loop {
            emit(HIDE_CURSOR);
            flow.render()?;
            emit(&format!("{SHOW_CURSOR}{CURSOR_BLINKING_BLOCK}"));

            let line = match read_input(&mut reader)? {
                Input::Line(line) => line,
                Input::Exit | Input::Eof => {
                    flow.interrupted();
                    return Ok(SessionEnd::Interrupted);
                }
            };

            if let FlowCtrl::Finish = flow.handle_input(&line)? {
                return Ok(SessionEnd::Finished);
            }
        }
    }
}
