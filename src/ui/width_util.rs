use terminal_size::{Width, terminal_size};

use crate::ui::ansi::ESC_BYTE;

#[derive(Debug, Default, Clone)]
pub struct WidthUtil;

impl WidthUtil {
    /// Drop CSI sequences (`ESC [ ... letter`) so only printable text is left.
    pub fn strip_ansi(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        let mut chars = s.chars().peekable();
        while let Some(ch) = chars.next() {
            if ch as u32 == ESC_BYTE as u32 && chars.peek() == Some(&'[') {
                chars.next();
                for c in chars.by_ref() {
                    if c.is_ascii_alphabetic() {
                        break;
                    }
                }
                continue;
            }
            out.push(ch);
        }
        out
    }

    pub fn visible_width(&self, s: &str) -> usize {
        Self::strip_ansi(s).chars().count()
    }

    /// Best-effort terminal width (defaults to 80).
    pub fn terminal_width(&self) -> usize {
        match terminal_size() {
            Some((Width(w), _)) => w as usize,
            None => 80,
        }
    }

    /// Cut plain text to `max` columns, marking the cut with `…`.
    pub fn fit(&self, s: &str, max: usize) -> String {
        if s.chars().count() <= max {
            return s.to_string();
        }
        if max == 0 {
            return String::new();
        }
        let mut out: String = s.chars().take(max - 1).collect();
        out.push('…');
        out
    }

    /// Like [`fit`](Self::fit), sized to the terminal minus `reserved` columns.
    pub fn fit_to_terminal(&self, s: &str, reserved: usize) -> String {
        let room = self.terminal_width().saturating_sub(reserved).max(10);
        self.fit(s, room)
    }
}
