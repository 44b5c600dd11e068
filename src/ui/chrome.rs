use crate::ui::ansi::{
    CLEAR_LINE_REST, CURSOR_UP_ONE, FG_LIGHT_GRAY, PROMPT_STYLE, STYLE_BOLD, STYLE_ITALIC,
    STYLE_RESET,
};
use crate::ui::width_util::WidthUtil;
use std::io::{self, Write};

const BANNER_WIDTH: usize = 44;

/// Banner and prompt drawing shared by the flows.
#[derive(Debug, Default, Clone)]
pub struct UiChrome {
    util: WidthUtil,
}

impl UiChrome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn banner_lines(&self) -> Vec<String> {
        let version = env!("CARGO_PKG_VERSION");
        let title =
            format!("{STYLE_BOLD}P A G E P I C K{STYLE_RESET} {FG_LIGHT_GRAY}(v{version}){STYLE_RESET}");
        let subtitle = format!("{STYLE_ITALIC}Find it by name{STYLE_RESET}");
        vec![
            format!("╭{}╮", "─".repeat(BANNER_WIDTH)),
            format!("│{}│", self.center_in_box(&title, BANNER_WIDTH)),
            format!("│{}│", self.center_in_box(&subtitle, BANNER_WIDTH)),
            format!("╰{}╯", "─".repeat(BANNER_WIDTH)),
        ]
    }

    pub fn print_banner(&self) {
        for line in self.banner_lines() {
            println!("{line}");
        }
    }

    pub fn print_lines(&self, lines: &[String]) {
        let mut out = io::stdout().lock();
        for line in lines {
            let _ = writeln!(out, "{line}");
        }
        let _ = out.flush();
    }

    /// Styled input line; leaves the cursor right after `prompt`.
    pub fn print_prompt(&self, prompt: &str) {
        println!("{PROMPT_STYLE}{CLEAR_LINE_REST}{STYLE_RESET}");
        println!("{PROMPT_STYLE}{prompt}{CLEAR_LINE_REST}{STYLE_RESET}");
        print!("{PROMPT_STYLE}{CLEAR_LINE_REST}{STYLE_RESET}");
        let column = self.util.visible_width(prompt) + 1;
        print!("{CURSOR_UP_ONE}\x1B[{column}G{PROMPT_STYLE}");
        let _ = io::stdout().flush();
    }

    /// Closes the styled prompt block after the user hits enter.
    pub fn end_prompt(&self) {
        println!("{STYLE_RESET}");
        let _ = io::stdout().flush();
    }

    fn center_in_box(&self, content: &str, width: usize) -> String {
        let content_width = self.util.visible_width(content);
        if content_width >= width {
            return content.to_string();
        }
        let left = (width - content_width) / 2;
        let right = width - content_width - left;
        format!("{}{}{}", " ".repeat(left), content, " ".repeat(right))
    }
}
