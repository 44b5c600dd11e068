// VT100 control sequences for the selector screen.

pub const ESC_BYTE: u8 = 0x1B;

#[macro_export]
macro_rules! csi {
    ($($part:literal),+) => {
        concat!($("\x1B[", $part),+)
    };
}

// ---- Screen & cursor --------------------------------------------------------

/// Alternate screen buffer on (smcup) / off (rmcup).
pub const ENTER_ALT_SCREEN: &str = csi!("?1049h");
pub const EXIT_ALT_SCREEN: &str = csi!("?1049l");
pub const CURSOR_HOME: &str = csi!("H");
pub const CURSOR_UP_ONE: &str = csi!("1A");
pub const CLEAR_LINE_REST: &str = csi!("0K");
pub const HIDE_CURSOR: &str = csi!("?25l");
pub const SHOW_CURSOR: &str = csi!("?25h");
/// Ignored by terminals without cursor-shape support.
pub const CURSOR_BLINKING_BLOCK: &str = csi!("1 q");

// ---- Styles -----------------------------------------------------------------

pub const STYLE_RESET: &str = csi!("0m");
pub const STYLE_BOLD: &str = csi!("1m");
pub const STYLE_DIM: &str = csi!("2m");
pub const STYLE_ITALIC: &str = csi!("3m");
pub const FG_LIGHT_GRAY: &str = csi!("37m");
/// White on dark gray, for the input line.
pub const PROMPT_STYLE: &str = csi!("38;5;15m", "48;5;236m");
