pub mod config;
pub mod core;
pub mod errors;
pub mod extensions;
pub mod fuzzy;
pub mod logging;
pub mod paging;
pub mod prompter;
pub mod selector;
pub mod ui;
pub mod watermark;
