pub mod ansi;
pub mod chrome;
pub mod width_util;
