mod common;
mod config;
mod paging;
mod select;
