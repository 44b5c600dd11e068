pub mod select_flow;
