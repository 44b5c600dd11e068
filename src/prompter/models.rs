use crate::errors::Result;

pub enum FlowCtrl {
    Continue,
    Finish,
}

/// A screen the prompter drives: draw, read one line, react.
pub trait Flow {
    fn render(&mut self) -> Result<()>;
    fn handle_input(&mut self, input: &str) -> Result<FlowCtrl>;
    /// Input ended (EOF or the global `exit`) before the flow finished.
    fn interrupted(&mut self) {}
}
