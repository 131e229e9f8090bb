//! Interaction hooks the quiver needs from the interface layer

use super::{Action, Target};

/// Answer to an inventory prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptResult {
    Slot(usize),
    /// The "-" answer: nothing
    Special,
    Aborted,
}

/// Inventory prompts and targeting
pub trait Prompt {
    /// Ask for an inventory slot
    fn prompt_invent_item(&mut self, question: &str) -> PromptResult;

    /// Ask where to aim `action`; `None` when the player backs out
    fn choose_target(&mut self, action: &Action) -> Option<Target>;
}
