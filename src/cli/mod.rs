pub mod interaction;
pub mod output;
pub mod shell;
pub mod wizard;

pub use interaction::{
    ConfirmationResponse, PromptResponse, ReservationInteraction, ScriptedInteraction,
    TerminalInteraction,
};
pub use shell::run_cli;
pub use wizard::{FormResult, ReservationWizard};
