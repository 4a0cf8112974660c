pub mod session;
pub mod state;
pub mod terminal;

pub use session::{run_confirmation, run_seats, FlowOutcome, SeatsOptions};
pub use state::AppState;
