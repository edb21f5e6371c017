// Public API - what other modules can use
pub use entry::{clear_result, record_result, GoalEntry, ResultEntry, MAX_SCORE};
pub use errors::ResultError;

// Internal modules
mod entry;
mod errors;
