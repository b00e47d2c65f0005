//! Command implementations for the nerview CLI
//!
//! Each command has its own module with an argument struct and a `run`
//! function returning `Result<(), String>`.

pub mod check;
pub mod color;
pub mod config;
pub mod highlight;
pub mod summary;

// Re-export argument types for parser
pub use check::CheckArgs;
pub use color::ColorArgs;
pub use config::ConfigArgs;
pub use highlight::HighlightArgs;
pub use summary::SummaryArgs;
