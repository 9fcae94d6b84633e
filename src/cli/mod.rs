//! Command-line helpers shared by the binary

pub mod interactive;
pub mod progress;

pub use interactive::run_interactive_mode;
pub use progress::{print_summary, ProgressObserver};
