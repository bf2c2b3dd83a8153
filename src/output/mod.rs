//! Output module for console output and progress.
//!
//! Provides:
//! - Colored console output
//! - Progress bars
//! - Summary reporting

pub mod console;
pub mod progress;
pub mod stats;

pub use console::{print_attention, print_failure, print_note, print_ready, print_settings};
pub use progress::create_item_bar;
pub use stats::{print_data_summary, print_stage_report};
