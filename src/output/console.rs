//! Status lines printed by the CLI.

use console::{style, StyledObject};

/// Kind of status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Note,
    Ready,
    Attention,
    Failed,
}

impl Status {
    fn label(self) -> StyledObject<&'static str> {
        match self {
            Status::Note => style("note").cyan().bold(),
            Status::Ready => style("ready").green().bold(),
            Status::Attention => style("check").yellow().bold(),
            Status::Failed => style("failed").red().bold(),
        }
    }
}

fn status_line(status: Status, message: &str) -> String {
    format!("[{}] {}", status.label(), message)
}

/// Print a neutral note.
pub fn print_note(message: &str) {
    println!("{}", status_line(Status::Note, message));
}

/// Print that data or a result is ready.
pub fn print_ready(message: &str) {
    println!("{}", status_line(Status::Ready, message));
}

/// Print something the user should look at.
pub fn print_attention(message: &str) {
    println!("{}", status_line(Status::Attention, message));
}

/// Print a failure to stderr.
pub fn print_failure(message: &str) {
    eprintln!("{}", status_line(Status::Failed, message));
}

/// Print the data root and staging settings a command runs with.
pub fn print_settings(data_root: &str, stage_mode: &str, on_conflict: &str) {
    println!();
    println!("{}", style("Staging settings").bold().underlined());
    println!("  root        {}", data_root);
    println!("  mode        {}", stage_mode);
    println!("  on-conflict {}", on_conflict);
    println!();
}
