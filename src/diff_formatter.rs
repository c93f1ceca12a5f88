use crate::file_processor::{FileDiff, LineChange};
use colored::*;
use std::io::IsTerminal;

pub struct DiffFormatter;

impl DiffFormatter {
    /// Auto-detect if we should use colors
    pub fn should_use_color() -> bool {
        // Check NO_COLOR env var (https://no-color.org/)
        if std::env::var_os("NO_COLOR").is_some() {
            return false;
        }

        std::io::stdout().is_terminal()
    }

    /// Format the replaced lines of a file, old line then new line
    pub fn format_diff(diff: &FileDiff, use_color: bool) -> String {
        let mut output = String::new();

        if use_color {
            output.push_str(&format!("{}\n", diff.file_path.bold().cyan()));
        } else {
            output.push_str(&format!("{}\n", diff.file_path));
        }

        if !diff.has_changes() {
            output.push_str("No changes would be made.\n");
            return output;
        }

        for change in &diff.changes {
            output.push_str(&Self::format_change(change, use_color));
        }

        let total = diff.changes.len();
        let noun = if total == 1 { "change" } else { "changes" };
        if use_color {
            output.push_str(&format!("\nTotal: {} {}\n", total.to_string().bold().white(), noun));
        } else {
            output.push_str(&format!("\nTotal: {} {}\n", total, noun));
        }

        output
    }

    fn format_change(change: &LineChange, use_color: bool) -> String {
        // Lock files are UTF-8 in practice; anything else is shown lossily
        let old = String::from_utf8_lossy(&change.old_content);
        let new = String::from_utf8_lossy(&change.new_content);
        let line = change.line_number;

        if use_color {
            format!(
                "L{}: {} {}\nL{}: {} {}\n",
                line, "-".red().bold(), old.red(),
                line, "+".green().bold(), new.green().bold()
            )
        } else {
            format!("L{}: - {}\nL{}: + {}\n", line, old, line, new)
        }
    }

    /// Format dry run header
    pub fn format_dry_run_header(use_color: bool) -> String {
        if use_color {
            format!("{}\n\n", "Dry run: mix.lock will not be modified".bold().cyan())
        } else {
            "Dry run: mix.lock will not be modified\n\n".to_string()
        }
    }
}
