use std::fmt::Display;
use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use schema_bridge_core::types::Identifier;

use crate::output::OutputContext;

/// Spinner on stderr while tables are checked against a warehouse.
///
/// Inert when the output context hides progress, so callers never branch on it.
pub struct ApplyProgress {
    bar: Option<ProgressBar>,
}

impl ApplyProgress {
    pub fn start(output: &OutputContext, root: &Path, dry_run: bool) -> Self {
        let verb = if dry_run { "Planning against" } else { "Applying to" };
        let bar = output
            .show_progress()
            .then(|| spinner(format!("{verb} {}...", root.display())));
        Self { bar }
    }

    /// Names the table currently being merged.
    pub fn table(&self, name: &Identifier) {
        if let Some(bar) = &self.bar {
            bar.set_message(format!("merging {name}"));
        }
    }

    pub fn finish(&self, tables: usize) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message(format!("{tables} tables checked"));
        }
    }

    pub fn fail(&self, err: &impl Display) {
        if let Some(bar) = &self.bar {
            bar.abandon_with_message(format!("failed: {err}"));
        }
    }
}

fn spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    bar.set_style(style);
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}
