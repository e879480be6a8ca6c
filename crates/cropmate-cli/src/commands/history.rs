//! The history page: recent by default, full on request, filterable by kind.

use crate::AppContext;
use crate::commands::render;
use clap::Args;
use colored::Colorize;
use cropmate_application::HistoryView;
use cropmate_core::error::Result;
use cropmate_core::history::HistoryKind;

#[derive(Args)]
pub struct HistoryArgs {
    /// Show the full history instead of the most recent entries
    #[arg(long)]
    pub all: bool,
    /// Only show entries of one kind (crop or disease)
    #[arg(long)]
    pub kind: Option<HistoryKind>,
}

pub async fn run(ctx: &AppContext, args: HistoryArgs) -> Result<()> {
    let entries = ctx.client.history().await?;
    let mut view = HistoryView::new(entries);
    if args.all {
        view.toggle_scope();
    }

    if view.is_empty() {
        println!("No history yet. Recommendations and detections made while logged in appear here.");
        return Ok(());
    }

    match args.kind {
        Some(kind) => {
            println!("{}", format!("{kind} history").bold());
            for entry in view.of_kind(kind) {
                render::history_entry(entry);
            }
        }
        None => {
            println!("{}", "History (newest first)".bold());
            for entry in view.visible() {
                render::history_entry(entry);
            }
            if !args.all && view.has_more() {
                println!("  {}", "... use --all to see the full history".dimmed());
            }
        }
    }

    Ok(())
}
