//! The dashboard page: profile plus recent activity.

use crate::AppContext;
use crate::commands::render;
use colored::Colorize;
use cropmate_application::DashboardService;
use cropmate_core::error::Result;

pub async fn run(ctx: &AppContext) -> Result<()> {
    let dashboard = DashboardService::new(ctx.client.clone());
    let data = dashboard.load().await?;

    println!(
        "{} {} <{}>",
        format!("[{}]", data.profile.initial()).green().bold(),
        data.profile.name.bold(),
        data.profile.email
    );
    if let Some(location) = &data.profile.location {
        println!("Location: {location}");
    }

    println!("\n{}", "Recent activity".bold());
    if data.history.is_empty() {
        println!("  No activity yet.");
        return Ok(());
    }
    for entry in data.history.visible() {
        render::history_entry(entry);
    }
    if data.history.has_more() {
        println!("  {}", "... see `cropmate history --all` for everything".dimmed());
    }

    Ok(())
}
