//! Session watch: print transitions until interrupted.
//!
//! Useful for seeing two instances converge: run `cropmate session watch`
//! in one terminal and log in or out from another.

use crate::AppContext;
use colored::Colorize;
use cropmate_core::error::Result;
use cropmate_core::session::Session;

const WATCH_INTERVAL_SECS: u64 = 2;

fn describe(session: &Session) -> String {
    match session.user() {
        Some(user) => format!(
            "{} as {} <{}>",
            "authenticated".green(),
            user.name,
            user.email
        ),
        None if session.is_authenticated() => "authenticated".green().to_string(),
        None => "logged out".red().to_string(),
    }
}

pub async fn watch(ctx: &AppContext) -> Result<()> {
    let hub = ctx.session.hub();
    let mut rx = hub.subscribe();

    ctx.session.spawn_store_watcher(WATCH_INTERVAL_SECS);

    println!("session: {}", describe(&hub.snapshot()));
    println!("{}", "watching for changes, Ctrl-C to stop".dimmed());

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!("stopped.");
                return Ok(());
            }
            changed = rx.changed() => {
                if changed.is_err() {
                    return Ok(());
                }
                let session = rx.borrow_and_update().clone();
                println!("session: {}", describe(&session));
            }
        }
    }
}
