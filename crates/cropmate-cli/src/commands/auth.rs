//! Login, register, logout, whoami.

use crate::AppContext;
use colored::Colorize;
use cropmate_core::error::Result;

pub async fn login(ctx: &AppContext, email: &str, password: &str) -> Result<()> {
    let account = ctx.session.login(email, password).await?;
    println!(
        "Logged in as {} <{}>.",
        account.name.green().bold(),
        account.email
    );
    Ok(())
}

pub async fn register(ctx: &AppContext, name: &str, email: &str, password: &str) -> Result<()> {
    let account = ctx.session.register(name, email, password).await?;
    println!(
        "Welcome, {}! Your account is ready and you are logged in.",
        account.name.green().bold()
    );
    Ok(())
}

pub fn logout(ctx: &AppContext) -> Result<()> {
    ctx.session.logout()?;
    println!("Logged out.");
    Ok(())
}

pub async fn whoami(ctx: &AppContext) -> Result<()> {
    if !ctx.session.hub().is_authenticated() {
        println!("Not logged in.");
        return Ok(());
    }

    let account = ctx.client.profile().await?;
    println!("{} <{}>", account.name.bold(), account.email);
    if let Some(location) = &account.location {
        println!("Location: {location}");
    }
    Ok(())
}
