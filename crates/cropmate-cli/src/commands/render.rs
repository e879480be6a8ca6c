//! Terminal rendering for results and the error taxonomy.

use colored::Colorize;
use cropmate_core::CropmateError;
use cropmate_core::advisory::{ConfidenceBand, CropRecommendation, DiseaseDiagnosis};
use cropmate_core::history::HistoryEntry;

/// Renders one classified failure. Only field-annotated errors get special
/// treatment; everything else is the message inline.
pub fn error(err: &CropmateError) {
    match err {
        CropmateError::Unauthorized { message } => {
            eprintln!("{} {}", "error:".red().bold(), message);
            eprintln!("Session expired - please log in again with `cropmate login`.");
        }
        CropmateError::Validation { message, fields } => {
            eprintln!("{} {}", "error:".red().bold(), message);
            for (field, problem) in fields {
                eprintln!("  {}: {}", field.yellow(), problem);
            }
        }
        CropmateError::InvalidInput { field, message } => {
            eprintln!("{} {}: {}", "error:".red().bold(), field.yellow(), message);
        }
        CropmateError::Conflict { message }
        | CropmateError::Network { message }
        | CropmateError::Decode { message }
        | CropmateError::Storage { message }
        | CropmateError::Io { message } => {
            eprintln!("{} {}", "error:".red().bold(), message);
        }
        CropmateError::Server { status, message } => {
            eprintln!("{} {} (status {})", "error:".red().bold(), message, status);
        }
    }
}

fn confidence(value: f64) -> colored::ColoredString {
    let text = format!("{value:.1}%");
    match ConfidenceBand::from_percent(value) {
        ConfidenceBand::High => text.green(),
        ConfidenceBand::Moderate => text.yellow(),
        ConfidenceBand::Low => text.red(),
    }
}

pub fn recommendation(result: &CropRecommendation) {
    match result.recommended() {
        Some(top) => {
            println!(
                "{} {} ({})",
                "Recommended crop:".bold(),
                top.crop.green().bold(),
                confidence(top.confidence)
            );
            if result.suggestions().len() > 1 {
                println!("\nAlternatives:");
                for suggestion in &result.suggestions()[1..] {
                    println!("  {} ({})", suggestion.crop, confidence(suggestion.confidence));
                }
            }
        }
        None => println!("The service returned no suggestions for these readings."),
    }
}

pub fn diagnosis(result: &DiseaseDiagnosis) {
    println!(
        "{} {} ({})",
        "Diagnosis:".bold(),
        result.disease.bold(),
        confidence(result.confidence)
    );
}

pub fn history_entry(entry: &HistoryEntry) {
    let kind = format!("{:<7}", entry.kind.to_string().to_uppercase());
    println!(
        "  {} {} {}",
        entry.timestamp.format("%Y-%m-%d %H:%M").to_string().dimmed(),
        kind.cyan(),
        entry.result
    );
    if let Some(details) = &entry.input_details {
        println!("          {}", details.dimmed());
    }
}
