//! The recommendation form.

use crate::AppContext;
use crate::commands::render;
use clap::Args;
use cropmate_application::SubmissionFlow;
use cropmate_core::advisory::SoilReadings;
use cropmate_core::error::{CropmateError, Result};

#[derive(Args)]
pub struct RecommendArgs {
    /// Nitrogen content (kg/ha)
    #[arg(long, short = 'n')]
    pub nitrogen: Option<f64>,
    /// Phosphorus content (kg/ha)
    #[arg(long, short = 'p')]
    pub phosphorus: Option<f64>,
    /// Potassium content (kg/ha)
    #[arg(long, short = 'k')]
    pub potassium: Option<f64>,
    /// Temperature (°C)
    #[arg(long, short = 't')]
    pub temperature: Option<f64>,
    /// Relative humidity (%)
    #[arg(long)]
    pub humidity: Option<f64>,
    /// Soil pH (0-14)
    #[arg(long)]
    pub ph: Option<f64>,
    /// Annual rainfall (mm)
    #[arg(long, short = 'r')]
    pub rainfall: Option<f64>,
    /// Use the demo readings instead of entering values
    #[arg(long, conflicts_with_all = ["nitrogen", "phosphorus", "potassium", "temperature", "humidity", "ph", "rainfall"])]
    pub demo: bool,
}

impl RecommendArgs {
    fn into_readings(self) -> Result<SoilReadings> {
        if self.demo {
            return Ok(SoilReadings::demo());
        }

        let field = |name: &str, value: Option<f64>| {
            value.ok_or_else(|| CropmateError::invalid_input(name, "is required"))
        };

        Ok(SoilReadings {
            nitrogen: field("nitrogen", self.nitrogen)?,
            phosphorus: field("phosphorus", self.phosphorus)?,
            potassium: field("potassium", self.potassium)?,
            temperature: field("temperature", self.temperature)?,
            humidity: field("humidity", self.humidity)?,
            ph: field("ph", self.ph)?,
            rainfall: field("rainfall", self.rainfall)?,
        })
    }
}

pub async fn run(ctx: &AppContext, args: RecommendArgs) -> Result<()> {
    let readings = args.into_readings()?;
    // One form lifecycle per invocation.
    let mut flow = SubmissionFlow::new();
    let recommendation = flow.submit(ctx.client.recommend(&readings)).await?;
    render::recommendation(&recommendation);
    Ok(())
}
