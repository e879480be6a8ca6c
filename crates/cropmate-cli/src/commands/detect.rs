//! The disease detection form.

use crate::AppContext;
use crate::commands::render;
use cropmate_application::SubmissionFlow;
use cropmate_core::advisory::ImageUpload;
use cropmate_core::error::{CropmateError, Result};
use std::path::Path;

pub async fn run(ctx: &AppContext, image_path: &Path) -> Result<()> {
    let file_name = image_path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| CropmateError::invalid_input("file", "path has no file name"))?
        .to_string();

    let bytes = tokio::fs::read(image_path)
        .await
        .map_err(|e| CropmateError::invalid_input("file", format!("cannot read image: {e}")))?;

    // The size cap is enforced again inside the client before dispatch.
    let mut flow = SubmissionFlow::new();
    let diagnosis = flow
        .submit(ctx.client.detect(ImageUpload::new(file_name, bytes)))
        .await?;
    render::diagnosis(&diagnosis);
    Ok(())
}
