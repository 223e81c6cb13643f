//! Configuration commands.

use super::{Context, OutputFormat};
use serde_json::json;
use tracing::info;

/// Prints every setting.
pub fn show(ctx: &Context, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => {
            let value = json!({
                "file": ctx.config_path.display().to_string(),
                "config": &ctx.config,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => {
            println!("Configuration ({})", ctx.config_path.display());
            for (key, value) in ctx.config.entries() {
                println!("  {key:<14} {value}");
            }
        }
    }
    Ok(())
}

/// Changes one setting and saves the file.
pub fn set(mut ctx: Context, key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
    ctx.config.set(key, value)?;
    ctx.config.save(&ctx.config_path)?;
    info!(key, value, file = %ctx.config_path.display(), "configuration updated");
    Ok(())
}
