//! Template commands.

use super::{editor, Context};
use recallvault_core::CoreError;
use tracing::info;

/// Creates a template from `content` or from the editor.
pub fn create(
    ctx: &Context,
    name: &str,
    content: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let templates = ctx.templates()?;
    if templates.exists(name)? {
        return Err(CoreError::TemplateExists {
            name: name.to_string(),
        }
        .into());
    }
    let text = match content {
        Some(content) => content.to_string(),
        None => editor::compose(&ctx.config.editor, "")?,
    };
    let path = templates.create(name, &text)?;
    info!(template = name, path = %path.display(), "created template");
    Ok(())
}

/// Opens an existing template in the editor.
pub fn edit(ctx: &Context, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let templates = ctx.templates()?;
    if !templates.exists(name)? {
        return Err(CoreError::TemplateNotFound {
            name: name.to_string(),
        }
        .into());
    }
    editor::open(&ctx.config.editor, &templates.path(name)?)
}

/// Deletes a template.
pub fn delete(ctx: &Context, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    ctx.templates()?.delete(name)?;
    info!(template = name, "deleted template");
    Ok(())
}

/// Lists template names.
pub fn list(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let templates = ctx.templates()?;
    let names = templates.list()?;
    if names.is_empty() {
        println!("No templates in {}", templates.dir().display());
    }
    for name in names {
        println!("{name}");
    }
    Ok(())
}
