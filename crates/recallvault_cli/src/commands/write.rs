//! Writing entries.

use super::{editor, CliError, Context, ProjectArgs};
use recallvault_core::{CoreError, Entry, EntryBatch, TemplateStore};
use tracing::{info, warn};

/// Writes one entry, from `message` or from the editor.
///
/// Without an explicit `template` the project's `default_template` is used
/// when it exists. Empty text aborts without touching the log.
pub fn run(
    ctx: &Context,
    args: &ProjectArgs,
    message: Option<&str>,
    template: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (project, mut log) = ctx.log(args)?;
    let project_config = project.config()?;

    let body = match message {
        Some(message) => editor::finish(message),
        None => {
            let templates = ctx.templates()?;
            let initial = match template {
                Some(name) => templates.read(name)?,
                None => default_template(&templates, project_config.default_template.as_deref())?,
            };
            editor::compose(project_config.editor(&ctx.config), &initial)?
        }
    };

    if body.is_empty() {
        info!(project = project.name(), "empty entry, nothing written");
        return Ok(());
    }

    let outcome = log.append(&EntryBatch::from(vec![Entry::now(body)]))?;
    info!(
        project = project.name(),
        segment = %outcome.segment,
        rotated = outcome.rotated,
        "entry written"
    );
    Ok(())
}

/// Opens the project's active segment in the editor.
pub fn edit_latest(ctx: &Context, args: &ProjectArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (project, mut log) = ctx.log(args)?;
    let segment = log.latest_segment()?.ok_or_else(|| CliError::EmptyProject {
        name: project.name().to_string(),
    })?;
    let path = log
        .segment_path(&segment)
        .ok_or_else(|| CliError::NoSegmentPath {
            segment: segment.clone(),
        })?;
    let project_config = project.config()?;
    editor::open(project_config.editor(&ctx.config), &path)
}

fn default_template(
    templates: &TemplateStore,
    name: Option<&str>,
) -> Result<String, Box<dyn std::error::Error>> {
    let Some(name) = name else {
        return Ok(String::new());
    };
    match templates.read(name) {
        Ok(content) => Ok(content),
        Err(CoreError::TemplateNotFound { .. }) => {
            warn!(template = name, "default template not found, starting empty");
            Ok(String::new())
        }
        Err(e) => Err(e.into()),
    }
}
