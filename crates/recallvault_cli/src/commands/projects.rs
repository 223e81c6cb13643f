//! Project commands.

use super::{editor, Context, ProjectArgs};
use recallvault_core::ProjectNode;
use tracing::info;

/// Prints the project tree.
pub fn list(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let vault = ctx.vault()?;
    let projects = vault.projects()?;
    if projects.is_empty() {
        println!("No projects in {}", vault.root().display());
        return Ok(());
    }
    println!("Projects:");
    print!("{}", render_tree(&projects));
    Ok(())
}

/// Creates a project or sub-project.
pub fn create(ctx: &Context, args: &ProjectArgs) -> Result<(), Box<dyn std::error::Error>> {
    let project = ctx.vault()?.create(&args.project, args.sub.as_deref())?;
    info!(project = project.name(), path = %project.path().display(), "created project");
    Ok(())
}

/// Renames a project or sub-project.
pub fn rename(
    ctx: &Context,
    args: &ProjectArgs,
    new_name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let project = ctx
        .vault()?
        .rename(&args.project, args.sub.as_deref(), new_name)?;
    info!(project = project.name(), "renamed project");
    Ok(())
}

/// Opens the project's `config.json` in the editor, writing defaults first.
pub fn edit(ctx: &Context, args: &ProjectArgs) -> Result<(), Box<dyn std::error::Error>> {
    let project = ctx.project(args)?;
    let editor = project.config()?.editor(&ctx.config).to_string();
    let path = project.ensure_config()?;
    editor::open(&editor, &path)
}

fn render_tree(nodes: &[ProjectNode]) -> String {
    let mut out = String::new();
    push_nodes(&mut out, nodes, "");
    out
}

fn push_nodes(out: &mut String, nodes: &[ProjectNode], prefix: &str) {
    for (i, node) in nodes.iter().enumerate() {
        let last = i + 1 == nodes.len();
        out.push_str(prefix);
        out.push_str(if last { "└── " } else { "├── " });
        out.push_str(&node.name);
        out.push('\n');
        let child_prefix = format!("{prefix}{}", if last { "    " } else { "│   " });
        push_nodes(out, &node.children, &child_prefix);
    }
}
