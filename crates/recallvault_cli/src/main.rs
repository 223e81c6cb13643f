//! RecallVault CLI
//!
//! Plain-text journal kept in per-project segment files.
//!
//! # Commands
//!
//! - `list` - Show the project tree
//! - `create` / `rename` / `edit-project` - Manage projects
//! - `config show` / `config set` - Inspect and change settings
//! - `write` - Compose a new entry
//! - `latest` / `show` / `segments` - Read entries back
//! - `edit` - Open the active segment in the editor
//! - `todos` - List todo items written in entries
//! - `template` - Manage entry templates

mod commands;

use clap::{Parser, Subcommand};
use commands::{Context, OutputFormat, ProjectArgs};
use recallvault_core::CONFIG_ENV;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// RecallVault: a plain-text journal.
#[derive(Parser)]
#[command(name = "recallvault")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(global = true, long, env = CONFIG_ENV)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all projects
    List,

    /// Create a project or sub-project
    Create {
        #[command(flatten)]
        project: ProjectArgs,
    },

    /// Rename a project or sub-project
    Rename {
        #[command(flatten)]
        project: ProjectArgs,

        /// New directory name
        new_name: String,
    },

    /// Open a project's configuration in the editor
    EditProject {
        #[command(flatten)]
        project: ProjectArgs,
    },

    /// Show or change the configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Write a new entry
    Write {
        #[command(flatten)]
        project: ProjectArgs,

        /// Entry text; opens the editor when omitted
        #[arg(short, long)]
        message: Option<String>,

        /// Template to pre-fill the editor with
        #[arg(short, long)]
        template: Option<String>,
    },

    /// Show the most recent entry
    Latest {
        #[command(flatten)]
        project: ProjectArgs,

        /// Output format (text, json)
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show entries of one segment or the whole log
    Show {
        #[command(flatten)]
        project: ProjectArgs,

        /// Segment to read (defaults to the active one)
        #[arg(short, long, conflicts_with = "all")]
        segment: Option<String>,

        /// Read every segment
        #[arg(short, long)]
        all: bool,

        /// Only entries carrying this keyword (`on` or `on:project-x`)
        #[arg(long)]
        tag: Option<String>,

        /// Output format (text, json)
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List a project's segment files
    Segments {
        #[command(flatten)]
        project: ProjectArgs,

        /// Output format (text, json)
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Open the active segment in the editor
    Edit {
        #[command(flatten)]
        project: ProjectArgs,
    },

    /// List todo items found in a project's entries
    Todos {
        #[command(flatten)]
        project: ProjectArgs,

        /// Only show items that are not done
        #[arg(long)]
        open: bool,

        /// Output format (text, json)
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Manage entry templates
    #[command(subcommand)]
    Template(TemplateCommand),

    /// Show version information
    Version,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print every setting
    Show {
        /// Output format (text, json)
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Change one setting
    Set {
        /// Setting name
        key: String,

        /// New value
        value: String,
    },
}

#[derive(Subcommand)]
enum TemplateCommand {
    /// Create a template
    Create {
        /// Template name
        name: String,

        /// Template text; opens the editor when omitted
        #[arg(short, long)]
        content: Option<String>,
    },

    /// Open a template in the editor
    Edit {
        /// Template name
        name: String,
    },

    /// Delete a template
    Delete {
        /// Template name
        name: String,
    },

    /// List templates
    List,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => recallvault_core::default_config_path()
            .ok_or("cannot determine the configuration directory; pass --config")?,
    };
    let ctx = Context::load(config_path)?;

    // Initialize logging
    let filter = if cli.verbose || ctx.config.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::List => commands::projects::list(&ctx)?,
        Commands::Create { project } => commands::projects::create(&ctx, &project)?,
        Commands::Rename { project, new_name } => {
            commands::projects::rename(&ctx, &project, &new_name)?;
        }
        Commands::EditProject { project } => commands::projects::edit(&ctx, &project)?,
        Commands::Config(ConfigCommand::Show { format }) => commands::config::show(&ctx, format)?,
        Commands::Config(ConfigCommand::Set { key, value }) => {
            commands::config::set(ctx, &key, &value)?;
        }
        Commands::Write {
            project,
            message,
            template,
        } => commands::write::run(&ctx, &project, message.as_deref(), template.as_deref())?,
        Commands::Latest { project, format } => commands::show::latest(&ctx, &project, format)?,
        Commands::Show {
            project,
            segment,
            all,
            tag,
            format,
        } => {
            let selection = if all {
                commands::show::Selection::All
            } else {
                commands::show::Selection::Segment(segment)
            };
            commands::show::run(&ctx, &project, selection, tag.as_deref(), format)?;
        }
        Commands::Segments { project, format } => {
            commands::show::segments(&ctx, &project, format)?;
        }
        Commands::Edit { project } => commands::write::edit_latest(&ctx, &project)?,
        Commands::Todos {
            project,
            open,
            format,
        } => commands::todos::run(&ctx, &project, open, format)?,
        Commands::Template(command) => match command {
            TemplateCommand::Create { name, content } => {
                commands::template::create(&ctx, &name, content.as_deref())?;
            }
            TemplateCommand::Edit { name } => commands::template::edit(&ctx, &name)?,
            TemplateCommand::Delete { name } => commands::template::delete(&ctx, &name)?,
            TemplateCommand::List => commands::template::list(&ctx)?,
        },
        Commands::Version => {
            println!("RecallVault CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("RecallVault Core v{}", recallvault_core::VERSION);
        }
    }

    Ok(())
}
