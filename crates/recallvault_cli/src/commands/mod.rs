//! CLI command implementations.

pub mod config;
pub mod editor;
pub mod projects;
pub mod show;
pub mod template;
pub mod todos;
pub mod write;

use clap::{Args, ValueEnum};
use recallvault_core::{Config, ProjectRef, SegmentedLogStore, TemplateStore, Vault};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the CLI itself rather than the journal engine.
#[derive(Debug, Error)]
pub enum CliError {
    /// No editor command is configured.
    #[error("no editor configured; set one with `recallvault config set editor <command>`")]
    NoEditor,

    /// The editor exited unsuccessfully.
    #[error("editor {editor:?} exited with {status}")]
    EditorFailed {
        /// Editor command.
        editor: String,
        /// Exit status.
        status: std::process::ExitStatus,
    },

    /// The project has no segment files yet.
    #[error("project {name} has no entries yet")]
    EmptyProject {
        /// Project name.
        name: String,
    },

    /// The backend has no on-disk path for a segment.
    #[error("segment {segment} has no path on disk")]
    NoSegmentPath {
        /// Segment name.
        segment: String,
    },
}

/// Output format for commands that print data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Project selection shared by most commands.
#[derive(Debug, Clone, Args)]
pub struct ProjectArgs {
    /// Project name (`parent/child` selects a sub-project)
    pub project: String,

    /// Sub-project name
    #[arg(long)]
    pub sub: Option<String>,
}

/// Loaded configuration plus where it came from.
#[derive(Debug)]
pub struct Context {
    /// Global configuration.
    pub config: Config,
    /// File the configuration was loaded from.
    pub config_path: PathBuf,
}

impl Context {
    /// Loads the configuration, using defaults if the file does not exist.
    pub fn load(config_path: PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let config = Config::load_or_default(&config_path)?;
        Ok(Self {
            config,
            config_path,
        })
    }

    /// Opens the vault, creating its root on first use.
    pub fn vault(&self) -> Result<Vault, Box<dyn std::error::Error>> {
        Ok(Vault::open(self.config.vault_root(), true)?)
    }

    /// Opens the template directory.
    pub fn templates(&self) -> Result<TemplateStore, Box<dyn std::error::Error>> {
        Ok(TemplateStore::open(self.config.templates_dir())?)
    }

    /// Resolves the project named on the command line.
    pub fn project(&self, args: &ProjectArgs) -> Result<ProjectRef, Box<dyn std::error::Error>> {
        Ok(self.vault()?.resolve(&args.project, args.sub.as_deref())?)
    }

    /// Resolves a project and opens its log.
    pub fn log(
        &self,
        args: &ProjectArgs,
    ) -> Result<(ProjectRef, SegmentedLogStore), Box<dyn std::error::Error>> {
        let project = self.project(args)?;
        let log = project.log(self.config.log_limit)?;
        Ok((project, log))
    }
}
