//! Vault and project directories.
//!
//! A vault is a root directory whose subdirectories are projects. A project
//! may contain sub-projects one level down. Each project directory holds its
//! own segment files and an optional `config.json`.

use crate::config::ProjectConfig;
use crate::error::{CoreError, CoreResult};
use crate::segment::SegmentedLogStore;
use recallvault_storage::{validate_name, StorageError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of a project's configuration.
pub const PROJECT_CONFIG_FILE: &str = "config.json";

/// A node in the project tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectNode {
    /// Directory name of the project.
    pub name: String,
    /// Sub-projects, sorted by name.
    pub children: Vec<ProjectNode>,
}

/// Root directory holding all projects.
#[derive(Debug, Clone)]
pub struct Vault {
    root: PathBuf,
}

impl Vault {
    /// Opens a vault rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns a `DirectoryNotFound` storage error if the root is missing and
    /// `create_if_missing` is false, or an I/O error if it cannot be created.
    pub fn open(root: impl Into<PathBuf>, create_if_missing: bool) -> CoreResult<Self> {
        let root = root.into();
        if !root.is_dir() {
            if !create_if_missing {
                return Err(StorageError::directory_not_found(root).into());
            }
            fs::create_dir_all(&root)?;
            debug!(root = %root.display(), "created vault root");
        }
        Ok(Self { root })
    }

    /// Returns the vault root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lists the project tree, skipping hidden directories.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be listed.
    pub fn projects(&self) -> CoreResult<Vec<ProjectNode>> {
        list_tree(&self.root)
    }

    /// Creates a project, or a sub-project inside `project`.
    ///
    /// The parent project is created if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ProjectExists`] if the target already exists and
    /// [`CoreError::InvalidProjectName`] for unusable names.
    pub fn create(&self, project: &str, sub: Option<&str>) -> CoreResult<ProjectRef> {
        check_project_name(project)?;
        let parent = self.root.join(project);
        let (name, path) = match sub {
            None => (project.to_string(), parent),
            Some(sub) => {
                check_project_name(sub)?;
                fs::create_dir_all(&parent)?;
                (format!("{project}/{sub}"), parent.join(sub))
            }
        };
        if path.exists() {
            return Err(CoreError::ProjectExists { name });
        }
        fs::create_dir(&path)?;
        debug!(project = %name, "created project");
        Ok(ProjectRef { name, path })
    }

    /// Renames a project or sub-project in place.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ProjectNotFound`] if the source is missing,
    /// [`CoreError::InvalidProjectName`] if `new_name` is unusable or equal
    /// to the current name, and [`CoreError::ProjectExists`] if it is taken.
    pub fn rename(
        &self,
        project: &str,
        sub: Option<&str>,
        new_name: &str,
    ) -> CoreResult<ProjectRef> {
        let current = self.resolve(project, sub)?;
        check_project_name(new_name)?;
        if current.dir_name() == Some(new_name) {
            return Err(CoreError::invalid_project_name(
                new_name,
                "new name is the same as the current one",
            ));
        }

        let parent = current.path.parent().unwrap_or(self.root.as_path());
        let path = parent.join(new_name);
        let name = match current.name.rsplit_once('/') {
            Some((parent_name, _)) => format!("{parent_name}/{new_name}"),
            None => new_name.to_string(),
        };
        if path.exists() {
            return Err(CoreError::ProjectExists { name });
        }
        fs::rename(&current.path, &path)?;
        debug!(from = %current.name, to = %name, "renamed project");
        Ok(ProjectRef { name, path })
    }

    /// Looks up an existing project.
    ///
    /// `"parent/child"` is accepted as shorthand for `project = "parent"`,
    /// `sub = Some("child")`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ProjectNotFound`] if the directory does not exist.
    pub fn resolve(&self, project: &str, sub: Option<&str>) -> CoreResult<ProjectRef> {
        let (project, sub) = match (sub, project.split_once('/')) {
            (None, Some((parent, child))) => (parent, Some(child)),
            _ => (project, sub),
        };
        check_project_name(project)?;
        let mut name = project.to_string();
        let mut path = self.root.join(project);
        if let Some(sub) = sub {
            check_project_name(sub)?;
            name = format!("{project}/{sub}");
            path.push(sub);
        }
        if !path.is_dir() {
            return Err(CoreError::ProjectNotFound { name });
        }
        Ok(ProjectRef { name, path })
    }
}

/// Handle to an existing project directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRef {
    name: String,
    path: PathBuf,
}

impl ProjectRef {
    /// Display name, `parent/child` for sub-projects.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Project directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the project's `config.json`.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.path.join(PROJECT_CONFIG_FILE)
    }

    /// Loads the project configuration; empty if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn config(&self) -> CoreResult<ProjectConfig> {
        ProjectConfig::load_or_default(self.config_path())
    }

    /// Writes the default project configuration if none exists.
    ///
    /// Returns the configuration file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn ensure_config(&self) -> CoreResult<PathBuf> {
        let path = self.config_path();
        if !path.exists() {
            ProjectConfig::scaffold().save(&path)?;
            debug!(project = %self.name, "wrote default project config");
        }
        Ok(path)
    }

    /// Opens the project's log with the effective capacity.
    ///
    /// `default_limit` applies when the project configuration has no
    /// `log_limit` of its own.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be read or the directory
    /// has disappeared.
    pub fn log(&self, default_limit: usize) -> CoreResult<SegmentedLogStore> {
        let log_limit = self.config()?.log_limit.unwrap_or(default_limit);
        SegmentedLogStore::open(&self.path, log_limit)
    }

    fn dir_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }
}

fn check_project_name(name: &str) -> CoreResult<()> {
    if name.trim().is_empty() {
        return Err(CoreError::invalid_project_name(name, "name is empty"));
    }
    if name.starts_with('.') {
        return Err(CoreError::invalid_project_name(name, "name starts with '.'"));
    }
    validate_name(name)
        .map_err(|e| CoreError::invalid_project_name(name, e.to_string()))
}

fn list_tree(dir: &Path) -> CoreResult<Vec<ProjectNode>> {
    let mut nodes = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        let children = list_tree(&entry.path())?;
        nodes.push(ProjectNode { name, children });
    }
    nodes.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::EntryBatch;
    use crate::entry::Entry;
    use tempfile::TempDir;

    fn vault() -> (TempDir, Vault) {
        let dir = TempDir::new().unwrap();
        let vault = Vault::open(dir.path(), false).unwrap();
        (dir, vault)
    }

    #[test]
    fn open_missing_root() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("vault");
        assert!(Vault::open(&root, false).unwrap_err().is_directory_not_found());

        let vault = Vault::open(&root, true).unwrap();
        assert!(vault.root().is_dir());
    }

    #[test]
    fn create_and_list_projects() {
        let (_dir, vault) = vault();
        vault.create("work", None).unwrap();
        vault.create("home", None).unwrap();
        vault.create("work", Some("meetings")).unwrap();
        vault.create("garden", Some("seeds")).unwrap();
        fs::create_dir(vault.root().join(".templates")).unwrap();
        fs::write(vault.root().join("stray.txt"), "").unwrap();

        let tree = vault.projects().unwrap();
        let names: Vec<_> = tree.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["garden", "home", "work"]);
        assert_eq!(tree[0].children[0].name, "seeds");
        assert!(tree[1].children.is_empty());
        assert_eq!(tree[2].children[0].name, "meetings");
    }

    #[test]
    fn create_existing_project_fails() {
        let (_dir, vault) = vault();
        vault.create("work", None).unwrap();
        let err = vault.create("work", None).unwrap_err();
        assert!(matches!(err, CoreError::ProjectExists { name } if name == "work"));

        vault.create("work", Some("a")).unwrap();
        let err = vault.create("work", Some("a")).unwrap_err();
        assert!(matches!(err, CoreError::ProjectExists { name } if name == "work/a"));
    }

    #[test]
    fn create_rejects_bad_names() {
        let (_dir, vault) = vault();
        for name in ["", "  ", ".hidden", "..", "a/b", "a\\b"] {
            assert!(
                matches!(
                    vault.create(name, None),
                    Err(CoreError::InvalidProjectName { .. })
                ),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn resolve_project_and_shorthand() {
        let (_dir, vault) = vault();
        vault.create("work", Some("meetings")).unwrap();

        let project = vault.resolve("work", None).unwrap();
        assert_eq!(project.name(), "work");

        let sub = vault.resolve("work", Some("meetings")).unwrap();
        let shorthand = vault.resolve("work/meetings", None).unwrap();
        assert_eq!(sub, shorthand);
        assert_eq!(sub.name(), "work/meetings");
        assert!(sub.path().ends_with("work/meetings"));
    }

    #[test]
    fn resolve_missing_project() {
        let (_dir, vault) = vault();
        let err = vault.resolve("nowhere", None).unwrap_err();
        assert!(matches!(err, CoreError::ProjectNotFound { name } if name == "nowhere"));
    }

    #[test]
    fn rename_project() {
        let (_dir, vault) = vault();
        vault.create("draft", None).unwrap();
        vault.create("taken", None).unwrap();

        let renamed = vault.rename("draft", None, "final").unwrap();
        assert_eq!(renamed.name(), "final");
        assert!(renamed.path().is_dir());
        assert!(vault.resolve("draft", None).is_err());

        assert!(matches!(
            vault.rename("final", None, "final"),
            Err(CoreError::InvalidProjectName { .. })
        ));
        assert!(matches!(
            vault.rename("final", None, ""),
            Err(CoreError::InvalidProjectName { .. })
        ));
        assert!(matches!(
            vault.rename("final", None, "taken"),
            Err(CoreError::ProjectExists { .. })
        ));
    }

    #[test]
    fn rename_sub_project() {
        let (_dir, vault) = vault();
        vault.create("work", Some("old")).unwrap();
        let renamed = vault.rename("work", Some("old"), "new").unwrap();
        assert_eq!(renamed.name(), "work/new");
        assert!(vault.resolve("work/new", None).is_ok());
    }

    #[test]
    fn ensure_config_writes_scaffold_once() {
        let (_dir, vault) = vault();
        let project = vault.create("work", None).unwrap();
        assert_eq!(project.config().unwrap(), ProjectConfig::default());

        let path = project.ensure_config().unwrap();
        assert_eq!(project.config().unwrap(), ProjectConfig::scaffold());

        fs::write(&path, r#"{"log_limit": 3}"#).unwrap();
        project.ensure_config().unwrap();
        assert_eq!(project.config().unwrap().log_limit, Some(3));
    }

    #[test]
    fn log_uses_effective_capacity() {
        let (_dir, vault) = vault();
        let project = vault.create("work", None).unwrap();
        assert_eq!(project.log(7).unwrap().log_limit(), 7);

        fs::write(project.config_path(), r#"{"log_limit": 1}"#).unwrap();
        let mut log = project.log(7).unwrap();
        assert_eq!(log.log_limit(), 1);

        let entry = Entry::now("first");
        log.append(&EntryBatch::from(vec![entry.clone()])).unwrap();
        let outcome = log.append(&EntryBatch::from(vec![entry])).unwrap();
        assert_eq!(outcome.segment, "log_2.txt");

        // config.json is not mistaken for a segment
        assert_eq!(log.segments().unwrap(), vec!["log_1.txt", "log_2.txt"]);
    }
}
