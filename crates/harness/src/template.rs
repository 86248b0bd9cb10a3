// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only registry of named project templates.
//!
//! A template is either a directory below the registry root or an
//! [`InlineTemplate`] registered in code. Inline templates shadow
//! directories with the same name.

use crate::config::is_contained;
use crate::error::{HarnessError, IoContext};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A file of an inline template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateFile {
    pub path: PathBuf,
    pub contents: String,
    pub executable: bool,
}

/// Project layout defined in code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineTemplate {
    name: String,
    files: Vec<TemplateFile>,
}

impl InlineTemplate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            files: Vec::new(),
        }
    }

    /// Add a file. Later files with the same path overwrite earlier ones.
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.files.push(TemplateFile {
            path: path.into(),
            contents: contents.into(),
            executable: false,
        });
        self
    }

    /// Add a file marked executable (e.g. a build wrapper script).
    pub fn with_executable(
        mut self,
        path: impl Into<PathBuf>,
        contents: impl Into<String>,
    ) -> Self {
        self.files.push(TemplateFile {
            path: path.into(),
            contents: contents.into(),
            executable: true,
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn files(&self) -> &[TemplateFile] {
        &self.files
    }
}

/// A resolved template, ready to be copied into a workspace.
#[derive(Clone, Debug)]
pub enum Template<'a> {
    Directory { name: String, path: PathBuf },
    Inline(&'a InlineTemplate),
}

impl Template<'_> {
    pub fn name(&self) -> &str {
        match self {
            Template::Directory { name, .. } => name,
            Template::Inline(t) => t.name(),
        }
    }

    /// Copy the template's files into `dest`. Returns the number of files written.
    pub fn materialize(&self, dest: &Path) -> Result<usize, HarnessError> {
        match self {
            Template::Directory { path, .. } => copy_dir(path, dest),
            Template::Inline(t) => {
                for file in t.files() {
                    write_project_file(dest, &file.path, &file.contents, file.executable)?;
                }
                Ok(t.files().len())
            }
        }
    }
}

/// Registry of templates addressed by identifier.
#[derive(Clone, Debug, Default)]
pub struct TemplateRegistry {
    root: Option<PathBuf>,
    inline: BTreeMap<String, InlineTemplate>,
}

impl TemplateRegistry {
    /// Registry backed by a directory of templates.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            inline: BTreeMap::new(),
        }
    }

    /// Registry with no directory; only inline templates.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn register(&mut self, template: InlineTemplate) {
        self.inline.insert(template.name.clone(), template);
    }

    pub fn with_template(mut self, template: InlineTemplate) -> Self {
        self.register(template);
        self
    }

    /// Resolve a template identifier.
    ///
    /// Identifiers that are empty, absolute, or climb out of the root are
    /// reported as not found.
    pub fn resolve(&self, name: &str) -> Result<Template<'_>, HarnessError> {
        let not_found = || HarnessError::TemplateNotFound {
            name: name.to_string(),
        };
        if let Some(template) = self.inline.get(name) {
            return Ok(Template::Inline(template));
        }
        if !is_contained(Path::new(name)) {
            return Err(not_found());
        }
        let root = self.root.as_ref().ok_or_else(not_found)?;
        let path = root.join(name);
        if path.is_dir() {
            Ok(Template::Directory {
                name: name.to_string(),
                path,
            })
        } else {
            Err(not_found())
        }
    }

    /// All known identifiers, sorted. Directory templates are top-level subdirectories.
    pub fn names(&self) -> Result<Vec<String>, HarnessError> {
        let mut names: Vec<String> = self.inline.keys().cloned().collect();
        if let Some(root) = self.root.as_ref().filter(|r| r.is_dir()) {
            let entries = fs::read_dir(root)
                .io_context(|| format!("Failed to list templates in {}", root.display()))?;
            for entry in entries {
                let entry = entry.io_context(|| "Failed to read template entry")?;
                if entry.path().is_dir() {
                    if let Some(name) = entry.file_name().to_str() {
                        names.push(name.to_string());
                    }
                }
            }
        }
        names.sort();
        names.dedup();
        Ok(names)
    }
}

/// Write a file below `base`, creating parent directories.
pub(crate) fn write_project_file(
    base: &Path,
    relative: &Path,
    contents: &str,
    executable: bool,
) -> Result<PathBuf, HarnessError> {
    if !is_contained(relative) {
        return Err(HarnessError::InvalidPath {
            path: relative.to_path_buf(),
        });
    }
    let target = base.join(relative);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .io_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&target, contents).io_context(|| format!("Failed to write {}", target.display()))?;
    if executable {
        set_executable(&target)?;
    }
    Ok(target)
}

#[cfg(unix)]
fn set_executable(path: &Path) -> Result<(), HarnessError> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path)
        .io_context(|| format!("Failed to stat {}", path.display()))?
        .permissions();
    perms.set_mode(perms.mode() | 0o755);
    fs::set_permissions(path, perms)
        .io_context(|| format!("Failed to chmod {}", path.display()))
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> Result<(), HarnessError> {
    Ok(())
}

/// Recursively copy `src` into `dest`. Permissions are preserved.
///
/// Symlinks are recreated rather than followed, and `dest` itself is skipped
/// when it lives below `src`.
fn copy_dir(src: &Path, dest: &Path) -> Result<usize, HarnessError> {
    fs::create_dir_all(dest).io_context(|| format!("Failed to create {}", dest.display()))?;
    let dest_canonical = dest
        .canonicalize()
        .io_context(|| format!("Failed to resolve {}", dest.display()))?;
    copy_tree(src, dest, &dest_canonical)
}

fn copy_tree(src: &Path, dest: &Path, skip: &Path) -> Result<usize, HarnessError> {
    fs::create_dir_all(dest).io_context(|| format!("Failed to create {}", dest.display()))?;
    let entries =
        fs::read_dir(src).io_context(|| format!("Failed to read template {}", src.display()))?;
    let mut copied = 0;
    for entry in entries {
        let entry = entry.io_context(|| format!("Failed to read entry in {}", src.display()))?;
        let from = entry.path();
        let to = dest.join(entry.file_name());
        let file_type = entry
            .file_type()
            .io_context(|| format!("Failed to stat {}", from.display()))?;
        if file_type.is_symlink() {
            copy_symlink(&from, &to)?;
            copied += 1;
        } else if file_type.is_dir() {
            if from.canonicalize().is_ok_and(|c| c == skip) {
                continue;
            }
            copied += copy_tree(&from, &to, skip)?;
        } else {
            fs::copy(&from, &to).io_context(|| {
                format!("Failed to copy {} to {}", from.display(), to.display())
            })?;
            copied += 1;
        }
    }
    Ok(copied)
}

#[cfg(unix)]
fn copy_symlink(from: &Path, to: &Path) -> Result<(), HarnessError> {
    let target =
        fs::read_link(from).io_context(|| format!("Failed to read link {}", from.display()))?;
    std::os::unix::fs::symlink(&target, to)
        .io_context(|| format!("Failed to create link {}", to.display()))
}

#[cfg(not(unix))]
fn copy_symlink(from: &Path, to: &Path) -> Result<(), HarnessError> {
    fs::copy(from, to)
        .map(|_| ())
        .io_context(|| format!("Failed to copy {} to {}", from.display(), to.display()))
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
