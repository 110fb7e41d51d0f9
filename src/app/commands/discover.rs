//! Locate application configuration files on disk.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::AppError;
use crate::domain::deployment::is_config_file_name;

/// Find the single configuration document in `folder`.
pub fn locate_config(folder: &Path) -> Result<PathBuf, AppError> {
    if !folder.is_dir() {
        return Err(AppError::ConfigNotFound(folder.display().to_string()));
    }

    let mut matches = config_files_in(folder)?;
    match matches.len() {
        0 => Err(AppError::ConfigNotFound(folder.display().to_string())),
        1 => Ok(matches.remove(0)),
        _ => Err(AppError::AmbiguousConfig {
            folder: folder.display().to_string(),
            files: matches
                .iter()
                .filter_map(|p| p.file_name())
                .map(|name| name.to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join(", "),
        }),
    }
}

/// Folders below `root` (down to `max_depth` levels) holding a configuration
/// document, sorted and deduplicated.
pub fn discover_applications(root: &Path, max_depth: usize) -> Result<Vec<PathBuf>, AppError> {
    let mut found = BTreeSet::new();
    walk(root, 0, max_depth, &mut found)?;

    if found.is_empty() {
        return Err(AppError::NoApplicationsFound(root.display().to_string()));
    }
    Ok(found.into_iter().collect())
}

fn walk(
    dir: &Path,
    depth: usize,
    max_depth: usize,
    found: &mut BTreeSet<PathBuf>,
) -> Result<(), AppError> {
    if depth >= max_depth {
        return Ok(());
    }

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type()?.is_dir() || is_hidden(&path) {
            continue;
        }
        if !config_files_in(&path)?.is_empty() {
            found.insert(path.clone());
        }
        walk(&path, depth + 1, max_depth, found)?;
    }

    Ok(())
}

fn config_files_in(folder: &Path) -> Result<Vec<PathBuf>, AppError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(folder)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if is_config_file_name(&entry.file_name().to_string_lossy()) {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name().is_some_and(|name| name.to_string_lossy().starts_with('.'))
}
