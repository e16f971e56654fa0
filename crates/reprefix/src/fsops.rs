//! Directory plumbing for the rewrite command: cleaning the output
//! directory, mirroring the input tree, and file discovery.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

/// Remove every entry inside `dir` without removing `dir` itself.
pub fn clean_dir(dir: &Path) -> Result<()> {
    for entry in fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let path = entry?.path();
        if path.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        }
        .with_context(|| format!("removing {}", path.display()))?;
    }
    Ok(())
}

/// Copy the full tree under `input` into `output`, preserving relative
/// paths. Rewritten files overwrite their copies afterwards; everything
/// else is carried along verbatim.
pub fn copy_tree(input: &Path, output: &Path) -> Result<()> {
    for entry in WalkDir::new(input) {
        let entry = entry.with_context(|| format!("walking {}", input.display()))?;
        let relative = entry
            .path()
            .strip_prefix(input)
            .expect("walkdir yields children of its root");
        if relative.as_os_str().is_empty() {
            continue;
        }
        let target = output.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("creating {}", target.display()))?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            fs::copy(entry.path(), &target).with_context(|| {
                format!("copying {} to {}", entry.path().display(), target.display())
            })?;
        }
    }
    Ok(())
}

/// Files under `dir` with the given extension, sorted for deterministic
/// processing order.
pub fn find_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry.with_context(|| format!("walking {}", dir.display()))?;
        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|e| e == extension)
        {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}
