//! Output sink for rendered model files
//!
//! All files are staged as temporaries inside the output directory and only
//! renamed into place once every one of them was written. If a rename fails,
//! the files this run created are removed again; files replaced under
//! `--force` keep their new contents.

use anyhow::{bail, Context, Result};
use modelgen_schema::codegen::RenderedFile;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use tempfile::NamedTempFile;

pub struct OutputWriter {
    dir: PathBuf,
    force: bool,
}

impl OutputWriter {
    pub fn new<P: Into<PathBuf>>(dir: P, force: bool) -> Self {
        Self {
            dir: dir.into(),
            force,
        }
    }

    /// Target path of a rendered file; the name must be a plain file name
    pub fn target(&self, file: &RenderedFile) -> Result<PathBuf> {
        let mut components = Path::new(&file.file_name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => Ok(self.dir.join(name)),
            _ => bail!(
                "Refusing to write '{}': not a plain file name inside {}",
                file.file_name,
                self.dir.display()
            ),
        }
    }

    /// Refuse unsafe names, and existing files unless forced
    pub fn check_targets(&self, files: &[RenderedFile]) -> Result<()> {
        if self.force {
            for file in files {
                self.target(file)?;
            }
            return Ok(());
        }

        let mut existing = Vec::new();
        for file in files {
            let target = self.target(file)?;
            if target.exists() {
                existing.push(target.display().to_string());
            }
        }

        if !existing.is_empty() {
            bail!(
                "Refusing to overwrite existing file(s): {}. Use --force to overwrite.",
                existing.join(", ")
            );
        }
        Ok(())
    }

    /// Stage every file, then move them into place
    ///
    /// Nothing is touched when staging fails. A failed move removes the
    /// files this call had created so far.
    pub fn write_all(&self, files: &[RenderedFile]) -> Result<Vec<PathBuf>> {
        self.check_targets(files)?;

        if !self.dir.exists() {
            std::fs::create_dir_all(&self.dir)
                .with_context(|| format!("Failed to create output directory {}", self.dir.display()))?;
            log::info!("Created output directory: {}", self.dir.display());
        }

        let mut staged = Vec::with_capacity(files.len());
        for file in files {
            let target = self.target(file)?;
            let mut temp = NamedTempFile::new_in(&self.dir)
                .with_context(|| format!("Failed to stage {} in {}", file.file_name, self.dir.display()))?;
            temp.write_all(file.contents.as_bytes())
                .with_context(|| format!("Failed to write {}", file.file_name))?;
            let existed = target.exists();
            staged.push((temp, target, existed));
        }

        let mut written = Vec::with_capacity(staged.len());
        let mut created = Vec::new();
        for (temp, target, existed) in staged {
            if let Err(e) = temp.persist(&target) {
                rollback(&created);
                return Err(e.error)
                    .with_context(|| format!("Failed to move generated file to {}", target.display()));
            }
            log::debug!("Wrote {}", target.display());
            if !existed {
                created.push(target.clone());
            }
            written.push(target);
        }

        Ok(written)
    }
}

/// Remove files created by a failed write
fn rollback(created: &[PathBuf]) {
    for path in created {
        match std::fs::remove_file(path) {
            Ok(()) => log::warn!("Removed partially written output {}", path.display()),
            Err(e) => log::warn!("Failed to remove {}: {}", path.display(), e),
        }
    }
}
