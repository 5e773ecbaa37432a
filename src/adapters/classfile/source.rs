use super::jar::load_jar;
use super::parser::parse_class;
use crate::domain::ports::{ClassLoad, ClassSource, DecodeFailure};
use anyhow::{Context, Result, bail};
use memmap2::Mmap;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Class container backed by the filesystem: a single `.class` file, a `.jar`
/// archive, or a directory searched recursively for `.class` files.
pub struct FsClassSource {
    pub root: PathBuf,
}

impl FsClassSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            root: path.as_ref().to_path_buf(),
        }
    }

    /// Class files under the root, in path order. Symlinks are not followed.
    pub fn class_files(&self) -> Result<Vec<PathBuf>> {
        if !self.root.exists() {
            bail!("Input path does not exist: {}", self.root.display());
        }
        if self.root.is_file() {
            if !is_class_file(&self.root) {
                bail!(
                    "Unsupported input {}: expected a .class file, a .jar or a directory of class files",
                    self.root.display()
                );
            }
            return Ok(vec![self.root.clone()]);
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry
                .with_context(|| format!("Failed to read directory: {}", self.root.display()))?;
            if entry.file_type().is_file() && is_class_file(entry.path()) {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }
}

impl ClassSource for FsClassSource {
    fn load(&self) -> Result<Vec<ClassLoad>> {
        if self.root.is_file() && is_jar(&self.root) {
            return load_jar(&self.root);
        }
        let files = self.class_files()?;
        debug!(root = %self.root.display(), files = files.len(), "found class files");
        Ok(files.iter().map(|path| load_class_file(path)).collect())
    }
}

fn is_class_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "class")
}

fn is_jar(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "jar" || ext == "zip")
}

fn load_class_file(path: &Path) -> ClassLoad {
    let failure = |reason: String| DecodeFailure {
        origin: path.display().to_string(),
        reason,
    };

    let file = File::open(path).map_err(|e| failure(format!("failed to open: {e}")))?;
    let len = file
        .metadata()
        .map_err(|e| failure(format!("failed to stat: {e}")))?
        .len();
    if len == 0 {
        return Err(failure("empty file".to_string()));
    }
    let mmap = unsafe { Mmap::map(&file) }.map_err(|e| failure(format!("failed to mmap: {e}")))?;
    parse_class(&mmap[..]).map_err(|e| failure(e.to_string()))
}
