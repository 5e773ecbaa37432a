use super::parser::parse_class;
use crate::domain::ports::{ClassLoad, DecodeFailure};
use anyhow::{Context, Result};
use memmap2::Mmap;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;
use tracing::debug;
use zip::ZipArchive;

/// Decode every `.class` entry of a jar, in entry-name order. An archive that
/// cannot be opened is fatal; an entry that cannot be read or decoded becomes a
/// `DecodeFailure` named after the entry.
pub fn load_jar(path: &Path) -> Result<Vec<ClassLoad>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open jar: {}", path.display()))?;
    let mmap = unsafe { Mmap::map(&file) }
        .with_context(|| format!("Failed to mmap jar: {}", path.display()))?;
    let mut archive = ZipArchive::new(Cursor::new(&mmap[..]))
        .with_context(|| format!("Failed to read jar: {}", path.display()))?;

    let mut names: Vec<String> = archive
        .file_names()
        .filter(|name| name.ends_with(".class"))
        .map(str::to_string)
        .collect();
    names.sort();
    debug!(jar = %path.display(), entries = names.len(), "found class entries");

    let mut loads = Vec::with_capacity(names.len());
    for name in names {
        loads.push(load_entry(&mut archive, name));
    }
    Ok(loads)
}

fn load_entry<R: Read + std::io::Seek>(archive: &mut ZipArchive<R>, name: String) -> ClassLoad {
    let data = {
        let mut entry = match archive.by_name(&name) {
            Ok(entry) => entry,
            Err(e) => return Err(entry_failure(name, format!("failed to open entry: {e}"))),
        };
        let mut data = Vec::with_capacity(entry.size() as usize);
        if let Err(e) = entry.read_to_end(&mut data) {
            return Err(entry_failure(name, format!("failed to read entry: {e}")));
        }
        data
    };
    parse_class(&data).map_err(|e| entry_failure(name, e.to_string()))
}

fn entry_failure(origin: String, reason: String) -> DecodeFailure {
    DecodeFailure { origin, reason }
}
