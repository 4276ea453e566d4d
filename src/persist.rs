//! Disk I/O helpers: read (with optional gunzip) and atomic write.
//!
//! Saves go to a uniquely named temp file next to the target and are then
//! renamed over it, so readers see either the old file or the new one. The
//! rename is close to atomic on local filesystems; on network shares there
//! are no hard guarantees.

use crate::error::{Error, Result};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;
use tempfile::PersistError;

/// Read the file at `path`, gunzipping it first when `compress` is set.
///
/// A missing file is [`Error::NotFound`]; bytes that aren't valid gzip are
/// [`Error::Parse`].
pub fn read(path: &Path, compress: bool) -> Result<Vec<u8>> {
    let raw = match fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(Error::NotFound(path.display().to_string()))
        }
        Err(e) => return Err(Error::Io(e.to_string())),
    };
    if !compress {
        return Ok(raw);
    }
    let mut out = Vec::with_capacity(raw.len() * 4);
    GzDecoder::new(raw.as_slice())
        .read_to_end(&mut out)
        .map_err(|e| Error::Parse(format!("{}: {e}", path.display())))?;
    Ok(out)
}

/// Write `bytes` to a temp file in the same directory and then rename it over
/// `path`. Missing parent directories are created. On failure the temp file is
/// removed and `path` is left as it was.
pub fn atomic_write(path: &Path, bytes: &[u8], compress: bool) -> Result<()> {
    write_atomically(path, |file| write_payload(file, bytes, compress))
}

/// Truncate and rewrite `path` in place. Faster, but a crash mid-write leaves
/// a torn file behind.
pub fn direct_write(path: &Path, bytes: &[u8], compress: bool) -> Result<()> {
    fs::create_dir_all(parent_dir(path))?;
    let mut file = File::create(path)?;
    write_payload(&mut file, bytes, compress)?;
    Ok(())
}

fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let name = path
        .file_name()
        .ok_or_else(|| Error::Config(format!("{} has no file name", path.display())))?;
    let dir = parent_dir(path);
    fs::create_dir_all(dir)?;

    let mut suffix = OsString::from(".");
    suffix.push(name);
    let mut tmp = tempfile::Builder::new().suffix(&suffix).tempfile_in(dir)?;

    // Dropping `tmp` on the error paths deletes it.
    write(tmp.as_file_mut())?;
    tmp.as_file().sync_all()?;

    match tmp.persist(path) {
        Ok(_) => Ok(()),
        Err(PersistError { error, file }) => {
            if let Err(e) = file.close() {
                tracing::warn!(path = %path.display(), "failed to remove temp file: {e}");
            }
            Err(Error::Io(error.to_string()))
        }
    }
}

fn write_payload(file: &mut File, bytes: &[u8], compress: bool) -> io::Result<()> {
    if compress {
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(bytes)?;
        encoder.finish()?;
    } else {
        file.write_all(bytes)?;
    }
    Ok(())
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}
