//! Turn snapshots in `MessagePack`.
//!
//! A snapshot is one merged [`Report`], stored with field names so that
//! snapshots written by older builds still load after fields are added.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use turnreport_foundation::{Error, ErrorKind, Report, Result};

/// Serializes a report to `MessagePack` bytes.
///
/// # Errors
/// Returns a serialization error if encoding fails.
pub fn to_bytes(report: &Report) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(report).map_err(|e| Error::new(ErrorKind::Serialization(e.to_string())))
}

/// Deserializes a report from `MessagePack` bytes.
///
/// # Errors
/// Returns a serialization error if the bytes are not a report.
pub fn from_bytes(bytes: &[u8]) -> Result<Report> {
    rmp_serde::from_slice(bytes).map_err(|e| Error::new(ErrorKind::Serialization(e.to_string())))
}

/// Writes a snapshot file, replacing any existing file.
///
/// # Errors
/// Returns an I/O error if the file cannot be written.
pub fn save_snapshot<P: AsRef<Path>>(report: &Report, path: P) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_bytes(report)?;
    let file = File::create(path)
        .map_err(|e| Error::io(format!("failed to create '{}': {e}", path.display())))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(&bytes)
        .and_then(|()| writer.flush())
        .map_err(|e| Error::io(format!("failed to write '{}': {e}", path.display())))
}

/// Reads a snapshot file.
///
/// # Errors
/// Returns an I/O error if the file cannot be read, or a serialization
/// error if it is not a snapshot.
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Report> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| Error::io(format!("failed to open '{}': {e}", path.display())))?;
    let mut bytes = Vec::new();
    BufReader::new(file)
        .read_to_end(&mut bytes)
        .map_err(|e| Error::io(format!("failed to read '{}': {e}", path.display())))?;
    from_bytes(&bytes)
}
