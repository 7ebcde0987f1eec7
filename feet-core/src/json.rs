//! Tab-indented JSON output and `.tmp` + rename file writes.
//!
//! Every file feet writes (registry, manifest) goes through here so the
//! on-disk format stays stable between runs.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::{io_err, FeetError};

/// Serialize `value` as tab-indented JSON with a trailing newline.
pub fn to_string_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"\t");
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    buf.push(b'\n');
    // serde_json only emits valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// `<path>.tmp`, always beside the target so the rename stays on one filesystem.
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Write `contents` to `<path>.tmp`, then rename over `path`.
///
/// The `.tmp` file is removed if the rename fails.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), FeetError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    let tmp = tmp_path(path);
    std::fs::write(&tmp, contents).map_err(|e| io_err(&tmp, e))?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(path, e));
    }
    Ok(())
}
