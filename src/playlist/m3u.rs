//! Minimal M3U reader/writer: one path per line, `#` lines are comments.

use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::warn;

use crate::error::{Error, Result};

fn file_error(path: &Path) -> impl FnOnce(std::io::Error) -> Error + '_ {
    move |source| Error::PlaylistFile {
        path: path.to_path_buf(),
        source,
    }
}

/// Read the entries of an M3U file, skipping comments and blank lines.
///
/// Lines that are not valid UTF-8 are kept with the bad bytes replaced, so the
/// entry fails on its own when it is turned into a track.
pub fn read_entries(path: &Path) -> Result<Vec<String>> {
    let bytes = fs::read(path).map_err(file_error(path))?;
    let mut entries = Vec::new();
    for (n, raw) in bytes.split(|&b| b == b'\n').enumerate() {
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        let line = String::from_utf8_lossy(raw);
        if let Cow::Owned(_) = line {
            warn!(path = %path.display(), line = n + 1, "playlist line is not valid UTF-8");
        }
        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }
        entries.push(line.into_owned());
    }
    Ok(entries)
}

/// Write one entry per line, newline-terminated, replacing `path`.
pub fn write_entries<'a, I>(path: &Path, entries: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let file = File::create(path).map_err(file_error(path))?;
    let mut out = BufWriter::new(file);
    for entry in entries {
        writeln!(out, "{entry}").map_err(file_error(path))?;
    }
    out.flush().map_err(file_error(path))
}
