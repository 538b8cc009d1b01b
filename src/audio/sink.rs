//! Opening and decoding a file into a `rodio` sink.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use rodio::{Decoder, OutputStream, Sink};

use crate::error::{Error, NotPlayableReason, Result};

/// Create a playing `Sink` for the file at `path`.
pub(super) fn create_sink(stream: &OutputStream, path: &Path) -> Result<Sink> {
    let fail = |reason| Error::not_playable(path.display().to_string(), reason);

    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => fail(NotPlayableReason::NotFound),
        _ => fail(NotPlayableReason::Decode(e.to_string())),
    })?;

    let source = Decoder::new(BufReader::new(file))
        .map_err(|e| fail(NotPlayableReason::Decode(e.to_string())))?;

    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    Ok(sink)
}
