//! Directory scanning: build tracks from the audio files under a folder.

mod scan;

pub use scan::scan;

#[cfg(test)]
mod tests;
