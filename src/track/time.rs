use std::time::Duration;

use crate::error::{Error, Result};

const MAX_MMSS: Duration = Duration::from_secs(100 * 60);

/// Format `d` as zero-padded `MM:SS`, truncating partial seconds.
///
/// Values of 100 minutes or more do not fit two minute digits and fail with
/// `TimeOverflow`.
pub fn format_mmss(d: Duration) -> Result<String> {
    if d >= MAX_MMSS {
        return Err(Error::TimeOverflow(d));
    }
    let secs = d.as_secs();
    Ok(format!("{:02}:{:02}", secs / 60, secs % 60))
}
