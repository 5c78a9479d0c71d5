//! Pass file resolution
//!
//! Maps a serial number to an opened pass file plus the last-modified
//! timestamp the conditional GET compares against. The directory is
//! injected at construction; there is no process-wide state.

use crate::error::PassError;
use chrono::{DateTime, TimeZone, Utc};
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs::File;
use tracing::debug;

/// File extension every stored pass carries.
pub const PASS_FILE_EXTENSION: &str = ".pkpass";

/// Media type of a pass file on the wire.
pub const PASS_CONTENT_TYPE: &str = "application/vnd.apple.pkpass";

/// Maps serial numbers to pass files below a configured directory.
#[derive(Debug, Clone)]
pub struct PassFileResolver {
    directory: PathBuf,
}

/// An opened pass file plus the metadata the conditional GET needs.
#[derive(Debug)]
pub struct ResolvedPass {
    pub file: File,
    /// File mtime truncated to whole seconds; the HTTP date format the
    /// protocol compares against cannot express anything finer.
    pub last_modified: DateTime<Utc>,
}

impl PassFileResolver {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Open the pass file for `serial_number`.
    ///
    /// Serial numbers lacking the `.pkpass` extension get it appended
    /// before lookup. A missing file is [`PassError::PassNotFound`]; any
    /// other I/O failure stays a server-side error.
    pub async fn resolve(&self, serial_number: &str) -> Result<ResolvedPass, PassError> {
        let path = self.path_for(serial_number);
        debug!("Resolving pass file: {}", path.display());

        let file = File::open(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => PassError::PassNotFound,
            _ => PassError::Io(e),
        })?;
        let metadata = file.metadata().await?;
        let modified = metadata.modified()?;

        Ok(ResolvedPass {
            file,
            last_modified: truncate_to_seconds(DateTime::<Utc>::from(modified)),
        })
    }

    fn path_for(&self, serial_number: &str) -> PathBuf {
        if serial_number.ends_with(PASS_FILE_EXTENSION) {
            self.directory.join(serial_number)
        } else {
            self.directory
                .join(format!("{}{}", serial_number, PASS_FILE_EXTENSION))
        }
    }
}

fn truncate_to_seconds(ts: DateTime<Utc>) -> DateTime<Utc> {
    Utc.timestamp_opt(ts.timestamp(), 0).single().unwrap_or(ts)
}

/// Renders a timestamp in the HTTP date format (RFC 1123, always GMT).
pub fn http_date(ts: DateTime<Utc>) -> String {
    ts.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Parses an HTTP date header value; `None` when it is not a valid date.
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_date_round_trips_at_second_precision() {
        let ts = Utc.with_ymd_and_hms(2019, 5, 12, 9, 30, 7).unwrap();
        let rendered = http_date(ts);
        assert_eq!(rendered, "Sun, 12 May 2019 09:30:07 GMT");
        assert_eq!(parse_http_date(&rendered), Some(ts));
    }

    #[test]
    fn garbage_dates_parse_to_none() {
        assert_eq!(parse_http_date("not a date"), None);
        assert_eq!(parse_http_date(""), None);
    }

    #[test]
    fn serial_numbers_are_normalized_to_the_pass_extension() {
        let resolver = PassFileResolver::new("/passes");
        assert_eq!(
            resolver.path_for("xlo"),
            PathBuf::from("/passes/xlo.pkpass")
        );
        assert_eq!(
            resolver.path_for("xlo.pkpass"),
            PathBuf::from("/passes/xlo.pkpass")
        );
    }

    #[test]
    fn truncation_drops_subsecond_precision_only() {
        let ts = Utc.timestamp_opt(1_567_773_107, 0).single().unwrap()
            + chrono::Duration::milliseconds(450);
        assert_eq!(truncate_to_seconds(ts).timestamp(), 1_567_773_107);
        assert_eq!(truncate_to_seconds(ts).timestamp_subsec_millis(), 0);
    }
}
