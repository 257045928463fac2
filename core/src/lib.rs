//! Typed records returned by the SSL Labs assessment API.
//!
//! Everything here is plain data decoded with serde. Fields the service adds
//! later and that are not modelled yet are kept in the `extra` maps so that
//! nothing is lost between decode and re-encode.

mod details;
mod host;
mod info;
mod lenient;
mod status;

pub use details::*;
pub use host::{Endpoint, Host};
pub use info::{Info, StatusCodes};
pub use status::AnalysisStatus;

use time::OffsetDateTime;

pub const fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Convert a millisecond Unix timestamp as sent by the service.
pub(crate) fn millis_to_datetime(ms: i64) -> Option<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(ms) * 1_000_000).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_set() {
        assert!(!version().is_empty());
    }

    #[test]
    fn millis_conversion() {
        let t = millis_to_datetime(1_460_000_000_123).unwrap();
        assert_eq!(t.unix_timestamp(), 1_460_000_000);
        assert_eq!(t.millisecond(), 123);
    }
}
