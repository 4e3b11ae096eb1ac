//! Data sources for merged runtime options
//!
//! The regeneration coordinator only depends on [`MergedOptionsSource`]. The
//! dev-server endpoint is reached through [`HttpMergedOptionsSource`]; tests and
//! offline runs use [`MockMergedOptionsSource`] or [`FileMergedOptionsSource`].

mod error;
mod file;
mod http;
mod mock;

pub use error::FetchError;
pub use file::FileMergedOptionsSource;
pub use http::{HttpMergedOptionsSource, MERGED_OPTIONS_ENDPOINT};
pub use mock::MockMergedOptionsSource;

use crate::infer::MergedOptions;
use async_trait::async_trait;

/// Provider of complete merged options snapshots
#[async_trait]
pub trait MergedOptionsSource: Send + Sync {
    /// Fetches one snapshot; errors carry no partial data
    async fn fetch_merged_options(&self) -> Result<MergedOptions, FetchError>;

    fn name(&self) -> &str;
}

/// Parses a merged options body, rejecting anything that is not a JSON object
pub fn parse_merged_options(body: &[u8]) -> Result<MergedOptions, FetchError> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| FetchError::invalid_json(e.to_string()))?;
    if !value.is_object() {
        return Err(FetchError::invalid_json("expected a JSON object"));
    }
    serde_json::from_value(value).map_err(|e| FetchError::invalid_json(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_malformed_json() {
        assert!(matches!(
            parse_merged_options(b"{\"messages\": "),
            Err(FetchError::InvalidJson { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(matches!(
            parse_merged_options(b"[1, 2]"),
            Err(FetchError::InvalidJson { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_wrong_field_types() {
        assert!(matches!(
            parse_merged_options(br#"{"numberFormats": 3}"#),
            Err(FetchError::InvalidJson { .. })
        ));
    }

    #[test]
    fn test_parse_accepts_partial_document() {
        let options = parse_merged_options(br#"{"messages": {"hi": "there"}}"#).unwrap();
        assert!(options.number_formats.is_empty());
        assert!(options.messages.entries().unwrap().contains_key("hi"));
    }

    #[test]
    fn test_parse_null_format_tables_as_empty() {
        let options = parse_merged_options(
            br#"{"messages": {"hi": "x"}, "numberFormats": null, "datetimeFormats": null}"#,
        )
        .unwrap();
        assert!(options.number_formats.is_empty());
        assert!(options.datetime_formats.is_empty());
        assert!(options.messages.entries().unwrap().contains_key("hi"));
    }
}
