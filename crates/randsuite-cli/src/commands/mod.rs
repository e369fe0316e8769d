pub mod list;
pub mod run;

use log::warn;
use randsuite_core::Normalization;

/// Split a comma-separated name list, dropping empty entries.
pub fn parse_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a normalization mode string into the enum.
pub fn parse_normalization(s: &str) -> Normalization {
    match s {
        "bucket_count" | "buckets" | "faithful" => Normalization::BucketCount,
        "sample_size" | "samples" | "corrected" => Normalization::SampleSize,
        _ => {
            warn!("Unknown normalization '{s}', using bucket_count");
            Normalization::BucketCount
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // parse_list tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_parse_list_trims_and_drops_empty() {
        assert_eq!(
            parse_list(" average, entropy ,,serial_correlation"),
            vec!["average", "entropy", "serial_correlation"]
        );
        assert!(parse_list("").is_empty());
    }

    // -----------------------------------------------------------------------
    // parse_normalization tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_parse_bucket_count_variants() {
        assert_eq!(parse_normalization("bucket_count"), Normalization::BucketCount);
        assert_eq!(parse_normalization("faithful"), Normalization::BucketCount);
    }

    #[test]
    fn test_parse_sample_size_variants() {
        assert_eq!(parse_normalization("sample_size"), Normalization::SampleSize);
        assert_eq!(parse_normalization("corrected"), Normalization::SampleSize);
    }

    #[test]
    fn test_parse_unknown_defaults_bucket_count() {
        assert_eq!(parse_normalization("median"), Normalization::BucketCount);
        assert_eq!(parse_normalization("SAMPLE_SIZE"), Normalization::BucketCount); // case-sensitive
    }
}
