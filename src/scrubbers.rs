//! Scrubbers normalize volatile content (timestamps, GUIDs, machine paths)
//! before an artifact is written and compared, so that approved baselines
//! stay stable across runs and machines.

use std::sync::Arc;

use regex::Regex;

/// A deterministic text transformation applied by [`crate::options::Options`]
/// before the received artifact is written.
pub type Scrubber = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// The default scrubber: returns its input unchanged.
pub fn identity() -> Scrubber {
    Arc::new(|text: &str| text.to_string())
}

/// Replace every match of `pattern` with `replacement`.
///
/// The replacement string supports `regex` capture-group syntax (`$1`,
/// `$name`). Panics if the pattern is invalid; scrubbers are constructed in
/// test code where a bad pattern is a programming error.
pub fn regex_scrubber(pattern: &str, replacement: &str) -> Scrubber {
    let re = Regex::new(pattern).unwrap_or_else(|e| panic!("invalid scrubber pattern '{pattern}': {e}"));
    let replacement = replacement.to_string();
    Arc::new(move |text: &str| re.replace_all(text, replacement.as_str()).into_owned())
}

/// Replace every GUID/UUID with a stable per-document label (`guid_1`,
/// `guid_2`, ...). Repeated occurrences of the same GUID share a label, so
/// identity relationships survive scrubbing.
pub fn scrub_guids() -> Scrubber {
    let re = Regex::new(
        r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}",
    )
    .unwrap();
    Arc::new(move |text: &str| {
        let mut labels: Vec<String> = Vec::new();
        re.replace_all(text, |caps: &regex::Captures<'_>| {
            let guid = caps[0].to_lowercase();
            let idx = match labels.iter().position(|g| *g == guid) {
                Some(idx) => idx,
                None => {
                    labels.push(guid);
                    labels.len() - 1
                }
            };
            format!("guid_{}", idx + 1)
        })
        .into_owned()
    })
}

/// Replace ISO-8601 timestamps (`2026-08-08T12:34:56Z`, with optional
/// fractional seconds and offsets) with `[date]`.
pub fn scrub_iso_timestamps() -> Scrubber {
    regex_scrubber(
        r"\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(?:\.\d+)?(?:Z|[+-]\d{2}:?\d{2})?",
        "[date]",
    )
}

/// Compose two scrubbers, applying `first` then `second`.
pub fn combine(first: Scrubber, second: Scrubber) -> Scrubber {
    Arc::new(move |text: &str| second(&first(text)))
}
