//! API version segment detection.

use regex::Regex;
use std::sync::LazyLock;

static VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v\d+(p\d+)?((alpha|beta|eap)\d*)?$").expect("valid regex")
});

/// Whether a `lower_underscore` segment names an API version, e.g. `v1`,
/// `v1beta2`, `v1p1beta1` or `v2alpha`.
pub fn is_version(segment: &str) -> bool {
    VERSION.is_match(segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versions() {
        for v in ["v1", "v2", "v1beta2", "v1p1beta1", "v2alpha", "v3eap1"] {
            assert!(is_version(v), "{v}");
        }
        for v in ["V1", "version1", "v", "v1gamma", "library", "v1_beta"] {
            assert!(!is_version(v), "{v}");
        }
    }
}
