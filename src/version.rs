use regex::Regex;
use std::cmp::Ordering;
use std::sync::OnceLock;

/// Version of this tool
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compare dotted numeric versions component by component.
///
/// Missing components count as zero, so `1.2` equals `1.2.0`. Non-numeric
/// components also count as zero.
pub fn compare(a: &str, b: &str) -> Ordering {
    let a = components(a);
    let b = components(b);

    for i in 0..a.len().max(b.len()) {
        let left = a.get(i).copied().unwrap_or(0);
        let right = b.get(i).copied().unwrap_or(0);
        match left.cmp(&right) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// True when `current` is older than `required`
pub fn needs_update(current: &str, required: &str) -> bool {
    compare(current, required) == Ordering::Less
}

/// Pull the first `major.minor.patch` out of tool output such as
/// `Docker version 24.0.7, build afdd53b`
pub fn extract_version(output: &str) -> Option<String> {
    static VERSION_RE: OnceLock<Regex> = OnceLock::new();
    let re = VERSION_RE.get_or_init(|| {
        Regex::new(r"(\d+\.\d+\.\d+)").expect("version pattern is valid")
    });
    re.captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn components(version: &str) -> Vec<u64> {
    version
        .trim()
        .trim_start_matches('v')
        .split('.')
        .map(|part| part.parse().unwrap_or(0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_update() {
        assert!(needs_update("0.9.0", "1.0.0"));
        assert!(!needs_update("1.0.0", "1.0.0"));
        assert!(!needs_update("1.2.0", "1.1.9"));
        assert!(needs_update("0.25.0", "0.26.0"));
        assert!(needs_update("1.9.9", "1.10.0"));
    }

    #[test]
    fn test_missing_components_are_zero() {
        assert_eq!(compare("1.2", "1.2.0"), Ordering::Equal);
        assert!(needs_update("1", "1.0.1"));
        assert!(!needs_update("2", "1.9.9"));
    }

    #[test]
    fn test_leading_v_is_ignored() {
        assert_eq!(compare("v0.3.1", "0.3.1"), Ordering::Equal);
        assert!(needs_update("v0.3.1", "v0.4.0"));
    }

    #[test]
    fn test_extract_version() {
        assert_eq!(
            extract_version("Docker version 24.0.7, build afdd53b").as_deref(),
            Some("24.0.7")
        );
        assert_eq!(extract_version("compact 0.26.0").as_deref(), Some("0.26.0"));
        assert_eq!(
            extract_version("cargo 1.85.0 (d73d2caf9 2024-12-31)").as_deref(),
            Some("1.85.0")
        );
        assert_eq!(extract_version("v22.11.0").as_deref(), Some("22.11.0"));
        assert!(extract_version("no version here").is_none());
    }
}
