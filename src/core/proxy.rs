//! Proxy settings forwarded to the registry tool

use tracing::info;

/// Pipeline-scoped proxy variables and the standard names the tool reads
const PROXY_VARIABLES: [(&str, &str); 3] = [
    ("HARNESS_HTTP_PROXY", "HTTP_PROXY"),
    ("HARNESS_HTTPS_PROXY", "HTTPS_PROXY"),
    ("HARNESS_NO_PROXY", "NO_PROXY"),
];

/// `true` (any case) and `1` are true; empty or unset gives `default`
pub fn parse_bool_or_default(default: bool, value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None | Some("") => default,
        Some(v) => v.eq_ignore_ascii_case("true") || v == "1",
    }
}

/// Child environment overrides built from `lookup`. Unset or empty sources are skipped.
pub fn proxy_environment<F>(lookup: F) -> Vec<(String, String)>
where
    F: Fn(&str) -> Option<String>,
{
    PROXY_VARIABLES
        .iter()
        .filter_map(|(source, target)| {
            lookup(source)
                .filter(|v| !v.is_empty())
                .map(|v| (target.to_string(), v))
        })
        .collect()
}

/// Proxy overrides from the process environment when `enabled`
pub fn proxy_environment_from_env(enabled: bool) -> Vec<(String, String)> {
    if !enabled {
        return Vec::new();
    }
    info!("Setting proxy config for operation");
    proxy_environment(|key| std::env::var(key).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_bool_or_default() {
        let cases = [
            (false, None, false),
            (true, None, true),
            (true, Some(""), true),
            (false, Some("true"), true),
            (false, Some("TRUE"), true),
            (false, Some("1"), true),
            (false, Some("false"), false),
            (false, Some("0"), false),
            (true, Some("false"), false),
            (true, Some("yes"), false),
        ];
        for (default, input, expected) in cases {
            assert_eq!(parse_bool_or_default(default, input), expected, "{:?}", input);
        }
    }

    #[test]
    fn test_proxy_environment_maps_names() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("HARNESS_HTTP_PROXY", "http://proxy:3128"),
            ("HARNESS_NO_PROXY", ""),
        ]);

        let env = proxy_environment(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(
            env,
            vec![("HTTP_PROXY".to_string(), "http://proxy:3128".to_string())]
        );
    }

    #[test]
    fn test_disabled_proxy_is_empty() {
        assert!(proxy_environment_from_env(false).is_empty());
    }
}
