//! Settings suffix parsing.
//!
//! A resource name may carry option overrides after its first `!`:
//! `pages/index!cssLoader=less;debug=true`.

/// Split a resource name into its name and optional settings suffix.
#[must_use]
pub fn split_resource(resource: &str) -> (&str, Option<&str>) {
    match resource.split_once('!') {
        Some((name, suffix)) => (name, Some(suffix)),
        None => (resource, None),
    }
}

/// Parse `name=value;name=value` into raw key/value pairs.
///
/// Empty segments are skipped. A segment without `=` is a flag set to
/// `true`. Keys and values are trimmed.
pub fn parse_suffix(suffix: &str) -> impl Iterator<Item = (&str, &str)> {
    suffix
        .split(';')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| match segment.split_once('=') {
            Some((key, value)) => (key.trim(), value.trim()),
            None => (segment, "true"),
        })
        .filter(|(key, _)| !key.is_empty())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_split_resource_without_suffix() {
        assert_eq!(split_resource("pages/index"), ("pages/index", None));
    }

    #[test]
    fn test_split_resource_with_suffix() {
        assert_eq!(
            split_resource("pages/index!cssLoader=less"),
            ("pages/index", Some("cssLoader=less"))
        );
    }

    #[test]
    fn test_split_resource_keeps_later_bangs() {
        assert_eq!(split_resource("a!b=c!d"), ("a", Some("b=c!d")));
    }

    #[test]
    fn test_parse_suffix_pairs() {
        let pairs: Vec<_> = parse_suffix("cssLoader=less; defaultExt = htm").collect();
        assert_eq!(pairs, vec![("cssLoader", "less"), ("defaultExt", "htm")]);
    }

    #[test]
    fn test_parse_suffix_skips_empty_segments() {
        let pairs: Vec<_> = parse_suffix(";;a=1;").collect();
        assert_eq!(pairs, vec![("a", "1")]);
    }

    #[test]
    fn test_parse_suffix_flag() {
        let pairs: Vec<_> = parse_suffix("strict").collect();
        assert_eq!(pairs, vec![("strict", "true")]);
    }

    #[test]
    fn test_parse_suffix_value_with_equals() {
        let pairs: Vec<_> = parse_suffix("expr=a=b").collect();
        assert_eq!(pairs, vec![("expr", "a=b")]);
    }

    #[test]
    fn test_parse_suffix_empty_key_dropped() {
        let pairs: Vec<_> = parse_suffix("=x;b=2").collect();
        assert_eq!(pairs, vec![("b", "2")]);
    }
}
