use std::fmt::Debug;

/// Language-specific rules for qualified names. The storage layer never
/// hardcodes a separator; it splits and joins through whatever convention
/// the embedding front end hands it.
pub trait NamingConvention: Send + Sync + Debug {
    /// The scope separator (e.g. "::" for C++, "." for Java-ish languages).
    fn separator(&self) -> &str;

    /// Split a qualified name into its segments, dropping empty ones so a
    /// leading global qualifier ("::Foo") does not produce a ghost segment.
    fn split<'a>(&self, qualified: &'a str) -> Vec<&'a str> {
        qualified
            .split(self.separator())
            .filter(|segment| !segment.is_empty())
            .collect()
    }

    /// Join segments back into a canonical qualified name.
    fn join(&self, segments: &[&str]) -> String {
        segments.join(self.separator())
    }
}

/// Double-colon convention used by C++-style scopes.
#[derive(Debug)]
pub struct ColonPathConvention;

impl NamingConvention for ColonPathConvention {
    fn separator(&self) -> &str {
        "::"
    }
}

/// Dot convention for Java/Python-ish languages.
#[derive(Debug)]
pub struct DotPathConvention;

impl NamingConvention for DotPathConvention {
    fn separator(&self) -> &str {
        "."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_drops_empty_segments() {
        let convention = ColonPathConvention;
        assert_eq!(convention.split("::network::Connection"), vec!["network", "Connection"]);
        assert_eq!(convention.split("network::"), vec!["network"]);
        assert!(convention.split("").is_empty());
    }

    #[test]
    fn test_join_round_trip() {
        let convention = DotPathConvention;
        let segments = convention.split("com.example.Widget");
        assert_eq!(convention.join(&segments), "com.example.Widget");
    }
}
