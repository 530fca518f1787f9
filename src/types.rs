use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

static UID_REGEX: OnceLock<Regex> = OnceLock::new();

/// A regex which matches the identity line of a listing entry, e.g.
/// `uid           [ultimate] Jane Doe <jane@example.com>`.
fn uid_regex() -> &'static Regex {
    UID_REGEX.get_or_init(|| Regex::new(r"^uid *\[(.*)\] (.*?)(?: <(.*)>)?$").unwrap())
}

/// One public key entry from the GPG listing output.
///
/// Holds the four raw lines of the entry plus identity fields extracted
/// from the `uid` line at construction time. The extracted fields are a
/// pure function of the `uid` line and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInfo {
    pub_info: String,
    pub_hash: String,
    uid: String,
    sub: String,
    name: String,
    trust_level: String,
    email: String,
}

impl KeyInfo {
    /// Builds a key entry from the four raw listing lines, in the order
    /// GPG emits them: algorithm/date line, fingerprint line, identity
    /// line, subkey line.
    pub fn new(
        pub_info: impl Into<String>,
        pub_hash: impl Into<String>,
        uid: impl Into<String>,
        sub: impl Into<String>,
    ) -> Self {
        let uid = uid.into();
        let (trust_level, name, email) = extract_identity(&uid);

        Self {
            pub_info: pub_info.into(),
            pub_hash: pub_hash.into(),
            uid,
            sub: sub.into(),
            name,
            trust_level,
            email,
        }
    }

    /// Raw algorithm/size/date line.
    pub fn pub_info(&self) -> &str {
        &self.pub_info
    }

    /// Raw fingerprint line.
    pub fn pub_hash(&self) -> &str {
        &self.pub_hash
    }

    /// Raw identity line.
    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// Raw subkey line.
    pub fn sub(&self) -> &str {
        &self.sub
    }

    /// Owner name extracted from the identity line, empty if it did not match.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bracketed trust label extracted from the identity line.
    pub fn trust_level(&self) -> &str {
        &self.trust_level
    }

    /// Email address extracted from the identity line, empty if absent.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Whether the identity line yielded a usable owner name.
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty()
    }
}

impl fmt::Display for KeyInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n      {}\n{}\n{}",
            self.pub_info, self.pub_hash, self.uid, self.sub
        )
    }
}

fn extract_identity(uid: &str) -> (String, String, String) {
    let Some(caps) = uid_regex().captures(uid) else {
        return Default::default();
    };

    let field = |i| caps.get(i).map_or("", |m| m.as_str()).trim().to_string();
    (field(1), field(2), field(3))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_with_uid(uid: &str) -> KeyInfo {
        KeyInfo::new(
            "pub   rsa4096 2014-08-29 [SC]",
            "6645B0A8C7005E78DB1D7864F99FFE0FEAE999BD",
            uid,
            "sub   rsa4096 2014-08-29 [E]",
        )
    }

    #[test]
    fn test_uid_with_email() {
        let key = key_with_uid("uid           [ultimate] Jane Doe <jane@example.com>");
        assert_eq!(key.name(), "Jane Doe");
        assert_eq!(key.trust_level(), "ultimate");
        assert_eq!(key.email(), "jane@example.com");
        assert!(key.is_valid());
    }

    #[test]
    fn test_uid_without_email() {
        let key = key_with_uid("uid [unknown] NoEmail");
        assert_eq!(key.name(), "NoEmail");
        assert_eq!(key.trust_level(), "unknown");
        assert_eq!(key.email(), "");
        assert!(key.is_valid());
    }

    #[test]
    fn test_uid_with_multi_word_name_and_bracketed_comment() {
        let key = key_with_uid("uid [ full  ] Build System (nightly) <builder@example.org>");
        assert_eq!(key.name(), "Build System (nightly)");
        assert_eq!(key.trust_level(), "full");
        assert_eq!(key.email(), "builder@example.org");
    }

    #[test]
    fn test_uid_no_match() {
        let key = key_with_uid("not an identity line");
        assert_eq!(key.name(), "");
        assert_eq!(key.trust_level(), "");
        assert_eq!(key.email(), "");
        assert!(!key.is_valid());
    }

    #[test]
    fn test_raw_lines_preserved() {
        let key = key_with_uid("uid [ultimate] Jane Doe <jane@example.com>");
        assert_eq!(key.pub_info(), "pub   rsa4096 2014-08-29 [SC]");
        assert_eq!(key.pub_hash(), "6645B0A8C7005E78DB1D7864F99FFE0FEAE999BD");
        assert_eq!(key.sub(), "sub   rsa4096 2014-08-29 [E]");
        assert!(key.uid().starts_with("uid "));
    }

    #[test]
    fn test_display_renders_all_four_lines() {
        let key = key_with_uid("uid [ultimate] Jane Doe <jane@example.com>");
        let rendered = key.to_string();
        assert_eq!(rendered.lines().count(), 4);
        assert!(rendered.contains("6645B0A8C7005E78DB1D7864F99FFE0FEAE999BD"));
    }
}
