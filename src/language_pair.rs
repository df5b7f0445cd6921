use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

static FILE_NAME_PATTERN: OnceLock<Regex> = OnceLock::new();

fn file_name_pattern() -> &'static Regex {
    FILE_NAME_PATTERN.get_or_init(|| {
        Regex::new(r"^.*\.([A-Za-z0-9_]{2})-([A-Za-z0-9_]{2})\.md$")
            .expect("language pair pattern is valid")
    })
}

/// Source and target language encoded in a note's file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguagePair {
    pub from: String,
    pub to: String,
}

impl LanguagePair {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Extracts the pair from names like `notes.en-fr.md`.
    ///
    /// Returns `None` for every other name; unrelated files are the common case.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let caps = file_name_pattern().captures(name)?;
        Some(Self::new(&caps[1], &caps[2]))
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_both_codes() {
        let pair = LanguagePair::from_file_name("notes.en-fr.md").unwrap();
        assert_eq!(pair, LanguagePair::new("en", "fr"));
    }

    #[test]
    fn prefix_is_ignored() {
        let pair = LanguagePair::from_file_name("week 3. verbs.de-uk.md").unwrap();
        assert_eq!(pair.from, "de");
        assert_eq!(pair.to, "uk");

        let pair = LanguagePair::from_file_name(".ja-en.md").unwrap();
        assert_eq!(pair, LanguagePair::new("ja", "en"));
    }

    #[test]
    fn codes_are_taken_verbatim() {
        let pair = LanguagePair::from_file_name("x.EN-z1.md").unwrap();
        assert_eq!(pair, LanguagePair::new("EN", "z1"));
    }

    #[test]
    fn non_matching_names_are_rejected() {
        for name in [
            "notes.md",
            "en-fr.md",
            "notes.en-fr.txt",
            "notes.eng-fr.md",
            "notes.en-f.md",
            "notes.en_fr.md",
            "notes.en-fr.md.bak",
            "notes.en-fr.MD",
            "notes.é1-fr.md",
            "",
        ] {
            assert_eq!(LanguagePair::from_file_name(name), None, "{name}");
        }
    }

    #[test]
    fn displays_as_code_pair() {
        assert_eq!(LanguagePair::new("en", "fr").to_string(), "en-fr");
    }
}
