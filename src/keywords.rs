use regex::{Regex, RegexBuilder};

/// Phrases that signal the user wants something remembered.
pub const DEFAULT_KEYWORD_PATTERNS: [&str; 16] = [
    "remember",
    "memorize",
    r"save\s+this",
    r"note\s+this",
    r"keep\s+in\s+mind",
    r"don'?t\s+forget",
    r"learn\s+this",
    r"store\s+this",
    r"record\s+this",
    r"make\s+a\s+note",
    r"take\s+note",
    r"jot\s+down",
    r"commit\s+to\s+memory",
    r"remember\s+that",
    r"never\s+forget",
    r"always\s+remember",
];

/// Compiled memory-keyword matcher.
#[derive(Debug, Clone)]
pub struct KeywordDetector {
    patterns: Vec<Regex>,
}

fn compile(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&format!(r"\b(?:{pattern})\b"))
        .case_insensitive(true)
        .build()
}

impl KeywordDetector {
    /// Built-in patterns plus `extra`. Extra patterns that do not compile
    /// are dropped with a warning.
    pub fn new<S: AsRef<str>>(extra: &[S]) -> Self {
        let mut candidates: Vec<&str> = DEFAULT_KEYWORD_PATTERNS.to_vec();
        candidates.extend(extra.iter().map(|p| p.as_ref()));

        let patterns = candidates
            .into_iter()
            .filter_map(|pattern| match compile(pattern) {
                Ok(regex) => Some(regex),
                Err(e) => {
                    tracing::warn!(pattern, error = %e, "ignoring invalid keyword pattern");
                    None
                }
            })
            .collect();

        Self { patterns }
    }

    pub fn detects(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(text))
    }
}

impl Default for KeywordDetector {
    fn default() -> Self {
        Self::new::<&str>(&[])
    }
}
