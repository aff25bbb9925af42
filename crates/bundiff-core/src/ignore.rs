//! Caller-supplied ignore patterns.
//!
//! One configuration string holds any number of glob patterns separated by
//! `;` or `,`, e.g. `"Bundle-Description, *.txt; !keep.txt"`. The same set
//! is applied to manifest header names and to resource paths.
//!
//! A leading `!` negates a pattern. Patterns are tried in order and the
//! first one that matches decides, so `"!keep.txt,*.txt"` ignores every
//! text file except `keep.txt`. A pattern without `/` is also tried against
//! the last path segment, so `*.txt` covers `a/b/x.txt`.
//!
//! Separators inside `[...]` or `{...}` belong to the pattern, so
//! `*.{txt,md}` is one pattern. `\` escapes the next character, e.g.
//! `notes\*.txt` matches only the literal name `notes*.txt`.

use crate::errors::{BundiffError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
struct IgnoreRule {
    pattern: String,
    negated: bool,
}

impl IgnoreRule {
    fn matches(&self, subject: &str) -> bool {
        if glob_match::glob_match(&self.pattern, subject) {
            return true;
        }
        if self.pattern.contains('/') {
            return false;
        }
        subject
            .rsplit_once('/')
            .is_some_and(|(_, file_name)| glob_match::glob_match(&self.pattern, file_name))
    }
}

/// A checked ignore pattern set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreSet {
    rules: Vec<IgnoreRule>,
}

impl IgnoreSet {
    /// Parse a pattern string. Empty segments are skipped.
    ///
    /// # Errors
    ///
    /// `InvalidPattern` naming the first pattern with an unbalanced `[`, `{`
    /// or `}`, or a trailing `\`.
    pub fn parse(text: &str) -> Result<Self> {
        let mut rules = Vec::new();

        for raw in split_patterns(text)
            .into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            let (negated, pattern) = match raw.strip_prefix('!') {
                Some(rest) => (true, rest.trim()),
                None => (false, raw),
            };
            check_pattern(pattern).map_err(|reason| BundiffError::InvalidPattern {
                pattern: raw.to_string(),
                reason,
            })?;
            rules.push(IgnoreRule {
                pattern: pattern.to_string(),
                negated,
            });
        }

        Ok(Self { rules })
    }

    /// Whether `subject` (a header name or resource path) is ignored.
    pub fn matches(&self, subject: &str) -> bool {
        self.rules
            .iter()
            .find(|rule| rule.matches(subject))
            .is_some_and(|rule| !rule.negated)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The patterns in evaluation order, `!` restored on negated ones.
    pub fn patterns(&self) -> Vec<String> {
        self.rules
            .iter()
            .map(|r| {
                if r.negated {
                    format!("!{}", r.pattern)
                } else {
                    r.pattern.clone()
                }
            })
            .collect()
    }
}

/// Split on `;` and `,` outside character classes and alternations.
fn split_patterns(text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut scan = GlobScan::default();
    let mut start = 0;
    for (index, c) in text.char_indices() {
        if matches!(c, ';' | ',') && scan.at_top_level() {
            segments.push(&text[start..index]);
            start = index + c.len_utf8();
            continue;
        }
        // Unbalanced input is reported by `check_pattern`.
        let _ = scan.step(c);
    }
    segments.push(&text[start..]);
    segments
}

fn check_pattern(pattern: &str) -> std::result::Result<(), String> {
    if pattern.is_empty() {
        return Err("empty pattern".to_string());
    }
    let mut scan = GlobScan::default();
    for c in pattern.chars() {
        scan.step(c)?;
    }
    if scan.escaped {
        Err("trailing '\\'".to_string())
    } else if scan.in_class {
        Err("unclosed '['".to_string())
    } else if scan.depth > 0 {
        Err("unclosed '{'".to_string())
    } else {
        Ok(())
    }
}

#[derive(Debug, Default)]
struct GlobScan {
    escaped: bool,
    in_class: bool,
    depth: usize,
}

impl GlobScan {
    fn at_top_level(&self) -> bool {
        !self.escaped && !self.in_class && self.depth == 0
    }

    fn step(&mut self, c: char) -> std::result::Result<(), String> {
        if self.escaped {
            self.escaped = false;
            return Ok(());
        }
        match c {
            '\\' => self.escaped = true,
            '[' if !self.in_class => self.in_class = true,
            ']' if self.in_class => self.in_class = false,
            '{' if !self.in_class => self.depth += 1,
            '}' if !self.in_class => {
                if self.depth == 0 {
                    return Err("unmatched '}'".to_string());
                }
                self.depth -= 1;
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_separators() {
        let set = IgnoreSet::parse("Bundle-Description; *.txt, docs/**").unwrap();
        assert_eq!(set.patterns().len(), 3);
        assert!(set.matches("Bundle-Description"));
        assert!(set.matches("x.txt"));
        assert!(set.matches("a/b/x.txt"));
        assert!(set.matches("docs/index.html"));
        assert!(!set.matches("Bundle-Name"));
    }

    #[test]
    fn test_first_match_wins() {
        let set = IgnoreSet::parse("!keep.txt,*.txt").unwrap();
        assert!(!set.matches("keep.txt"));
        assert!(set.matches("drop.txt"));

        let reversed = IgnoreSet::parse("*.txt,!keep.txt").unwrap();
        assert!(reversed.matches("keep.txt"));
    }

    #[test]
    fn test_blank_input_matches_nothing() {
        let set = IgnoreSet::parse(" ; , ").unwrap();
        assert!(set.is_empty());
        assert!(!set.matches("anything"));
    }

    #[test]
    fn test_invalid_glob() {
        let err = IgnoreSet::parse("ok,[unclosed").unwrap_err();
        assert!(matches!(
            err,
            BundiffError::InvalidPattern { ref pattern, .. } if pattern == "[unclosed"
        ));
    }

    #[test]
    fn test_nested_path_patterns() {
        let set = IgnoreSet::parse("META-INF/maven/**, docs/*.md").unwrap();
        assert!(set.matches("META-INF/maven/acme/pom.xml"));
        assert!(set.matches("docs/notes.md"));
        assert!(!set.matches("docs/deep/notes.md"));
        assert!(!set.matches("notes.md"));
    }

    #[test]
    fn test_alternation_keeps_its_commas() {
        let set = IgnoreSet::parse("*.{txt,md}, Tool; docs/{a,b}/**").unwrap();
        assert_eq!(set.patterns(), ["*.{txt,md}", "Tool", "docs/{a,b}/**"]);
        assert!(set.matches("x.txt"));
        assert!(set.matches("sub/y.md"));
        assert!(!set.matches("z.rs"));
        assert!(set.matches("docs/b/index.html"));
        assert!(!set.matches("docs/c/index.html"));

        assert!(IgnoreSet::parse("*.{txt,md").is_err());
        assert!(IgnoreSet::parse("a}").is_err());
    }

    #[test]
    fn test_backslash_escapes_metacharacters() {
        let set = IgnoreSet::parse(r"notes\*.txt").unwrap();
        assert_eq!(set.patterns(), [r"notes\*.txt"]);
        assert!(set.matches("notes*.txt"));
        assert!(!set.matches("notes-1.txt"));

        assert!(IgnoreSet::parse(r"bad\").is_err());
    }

    #[test]
    fn test_negated_empty_pattern() {
        assert!(IgnoreSet::parse("!").is_err());
    }

    #[test]
    fn test_case_sensitive() {
        let set = IgnoreSet::parse("Tool").unwrap();
        assert!(set.matches("Tool"));
        assert!(!set.matches("tool"));
    }
}
