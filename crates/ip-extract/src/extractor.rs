use std::ops::Range;

use bstr::ByteSlice;
use regex_automata::meta::Regex;
use regex_automata::MatchKind;

use crate::Error;

/// Four dot-separated groups of one to three digits. Octet values are not
/// bounded here; `999.1.1.1` is a match.
static DOTTED_QUAD_PATTERN: &str = r"[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}";

/// The address-shaped substrings found on a single line, in text order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineMatches(Vec<String>);

impl LineMatches {
    /// Number of matches on the line.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the line had nothing address-shaped on it.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl From<Vec<String>> for LineMatches {
    fn from(matches: Vec<String>) -> Self {
        LineMatches(matches)
    }
}

impl IntoIterator for LineMatches {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// A searcher for dotted-quad substrings in text.
///
/// The extractor mirrors a plain leftmost-first regex scan: matches never
/// overlap and no boundary checks are made, so `1.2.3.4.5` yields `1.2.3.4`
/// and `1234.5.6.7` yields `234.5.6.7`.
#[derive(Clone, Debug)]
pub struct Extractor {
    regex: Regex,
}

impl Extractor {
    /// Compile the dotted-quad matcher.
    pub fn new() -> Result<Self, Error> {
        let hir = regex_syntax::Parser::new().parse(DOTTED_QUAD_PATTERN)?;
        let regex = Regex::builder()
            .configure(
                Regex::config()
                    .auto_prefilter(true)
                    .match_kind(MatchKind::LeftmostFirst),
            )
            .build_from_hir(&hir)?;
        Ok(Extractor { regex })
    }

    /// Return an iterator of byte ranges of every match in the haystack.
    #[inline]
    pub fn find_iter<'a>(&'a self, haystack: &'a [u8]) -> impl Iterator<Item = Range<usize>> + 'a {
        self.regex.find_iter(haystack).map(|m| m.range())
    }

    /// Collect the matches found on one line.
    pub fn scan_line(&self, line: &[u8]) -> LineMatches {
        self.find_iter(line)
            .map(|range| line[range].to_str_lossy().into_owned())
            .collect::<Vec<_>>()
            .into()
    }

    /// Scan a whole log, producing one entry per line.
    ///
    /// Lines are split on `\n` and a trailing `\r` is ignored. Lines without
    /// any match still get an (empty) entry so the result lines up with the
    /// input.
    pub fn scan(&self, text: &[u8]) -> Vec<LineMatches> {
        text.lines().map(|line| self.scan_line(line)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(line: &str) -> Vec<String> {
        let extractor = Extractor::new().unwrap();
        extractor.scan_line(line.as_bytes()).into_iter().collect()
    }

    #[test]
    fn finds_addresses_in_text_order() {
        assert_eq!(matches("from 1.2.3.4 to 5.6.7.8"), vec!["1.2.3.4", "5.6.7.8"]);
    }

    #[test]
    fn octets_are_not_bounds_checked() {
        assert_eq!(matches("999.999.999.999"), vec!["999.999.999.999"]);
        assert_eq!(matches("x256.1.1.1y"), vec!["256.1.1.1"]);
    }

    #[test]
    fn leftmost_first_without_boundaries() {
        assert_eq!(matches("1.2.3.4.5"), vec!["1.2.3.4"]);
        assert_eq!(matches("1234.5.6.7"), vec!["234.5.6.7"]);
    }

    #[test]
    fn ignores_short_and_partial_quads() {
        assert!(matches("version 1.2.3 build 4").is_empty());
        assert!(matches("1..2.3.4").is_empty());
    }

    #[test]
    fn scan_keeps_one_entry_per_line() {
        let extractor = Extractor::new().unwrap();
        let lines = extractor.scan(b"a 1.1.1.1\r\n\nb 2.2.2.2 3.3.3.3\n");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].as_slice(), ["1.1.1.1"]);
        assert!(lines[1].is_empty());
        assert_eq!(lines[2].len(), 2);
    }

    #[test]
    fn tolerates_invalid_utf8() {
        let extractor = Extractor::new().unwrap();
        let lines = extractor.scan(b"\xff\xfe 8.8.4.4 \xc3\n");
        assert_eq!(lines[0].as_slice(), ["8.8.4.4"]);
    }
}
