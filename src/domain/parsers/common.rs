/*
Copyright 2024 San Francisco Compute Company

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! Shared lexical building blocks for the report grammar
//!
//! The report format is line-oriented and every construct is disambiguated by
//! its leading token, so the terminals here are anchored regexes applied to a
//! line with its inline indentation stripped. Inline whitespace is not
//! significant anywhere in the format; newlines are.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Report banner, e.g. "Linux 6.9.8-200.fc40.x86_64 (host) ..."
    pub static ref BANNER_RE: Regex = Regex::new(r"^Linux .*").unwrap();
    /// Sample timestamp, e.g. "2024-07-27 01:28:22 AM"
    pub static ref TIMESTAMP_RE: Regex = Regex::new(r"^[0-9]{4}").unwrap();
    /// CPU utilization column header
    pub static ref CPU_HEADER_RE: Regex = Regex::new(r"^avg-cpu").unwrap();
    /// CPU utilization values row (indented in real output)
    pub static ref CPU_VALUES_RE: Regex = Regex::new(r"^[0-9]").unwrap();
    /// Device table column header
    pub static ref DISK_HEADER_RE: Regex = Regex::new(r"^Device").unwrap();
    /// Device table row, led by a lowercase device name
    pub static ref DISK_ENTRY_RE: Regex = Regex::new(r"^[a-z]").unwrap();
}

/// Whether a line is a blank separator (empty or inline whitespace only)
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Classify a line against a leading-token terminal, ignoring indentation
pub fn matches_terminal(line: &str, terminal: &Regex) -> bool {
    terminal.is_match(line.trim_start())
}

/// Sequential scanner over the physical lines of a report
///
/// Keeps a 1-based line number for diagnostics. The grammar driver only ever
/// needs one line of lookahead, which `peek` provides without consuming.
pub struct Cursor<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Segment the input into physical lines
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().collect(),
            pos: 0,
        }
    }

    /// The next unconsumed line, if any
    pub fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    /// Consume and return the next line
    pub fn advance(&mut self) -> Option<&'a str> {
        let line = self.peek();
        if line.is_some() {
            self.pos += 1;
        }
        line
    }

    /// 1-based number of the next unconsumed line
    ///
    /// Past the last line this is one more than the line count, which is the
    /// position reported for end-of-input errors.
    pub fn line_number(&self) -> usize {
        self.pos + 1
    }

    /// Whether all input has been consumed
    pub fn at_end(&self) -> bool {
        self.pos >= self.lines.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminals() {
        assert!(matches_terminal("Linux 6.9.8-200.fc40.x86_64 (host)", &BANNER_RE));
        assert!(matches_terminal("2024-07-27 01:28:22 AM", &TIMESTAMP_RE));
        assert!(matches_terminal("avg-cpu:  %user   %nice", &CPU_HEADER_RE));
        assert!(matches_terminal("          18.37    0.02", &CPU_VALUES_RE));
        assert!(matches_terminal("Device            r/s     rMB/s", &DISK_HEADER_RE));
        assert!(matches_terminal("zram0            1.70      0.01", &DISK_ENTRY_RE));
    }

    #[test]
    fn test_terminals_reject_other_classes() {
        assert!(!matches_terminal("Device            r/s", &DISK_ENTRY_RE));
        assert!(!matches_terminal("2024-07-27 01:28:22 AM", &DISK_ENTRY_RE));
        assert!(!matches_terminal("avg-cpu:  %user", &TIMESTAMP_RE));
        assert!(!matches_terminal("Linux 6.9.8", &TIMESTAMP_RE));
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   \t"));
        assert!(!is_blank("zram0"));
    }

    #[test]
    fn test_cursor_walk() {
        let mut cursor = Cursor::new("one\ntwo\n");
        assert_eq!(cursor.line_number(), 1);
        assert_eq!(cursor.peek(), Some("one"));
        assert_eq!(cursor.advance(), Some("one"));
        assert_eq!(cursor.line_number(), 2);
        assert_eq!(cursor.advance(), Some("two"));
        assert!(cursor.at_end());
        assert_eq!(cursor.advance(), None);
        assert_eq!(cursor.line_number(), 3);
    }

    #[test]
    fn test_cursor_no_trailing_newline() {
        let mut cursor = Cursor::new("only");
        assert_eq!(cursor.advance(), Some("only"));
        assert!(cursor.at_end());
    }

    #[test]
    fn test_cursor_trailing_blank_lines_are_lines() {
        let cursor = Cursor::new("a\n\n");
        assert_eq!(cursor.lines.len(), 2);
    }
}
