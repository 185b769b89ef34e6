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

use std::fmt;

/// Fatal grammar-stage errors
///
/// Both variants abort the whole parse: the report format is machine-generated,
/// so a non-conforming line means a format change or truncated input, and no
/// partial document is ever returned. Diagnostic detail travels in the error
/// value; the parser does not log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A line does not match the construct expected at the parser's position
    GrammarMismatch {
        /// 1-based line number of the offending line
        line_number: usize,
        /// The offending line, verbatim
        line: String,
        /// Description of the expected construct
        expected: &'static str,
    },
    /// Input ended in the middle of a construct
    IncompleteInput {
        /// 1-based line number just past the last line of input
        line_number: usize,
        /// Description of the construct that was still expected
        expected: &'static str,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::GrammarMismatch {
                line_number,
                line,
                expected,
            } => {
                write!(
                    f,
                    "line {}: expected {}, found {:?}",
                    line_number, expected, line
                )
            }
            ParseError::IncompleteInput {
                line_number,
                expected,
            } => {
                write!(
                    f,
                    "line {}: input ended while expecting {}",
                    line_number, expected
                )
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Adapter-level errors raised while obtaining the raw report text
#[derive(Debug, Clone)]
pub enum SourceError {
    /// I/O operation failed
    Io(String),
    /// Report command exited unsuccessfully
    CommandFailed {
        command: String,
        exit_code: Option<i32>,
        stderr: String,
    },
    /// Report command binary not found
    CommandNotFound(String),
    /// Report command did not finish in time
    Timeout(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Io(msg) => write!(f, "I/O error: {}", msg),
            SourceError::CommandFailed {
                command,
                exit_code,
                stderr,
            } => {
                write!(f, "Command '{}' failed", command)?;
                if let Some(code) = exit_code {
                    write!(f, " with exit code {}", code)?;
                }
                if !stderr.is_empty() {
                    write!(f, ": {}", stderr)?;
                }
                Ok(())
            }
            SourceError::CommandNotFound(cmd) => write!(f, "Command not found: {}", cmd),
            SourceError::Timeout(msg) => write!(f, "Timeout: {}", msg),
        }
    }
}

impl std::error::Error for SourceError {}

/// Errors surfaced by the report collection service
#[derive(Debug, Clone)]
pub enum ReportError {
    /// Fetching the raw report text failed
    Source(SourceError),
    /// The fetched text does not conform to the report grammar
    Parse(ParseError),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::Source(err) => write!(f, "Report collection failed: {}", err),
            ReportError::Parse(err) => write!(f, "Report parsing failed: {}", err),
        }
    }
}

impl std::error::Error for ReportError {}

impl From<SourceError> for ReportError {
    fn from(err: SourceError) -> Self {
        ReportError::Source(err)
    }
}

impl From<ParseError> for ReportError {
    fn from(err: ParseError) -> Self {
        ReportError::Parse(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grammar_mismatch_display() {
        let err = ParseError::GrammarMismatch {
            line_number: 7,
            line: "avg-cpu:  %user   %nice".to_string(),
            expected: "timestamp line",
        };
        let msg = err.to_string();
        assert!(msg.contains("line 7"));
        assert!(msg.contains("timestamp line"));
        assert!(msg.contains("avg-cpu"));
    }

    #[test]
    fn test_incomplete_input_display() {
        let err = ParseError::IncompleteInput {
            line_number: 4,
            expected: "CPU values line",
        };
        assert_eq!(err.to_string(), "line 4: input ended while expecting CPU values line");
    }

    #[test]
    fn test_report_error_from_parse() {
        let parse = ParseError::IncompleteInput {
            line_number: 1,
            expected: "report banner",
        };
        let report: ReportError = parse.clone().into();
        match report {
            ReportError::Parse(inner) => assert_eq!(inner, parse),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_source_error_display() {
        let err = SourceError::CommandFailed {
            command: "iostat".to_string(),
            exit_code: Some(1),
            stderr: "bad option".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("iostat"));
        assert!(msg.contains("exit code 1"));
        assert!(msg.contains("bad option"));
    }
}
