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

//! Report grammar recognition
//!
//! Recognizes the line-oriented format emitted by `iostat -c -d -x -t`:
//!
//! ```text
//! document    := banner BLANK sample (BLANK sample)* BLANK*
//! sample      := timestamp cpu_header cpu_values disk_header disk_entry+
//! ```
//!
//! Every construct is identified by its leading token, so a hand-written
//! descent with one line of lookahead suffices; no backtracking is ever
//! needed. Recognition is all-or-nothing: the first line that does not match
//! the expected construct fails the whole parse, and no partial report is
//! returned. Fields are kept as raw text; numeric decoding lives in
//! [`fields`](super::fields).
//!
//! Blank lines are structural. Exactly one separates the banner from the
//! first sample and each sample from the next; only after the last sample is
//! a run of trailing blank lines (or none at all) accepted.

use regex::Regex;

use super::common::{
    is_blank, matches_terminal, Cursor, BANNER_RE, CPU_HEADER_RE, CPU_VALUES_RE, DISK_ENTRY_RE,
    DISK_HEADER_RE, TIMESTAMP_RE,
};
use crate::domain::entities::{CpuStats, DiskEntry, DiskStats, IostatReport, Sample};
use crate::domain::errors::ParseError;

/// Parse one complete report
///
/// # Arguments
/// * `text` - Full text of one iostat invocation's output
///
/// # Returns
/// * `Ok(IostatReport)` - The structured report, samples in source order
/// * `Err(ParseError)` - First line that deviates from the grammar
pub fn parse_report(text: &str) -> Result<IostatReport, ParseError> {
    let mut cursor = Cursor::new(text);

    let header = expect_line(&mut cursor, &BANNER_RE, "report banner (Linux ...)")?;
    expect_blank_line(&mut cursor, "blank line after the report banner")?;

    let mut samples = Vec::new();
    loop {
        samples.push(parse_sample(&mut cursor)?);

        if cursor.at_end() {
            break;
        }
        expect_blank_line(&mut cursor, "blank line after the device table")?;

        // One blank line has been consumed. More blanks are only legal as a
        // trailing run at end-of-input; anywhere else the next sample's
        // timestamp has to follow immediately.
        if let Some(line) = cursor.peek() {
            if is_blank(line) {
                let line_number = cursor.line_number();
                let line = line.to_string();
                while cursor.peek().map(is_blank).unwrap_or(false) {
                    cursor.advance();
                }
                if cursor.at_end() {
                    break;
                }
                return Err(ParseError::GrammarMismatch {
                    line_number,
                    line,
                    expected: "timestamp line starting the next sample",
                });
            }
        } else {
            break;
        }
    }

    Ok(IostatReport { header, samples })
}

/// Parse one sample: timestamp, CPU block, device table, in fixed order
fn parse_sample(cursor: &mut Cursor) -> Result<Sample, ParseError> {
    let timestamp = expect_line(cursor, &TIMESTAMP_RE, "timestamp line (4-digit year)")?;
    let cpu = parse_cpu_stats(cursor)?;
    let disk = parse_disk_stats(cursor)?;
    Ok(Sample {
        timestamp,
        cpu,
        disk,
    })
}

/// Parse the two-line CPU block: header plus exactly one values row
fn parse_cpu_stats(cursor: &mut Cursor) -> Result<CpuStats, ParseError> {
    let header = expect_line(cursor, &CPU_HEADER_RE, "CPU statistics header (avg-cpu)")?;
    let values = expect_line(cursor, &CPU_VALUES_RE, "CPU values line")?;
    Ok(CpuStats { header, values })
}

/// Parse the device table: header plus a greedy run of one-or-more entries
///
/// The run ends at the first blank line or at end-of-input. An empty table is
/// a parse failure, never an empty entries vec.
fn parse_disk_stats(cursor: &mut Cursor) -> Result<DiskStats, ParseError> {
    let header = expect_line(cursor, &DISK_HEADER_RE, "device table header (Device)")?;

    let mut entries = Vec::new();
    loop {
        match cursor.peek() {
            None => break,
            Some(line) if is_blank(line) => break,
            Some(line) if matches_terminal(line, &DISK_ENTRY_RE) => {
                entries.push(DiskEntry {
                    line: line.to_string(),
                });
                cursor.advance();
            }
            Some(line) => {
                return Err(ParseError::GrammarMismatch {
                    line_number: cursor.line_number(),
                    line: line.to_string(),
                    expected: if entries.is_empty() {
                        "device entry"
                    } else {
                        "device entry or blank separator"
                    },
                });
            }
        }
    }

    if entries.is_empty() {
        return Err(match cursor.peek() {
            None => ParseError::IncompleteInput {
                line_number: cursor.line_number(),
                expected: "device entry",
            },
            Some(line) => ParseError::GrammarMismatch {
                line_number: cursor.line_number(),
                line: line.to_string(),
                expected: "device entry",
            },
        });
    }

    Ok(DiskStats { header, entries })
}

/// Consume one line matching the given terminal, or fail
fn expect_line(
    cursor: &mut Cursor,
    terminal: &Regex,
    expected: &'static str,
) -> Result<String, ParseError> {
    match cursor.peek() {
        None => Err(ParseError::IncompleteInput {
            line_number: cursor.line_number(),
            expected,
        }),
        Some(line) if matches_terminal(line, terminal) => {
            cursor.advance();
            Ok(line.to_string())
        }
        Some(line) => Err(ParseError::GrammarMismatch {
            line_number: cursor.line_number(),
            line: line.to_string(),
            expected,
        }),
    }
}

/// Consume one blank separator line, or fail
fn expect_blank_line(cursor: &mut Cursor, expected: &'static str) -> Result<(), ParseError> {
    match cursor.peek() {
        None => Err(ParseError::IncompleteInput {
            line_number: cursor.line_number(),
            expected,
        }),
        Some(line) if is_blank(line) => {
            cursor.advance();
            Ok(())
        }
        Some(line) => Err(ParseError::GrammarMismatch {
            line_number: cursor.line_number(),
            line: line.to_string(),
            expected,
        }),
    }
}
