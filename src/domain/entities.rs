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

use serde::{Deserialize, Serialize};

use crate::domain::errors::ParseError;

/// Represents one complete iostat report (root aggregate)
///
/// A report is the full textual output of one `iostat -c -d -x -t` invocation:
/// a banner line followed by one or more timestamped samples. Samples are kept
/// in the order they appear in the source text.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct IostatReport {
    /// Banner line identifying kernel/host/date/architecture/CPU count
    pub header: String,
    /// Timestamped samples, in report order (never empty)
    pub samples: Vec<Sample>,
}

impl IostatReport {
    /// Parse a complete report from raw iostat output
    ///
    /// # Arguments
    /// * `text` - Full text of one iostat invocation's output
    ///
    /// # Returns
    /// * `Ok(IostatReport)` - Fully populated report
    /// * `Err(ParseError)` - Input does not conform to the report grammar
    pub fn parse(text: &str) -> Result<IostatReport, ParseError> {
        crate::domain::parsers::parse_report(text)
    }
}

/// One reporting interval: a timestamp, CPU utilization, and a device table
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Sample {
    /// Timestamp line, raw (no date parsing is performed)
    pub timestamp: String,
    /// CPU utilization block
    pub cpu: CpuStats,
    /// Per-device statistics block
    pub disk: DiskStats,
}

/// CPU utilization block: a column-name header and a single values row
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CpuStats {
    /// Column-name line (starts with `avg-cpu`)
    pub header: String,
    /// The single whitespace-separated values line
    pub values: String,
}

/// Device statistics table: a column-name header and one row per block device
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DiskStats {
    /// Column-name line (starts with `Device`)
    pub header: String,
    /// Device rows, in emission order (never empty)
    pub entries: Vec<DiskEntry>,
}

/// One raw per-device statistics line
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DiskEntry {
    /// The raw line, fields not decomposed
    pub line: String,
}

impl DiskEntry {
    /// The leading device-name token of the row (e.g. "nvme0n1")
    pub fn device(&self) -> &str {
        self.line.split_whitespace().next().unwrap_or("")
    }
}

/// Decoded CPU utilization percentages
///
/// Produced by the field decoder, not by the grammar stage; see
/// [`decode_cpu`](crate::domain::parsers::decode_cpu).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CpuUtilization {
    /// User-space time (%user)
    pub user: f64,
    /// Niced user-space time (%nice)
    pub nice: f64,
    /// Kernel time (%system)
    pub system: f64,
    /// I/O wait time (%iowait)
    pub iowait: f64,
    /// Involuntary wait time (%steal)
    pub steal: f64,
    /// Idle time (%idle)
    pub idle: f64,
}

/// Decoded per-device statistics row
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DeviceStats {
    /// Device name (e.g. "dm-0")
    pub device: String,
    /// Column names from the table header, minus the leading `Device`
    pub columns: Vec<String>,
    /// Numeric values, parallel to `columns`
    pub values: Vec<f64>,
}

impl DeviceStats {
    /// Look up a value by its column name (e.g. "%util")
    pub fn get(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| self.values[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disk_entry_device() {
        let entry = DiskEntry {
            line: "nvme0n1          4.04      0.24     0.06   1.39".to_string(),
        };
        assert_eq!(entry.device(), "nvme0n1");
    }

    #[test]
    fn test_disk_entry_device_empty_line() {
        let entry = DiskEntry { line: String::new() };
        assert_eq!(entry.device(), "");
    }

    #[test]
    fn test_device_stats_lookup() {
        let stats = DeviceStats {
            device: "dm-0".to_string(),
            columns: vec!["r/s".to_string(), "w/s".to_string(), "%util".to_string()],
            values: vec![3.94, 26.29, 1.48],
        };
        assert_eq!(stats.get("%util"), Some(1.48));
        assert_eq!(stats.get("r/s"), Some(3.94));
        assert_eq!(stats.get("missing"), None);
    }
}
