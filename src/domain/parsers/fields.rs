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

//! Numeric field decoding for parsed report blocks
//!
//! The grammar stage keeps every field as raw text. These functions decode
//! the numbers on demand, driven by the column names in the block headers so
//! that the exact column set of the local iostat version does not matter.

use crate::domain::entities::{CpuStats, CpuUtilization, DeviceStats, DiskEntry, DiskStats};

/// Decode the CPU utilization percentages of a sample
///
/// Column names are taken from the `avg-cpu` header, so field order in the
/// values row does not need to be assumed.
///
/// # Arguments
/// * `stats` - A parsed CPU block
///
/// # Returns
/// * `Ok(CpuUtilization)` - Percentages by name
/// * `Err(String)` - Column/value count mismatch, missing column, or a
///   non-numeric field
pub fn decode_cpu(stats: &CpuStats) -> Result<CpuUtilization, String> {
    // Skip the leading "avg-cpu:" label
    let columns: Vec<&str> = stats.header.split_whitespace().skip(1).collect();
    let values = decode_numbers(&stats.values)?;

    if columns.len() != values.len() {
        return Err(format!(
            "CPU block has {} columns but {} values",
            columns.len(),
            values.len()
        ));
    }

    let field = |name: &str| -> Result<f64, String> {
        columns
            .iter()
            .position(|c| *c == name)
            .map(|i| values[i])
            .ok_or_else(|| format!("CPU column '{name}' not found in header"))
    };

    Ok(CpuUtilization {
        user: field("%user")?,
        nice: field("%nice")?,
        system: field("%system")?,
        iowait: field("%iowait")?,
        steal: field("%steal")?,
        idle: field("%idle")?,
    })
}

/// Decode one device row against its table header
///
/// # Arguments
/// * `header` - The `Device ...` column-name line
/// * `entry` - One device row from the same table
///
/// # Returns
/// * `Ok(DeviceStats)` - Device name plus column/value pairs
/// * `Err(String)` - Column/value count mismatch or a non-numeric field
pub fn decode_device(header: &str, entry: &DiskEntry) -> Result<DeviceStats, String> {
    // Skip the leading "Device" label
    let columns: Vec<String> = header
        .split_whitespace()
        .skip(1)
        .map(|c| c.to_string())
        .collect();

    let mut fields = entry.line.split_whitespace();
    let device = fields
        .next()
        .ok_or_else(|| "Empty device entry".to_string())?
        .to_string();

    let values = fields
        .map(|field| {
            field
                .parse::<f64>()
                .map_err(|_| format!("Invalid numeric field '{field}' for device {device}"))
        })
        .collect::<Result<Vec<f64>, String>>()?;

    if columns.len() != values.len() {
        return Err(format!(
            "Device {} has {} values but the table header names {} columns",
            device,
            values.len(),
            columns.len()
        ));
    }

    Ok(DeviceStats {
        device,
        columns,
        values,
    })
}

/// Decode a whole device table
///
/// # Arguments
/// * `stats` - A parsed device table
///
/// # Returns
/// * `Ok(Vec<DeviceStats>)` - One decoded row per device, in table order
/// * `Err(String)` - First row that fails to decode
pub fn decode_disk_table(stats: &DiskStats) -> Result<Vec<DeviceStats>, String> {
    stats
        .entries
        .iter()
        .map(|entry| decode_device(&stats.header, entry))
        .collect()
}

/// Split a line on whitespace and parse every field as f64
fn decode_numbers(line: &str) -> Result<Vec<f64>, String> {
    line.split_whitespace()
        .map(|field| {
            field
                .parse::<f64>()
                .map_err(|_| format!("Invalid numeric field '{field}'"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cpu_block() -> CpuStats {
        CpuStats {
            header: "avg-cpu:  %user   %nice %system %iowait  %steal   %idle".to_string(),
            values: "          18.37    0.02    6.64    0.54    0.00   74.42".to_string(),
        }
    }

    #[test]
    fn test_decode_cpu() {
        let cpu = decode_cpu(&cpu_block()).unwrap();
        assert_eq!(cpu.user, 18.37);
        assert_eq!(cpu.nice, 0.02);
        assert_eq!(cpu.system, 6.64);
        assert_eq!(cpu.iowait, 0.54);
        assert_eq!(cpu.steal, 0.00);
        assert_eq!(cpu.idle, 74.42);
    }

    #[test]
    fn test_decode_cpu_count_mismatch() {
        let stats = CpuStats {
            header: "avg-cpu:  %user   %nice %system %iowait  %steal   %idle".to_string(),
            values: "          18.37    0.02".to_string(),
        };
        let err = decode_cpu(&stats).unwrap_err();
        assert!(err.contains("6 columns but 2 values"));
    }

    #[test]
    fn test_decode_cpu_bad_number() {
        let stats = CpuStats {
            header: "avg-cpu:  %user   %nice".to_string(),
            values: "          18.37    n/a".to_string(),
        };
        let err = decode_cpu(&stats).unwrap_err();
        assert!(err.contains("n/a"));
    }

    #[test]
    fn test_decode_cpu_missing_column() {
        let stats = CpuStats {
            header: "avg-cpu:  %user   %nice %system %iowait  %steal   %wait".to_string(),
            values: "          18.37    0.02    6.64    0.54    0.00   74.42".to_string(),
        };
        let err = decode_cpu(&stats).unwrap_err();
        assert!(err.contains("%idle"));
    }

    #[test]
    fn test_decode_device() {
        let header = "Device            r/s     rMB/s   %util";
        let entry = DiskEntry {
            line: "nvme0n1          4.04      0.24    1.32".to_string(),
        };
        let stats = decode_device(header, &entry).unwrap();
        assert_eq!(stats.device, "nvme0n1");
        assert_eq!(stats.get("r/s"), Some(4.04));
        assert_eq!(stats.get("rMB/s"), Some(0.24));
        assert_eq!(stats.get("%util"), Some(1.32));
    }

    #[test]
    fn test_decode_device_count_mismatch() {
        let header = "Device            r/s     rMB/s   %util";
        let entry = DiskEntry {
            line: "nvme0n1          4.04".to_string(),
        };
        let err = decode_device(header, &entry).unwrap_err();
        assert!(err.contains("nvme0n1"));
        assert!(err.contains("3 columns"));
    }

    #[test]
    fn test_decode_disk_table() {
        let stats = DiskStats {
            header: "Device            r/s   %util".to_string(),
            entries: vec![
                DiskEntry {
                    line: "dm-0             3.94   1.48".to_string(),
                },
                DiskEntry {
                    line: "zram0            1.70   0.00".to_string(),
                },
            ],
        };
        let decoded = decode_disk_table(&stats).unwrap();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].device, "dm-0");
        assert_eq!(decoded[1].get("%util"), Some(0.00));
    }

    #[test]
    fn test_decode_disk_table_propagates_row_error() {
        let stats = DiskStats {
            header: "Device            r/s   %util".to_string(),
            entries: vec![DiskEntry {
                line: "dm-0             oops   1.48".to_string(),
            }],
        };
        assert!(decode_disk_table(&stats).is_err());
    }
}
