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

//! Report source adapters
//!
//! Two ways of obtaining raw report text: a captured report on disk, and a
//! live `iostat` invocation.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use tokio::process::Command;
use tokio::time::timeout;

use crate::domain::SourceError;
use crate::ports::ReportSource;

/// Reads a previously captured report from a file
pub struct FileReportSource {
    /// Path of the captured report
    path: PathBuf,
}

impl FileReportSource {
    /// Create a file source for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ReportSource for FileReportSource {
    async fn fetch(&self) -> Result<String, SourceError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| SourceError::Io(format!("{}: {}", self.path.display(), e)))
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Runs `iostat` and captures one report's worth of output
///
/// The command is `iostat -c -d -x -t -m <interval> <count>`: CPU and
/// extended device statistics with timestamps, in megabytes, sampled `count`
/// times `interval` seconds apart. The execution timeout is sized to the
/// sampling window plus a fixed margin.
pub struct IostatReportSource {
    /// Program to run (normally "iostat", overridable for tests/paths)
    program: String,
    /// Sampling interval in seconds
    interval: u64,
    /// Number of samples to collect
    count: u32,
    /// Margin added to the sampling window for the execution timeout
    margin: Duration,
}

impl IostatReportSource {
    /// Create a live source with the given sampling parameters
    ///
    /// # Arguments
    /// * `interval` - Seconds between samples (minimum 1)
    /// * `count` - Number of samples to collect (minimum 1)
    pub fn new(interval: u64, count: u32) -> Self {
        Self {
            program: "iostat".to_string(),
            interval: interval.max(1),
            count: count.max(1),
            margin: Duration::from_secs(30),
        }
    }

    /// Override the iostat program name or path
    pub fn with_program(mut self, program: &str) -> Self {
        self.program = program.to_string();
        self
    }

    /// Argument vector for the invocation
    fn args(&self) -> Vec<String> {
        vec![
            "-c".to_string(),
            "-d".to_string(),
            "-x".to_string(),
            "-t".to_string(),
            "-m".to_string(),
            self.interval.to_string(),
            self.count.to_string(),
        ]
    }

    /// Total execution timeout: the sampling window plus the margin
    fn execution_timeout(&self) -> Duration {
        Duration::from_secs(self.interval * u64::from(self.count)) + self.margin
    }
}

#[async_trait]
impl ReportSource for IostatReportSource {
    async fn fetch(&self) -> Result<String, SourceError> {
        let args = self.args();
        debug!("Executing: {} {}", self.program, args.join(" "));

        let mut cmd = Command::new(&self.program);
        cmd.args(&args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(Stdio::null());

        let result = timeout(self.execution_timeout(), cmd.output()).await;

        match result {
            Ok(Ok(output)) => {
                if !output.status.success() {
                    return Err(SourceError::CommandFailed {
                        command: self.program.clone(),
                        exit_code: output.status.code(),
                        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                    });
                }
                Ok(String::from_utf8_lossy(&output.stdout).to_string())
            }
            Ok(Err(e)) if e.kind() == ErrorKind::NotFound => {
                Err(SourceError::CommandNotFound(self.program.clone()))
            }
            Ok(Err(e)) => Err(SourceError::Io(format!(
                "Failed to execute '{}': {}",
                self.program, e
            ))),
            Err(_) => Err(SourceError::Timeout(format!(
                "'{}' did not finish within {:?}",
                self.program,
                self.execution_timeout()
            ))),
        }
    }

    fn describe(&self) -> String {
        format!(
            "{} ({}s interval, {} samples)",
            self.program, self.interval, self.count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_file_source_reads_report_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("capture.txt");
        fs::write(&path, "Linux 6.9.8 (host)\n").unwrap();

        let source = FileReportSource::new(&path);
        let text = source.fetch().await.unwrap();
        assert_eq!(text, "Linux 6.9.8 (host)\n");
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let dir = tempdir().unwrap();
        let source = FileReportSource::new(dir.path().join("no_such_capture.txt"));
        match source.fetch().await {
            Err(SourceError::Io(msg)) => assert!(msg.contains("no_such_capture.txt")),
            other => panic!("expected SourceError::Io, got {other:?}"),
        }
    }

    #[test]
    fn test_iostat_source_args() {
        let source = IostatReportSource::new(2, 5);
        assert_eq!(source.args(), ["-c", "-d", "-x", "-t", "-m", "2", "5"]);
    }

    #[test]
    fn test_iostat_source_clamps_zero_parameters() {
        let source = IostatReportSource::new(0, 0);
        assert_eq!(source.interval, 1);
        assert_eq!(source.count, 1);
    }

    #[test]
    fn test_iostat_source_timeout_covers_sampling_window() {
        let source = IostatReportSource::new(2, 5);
        assert!(source.execution_timeout() >= Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_iostat_source_command_not_found() {
        let source =
            IostatReportSource::new(1, 1).with_program("definitely_not_a_real_command_12345");
        match source.fetch().await {
            Err(SourceError::CommandNotFound(cmd)) => {
                assert_eq!(cmd, "definitely_not_a_real_command_12345");
            }
            other => panic!("expected SourceError::CommandNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_iostat_source_command_failure() {
        // "false" exits non-zero with no output on any Unix
        let source = IostatReportSource::new(1, 1).with_program("false");
        match source.fetch().await {
            Err(SourceError::CommandFailed { command, .. }) => assert_eq!(command, "false"),
            other => panic!("expected SourceError::CommandFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_describe() {
        let file = FileReportSource::new("/tmp/capture.txt");
        assert!(file.describe().contains("capture.txt"));

        let live = IostatReportSource::new(1, 3);
        assert!(live.describe().contains("iostat"));
        assert!(live.describe().contains("3 samples"));
    }
}
