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

//! Iostat Report Library
//!
//! This library parses the multi-section textual reports emitted by
//! `iostat -c -d -x -t` into a structured document, using a Ports and
//! Adapters (Hexagonal) architecture for maintainability and testability.
//!
//! # Architecture
//!
//! - **Domain**: report entities, the strict report grammar, field decoding
//! - **Ports**: interfaces for obtaining raw report text and collecting reports
//! - **Adapters**: file and live-command report sources
//!
//! The grammar stage is deliberately all-or-nothing: the report format is
//! machine-generated, so any non-conforming line is surfaced as an error with
//! its line number rather than silently producing a partial document.
//!
//! # Usage
//!
//! ## Parsing captured text
//!
//! ```rust,no_run
//! use iostat_report::IostatReport;
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let text = std::fs::read_to_string("capture.txt")?;
//!     let report = IostatReport::parse(&text)?;
//!     println!("{} samples, first at {}", report.samples.len(), report.samples[0].timestamp);
//!     Ok(())
//! }
//! ```
//!
//! ## Collecting a live report
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use iostat_report::{IostatReportSource, ReportCollectionService, ReportService};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = Arc::new(IostatReportSource::new(1, 3));
//!     let service = ReportCollectionService::new(source);
//!     let report = service.collect().await?;
//!     println!("collected {} samples", report.samples.len());
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;

// Re-export public API
pub use adapters::{FileReportSource, IostatReportSource};
pub use domain::{
    CpuStats, CpuUtilization, DeviceStats, DiskEntry, DiskStats, IostatReport, ParseError,
    ReportCollectionService, ReportError, Sample, SourceError,
};
pub use domain::parsers::{decode_cpu, decode_device, decode_disk_table, parse_report};
pub use ports::{OutputFormat, ReportService, ReportSource};
