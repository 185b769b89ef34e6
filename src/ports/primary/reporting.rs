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

use async_trait::async_trait;

use crate::domain::{IostatReport, ReportError};

/// Serialization formats for a collected report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON via serde_json
    Json,
    /// TOML via the toml crate
    Toml,
}

/// Primary port - Report collection service
///
/// This is the main entry point for collecting and parsing one report from
/// whatever source the service was wired with.
#[async_trait]
pub trait ReportService: Send + Sync {
    /// Fetch the raw report text and parse it into a structured report
    ///
    /// # Returns
    /// * `Ok(IostatReport)` - Fully parsed report
    /// * `Err(ReportError)` - Fetching failed, or the text did not conform
    ///   to the report grammar
    async fn collect(&self) -> Result<IostatReport, ReportError>;
}
