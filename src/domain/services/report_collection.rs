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

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};

use crate::domain::entities::IostatReport;
use crate::domain::errors::ReportError;
use crate::ports::{ReportService, ReportSource};

/// Domain service that collects and parses one report
///
/// Coordinates a [`ReportSource`] with the grammar stage: fetch the raw text,
/// parse it all-or-nothing, hand back the structured report. Parse failures
/// are returned, not logged; diagnostic detail travels in the error value.
pub struct ReportCollectionService {
    /// Source of raw report text
    source: Arc<dyn ReportSource>,
}

impl ReportCollectionService {
    /// Create a new report collection service
    ///
    /// # Arguments
    /// * `source` - Source of raw report text (file, live command, mock)
    pub fn new(source: Arc<dyn ReportSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl ReportService for ReportCollectionService {
    async fn collect(&self) -> Result<IostatReport, ReportError> {
        info!("Collecting report from {}", self.source.describe());
        let text = self.source.fetch().await?;
        debug!("Fetched {} bytes of report text", text.len());

        let report = IostatReport::parse(&text)?;
        debug!(
            "Parsed {} sample(s), {} device(s) in first sample",
            report.samples.len(),
            report.samples[0].disk.entries.len()
        );
        Ok(report)
    }
}
