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

use crate::domain::SourceError;

/// Secondary port - Raw report text acquisition
///
/// The parser itself performs no I/O; implementations of this trait provide
/// the complete text of one report (a captured file, a live command run,
/// a mock in tests).
#[async_trait]
pub trait ReportSource: Send + Sync {
    /// Fetch the complete text of one report
    ///
    /// # Returns
    /// * `Ok(String)` - Full report text, exactly as emitted by the tool
    /// * `Err(SourceError)` - The text could not be obtained
    async fn fetch(&self) -> Result<String, SourceError>;

    /// Short human-readable description of the source, used in log lines
    fn describe(&self) -> String;
}
