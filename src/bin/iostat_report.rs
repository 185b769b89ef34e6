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

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use iostat_report::{
    decode_cpu, decode_device, FileReportSource, IostatReportSource, ReportCollectionService,
    ReportService, ReportSource,
};
use structopt::StructOpt;

#[derive(Debug)]
enum FileFormat {
    TOML,
    JSON,
}

impl std::str::FromStr for FileFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "TOML" => Ok(FileFormat::TOML),
            "JSON" => Ok(FileFormat::JSON),
            _ => Err("File format must be either 'toml' or 'json'".to_string()),
        }
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            FileFormat::TOML => write!(f, "TOML"),
            FileFormat::JSON => write!(f, "JSON"),
        }
    }
}

#[derive(StructOpt)]
#[structopt(name = "iostat_report")]
struct Opt {
    /// Parse a captured report file instead of running iostat
    #[structopt(long)]
    input: Option<PathBuf>,

    /// Sampling interval in seconds when running iostat
    #[structopt(long, default_value = "1")]
    interval: u64,

    /// Number of samples to collect when running iostat
    #[structopt(long, default_value = "3")]
    count: u32,

    /// iostat program name or path
    #[structopt(long, default_value = "iostat")]
    iostat_path: String,

    /// Write the parsed report to the given file
    #[structopt(long)]
    output: Option<PathBuf>,

    /// Output file format (toml or json)
    #[structopt(long, default_value = "toml")]
    file_format: FileFormat,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let opt = Opt::from_args();

    let source: Arc<dyn ReportSource> = match &opt.input {
        Some(path) => Arc::new(FileReportSource::new(path)),
        None => Arc::new(
            IostatReportSource::new(opt.interval, opt.count).with_program(&opt.iostat_path),
        ),
    };

    let service = ReportCollectionService::new(source);
    let report = service.collect().await?;

    println!("Report Summary:");
    println!("==============");
    println!("{}", report.header);
    println!("Samples: {}", report.samples.len());

    for sample in &report.samples {
        println!("\n{}", sample.timestamp);

        match decode_cpu(&sample.cpu) {
            Ok(cpu) => println!(
                "  CPU: {:.2}% user, {:.2}% system, {:.2}% iowait, {:.2}% idle",
                cpu.user, cpu.system, cpu.iowait, cpu.idle
            ),
            // The grammar has already accepted the line; show it raw rather
            // than fail the summary over an unexpected column set.
            Err(_) => println!("  CPU: {}", sample.cpu.values.trim()),
        }

        for entry in &sample.disk.entries {
            match decode_device(&sample.disk.header, entry) {
                Ok(stats) => {
                    let util = stats
                        .get("%util")
                        .map(|v| format!("{v:.2}%"))
                        .unwrap_or_else(|| "n/a".to_string());
                    let reads = stats
                        .get("r/s")
                        .map(|v| format!("{v:.2}"))
                        .unwrap_or_else(|| "n/a".to_string());
                    let writes = stats
                        .get("w/s")
                        .map(|v| format!("{v:.2}"))
                        .unwrap_or_else(|| "n/a".to_string());
                    println!(
                        "  {} - {} r/s, {} w/s, {} util",
                        stats.device, reads, writes, util
                    );
                }
                Err(_) => println!("  {}", entry.line.trim()),
            }
        }
    }

    if let Some(output_path) = &opt.output {
        let output_string = match opt.file_format {
            FileFormat::TOML => toml::to_string_pretty(&report)?,
            FileFormat::JSON => serde_json::to_string_pretty(&report)?,
        };

        std::fs::write(output_path, output_string)?;
        println!(
            "\nParsed report has been written to {} ({})",
            output_path.display(),
            opt.file_format
        );
    }

    Ok(())
}
