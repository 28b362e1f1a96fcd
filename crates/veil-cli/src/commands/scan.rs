use std::collections::BTreeMap;
use std::process::ExitCode;

use anyhow::Result;
use serde::Serialize;
use veil_config::Config;
use veil_core::{Category, DetectionResult};
use veil_security::Detector;

use crate::cli::{CategoryArgs, InputArgs};
use crate::commands::{read_input, settings_for};

/// What `scan --json` prints. Matched values are left out.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub count: usize,
    pub category_counts: BTreeMap<Category, usize>,
    pub matches: Vec<ScanHit>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanHit {
    pub category: Category,
    pub rule_id: String,
    pub start: usize,
    pub end: usize,
}

impl From<&DetectionResult> for ScanReport {
    fn from(detection: &DetectionResult) -> Self {
        Self {
            count: detection.count,
            category_counts: detection.category_counts.clone(),
            matches: detection
                .matches
                .iter()
                .map(|m| ScanHit {
                    category: m.category.clone(),
                    rule_id: m.rule_id.clone(),
                    start: m.start,
                    end: m.end,
                })
                .collect(),
        }
    }
}

/// Exits with failure when anything was found so scripts can gate on it
pub async fn handle(
    input: InputArgs,
    filter: CategoryArgs,
    json: bool,
    config: &Config,
) -> Result<ExitCode> {
    let text = read_input(&input)?;
    let settings = settings_for(&config.settings, &filter);

    let detection = Detector::builtin().detect(
        &text,
        Some(&settings.categories),
        &settings.custom_patterns,
    );

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&ScanReport::from(&detection))?
        );
    } else if detection.is_empty() {
        println!("✓ No secrets found");
    } else {
        println!("⚠ Found {} secret(s)", detection.count);
        for (category, count) in &detection.category_counts {
            println!("  {:<14} {}", category, count);
        }
        println!();
        for m in &detection.matches {
            println!("  {:>6}..{:<6} {:<14} {}", m.start, m.end, m.category, m.rule_id);
        }
    }

    Ok(exit_code(&detection))
}

fn exit_code(detection: &DetectionResult) -> ExitCode {
    if detection.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
