//! Offline commands: run the analysis against scenario JSON files.

use std::path::Path;

use anyhow::Context;
use banker_core::{Scenario, report};
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

/// Read a scenario, or a state file exported by the visual frontend.
pub fn load_scenario(path: &Path) -> anyhow::Result<Scenario> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading scenario {}", path.display()))?;
    let scenario = serde_json::from_str(&content)
        .with_context(|| format!("decoding scenario {}", path.display()))?;
    Ok(scenario)
}

/// Print the issues found in a scenario. Returns whether it is free of errors.
pub fn validate(path: &Path, format: Format, summary: bool) -> anyhow::Result<bool> {
    let scenario = load_scenario(path)?;
    let issues = banker_core::validate(&scenario)?;
    let result = banker_core::summary::summarize_issues(&issues);

    match (format, summary) {
        (Format::Json, true) => println!("{}", serde_json::to_string_pretty(&result)?),
        (Format::Json, false) => println!("{}", serde_json::to_string_pretty(&issues)?),
        (Format::Text, true) => println!("{}", report::format_summary(&result)),
        (Format::Text, false) => println!("{}", report::format_issues(&issues)),
    }

    Ok(result.is_valid)
}

pub fn compare(a: &Path, b: &Path, format: Format) -> anyhow::Result<()> {
    let metrics = banker_core::compare(&load_scenario(a)?, &load_scenario(b)?)?;

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&metrics)?),
        Format::Text => println!("{}", report::format_comparison(&metrics)),
    }

    Ok(())
}

pub fn diff(a: &Path, b: &Path, format: Format) -> anyhow::Result<()> {
    let diff = banker_core::diff(&load_scenario(a)?, &load_scenario(b)?)?;

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&diff)?),
        Format::Text => println!("{}", report::format_diff(&diff)),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_scenario(dir: &Path, name: &str, json: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn load_exported_state_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_scenario(
            dir.path(),
            "export.json",
            r#"{"version":"1.0","numProcesses":1,"numResources":1,
                "allocation":[[1]],"max":[[2]],"available":[1],
                "safetyResult":{"isSafe":true,"sequence":[0]},"animationSpeed":500}"#,
        );
        let scenario = load_scenario(&path).unwrap();
        assert_eq!(scenario.num_processes, 1);
        assert!(scenario.safety_result.unwrap().is_safe);
    }

    #[test]
    fn load_reports_path_on_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_scenario(dir.path(), "bad.json", "{");
        let err = load_scenario(&path).unwrap_err();
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn validate_flags_invalid_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_scenario(
            dir.path(),
            "over.json",
            r#"{"numProcesses":1,"numResources":1,"allocation":[[5]],"max":[[3]],"available":[0]}"#,
        );
        assert!(!validate(&path, Format::Json, true).unwrap());
        assert!(!validate(&path, Format::Text, true).unwrap());
    }

    #[test]
    fn summary_in_text_lists_the_errors() {
        let issues = banker_core::validate(
            &serde_json::from_str(
                r#"{"numProcesses":1,"numResources":1,"allocation":[[5]],"max":[[3]],"available":[0]}"#,
            )
            .unwrap(),
        )
        .unwrap();
        let summary = banker_core::summary::summarize_issues(&issues);
        let out = report::format_summary(&summary);
        assert!(out.contains("INVALID"));
        assert!(out.contains("but max is 3"));
    }

    #[test]
    fn validate_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_scenario(
            dir.path(),
            "short.json",
            r#"{"numProcesses":2,"numResources":1,"allocation":[[1]],"max":[[3]],"available":[0]}"#,
        );
        let err = validate(&path, Format::Text, false).unwrap_err();
        assert!(err.to_string().contains("malformed scenario"));
    }
}
