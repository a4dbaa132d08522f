//! List command implementation
//!
//! Prints the available filters with their defaults.

use anyhow::Result;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use snapshade_spec::{FilterKind, OutputKind};
use std::process::ExitCode;

use super::json_output::JsonOutput;

/// One filter in the listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterInfo {
    /// Filter name as used in recipes and `--filter`
    pub kind: String,
    /// What the filter produces
    pub output_kind: OutputKind,
    /// One-line description
    pub description: String,
    /// Default parameters, without the `kind` tag
    pub defaults: serde_json::Value,
}

/// Describe every filter.
pub fn filter_infos() -> Result<Vec<FilterInfo>> {
    FilterKind::ALL
        .iter()
        .map(|kind| -> Result<FilterInfo> {
            let mut defaults = serde_json::to_value(kind.default_params())?;
            if let Some(map) = defaults.as_object_mut() {
                map.remove("kind");
            }
            Ok(FilterInfo {
                kind: kind.as_str().to_string(),
                output_kind: kind.output_kind(),
                description: kind.description().to_string(),
                defaults,
            })
        })
        .collect()
}

/// Run the list command
pub fn run(json_output: bool) -> Result<ExitCode> {
    let infos = filter_infos()?;

    if json_output {
        return JsonOutput::success(infos, Vec::new()).emit();
    }

    println!("{}", "Filters:".cyan().bold());
    for info in &infos {
        let output = match info.output_kind {
            OutputKind::Image => "image",
            OutputKind::Text => "text",
        };
        println!(
            "  {:<10} {:<6} {}",
            info.kind.green(),
            output.dimmed(),
            info.description
        );
        if info.defaults.as_object().is_some_and(|m| !m.is_empty()) {
            println!("  {:<10} {}", "", info.defaults.to_string().dimmed());
        }
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_infos_cover_all_filters() {
        let infos = filter_infos().unwrap();
        assert_eq!(infos.len(), FilterKind::ALL.len());

        let ascii = infos.iter().find(|i| i.kind == "ascii").unwrap();
        assert_eq!(ascii.output_kind, OutputKind::Text);
        assert_eq!(ascii.defaults["columns"], 120);
        assert!(ascii.defaults.get("kind").is_none());

        let invert = infos.iter().find(|i| i.kind == "invert").unwrap();
        assert_eq!(invert.defaults, serde_json::json!({}));
    }

    #[test]
    fn test_run() {
        assert_eq!(run(false).unwrap(), ExitCode::SUCCESS);
        assert_eq!(run(true).unwrap(), ExitCode::SUCCESS);
    }
}
