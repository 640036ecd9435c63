//! The `explain` and `indicators` use cases: rule documentation and the rule catalogue.

use serde::Serialize;
use tenderlens_indicators::{lot_level_names, tender_level_names};
use tenderlens_types::explain::{self, Explanation};

/// Output from the explain use case.
#[derive(Clone, Debug)]
pub enum ExplainOutput {
    /// Found an explanation for the identifier.
    Found(Explanation),
    /// Unknown identifier; includes the valid rule names and indicator types.
    NotFound {
        identifier: String,
        available_rules: &'static [&'static str],
        available_types: Vec<&'static str>,
    },
}

/// Look up an explanation by rule name (`TaxHaven`) or indicator type (`INTEGRITY_TAX_HAVEN`).
pub fn run_explain(identifier: &str) -> ExplainOutput {
    match explain::lookup_explanation(identifier) {
        Some(exp) => ExplainOutput::Found(exp),
        None => ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            available_rules: explain::all_rule_names(),
            available_types: explain::all_explanations()
                .iter()
                .map(|e| e.indicator_type)
                .collect(),
        },
    }
}

/// Format an explanation for terminal display.
pub fn format_explanation(exp: &Explanation) -> String {
    let mut out = String::new();

    let heading = format!("{} ({})", exp.title, exp.indicator_type);
    out.push_str(&heading);
    out.push('\n');
    out.push_str(&"=".repeat(heading.chars().count()));
    out.push_str("\n\n");
    out.push_str(&format!("Rule: {}\n\n", exp.rule));
    out.push_str(exp.description);
    out.push_str("\n\n");
    out.push_str("Scoring\n");
    out.push_str("-------\n");
    out.push_str(exp.scoring);
    out.push('\n');

    if !exp.config_keys.is_empty() {
        out.push_str("\nConfiguration\n");
        out.push_str("-------------\n");
        for key in exp.config_keys {
            out.push_str(&format!("  {key}\n"));
        }
    }

    out
}

/// Format the "not found" error message for terminal display.
pub fn format_not_found(identifier: &str, rules: &[&'static str], types: &[&'static str]) -> String {
    let mut out = String::new();

    out.push_str(&format!("Unknown rule or indicator type: {identifier}\n\n"));
    out.push_str("Available rules:\n");
    for rule in rules {
        out.push_str(&format!("  - {rule}\n"));
    }
    out.push_str("\nAvailable indicator types:\n");
    for indicator_type in types {
        out.push_str(&format!("  - {indicator_type}\n"));
    }

    out
}

/// One row of the rule catalogue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IndicatorListing {
    pub name: &'static str,
    pub indicator_type: &'static str,
    pub tender_level: bool,
    pub lot_level: bool,
}

/// Every known rule with the levels it can be scheduled at.
pub fn list_indicators() -> Vec<IndicatorListing> {
    let tender = tender_level_names();
    let lot = lot_level_names();
    explain::all_explanations()
        .into_iter()
        .map(|e| IndicatorListing {
            name: e.rule,
            indicator_type: e.indicator_type,
            tender_level: tender.contains(&e.rule),
            lot_level: lot.contains(&e.rule),
        })
        .collect()
}
