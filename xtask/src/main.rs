//! Developer tasks (schema generation, fixture checks, rule documentation coverage).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Get the project root (parent of xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."));

    if manifest_dir.ends_with("xtask") {
        manifest_dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(manifest_dir)
    } else {
        manifest_dir
    }
}

fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

fn fixtures_dir() -> PathBuf {
    project_root().join("tests").join("fixtures")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(tenderlens_settings::TenderlensConfigV1)
}

fn generate_indicator_schema() -> schemars::Schema {
    schema_for!(tenderlens_types::Indicator)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "tenderlens.config.v1.json",
            generate: generate_config_schema,
        },
        SchemaSpec {
            filename: "tenderlens.indicator.v1.json",
            generate: generate_indicator_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Check that schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }
        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }
    for name in &missing {
        eprintln!("  - missing: {name}");
    }
    for name in &mismatched {
        eprintln!("  - out of date: {name}");
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

/// Every fixture config must satisfy the config schema and resolve; every dataset must load.
fn check_fixtures() -> anyhow::Result<()> {
    let root = fixtures_dir();
    if !root.exists() {
        bail!("tests/fixtures/ not found at {}", root.display());
    }

    let mut schema_value = serde_json::to_value(generate_config_schema())
        .context("Failed to convert config schema")?;
    // The validator would try to resolve $id as a URI.
    if let Some(obj) = schema_value.as_object_mut() {
        obj.remove("$id");
    }
    let validator = jsonschema::validator_for(&schema_value)
        .map_err(|e| anyhow::anyhow!("Failed to compile config schema: {e}"))?;

    let mut configs = 0;
    let mut datasets = 0;
    let mut errors = Vec::new();

    for entry in WalkDir::new(&root).sort_by_file_name() {
        let entry = entry.context("Failed to walk tests/fixtures/")?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let name = path.strip_prefix(&root).unwrap_or(path).display().to_string();
        let text =
            fs::read_to_string(path).with_context(|| format!("Failed to read {name}"))?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => {
                configs += 1;
                let value: serde_json::Value = match toml::from_str(&text) {
                    Ok(v) => v,
                    Err(e) => {
                        errors.push(format!("{name}: invalid TOML: {e}"));
                        continue;
                    }
                };
                for err in validator.iter_errors(&value) {
                    errors.push(format!("{name}: schema validation: {err}"));
                }
                let resolved = tenderlens_settings::parse_config_toml(&text).and_then(|cfg| {
                    tenderlens_settings::resolve_config(cfg, Default::default())
                });
                if let Err(e) = resolved {
                    errors.push(format!("{name}: does not resolve: {e:#}"));
                }
            }
            Some("json") => {
                datasets += 1;
                if let Err(e) = tenderlens_app::load_dataset(&text) {
                    errors.push(format!("{name}: {e:#}"));
                }
            }
            _ => {}
        }
    }

    if errors.is_empty() {
        println!("✓ {configs} config fixtures valid");
        println!("✓ {datasets} dataset fixtures load");
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {error}");
        }
        bail!("Fixture check failed with {} errors", errors.len())
    }
}

/// Every registered rule has a complete explanation, and every explanation names a registered rule.
fn explain_coverage() -> anyhow::Result<()> {
    let mut registered = tenderlens_indicators::tender_level_names();
    for name in tenderlens_indicators::lot_level_names() {
        if !registered.contains(&name) {
            registered.push(name);
        }
    }

    let mut errors = Vec::new();
    for rule in &registered {
        match tenderlens_types::lookup_explanation(rule) {
            Some(exp) => {
                if exp.title.is_empty() {
                    errors.push(format!("Rule '{rule}' has empty title"));
                }
                if exp.description.is_empty() {
                    errors.push(format!("Rule '{rule}' has empty description"));
                }
                if exp.scoring.is_empty() {
                    errors.push(format!("Rule '{rule}' has empty scoring"));
                }
            }
            None => errors.push(format!("Rule '{rule}' has no explanation")),
        }
    }
    for rule in tenderlens_types::all_rule_names() {
        if !registered.contains(rule) {
            errors.push(format!("Explained rule '{rule}' is not registered"));
        }
    }

    if errors.is_empty() {
        println!("✓ {} rules have explanations", registered.len());
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {error}");
        }
        bail!(
            "Explain coverage validation failed with {} errors",
            errors.len()
        )
    }
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  check-fixtures    Validate tests/fixtures configs and datasets");
    eprintln!("  explain-coverage  Validate every rule has an explanation");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "check-fixtures" => check_fixtures(),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
