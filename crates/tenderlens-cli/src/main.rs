//! CLI entry point for tenderlens.
//!
//! This module is intentionally thin: it handles argument parsing, file I/O, and exit codes.
//! All business logic lives in the `tenderlens-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use tenderlens_app::{
    Dataset, ExplainOutput, ProcessInput, RetryPolicy, WorkMessage, dump_dataset,
    format_explanation, format_not_found, list_indicators, load_dataset, run_explain, run_process,
};
use tenderlens_settings::{Overrides, TenderlensConfigV1, parse_config_toml, resolve_config};
use time::Date;
use time::macros::format_description;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

const DEFAULT_LOG_FILTER: &str = "tenderlens=info";

#[derive(Parser, Debug)]
#[command(
    name = "tenderlens",
    version,
    about = "Fuse, score and classify multi-source procurement records"
)]
struct Cli {
    /// Path to tenderlens config TOML; a missing file means profile defaults.
    #[arg(long, default_value = "tenderlens.toml")]
    config: Utf8PathBuf,

    /// Override profile (full|completeness).
    #[arg(long)]
    profile: Option<String>,

    /// Override an indicator parameter, e.g. `--set indicator.CZ.advertisementPeriod.100.length=30-`.
    #[arg(long = "set", value_name = "KEY=VALUE")]
    set: Vec<String>,

    /// Treat EU-wide tenders above the threshold as eligible (and those below as excluded).
    #[arg(long)]
    eu_wide_above_threshold_eligible: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Process a dataset: fuse bodies, then fuse, score and classify tenders.
    Process {
        /// Dataset JSON file, or a directory whose `*.json` files are merged in path order.
        #[arg(long)]
        dataset: Utf8PathBuf,

        /// Only process these tenders (repeatable).
        #[arg(long = "tender", value_name = "ID")]
        tenders: Vec<String>,

        /// Only process these body groups (repeatable).
        #[arg(long = "body", value_name = "GROUP_ID")]
        bodies: Vec<String>,

        /// Where to write the processed dataset.
        #[arg(long, default_value = "artifacts/tenderlens/dataset.json")]
        out: Utf8PathBuf,

        /// Where to write the run report.
        #[arg(long, default_value = "artifacts/tenderlens/report.json")]
        report_out: Utf8PathBuf,

        /// Worker threads (default: one per core).
        #[arg(long)]
        jobs: Option<usize>,

        /// Reference date for recency rules (YYYY-MM-DD, default: today, UTC).
        #[arg(long)]
        today: Option<String>,

        /// Attempts per message on transient store failures.
        #[arg(long, default_value = "5")]
        attempts: u32,
    },

    /// Parse and resolve the config, then print the effective settings summary.
    ValidateConfig,

    /// Explain an indicator rule by name or indicator type.
    Explain {
        /// Rule name (e.g. "TaxHaven") or indicator type (e.g. "INTEGRITY_TAX_HAVEN").
        identifier: String,
    },

    /// List every indicator rule and the levels it can run at.
    Indicators {
        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Process {
            ref dataset,
            ref tenders,
            ref bodies,
            ref out,
            ref report_out,
            jobs,
            ref today,
            attempts,
        } => {
            let messages = selected_messages(tenders, bodies);
            let code = cmd_process(
                &cli,
                dataset,
                messages,
                out,
                report_out,
                jobs,
                today.as_deref(),
                attempts,
            )?;
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Commands::ValidateConfig => cmd_validate_config(&cli),
        Commands::Explain { ref identifier } => cmd_explain(identifier),
        Commands::Indicators { json } => cmd_indicators(json),
    }
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn selected_messages(tenders: &[String], bodies: &[String]) -> Option<Vec<WorkMessage>> {
    if tenders.is_empty() && bodies.is_empty() {
        return None;
    }
    Some(
        bodies
            .iter()
            .map(WorkMessage::body)
            .chain(tenders.iter().map(WorkMessage::tender))
            .collect(),
    )
}

fn overrides(cli: &Cli) -> anyhow::Result<Overrides> {
    let params = cli
        .set
        .iter()
        .map(|pair| {
            let (key, value) = pair
                .split_once('=')
                .with_context(|| format!("--set expects KEY=VALUE, got: {pair}"))?;
            Ok((key.trim().to_string(), value.trim().to_string()))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(Overrides {
        profile: cli.profile.clone(),
        params,
        eu_wide_above_threshold_eligible: cli.eu_wide_above_threshold_eligible.then_some(true),
    })
}

fn read_config(path: &Utf8Path) -> anyhow::Result<Option<String>> {
    if !path.exists() {
        debug!(config = %path, "no config file; using profile defaults");
        return Ok(None);
    }
    let text = std::fs::read_to_string(path).with_context(|| format!("read config: {path}"))?;
    Ok(Some(text))
}

fn parse_today(text: Option<&str>) -> anyhow::Result<Date> {
    match text {
        Some(text) => Date::parse(text, format_description!("[year]-[month]-[day]"))
            .with_context(|| format!("invalid --today date: {text} (expected YYYY-MM-DD)")),
        None => Ok(time::OffsetDateTime::now_utc().date()),
    }
}

/// Load one dataset file, or merge every `*.json` file under a directory in path order.
fn read_dataset(path: &Utf8Path) -> anyhow::Result<Dataset> {
    if !path.is_dir() {
        let text =
            std::fs::read_to_string(path).with_context(|| format!("read dataset: {path}"))?;
        return load_dataset(&text).with_context(|| format!("load dataset: {path}"));
    }

    let mut merged = Dataset::default();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry.with_context(|| format!("walk dataset directory: {path}"))?;
        let is_json = entry.path().extension().is_some_and(|ext| ext == "json");
        if !entry.file_type().is_file() || !is_json {
            continue;
        }
        let file = entry.path().display().to_string();
        let text =
            std::fs::read_to_string(entry.path()).with_context(|| format!("read dataset: {file}"))?;
        let part = load_dataset(&text).with_context(|| format!("load dataset: {file}"))?;
        debug!(file, tenders = part.tenders.len(), bodies = part.bodies.len(), "dataset part");
        merged.tenders.extend(part.tenders);
        merged.bodies.extend(part.bodies);
        merged.tender_observations.extend(part.tender_observations);
        merged.body_observations.extend(part.body_observations);
        merged.blacklist.extend(part.blacklist);
    }
    Ok(merged)
}

#[allow(clippy::too_many_arguments)]
fn cmd_process(
    cli: &Cli,
    dataset: &Utf8Path,
    messages: Option<Vec<WorkMessage>>,
    out: &Utf8Path,
    report_out: &Utf8Path,
    jobs: Option<usize>,
    today: Option<&str>,
    attempts: u32,
) -> anyhow::Result<i32> {
    let input = ProcessInput {
        dataset: read_dataset(dataset)?,
        config_text: read_config(&cli.config)?,
        overrides: overrides(cli)?,
        messages,
        jobs,
        today: parse_today(today)?,
        retry: RetryPolicy {
            attempts: attempts.max(1),
            ..RetryPolicy::default()
        },
    };

    let output = run_process(input)?;

    write_text_file(out, &dump_dataset(&output.dataset)?).context("write dataset")?;
    let mut report =
        serde_json::to_string_pretty(&output.report).context("serialize report")?;
    report.push('\n');
    write_text_file(report_out, &report).context("write report")?;

    let r = &output.report;
    println!(
        "tenderlens: {} processed ({} bodies, {} tenders: {} eligible, {} excluded, {} already decided), {} failed",
        r.processed,
        r.bodies,
        r.tenders,
        r.eligible,
        r.excluded,
        r.cached,
        r.failed.len()
    );
    for failed in &r.failed {
        eprintln!("tenderlens: {} {} failed: {}", failed.kind, failed.id, failed.error);
    }
    info!(out = %out, report = %report_out, "artifacts written");

    Ok(if r.has_failures() { 2 } else { 0 })
}

fn cmd_validate_config(cli: &Cli) -> anyhow::Result<()> {
    let cfg = match read_config(&cli.config)? {
        Some(text) => parse_config_toml(&text).context("parse config")?,
        None => TenderlensConfigV1::default(),
    };
    let settings = resolve_config(cfg, overrides(cli)?).context("resolve config")?;

    println!("profile: {}", settings.profile);
    println!("tender-level rules: {}", settings.selection.tender_level.join(", "));
    println!("lot-level rules: {}", settings.selection.lot_level.join(", "));
    println!("indicator parameters: {}", settings.params.len());
    println!(
        "eligibility: threshold {} / works {}, {} dedup pair(s)",
        settings.eligibility.threshold,
        settings.eligibility.works_threshold,
        settings.eligibility.dedup.len()
    );
    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_rules,
            available_types,
        } => {
            eprint!(
                "{}",
                format_not_found(&identifier, available_rules, &available_types)
            );
            std::process::exit(1);
        }
    }
}

fn cmd_indicators(json: bool) -> anyhow::Result<()> {
    let listing = list_indicators();
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&listing).context("serialize indicator listing")?
        );
        return Ok(());
    }
    for row in listing {
        let levels = match (row.tender_level, row.lot_level) {
            (true, true) => "tender+lot",
            (true, false) => "tender",
            (false, true) => "lot",
            (false, false) => "-",
        };
        println!("{:<34} {:<10} {}", row.name, levels, row.indicator_type);
    }
    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {path}"))?;
    Ok(())
}
