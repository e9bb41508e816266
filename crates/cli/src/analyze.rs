//! `shelfcheck analyze` - decode, reconcile, classify, report.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;
use serde::Serialize;
use shelfcheck_core::RawTable;
use shelfcheck_io::{decode_path, DecodeError, HeaderMode};
use shelfcheck_narrative::{
    build_prompt, CandidateChain, GeminiClient, NarrativeError, NarrativeExhausted, NarrativeOutcome,
};
use shelfcheck_recon::report::{narrative_summary, write_csv};
use shelfcheck_recon::{Dashboard, ShelfConfig};

use crate::config::load_config;
use crate::exit_codes::{recon_exit_code, EXIT_DECODE, EXIT_ERROR, EXIT_NARRATIVE_EXHAUSTED};
use crate::CliError;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Sales report (CSV/TSV or Excel), first row is the header
    #[arg(long)]
    pub sales: PathBuf,

    /// Inventory report (CSV/TSV or Excel), positional, no header
    #[arg(long)]
    pub inventory: PathBuf,

    /// TOML config (default: $SHELFCHECK_CONFIG_DIR or <config dir>/shelfcheck, config.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output the dashboard as JSON to stdout instead of tables
    #[arg(long)]
    pub json: bool,

    /// Write the dashboard JSON to a file
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Write the full classified item table as CSV
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Rows shown per table
    #[arg(long, default_value_t = 20)]
    pub limit: usize,

    /// Ask the narrative service for an action plan
    #[arg(long)]
    pub narrative: bool,

    /// API key for the narrative service
    #[arg(long, env = "SHELFCHECK_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

/// What `--json` and `--output` emit: the dashboard plus the narrative when
/// one was produced.
#[derive(Serialize)]
struct AnalyzeReport<'a> {
    #[serde(flatten)]
    dashboard: &'a Dashboard,
    #[serde(skip_serializing_if = "Option::is_none")]
    narrative: Option<NarrativeReport>,
}

#[derive(Serialize)]
struct NarrativeReport {
    target: String,
    text: String,
    failures: Vec<String>,
}

impl From<&NarrativeOutcome> for NarrativeReport {
    fn from(outcome: &NarrativeOutcome) -> Self {
        Self {
            target: outcome.target.clone(),
            text: outcome.text.clone(),
            failures: outcome
                .failures
                .iter()
                .map(|f| format!("{}: {}", f.target, f.error))
                .collect(),
        }
    }
}

pub fn cmd_analyze(args: AnalyzeArgs) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?;

    let sales = decode_input(&args.sales, "sales", HeaderMode::Headered)?;
    let inventory = decode_input(&args.inventory, "inventory", HeaderMode::Headerless)?;

    let dashboard = shelfcheck_recon::run(&sales, &inventory, &config)
        .map_err(|e| CliError::new(recon_exit_code(&e), e.to_string()))?;

    let narrative = args
        .narrative
        .then(|| request_narrative(&dashboard, &config, args.api_key.as_deref()))
        .transpose()?;

    let report = AnalyzeReport {
        dashboard: &dashboard,
        narrative: narrative.as_ref().and_then(|r| r.as_ref().ok()).map(NarrativeReport::from),
    };

    if let Some(ref path) = args.csv {
        let file = std::fs::File::create(path).map_err(|e| CliError::output(path, e))?;
        write_csv(&dashboard.items, file).map_err(|e| CliError::output(path, e))?;
        eprintln!("wrote {}", path.display());
    }

    if args.json || args.output.is_some() {
        let json_str = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::new(EXIT_ERROR, format!("JSON serialization error: {e}")))?;

        if let Some(ref path) = args.output {
            std::fs::write(path, &json_str).map_err(|e| CliError::output(path, e))?;
            eprintln!("wrote {}", path.display());
        }
        if args.json {
            println!("{json_str}");
        }
    }

    if !args.json {
        print!("{}", render_human(&report, args.limit));
    }

    match narrative {
        Some(Err(exhausted)) => Err(narrative_error(exhausted)),
        _ => Ok(()),
    }
}

fn decode_input(path: &Path, role: &str, mode: HeaderMode) -> Result<RawTable, CliError> {
    decode_path(path, mode).map_err(|e| {
        let err = CliError::new(EXIT_DECODE, format!("{role} file {}: {e}", path.display()));
        match e {
            DecodeError::Exhausted { .. } => {
                err.with_hint("expected a CSV/TSV export or an Excel/ODS workbook")
            }
            _ => err,
        }
    })
}

/// Run the candidate chain. The outer error is reserved for setup failures;
/// an exhausted chain is returned as the inner `Err` so the dashboard can
/// still be shown.
fn request_narrative(
    dashboard: &Dashboard,
    config: &ShelfConfig,
    api_key: Option<&str>,
) -> Result<Result<NarrativeOutcome, NarrativeExhausted>, CliError> {
    let n = &config.narrative;
    let client = GeminiClient::new(&n.base_url, api_key.unwrap_or(""), Duration::from_secs(n.timeout_secs))
        .map_err(|e| CliError::new(EXIT_NARRATIVE_EXHAUSTED, e.to_string()))?;
    let chain = CandidateChain::new(n.candidates.clone(), Duration::from_secs(n.rate_limit_pause_secs));

    let prompt = build_prompt(dashboard, n.preview_rows);
    log::debug!("narrative prompt is {} bytes, {} candidate(s)", prompt.len(), chain.candidates().len());

    Ok(chain.generate(&client, &prompt))
}

fn narrative_error(exhausted: NarrativeExhausted) -> CliError {
    let missing_key = exhausted
        .failures
        .iter()
        .any(|f| f.error == NarrativeError::MissingKey);
    let err = CliError::new(EXIT_NARRATIVE_EXHAUSTED, exhausted.to_string());
    if missing_key {
        err.with_hint("pass --api-key or set SHELFCHECK_API_KEY")
    } else {
        err
    }
}

fn render_human(report: &AnalyzeReport<'_>, limit: usize) -> String {
    let d = report.dashboard;
    let t = &d.summary.tier_counts;
    let mut out = format!(
        "shelfcheck {}: {} sales and {} inventory record(s)\n\
         Tiers: A {}  B {}  C {}  D {}\n\
         Total revenue: {:.2}\n",
        d.meta.engine_version,
        d.meta.sales_records,
        d.meta.inventory_records,
        t.a,
        t.b,
        t.c,
        t.d,
        d.summary.total_revenue,
    );
    out.push_str(&narrative_summary(d, limit));

    if let Some(ref narrative) = report.narrative {
        out.push_str(&format!("\nACTION PLAN ({})\n{}\n", narrative.target, narrative.text.trim_end()));
    }
    out
}
