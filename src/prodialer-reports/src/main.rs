//! ProDialer report runner — loads an exported contact collection, computes
//! the analytics snapshot for one date range and writes the export files.

use anyhow::Context;
use chrono::{DateTime, Local, TimeZone, Utc};
use clap::{Parser, ValueEnum};
use prodialer_core::config::{AppConfig, ExportFormat};
use prodialer_core::{Clock, Contact, ContactSource, JsonFileContacts, SystemClock};
use prodialer_reporting::export::{self, to_csv, to_document, to_json, ExportKind};
use prodialer_reporting::{CallAnalytics, DateRange, ReportWindow};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "prodialer-reports")]
#[command(about = "Call analytics reports and exports for ProDialer")]
#[command(version)]
struct Cli {
    /// JSON array of contact documents, as listed from the document store
    #[arg(long, env = "PRODIALER__CONTACTS")]
    contacts: PathBuf,

    /// Optional TOML config file
    #[arg(long)]
    config: Option<String>,

    /// Date range: 7d, 30d or 90d (overrides config)
    #[arg(long)]
    range: Option<String>,

    /// Directory the export files are written to (overrides config)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Which exports to write (overrides config)
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Also write the snapshot as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Print the dashboard summary to stdout instead of writing exports
    #[arg(long, default_value_t = false)]
    summary: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Pdf,
    Csv,
    Both,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Pdf => Self::Pdf,
            FormatArg::Csv => Self::Csv,
            FormatArg::Both => Self::Both,
        }
    }
}

/// "prodialer" -> "ProDialer Analytics Report"; other names are capitalized.
fn report_title(product: &str) -> String {
    let display = if product.eq_ignore_ascii_case("prodialer") {
        "ProDialer".to_string()
    } else {
        let mut chars = product.chars();
        chars
            .next()
            .map(|c| c.to_uppercase().chain(chars).collect())
            .unwrap_or_default()
    };
    format!("{display} Analytics Report")
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prodialer_reports=info,prodialer_reporting=info".into()),
        )
        .json()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(range) = cli.range {
        config.report.default_range = range;
    }
    if let Some(dir) = cli.output_dir {
        config.export.output_dir = dir.display().to_string();
    }
    if let Some(format) = cli.format {
        config.export.format = format.into();
    }
    if cli.json {
        config.export.include_json = true;
    }

    let range = DateRange::from_code(&config.report.default_range);
    info!(
        product = %config.product_name,
        range = range.code(),
        output_dir = %config.export.output_dir,
        "Configuration loaded"
    );

    let source = JsonFileContacts::new(&cli.contacts);
    let contacts = source
        .list()
        .with_context(|| format!("failed to load contacts from {}", cli.contacts.display()))?;

    let now = SystemClock.now();
    match config.report.fixed_offset() {
        Some(offset) => {
            info!(%offset, "Using fixed calendar offset");
            run(CallAnalytics::new(offset), &config, &contacts, range, now, cli.summary)
        }
        None => run(CallAnalytics::new(Local), &config, &contacts, range, now, cli.summary),
    }
}

fn run<Tz: TimeZone>(
    engine: CallAnalytics<Tz>,
    config: &AppConfig,
    contacts: &[Contact],
    range: DateRange,
    now: DateTime<Utc>,
    summary_only: bool,
) -> anyhow::Result<()> {
    if summary_only {
        let summary = engine.dashboard_summary(contacts, now);
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let window = ReportWindow::new(range, now);
    let snapshot = engine.aggregate(contacts, &window);
    info!(
        total_leads = snapshot.total_leads,
        total_calls = snapshot.total_calls,
        success_rate = snapshot.success_rate,
        "Report computed"
    );

    let dir = PathBuf::from(&config.export.output_dir);
    let product = config.product_name.as_str();

    if config.export.format.includes_csv() {
        let csv = to_csv(contacts, engine.calendar()).context("CSV export failed")?;
        export::save(&dir, product, ExportKind::Csv, range, csv.as_bytes())
            .context("CSV export failed")?;
    }
    if config.export.format.includes_pdf() {
        let pdf = to_document(&snapshot, range.code(), &report_title(product));
        export::save(&dir, product, ExportKind::Pdf, range, &pdf).context("PDF export failed")?;
    }
    if config.export.include_json {
        let json = to_json(&snapshot).context("JSON export failed")?;
        export::save(&dir, product, ExportKind::Json, range, json.as_bytes())
            .context("JSON export failed")?;
    }

    info!("Report exports complete");
    Ok(())
}
