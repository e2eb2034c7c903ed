use anyhow::Context;
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use dental_correlation::{CorrelationConfig, CorrelationPipeline, StatisticsSummary};
use dental_report::cli::{self, Cli};
use dental_report::config::AppConfig;
use dental_report::fhir::FhirTerminologyClient;
use dental_report::output::CsvReportSink;
use dental_report::store::CsvEventStore;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Cli::parse();
    let mut config = AppConfig::from_env();
    if let Some(url) = &args.fhir_url {
        config.fhir_base_url = url.clone();
    }

    let cardinality = match args.cardinality {
        Some(choice) => cli::cardinality_value(choice),
        None => cli::prompt_cardinality().context("reading cardinality choice")?,
    };
    tracing::info!(cardinality, "selected procedure-site cardinality");

    let client = FhirTerminologyClient::new(&config);

    tracing::info!(url = config.fhir_base_url, "fetching tooth catalog");
    let teeth = client.teeth().context("fetching tooth catalog")?;
    tracing::info!(teeth = teeth.len(), "tooth catalog loaded");

    tracing::info!("fetching tooth-surface catalog");
    let surfaces = client.surfaces().context("fetching tooth-surface catalog")?;
    tracing::info!(surfaces = surfaces.len(), "tooth-surface catalog loaded");

    tracing::info!("fetching initial qualifying treatments");
    let initial_expressions = client
        .initial_expressions(cardinality)
        .context("fetching initial qualifying treatments")?;
    tracing::info!(
        expressions = initial_expressions.len(),
        "initial treatment expressions loaded"
    );

    let store = CsvEventStore::from_path(&args.events)
        .with_context(|| format!("loading patient events from {}", args.events.display()))?;

    let mut sink = CsvReportSink::create(&args.output)
        .with_context(|| format!("creating report file {}", args.output.display()))?;

    let run_config = CorrelationConfig::builder()
        .with_fallback_gap_days(args.fallback_gap_days)
        .build();
    let pipeline = CorrelationPipeline::with_config(&store, &client, &teeth, &surfaces, run_config);

    let report = pipeline.run(&initial_expressions, &mut sink)?;
    sink.flush().context("flushing report file")?;

    tracing::info!(
        processed = report.rows_processed,
        skipped = report.rows_skipped,
        output = %args.output.display(),
        "correlation run complete"
    );

    println!("## Statistics");
    match &report.summary {
        Some(summary) => print_summary(summary),
        None => println!("No durations were eligible for statistics."),
    }
    if report.rows_skipped > 0 {
        println!(
            "{} rows were skipped (no tooth procedure site in the stored expression).",
            report.rows_skipped
        );
    }

    Ok(())
}

fn print_summary(summary: &StatisticsSummary) {
    println!(
        "Average duration of PCE: {} days or {} years",
        summary.mean_days, summary.mean_years
    );
    println!(
        "Duration more than 5 years: {} % ({} of {} events)",
        summary.pct_over_five_years, summary.over_five_years, summary.count
    );
    println!(
        "Duration more than 10 years: {} % ({} of {} events)",
        summary.pct_over_ten_years, summary.over_ten_years, summary.count
    );
}
