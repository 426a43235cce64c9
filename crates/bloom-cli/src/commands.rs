use std::io;

use anyhow::{Context, Result};
use bloom_cli::config::{ingest_options, resolve_mapping};
use bloom_cli::outcome::RunOutcome;
use bloom_cli::render::{JsonRenderer, RenderView, TableRenderer};
use bloom_core::{ChartContext, ChartData, ChartRenderer, DateNormalizer, TrendEstimator};
use bloom_ingest::read_csv_table_with_options;
use tracing::{debug, warn};

use crate::cli::{ChartArgs, OutputFormatArg, SourceArgs};

pub fn run_chart(args: &ChartArgs) -> Result<RunOutcome> {
    let mut context = build_context(&args.source)?;
    if args.no_trend {
        debug!("trend overlay disabled");
    } else {
        let estimator = TrendEstimator::new(args.degree).context("trend degree")?;
        context = context.with_trend(estimator);
    }
    render(&context, &args.source, RenderView::Chart)
}

pub fn run_dates(args: &SourceArgs) -> Result<RunOutcome> {
    let context = build_context(args)?;
    render(&context, args, RenderView::Dates)
}

fn build_context(args: &SourceArgs) -> Result<ChartContext> {
    let mapping = resolve_mapping(args.mapping.as_deref(), &args.overrides())?;
    debug!(columns = ?mapping.mapped_columns(), "column mapping resolved");
    Ok(ChartContext::new(DateNormalizer::new(mapping)))
}

fn render(context: &ChartContext, args: &SourceArgs, view: RenderView) -> Result<RunOutcome> {
    let options = ingest_options(args.delimiter)?;
    let loaded = read_csv_table_with_options(&args.input, &options);
    let stdout = io::stdout().lock();
    let chart = match args.format {
        OutputFormatArg::Table => draw(context, loaded, &mut TableRenderer::new(stdout, view)),
        OutputFormatArg::Json => draw(context, loaded, &mut JsonRenderer::new(stdout, view)),
    }
    .with_context(|| format!("render {}", args.input.display()))?;
    let outcome = RunOutcome::from_chart(&chart);
    if outcome.all_invalid() {
        warn!(invalid = outcome.invalid, "no row has a usable date");
    }
    Ok(outcome)
}

fn draw<R>(
    context: &ChartContext,
    loaded: Result<bloom_ingest::CsvTable, bloom_ingest::DataLoadError>,
    renderer: &mut R,
) -> Result<ChartData>
where
    R: ChartRenderer<Error = io::Error>,
{
    Ok(context.on_data_ready(loaded, renderer)?)
}
