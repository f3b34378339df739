//! Bench Chart - grouped bar charts of benchmark timings
//!
//! Loads timings (built-in sample, CSV, JSON or a Criterion output directory),
//! draws one bar series per implementation with value labels, and shows the
//! chart in a window or writes it to PNG/SVG.

mod charts;
mod config;
mod data;
mod gui;
mod telemetry;

use anyhow::{Context, Result};
use charts::{ChartData, ChartRenderer, StaticChartExporter};
use clap::Parser;
use config::ChartConfig;
use data::{CriterionLoader, DataLayout, DataLoader, SeriesSpec, Statistic, TimeUnit};
use eframe::egui;
use gui::BenchChartApp;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "bench_chart")]
#[command(about = "Grouped bar chart of benchmark timings with per-bar value labels")]
struct Args {
    /// CSV or JSON file with categories and series (sample data when omitted)
    input: Option<PathBuf>,

    /// Table layout of a CSV input
    #[arg(long, value_enum, default_value_t = DataLayout::Wide)]
    layout: DataLayout,

    /// Criterion output directory, e.g. target/criterion
    #[arg(long, conflicts_with = "input")]
    criterion: Option<PathBuf>,

    /// Series to read from --criterion, as NAME=GROUP (repeatable)
    #[arg(long = "series", value_parser = parse_series_spec, requires = "criterion")]
    series: Vec<SeriesSpec>,

    /// Criterion estimate used as bar height
    #[arg(long, value_enum, default_value_t = Statistic::Mean)]
    statistic: Statistic,

    /// Time unit for Criterion values
    #[arg(long, value_enum, default_value_t = TimeUnit::Ms)]
    unit: TimeUnit,

    /// JSON chart configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Chart title
    #[arg(long)]
    title: Option<String>,

    /// Y-axis label
    #[arg(long)]
    y_label: Option<String>,

    /// Don't draw value labels above bars
    #[arg(long)]
    no_labels: bool,

    /// Write the chart to a .png or .svg file instead of opening a window
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Open the written file with the system viewer
    #[arg(long, requires = "output")]
    open: bool,
}

fn parse_series_spec(raw: &str) -> Result<SeriesSpec, String> {
    raw.parse().map_err(|e: data::CriterionError| e.to_string())
}

fn load_config(args: &Args) -> Result<ChartConfig> {
    let mut config = match &args.config {
        Some(path) => ChartConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ChartConfig::default(),
    };
    if args.no_labels {
        config.show_value_labels = false;
    }
    Ok(config)
}

fn load_data(args: &Args, config: &ChartConfig) -> Result<ChartData> {
    let mut data = if let Some(root) = &args.criterion {
        let loader = CriterionLoader {
            statistic: args.statistic,
            unit: args.unit,
            ..CriterionLoader::new(root)
        };
        loader
            .load(&args.series, config)
            .with_context(|| format!("reading criterion results from {}", root.display()))?
    } else if let Some(path) = &args.input {
        DataLoader::load(path, args.layout, config)
            .with_context(|| format!("loading {}", path.display()))?
    } else {
        info!("no input given, using sample data");
        ChartData::sample()
    };

    // Command-line text beats anything carried by the data
    if let Some(title) = &args.title {
        data.title = Some(title.clone());
    }
    if let Some(label) = &args.y_label {
        data.y_label = Some(label.clone());
    }
    Ok(data)
}

fn main() -> Result<()> {
    telemetry::init_default_tracing();
    let args = Args::parse();

    let config = load_config(&args)?;
    let data = load_data(&args, &config)?;

    let figure = ChartRenderer::from_config(&config)
        .figure(&data)
        .context("rendering chart")?;
    info!(
        bars = figure.bar_count(),
        labels = figure.labels.len(),
        "chart rendered"
    );

    if let Some(output) = &args.output {
        StaticChartExporter::save(&figure, output, (config.width, config.height))
            .with_context(|| format!("writing {}", output.display()))?;
        if args.open {
            open::that(output).with_context(|| format!("opening {}", output.display()))?;
        }
        return Ok(());
    }

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 760.0])
            .with_min_inner_size([800.0, 500.0])
            .with_title("Bench Chart"),
        ..Default::default()
    };

    // Blocks until the window is closed
    eframe::run_native(
        "Bench Chart",
        options,
        Box::new(move |cc| Ok(Box::new(BenchChartApp::new(cc, data, config, figure)))),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_uses_sample_data() {
        let args = Args::try_parse_from(["bench_chart"]).unwrap();
        let config = load_config(&args).unwrap();
        let data = load_data(&args, &config).unwrap();
        assert_eq!(data, ChartData::sample());
        assert!(config.show_value_labels);
    }

    #[test]
    fn text_flags_override_data() {
        let args = Args::try_parse_from([
            "bench_chart",
            "--title",
            "Deletion",
            "--y-label",
            "Time (s)",
            "--no-labels",
        ])
        .unwrap();
        let config = load_config(&args).unwrap();
        let data = load_data(&args, &config).unwrap();
        assert_eq!(data.title.as_deref(), Some("Deletion"));
        assert_eq!(data.y_label.as_deref(), Some("Time (s)"));
        assert!(!config.show_value_labels);
    }

    #[test]
    fn series_flags_need_criterion_dir() {
        assert!(Args::try_parse_from(["bench_chart", "--series", "RBTree=g"]).is_err());

        let args = Args::try_parse_from([
            "bench_chart",
            "--criterion",
            "target/criterion",
            "--series",
            "RBTree=Red_Black_Tree_insert",
            "--series",
            "AVL=AVL_Tree_insert",
            "--unit",
            "us",
        ])
        .unwrap();
        assert_eq!(args.series.len(), 2);
        assert_eq!(args.series[1].group, "AVL_Tree_insert");
        assert_eq!(args.unit, TimeUnit::Us);
    }

    #[test]
    fn input_and_criterion_conflict() {
        assert!(Args::try_parse_from([
            "bench_chart",
            "results.csv",
            "--criterion",
            "target/criterion"
        ])
        .is_err());
    }

    #[test]
    fn open_requires_output() {
        assert!(Args::try_parse_from(["bench_chart", "--open"]).is_err());
        let args = Args::try_parse_from(["bench_chart", "-o", "chart.svg", "--layout", "long"]).unwrap();
        assert_eq!(args.layout, DataLayout::Long);
    }

    #[test]
    fn args_definition_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
