//! 实验结果分析
//!
//! 扫描结果目录，打印汇总表并生成对比图

use clap::Parser;
use protostudy_rs::chart::{ChartLayout, ChartOpts, render_charts};
use protostudy_rs::results::{AggregateOpts, LossPolicy, ResultTable, build_result_table};
use protostudy_rs::summary::render_summary;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Parser)]
#[command(
    name = "analyze-results",
    about = "Aggregate iperf3/ping results and render protocol comparison charts"
)]
struct Args {
    /// Directory holding `<controller>_<mode>_<protocol>_{iperf.json,ping.txt}`
    #[arg(long, default_value = "experiment_results")]
    results_dir: PathBuf,

    /// Directory the PNG charts are written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Only analyze results of this controller
    #[arg(long)]
    controller: Option<String>,

    /// Where packet loss comes from
    #[arg(long, value_enum, default_value_t = LossPolicy::ByProtocol)]
    loss_policy: LossPolicy,

    /// One combined 2x2 chart or one chart per metric
    #[arg(long, value_enum, default_value_t = ChartLayout::Combined)]
    layout: ChartLayout,

    /// Also write the aggregated table as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Skip chart rendering
    #[arg(long)]
    no_plot: bool,
}

fn write_json(path: &Path, table: &ResultTable) -> Result<(), String> {
    let raw = serde_json::to_string_pretty(&table.to_rows()).map_err(|e| e.to_string())?;
    fs::write(path, raw).map_err(|e| format!("{}: {e}", path.display()))
}

fn main() {
    // 初始化 tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();

    let opts = AggregateOpts {
        controller: args.controller.clone(),
        loss_policy: args.loss_policy,
    };

    let table = match build_result_table(&args.results_dir, &opts) {
        Ok(table) => table,
        Err(err) => {
            println!("✗ {err}");
            println!("✗ No results to analyze");
            return;
        }
    };

    print!("{}", render_summary(&table));

    if let Some(path) = &args.json {
        match write_json(path, &table) {
            Ok(()) => println!("\n✓ Saved table: {}", path.display()),
            Err(err) => warn!("⚠ Could not write JSON table: {err}"),
        }
    }

    if args.no_plot {
        return;
    }

    let chart_opts = ChartOpts {
        out_dir: args.out_dir,
        layout: args.layout,
        ..ChartOpts::default()
    };
    match render_charts(&table, &chart_opts) {
        Ok(paths) if paths.is_empty() => println!("\n✗ No data to plot"),
        Ok(paths) => {
            for path in &paths {
                println!("✓ Saved: {}", path.display());
            }
            println!("\n✓ Analysis complete!");
        }
        Err(err) => warn!("⚠ Could not generate plots: {err}"),
    }
}
