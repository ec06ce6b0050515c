//! 打印一组实验的执行计划（JSON）

use clap::Parser;
use protostudy_rs::experiment::{ExperimentMode, ExperimentOpts, ExperimentPlan};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "experiment-plan",
    about = "Print the iperf3/ping commands and result files for one experiment set"
)]
struct Args {
    /// Controller name (pox, ryu, ...)
    #[arg(long, default_value = "pox")]
    controller: String,
    #[arg(long, value_enum, default_value_t = ExperimentMode::Bottleneck)]
    mode: ExperimentMode,
    #[arg(long, default_value = "experiment_results")]
    output_dir: PathBuf,
    #[arg(long, default_value = "10.0.0.13")]
    server_ip: String,
    /// iperf3 测试时长（秒）
    #[arg(long, default_value_t = 30)]
    duration_secs: u64,
    #[arg(long, default_value_t = 100)]
    ping_count: u64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let opts = ExperimentOpts {
        controller: args.controller,
        mode: args.mode,
        output_dir: args.output_dir,
        server_ip: args.server_ip,
        duration_secs: args.duration_secs,
        ping_count: args.ping_count,
        ..ExperimentOpts::default()
    };

    let plan = ExperimentPlan::new(&opts);
    tracing::info!(runs = plan.runs.len(), mode = plan.mode.as_str(), "实验计划已生成");
    match serde_json::to_string_pretty(&plan) {
        Ok(raw) => println!("{raw}"),
        Err(err) => {
            eprintln!("failed to serialize plan: {err}");
            std::process::exit(1);
        }
    }
}
