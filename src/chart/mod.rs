//! 对比图渲染
//!
//! 从结果表中挑一个 mode（优先 bottleneck，没有则 debug），按
//! controller × protocol 收集吞吐、RTT、丢包率、抖动四组数据，输出 PNG。

mod draw;
mod series;

pub use series::{ChartSeries, Metric, collect_series, select_mode};

use crate::results::ResultTable;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

pub const PREFERRED_MODE: &str = "bottleneck";
pub const FALLBACK_MODE: &str = "debug";

/// 输出布局
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ChartLayout {
    /// 一张 2×2 图：`protocol_comparison_<mode>.png`
    #[default]
    Combined,
    /// 每个指标一张图
    PerMetric,
}

/// 渲染配置
#[derive(Debug, Clone)]
pub struct ChartOpts {
    pub out_dir: PathBuf,
    pub layout: ChartLayout,
    pub preferred_mode: String,
    pub fallback_mode: String,
}

impl Default for ChartOpts {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            layout: ChartLayout::Combined,
            preferred_mode: PREFERRED_MODE.to_string(),
            fallback_mode: FALLBACK_MODE.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("failed to create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("drawing failed: {0}")]
    Draw(String),
}

/// 组合图的文件名
pub fn combined_file_name(mode: &str) -> String {
    format!("protocol_comparison_{mode}.png")
}

/// 渲染对比图，返回写出的文件路径
///
/// 选中的 mode 下没有任何数据时不写文件，返回空列表。
#[tracing::instrument(skip_all, fields(layout = ?opts.layout))]
pub fn render_charts(table: &ResultTable, opts: &ChartOpts) -> Result<Vec<PathBuf>, ChartError> {
    let mode = select_mode(table, &opts.preferred_mode, &opts.fallback_mode);
    if mode != opts.preferred_mode {
        warn!(
            "⚠ No {} mode results found. Using {} mode.",
            opts.preferred_mode, mode
        );
    }

    let series = collect_series(table, mode);
    if series.is_empty() {
        info!("✗ No data to plot");
        return Ok(Vec::new());
    }

    if !opts.out_dir.as_os_str().is_empty() && !opts.out_dir.is_dir() {
        fs::create_dir_all(&opts.out_dir).map_err(|source| ChartError::CreateDir {
            path: opts.out_dir.clone(),
            source,
        })?;
    }

    let mut written = Vec::new();
    match opts.layout {
        ChartLayout::Combined => {
            let path = opts.out_dir.join(combined_file_name(mode));
            draw::draw_combined(&path, &series)?;
            info!("✓ Saved plot: {}", path.display());
            written.push(path);
        }
        ChartLayout::PerMetric => {
            for metric in Metric::ALL {
                let path = opts.out_dir.join(metric.file_name());
                draw::draw_single(&path, &series, metric)?;
                info!("✓ Saved: {}", path.display());
                written.push(path);
            }
        }
    }
    Ok(written)
}
