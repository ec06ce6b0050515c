//! ping 文本输出解析

use super::{MetricsRecord, ReportError};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, warn};

static LOSS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)% packet loss").expect("invalid packet loss regex")
});

// Linux 输出 `rtt min/avg/max/mdev`，BSD/macOS 输出 `round-trip min/avg/max/stddev`
static RTT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:rtt|round-trip) min/avg/max/(?:mdev|stddev) = ([\d.]+)/([\d.]+)/([\d.]+)/([\d.]+)",
    )
    .expect("invalid rtt regex")
});

/// 解析 ping 输出
///
/// 丢包率缺失时记为 0；RTT 四元组只有匹配到才填充。
pub fn parse_ping_str(output: &str) -> MetricsRecord {
    let loss = LOSS_RE
        .captures(output)
        .and_then(|c| c[1].parse::<f64>().ok())
        .unwrap_or(0.0);

    let mut record = MetricsRecord {
        packet_loss_percent: Some(loss),
        ..MetricsRecord::default()
    };

    if let Some(c) = RTT_RE.captures(output) {
        let stats: Result<Vec<f64>, _> = (1..=4).map(|i| c[i].parse::<f64>()).collect();
        match stats.as_deref() {
            Ok([min, avg, max, mdev]) => {
                record.rtt_min_ms = Some(*min);
                record.rtt_avg_ms = Some(*avg);
                record.rtt_max_ms = Some(*max);
                record.rtt_mdev_ms = Some(*mdev);
            }
            _ => debug!(fragment = &c[0], "RTT 统计无法解析为浮点数，忽略"),
        }
    }

    record
}

/// 解析 ping 输出文件；读取失败时记录日志并返回 `None`
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn parse_ping_file(path: &Path) -> Option<MetricsRecord> {
    match fs::read_to_string(path) {
        Ok(output) => {
            if !ping_output_looks_ok(&output) {
                warn!("⚠ ping 输出中没有任何回包: {}", path.display());
            }
            Some(parse_ping_str(&output))
        }
        Err(source) => {
            let err = ReportError::Io {
                path: path.to_path_buf(),
                source,
            };
            warn!("✗ 解析失败 {}: {err}", path.display());
            None
        }
    }
}

/// 至少收到过一个回包
pub fn ping_output_looks_ok(output: &str) -> bool {
    output.contains("bytes from")
}
