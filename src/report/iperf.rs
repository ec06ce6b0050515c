//! iperf3 JSON 报告解析
//!
//! 只关心 `end` 里的汇总段：
//! - TCP：`sum_sent`（重传数）+ `sum_received`（吞吐）
//! - UDP：`sum`（吞吐、抖动、丢包）
//!
//! 较新的 iperf3 在 UDP 报告里同时输出 `sum` 和 `sum_sent`/`sum_received`，
//! 所以只要出现 `sum` 就按 UDP 处理。

use super::{MetricsRecord, ProtocolKind, ReportError};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

const BITS_PER_MEGABIT: f64 = 1_000_000.0;

#[derive(Debug, Deserialize)]
struct IperfReport {
    #[serde(default)]
    end: Option<IperfEnd>,
    /// iperf3 失败时（例如连不上 server）会在顶层给出 `error`
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IperfEnd {
    #[serde(default)]
    sum_sent: Option<SentSummary>,
    #[serde(default)]
    sum_received: Option<ReceivedSummary>,
    #[serde(default)]
    sum: Option<UdpSummary>,
}

#[derive(Debug, Deserialize)]
struct SentSummary {
    #[serde(default)]
    retransmits: u64,
}

#[derive(Debug, Deserialize)]
struct ReceivedSummary {
    #[serde(default)]
    bits_per_second: f64,
}

#[derive(Debug, Deserialize)]
struct UdpSummary {
    #[serde(default)]
    bits_per_second: f64,
    #[serde(default)]
    jitter_ms: f64,
    #[serde(default)]
    lost_packets: u64,
    #[serde(default)]
    packets: u64,
    #[serde(default)]
    lost_percent: f64,
}

/// 解析 iperf3 JSON 文本
pub fn parse_iperf_str(raw: &str) -> Result<MetricsRecord, ReportError> {
    let report: IperfReport = serde_json::from_str(raw)?;
    let end = match report.end {
        Some(end) => end,
        None => {
            return Err(match report.error {
                Some(msg) => ReportError::Tool(msg),
                None => ReportError::MissingSummary,
            });
        }
    };

    if let Some(sum) = end.sum {
        return Ok(MetricsRecord {
            throughput_mbps: Some(sum.bits_per_second / BITS_PER_MEGABIT),
            jitter_ms: Some(sum.jitter_ms),
            lost_packets: Some(sum.lost_packets),
            total_packets: Some(sum.packets),
            packet_loss_percent: Some(sum.lost_percent),
            protocol: Some(ProtocolKind::Udp),
            ..MetricsRecord::default()
        });
    }

    match (end.sum_sent, end.sum_received) {
        (sent, Some(received)) => Ok(MetricsRecord {
            throughput_mbps: Some(received.bits_per_second / BITS_PER_MEGABIT),
            retransmits: sent.map(|s| s.retransmits),
            protocol: Some(ProtocolKind::Tcp),
            ..MetricsRecord::default()
        }),
        _ => match report.error {
            Some(msg) => Err(ReportError::Tool(msg)),
            None => Err(ReportError::MissingSummary),
        },
    }
}

/// 解析 iperf3 JSON 文件；任何失败都记录日志并返回 `None`
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn parse_iperf_file(path: &Path) -> Option<MetricsRecord> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(source) => {
            let err = ReportError::Io {
                path: path.to_path_buf(),
                source,
            };
            warn!("✗ 解析失败 {}: {err}", path.display());
            return None;
        }
    };
    if !iperf_output_looks_ok(&raw) {
        warn!("⚠ iperf3 输出可疑（包含 error 或过短）: {}", path.display());
    }
    match parse_iperf_str(&raw) {
        Ok(record) => {
            debug!(protocol = ?record.protocol, "iperf3 报告解析完成");
            Some(record)
        }
        Err(err) => {
            warn!("✗ 解析失败 {}: {err}", path.display());
            None
        }
    }
}

/// 实验脚本对 iperf3 输出的健康检查：不含 "error" 且长度超过 100 字节
pub fn iperf_output_looks_ok(raw: &str) -> bool {
    !raw.to_lowercase().contains("error") && raw.len() > 100
}
