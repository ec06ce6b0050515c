//! 测量报告解析
//!
//! 把 iperf3 的 JSON 报告和 ping 的文本输出解析成统一的 [`MetricsRecord`]。

pub mod iperf;
pub mod ping;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use iperf::{iperf_output_looks_ok, parse_iperf_file, parse_iperf_str};
pub use ping::{parse_ping_file, parse_ping_str, ping_output_looks_ok};

/// 报告解析错误
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed iperf3 JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("iperf3 reported an error: {0}")]
    Tool(String),
    #[error("no recognizable summary section in `end`")]
    MissingSummary,
}

/// 报告的协议形态（由 iperf3 summary 的结构推断）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProtocolKind {
    Tcp,
    Udp,
}

/// 单个 (controller, mode, protocol) 组合的指标
///
/// 所有字段都可能缺失：哪些字段存在取决于协议以及哪份报告解析成功。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throughput_mbps: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retransmits: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jitter_ms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lost_packets: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_packets: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packet_loss_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rtt_min_ms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rtt_avg_ms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rtt_max_ms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rtt_mdev_ms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<ProtocolKind>,
}

impl MetricsRecord {
    /// 把 `other` 中存在的字段合并进来（后到者覆盖）
    ///
    /// 例外：`protocol` 一旦设置就不再被覆盖。
    pub fn merge(&mut self, other: MetricsRecord) {
        fn take<T>(dst: &mut Option<T>, src: Option<T>) {
            if src.is_some() {
                *dst = src;
            }
        }

        take(&mut self.throughput_mbps, other.throughput_mbps);
        take(&mut self.retransmits, other.retransmits);
        take(&mut self.jitter_ms, other.jitter_ms);
        take(&mut self.lost_packets, other.lost_packets);
        take(&mut self.total_packets, other.total_packets);
        take(&mut self.packet_loss_percent, other.packet_loss_percent);
        take(&mut self.rtt_min_ms, other.rtt_min_ms);
        take(&mut self.rtt_avg_ms, other.rtt_avg_ms);
        take(&mut self.rtt_max_ms, other.rtt_max_ms);
        take(&mut self.rtt_mdev_ms, other.rtt_mdev_ms);
        if self.protocol.is_none() {
            self.protocol = other.protocol;
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == MetricsRecord::default()
    }
}
