//! 图表数据序列

use crate::results::{ResultKey, ResultTable};
use plotters::style::RGBColor;

/// 要画的四个指标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Throughput,
    Latency,
    PacketLoss,
    Jitter,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Throughput,
        Metric::Latency,
        Metric::PacketLoss,
        Metric::Jitter,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Metric::Throughput => "Throughput Comparison",
            Metric::Latency => "Latency Comparison",
            Metric::PacketLoss => "Packet Loss Comparison",
            Metric::Jitter => "Jitter Comparison (UDP only)",
        }
    }

    pub fn y_label(self) -> &'static str {
        match self {
            Metric::Throughput => "Throughput (Mbps)",
            Metric::Latency => "Round-Trip Time (ms)",
            Metric::PacketLoss => "Packet Loss (%)",
            Metric::Jitter => "Jitter (ms)",
        }
    }

    /// 单指标图的输出文件名
    pub fn file_name(self) -> &'static str {
        match self {
            Metric::Throughput => "throughput_comparison.png",
            Metric::Latency => "latency_comparison.png",
            Metric::PacketLoss => "packet_loss_comparison.png",
            Metric::Jitter => "jitter_comparison.png",
        }
    }

    pub fn color(self) -> RGBColor {
        match self {
            // steelblue / coral / tomato / mediumseagreen
            Metric::Throughput => RGBColor(70, 130, 180),
            Metric::Latency => RGBColor(255, 127, 80),
            Metric::PacketLoss => RGBColor(255, 99, 71),
            Metric::Jitter => RGBColor(60, 179, 113),
        }
    }

    /// 柱顶数值标注；抖动只标注非零值
    pub fn annotation(self, value: f64) -> Option<String> {
        match self {
            Metric::Jitter if value > 0.0 => Some(format!("{value:.2}")),
            Metric::Jitter => None,
            _ => Some(format!("{value:.1}")),
        }
    }
}

/// 选定 mode 下所有 controller × protocol 的四组数值
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    pub mode: String,
    pub labels: Vec<String>,
    pub throughput: Vec<f64>,
    pub latency: Vec<f64>,
    pub loss: Vec<f64>,
    pub jitter: Vec<f64>,
}

impl ChartSeries {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn values(&self, metric: Metric) -> &[f64] {
        match metric {
            Metric::Throughput => &self.throughput,
            Metric::Latency => &self.latency,
            Metric::PacketLoss => &self.loss,
            Metric::Jitter => &self.jitter,
        }
    }
}

/// 选择要画的 mode：`preferred` 没有任何数据时退回 `fallback`
pub fn select_mode<'a>(table: &ResultTable, preferred: &'a str, fallback: &'a str) -> &'a str {
    if table.has_mode(preferred) {
        preferred
    } else {
        fallback
    }
}

/// 收集 `mode` 下的数据序列；缺失值记 0，非 UDP 的抖动强制为 0
pub fn collect_series(table: &ResultTable, mode: &str) -> ChartSeries {
    let mut series = ChartSeries {
        mode: mode.to_string(),
        ..ChartSeries::default()
    };

    for controller in table.controllers() {
        for protocol in table.protocols(controller, mode) {
            let Some(m) = table.get(controller, mode, protocol) else {
                continue;
            };
            let key = ResultKey::new(controller, mode, protocol);
            series.labels.push(key.label());
            series.throughput.push(m.throughput_mbps.unwrap_or(0.0));
            series.latency.push(m.rtt_avg_ms.unwrap_or(0.0));
            series.loss.push(m.packet_loss_percent.unwrap_or(0.0));
            series.jitter.push(if key.declares_udp() {
                m.jitter_ms.unwrap_or(0.0)
            } else {
                0.0
            });
        }
    }
    series
}
