//! 结果文件命名约定
//!
//! `<controller>_<mode>_<protocol>_iperf.json` 与同名的 `_ping.txt`。

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub const IPERF_SUFFIX: &str = "_iperf.json";
pub const PING_SUFFIX: &str = "_ping.txt";

/// 汇总表展示时的固定协议顺序，其他协议排在后面
pub const KNOWN_PROTOCOLS: [&str; 3] = ["reno", "cubic", "udp"];

/// 结果表的键：(controller, mode, protocol)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResultKey {
    pub controller: String,
    pub mode: String,
    pub protocol: String,
}

impl ResultKey {
    pub fn new(
        controller: impl Into<String>,
        mode: impl Into<String>,
        protocol: impl Into<String>,
    ) -> Self {
        Self {
            controller: controller.into(),
            mode: mode.into(),
            protocol: protocol.into(),
        }
    }

    /// 从 iperf 报告文件名恢复键
    ///
    /// 去掉后缀后按 `_` 切分，不足三段返回 `None`；多出的段被忽略。
    pub fn from_iperf_file_name(name: &str) -> Option<Self> {
        let stem = name.strip_suffix(IPERF_SUFFIX)?;
        let mut parts = stem.split('_');
        let controller = parts.next()?;
        let mode = parts.next()?;
        let protocol = parts.next()?;
        Some(Self::new(controller, mode, protocol))
    }

    pub fn iperf_file_name(&self) -> String {
        format!("{}_{}_{}{IPERF_SUFFIX}", self.controller, self.mode, self.protocol)
    }

    pub fn ping_file_name(&self) -> String {
        format!("{}_{}_{}{PING_SUFFIX}", self.controller, self.mode, self.protocol)
    }

    /// 文件名里声明的协议是否为 UDP（不看报告内容）
    pub fn declares_udp(&self) -> bool {
        protocol_is_udp(&self.protocol)
    }

    /// 图表标签 `<controller>-<protocol>`
    pub fn label(&self) -> String {
        format!("{}-{}", self.controller, self.protocol)
    }
}

pub fn protocol_is_udp(protocol: &str) -> bool {
    protocol.eq_ignore_ascii_case("udp")
}

/// reno、cubic、udp 在前，其余按字典序
pub fn compare_protocols(a: &str, b: &str) -> Ordering {
    let rank = |p: &str| {
        KNOWN_PROTOCOLS
            .iter()
            .position(|k| *k == p)
            .unwrap_or(KNOWN_PROTOCOLS.len())
    };
    rank(a).cmp(&rank(b)).then_with(|| a.cmp(b))
}
