//! 实验计划
//!
//! 描述一组实验（某个 controller、某个 mode 下依次测 reno/cubic/udp）要执行的
//! iperf3/ping 命令以及结果文件的落盘位置。这里只生成计划，不执行命令。

use crate::results::{ResultKey, protocol_is_udp};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 实验模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ExperimentMode {
    /// 1 Gbps 无约束链路，用于功能调试
    Debug,
    /// 受限瓶颈链路
    #[default]
    Bottleneck,
}

impl ExperimentMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ExperimentMode::Debug => "debug",
            ExperimentMode::Bottleneck => "bottleneck",
        }
    }
}

/// 两个核心路由器之间链路的整形参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkProfile {
    pub bandwidth_mbps: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loss_percent: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_queue_pkts: Option<u64>,
}

impl LinkProfile {
    /// 10 Mbps、50 ms、1% 丢包、100 包队列
    pub fn bottleneck() -> Self {
        Self {
            bandwidth_mbps: 10,
            delay_ms: Some(50),
            loss_percent: Some(1),
            max_queue_pkts: Some(100),
        }
    }

    pub fn debug() -> Self {
        Self {
            bandwidth_mbps: 1000,
            delay_ms: None,
            loss_percent: None,
            max_queue_pkts: None,
        }
    }

    pub fn for_mode(mode: ExperimentMode) -> Self {
        match mode {
            ExperimentMode::Debug => Self::debug(),
            ExperimentMode::Bottleneck => Self::bottleneck(),
        }
    }
}

/// 实验配置
#[derive(Debug, Clone)]
pub struct ExperimentOpts {
    pub controller: String,
    pub mode: ExperimentMode,
    pub output_dir: PathBuf,
    /// iperf3 server 所在主机（h13）的地址
    pub server_ip: String,
    pub duration_secs: u64,
    pub ping_count: u64,
    pub ping_interval_secs: f64,
    /// UDP 发送速率（iperf3 `-b` 参数）
    pub udp_bandwidth: String,
    pub protocols: Vec<String>,
}

impl Default for ExperimentOpts {
    fn default() -> Self {
        Self {
            controller: "pox".to_string(),
            mode: ExperimentMode::Bottleneck,
            output_dir: PathBuf::from("experiment_results"),
            server_ip: "10.0.0.13".to_string(),
            duration_secs: 30,
            ping_count: 100,
            ping_interval_secs: 0.2,
            udp_bandwidth: "20M".to_string(),
            protocols: vec!["reno".into(), "cubic".into(), "udp".into()],
        }
    }
}

/// 单个协议的一次测量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolRun {
    pub protocol: String,
    pub iperf_command: Vec<String>,
    pub ping_command: Vec<String>,
    pub iperf_file: PathBuf,
    pub ping_file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentPlan {
    pub controller: String,
    pub mode: ExperimentMode,
    /// ryu 需要 OpenFlow 1.3，其余 controller 使用 OpenFlow 1.0
    pub openflow: String,
    pub link: LinkProfile,
    pub runs: Vec<ProtocolRun>,
}

fn iperf_command(opts: &ExperimentOpts, protocol: &str) -> Vec<String> {
    let mut cmd = vec!["iperf3".to_string(), "-c".to_string(), opts.server_ip.clone()];
    if protocol_is_udp(protocol) {
        cmd.extend(["-u".to_string(), "-b".to_string(), opts.udp_bandwidth.clone()]);
    } else {
        cmd.extend(["-C".to_string(), protocol.to_string()]);
    }
    cmd.extend([
        "-t".to_string(),
        opts.duration_secs.to_string(),
        "-J".to_string(),
    ]);
    cmd
}

fn ping_command(opts: &ExperimentOpts) -> Vec<String> {
    vec![
        "ping".to_string(),
        "-c".to_string(),
        opts.ping_count.to_string(),
        "-i".to_string(),
        opts.ping_interval_secs.to_string(),
        opts.server_ip.clone(),
    ]
}

impl ExperimentPlan {
    pub fn new(opts: &ExperimentOpts) -> Self {
        let runs = opts
            .protocols
            .iter()
            .map(|protocol| {
                let key = ResultKey::new(&opts.controller, opts.mode.as_str(), protocol);
                ProtocolRun {
                    protocol: protocol.clone(),
                    iperf_command: iperf_command(opts, protocol),
                    ping_command: ping_command(opts),
                    iperf_file: opts.output_dir.join(key.iperf_file_name()),
                    ping_file: opts.output_dir.join(key.ping_file_name()),
                }
            })
            .collect();

        let openflow = if opts.controller.eq_ignore_ascii_case("ryu") {
            "OpenFlow13"
        } else {
            "OpenFlow10"
        };

        Self {
            controller: opts.controller.clone(),
            mode: opts.mode,
            openflow: openflow.to_string(),
            link: LinkProfile::for_mode(opts.mode),
            runs,
        }
    }
}
