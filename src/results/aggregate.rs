//! 扫描结果目录并构建结果表

use super::key::{IPERF_SUFFIX, ResultKey};
use super::table::ResultTable;
use crate::report::{MetricsRecord, parse_iperf_file, parse_ping_file};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// 丢包率的来源规则
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum LossPolicy {
    /// 后合并者覆盖：ping 的丢包率总是覆盖 iperf 报告里的值
    Merge,
    /// 按文件名声明的协议选择：UDP 取 iperf 报告，其余取 ping
    #[default]
    ByProtocol,
}

#[derive(Debug, Clone, Default)]
pub struct AggregateOpts {
    /// 只处理这个 controller 的结果
    pub controller: Option<String>,
    pub loss_policy: LossPolicy,
}

#[derive(Debug, thiserror::Error)]
pub enum AggregateError {
    #[error("results directory not found: {}", .0.display())]
    MissingDir(PathBuf),
    #[error("failed to list {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no matching result files in {}", .0.display())]
    NoData(PathBuf),
}

/// 列出目录下所有 iperf 报告文件名（按名字排序）
fn list_iperf_reports(dir: &Path) -> Result<Vec<String>, AggregateError> {
    let read_dir = fs::read_dir(dir).map_err(|source| AggregateError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut names: Vec<String> = read_dir
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.ends_with(IPERF_SUFFIX))
        .collect();
    names.sort();
    Ok(names)
}

/// 按丢包率规则调整两份记录后合并进 `row`
fn merge_reports(
    key: &ResultKey,
    row: &mut MetricsRecord,
    iperf: Option<MetricsRecord>,
    ping: Option<MetricsRecord>,
    policy: LossPolicy,
) {
    let udp = key.declares_udp();

    if let Some(mut iperf) = iperf {
        if policy == LossPolicy::ByProtocol && !udp {
            iperf.packet_loss_percent = None;
        }
        if let Some(mbps) = iperf.throughput_mbps {
            info!("  ✓ Throughput: {mbps:.2} Mbps");
        }
        row.merge(iperf);
    }

    if let Some(mut ping) = ping {
        if policy == LossPolicy::ByProtocol && udp {
            if let Some(probe_loss) = ping.packet_loss_percent.take() {
                info!(probe_loss, "  UDP: 丢包率取 iperf 报告，忽略 ping 的丢包率");
            }
        }
        info!(
            "  ✓ RTT avg: {:.2} ms, Loss: {:.1}%",
            ping.rtt_avg_ms.unwrap_or(0.0),
            ping.packet_loss_percent
                .or(row.packet_loss_percent)
                .unwrap_or(0.0)
        );
        row.merge(ping);
    }
}

/// 扫描 `dir`，构建结果表
///
/// 单个文件的解析失败只会丢掉该文件的数据；目录不存在或没有任何
/// 匹配文件时返回错误。
#[tracing::instrument(skip_all, fields(dir = %dir.display(), controller = ?opts.controller, policy = ?opts.loss_policy))]
pub fn build_result_table(dir: &Path, opts: &AggregateOpts) -> Result<ResultTable, AggregateError> {
    if !dir.is_dir() {
        return Err(AggregateError::MissingDir(dir.to_path_buf()));
    }

    let mut table = ResultTable::default();
    for name in list_iperf_reports(dir)? {
        let Some(key) = ResultKey::from_iperf_file_name(&name) else {
            debug!(file = %name, "文件名不足三段，跳过");
            continue;
        };
        if let Some(only) = &opts.controller {
            if key.controller != *only {
                debug!(file = %name, "controller 不匹配，跳过");
                continue;
            }
        }

        info!("Processing: {}/{}/{}", key.controller, key.mode, key.protocol);

        let iperf = parse_iperf_file(&dir.join(&name));
        let ping_path = dir.join(key.ping_file_name());
        let ping = if ping_path.is_file() {
            parse_ping_file(&ping_path)
        } else {
            debug!(file = %ping_path.display(), "没有对应的 ping 报告");
            None
        };

        let row = table.entry(key.clone());
        merge_reports(&key, row, iperf, ping, opts.loss_policy);
        if row.is_empty() {
            warn!("⚠ {}/{}/{} 没有任何可用数据", key.controller, key.mode, key.protocol);
        }
    }

    if table.is_empty() {
        return Err(AggregateError::NoData(dir.to_path_buf()));
    }
    Ok(table)
}
