//! 结果表
//!
//! 扁平的 `(ResultKey, MetricsRecord)` 集合，按需分组成
//! controller → mode → protocol 的视图。

use super::key::{ResultKey, compare_protocols};
use crate::report::MetricsRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    rows: BTreeMap<ResultKey, MetricsRecord>,
}

/// 导出 JSON 时的一行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub controller: String,
    pub mode: String,
    pub protocol: String,
    pub metrics: MetricsRecord,
}

impl ResultTable {
    /// 取出（必要时创建）某个键对应的记录
    pub fn entry(&mut self, key: ResultKey) -> &mut MetricsRecord {
        self.rows.entry(key).or_default()
    }

    pub fn get(&self, controller: &str, mode: &str, protocol: &str) -> Option<&MetricsRecord> {
        self.rows.get(&ResultKey::new(controller, mode, protocol))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 所有 controller（已排序、去重）
    pub fn controllers(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.rows.keys().map(|k| k.controller.as_str()).collect();
        out.dedup();
        out
    }

    /// 某个 controller 下的所有 mode（已排序、去重）
    pub fn modes(&self, controller: &str) -> Vec<&str> {
        let mut out: Vec<&str> = self
            .rows
            .keys()
            .filter(|k| k.controller == controller)
            .map(|k| k.mode.as_str())
            .collect();
        out.dedup();
        out
    }

    /// 某个 (controller, mode) 下的所有 protocol，按 reno/cubic/udp 优先排序
    pub fn protocols(&self, controller: &str, mode: &str) -> Vec<&str> {
        let mut out: Vec<&str> = self
            .rows
            .keys()
            .filter(|k| k.controller == controller && k.mode == mode)
            .map(|k| k.protocol.as_str())
            .collect();
        out.sort_by(|a, b| compare_protocols(a, b));
        out
    }

    /// 是否有任意 controller 含有该 mode
    pub fn has_mode(&self, mode: &str) -> bool {
        self.rows.keys().any(|k| k.mode == mode)
    }

    pub fn to_rows(&self) -> Vec<ResultRow> {
        self.rows
            .iter()
            .map(|(k, m)| ResultRow {
                controller: k.controller.clone(),
                mode: k.mode.clone(),
                protocol: k.protocol.clone(),
                metrics: m.clone(),
            })
            .collect()
    }
}
