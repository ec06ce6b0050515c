//! 结果聚合
//!
//! 扫描结果目录，把每个 (controller, mode, protocol) 的 iperf3/ping 报告
//! 合并成一条 [`MetricsRecord`](crate::report::MetricsRecord)。

mod aggregate;
mod key;
mod table;

pub use aggregate::{AggregateError, AggregateOpts, LossPolicy, build_result_table};
pub use key::{
    IPERF_SUFFIX, KNOWN_PROTOCOLS, PING_SUFFIX, ResultKey, compare_protocols, protocol_is_udp,
};
pub use table::{ResultRow, ResultTable};
