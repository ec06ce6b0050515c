use crate::report::MetricsRecord;
use crate::results::{ResultKey, ResultTable};
use crate::summary::render_summary;

#[test]
fn summary_groups_by_controller_and_mode() {
    let mut table = ResultTable::default();
    *table.entry(ResultKey::new("pox", "bottleneck", "udp")) = MetricsRecord {
        throughput_mbps: Some(20.0),
        jitter_ms: Some(3.2),
        packet_loss_percent: Some(75.0),
        ..MetricsRecord::default()
    };
    *table.entry(ResultKey::new("pox", "bottleneck", "reno")) = MetricsRecord {
        throughput_mbps: Some(9.4),
        rtt_avg_ms: Some(50.3),
        packet_loss_percent: Some(0.0),
        ..MetricsRecord::default()
    };
    table.entry(ResultKey::new("ryu", "debug", "cubic"));

    let out = render_summary(&table);
    assert!(out.contains("RESULTS SUMMARY"));
    assert!(out.contains("Controller: POX"));
    assert!(out.contains("Controller: RYU"));
    assert!(out.contains("Mode: BOTTLENECK"));
    assert!(out.contains("Mode: DEBUG"));

    let reno = out.find("  reno ").expect("reno row");
    let udp = out.find("  udp ").expect("udp row");
    assert!(reno < udp, "reno should be listed before udp");

    assert!(out.contains("      9.40 Mbps     50.30 ms      0.0 %      0.00 ms"));
    assert!(out.contains("     20.00 Mbps      0.00 ms     75.0 %      3.20 ms"));
    // 空记录按 0 输出
    assert!(out.contains("  cubic            0.00 Mbps"));
}

#[test]
fn summary_layout_is_line_exact() {
    let mut table = ResultTable::default();
    *table.entry(ResultKey::new("pox", "bottleneck", "reno")) = MetricsRecord {
        throughput_mbps: Some(9.4),
        rtt_avg_ms: Some(50.3),
        packet_loss_percent: Some(0.0),
        ..MetricsRecord::default()
    };

    let out = render_summary(&table);
    let lines: Vec<&str> = out.lines().collect();
    let rule = "=".repeat(70);
    assert_eq!(lines[0], "");
    assert_eq!(lines[1], rule);
    assert_eq!(lines[2], "  RESULTS SUMMARY");
    assert_eq!(lines[3], rule);
    assert_eq!(lines[4], "");
    assert_eq!(lines[5], "Controller: POX");
    assert_eq!(lines[6], "-".repeat(70));
    assert_eq!(lines[7], "");
    assert_eq!(lines[8], "  Mode: BOTTLENECK");
    assert_eq!(
        lines[9],
        "  Protocol   Throughput      RTT Avg      Loss %     Jitter"
    );
    assert_eq!(
        lines[10],
        "  ---------- --------------- ------------ ---------- ----------"
    );
    assert_eq!(
        lines[11],
        "  reno             9.40 Mbps     50.30 ms      0.0 %      0.00 ms"
    );
    assert_eq!(lines.len(), 12);
    assert!(out.ends_with("ms\n"));
}
