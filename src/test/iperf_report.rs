use super::{TCP_REPORT, UDP_REPORT, unique_temp_dir, write_file};
use crate::report::{
    ProtocolKind, ReportError, iperf_output_looks_ok, parse_iperf_file, parse_iperf_str,
};
use std::fs;

#[test]
fn tcp_report_uses_received_throughput_and_sent_retransmits() {
    let record = parse_iperf_str(TCP_REPORT).expect("parse tcp report");
    assert_eq!(record.protocol, Some(ProtocolKind::Tcp));
    assert_eq!(record.throughput_mbps, Some(9_400_000.0 / 1_000_000.0));
    assert_eq!(record.throughput_mbps, Some(9.4));
    assert_eq!(record.retransmits, Some(12));
    assert!(record.jitter_ms.is_none());
    assert!(record.packet_loss_percent.is_none());
}

#[test]
fn udp_report_passes_summary_fields_through() {
    let record = parse_iperf_str(UDP_REPORT).expect("parse udp report");
    assert_eq!(record.protocol, Some(ProtocolKind::Udp));
    assert_eq!(record.throughput_mbps, Some(20.0));
    assert_eq!(record.jitter_ms, Some(3.2));
    assert_eq!(record.lost_packets, Some(38850));
    assert_eq!(record.total_packets, Some(51800));
    assert_eq!(record.packet_loss_percent, Some(75.0));
    assert!(record.retransmits.is_none());
}

#[test]
fn udp_report_with_sent_and_received_sections_is_still_udp() {
    // iperf3 >= 3.7 also emits sum_sent/sum_received for UDP tests
    let raw = r#"
    {
        "end": {
            "sum": { "bits_per_second": 1000000, "jitter_ms": 0.5, "lost_packets": 1, "packets": 100, "lost_percent": 1.0 },
            "sum_sent": { "bits_per_second": 1000000 },
            "sum_received": { "bits_per_second": 990000 }
        }
    }
    "#;
    let record = parse_iperf_str(raw).expect("parse udp report");
    assert_eq!(record.protocol, Some(ProtocolKind::Udp));
    assert_eq!(record.throughput_mbps, Some(1.0));
    assert_eq!(record.packet_loss_percent, Some(1.0));
}

#[test]
fn missing_numeric_fields_default_to_zero() {
    let raw = r#"{ "end": { "sum_sent": {}, "sum_received": {} } }"#;
    let record = parse_iperf_str(raw).expect("parse sparse tcp report");
    assert_eq!(record.throughput_mbps, Some(0.0));
    assert_eq!(record.retransmits, Some(0));
}

#[test]
fn received_side_alone_leaves_retransmits_absent() {
    let raw = r#"{ "end": { "sum_received": { "bits_per_second": 8000000 } } }"#;
    let record = parse_iperf_str(raw).expect("parse receive-only tcp report");
    assert_eq!(record.throughput_mbps, Some(8.0));
    assert_eq!(record.retransmits, None);
    assert_eq!(record.protocol, Some(ProtocolKind::Tcp));
}

#[test]
fn report_without_summary_is_rejected() {
    let err = parse_iperf_str(r#"{ "end": {} }"#).unwrap_err();
    assert!(matches!(err, ReportError::MissingSummary));

    let err = parse_iperf_str(r#"{ "start": {} }"#).unwrap_err();
    assert!(matches!(err, ReportError::MissingSummary));
}

#[test]
fn iperf_error_field_is_surfaced() {
    let raw = r#"{ "start": {}, "end": {}, "error": "unable to connect to server: Connection refused" }"#;
    match parse_iperf_str(raw) {
        Err(ReportError::Tool(msg)) => assert!(msg.contains("Connection refused")),
        other => panic!("expected tool error, got {other:?}"),
    }
}

#[test]
fn malformed_json_is_a_json_error() {
    let err = parse_iperf_str("iperf3: error - unable to connect").unwrap_err();
    assert!(matches!(err, ReportError::Json(_)));
}

#[test]
fn parse_iperf_file_returns_none_on_failure() {
    let dir = unique_temp_dir("iperf-file");
    let good = write_file(&dir, "pox_debug_reno_iperf.json", TCP_REPORT);
    let bad = write_file(&dir, "pox_debug_cubic_iperf.json", "{ not json");

    assert!(parse_iperf_file(&good).is_some());
    assert!(parse_iperf_file(&bad).is_none());
    assert!(parse_iperf_file(&dir.join("missing_iperf.json")).is_none());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn output_health_check_matches_runner_heuristic() {
    assert!(iperf_output_looks_ok(TCP_REPORT));
    assert!(!iperf_output_looks_ok(r#"{"end": {}}"#));
    let with_error = format!("{TCP_REPORT}\"error\": \"interrupted\"");
    assert!(!iperf_output_looks_ok(&with_error));
}
