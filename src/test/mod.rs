mod experiment_plan;
mod iperf_report;
mod summary;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub(crate) fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "protostudy-rs-{prefix}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

pub(crate) fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write temp file");
    path
}

pub(crate) const TCP_REPORT: &str = r#"
{
    "start": { "test_start": { "protocol": "TCP", "duration": 30 } },
    "end": {
        "sum_sent": { "bytes": 35250000, "bits_per_second": 9500000, "retransmits": 12 },
        "sum_received": { "bytes": 35250000, "bits_per_second": 9400000 }
    }
}
"#;

pub(crate) const UDP_REPORT: &str = r#"
{
    "start": { "test_start": { "protocol": "UDP", "duration": 30 } },
    "end": {
        "sum": {
            "bits_per_second": 20000000,
            "jitter_ms": 3.2,
            "lost_packets": 38850,
            "packets": 51800,
            "lost_percent": 75.0
        }
    }
}
"#;

pub(crate) const PING_OK: &str = "\
PING 10.0.0.13 (10.0.0.13) 56(84) bytes of data.
64 bytes from 10.0.0.13: icmp_seq=1 ttl=64 time=48.1 ms
64 bytes from 10.0.0.13: icmp_seq=2 ttl=64 time=55.0 ms

--- 10.0.0.13 ping statistics ---
100 packets transmitted, 100 received, 0% packet loss, time 19823ms
rtt min/avg/max/mdev = 48.1/50.3/55.0/2.1 ms
";
