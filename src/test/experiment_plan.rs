use crate::experiment::{ExperimentMode, ExperimentOpts, ExperimentPlan, LinkProfile};
use crate::results::ResultKey;
use std::path::PathBuf;

#[test]
fn default_plan_covers_three_protocols_in_bottleneck_mode() {
    let plan = ExperimentPlan::new(&ExperimentOpts::default());
    assert_eq!(plan.controller, "pox");
    assert_eq!(plan.mode, ExperimentMode::Bottleneck);
    assert_eq!(plan.openflow, "OpenFlow10");
    assert_eq!(plan.link, LinkProfile::bottleneck());

    let protocols: Vec<&str> = plan.runs.iter().map(|r| r.protocol.as_str()).collect();
    assert_eq!(protocols, vec!["reno", "cubic", "udp"]);

    let reno = &plan.runs[0];
    assert_eq!(
        reno.iperf_command,
        vec!["iperf3", "-c", "10.0.0.13", "-C", "reno", "-t", "30", "-J"]
    );
    assert_eq!(
        reno.ping_command,
        vec!["ping", "-c", "100", "-i", "0.2", "10.0.0.13"]
    );
    assert_eq!(
        reno.iperf_file,
        PathBuf::from("experiment_results/pox_bottleneck_reno_iperf.json")
    );

    let udp = &plan.runs[2];
    assert_eq!(
        udp.iperf_command,
        vec!["iperf3", "-c", "10.0.0.13", "-u", "-b", "20M", "-t", "30", "-J"]
    );
}

#[test]
fn planned_files_parse_back_to_their_keys() {
    let opts = ExperimentOpts {
        controller: "ryu".to_string(),
        mode: ExperimentMode::Debug,
        ..ExperimentOpts::default()
    };
    let plan = ExperimentPlan::new(&opts);
    assert_eq!(plan.openflow, "OpenFlow13");
    assert_eq!(plan.link.bandwidth_mbps, 1000);
    assert!(plan.link.delay_ms.is_none());

    for run in &plan.runs {
        let name = run
            .iperf_file
            .file_name()
            .and_then(|n| n.to_str())
            .expect("file name");
        let key = ResultKey::from_iperf_file_name(name).expect("parsable name");
        assert_eq!(key, ResultKey::new("ryu", "debug", run.protocol.as_str()));
        assert_eq!(
            run.ping_file.file_name().and_then(|n| n.to_str()),
            Some(key.ping_file_name().as_str())
        );
    }
}

#[test]
fn bottleneck_profile_matches_lab_setup() {
    let link = LinkProfile::for_mode(ExperimentMode::Bottleneck);
    assert_eq!(link.bandwidth_mbps, 10);
    assert_eq!(link.delay_ms, Some(50));
    assert_eq!(link.loss_percent, Some(1));
    assert_eq!(link.max_queue_pkts, Some(100));

    let raw = serde_json::to_value(ExperimentPlan::new(&ExperimentOpts::default()))
        .expect("serialize plan");
    assert_eq!(raw["mode"], "bottleneck");
    assert_eq!(raw["link"]["delay_ms"], 50);
}
