//! 控制台汇总表

use crate::results::ResultTable;

const RULE_WIDTH: usize = 70;

/// 渲染汇总表：每个 controller 一节，每个 mode 一张子表
pub fn render_summary(table: &ResultTable) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = format!("\n{rule}\n  RESULTS SUMMARY\n{rule}\n");

    for controller in table.controllers() {
        out.push_str(&format!(
            "\nController: {}\n{}\n",
            controller.to_uppercase(),
            "-".repeat(RULE_WIDTH)
        ));

        for mode in table.modes(controller) {
            out.push_str(&format!("\n  Mode: {}\n", mode.to_uppercase()));
            out.push_str(&format!(
                "  {:<10} {:<15} {:<12} {:<10} {}\n",
                "Protocol", "Throughput", "RTT Avg", "Loss %", "Jitter"
            ));
            out.push_str(&format!(
                "  {} {} {} {} {}\n",
                "-".repeat(10),
                "-".repeat(15),
                "-".repeat(12),
                "-".repeat(10),
                "-".repeat(10)
            ));

            for protocol in table.protocols(controller, mode) {
                let Some(m) = table.get(controller, mode, protocol) else {
                    continue;
                };
                out.push_str(&format!(
                    "  {:<10} {:>10.2} Mbps  {:>8.2} ms  {:>7.1} %  {:>8.2} ms\n",
                    protocol,
                    m.throughput_mbps.unwrap_or(0.0),
                    m.rtt_avg_ms.unwrap_or(0.0),
                    m.packet_loss_percent.unwrap_or(0.0),
                    m.jitter_ms.unwrap_or(0.0),
                ));
            }
        }
    }
    out
}
