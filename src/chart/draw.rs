//! plotters 绘图

use super::ChartError;
use super::series::{ChartSeries, Metric};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

const FONT: &str = "sans-serif";
const COMBINED_SIZE: (u32, u32) = (1400, 1000);
const PER_METRIC_SIZE: (u32, u32) = (1000, 600);

fn draw_err<E: std::fmt::Display>(err: E) -> ChartError {
    ChartError::Draw(err.to_string())
}

/// y 轴上界：留出柱顶标注的空间；全零时给一个固定范围
fn y_upper(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(0.0_f64, f64::max);
    if max > 0.0 { max * 1.15 } else { 1.0 }
}

/// 在一块绘图区上画一个指标的柱状图，并在柱顶标注数值
fn draw_metric_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    series: &ChartSeries,
    metric: Metric,
    caption: &str,
) -> Result<(), ChartError> {
    let values = series.values(metric);
    let n = values.len();

    let mut chart = ChartBuilder::on(area)
        .caption(caption, (FONT, 22))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d((0..n).into_segmented(), 0.0..y_upper(values))
        .map_err(draw_err)?;

    let labels = &series.labels;
    let x_fmt = |v: &SegmentValue<usize>| match v {
        SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
            labels.get(*i).cloned().unwrap_or_default()
        }
        SegmentValue::Last => String::new(),
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&x_fmt)
        .x_label_style((FONT, 12))
        .x_desc("Controller-Protocol")
        .y_desc(metric.y_label())
        .draw()
        .map_err(draw_err)?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(metric.color().filled())
                .margin(12)
                .data(values.iter().enumerate().map(|(i, v)| (i, *v))),
        )
        .map_err(draw_err)?;

    let value_style =
        TextStyle::from((FONT, 12).into_font()).pos(Pos::new(HPos::Center, VPos::Bottom));
    chart
        .draw_series(values.iter().enumerate().filter_map(|(i, v)| {
            metric
                .annotation(*v)
                .map(|text| Text::new(text, (SegmentValue::CenterOf(i), *v), value_style.clone()))
        }))
        .map_err(draw_err)?;

    Ok(())
}

/// 2×2 四宫格：一张图包含全部四个指标
pub(super) fn draw_combined(path: &Path, series: &ChartSeries) -> Result<(), ChartError> {
    let root = BitMapBackend::new(path, COMBINED_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let title = format!(
        "Protocol Performance Comparison ({} mode)",
        series.mode.to_uppercase()
    );
    let body = root.titled(&title, (FONT, 30)).map_err(draw_err)?;

    for (idx, (panel, metric)) in body.split_evenly((2, 2)).iter().zip(Metric::ALL).enumerate() {
        let caption = format!("{}. {}", idx + 1, metric.title());
        draw_metric_panel(panel, series, metric, &caption)?;
    }

    root.present().map_err(draw_err)?;
    Ok(())
}

/// 单指标图（用于幻灯片）
pub(super) fn draw_single(path: &Path, series: &ChartSeries, metric: Metric) -> Result<(), ChartError> {
    let root = BitMapBackend::new(path, PER_METRIC_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;
    draw_metric_panel(&root, series, metric, metric.title())?;
    root.present().map_err(draw_err)?;
    Ok(())
}
