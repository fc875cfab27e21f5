use std::path::Path;

use anyhow::Result;
use plotters::prelude::*;

use crate::stats;

/// Histogram of `values`, optionally with a highlighted value drawn in red
/// and a logarithmic x axis.
pub fn histogram_plot(
    path: &Path,
    title: &str,
    x_desc: &str,
    values: &[f64],
    bins: usize,
    logx: bool,
    highlight: Option<f64>,
) -> Result<()> {
    anyhow::ensure!(!values.is_empty(), "no data to plot");
    anyhow::ensure!(bins > 0, "need at least one bin");

    let (edges, _) = stats::histogram(values, bins);
    let (highlighted, other): (Vec<f64>, Vec<f64>) = values
        .iter()
        .partition(|&&v| highlight.map_or(false, |h| v == h));

    // Per-bin counts for each layer, over the shared edges.
    let count_layer = |subset: &[f64]| -> Vec<(f64, f64, u64)> {
        let mut counts = vec![0u64; bins];
        let min = edges[0];
        let width = edges[1] - edges[0];
        for &v in subset {
            let idx = (((v - min) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }
        (0..bins)
            .map(|i| (edges[i], edges[i + 1], counts[i]))
            .collect()
    };
    let other_bars = count_layer(&other);
    let highlight_bars = count_layer(&highlighted);

    let y_max = other_bars
        .iter()
        .chain(highlight_bars.iter())
        .map(|&(_, _, c)| c)
        .max()
        .unwrap_or(1)
        .max(1) as f64
        * 1.05;

    let root = SVGBackend::new(path, (1000, 400)).into_drawing_area();
    root.fill(&WHITE)?;

    let x_min = edges[0].max(if logx { 1.0 } else { f64::NEG_INFINITY });
    let x_max = edges[bins];

    macro_rules! draw_layers {
        ($chart:expr) => {{
            let mut chart = $chart;
            chart
                .configure_mesh()
                .x_desc(x_desc)
                .y_desc("Count")
                .draw()?;
            chart.draw_series(other_bars.iter().filter(|&&(_, _, c)| c > 0).map(
                |&(x0, x1, c)| {
                    Rectangle::new([(x0, 0.0), (x1, c as f64)], BLUE.mix(0.5).filled())
                },
            ))?;
            chart.draw_series(highlight_bars.iter().filter(|&&(_, _, c)| c > 0).map(
                |&(x0, x1, c)| {
                    Rectangle::new([(x0, 0.0), (x1, c as f64)], RED.mix(0.7).filled())
                },
            ))?;
        }};
    }

    if logx {
        draw_layers!(ChartBuilder::on(&root)
            .margin(10)
            .caption(title, ("sans-serif", 20))
            .x_label_area_size(45)
            .y_label_area_size(55)
            .build_cartesian_2d((x_min..x_max).log_scale(), 0f64..y_max)?);
    } else {
        draw_layers!(ChartBuilder::on(&root)
            .margin(10)
            .caption(title, ("sans-serif", 20))
            .x_label_area_size(45)
            .y_label_area_size(55)
            .build_cartesian_2d(x_min..x_max, 0f64..y_max)?);
    }

    root.present()?;
    Ok(())
}
