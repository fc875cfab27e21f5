use std::path::Path;

use anyhow::Result;
use ndarray::Array2;
use plotters::prelude::*;

use crate::plot::viridis;

/// Square similarity-matrix heatmap with one label per row/column.
pub fn heatmap(path: &Path, title: &str, labels: &[String], matrix: &Array2<f64>) -> Result<()> {
    let n = labels.len();
    anyhow::ensure!(n > 0, "no data to plot");
    anyhow::ensure!(
        matrix.dim() == (n, n),
        "matrix shape {:?} does not match {} labels",
        matrix.dim(),
        n
    );

    let v_min = matrix.iter().cloned().fold(f64::INFINITY, f64::min);
    let v_max = matrix.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let span = if v_max > v_min { v_max - v_min } else { 1.0 };

    let size = (160 + 22 * n).clamp(480, 1400) as u32;
    let root = SVGBackend::new(path, (size, size)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(12)
        .caption(title, ("sans-serif", 18))
        .x_label_area_size(110)
        .y_label_area_size(110)
        .build_cartesian_2d(0i32..n as i32, 0i32..n as i32)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(n)
        .y_labels(n)
        .x_label_formatter(&|v: &i32| labels.get(*v as usize).cloned().unwrap_or_default())
        .y_label_formatter(&|v: &i32| labels.get(*v as usize).cloned().unwrap_or_default())
        .label_style(("sans-serif", 11))
        .draw()?;

    chart.draw_series((0..n).flat_map(|i| {
        (0..n).map(move |j| {
            let t = (matrix[[j, i]] - v_min) / span;
            Rectangle::new(
                [(i as i32, j as i32), (i as i32 + 1, j as i32 + 1)],
                viridis(t).filled(),
            )
        })
    }))?;

    root.present()?;
    Ok(())
}
