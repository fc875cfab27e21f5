use std::path::Path;

use anyhow::Result;
use plotters::prelude::*;

use crate::plot::class_color;
use crate::stats;

/// Per-group distribution panels: colored IQR box, Tukey whiskers clipped
/// to the data, white median dot. One group per chromosome.
pub fn chrom_boxes(
    path: &Path,
    title: &str,
    y_desc: &str,
    groups: &[(String, Vec<f64>)],
    colored: bool,
) -> Result<()> {
    anyhow::ensure!(!groups.is_empty(), "no groups to plot");
    anyhow::ensure!(
        groups.iter().all(|(_, v)| !v.is_empty()),
        "every group needs at least one value"
    );

    let n = groups.len();
    let y_max = groups
        .iter()
        .flat_map(|(_, v)| v.iter().cloned())
        .fold(f64::NEG_INFINITY, f64::max);

    let width = (120 + 45 * n).clamp(600, 1600) as u32;
    let root = SVGBackend::new(path, (width, 520)).into_drawing_area();
    root.fill(&WHITE)?;

    let names: Vec<String> = groups.iter().map(|(name, _)| name.clone()).collect();
    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .caption(title, ("sans-serif", 18))
        .x_label_area_size(70)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..(n as f64 + 1.0), 0f64..(y_max * 1.08).max(0.1))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n + 2)
        .x_label_formatter(&|v: &f64| {
            let i = v.round() as i64;
            if (v - i as f64).abs() < 1e-6 && i >= 1 && i <= n as i64 {
                names[(i - 1) as usize].clone()
            } else {
                String::new()
            }
        })
        .x_desc("Chromosome")
        .y_desc(y_desc)
        .draw()?;

    for (i, (_, values)) in groups.iter().enumerate() {
        let x = (i + 1) as f64;
        let q = stats::quartiles(values);
        let (lo, hi) = stats::tukey_whiskers(q, values);
        let color = if colored {
            class_color(i, n)
        } else {
            RGBColor(25, 118, 210)
        };

        // whisker span, then IQR box over it, median dot on top
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(x, lo), (x, hi)],
            BLACK.stroke_width(2),
        )))?;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(x - 0.18, q.q1), (x + 0.18, q.q3)],
            color.filled(),
        )))?;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(x - 0.18, q.q1), (x + 0.18, q.q3)],
            BLACK,
        )))?;
        chart.draw_series(std::iter::once(Circle::new(
            (x, q.median),
            4,
            WHITE.filled(),
        )))?;
        chart.draw_series(std::iter::once(Circle::new((x, q.median), 4, BLACK)))?;
    }

    root.present()?;
    Ok(())
}
