use std::path::Path;

use anyhow::Result;
use plotters::prelude::*;

use crate::plot::viridis;

/// Point coloring for embedding scatters: binary outlier labels, or a
/// continuous gradient (e.g. alignment score).
pub enum ScatterColor<'a> {
    Flags(&'a [bool]),
    Gradient(&'a [f64]),
}

pub fn embedding_scatter(
    path: &Path,
    title: &str,
    points: &[(f64, f64)],
    coloring: ScatterColor,
) -> Result<()> {
    anyhow::ensure!(!points.is_empty(), "no points to plot");
    let n_colors = match &coloring {
        ScatterColor::Flags(f) => f.len(),
        ScatterColor::Gradient(g) => g.len(),
    };
    anyhow::ensure!(
        n_colors == points.len(),
        "{} colors for {} points",
        n_colors,
        points.len()
    );

    let pad = |min: f64, max: f64| {
        let span = (max - min).max(1e-6);
        (min - 0.05 * span, max + 0.05 * span)
    };
    let (x_min, x_max) = pad(
        points.iter().map(|p| p.0).fold(f64::INFINITY, f64::min),
        points.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max),
    );
    let (y_min, y_max) = pad(
        points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min),
        points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max),
    );

    let root = SVGBackend::new(path, (640, 560)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(12)
        .caption(title, ("sans-serif", 18))
        .x_label_area_size(35)
        .y_label_area_size(45)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart.configure_mesh().draw()?;

    match coloring {
        ScatterColor::Flags(flags) => {
            chart
                .draw_series(
                    points
                        .iter()
                        .zip(flags.iter())
                        .filter(|(_, &flag)| !flag)
                        .map(|(&(x, y), _)| Circle::new((x, y), 3, BLUE.mix(0.7).filled())),
                )?
                .label("inlier")
                .legend(|(x, y)| Circle::new((x + 8, y), 3, BLUE.filled()));
            chart
                .draw_series(
                    points
                        .iter()
                        .zip(flags.iter())
                        .filter(|(_, &flag)| flag)
                        .map(|(&(x, y), _)| Circle::new((x, y), 3, RED.filled())),
                )?
                .label("outlier")
                .legend(|(x, y)| Circle::new((x + 8, y), 3, RED.filled()));
            chart
                .configure_series_labels()
                .border_style(BLACK)
                .background_style(WHITE.mix(0.85))
                .draw()?;
        }
        ScatterColor::Gradient(values) => {
            let v_min = values.iter().cloned().fold(f64::INFINITY, f64::min);
            let v_max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let span = if v_max > v_min { v_max - v_min } else { 1.0 };
            chart.draw_series(points.iter().zip(values.iter()).map(|(&(x, y), &v)| {
                Circle::new((x, y), 3, viridis((v - v_min) / span).filled())
            }))?;
        }
    }

    root.present()?;
    Ok(())
}
