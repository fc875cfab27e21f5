use std::path::Path;

use anyhow::Result;
use plotters::prelude::*;

use crate::plot::blend_toward;

/// One density or interval track drawn under a chromosome backbone.
pub struct IdeogramTrack {
    pub label: String,
    pub color: RGBColor,
    pub paint: TrackPaint,
}

pub enum TrackPaint {
    /// Windowed density, shaded white→color against the class maximum.
    Windows {
        window_size: u64,
        counts: Vec<u64>,
        max_count: u64,
    },
    /// Raw `(start, length)` intervals in solid color.
    Intervals(Vec<(u64, u64)>),
}

pub struct IdeogramChrom {
    pub name: String,
    pub length: u64,
    pub tracks: Vec<IdeogramTrack>,
}

const TRACK_HEIGHT: f64 = 0.10;
const TRACK_STEP: f64 = 0.16;

/// Stacked per-chromosome ideogram panels, all sharing the x scale of the
/// longest chromosome.
pub fn ideogram(path: &Path, chroms: &[IdeogramChrom]) -> Result<()> {
    anyhow::ensure!(!chroms.is_empty(), "no chromosomes to draw");

    let max_len = chroms.iter().map(|c| c.length).max().unwrap_or(1).max(1);
    let max_tracks = chroms.iter().map(|c| c.tracks.len()).max().unwrap_or(1);

    let panel_height = (70 + 24 * max_tracks) as u32;
    let root = SVGBackend::new(path, (1200, panel_height * chroms.len() as u32 + 20))
        .into_drawing_area();
    root.fill(&WHITE)?;

    let areas = root.split_evenly((chroms.len(), 1));
    for (area, chrom) in areas.iter().zip(chroms.iter()) {
        let mut chart = ChartBuilder::on(area)
            .margin(4)
            .caption(
                format!("{} ({} bp)", chrom.name, chrom.length),
                ("sans-serif", 13),
            )
            .x_label_area_size(18)
            .build_cartesian_2d(0f64..max_len as f64 * 1.02, 0f64..1f64)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .y_labels(0)
            .x_labels(6)
            .x_label_formatter(&|v: &f64| format!("{:.0} Mb", v / 1_000_000.0))
            .label_style(("sans-serif", 10))
            .draw()?;

        // chromosome backbone
        chart.draw_series(std::iter::once(Rectangle::new(
            [(0.0, 0.88), (chrom.length as f64, 0.96)],
            RGBColor(211, 211, 211).filled(),
        )))?;

        for (idx, track) in chrom.tracks.iter().enumerate() {
            let y = 0.74 - idx as f64 * TRACK_STEP;
            match &track.paint {
                TrackPaint::Windows {
                    window_size,
                    counts,
                    max_count,
                } => {
                    let max_count = (*max_count).max(1) as f64;
                    chart.draw_series(counts.iter().enumerate().filter(|(_, &c)| c > 0).map(
                        |(i, &c)| {
                            let x0 = (i as u64 * window_size) as f64;
                            let x1 = ((i as u64 + 1) * window_size).min(chrom.length) as f64;
                            Rectangle::new(
                                [(x0, y), (x1.max(x0), y + TRACK_HEIGHT)],
                                blend_toward(track.color, c as f64 / max_count).filled(),
                            )
                        },
                    ))?;
                }
                TrackPaint::Intervals(intervals) => {
                    chart.draw_series(intervals.iter().map(|&(start, len)| {
                        Rectangle::new(
                            [(start as f64, y), ((start + len) as f64, y + TRACK_HEIGHT)],
                            track.color.filled(),
                        )
                    }))?;
                }
            }
            chart.draw_series(std::iter::once(Text::new(
                track.label.clone(),
                (max_len as f64 * 0.002, y + TRACK_HEIGHT + 0.02),
                ("sans-serif", 10),
            )))?;
        }
    }

    root.present()?;
    Ok(())
}
