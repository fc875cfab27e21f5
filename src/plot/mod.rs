//! SVG plot rendering. Every figure the original analysis produced is a
//! static file; all rendering goes through plotters' SVG backend.

pub mod boxes;
pub mod heatmap;
pub mod histogram;
pub mod ideogram;
pub mod line;
pub mod scatter;

pub use boxes::chrom_boxes;
pub use heatmap::heatmap;
pub use histogram::histogram_plot;
pub use ideogram::{ideogram, IdeogramChrom, IdeogramTrack, TrackPaint};
pub use line::binned_line;
pub use scatter::{embedding_scatter, ScatterColor};

use plotters::style::RGBColor;

/// Distinct class color `i` of `n`, sampled around the hue wheel
/// (rainbow-palette stand-in).
pub fn class_color(i: usize, n: usize) -> RGBColor {
    let n = n.max(1);
    let h = if n == 1 {
        0.0
    } else {
        0.83 * i as f64 / (n - 1) as f64
    };
    hsl_to_rgb(h, 0.75, 0.5)
}

/// Interpolate from white toward `base`; `t` in [0, 1]. Used for density
/// gradients so an empty window stays white.
pub fn blend_toward(base: RGBColor, t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0);
    let mix = |c: u8| (255.0 + (c as f64 - 255.0) * t).round() as u8;
    RGBColor(mix(base.0), mix(base.1), mix(base.2))
}

/// Compact viridis-style colormap for score gradients and heatmaps.
pub fn viridis(t: f64) -> RGBColor {
    const ANCHORS: [(f64, f64, f64); 5] = [
        (68.0, 1.0, 84.0),
        (59.0, 82.0, 139.0),
        (33.0, 145.0, 140.0),
        (94.0, 201.0, 98.0),
        (253.0, 231.0, 37.0),
    ];
    let t = t.clamp(0.0, 1.0) * (ANCHORS.len() - 1) as f64;
    let lo = (t.floor() as usize).min(ANCHORS.len() - 2);
    let frac = t - lo as f64;
    let lerp = |a: f64, b: f64| (a + (b - a) * frac).round() as u8;
    let (r0, g0, b0) = ANCHORS[lo];
    let (r1, g1, b1) = ANCHORS[lo + 1];
    RGBColor(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> RGBColor {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = (h.rem_euclid(1.0)) * 6.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r, g, b) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    let to_u8 = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    RGBColor(to_u8(r), to_u8(g), to_u8(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_endpoints() {
        let red = RGBColor(255, 0, 0);
        assert_eq!(blend_toward(red, 0.0), RGBColor(255, 255, 255));
        assert_eq!(blend_toward(red, 1.0), red);
    }

    #[test]
    fn test_viridis_endpoints() {
        assert_eq!(viridis(0.0), RGBColor(68, 1, 84));
        assert_eq!(viridis(1.0), RGBColor(253, 231, 37));
    }

    #[test]
    fn test_class_colors_distinct() {
        let a = class_color(0, 4);
        let b = class_color(3, 4);
        assert_ne!(a, b);
    }
}
