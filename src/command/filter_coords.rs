use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::fileformat::coords::{read_coords_file, write_coords_file, CoordsRecord};
use crate::stats::mean;

#[derive(Args)]
pub struct FilterCoordsCMD {
    #[arg(value_parser, required = true)]
    /// show-coords -T tables
    pub files: Vec<PathBuf>,
}

impl FilterCoordsCMD {
    pub fn try_execute(&mut self) -> Result<()> {
        println!("file\tmin_idy\tmax_idy\tavg_idy\ttotal\tkept");
        for path in &self.files {
            let records = read_coords_file(path)?;
            let (summary, kept) = split_below_mean(&records);

            let dir = path.parent().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
            let name = path
                .file_name()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| "coords".to_string());
            let path_out = dir.join(format!("IDYv{:.3}_{}", summary.avg, name));
            write_coords_file(&path_out, &kept)?;

            println!(
                "{}\t{:.2}\t{:.2}\t{:.3}\t{}\t{}",
                path.display(),
                summary.min,
                summary.max,
                summary.avg,
                records.len(),
                kept.len()
            );
        }
        log::info!("filter-coords has finished succesfully");
        Ok(())
    }
}

struct IdySummary {
    min: f64,
    max: f64,
    avg: f64,
}

/// Keep the alignments at or below the file's own mean identity. These are
/// the diverged copies; near-identical hits are mostly self alignments.
fn split_below_mean(records: &[CoordsRecord]) -> (IdySummary, Vec<CoordsRecord>) {
    let idy: Vec<f64> = records.iter().map(|r| r.pct_idy).collect();
    let avg = mean(&idy);
    let min = idy.iter().copied().fold(f64::INFINITY, f64::min);
    let max = idy.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let kept = records
        .iter()
        .filter(|r| r.pct_idy <= avg)
        .cloned()
        .collect();
    (IdySummary { min, max, avg }, kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(pct_idy: f64) -> CoordsRecord {
        CoordsRecord {
            s1: 1,
            e1: 100,
            s2: 200,
            e2: 300,
            len1: 100,
            len2: 100,
            pct_idy,
            len_r: None,
            len_q: None,
            cov_r: None,
            cov_q: None,
            ref_tag: "chr1".to_string(),
            qry_tag: "chr1".to_string(),
        }
    }

    #[test]
    fn keeps_at_or_below_mean_identity() {
        let records = vec![rec(80.0), rec(90.0), rec(100.0)];
        let (summary, kept) = split_below_mean(&records);
        assert!((summary.avg - 90.0).abs() < 1e-12);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|r| r.pct_idy <= 90.0));
    }
}
