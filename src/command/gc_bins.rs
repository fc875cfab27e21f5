use std::collections::BTreeMap;
use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use crate::fileformat::ultra::read_ultra_file;
use crate::plot;
use crate::seq::gc_content;

use super::tsv2fasta::SeqColumn;

#[derive(Args)]
pub struct GcBinsCMD {
    #[arg(value_parser, required = true)]
    /// Repeat tables (TSV), one per assembly or chromosome
    pub files: Vec<PathBuf>,

    #[arg(long = "bin-size", value_parser, default_value = "1000000")]
    /// Genomic bin width in bp
    pub bin_size: u64,

    #[arg(long = "outdir", value_parser)]
    /// Where to put the per-bin tables and plots; defaults next to each input
    pub outdir: Option<PathBuf>,

    #[arg(long = "seq-col", value_enum, default_value = "consensus")]
    /// Which column the GC content is computed on
    pub seq_col: SeqColumn,
}

#[derive(Serialize)]
struct BinRow {
    bin_start: u64,
    mean_gc: f64,
    repeat_count: usize,
}

impl GcBinsCMD {
    pub fn try_execute(&mut self) -> Result<()> {
        for path in &self.files.clone() {
            println!("Processing file: {}", path.display());
            self.process_file(path)?;
        }
        log::info!("gc-bins has finished succesfully");
        Ok(())
    }

    fn process_file(&self, path: &PathBuf) -> Result<()> {
        let records = read_ultra_file(path)?;

        let rows = bin_gc(
            records.iter().map(|r| {
                let seq = match self.seq_col {
                    SeqColumn::Consensus => &r.consensus,
                    SeqColumn::Sequence => &r.sequence,
                };
                (r.start, gc_content(seq))
            }),
            self.bin_size,
        );

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "repeats".to_string());
        let dir = match &self.outdir {
            Some(d) => d.clone(),
            None => path.parent().map(PathBuf::from).unwrap_or_else(|| PathBuf::from(".")),
        };
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Could not create output directory {}", dir.display()))?;

        let path_tsv = dir.join(format!("{}.gc_by_bin.tsv", stem));
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_writer(File::create(&path_tsv)
                .with_context(|| format!("Could not create {}", path_tsv.display()))?);
        for row in &rows {
            writer.serialize(row)?;
        }
        writer.flush()?;

        let path_svg = dir.join(format!("{}.gc_by_bin.svg", stem));
        let points: Vec<(f64, f64)> = rows
            .iter()
            .map(|r| (r.bin_start as f64 / 1.0e6, r.mean_gc))
            .collect();
        plot::binned_line(
            &path_svg,
            &format!("Mean repeat GC per {} bp bin: {}", self.bin_size, stem),
            "Position (Mb)",
            "Mean GC fraction",
            &points,
        )?;

        println!("  {} bins -> {}", rows.len(), path_tsv.display());
        Ok(())
    }
}

/// Average GC per fixed-width genomic bin, keyed by bin start, in genomic order.
fn bin_gc(items: impl Iterator<Item = (u64, f64)>, bin_size: u64) -> Vec<BinRow> {
    let mut bins: BTreeMap<u64, (f64, usize)> = BTreeMap::new();
    for (start, gc) in items {
        let bin = (start / bin_size) * bin_size;
        let entry = bins.entry(bin).or_insert((0.0, 0));
        entry.0 += gc;
        entry.1 += 1;
    }
    bins.into_iter()
        .map(|(bin_start, (sum, n))| BinRow {
            bin_start,
            mean_gc: sum / n as f64,
            repeat_count: n,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_by_bin_and_averages() {
        let items = vec![(0, 0.4), (500, 0.6), (1_000_000, 0.2)];
        let rows = bin_gc(items.into_iter(), 1_000_000);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].bin_start, 0);
        assert!((rows[0].mean_gc - 0.5).abs() < 1e-12);
        assert_eq!(rows[0].repeat_count, 2);
        assert_eq!(rows[1].bin_start, 1_000_000);
        assert_eq!(rows[1].repeat_count, 1);
    }
}
