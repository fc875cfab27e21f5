use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use regex::Regex;

use crate::fileformat::blast::{read_blast_file, write_blast_file, BlastRecord};
use crate::stats::value_counts;
use crate::utils::natural_chrom_sort;

#[derive(Args)]
pub struct FilterBlastCMD {
    #[arg(short = 'i', value_parser)]
    /// BLAST tabular output (outfmt 6)
    pub path_in: PathBuf,

    #[arg(short = 'o', long = "outdir", value_parser, default_value = ".")]
    /// Directory for the per-chromosome tables
    pub outdir: PathBuf,

    #[arg(long = "min-pident", value_parser, default_value = "90.0")]
    /// Minimum percent identity
    pub min_pident: f64,

    #[arg(long = "min-length", value_parser, default_value = "65")]
    /// Minimum alignment length
    pub min_length: u64,

    #[arg(long = "max-length", value_parser, default_value = "174")]
    /// Maximum alignment length
    pub max_length: u64,

    #[arg(long = "chrom-pattern", value_parser, default_value = "Chr")]
    /// Regex; only subjects matching it count as chromosomes
    pub chrom_pattern: String,
}

impl FilterBlastCMD {
    pub fn try_execute(&mut self) -> Result<()> {
        let pattern = Regex::new(&self.chrom_pattern)
            .with_context(|| format!("Bad chromosome pattern \"{}\"", self.chrom_pattern))?;

        let mut records = read_blast_file(&self.path_in)?;
        records.sort_by(|a, b| {
            a.sseqid.cmp(&b.sseqid).then(a.sstart.cmp(&b.sstart))
        });

        println!("Whole genome query counts:");
        print_counts(&value_counts(records.iter().map(|r| r.qseqid.as_str())));

        let mut chrom_names: Vec<String> = records
            .iter()
            .filter(|r| pattern.is_match(&r.sseqid))
            .map(|r| r.sseqid.clone())
            .collect();
        chrom_names.sort();
        chrom_names.dedup();
        let chrom_names = natural_chrom_sort(&chrom_names);

        std::fs::create_dir_all(&self.outdir).with_context(|| {
            format!("Could not create output directory {}", self.outdir.display())
        })?;

        for chrom in &chrom_names {
            let kept: Vec<BlastRecord> = records
                .iter()
                .filter(|r| &r.sseqid == chrom && self.passes(r))
                .cloned()
                .collect();

            let path_out = self.outdir.join(format!("out.{}.tsv", chrom));
            write_blast_file(&path_out, &kept)?;

            println!("{} ({} hits kept):", chrom, kept.len());
            print_counts(&value_counts(kept.iter().map(|r| r.qseqid.as_str())));
        }

        log::info!("filter-blast has finished succesfully");
        Ok(())
    }

    fn passes(&self, r: &BlastRecord) -> bool {
        r.pident >= self.min_pident && r.length >= self.min_length && r.length <= self.max_length
    }
}

fn print_counts(counts: &[(String, u64)]) {
    for (name, n) in counts {
        println!("  {}\t{}", name, n);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fileformat::blast::read_blast;

    fn cmd() -> FilterBlastCMD {
        FilterBlastCMD {
            path_in: PathBuf::new(),
            outdir: PathBuf::new(),
            min_pident: 90.0,
            min_length: 65,
            max_length: 174,
            chrom_pattern: "Chr".to_string(),
        }
    }

    #[test]
    fn identity_and_length_bounds() {
        let tsv = b"mono\tChr1\t95.0\t100\t1\t0\t1\t100\t500\t599\t1e-30\t180\n\
                    mono\tChr1\t85.0\t100\t1\t0\t1\t100\t700\t799\t1e-30\t180\n\
                    mono\tChr1\t95.0\t60\t1\t0\t1\t60\t900\t959\t1e-10\t90\n";
        let records = read_blast(&tsv[..]).unwrap();
        let cmd = cmd();
        let kept: Vec<_> = records.iter().filter(|r| cmd.passes(r)).collect();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].sstart, 500);
    }
}
