use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use bio::io::fasta;
use clap::Args;

use crate::utils::clustalo::{check_clustalo, run_clustalo};

pub const DEFAULT_CLUSTALO: &str = "clustalo";

#[derive(Args)]
pub struct AlignCMD {
    #[arg(short = 'i', value_parser)]
    /// Unaligned FASTA file
    pub path_in: PathBuf,

    #[arg(short = 'o', value_parser)]
    /// Output alignment (FASTA)
    pub path_out: PathBuf,

    #[arg(long = "clustalo", value_parser, default_value = DEFAULT_CLUSTALO)]
    /// Clustal Omega executable
    pub clustalo: String,
}

impl AlignCMD {
    pub fn try_execute(&mut self) -> Result<()> {
        check_clustalo(&self.clustalo)?;
        run_clustalo(&self.clustalo, &self.path_in, &self.path_out)?;

        let file = File::open(&self.path_out)
            .with_context(|| format!("Could not open alignment {}", self.path_out.display()))?;
        let reader = fasta::Reader::new(file);
        let mut n = 0;
        let mut width = 0;
        for record in reader.records() {
            let record = record?;
            n += 1;
            width = width.max(record.seq().len());
        }

        println!(
            "Aligned {} sequences, alignment length {} -> {}",
            n,
            width,
            self.path_out.display()
        );
        log::info!("align has finished succesfully");
        Ok(())
    }
}
