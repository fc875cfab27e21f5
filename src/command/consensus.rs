use std::fs::File;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use bio::io::fasta;
use clap::Args;

use crate::seq::consensus::majority_consensus;

#[derive(Args)]
pub struct ConsensusCMD {
    #[arg(value_parser)]
    /// Multiple alignment (FASTA, all records equal length)
    pub path_in: PathBuf,

    #[arg(value_parser)]
    /// Minimum fraction a base needs to win a column
    pub threshold: f64,

    #[arg(long = "ambiguous", value_parser, default_value = "X")]
    /// Character written where no base reaches the threshold
    pub ambiguous: char,
}

impl ConsensusCMD {
    pub fn try_execute(&mut self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            bail!("threshold must lie in [0, 1]");
        }

        let file = File::open(&self.path_in)
            .with_context(|| format!("Could not open alignment {}", self.path_in.display()))?;
        let reader = fasta::Reader::new(file);

        let mut seqs = Vec::new();
        for record in reader.records() {
            let record = record?;
            seqs.push(String::from_utf8_lossy(record.seq()).to_string());
        }

        let refs: Vec<&str> = seqs.iter().map(|s| s.as_str()).collect();
        let consensus = majority_consensus(&refs, self.threshold, self.ambiguous)?;
        println!("{}", consensus);
        Ok(())
    }
}
