use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use bio::io::fasta;
use clap::Args;

use crate::seq::{analyze_ambiguity, AmbiguityReport};

#[derive(Args)]
pub struct ConsensusStatsCMD {
    #[arg(value_parser)]
    /// A consensus sequence, or a FASTA file (.fasta/.fa/.fna) of them
    pub input: String,

    #[arg(long = "cluster-threshold", value_parser, default_value = "5")]
    /// Two N positions closer than this belong to the same cluster
    pub cluster_threshold: usize,
}

impl ConsensusStatsCMD {
    pub fn try_execute(&mut self) -> Result<()> {
        if looks_like_fasta(&self.input) {
            let file = File::open(&self.input)
                .with_context(|| format!("Could not open FASTA file {}", self.input))?;
            let reader = fasta::Reader::new(file);
            for record in reader.records() {
                let record = record?;
                println!("== {} ==", record.id());
                let seq = String::from_utf8_lossy(record.seq()).to_string();
                print_report(&analyze_ambiguity(&seq, self.cluster_threshold));
            }
        } else {
            print_report(&analyze_ambiguity(&self.input, self.cluster_threshold));
        }
        Ok(())
    }
}

fn looks_like_fasta(input: &str) -> bool {
    let path = Path::new(input);
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("fasta") | Some("fa") | Some("fna")
    ) && path.exists()
}

fn print_report(report: &AmbiguityReport) {
    println!("Sequence length: {}", report.seq_length);
    println!("Number of N bases: {}", report.n_count);
    println!("Proportion of N bases: {:.4}", report.n_proportion);
    if report.positions.is_empty() {
        println!("No N bases found");
        return;
    }
    println!("N positions (1-based): {:?}", report.positions);
    if report.clusters.is_empty() {
        println!("No N clusters found");
    } else {
        println!("N clusters ({} total):", report.clusters.len());
        for cluster in &report.clusters {
            println!(
                "  positions {}..{} ({} bases)",
                cluster[0],
                cluster[cluster.len() - 1],
                cluster.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_sequence_is_not_mistaken_for_a_file() {
        assert!(!looks_like_fasta("ACGTNNACGT"));
        assert!(!looks_like_fasta("consensus.fasta"));
    }
}
