use std::fs::File;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use bio::io::fasta;
use clap::Args;

use crate::seq::consensus::{majority_consensus, trim_by_gap_fraction};
use crate::utils::clustalo::{check_clustalo, run_clustalo};

use super::align::DEFAULT_CLUSTALO;

#[derive(Args)]
pub struct RefineCMD {
    #[arg(short = 'i', value_parser)]
    /// Unaligned FASTA file
    pub path_in: PathBuf,

    #[arg(short = 'o', value_parser)]
    /// Final alignment (FASTA)
    pub path_out: PathBuf,

    #[arg(long = "clustalo", value_parser, default_value = DEFAULT_CLUSTALO)]
    /// Clustal Omega executable
    pub clustalo: String,

    #[arg(long = "max-x", value_parser, default_value = "5")]
    /// Stop once the consensus has at most this many ambiguous positions
    pub max_ambiguous: usize,

    #[arg(long = "trim-threshold", value_parser, default_value = "0.5")]
    /// Drop members whose gap fraction reaches this value
    pub trim_threshold: f64,

    #[arg(long = "consensus-threshold", value_parser, default_value = "0.7")]
    /// Column majority needed to call a base
    pub consensus_threshold: f64,

    #[arg(long = "max-iterations", value_parser, default_value = "10")]
    pub max_iterations: usize,
}

impl RefineCMD {
    /// Align, drop gap-heavy members, re-align, until the consensus is clean
    /// enough or no further members can be dropped.
    pub fn try_execute(&mut self) -> Result<()> {
        check_clustalo(&self.clustalo)?;

        let mut path_current = self.path_in.clone();
        for iteration in 1..=self.max_iterations {
            run_clustalo(&self.clustalo, &path_current, &self.path_out)?;

            let (ids, seqs) = read_alignment(&self.path_out)?;
            if seqs.is_empty() {
                bail!("alignment is empty after iteration {}", iteration);
            }

            let refs: Vec<&str> = seqs.iter().map(|s| s.as_str()).collect();
            let consensus = majority_consensus(&refs, self.consensus_threshold, 'X')?;
            let n_ambiguous = consensus.chars().filter(|&c| c == 'X').count();
            println!(
                "Iteration {}: {} sequences, {} ambiguous positions",
                iteration,
                seqs.len(),
                n_ambiguous
            );
            println!("  {}", consensus);

            if n_ambiguous <= self.max_ambiguous {
                println!("Final alignment written to {}", self.path_out.display());
                log::info!("refine has finished succesfully");
                return Ok(());
            }

            let survivors = trim_by_gap_fraction(&refs, self.trim_threshold);
            if survivors.len() == seqs.len() {
                println!("No members left to trim; keeping the current alignment");
                log::info!("refine has finished succesfully");
                return Ok(());
            }
            if survivors.len() < 2 {
                bail!("trimming left fewer than two sequences");
            }
            log::info!(
                "dropping {} gap-heavy members",
                seqs.len() - survivors.len()
            );

            // re-align the survivors from scratch, without alignment gaps
            let path_trimmed = self.path_out.with_extension("trimmed.fasta");
            write_ungapped(&path_trimmed, &ids, &seqs, &survivors)?;
            path_current = path_trimmed;
        }

        println!(
            "Stopped after {} iterations; alignment is in {}",
            self.max_iterations,
            self.path_out.display()
        );
        log::info!("refine has finished succesfully");
        Ok(())
    }
}

fn read_alignment(path: &PathBuf) -> Result<(Vec<String>, Vec<String>)> {
    let file = File::open(path)
        .with_context(|| format!("Could not open alignment {}", path.display()))?;
    let reader = fasta::Reader::new(file);
    let mut ids = Vec::new();
    let mut seqs = Vec::new();
    for record in reader.records() {
        let record = record?;
        ids.push(record.id().to_string());
        seqs.push(String::from_utf8_lossy(record.seq()).to_string());
    }
    Ok((ids, seqs))
}

fn write_ungapped(
    path: &PathBuf,
    ids: &[String],
    seqs: &[String],
    survivors: &[usize],
) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Could not create {}", path.display()))?;
    let mut writer = fasta::Writer::new(file);
    for &i in survivors {
        let ungapped: String = seqs[i].chars().filter(|&c| c != '-').collect();
        writer.write(&ids[i], None, ungapped.as_bytes())?;
    }
    writer.flush()?;
    Ok(())
}
