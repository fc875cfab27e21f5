use std::collections::HashSet;
use std::fs::File;
use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use bio::io::fasta;
use clap::Args;

use crate::utils::read_id_list;

#[derive(Args)]
pub struct SubsetFastaCMD {
    #[arg(short = 'i', value_parser)]
    /// Input FASTA file
    pub path_in: PathBuf,

    #[arg(short = 'l', long = "ids", value_parser)]
    /// File with one sequence ID per line; records with these IDs are kept
    pub path_ids: PathBuf,

    #[arg(short = 'o', value_parser)]
    /// Output FASTA file
    pub path_out: PathBuf,
}

impl SubsetFastaCMD {
    pub fn try_execute(&mut self) -> Result<()> {
        let ids: HashSet<String> = read_id_list(&self.path_ids)?.into_iter().collect();

        let file_in = File::open(&self.path_in)
            .with_context(|| format!("Could not open FASTA file {}", self.path_in.display()))?;
        let file_out = File::create(&self.path_out)
            .with_context(|| format!("Could not create {}", self.path_out.display()))?;

        let (n_seen, n_kept) = subset_records(file_in, &ids, file_out)?;

        println!(
            "Kept {} of {} records, written to {}",
            n_kept,
            n_seen,
            self.path_out.display()
        );
        log::info!("subset-fasta has finished succesfully");
        Ok(())
    }
}

/// Copy records whose ID is in the keep set. Returns (seen, kept).
pub fn subset_records(
    src: impl Read,
    ids: &HashSet<String>,
    dst: impl Write,
) -> Result<(usize, usize)> {
    let reader = fasta::Reader::new(src);
    let mut writer = fasta::Writer::new(dst);

    let mut n_seen = 0;
    let mut n_kept = 0;
    for record in reader.records() {
        let record = record?;
        n_seen += 1;
        if ids.contains(record.id()) {
            writer.write_record(&record)?;
            n_kept += 1;
        }
    }
    writer.flush()?;
    Ok((n_seen, n_kept))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_listed_ids_only() {
        let fasta_in = b">monomer_1 some desc\nACGT\n>monomer_2\nGGGG\n>monomer_3\nTTTT\n";
        let ids: HashSet<String> =
            ["monomer_1".to_string(), "monomer_3".to_string()].into_iter().collect();

        let mut out = Vec::new();
        let (seen, kept) = subset_records(&fasta_in[..], &ids, &mut out).unwrap();
        assert_eq!(seen, 3);
        assert_eq!(kept, 2);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(">monomer_1"));
        assert!(!text.contains(">monomer_2"));
        assert!(text.contains("TTTT"));
    }

    #[test]
    fn empty_id_set_keeps_nothing() {
        let fasta_in = b">a\nAC\n";
        let ids = HashSet::new();
        let mut out = Vec::new();
        let (seen, kept) = subset_records(&fasta_in[..], &ids, &mut out).unwrap();
        assert_eq!((seen, kept), (1, 0));
        assert!(out.is_empty());
    }
}
