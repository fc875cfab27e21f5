use std::fs::File;
use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use bio::io::fasta;
use clap::Args;

#[derive(Args)]
pub struct TrimFastaCMD {
    #[arg(short = 'i', value_parser)]
    /// Input FASTA file
    pub path_in: PathBuf,

    #[arg(short = 'o', value_parser)]
    /// Output FASTA file
    pub path_out: PathBuf,

    #[arg(long = "start", value_parser, default_value = "1")]
    /// First base to keep (1-based, inclusive)
    pub start: usize,

    #[arg(long = "end", value_parser)]
    /// Last base to keep (1-based, inclusive)
    pub end: usize,
}

impl TrimFastaCMD {
    pub fn try_execute(&mut self) -> Result<()> {
        if self.start == 0 {
            bail!("--start is 1-based and must be at least 1");
        }
        if self.end < self.start {
            bail!("--end must not be smaller than --start");
        }

        let file_in = File::open(&self.path_in)
            .with_context(|| format!("Could not open FASTA file {}", self.path_in.display()))?;
        let file_out = File::create(&self.path_out)
            .with_context(|| format!("Could not create {}", self.path_out.display()))?;

        let n = trim_records(file_in, file_out, self.start, self.end)?;
        println!("Trimmed {} records to {}..{}", n, self.start, self.end);
        log::info!("trim-fasta has finished succesfully");
        Ok(())
    }
}

/// Cut every record down to the 1-based inclusive window [start, end],
/// clamped to the record length. A record shorter than start becomes empty.
pub fn trim_records(src: impl Read, dst: impl Write, start: usize, end: usize) -> Result<usize> {
    let reader = fasta::Reader::new(src);
    let mut writer = fasta::Writer::new(dst);

    let mut n = 0;
    for record in reader.records() {
        let record = record?;
        let seq = record.seq();
        let lo = (start - 1).min(seq.len());
        let hi = end.min(seq.len());
        writer.write(record.id(), record.desc(), &seq[lo..hi])?;
        n += 1;
    }
    writer.flush()?;
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_to_window() {
        let fasta_in = b">s1\nAAACCCGGGTTT\n";
        let mut out = Vec::new();
        trim_records(&fasta_in[..], &mut out, 4, 6).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("CCC"));
        assert!(!text.contains("AAA"));
    }

    #[test]
    fn window_clamps_to_sequence_length() {
        let fasta_in = b">s1\nACGT\n";
        let mut out = Vec::new();
        trim_records(&fasta_in[..], &mut out, 3, 100).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("GT"));
    }

    #[test]
    fn start_past_end_of_record_gives_empty_sequence() {
        let fasta_in = b">s1\nACGT\n";
        let mut out = Vec::new();
        trim_records(&fasta_in[..], &mut out, 10, 20).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with(">s1"));
    }
}
