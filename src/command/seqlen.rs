use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use bio::io::fasta;
use clap::Args;

#[derive(Args)]
pub struct SeqlenCMD {
    #[arg(value_parser, required = true)]
    /// FASTA files to report; use "-" to read from stdin
    pub files: Vec<PathBuf>,
}

impl SeqlenCMD {
    pub fn try_execute(&mut self) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();

        for path in &self.files {
            if path.as_os_str() == "-" {
                report_lengths(io::stdin().lock(), &mut out)?;
            } else {
                let file = File::open(path)
                    .with_context(|| format!("Could not open FASTA file {}", path.display()))?;
                report_lengths(file, &mut out)?;
            }
        }
        Ok(())
    }
}

/// Print "id<TAB>length" for every record, in input order.
pub fn report_lengths(src: impl Read, out: &mut impl Write) -> Result<()> {
    let reader = fasta::Reader::new(src);
    for record in reader.records() {
        let record = record?;
        writeln!(out, "{}\t{}", record.id(), record.seq().len())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_length_across_wrapped_lines() {
        let fasta_in = b">chr1 assembly v2\nACGT\nACGT\nAC\n>chr2\nGG\n";
        let mut out = Vec::new();
        report_lengths(&fasta_in[..], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "chr1\t10\nchr2\t2\n");
    }
}
