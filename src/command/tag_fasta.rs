use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

#[derive(Args)]
pub struct TagFastaCMD {
    #[arg(short = 'i', value_parser)]
    /// Input FASTA file, possibly with bare ">" headers
    pub path_in: PathBuf,

    #[arg(short = 'o', value_parser)]
    /// Output FASTA file
    pub path_out: PathBuf,

    #[arg(short = 'f', long = "id", value_parser)]
    /// Identifier appended to every bare ">" header line
    pub identity: String,
}

impl TagFastaCMD {
    pub fn try_execute(&mut self) -> Result<()> {
        let file_in = File::open(&self.path_in)
            .with_context(|| format!("Could not open FASTA file {}", self.path_in.display()))?;
        let file_out = File::create(&self.path_out)
            .with_context(|| format!("Could not create {}", self.path_out.display()))?;

        let n = tag_headers(file_in, BufWriter::new(file_out), &self.identity)?;
        println!("Tagged {} bare headers with \"{}\"", n, self.identity);
        log::info!("tag-fasta has finished succesfully");
        Ok(())
    }
}

/// Rewrite the file line by line. A header line that is exactly ">" becomes
/// `>{identity}.rpt.{n}` with n counting up from 1; headers that already
/// carry a name pass through untouched, as do sequence lines. Returns the
/// number of headers tagged.
pub fn tag_headers(src: impl Read, mut dst: impl Write, identity: &str) -> Result<usize> {
    let mut seqnum = 1;
    for line in BufReader::new(src).lines() {
        let line = line?;
        if line.trim_end() == ">" {
            writeln!(dst, ">{}.rpt.{}", identity, seqnum)?;
            seqnum += 1;
        } else {
            writeln!(dst, "{}", line)?;
        }
    }
    dst.flush()?;
    Ok(seqnum - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_only_bare_headers_with_counter() {
        let src = b">\nACGT\n>named_already\nGGGG\n>\nTTTT\n";
        let mut out = Vec::new();
        let n = tag_headers(&src[..], &mut out, "cen1").unwrap();
        assert_eq!(n, 2);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, ">cen1.rpt.1\nACGT\n>named_already\nGGGG\n>cen1.rpt.2\nTTTT\n");
    }
}
