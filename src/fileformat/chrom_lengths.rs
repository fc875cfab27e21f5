use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};

/// Read a whitespace-separated `chromosome length` file, preserving the
/// input order for display.
pub fn read_chrom_lengths_from(src: impl Read) -> Result<Vec<(String, u64)>> {
    let mut lengths = Vec::new();
    for (i, line) in BufReader::new(src).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let mut fields = line.split_whitespace();
        match (fields.next(), fields.next()) {
            (Some(chrom), Some(len)) => {
                let len: u64 = len
                    .parse()
                    .with_context(|| format!("bad length on line {}", i + 1))?;
                lengths.push((chrom.to_string(), len));
            }
            _ => bail!("line {} does not look like 'chromosome length'", i + 1),
        }
    }
    Ok(lengths)
}

pub fn read_chrom_lengths(path: &Path) -> Result<Vec<(String, u64)>> {
    let file = File::open(path)
        .with_context(|| format!("could not open chromosome length file {}", path.display()))?;
    read_chrom_lengths_from(file).with_context(|| format!("while reading {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_preserves_order() {
        let input = "Gm02 48000000\nGm01\t56000000\n";
        let lengths = read_chrom_lengths_from(input.as_bytes()).unwrap();
        assert_eq!(
            lengths,
            vec![("Gm02".to_string(), 48000000), ("Gm01".to_string(), 56000000)]
        );
    }

    #[test]
    fn test_malformed_line() {
        assert!(read_chrom_lengths_from("Gm01\n".as_bytes()).is_err());
        assert!(read_chrom_lengths_from("Gm01 abc\n".as_bytes()).is_err());
    }
}
