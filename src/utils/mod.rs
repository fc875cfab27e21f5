pub mod chrom_order;
pub mod clustalo;
pub mod range_spec;

pub use chrom_order::{natural_chrom_sort, shorten_after_last_dot};
pub use range_spec::parse_range_spec;
pub use clustalo::{check_clustalo, run_clustalo};

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};

/// Read a list of sequence IDs, one per line. Blank lines are skipped.
pub fn read_id_list(path: &Path) -> Result<Vec<String>> {
    let file =
        File::open(path).with_context(|| format!("could not open ID list {}", path.display()))?;
    let mut ids = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        let id = line.trim();
        if !id.is_empty() {
            ids.push(id.to_string());
        }
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_id_list_skips_blanks() {
        let mut tmp = std::env::temp_dir();
        tmp.push("repkit_idlist_test.txt");
        let mut f = File::create(&tmp).unwrap();
        writeln!(f, "seq1\n\nseq2  \nseq3").unwrap();
        drop(f);

        let ids = read_id_list(&tmp).unwrap();
        assert_eq!(ids, vec!["seq1", "seq2", "seq3"]);
        std::fs::remove_file(&tmp).ok();
    }
}
