use anyhow::Result;
use clap::Args;
use itertools::Itertools;

#[derive(Args)]
pub struct PairsCMD {
    #[arg(value_parser, required = true)]
    /// Items to enumerate, in order
    pub entries: Vec<String>,
}

impl PairsCMD {
    pub fn try_execute(&mut self) -> Result<()> {
        println!("Entries:");
        for (i, entry) in self.entries.iter().enumerate() {
            println!("  {}\t{}", i, entry);
        }

        println!("Pairs:");
        for pair in ordered_pairs(&self.entries) {
            println!("  {}\t{}", pair.0, pair.1);
        }
        Ok(())
    }
}

/// All unordered pairs, keeping input order within each pair.
pub fn ordered_pairs(entries: &[String]) -> Vec<(&str, &str)> {
    entries
        .iter()
        .map(|s| s.as_str())
        .tuple_combinations::<(_, _)>()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_entries_give_three_pairs() {
        let entries = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let pairs = ordered_pairs(&entries);
        assert_eq!(pairs, vec![("a", "b"), ("a", "c"), ("b", "c")]);
    }

    #[test]
    fn single_entry_gives_no_pairs() {
        let entries = vec!["a".to_string()];
        assert!(ordered_pairs(&entries).is_empty());
    }
}
