//! Majority-rule consensus over an aligned set of equal-length sequences,
//! and gap-based trimming of alignment members.

use anyhow::{bail, Result};

/// Column-wise majority consensus. A column emits its most frequent symbol
/// (uppercased, gaps included) when that symbol's fraction reaches
/// `threshold`; otherwise the ambiguity character. Sequences must have
/// equal length. An exact count tie resolves to the highest byte value
/// ('T' over 'A'), deterministically.
pub fn majority_consensus(seqs: &[&str], threshold: f64, ambiguous: char) -> Result<String> {
    if seqs.is_empty() {
        bail!("cannot build a consensus from zero sequences");
    }
    let width = seqs[0].len();
    if seqs.iter().any(|s| s.len() != width) {
        bail!("aligned sequences must all have the same length");
    }

    let rows: Vec<&[u8]> = seqs.iter().map(|s| s.as_bytes()).collect();
    let mut consensus = String::with_capacity(width);
    for col in 0..width {
        let mut counts = [0usize; 256];
        for row in &rows {
            counts[row[col].to_ascii_uppercase() as usize] += 1;
        }
        let (best, count) = counts
            .iter()
            .enumerate()
            .max_by_key(|&(_, &c)| c)
            .expect("counts is never empty");
        if (*count as f64 / rows.len() as f64) >= threshold {
            consensus.push(best as u8 as char);
        } else {
            consensus.push(ambiguous);
        }
    }
    Ok(consensus)
}

/// Keep only alignment members whose gap fraction is below `threshold`.
/// Returns the indices of the survivors, preserving input order.
pub fn trim_by_gap_fraction(seqs: &[&str], threshold: f64) -> Vec<usize> {
    seqs.iter()
        .enumerate()
        .filter(|(_, s)| {
            if s.is_empty() {
                return false;
            }
            let gaps = s.bytes().filter(|&b| b == b'-').count();
            (gaps as f64 / s.len() as f64) < threshold
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unanimous_column() {
        let c = majority_consensus(&["ACGT", "ACGT", "ACGT"], 0.7, 'X').unwrap();
        assert_eq!(c, "ACGT");
    }

    #[test]
    fn test_threshold_produces_ambiguity() {
        // column 0: A,A,C -> 2/3 < 0.7 -> X; column 1: all G
        let c = majority_consensus(&["AG", "AG", "CG"], 0.7, 'X').unwrap();
        assert_eq!(c, "XG");
        let c = majority_consensus(&["AG", "AG", "CG"], 0.5, 'X').unwrap();
        assert_eq!(c, "AG");
    }

    #[test]
    fn test_exact_tie_resolves_to_highest_byte() {
        let c = majority_consensus(&["A", "T"], 0.5, 'X').unwrap();
        assert_eq!(c, "T");
    }

    #[test]
    fn test_gap_wins_column() {
        let c = majority_consensus(&["A-", "A-", "A-"], 0.7, 'X').unwrap();
        assert_eq!(c, "A-");
    }

    #[test]
    fn test_length_mismatch() {
        assert!(majority_consensus(&["AC", "ACG"], 0.7, 'X').is_err());
    }

    #[test]
    fn test_trim_by_gap_fraction() {
        let kept = trim_by_gap_fraction(&["ACGT", "AC--", "----"], 0.5);
        assert_eq!(kept, vec![0]);
        let kept = trim_by_gap_fraction(&["ACGT", "AC--"], 0.6);
        assert_eq!(kept, vec![0, 1]);
    }
}
