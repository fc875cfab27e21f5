use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use bio::io::fasta;
use clap::Args;
use ndarray::Array2;
use regex::Regex;
use strsim::normalized_levenshtein;

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LabelMode {
    /// Label rows by record ID
    Id,
    /// Label rows by the (truncated) sequence itself
    Sequence,
}

#[derive(Args)]
pub struct LevenshteinCMD {
    #[arg(value_parser)]
    /// FASTA of sequences to compare, e.g. per-chromosome consensus monomers
    pub path_in: PathBuf,

    #[arg(short = 'l', long = "labels", value_enum, default_value = "id")]
    pub labels: LabelMode,

    #[arg(short = 'p', long = "pattern", value_parser)]
    /// Regex stripped from every ID before labelling
    pub pattern: Option<String>,

    #[arg(short = 'o', long = "out", value_parser, default_value = "levenshtein_heatmap.svg")]
    pub path_out: PathBuf,

    #[arg(long = "matrix-out", value_parser)]
    /// Also write the similarity matrix as TSV
    pub path_matrix: Option<PathBuf>,
}

const LABEL_WIDTH: usize = 15;

impl LevenshteinCMD {
    pub fn try_execute(&mut self) -> Result<()> {
        let file = File::open(&self.path_in)
            .with_context(|| format!("Could not open FASTA file {}", self.path_in.display()))?;
        let reader = fasta::Reader::new(file);

        let strip = match &self.pattern {
            Some(p) => Some(Regex::new(p).with_context(|| format!("Bad pattern \"{}\"", p))?),
            None => None,
        };

        let mut entries: Vec<(String, String)> = Vec::new();
        for record in reader.records() {
            let record = record?;
            let seq = String::from_utf8_lossy(record.seq()).to_string();
            let raw = match self.labels {
                LabelMode::Id => record.id(),
                LabelMode::Sequence => seq.as_str(),
            };
            let label = make_label(raw, strip.as_ref());
            entries.push((label, seq));
        }
        if entries.len() < 2 {
            bail!("need at least two sequences to compare");
        }
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        let labels: Vec<String> = entries.iter().map(|(l, _)| l.clone()).collect();
        let matrix = similarity_matrix(&entries);

        if let Some(path) = &self.path_matrix {
            write_matrix(path, &labels, &matrix)?;
        }
        crate::plot::heatmap(
            &self.path_out,
            "Pairwise Levenshtein similarity",
            &labels,
            &matrix,
        )?;

        println!("{} sequences -> {}", labels.len(), self.path_out.display());
        log::info!("levenshtein has finished succesfully");
        Ok(())
    }
}

/// Row label: pattern-stripped, then cut to the first `LABEL_WIDTH`
/// characters (not bytes, labels may carry multibyte symbols).
fn make_label(raw: &str, strip: Option<&Regex>) -> String {
    let label = match strip {
        Some(re) => re.replace_all(raw, ""),
        None => raw.into(),
    };
    label.chars().take(LABEL_WIDTH).collect()
}

/// Normalized Levenshtein similarity for every ordered pair; 1.0 on the
/// diagonal.
fn similarity_matrix(entries: &[(String, String)]) -> Array2<f64> {
    let n = entries.len();
    let mut matrix = Array2::zeros((n, n));
    for i in 0..n {
        matrix[[i, i]] = 1.0;
        for j in (i + 1)..n {
            let sim = normalized_levenshtein(&entries[i].1, &entries[j].1);
            matrix[[i, j]] = sim;
            matrix[[j, i]] = sim;
        }
    }
    matrix
}

fn write_matrix(path: &PathBuf, labels: &[String], matrix: &Array2<f64>) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("Could not create {}", path.display()))?;
    writeln!(file, "\t{}", labels.join("\t"))?;
    for (i, label) in labels.iter().enumerate() {
        let row: Vec<String> = (0..labels.len())
            .map(|j| format!("{:.4}", matrix[[i, j]]))
            .collect();
        writeln!(file, "{}\t{}", label, row.join("\t"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_cut_respects_multibyte_ids() {
        // 9 Greek letters = 18 bytes; byte 15 is inside a character
        let label = make_label("ααααααααα", None);
        assert_eq!(label, "ααααααααα");
        let long = make_label("αβγδεζηθικλμνξοπρ", None);
        assert_eq!(long.chars().count(), LABEL_WIDTH);
        assert_eq!(long, "αβγδεζηθικλμνξο");
    }

    #[test]
    fn label_strips_pattern_before_cutting() {
        let re = Regex::new("^cen_").unwrap();
        assert_eq!(make_label("cen_Gm15", Some(&re)), "Gm15");
    }

    #[test]
    fn identical_sequences_score_one() {
        let entries = vec![
            ("a".to_string(), "ACGT".to_string()),
            ("b".to_string(), "ACGT".to_string()),
            ("c".to_string(), "TTTT".to_string()),
        ];
        let m = similarity_matrix(&entries);
        assert!((m[[0, 1]] - 1.0).abs() < 1e-12);
        assert!(m[[0, 2]] < 1.0);
        assert_eq!(m[[1, 2]], m[[2, 1]]);
    }
}
