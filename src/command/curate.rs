use std::fs::File;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Serialize;

use crate::fileformat::ultra::{read_ultra_file, write_ultra_file, UltraRecord};
use crate::outlier::features::FeatureTable;
use crate::outlier::isolation::isolation_forest_flags;
use crate::outlier::lof::lof_flags;
use crate::outlier::tsne::embed_2d;
use crate::plot::{embedding_scatter, ScatterColor};
use crate::seq::pick_representative;

pub const DEFAULT_PATH_OUT: &str = "curated";

#[derive(Args)]
pub struct CurateCMD {
    #[arg(short = 'i', value_parser)]
    /// Repeat table (TSV)
    pub path_in: PathBuf,

    #[arg(short = 'o', long = "outdir", value_parser, default_value = DEFAULT_PATH_OUT)]
    /// Directory for all tables and plots
    pub outdir: PathBuf,

    #[arg(long = "seq-id", value_parser)]
    /// Keep only rows whose sequence ID contains this substring
    pub seq_id: Option<String>,

    #[arg(long = "start-min", value_parser)]
    /// Keep only rows starting at or after this position
    pub start_min: Option<u64>,

    #[arg(long = "start-max", value_parser)]
    /// Keep only rows starting at or before this position
    pub start_max: Option<u64>,

    #[arg(long = "period", value_parser)]
    /// Keep only rows with exactly this period
    pub period: Option<u64>,

    #[arg(long = "rep-seq", value_parser)]
    /// Representative monomer sequence to score against
    pub rep_seq: Option<String>,

    #[arg(long = "rep-auto", value_parser, default_value = "false")]
    /// Pick the representative automatically: the consensus most similar
    /// on average to all others
    pub rep_auto: bool,

    #[arg(long = "centromere-mid", value_parser)]
    /// Centromere midpoint; enables the distance features
    pub centromere_mid: Option<u64>,

    #[arg(long = "repeat-extend", value_parser, default_value = "3")]
    /// Tandem copies of each monomer used in alignment scoring
    pub repeat_extend: usize,

    #[arg(long = "contamination", value_parser, default_value = "0.2")]
    /// Fraction of rows each detector may flag
    pub contamination: f64,

    #[arg(long = "neighbors", value_parser, default_value = "10")]
    /// Neighbor count for the local outlier factor
    pub neighbors: usize,

    #[arg(long = "min-align", value_parser, default_value = "0.90")]
    /// Minimum alignment score against the representative
    pub min_align: f64,

    #[arg(long = "basic-only", value_parser, default_value = "false")]
    /// Filter on the basic feature set instead of the enhanced one
    pub basic_only: bool,

    #[arg(long = "plots", value_parser, default_value = "false")]
    /// Also render t-SNE embedding scatters
    pub plots: bool,

    #[arg(long = "perplexity", value_parser, default_value = "30.0")]
    pub perplexity: f32,
}

impl CurateCMD {
    pub fn try_execute(&mut self) -> Result<()> {
        if self.rep_seq.is_none() && !self.rep_auto {
            bail!("a representative is required: pass --rep-seq or --rep-auto");
        }
        if !(0.0..=0.5).contains(&self.contamination) {
            bail!("--contamination must lie in [0, 0.5]");
        }

        let params = CurateParams {
            path_in: self.path_in.clone(),
            outdir: self.outdir.clone(),
            seq_id: self.seq_id.clone(),
            start_min: self.start_min,
            start_max: self.start_max,
            period: self.period,
            rep_seq: self.rep_seq.clone(),
            centromere_mid: self.centromere_mid,
            repeat_extend: self.repeat_extend,
            contamination: self.contamination,
            neighbors: self.neighbors,
            min_align: self.min_align,
            basic_only: self.basic_only,
            plots: self.plots,
            perplexity: self.perplexity,
        };
        run(&params)
    }
}

pub struct CurateParams {
    pub path_in: PathBuf,
    pub outdir: PathBuf,
    pub seq_id: Option<String>,
    pub start_min: Option<u64>,
    pub start_max: Option<u64>,
    pub period: Option<u64>,
    /// None means auto-pick
    pub rep_seq: Option<String>,
    pub centromere_mid: Option<u64>,
    pub repeat_extend: usize,
    pub contamination: f64,
    pub neighbors: usize,
    pub min_align: f64,
    pub basic_only: bool,
    pub plots: bool,
    pub perplexity: f32,
}

impl CurateParams {
    fn has_prefilter(&self) -> bool {
        self.seq_id.is_some()
            || self.start_min.is_some()
            || self.start_max.is_some()
            || self.period.is_some()
    }

    fn passes_prefilter(&self, r: &UltraRecord) -> bool {
        if let Some(pat) = &self.seq_id {
            if !r.seq_id.contains(pat) {
                return false;
            }
        }
        if let Some(lo) = self.start_min {
            if r.start < lo {
                return false;
            }
        }
        if let Some(hi) = self.start_max {
            if r.start > hi {
                return false;
            }
        }
        if let Some(p) = self.period {
            if r.period != p {
                return false;
            }
        }
        true
    }
}

/// One fully scored row of the curation table.
#[derive(Serialize)]
struct ScoredRecord {
    seq_id: String,
    start: u64,
    length: u64,
    period: u64,
    score: f64,
    substitutions: u64,
    insertions: u64,
    deletions: u64,
    consensus: String,
    sequence: String,
    gc_content: f64,
    entropy: f64,
    indel_variability: f64,
    distance_from_centromere: Option<f64>,
    normalized_distance: Option<f64>,
    alignment_score: f64,
    /// sklearn-style labels: 1 inlier, -1 outlier
    if_basic: i8,
    lof_basic: i8,
    if_enhanced: i8,
    lof_enhanced: i8,
    kept: bool,
}

pub fn run(params: &CurateParams) -> Result<()> {
    std::fs::create_dir_all(&params.outdir).with_context(|| {
        format!("Could not create output directory {}", params.outdir.display())
    })?;

    // stage 1: prefilter
    let all = read_ultra_file(&params.path_in)?;
    let records: Vec<UltraRecord> = all
        .iter()
        .filter(|r| params.passes_prefilter(r))
        .cloned()
        .collect();
    println!("{} of {} rows pass the prefilter", records.len(), all.len());
    if records.len() < 2 {
        bail!("need at least two rows after the prefilter");
    }

    let prefilter_name = if params.has_prefilter() {
        "prefiltered.tsv"
    } else {
        "input_clean.tsv"
    };
    write_ultra_file(&params.outdir.join(prefilter_name), &records)?;

    // stage 2: representative monomer
    let representative = match &params.rep_seq {
        Some(seq) => seq.clone(),
        None => {
            let consensi: Vec<String> =
                records.iter().map(|r| r.consensus.clone()).collect();
            let (idx, seq) = pick_representative(&consensi)?;
            println!(
                "Auto-picked representative: row {} ({}:{}, period {})",
                idx, records[idx].seq_id, records[idx].start, records[idx].period
            );
            seq
        }
    };
    println!(
        "Representative length {} bp, extended x{} for scoring",
        representative.len(),
        params.repeat_extend.max(1)
    );

    // stages 3-4: features and alignment scores
    let features = FeatureTable::compute(
        &records,
        &representative,
        params.repeat_extend,
        params.centromere_mid,
    );

    // stage 5: outlier detectors on both feature sets
    let basic = features.basic_matrix();
    let enhanced = features.enhanced_matrix();
    let if_basic = isolation_forest_flags::<3>(&basic, params.contamination)?;
    let if_enhanced = isolation_forest_flags::<5>(&enhanced, params.contamination)?;
    let lof_basic = lof_flags(&basic, params.neighbors, params.contamination)?;
    let lof_enhanced = lof_flags(&enhanced, params.neighbors, params.contamination)?;

    // stage 6: combined keep decision
    let (if_used, lof_used) = if params.basic_only {
        (&if_basic, &lof_basic)
    } else {
        (&if_enhanced, &lof_enhanced)
    };
    let keep: Vec<bool> = (0..records.len())
        .map(|i| !if_used[i] && !lof_used[i] && features.alignment_score[i] >= params.min_align)
        .collect();

    // stage 7: tables and breakdown
    let scored: Vec<ScoredRecord> = records
        .iter()
        .enumerate()
        .map(|(i, r)| ScoredRecord {
            seq_id: r.seq_id.clone(),
            start: r.start,
            length: r.length,
            period: r.period,
            score: r.score,
            substitutions: r.substitutions,
            insertions: r.insertions,
            deletions: r.deletions,
            consensus: r.consensus.clone(),
            sequence: r.sequence.clone(),
            gc_content: features.gc_content[i],
            entropy: features.entropy[i],
            indel_variability: features.indel_variability[i],
            distance_from_centromere: features.distance_from_centromere[i],
            normalized_distance: features.normalized_distance[i],
            alignment_score: features.alignment_score[i],
            if_basic: to_label(if_basic[i]),
            lof_basic: to_label(lof_basic[i]),
            if_enhanced: to_label(if_enhanced[i]),
            lof_enhanced: to_label(lof_enhanced[i]),
            kept: keep[i],
        })
        .collect();

    write_scored(&params.outdir.join("scored_full.tsv"), &scored)?;
    write_scored_subset(&params.outdir.join("kept.tsv"), &scored, true)?;
    write_scored_subset(&params.outdir.join("outliers.tsv"), &scored, false)?;

    print_breakdown(&scored, &features.alignment_score, if_used, lof_used, params);

    // stage 8: embeddings, best effort
    if params.plots {
        let plots = [
            ("tsne_if_basic.svg", &basic, ScatterColor::Flags(&if_basic)),
            ("tsne_lof_basic.svg", &basic, ScatterColor::Flags(&lof_basic)),
            (
                "tsne_if_enhanced.svg",
                &enhanced,
                ScatterColor::Flags(&if_enhanced),
            ),
            (
                "tsne_lof_enhanced.svg",
                &enhanced,
                ScatterColor::Flags(&lof_enhanced),
            ),
            (
                "tsne_align_basic.svg",
                &basic,
                ScatterColor::Gradient(&features.alignment_score),
            ),
            (
                "tsne_align_enhanced.svg",
                &enhanced,
                ScatterColor::Gradient(&features.alignment_score),
            ),
        ];
        for (name, matrix, coloring) in plots {
            let path = params.outdir.join(name);
            if let Err(e) = render_embedding(&path, matrix, params.perplexity, coloring) {
                log::warn!("skipping plot {}: {:#}", name, e);
            }
        }
    }

    log::info!("curate has finished succesfully");
    Ok(())
}

fn to_label(outlier: bool) -> i8 {
    if outlier {
        -1
    } else {
        1
    }
}

fn render_embedding(
    path: &PathBuf,
    matrix: &ndarray::Array2<f64>,
    perplexity: f32,
    coloring: ScatterColor,
) -> Result<()> {
    let points = embed_2d(matrix, perplexity)?;
    let title = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "embedding".to_string());
    embedding_scatter(path, &title, &points, coloring)
}

fn write_scored(path: &PathBuf, scored: &[ScoredRecord]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Could not create {}", path.display()))?;
    let mut writer = csv::WriterBuilder::new().delimiter(b'\t').from_writer(file);
    for row in scored {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_scored_subset(path: &PathBuf, scored: &[ScoredRecord], kept: bool) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Could not create {}", path.display()))?;
    let mut writer = csv::WriterBuilder::new().delimiter(b'\t').from_writer(file);
    for row in scored.iter().filter(|r| r.kept == kept) {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn print_breakdown(
    scored: &[ScoredRecord],
    align: &[f64],
    if_used: &[bool],
    lof_used: &[bool],
    params: &CurateParams,
) {
    let n = scored.len();
    let n_kept = scored.iter().filter(|r| r.kept).count();
    let n_outlier_only = (0..n)
        .filter(|&i| (if_used[i] || lof_used[i]) && align[i] >= params.min_align)
        .count();
    let n_align_only = (0..n)
        .filter(|&i| !if_used[i] && !lof_used[i] && align[i] < params.min_align)
        .count();
    let n_both = n - n_kept - n_outlier_only - n_align_only;

    let set = if params.basic_only { "basic" } else { "enhanced" };
    println!("Filtering on the {} feature set:", set);
    println!("  total rows:              {}", n);
    println!("  kept:                    {}", n_kept);
    println!("  removed, outlier only:   {}", n_outlier_only);
    println!(
        "  removed, align < {:.2}:    {}",
        params.min_align, n_align_only
    );
    println!("  removed, both reasons:   {}", n_both);
    println!("Tables written to {}", params.outdir.display());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(seq_id: &str, start: u64, period: u64) -> UltraRecord {
        UltraRecord {
            seq_id: seq_id.to_string(),
            start,
            length: period * 10,
            period,
            score: 500.0,
            substitutions: 2,
            insertions: 1,
            deletions: 0,
            consensus: "ACGTACGT".to_string(),
            sequence: "ACGTACGTACGTACGT".to_string(),
        }
    }

    fn params() -> CurateParams {
        CurateParams {
            path_in: PathBuf::new(),
            outdir: PathBuf::new(),
            seq_id: None,
            start_min: None,
            start_max: None,
            period: None,
            rep_seq: None,
            centromere_mid: None,
            repeat_extend: 3,
            contamination: 0.2,
            neighbors: 10,
            min_align: 0.9,
            basic_only: false,
            plots: false,
            perplexity: 30.0,
        }
    }

    #[test]
    fn prefilter_is_conjunctive() {
        let mut p = params();
        p.seq_id = Some("chr1".to_string());
        p.start_min = Some(100);
        p.start_max = Some(200);
        p.period = Some(171);

        assert!(p.passes_prefilter(&record("chr1", 150, 171)));
        assert!(!p.passes_prefilter(&record("chr2", 150, 171)));
        assert!(!p.passes_prefilter(&record("chr1", 50, 171)));
        assert!(!p.passes_prefilter(&record("chr1", 250, 171)));
        assert!(!p.passes_prefilter(&record("chr1", 150, 170)));
    }

    #[test]
    fn no_filter_passes_everything() {
        let p = params();
        assert!(!p.has_prefilter());
        assert!(p.passes_prefilter(&record("scaffold_99", 0, 7)));
    }

    #[test]
    fn labels_follow_sklearn_convention() {
        assert_eq!(to_label(true), -1);
        assert_eq!(to_label(false), 1);
    }
}
