use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;

use crate::fileformat::read_chrom_lengths;
use crate::fileformat::blast::read_blast_file;
use crate::fileformat::gff::read_gff_file;
use crate::fileformat::ultra::read_ultra_file;
use crate::plot::{self, IdeogramChrom, IdeogramTrack, TrackPaint};
use crate::stats::window_density;
use crate::utils::{natural_chrom_sort, parse_range_spec};

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum IdeogramFormat {
    Ultra,
    Blast,
    Gff,
}

#[derive(Args)]
pub struct IdeogramCMD {
    #[arg(short = 'i', value_parser)]
    /// Repeat annotation file
    pub path_in: PathBuf,

    #[arg(long = "format", value_enum, default_value = "ultra")]
    pub format: IdeogramFormat,

    #[arg(short = 'r', long = "class", value_parser)]
    /// Period classes to draw as tracks, e.g. -r 171 -r 165-178 (ultra format)
    pub classes: Vec<String>,

    #[arg(long = "feature-type", value_parser, default_value = "dispersed_repeat")]
    /// GFF feature type to draw (gff format)
    pub feature_type: String,

    #[arg(short = 'l', long = "lengths", value_parser)]
    /// Two-column file with chromosome lengths; without it lengths come from
    /// the furthest annotated position
    pub path_lengths: Option<PathBuf>,

    #[arg(short = 'w', long = "window", value_parser)]
    /// Window size in bp; with it tracks become shaded densities instead of
    /// raw intervals
    pub window_size: Option<u64>,

    #[arg(short = 'o', long = "out", value_parser, default_value = "repeat_ideogram.svg")]
    pub path_out: PathBuf,

    #[arg(long = "exclude", value_parser, default_value = "scaffold")]
    /// Drop sequences whose name contains this substring
    pub exclude: String,
}

/// class label -> chromosome -> (start, length) intervals
type ClassIntervals = Vec<(String, HashMap<String, Vec<(u64, u64)>>)>;

impl IdeogramCMD {
    pub fn try_execute(&mut self) -> Result<()> {
        let classes = self.collect_intervals()?;
        if classes.iter().all(|(_, per_chrom)| per_chrom.is_empty()) {
            bail!("no annotations matched the requested classes");
        }

        let lengths = self.chrom_lengths(&classes)?;
        let chroms = self.build_chroms(&classes, &lengths);

        plot::ideogram(&self.path_out, &chroms)?;
        println!(
            "{} chromosomes, {} tracks -> {}",
            chroms.len(),
            classes.len(),
            self.path_out.display()
        );
        log::info!("ideogram has finished succesfully");
        Ok(())
    }

    fn collect_intervals(&self) -> Result<ClassIntervals> {
        let mut classes: ClassIntervals = Vec::new();
        match self.format {
            IdeogramFormat::Ultra => {
                if self.classes.is_empty() {
                    bail!("ultra format needs at least one period class, e.g. -r 171");
                }
                let records = read_ultra_file(&self.path_in)?;
                for spec in &self.classes {
                    let (lo, hi) = parse_range_spec(spec)?;
                    let mut per_chrom: HashMap<String, Vec<(u64, u64)>> = HashMap::new();
                    for r in &records {
                        if r.period >= lo && r.period <= hi && !self.excluded(&r.seq_id) {
                            per_chrom
                                .entry(r.seq_id.clone())
                                .or_default()
                                .push((r.start, r.length));
                        }
                    }
                    classes.push((format!("period {}", spec), per_chrom));
                }
            }
            IdeogramFormat::Blast => {
                let records = read_blast_file(&self.path_in)?;
                let mut queries: Vec<String> =
                    records.iter().map(|r| r.qseqid.clone()).collect();
                queries.sort();
                queries.dedup();
                for query in queries {
                    let mut per_chrom: HashMap<String, Vec<(u64, u64)>> = HashMap::new();
                    for r in &records {
                        if r.qseqid == query && !self.excluded(&r.sseqid) {
                            let (start, len) = r.subject_interval();
                            per_chrom.entry(r.sseqid.clone()).or_default().push((start, len));
                        }
                    }
                    classes.push((query, per_chrom));
                }
            }
            IdeogramFormat::Gff => {
                let records = read_gff_file(&self.path_in)?;
                let mut per_chrom: HashMap<String, Vec<(u64, u64)>> = HashMap::new();
                for r in &records {
                    if r.feature_type == self.feature_type && !self.excluded(&r.seqid) {
                        per_chrom.entry(r.seqid.clone()).or_default().push(r.interval());
                    }
                }
                classes.push((self.feature_type.clone(), per_chrom));
            }
        }
        Ok(classes)
    }

    fn excluded(&self, name: &str) -> bool {
        !self.exclude.is_empty() && name.contains(&self.exclude)
    }

    /// Chromosome order and lengths, either from the lengths file (which also
    /// fixes the order) or inferred from the annotations themselves.
    fn chrom_lengths(&self, classes: &ClassIntervals) -> Result<Vec<(String, u64)>> {
        if let Some(path) = &self.path_lengths {
            return read_chrom_lengths(path);
        }

        let mut max_end: HashMap<String, u64> = HashMap::new();
        for (_, per_chrom) in classes {
            for (name, intervals) in per_chrom {
                let end = intervals.iter().map(|&(s, l)| s + l).max().unwrap_or(0);
                let entry = max_end.entry(name.clone()).or_insert(0);
                *entry = (*entry).max(end);
            }
        }
        let names: Vec<String> = max_end.keys().cloned().collect();
        Ok(natural_chrom_sort(&names)
            .into_iter()
            .map(|name| {
                let len = max_end.get(&name).copied().unwrap_or(0);
                (name, len)
            })
            .collect())
    }

    fn build_chroms(
        &self,
        classes: &ClassIntervals,
        lengths: &[(String, u64)],
    ) -> Vec<IdeogramChrom> {
        // densities are shaded against the class-wide maximum so the same
        // tint means the same count on every chromosome
        let class_max: Vec<u64> = match self.window_size {
            Some(w) => classes
                .iter()
                .map(|(_, per_chrom)| {
                    lengths
                        .iter()
                        .filter_map(|(name, len)| per_chrom.get(name).map(|iv| (iv, *len)))
                        .flat_map(|(iv, len)| window_density(iv, len, w))
                        .max()
                        .unwrap_or(1)
                })
                .collect(),
            None => vec![1; classes.len()],
        };

        lengths
            .iter()
            .map(|(name, length)| {
                let tracks = classes
                    .iter()
                    .enumerate()
                    .map(|(i, (label, per_chrom))| {
                        let intervals =
                            per_chrom.get(name).cloned().unwrap_or_default();
                        let paint = match self.window_size {
                            Some(w) => TrackPaint::Windows {
                                window_size: w,
                                counts: window_density(&intervals, *length, w),
                                max_count: class_max[i].max(1),
                            },
                            None => TrackPaint::Intervals(intervals),
                        };
                        IdeogramTrack {
                            label: label.clone(),
                            color: plot::class_color(i, classes.len()),
                            paint,
                        }
                    })
                    .collect();
                IdeogramChrom {
                    name: name.clone(),
                    length: *length,
                    tracks,
                }
            })
            .collect()
    }
}
