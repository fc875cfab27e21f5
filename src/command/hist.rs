use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;

use crate::fileformat::ultra::{read_ultra_file, UltraRecord};
use crate::plot;
use crate::utils::{natural_chrom_sort, parse_range_spec, shorten_after_last_dot};

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum HistMode {
    /// Histogram of repeat unit periods
    Periods,
    /// Per-chromosome distribution of array lengths for one period class
    Arrays,
}

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LengthUnits {
    Kb,
    Bp,
}

#[derive(Args)]
pub struct HistCMD {
    #[arg(short = 'f', long = "file", value_parser)]
    /// Repeat table (TSV)
    pub path_in: PathBuf,

    #[arg(short = 'm', long = "mode", value_enum, default_value = "periods")]
    pub mode: HistMode,

    #[arg(short = 'x', long = "period", value_parser)]
    /// Period selection, a single value ("171") or a range ("165-178")
    pub period: Option<String>,

    #[arg(short = 'b', long = "bins", value_parser, default_value = "100")]
    pub bins: usize,

    #[arg(short = 'o', long = "out", value_parser, default_value = "ultra_hist.svg")]
    pub path_out: PathBuf,

    #[arg(long = "logx", value_parser, default_value = "false")]
    /// Log-scale x axis (periods mode)
    pub logx: bool,

    #[arg(long = "highlight", value_parser)]
    /// Draw values equal to this in a second color (periods mode)
    pub highlight: Option<f64>,

    #[arg(long = "yunits", value_enum, default_value = "kb")]
    /// Units for array lengths (arrays mode)
    pub yunits: LengthUnits,

    #[arg(long = "full-labels", value_parser, default_value = "false")]
    /// Keep full sequence names instead of the part after the last dot
    pub full_labels: bool,
}

impl HistCMD {
    pub fn try_execute(&mut self) -> Result<()> {
        let mut records = read_ultra_file(&self.path_in)?;

        if let Some(spec) = &self.period {
            let (lo, hi) = parse_range_spec(spec)?;
            records.retain(|r| r.period >= lo && r.period <= hi);
        }
        if records.is_empty() {
            bail!("no repeats left after period selection");
        }

        match self.mode {
            HistMode::Periods => self.plot_periods(&records),
            HistMode::Arrays => self.plot_arrays(&records),
        }
    }

    fn plot_periods(&self, records: &[UltraRecord]) -> Result<()> {
        let values: Vec<f64> = records.iter().map(|r| r.period as f64).collect();
        let selection = match &self.period {
            Some(spec) => format!(" (period {})", spec),
            None => String::new(),
        };
        plot::histogram_plot(
            &self.path_out,
            &format!("Repeat period distribution{}", selection),
            "Period (bp)",
            &values,
            self.bins,
            self.logx,
            self.highlight,
        )?;
        println!("{} repeats -> {}", values.len(), self.path_out.display());
        log::info!("hist has finished succesfully");
        Ok(())
    }

    fn plot_arrays(&self, records: &[UltraRecord]) -> Result<()> {
        if self.period.is_none() {
            bail!("arrays mode needs a period selection, e.g. -x 165-178");
        }

        let mut by_chrom: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for r in records {
            let len = match self.yunits {
                LengthUnits::Kb => r.length as f64 / 1000.0,
                LengthUnits::Bp => r.length as f64,
            };
            by_chrom.entry(r.seq_id.clone()).or_default().push(len);
        }

        let names: Vec<String> = by_chrom.keys().cloned().collect();
        let ordered = natural_chrom_sort(&names);
        let labels = if self.full_labels {
            ordered.clone()
        } else {
            shorten_after_last_dot(&ordered)
        };
        let groups: Vec<(String, Vec<f64>)> = ordered
            .iter()
            .zip(labels)
            .map(|(name, label)| (label, by_chrom.remove(name).unwrap_or_default()))
            .collect();

        let units = match self.yunits {
            LengthUnits::Kb => "kb",
            LengthUnits::Bp => "bp",
        };
        let spec = self.period.as_deref().unwrap_or("");
        plot::chrom_boxes(
            &self.path_out,
            &format!("Array lengths per chromosome (period {})", spec),
            &format!("Array length ({})", units),
            &groups,
            true,
        )?;
        println!("{} chromosomes -> {}", groups.len(), self.path_out.display());
        log::info!("hist has finished succesfully");
        Ok(())
    }
}
