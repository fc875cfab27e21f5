use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use bio::io::fasta;
use clap::Args;

use crate::fileformat::ultra::{read_ultra_file, UltraRecord};

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SeqColumn {
    /// Consensus repeat unit
    Consensus,
    /// Full repeat array sequence
    Sequence,
}

#[derive(Args)]
pub struct Tsv2FastaCMD {
    #[arg(short = 'i', value_parser)]
    /// Repeat table (TSV)
    pub path_in: PathBuf,

    #[arg(short = 'o', value_parser)]
    /// Output FASTA file
    pub path_out: PathBuf,

    #[arg(long = "seq-col", value_enum, default_value = "consensus")]
    /// Which column becomes the FASTA sequence
    pub seq_col: SeqColumn,
}

impl Tsv2FastaCMD {
    pub fn try_execute(&mut self) -> Result<()> {
        let records = read_ultra_file(&self.path_in)?;

        let file_out = File::create(&self.path_out)
            .with_context(|| format!("Could not create {}", self.path_out.display()))?;
        let mut writer = fasta::Writer::new(file_out);

        for record in &records {
            let seq = match self.seq_col {
                SeqColumn::Consensus => &record.consensus,
                SeqColumn::Sequence => &record.sequence,
            };
            writer.write(&fasta_id(record), None, seq.as_bytes())?;
        }
        writer.flush()?;

        println!("Wrote {} records to {}", records.len(), self.path_out.display());
        log::info!("tsv2fasta has finished succesfully");
        Ok(())
    }
}

/// Header carries enough to trace a repeat back to its genomic locus.
pub fn fasta_id(record: &UltraRecord) -> String {
    format!(
        "{}_{}_{}_{}",
        record.seq_id, record.start, record.length, record.period
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fileformat::ultra::read_ultra;

    #[test]
    fn header_encodes_locus() {
        let tsv = b"chr1\t100\t342\t171\t500.0\t3\t1\t0\tACGT\tACGTACGT\n";
        let records = read_ultra(&tsv[..]).unwrap();
        assert_eq!(fasta_id(&records[0]), "chr1_100_342_171");
    }
}
