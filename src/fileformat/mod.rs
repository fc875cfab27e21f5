pub mod blast;
pub mod chrom_lengths;
pub mod coords;
pub mod gff;
pub mod ultra;

pub use blast::BlastRecord;
pub use chrom_lengths::read_chrom_lengths;
pub use coords::CoordsRecord;
pub use gff::GffRecord;
pub use ultra::UltraRecord;
