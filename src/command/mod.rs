pub mod align;
pub mod consensus;
pub mod consensus_stats;
pub mod curate;
pub mod filter_blast;
pub mod filter_coords;
pub mod gc_bins;
pub mod hist;
pub mod ideogram;
pub mod levenshtein;
pub mod pairs;
pub mod refine;
pub mod seqlen;
pub mod subset_fasta;
pub mod tag_fasta;
pub mod trim_fasta;
pub mod tsv2fasta;

pub use subset_fasta::SubsetFastaCMD;
pub use trim_fasta::TrimFastaCMD;
pub use seqlen::SeqlenCMD;
pub use tag_fasta::TagFastaCMD;
pub use tsv2fasta::Tsv2FastaCMD;

pub use gc_bins::GcBinsCMD;
pub use hist::HistCMD;
pub use ideogram::IdeogramCMD;

pub use filter_blast::FilterBlastCMD;
pub use filter_coords::FilterCoordsCMD;

pub use align::AlignCMD;
pub use refine::RefineCMD;
pub use consensus::ConsensusCMD;
pub use consensus_stats::ConsensusStatsCMD;

pub use pairs::PairsCMD;
pub use levenshtein::LevenshteinCMD;

pub use curate::CurateCMD;
pub use curate::CurateParams;
