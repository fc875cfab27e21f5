use std::process::ExitCode;

use clap::{Parser, Subcommand};
use repkit::command;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    SubsetFasta(command::SubsetFastaCMD),
    TrimFasta(command::TrimFastaCMD),
    Seqlen(command::SeqlenCMD),
    TagFasta(command::TagFastaCMD),
    #[command(name = "tsv2fasta")]
    Tsv2Fasta(command::Tsv2FastaCMD),
    GcBins(command::GcBinsCMD),
    Hist(command::HistCMD),
    Ideogram(command::IdeogramCMD),
    FilterBlast(command::FilterBlastCMD),
    FilterCoords(command::FilterCoordsCMD),
    Align(command::AlignCMD),
    Refine(command::RefineCMD),
    Consensus(command::ConsensusCMD),
    ConsensusStats(command::ConsensusStatsCMD),
    Pairs(command::PairsCMD),
    Levenshtein(command::LevenshteinCMD),
    Curate(command::CurateCMD),
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::SubsetFasta(mut cmd) => cmd.try_execute(),
        Commands::TrimFasta(mut cmd) => cmd.try_execute(),
        Commands::Seqlen(mut cmd) => cmd.try_execute(),
        Commands::TagFasta(mut cmd) => cmd.try_execute(),
        Commands::Tsv2Fasta(mut cmd) => cmd.try_execute(),
        Commands::GcBins(mut cmd) => cmd.try_execute(),
        Commands::Hist(mut cmd) => cmd.try_execute(),
        Commands::Ideogram(mut cmd) => cmd.try_execute(),
        Commands::FilterBlast(mut cmd) => cmd.try_execute(),
        Commands::FilterCoords(mut cmd) => cmd.try_execute(),
        Commands::Align(mut cmd) => cmd.try_execute(),
        Commands::Refine(mut cmd) => cmd.try_execute(),
        Commands::Consensus(mut cmd) => cmd.try_execute(),
        Commands::ConsensusStats(mut cmd) => cmd.try_execute(),
        Commands::Pairs(mut cmd) => cmd.try_execute(),
        Commands::Levenshtein(mut cmd) => cmd.try_execute(),
        Commands::Curate(mut cmd) => cmd.try_execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        return ExitCode::FAILURE;
    }
    return ExitCode::SUCCESS;
}
