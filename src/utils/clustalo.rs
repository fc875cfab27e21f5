use std::path::Path;
use std::process::Command;

use anyhow::{bail, Result};
use log::{debug, info};

/// Check that Clustal Omega can be executed at all before starting a run.
pub fn check_clustalo(clustalo: &str) -> Result<()> {
    debug!("Checking for clustalo at {:?}", clustalo);
    if let Ok(_output) = Command::new(clustalo).arg("--version").output() {
        info!("Found clustalo");
        Ok(())
    } else {
        bail!("clustalo is either not installed or not in PATH")
    }
}

/// Run `clustalo --auto --force` on a FASTA file, writing the aligned FASTA
/// to `path_out`.
pub fn run_clustalo(clustalo: &str, path_in: &Path, path_out: &Path) -> Result<()> {
    info!("Aligning {} with clustalo", path_in.display());
    let output = Command::new(clustalo)
        .arg("-i")
        .arg(path_in)
        .arg("-o")
        .arg(path_out)
        .arg("--auto")
        .arg("--force")
        .output()?;

    if !output.status.success() {
        bail!(
            "clustalo failed on {}: {}",
            path_in.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(())
}
