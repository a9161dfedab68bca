use clap::Parser;
use std::path::PathBuf;

/// Protein-DNA docking pipeline runner
#[derive(Parser, Debug, Clone)]
#[command(
    name = "dockflow",
    about = "Runs the pyDock protein-DNA docking pipeline for one job",
    version,
    author,
    long_about = "dockflow prepares the run workspace, drives the setup, sampling, scoring and \
                  model generation tools, packages the results and writes the .results.json \
                  manifest the job platform waits for.\n\n\
                  Example:\n  \
                  dockflow --config job.json --in_metadata metadata.json \\\n    \
                  --out_metadata out.json --log_file run.log"
)]
pub struct CliArgs {
    #[arg(
        long = "config",
        value_name = "FILE",
        value_parser = existing_file,
        help = "Job configuration JSON file"
    )]
    pub config: PathBuf,

    #[arg(
        long = "in_metadata",
        visible_alias = "in-metadata",
        value_name = "FILE",
        help = "Metadata catalog of the job inputs"
    )]
    pub in_metadata: PathBuf,

    #[arg(
        long = "out_metadata",
        visible_alias = "out-metadata",
        value_name = "FILE",
        help = "Output metadata file (accepted for platform compatibility)"
    )]
    pub out_metadata: PathBuf,

    #[arg(
        long = "log_file",
        visible_alias = "log-file",
        value_name = "FILE",
        help = "File the run log is appended to"
    )]
    pub log_file: PathBuf,
}

fn existing_file(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("The file {} does not exist", s))
    }
}
