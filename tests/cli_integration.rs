//! CLI integration tests
//!
//! These run the dockflow binary against a job whose docking tools do not
//! exist on the host. Fixture-backed runs complete only when a stand-in
//! `pydock3` builds the models.

mod support;

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::path::Path;
use support::{Job, PROJECT, RANKED_IDS};

/// Helper to get the path to the dockflow binary
fn dockflow_bin() -> PathBuf {
    let mut path = env::current_exe()
        .expect("Failed to get current executable path")
        .parent()
        .expect("No parent")
        .to_path_buf();

    // If we're in deps/, go up one more level
    if path.ends_with("deps") {
        path = path.parent().expect("No parent").to_path_buf();
    }

    path.join("dockflow")
}

fn run(job: &Job) -> Output {
    let missing_tool = job.temp.path().join("no-such-tool");
    run_with_tools(job, &missing_tool, &job.temp.path().join("run.log"))
}

fn run_with_tools(job: &Job, pydock_bin: &Path, log_file: &Path) -> Output {
    let missing_tool = job.temp.path().join("no-such-tool");
    Command::new(dockflow_bin())
        .arg("--config")
        .arg(&job.config_path)
        .arg("--in_metadata")
        .arg(&job.metadata_path)
        .arg("--out_metadata")
        .arg(job.temp.path().join("out.json"))
        .arg("--log_file")
        .arg(log_file)
        .env("DOCKFLOW_SETUP_SCRIPT", &missing_tool)
        .env("DOCKFLOW_PYDOCK_BIN", pydock_bin)
        .env("DOCKFLOW_SAMPLING_SCRIPT", &missing_tool)
        .env("DOCKFLOW_SCORING_SCRIPT", &missing_tool)
        .env("DOCKFLOW_MOCK_DNA_DIR", job.fixture_dir("3mfk"))
        .env("DOCKFLOW_MOCK_PROTEIN_DIR", job.fixture_dir("3mfk_monomers"))
        .env("DOCKFLOW_CONCURRENCY", "2")
        .env_remove("DOCKFLOW_TOP_COPY_POLICY")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute dockflow")
}

#[test]
fn test_cli_help() {
    let output = Command::new(dockflow_bin())
        .arg("--help")
        .output()
        .expect("Failed to execute dockflow");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--config"));
    assert!(stdout.contains("--in_metadata"));
    assert!(stdout.contains("--log_file"));
}

#[test]
fn test_cli_version() {
    let output = Command::new(dockflow_bin())
        .arg("--version")
        .output()
        .expect("Failed to execute dockflow");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_config_file_is_rejected() {
    let job = Job::new("3mfk_homodimer.pdb", "3mfk_dna.pdb");
    let output = Command::new(dockflow_bin())
        .args(["--config", "/nonexistent/job.json"])
        .arg("--in_metadata")
        .arg(&job.metadata_path)
        .args(["--out_metadata", "out.json", "--log_file"])
        .arg(job.temp.path().join("run.log"))
        .output()
        .expect("Failed to execute dockflow");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"));
}

/// A `pydock3` stand-in whose `makePDB` writes one model per ranked conformation
#[cfg(unix)]
fn model_builder(job: &Job) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = job.temp.path().join("pydock3");
    fs::write(
        &script,
        format!(
            "#!/bin/sh\n\
             if [ \"$2\" = \"makePDB\" ]; then\n\
             \x20 for id in {}; do\n\
             \x20   printf 'REMARK conformation %s\\n' \"$id\" > \"mug_$1_$id.pdb\"\n\
             \x20 done\n\
             fi\n",
            RANKED_IDS.join(" ")
        ),
    )
    .unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    script
}

#[cfg(unix)]
#[test]
fn test_fixture_run_completes() {
    let job = Job::new("3mfk_homodimer.pdb", "3mfk_dna.pdb");
    let output = run_with_tools(&job, &model_builder(&job), &job.temp.path().join("run.log"));

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(job.project_path.join(".results.json").is_file());
    assert!(job.project_path.join("result.csv").is_file());
    assert!(job.project_path.join(format!("{}.tgz", PROJECT)).is_file());
    let best = fs::read_to_string(job.project_path.join("top_10.pdb")).unwrap();
    assert_eq!(best, format!("REMARK conformation {}\n", RANKED_IDS[0]));

    let log = fs::read_to_string(job.temp.path().join("run.log")).unwrap();
    assert!(log.contains("Sampling"));
    assert!(log.contains("Docking run complete"));
}

#[test]
fn test_fixture_run_without_models_fails() {
    let job = Job::new("3mfk_homodimer.pdb", "3mfk_dna.pdb");
    let output = run(&job);

    assert_eq!(output.status.code(), Some(1));
    assert!(!job.project_path.join(".results.json").exists());
    assert!(!job.project_path.join("top_1.pdb").exists());

    let log = fs::read_to_string(job.temp.path().join("run.log")).unwrap();
    assert!(log.contains("Generating models stage failed"));
    assert!(!log.contains("Docking run complete"));
}

#[test]
fn test_missing_tools_fail_the_run() {
    let job = Job::new("1abc_receptor.pdb", "1abc_ligand.pdb");
    let output = run(&job);

    assert_eq!(output.status.code(), Some(1));
    assert!(!job.project_path.join(".results.json").exists());

    let log = fs::read_to_string(job.temp.path().join("run.log")).unwrap();
    assert!(log.contains("output file not found"));
}

#[test]
fn test_unwritable_log_file_still_logs_to_stderr() {
    let job = Job::new("1abc_receptor.pdb", "1abc_ligand.pdb");
    let missing_tool = job.temp.path().join("no-such-tool");
    let log_file = job.temp.path().join("no-such-dir").join("run.log");

    let output = run_with_tools(&job, &missing_tool, &log_file);

    assert_eq!(output.status.code(), Some(1));
    assert!(!log_file.exists());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Logging to stderr only"));
    assert!(stderr.contains("output file not found"));
}

#[test]
fn test_malformed_metadata_is_a_configuration_error() {
    let job = Job::new("3mfk_homodimer.pdb", "3mfk_dna.pdb");
    fs::write(&job.metadata_path, "{ not json").unwrap();

    let output = run(&job);

    assert_eq!(output.status.code(), Some(2));
    assert!(!job.project_path.exists());
}
