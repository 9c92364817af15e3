use std::path::PathBuf;

use piggly::config::ReportConfig;
use piggly::profile::ProfileDump;
use tempfile::TempDir;

/// The shared fixture profile.
pub fn fixture() -> ProfileDump {
    ProfileDump::from_json(include_bytes!("../fixtures/profile.json")).unwrap()
}

/// Serial report config writing into a fresh temporary directory.
/// The caller must hold onto `TempDir` to keep the directory alive.
pub fn setup_output() -> (ReportConfig, TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("reports");
    let config = ReportConfig {
        parallel: false,
        ..ReportConfig::new(out.clone())
    };
    (config, dir, out)
}
