//! Shared testing utilities for wfconf CLI tests.

use assert_cmd::Command;
use std::fs;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const CONFIG: &str = r#"
[pull_request.validation.basic]
base_images = ["ubuntu:22.04"]
build_platforms = ["linux/amd64"]

[pull_request.validation.full]
base_images = ["ubuntu:22.04", "ubuntu:24.04"]
build_platforms = ["linux/amd64", "linux/arm64"]

[pull_request.validation.deb]
base_images = ["debian:12"]
build_platforms = ["linux/amd64"]

[github]
repository = "acme/widgets"
timeout_secs = 5
"#;

/// Isolated repository checkout with a fake `gh` on `PATH`.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
    bin_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        let bin_dir = root.path().join("bin");
        fs::create_dir_all(work_dir.join(".github")).expect("Failed to create work directory");
        fs::create_dir_all(&bin_dir).expect("Failed to create bin directory");

        let ctx = Self { root, work_dir, bin_dir };
        ctx.write_config(CONFIG);
        ctx
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn write_config(&self, content: &str) {
        fs::write(self.work_dir.join(".github/wfconf.toml"), content)
            .expect("Failed to write config");
    }

    /// Write a webhook payload and return its path.
    pub fn write_event(&self, payload: &str) -> PathBuf {
        let path = self.root.path().join("event.json");
        fs::write(&path, payload).expect("Failed to write event payload");
        path
    }

    pub fn output_file(&self) -> PathBuf {
        self.root.path().join("github_output")
    }

    /// Parsed `KEY=VALUE` lines from the output file.
    pub fn outputs(&self) -> Vec<(String, String)> {
        fs::read_to_string(self.output_file())
            .unwrap_or_default()
            .lines()
            .filter_map(|line| line.split_once('='))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    pub fn output(&self, key: &str) -> Option<String> {
        self.outputs().into_iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Install a fake `gh` that logs its arguments and runs `body`.
    #[cfg(unix)]
    pub fn install_gh(&self, body: &str) {
        let script = format!(
            "#!/bin/sh\necho \"$@\" >> \"{}\"\n{}\n",
            self.gh_log_path().display(),
            body
        );
        let path = self.bin_dir.join("gh");
        fs::write(&path, script).expect("Failed to write gh script");
        let mut perms = fs::metadata(&path).expect("Failed to get metadata").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).expect("Failed to set permissions");
    }

    #[cfg(unix)]
    fn gh_log_path(&self) -> PathBuf {
        self.root.path().join("gh.log")
    }

    #[cfg(unix)]
    pub fn gh_log(&self) -> String {
        fs::read_to_string(self.gh_log_path()).unwrap_or_default()
    }

    /// Command for the compiled `wfconf` binary with a clean GitHub environment.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("wfconf").expect("Failed to locate wfconf binary");
        let path = match std::env::var_os("PATH") {
            Some(existing) => {
                let mut paths = vec![self.bin_dir.clone()];
                paths.extend(std::env::split_paths(&existing));
                std::env::join_paths(paths).expect("Failed to build PATH")
            }
            None => self.bin_dir.clone().into_os_string(),
        };
        cmd.current_dir(&self.work_dir)
            .env("PATH", path)
            .env("GITHUB_OUTPUT", self.output_file())
            .env_remove("GITHUB_EVENT_NAME")
            .env_remove("GITHUB_EVENT_PATH")
            .env_remove("GITHUB_REPOSITORY")
            .env_remove("GH_TOKEN")
            .env_remove("GITHUB_TOKEN")
            .env_remove("RUST_LOG");
        cmd
    }
}
