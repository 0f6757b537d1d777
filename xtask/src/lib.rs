use anyhow::{bail, Result};
use std::env;
use std::process::Command;

/// Options derived from the host machine used to configure cargo commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub features: Vec<String>,
}

impl BuildConfig {
    /// Join features into a single string suitable for passing to cargo.
    pub fn features_arg(&self) -> Option<String> {
        if self.features.is_empty() {
            None
        } else {
            Some(self.features.join(" "))
        }
    }
}

/// Detect build configuration from the current machine.
pub fn detect_config() -> BuildConfig {
    let extra = env::var("DITFFT_FEATURES").unwrap_or_default();
    compute_config(detect_nproc(), &extra)
}

fn detect_nproc() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Compute a [`BuildConfig`] from supplied inputs. This is separated for testing.
pub fn compute_config(nproc: usize, extra: &str) -> BuildConfig {
    let mut features: Vec<String> = Vec::new();
    if nproc > 1 {
        features.push("parallel".into());
    }
    for feat in extra.split_whitespace() {
        if !features.iter().any(|f| f == feat) {
            features.push(feat.to_string());
        }
    }
    BuildConfig { features }
}

fn with_features(mut cmd: Command, cfg: &BuildConfig) -> Command {
    if let Some(f) = cfg.features_arg() {
        cmd.arg("--features").arg(f);
    }
    cmd
}

pub fn build_command(cfg: &BuildConfig) -> Command {
    let mut cmd = Command::new("cargo");
    cmd.arg("build");
    with_features(cmd, cfg)
}

pub fn test_command(cfg: &BuildConfig) -> Command {
    let mut cmd = Command::new("cargo");
    cmd.arg("test");
    with_features(cmd, cfg)
}

/// `no_std` check of the library alone.
pub fn no_std_command() -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(["build", "--lib", "--no-default-features"]);
    cmd
}

pub fn clippy_command() -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(["clippy", "--all-targets", "--all-features"]);
    cmd
}

pub fn fmt_command() -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(["fmt", "--all"]);
    cmd
}

pub fn bench_command(cfg: &BuildConfig) -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(["bench", "--manifest-path", "ditfft-bench/Cargo.toml"]);
    with_features(cmd, cfg)
}

pub fn demo_command(cfg: &BuildConfig) -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(["run", "--release", "--example", "basic_usage"]);
    with_features(cmd, cfg)
}

/// Run `cmd`, failing with its rendered command line when it exits non-zero.
pub fn run(mut cmd: Command) -> Result<()> {
    let status = cmd.status()?;
    if !status.success() {
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        bail!(
            "`{} {}` failed with {}",
            cmd.get_program().to_string_lossy(),
            args.join(" "),
            status
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(cmd: &Command) -> Vec<String> {
        cmd.get_args()
            .map(|a| a.to_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_compute_multi_core() {
        let cfg = compute_config(4, "verbose-logging");
        assert_eq!(cfg.features, vec!["parallel", "verbose-logging"]);
    }

    #[test]
    fn test_compute_single_core_dedups_extras() {
        let cfg = compute_config(1, "parallel parallel");
        assert_eq!(cfg.features, vec!["parallel"]);
        assert!(compute_config(1, "").features_arg().is_none());
    }

    #[test]
    fn test_commands_include_features() {
        let cfg = compute_config(2, "verbose-logging");
        let a = args(&build_command(&cfg));
        assert!(a.contains(&"build".to_string()));
        assert!(a.contains(&"--features".to_string()));
        assert!(a.iter().any(|x| x == "parallel verbose-logging"));
    }

    #[test]
    fn test_other_commands() {
        let cfg = compute_config(1, "");
        assert!(test_command(&cfg).get_args().any(|a| a == "test"));
        assert!(clippy_command().get_args().any(|a| a == "clippy"));
        assert!(fmt_command().get_args().any(|a| a == "fmt"));
        assert!(no_std_command()
            .get_args()
            .any(|a| a == "--no-default-features"));
        let b = args(&bench_command(&cfg));
        assert!(b.contains(&"ditfft-bench/Cargo.toml".to_string()));
        assert!(!b.contains(&"--features".to_string()));
        assert!(args(&demo_command(&cfg)).contains(&"basic_usage".to_string()));
    }

    #[test]
    fn test_run_reports_failure() {
        let err = run(Command::new("false")).unwrap_err();
        assert!(err.to_string().contains("false"));
    }
}
