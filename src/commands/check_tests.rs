use std::fs;

use clap::Parser;
use tempfile::TempDir;

use super::*;
use crate::check_type::CheckType;

fn cli(args: &[&str]) -> Cli {
    Cli::parse_from(std::iter::once("codecheck").chain(args.iter().copied()))
}

#[test]
fn load_config_defaults_without_file() {
    let dir = TempDir::new().unwrap();
    let config = load_config(dir.path(), None, false).unwrap();
    assert!(config.disabled_check_types.is_empty());
    assert!(config.include_exclude_rules.is_empty());
}

#[test]
fn load_config_reads_project_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("codecheck.toml"),
        "[checks]\ndoctest = false\n",
    )
    .unwrap();
    let config = load_config(dir.path(), None, false).unwrap();
    assert!(!config.is_enabled(CheckType::Doctest));
}

#[test]
fn load_config_no_config_ignores_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("codecheck.toml"), "[broken").unwrap();
    let config = load_config(dir.path(), None, true).unwrap();
    assert!(config.disabled_check_types.is_empty());
    assert_eq!(config.checker_config_path, Config::default().checker_config_path);
}

#[test]
fn load_config_explicit_path_is_relative_to_root() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("ci.toml"), "[checks]\nmypy = false\n").unwrap();
    let config = load_config(dir.path(), Some(Path::new("ci.toml")), false).unwrap();
    assert!(!config.is_enabled(CheckType::TypeCheck));
}

#[test]
fn load_config_missing_explicit_path_fails() {
    let dir = TempDir::new().unwrap();
    let err = load_config(dir.path(), Some(Path::new("absent.toml")), false).unwrap_err();
    assert!(err.to_string().contains("Configuration file not found"));
}

#[test]
fn resolve_cli_path_is_absolute() {
    let resolved = resolve_cli_path(Path::new("some/file.py")).unwrap();
    assert!(resolved.is_absolute());
    assert!(resolved.ends_with("some/file.py"));
}

#[cfg(unix)]
#[test]
fn resolve_cli_path_keeps_symlink_name() {
    let dir = TempDir::new().unwrap();
    let root = dunce::canonicalize(dir.path()).unwrap();
    fs::write(root.join("real.py"), "").unwrap();
    std::os::unix::fs::symlink(root.join("real.py"), root.join("link.py")).unwrap();

    let resolved = resolve_cli_path(&root.join("link.py")).unwrap();
    assert_eq!(resolved, root.join("link.py"));
}

#[test]
fn missing_root_is_an_error() {
    let err = run_check_impl(&cli(&["-C", "/definitely/not/here"])).unwrap_err();
    assert_eq!(err.error_type(), "Discovery");
    assert_eq!(run_check(&cli(&["-C", "/definitely/not/here"])), EXIT_FAILURE);
}

#[test]
fn invalid_config_is_an_error() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("codecheck.toml"),
        "[files]\nincluded_regex_list = [\"(unclosed\"]\n",
    )
    .unwrap();
    let root = dir.path().to_str().unwrap();
    assert_eq!(run_check(&cli(&["-C", root, "-q"])), EXIT_FAILURE);
}

#[test]
fn empty_project_succeeds() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("README.md"), "# nothing to check\n").unwrap();
    let root = dir.path().to_str().unwrap();
    assert_eq!(run_check_impl(&cli(&["-C", root, "-q"])).unwrap(), EXIT_SUCCESS);
}

#[cfg(unix)]
#[test]
fn shell_lint_verdict_follows_linter_exit_code() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("run.sh"), "echo hi\n").unwrap();
    let root = dir.path().to_str().unwrap();

    let passing = cli(&["-C", root, "-q", "--shellcheck", "true"]);
    assert_eq!(run_check_impl(&passing).unwrap(), EXIT_SUCCESS);

    let failing = cli(&["-C", root, "-q", "--shellcheck", "false"]);
    assert_eq!(run_check_impl(&failing).unwrap(), EXIT_FAILURE);
}
