//! End-to-end `extbuild build` tests against a scripted toolchain.
//!
//! The fake toolchain appends its arguments to a log file and, for the
//! build phase, drops `<module>.so` into a nested directory of the build tree.

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

const TOOLCHAIN: &str = r#"#!/bin/sh
echo "$PWD|$*" >> "$EXTBUILD_TEST_LOG"
if [ -n "$EXTBUILD_TEST_FAIL" ] && [ "$1" != "--build" ]; then
  echo "configure exploded" >&2
  exit 7
fi
if [ "$1" = "--build" ]; then
  mkdir -p out/nested
  printf 'compiled %s' "$4" > "out/nested/${4##*.}.so"
fi
exit 0
"#;

struct TestEnv {
  temp: TempDir,
}

impl TestEnv {
  fn new() -> Self {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("CMakeLists.txt"), "project(geo)\n").unwrap();
    let script = temp.path().join("fake-cmake");
    std::fs::write(&script, TOOLCHAIN).unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    Self { temp }
  }

  fn root(&self) -> &Path {
    self.temp.path()
  }

  fn log(&self) -> PathBuf {
    self.root().join("toolchain.log")
  }

  fn log_lines(&self) -> Vec<String> {
    std::fs::read_to_string(self.log())
      .unwrap_or_default()
      .lines()
      .map(str::to_string)
      .collect()
  }

  fn extbuild_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("extbuild");
    cmd.arg("-C").arg(self.root());
    cmd.env("EXTBUILD_TEST_LOG", self.log());
    cmd.env_remove("EXTBUILD_TEST_FAIL");
    cmd.env_remove("EXTBUILD_BUILD_TEMP");
    cmd.env_remove("EXTBUILD_BUILD_LIB");
    cmd
  }

  fn build_args(&self) -> Vec<String> {
    vec![
      "build".to_string(),
      "--cmake".to_string(),
      self.root().join("fake-cmake").display().to_string(),
      "--build-base".to_string(),
      self.root().join("build").display().to_string(),
      "--ext-suffix".to_string(),
      ".so".to_string(),
    ]
  }
}

#[test]
fn build_stages_artifact_from_nested_dir() {
  let env = TestEnv::new();

  env
    .extbuild_cmd()
    .args(env.build_args())
    .arg("geo")
    .assert()
    .success()
    .stdout(predicate::str::contains("Built 1 extension(s)"));

  let lib_dir = std::fs::read_dir(env.root().join("build"))
    .unwrap()
    .map(|e| e.unwrap().path())
    .find(|p| p.file_name().unwrap().to_string_lossy().starts_with("lib."))
    .expect("lib directory should exist");
  assert_eq!(std::fs::read_to_string(lib_dir.join("geo.so")).unwrap(), "compiled geo");

  let lines = env.log_lines();
  assert_eq!(lines.len(), 2);
  assert!(lines[0].contains("-DCMAKE_BUILD_TYPE=Release"));
  assert!(lines[1].ends_with("--build . --target geo --config Release -j 4"));
}

#[test]
fn dry_run_only_configures() {
  let env = TestEnv::new();

  env
    .extbuild_cmd()
    .args(env.build_args())
    .args(["geo", "--dry-run", "--debug"])
    .assert()
    .success()
    .stdout(predicate::str::contains("dry run"));

  let lines = env.log_lines();
  assert_eq!(lines.len(), 1);
  assert!(lines[0].contains("-DCMAKE_BUILD_TYPE=Debug"));
}

#[test]
fn configure_failure_surfaces_toolchain_output() {
  let env = TestEnv::new();

  env
    .extbuild_cmd()
    .env("EXTBUILD_TEST_FAIL", "1")
    .args(env.build_args())
    .args(["first", "second"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("configure failed for `first`"))
    .stderr(predicate::str::contains("configure exploded"));

  assert_eq!(env.log_lines().len(), 1, "second extension must not be attempted");
}

#[test]
fn inplace_build_writes_into_package_dir() {
  let env = TestEnv::new();

  env
    .extbuild_cmd()
    .args(env.build_args())
    .args(["pkg.geo", "--inplace"])
    .assert()
    .success();

  assert_eq!(
    std::fs::read_to_string(env.root().join("pkg/geo.so")).unwrap(),
    "compiled pkg.geo"
  );
}

#[test]
fn json_format_prints_reports() {
  let env = TestEnv::new();

  let output = env
    .extbuild_cmd()
    .args(env.build_args())
    .args(["geo", "--format", "json"])
    .output()
    .unwrap();

  assert!(output.status.success());
  let reports: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(reports[0]["extension"], "geo");
  assert_eq!(reports[0]["configuration"], "Release");
  assert_eq!(reports[0]["dry_run"], false);
}
