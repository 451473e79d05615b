use std::process::Command;

use tempfile::TempDir;

use crate::helpers::{CommandExt, binary_path};

const CONFIG: &str = r#"
space = 4
globals = ["jQuery"]

[[overrides]]
files = "test/*.js"
envs = ["mocha"]
semicolon = false
"#;

#[test]
fn test_print_config_reflects_overrides() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(directory.join("sift.toml"), CONFIG)?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("--print-config")
            .arg("test/a.js")
            .run()
            .normalize_os_executable_name(),
        @r#"
success: true
exit_code: 0
----- stdout -----
{
  "indent": 4,
  "semicolon": false,
  "prettier": false,
  "nodeVersion": "*",
  "envs": [
    "es2021",
    "node",
    "mocha"
  ],
  "globals": [
    "jQuery"
  ],
  "plugins": [],
  "extensions": [
    "js",
    "jsx",
    "mjs",
    "cjs"
  ],
  "rules": {},
  "quiet": false
}

----- stderr -----
"#
    );

    Ok(())
}

#[test]
fn test_print_config_defaults() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("--print-config")
            .arg("index.js")
            .arg("--node-version")
            .arg(">=18")
            .arg("--extension")
            .arg(".ts")
            .run()
            .normalize_os_executable_name(),
        @r#"
success: true
exit_code: 0
----- stdout -----
{
  "indent": "tab",
  "semicolon": true,
  "prettier": false,
  "nodeVersion": ">=18",
  "envs": [
    "es2021",
    "node"
  ],
  "globals": [],
  "plugins": [],
  "extensions": [
    "js",
    "jsx",
    "mjs",
    "cjs",
    "ts"
  ],
  "rules": {},
  "quiet": false
}

----- stderr -----
"#
    );

    Ok(())
}
