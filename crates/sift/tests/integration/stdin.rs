use std::process::Command;

use tempfile::TempDir;

use crate::helpers::{CommandExt, binary_path};

#[test]
fn test_stdin() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("--stdin")
            .run_with_stdin("const a = 1\n")
            .normalize_os_executable_name(),
        @r"
success: false
exit_code: 1
----- stdout -----
<text>: line 1, col 12, Error - Missing semicolon. (semi)

Found 1 error and 0 warnings.

----- stderr -----
"
    );

    Ok(())
}

#[test]
fn test_stdin_filename_selects_overrides() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(
        directory.join("sift.toml"),
        "[[overrides]]\nfiles = \"legacy/*.js\"\nsemicolon = false\n",
    )?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("--stdin")
            .arg("--stdin-filename")
            .arg("legacy/old.js")
            .run_with_stdin("const a = 1;\n")
            .normalize_os_executable_name(),
        @r"
success: false
exit_code: 1
----- stdout -----
legacy/old.js: line 1, col 12, Error - Extra semicolon. (semi)

Found 1 error and 0 warnings.

----- stderr -----
"
    );

    Ok(())
}

#[test]
fn test_ignored_stdin_filename_gives_empty_report() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("--stdin")
            .arg("--stdin-filename")
            .arg("dist/bundle.js")
            .arg("--reporter")
            .arg("json")
            .run_with_stdin("const a = 1\n")
            .normalize_os_executable_name(),
        @r#"
success: true
exit_code: 0
----- stdout -----
[
  {
    "filePath": "dist/bundle.js",
    "errorCount": 0,
    "warningCount": 0,
    "messages": []
  }
]

----- stderr -----
"#
    );

    Ok(())
}
