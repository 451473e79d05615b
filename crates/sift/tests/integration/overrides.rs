use std::process::Command;

use tempfile::TempDir;

use crate::helpers::{CommandExt, binary_path};

const CONFIG: &str = r#"
[[overrides]]
files = "test/**/*.js"
semicolon = false
"#;

fn setup(directory: &std::path::Path) -> anyhow::Result<()> {
    std::fs::write(directory.join("sift.toml"), CONFIG)?;
    std::fs::create_dir_all(directory.join("src"))?;
    std::fs::create_dir_all(directory.join("test/unit"))?;
    std::fs::write(directory.join("src/lib.js"), "const a = 1\n")?;
    std::fs::write(directory.join("test/unit/lib.js"), "const b = 2\n")?;
    Ok(())
}

#[test]
fn test_override_applies_to_matching_files_only() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    setup(directory)?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .run()
            .normalize_os_executable_name(),
        @r"
success: false
exit_code: 1
----- stdout -----
src/lib.js: line 1, col 12, Error - Missing semicolon. (semi)

Found 1 error and 0 warnings.

----- stderr -----
"
    );

    Ok(())
}

#[test]
fn test_cli_option_wins_over_override() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    setup(directory)?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("--semicolon")
            .run()
            .normalize_os_executable_name(),
        @r"
success: false
exit_code: 1
----- stdout -----
src/lib.js: line 1, col 12, Error - Missing semicolon. (semi)
test/unit/lib.js: line 1, col 12, Error - Missing semicolon. (semi)

Found 2 errors and 0 warnings.

----- stderr -----
"
    );

    Ok(())
}

#[test]
fn test_override_glob_is_relative_to_project_root() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    setup(directory)?;

    // Running from a subdirectory still matches `test/**/*.js` against paths
    // relative to the directory holding `sift.toml`.
    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory.join("test"))
            .run()
            .normalize_os_executable_name(),
        @r"
success: true
exit_code: 0
----- stdout -----
All checks passed!

----- stderr -----
"
    );

    Ok(())
}
