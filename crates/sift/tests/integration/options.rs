use std::process::Command;

use tempfile::TempDir;

use crate::helpers::{CommandExt, binary_path};

const BLOCK: &str = "if (a) {\n  b();\n}\n";

#[test]
fn test_tabs_by_default() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(directory.join("file.js"), BLOCK)?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("file.js")
            .run()
            .normalize_os_executable_name(),
        @r"
success: false
exit_code: 1
----- stdout -----
file.js: line 2, col 1, Error - Expected indentation of 1 tab but found 2 spaces. (indent)

Found 1 error and 0 warnings.

----- stderr -----
"
    );

    Ok(())
}

#[test]
fn test_space_followed_by_file() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(directory.join("file.js"), BLOCK)?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("--space")
            .arg("file.js")
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

#[test]
fn test_space_width() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(directory.join("file.js"), BLOCK)?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("--space=4")
            .arg("file.js")
            .run()
            .normalize_os_executable_name(),
        @r"
success: false
exit_code: 1
----- stdout -----
file.js: line 2, col 1, Error - Expected indentation of 4 spaces but found 2. (indent)

Found 1 error and 0 warnings.

----- stderr -----
"
    );

    Ok(())
}

#[test]
fn test_cli_space_false_overrides_config() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(directory.join("sift.toml"), "space = true\n")?;
    std::fs::write(directory.join("file.js"), BLOCK)?;

    let output = Command::new(binary_path())
        .current_dir(directory)
        .arg("--space=false")
        .run()
        .normalize_os_executable_name();
    assert!(output.contains("Expected indentation of 1 tab but found 2 spaces."));
    assert!(output.starts_with("success: false\nexit_code: 1\n"));

    Ok(())
}

#[test]
fn test_semicolon_false() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(directory.join("file.js"), "const a = 1;\n")?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("--semicolon=false")
            .run()
            .normalize_os_executable_name(),
        @r"
success: false
exit_code: 1
----- stdout -----
file.js: line 1, col 12, Error - Extra semicolon. (semi)

Found 1 error and 0 warnings.

----- stderr -----
"
    );

    Ok(())
}

#[test]
fn test_prettier_turns_off_formatting_rules() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(directory.join("file.js"), "if (a) {\n  b()\n}\n")?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("--prettier")
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

#[test]
fn test_warnings_do_not_fail_and_quiet_hides_them() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(directory.join("file.js"), "// TODO: rename\nconst a = 1;\n")?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .run()
            .normalize_os_executable_name(),
        @r"
success: true
exit_code: 0
----- stdout -----
file.js: line 1, col 1, Warning - Unexpected 'todo' comment. (no-warning-comments)

Found 0 errors and 1 warning.

----- stderr -----
"
    );

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("--quiet")
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

#[test]
fn test_invalid_node_version_is_fatal() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(directory.join("file.js"), "const a = 1;\n")?;

    let output = Command::new(binary_path())
        .current_dir(directory)
        .arg("--node-version")
        .arg("not a range")
        .run()
        .normalize_os_executable_name();
    assert!(output.starts_with("success: false\nexit_code: 2\n----- stdout -----\n\n"));
    assert!(output.contains("error: Invalid `node-version` \"not a range\""));

    Ok(())
}

#[test]
fn test_npm_node_version_range() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(directory.join("file.js"), "const a = 1;\n")?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("--node-version")
            .arg(">=18 <20 || ^14.17.0")
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

#[test]
fn test_invalid_space_value_is_rejected() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    let output = Command::new(binary_path())
        .current_dir(directory)
        .arg("--space=wide")
        .run()
        .normalize_os_executable_name();
    assert!(output.starts_with("success: false\nexit_code: 2\n"));
    assert!(output.contains("Invalid `space` value \"wide\""));

    Ok(())
}
