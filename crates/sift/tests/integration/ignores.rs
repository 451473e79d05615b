use std::process::Command;

use tempfile::TempDir;

use crate::helpers::{CommandExt, binary_path};

#[test]
fn test_implicit_scan_skips_ignored_files() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(directory.join(".gitignore"), "build/\n")?;
    std::fs::write(directory.join("index.js"), "const a = 1\n")?;
    std::fs::create_dir_all(directory.join("build"))?;
    std::fs::write(directory.join("build/out.js"), "const b = 2\n")?;
    std::fs::create_dir_all(directory.join("dist"))?;
    std::fs::write(directory.join("dist/bundle.js"), "const c = 3\n")?;
    std::fs::create_dir_all(directory.join("node_modules/dep"))?;
    std::fs::write(directory.join("node_modules/dep/index.js"), "const d = 4\n")?;
    std::fs::write(directory.join("vendor.min.js"), "const e = 5\n")?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .run()
            .normalize_os_executable_name(),
        @r"
success: false
exit_code: 1
----- stdout -----
index.js: line 1, col 12, Error - Missing semicolon. (semi)

Found 1 error and 0 warnings.

----- stderr -----
"
    );

    Ok(())
}

#[test]
fn test_explicit_ignored_file_is_fatal() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(directory.join(".gitignore"), "secret.js\n")?;
    std::fs::write(directory.join("index.js"), "const a = 1\n")?;
    std::fs::write(directory.join("secret.js"), "const b = 2\n")?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("index.js")
            .arg("secret.js")
            .run()
            .normalize_os_executable_name(),
        @r"
success: false
exit_code: 2
----- stdout -----

----- stderr -----
error: You cannot lint an ignored file: secret.js
"
    );

    Ok(())
}

#[test]
fn test_negated_gitignore_pattern_is_linted() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(directory.join(".gitignore"), "*.js\n!keep.js\n")?;
    std::fs::write(directory.join("drop.js"), "const a = 1\n")?;
    std::fs::write(directory.join("keep.js"), "const b = 2\n")?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .run()
            .normalize_os_executable_name(),
        @r"
success: false
exit_code: 1
----- stdout -----
keep.js: line 1, col 12, Error - Missing semicolon. (semi)

Found 1 error and 0 warnings.

----- stderr -----
"
    );

    Ok(())
}

#[test]
fn test_no_default_ignore() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(directory.join("vendor.min.js"), "const a = 1\n")?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("--no-default-ignore")
            .arg("vendor.min.js")
            .run()
            .normalize_os_executable_name(),
        @r"
success: false
exit_code: 1
----- stdout -----
vendor.min.js: line 1, col 12, Error - Missing semicolon. (semi)

Found 1 error and 0 warnings.

----- stderr -----
"
    );

    Ok(())
}

#[test]
fn test_cli_ignore_pattern() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(directory.join("index.js"), "const a = 1;\n")?;
    std::fs::write(directory.join("index.test.js"), "const b = 2\n")?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("--ignore")
            .arg("*.test.js")
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
fn test_config_ignores_are_relative_to_project_root() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(directory.join("sift.toml"), "ignores = [\"/generated/\"]\n")?;
    std::fs::create_dir_all(directory.join("generated"))?;
    std::fs::write(directory.join("generated/api.js"), "const a = 1\n")?;
    std::fs::create_dir_all(directory.join("src/generated"))?;
    std::fs::write(directory.join("src/generated/ok.js"), "const b = 2\n")?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .run()
            .normalize_os_executable_name(),
        @r"
success: false
exit_code: 1
----- stdout -----
src/generated/ok.js: line 1, col 12, Error - Missing semicolon. (semi)

Found 1 error and 0 warnings.

----- stderr -----
"
    );

    Ok(())
}

#[test]
fn test_explicit_file_ignored_on_command_line() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(directory.join("index.js"), "const a = 1;\n")?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("--ignore")
            .arg("index.js")
            .arg("index.js")
            .run()
            .normalize_os_executable_name(),
        @r"
success: false
exit_code: 2
----- stdout -----

----- stderr -----
error: You cannot lint an ignored file: index.js
"
    );

    Ok(())
}

#[test]
fn test_missing_file_is_fatal() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("nope.js")
            .run()
            .normalize_os_executable_name(),
        @r"
success: false
exit_code: 2
----- stdout -----

----- stderr -----
error: No such file or directory: nope.js
"
    );

    Ok(())
}

#[test]
fn test_dot_slash_ignore_on_command_line() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::create_dir_all(directory.join("lib"))?;
    std::fs::write(directory.join("baz.js"), "const a = 1\n")?;
    std::fs::write(directory.join("lib/baz.js"), "const b = 2\n")?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("--ignore")
            .arg("./baz.js")
            .run()
            .normalize_os_executable_name(),
        @r"
success: false
exit_code: 1
----- stdout -----
lib/baz.js: line 1, col 12, Error - Missing semicolon. (semi)

Found 1 error and 0 warnings.

----- stderr -----
"
    );

    Ok(())
}

#[test]
fn test_file_reincluded_inside_ignored_directory() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::create_dir_all(directory.join("test"))?;
    std::fs::write(directory.join(".gitignore"), "node_modules/\ntest/\n!test/bar.js\n")?;
    std::fs::write(directory.join("index.js"), "const a = 1;\n")?;
    std::fs::write(directory.join("test/foo.js"), "const b = 2\n")?;
    std::fs::write(directory.join("test/bar.js"), "const c = 3\n")?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .run()
            .normalize_os_executable_name(),
        @r"
success: false
exit_code: 1
----- stdout -----
test/bar.js: line 1, col 12, Error - Missing semicolon. (semi)

Found 1 error and 0 warnings.

----- stderr -----
"
    );

    Ok(())
}
