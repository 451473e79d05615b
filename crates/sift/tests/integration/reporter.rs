use std::process::Command;

use tempfile::TempDir;

use crate::helpers::{CommandExt, binary_path};

#[test]
fn test_json_reporter() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(directory.join("a.js"), "const a = 1\n")?;
    std::fs::write(directory.join("b.js"), "const b = 2;\n")?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("--reporter")
            .arg("json")
            .run()
            .normalize_os_executable_name(),
        @r#"
success: false
exit_code: 1
----- stdout -----
[
  {
    "filePath": "a.js",
    "errorCount": 1,
    "warningCount": 0,
    "messages": [
      {
        "ruleId": "semi",
        "severity": 2,
        "line": 1,
        "column": 12,
        "message": "Missing semicolon."
      }
    ]
  },
  {
    "filePath": "b.js",
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

#[test]
fn test_cwd_option() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::create_dir_all(directory.join("app"))?;
    std::fs::write(directory.join("app/index.js"), "const a = 1\n")?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("--cwd")
            .arg("app")
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
fn test_unreadable_file_prints_no_report() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(directory.join("a.js"), "const a = 1;\n")?;
    std::fs::write(directory.join("b.js"), b"const b = \xff;\n")?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("--reporter")
            .arg("json")
            .run()
            .normalize_temp_paths(directory),
        @r"
success: false
exit_code: 2
----- stdout -----

----- stderr -----
Error: Failed to read file: [TEMP_DIR]/b.js: stream did not contain valid UTF-8
"
    );

    Ok(())
}
