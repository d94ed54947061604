use std::{fs, path::PathBuf};

use tempfile::tempdir;

use diagrammar::DialectTag;
use diagrammar_cli::{Args, Outcome, run};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Collects all .mmd files from a directory
fn collect_mmd_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("mmd")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn args(input: &str, output: Option<String>, check: bool) -> Args {
    Args {
        input: input.to_string(),
        output,
        check,
        dialect: None,
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_inputs() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let inputs = collect_mmd_files(fixtures_dir());
    assert!(!inputs.is_empty(), "No inputs found in tests/fixtures/");

    let mut failed = Vec::new();

    for input_path in &inputs {
        let output_path = temp_dir
            .path()
            .join(input_path.file_name().unwrap())
            .to_string_lossy()
            .to_string();

        let written = run(&args(
            &input_path.to_string_lossy(),
            Some(output_path.clone()),
            false,
        ));
        match written {
            Ok(Outcome::Written) => {}
            other => {
                failed.push((input_path.clone(), format!("format: {other:?}")));
                continue;
            }
        }

        // Formatted output passes check mode.
        match run(&args(&output_path, None, true)) {
            Ok(Outcome::Canonical) => {}
            other => failed.push((input_path.clone(), format!("check: {other:?}"))),
        }
    }

    if !failed.is_empty() {
        eprintln!("\nInputs that failed:");
        for (path, reason) in &failed {
            eprintln!("  - {}: {}", path.display(), reason);
        }
        panic!("{} input(s) failed unexpectedly", failed.len());
    }
}

#[test]
fn e2e_smoke_test_error_inputs() {
    let inputs = collect_mmd_files(fixtures_dir().join("errors"));
    assert!(!inputs.is_empty(), "No error inputs found in tests/fixtures/errors/");

    let unexpectedly_succeeded: Vec<_> = inputs
        .iter()
        .filter(|path| run(&args(&path.to_string_lossy(), None, true)).is_ok())
        .collect();

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError inputs that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error input(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }
}

#[test]
fn e2e_check_reports_non_canonical_input() {
    let input = fixtures_dir().join("flowchart.mmd");
    let outcome = run(&args(&input.to_string_lossy(), None, true));
    assert!(
        matches!(outcome, Ok(Outcome::NotCanonical)),
        "`graph TD` input should need formatting: {outcome:?}"
    );
}

#[test]
fn e2e_config_and_dialect_override() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[render]\nindent = \"  \"\n").unwrap();

    let input_path = temp_dir.path().join("flows.txt");
    fs::write(&input_path, "A,B,1\n").unwrap();
    let output_path = temp_dir.path().join("flows.mmd");

    let args = Args {
        input: input_path.to_string_lossy().to_string(),
        output: Some(output_path.to_string_lossy().to_string()),
        check: false,
        dialect: Some(DialectTag::Sankey),
        config: Some(config_path.to_string_lossy().to_string()),
        log_level: "off".to_string(),
    };
    let outcome = run(&args);
    assert!(matches!(outcome, Ok(Outcome::Written)), "{outcome:?}");
    assert_eq!(
        fs::read_to_string(&output_path).unwrap(),
        "sankey-beta\n  A,B,1\n"
    );
}
