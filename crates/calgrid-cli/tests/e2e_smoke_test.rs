use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use calgrid_cli::{Args, run};

/// Demos are at workspace root, relative to workspace not the crate
fn demos_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

/// Collects all .toml files from a directory
fn collect_toml_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("toml")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn args(dataset: &Path, output: PathBuf) -> Args {
    Args {
        dataset: dataset.to_string_lossy().to_string(),
        date: None,
        view: None,
        resource: None,
        output: Some(output.to_string_lossy().to_string()),
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let valid_demos = collect_toml_files(demos_dir());
    assert!(!valid_demos.is_empty(), "No valid demos found in demos/");

    let configs = collect_toml_files(demos_dir().join("configs"));
    assert!(!configs.is_empty(), "No configs found in demos/configs/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        for config_path in &configs {
            let output_path = temp_dir.path().join(format!(
                "{}_{}.txt",
                demo_path.file_stem().unwrap().to_string_lossy(),
                config_path.file_stem().unwrap().to_string_lossy()
            ));

            let mut args = args(demo_path, output_path.clone());
            args.config = Some(config_path.to_string_lossy().to_string());

            match run(&args) {
                Ok(()) => {
                    let report = fs::read_to_string(&output_path).unwrap();
                    assert!(
                        report.contains("col "),
                        "{} produced no placements",
                        demo_path.display()
                    );
                }
                Err(e) => failed_demos.push((demo_path.clone(), e)),
            }
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nValid demos that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid demo(s) failed unexpectedly", failed_demos.len());
    }

    println!("✅ All {} valid demos passed", valid_demos.len());
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let error_demos = collect_toml_files(demos_dir().join("errors"));
    assert!(
        !error_demos.is_empty(),
        "No error demos found in demos/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        let output_path = temp_dir.path().join(format!(
            "error_{}.txt",
            demo_path.file_stem().unwrap().to_string_lossy()
        ));

        if run(&args(demo_path, output_path)).is_ok() {
            unexpectedly_succeeded.push(demo_path.clone());
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError demos that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error demo(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }

    println!(
        "✅ All {} error demos failed as expected",
        error_demos.len()
    );
}

#[test]
fn e2e_chain_report() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("chain.txt");

    let mut args = args(&demos_dir().join("chain.toml"), output_path.clone());
    args.date = chrono::NaiveDate::from_ymd_opt(2025, 3, 14);
    run(&args).expect("chain demo should lay out");

    let report = fs::read_to_string(&output_path).unwrap();
    let lines: Vec<&str> = report.lines().collect();

    assert_eq!(lines[0], "prof_1 2025-03-14");
    assert_eq!(lines.len(), 7);
    // One transitive cluster, three columns wide.
    assert!(lines[1..].iter().all(|line| line.contains("/3")));
    assert!(lines[6].contains("  f  "));
    assert!(lines[6].contains("col 1/3"));
}

#[test]
fn e2e_resource_filter() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("clinic.txt");

    let mut args = args(&demos_dir().join("clinic.toml"), output_path.clone());
    args.resource = Some("prof_1".to_string());
    run(&args).expect("clinic demo should lay out");

    let report = fs::read_to_string(&output_path).unwrap();
    assert!(report.starts_with("prof_1 2025-03-14\n"));
    assert!(!report.contains("prof_2"));
    assert_eq!(report.lines().count(), 5);

    args.resource = Some("prof_9".to_string());
    assert!(run(&args).is_err(), "Unknown resource should be rejected");
}
