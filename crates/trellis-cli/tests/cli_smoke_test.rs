use std::{fs, path::PathBuf};

use tempfile::tempdir;

use trellis_cli::{Args, CliError, run};

/// Collects all .toml scenes from a directory
fn collect_scenes(dir: PathBuf) -> Vec<PathBuf> {
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

    files.sort();
    files
}

/// Demo scenes live at the workspace root
fn demos_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .join("demos")
}

fn args_for(input: &PathBuf, output: &PathBuf) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn smoke_test_demo_scenes() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let scenes = collect_scenes(demos_dir());
    assert!(!scenes.is_empty(), "No demo scenes found in demos/");

    let mut failed = Vec::new();
    for scene in &scenes {
        let output = temp_dir.path().join(format!(
            "{}.txt",
            scene.file_stem().unwrap().to_string_lossy()
        ));
        match run(&args_for(scene, &output)) {
            Ok(()) => {
                let report = fs::read_to_string(&output).expect("Report written");
                assert!(report.starts_with("diagram #"), "Unexpected report: {report}");
            }
            Err(err) => failed.push((scene.clone(), err)),
        }
    }

    if !failed.is_empty() {
        for (path, err) in &failed {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} demo scene(s) failed unexpectedly", failed.len());
    }
}

#[test]
fn smoke_test_error_scenes() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let scenes = collect_scenes(demos_dir().join("errors"));
    assert!(!scenes.is_empty(), "No error scenes found in demos/errors/");

    for scene in &scenes {
        let output = temp_dir.path().join("error.txt");
        assert!(
            run(&args_for(scene, &output)).is_err(),
            "{} unexpectedly succeeded",
            scene.display()
        );
    }
}

#[test]
fn test_explicit_config_is_used() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config = temp_dir.path().join("config.toml");
    fs::write(&config, "[layout.limits]\nclassifiers = 1\n").unwrap();

    let scene = demos_dir().join("vehicle_class.toml");
    let output = temp_dir.path().join("out.txt");
    let mut args = args_for(&scene, &output);
    args.config = Some(config.to_string_lossy().to_string());

    assert!(matches!(run(&args), Err(CliError::Layout(_))));
    assert!(!output.exists());
}

#[test]
fn test_missing_input_is_io_error() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("out.txt");
    let args = args_for(&temp_dir.path().join("missing.toml"), &output);
    assert!(matches!(run(&args), Err(CliError::Io(_))));
}
