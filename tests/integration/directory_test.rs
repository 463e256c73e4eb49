//! Integration tests for batch directory conversion

#[cfg(test)]
mod batch_tests {
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::process::{Command, Output};
    use tempfile::tempdir;

    fn run_tabconv(args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_tabconv"))
            .args(args)
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to run tabconv")
    }

    fn stderr(output: &Output) -> String {
        String::from_utf8_lossy(&output.stderr).into_owned()
    }

    #[test]
    fn test_recursive_directory_conversion() {
        let input_dir = tempdir().unwrap();
        let nested = input_dir.path().join("sub");
        fs::create_dir_all(&nested).unwrap();

        fs::write(input_dir.path().join("a.csv"), "name\nAda\n").unwrap();
        fs::write(nested.join("b.csv"), "x,y\n1,2\n").unwrap();
        fs::write(nested.join("notes.txt"), "not csv").unwrap();

        let output_dir = tempdir().unwrap();
        let output = run_tabconv(&[
            input_dir.path().to_str().unwrap(),
            "--from",
            "csv",
            "--compact",
            "--output",
            output_dir.path().to_str().unwrap(),
            "--recursive",
        ]);

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        assert!(stderr(&output).contains("Found 2 CSV files"));
        assert!(output.stdout.is_empty());

        assert_eq!(
            fs::read_to_string(output_dir.path().join("a.json")).unwrap(),
            r#"[{"name":"Ada"}]"#
        );
        assert_eq!(
            fs::read_to_string(output_dir.path().join("sub/b.json")).unwrap(),
            r#"[{"x":"1","y":"2"}]"#
        );
        assert!(!output_dir.path().join("sub/notes.json").exists());
    }

    #[test]
    fn test_non_recursive_skips_subdirectories() {
        let input_dir = tempdir().unwrap();
        fs::create_dir_all(input_dir.path().join("sub")).unwrap();
        fs::write(input_dir.path().join("top.json"), r#"[{"a":1}]"#).unwrap();
        fs::write(input_dir.path().join("sub/deep.json"), r#"[{"a":2}]"#).unwrap();

        let output_dir = tempdir().unwrap();
        let output = run_tabconv(&[
            input_dir.path().to_str().unwrap(),
            "--from",
            "json",
            "-o",
            output_dir.path().to_str().unwrap(),
        ]);

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        assert_eq!(
            fs::read_to_string(output_dir.path().join("top.csv")).unwrap(),
            "a\n1\n"
        );
        assert!(!output_dir.path().join("sub/deep.csv").exists());
    }

    #[test]
    fn test_continue_on_error() {
        let input_dir = tempdir().unwrap();
        fs::write(input_dir.path().join("bad.json"), r#"{"a":1}"#).unwrap();
        fs::write(input_dir.path().join("good.json"), r#"[{"a":1}]"#).unwrap();

        let output_dir = tempdir().unwrap();
        let output = run_tabconv(&[
            input_dir.path().to_str().unwrap(),
            "--from",
            "json",
            "-o",
            output_dir.path().to_str().unwrap(),
            "--continue-on-error",
        ]);

        // One failure still fails the run, but every other file is written
        assert_eq!(output.status.code(), Some(1));
        let err = stderr(&output);
        assert!(err.contains("Error converting bad.json: Top level JSON should be an array."));
        assert!(err.contains("1 of 2 files failed to convert"));
        assert!(output_dir.path().join("good.csv").exists());
        assert!(!output_dir.path().join("bad.csv").exists());
    }

    #[test]
    fn test_stop_on_first_error() {
        let input_dir = tempdir().unwrap();
        fs::write(input_dir.path().join("a_bad.json"), "[1]").unwrap();
        fs::write(input_dir.path().join("b_good.json"), r#"[{"a":1}]"#).unwrap();

        let output_dir = tempdir().unwrap();
        let output = run_tabconv(&[
            input_dir.path().to_str().unwrap(),
            "--from",
            "json",
            "-o",
            output_dir.path().to_str().unwrap(),
        ]);

        assert_eq!(output.status.code(), Some(1));
        assert!(stderr(&output).contains("Aborting due to conversion error"));
        assert!(!output_dir.path().join("b_good.csv").exists());
    }

    #[test]
    fn test_directory_requires_output() {
        let input_dir = tempdir().unwrap();
        let output = run_tabconv(&[input_dir.path().to_str().unwrap(), "--from", "csv"]);
        assert_eq!(output.status.code(), Some(1));
        assert!(stderr(&output).contains("Output directory required"));
    }

    #[test]
    fn test_directory_without_source_format() {
        let input_dir = tempdir().unwrap();
        fs::write(input_dir.path().join("a.csv"), "x\n1\n").unwrap();
        let output_dir = tempdir().unwrap();

        let output = run_tabconv(&[
            input_dir.path().to_str().unwrap(),
            "-o",
            output_dir.path().to_str().unwrap(),
        ]);

        assert_eq!(output.status.code(), Some(1));
        let err = stderr(&output);
        assert!(err.contains("Cannot tell the source format of"), "stderr: {}", err);
        assert!(err.contains("Tip: Name the source format with --from csv or --from json"));
        assert!(!err.contains("choose two different formats"));
    }

    #[test]
    fn test_directory_source_implied_by_target() {
        let input_dir = tempdir().unwrap();
        fs::write(input_dir.path().join("a.json"), r#"[{"x":1}]"#).unwrap();
        let output_dir = tempdir().unwrap();

        let output = run_tabconv(&[
            input_dir.path().to_str().unwrap(),
            "--to",
            "csv",
            "-o",
            output_dir.path().to_str().unwrap(),
        ]);

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        assert_eq!(
            fs::read_to_string(output_dir.path().join("a.csv")).unwrap(),
            "x\n1\n"
        );
    }

    #[test]
    fn test_validate_directory() {
        let input_dir = tempdir().unwrap();
        fs::write(input_dir.path().join("ok.csv"), "a\n1\n2\n").unwrap();
        fs::write(input_dir.path().join("ragged.csv"), "a,b\n1\n").unwrap();

        let output = run_tabconv(&[
            input_dir.path().to_str().unwrap(),
            "--from",
            "csv",
            "--validate-only",
        ]);

        assert_eq!(output.status.code(), Some(1));
        let err = stderr(&output);
        assert!(err.contains("ok.csv (2 records)"));
        assert!(err.contains("ragged.csv: CSV parse error"));
        assert!(err.contains("1 file(s) failed validation"));
    }
}
