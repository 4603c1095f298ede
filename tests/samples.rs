#[cfg(test)]
mod samples {
    use std::fs;
    use std::path::{Path, PathBuf};

    use pmlunit::parsing;

    fn object_files(dir: &Path) -> Vec<PathBuf> {
        assert!(dir.exists(), "{} directory missing", dir.display());

        let entries = fs::read_dir(dir).expect("Failed to read directory");

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.expect("Failed to read directory entry");
            let path = entry.path();

            if path
                .extension()
                .and_then(|s| s.to_str())
                == Some("pmlobj")
            {
                files.push(path);
            }
        }
        files.sort();

        assert!(!files.is_empty(), "No .pmlobj files found in {}", dir.display());
        files
    }

    #[test]
    fn ensure_samples_parse() {
        let mut failures = Vec::new();

        for file in object_files(Path::new("tests/samples/")) {
            let content = parsing::load(&file)
                .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", file, e));

            match parsing::parse(&file, &content) {
                Ok(_) => {}
                Err(e) => {
                    println!("File {:?} failed to parse: {:?}", file, e);
                    failures.push(file.clone());
                }
            }
        }

        if !failures.is_empty() {
            panic!(
                "Sample files should parse successfully, but {} files failed",
                failures.len()
            );
        }
    }

    #[test]
    fn ensure_broken_fail() {
        let mut unexpected_successes = Vec::new();

        for file in object_files(Path::new("tests/broken/")) {
            let content = parsing::load(&file)
                .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", file, e));

            match parsing::parse(&file, &content) {
                Ok(_) => {
                    println!("File {:?} unexpectedly parsed successfully", file);
                    unexpected_successes.push(file.clone());
                }
                Err(_) => {}
            }
        }

        if !unexpected_successes.is_empty() {
            panic!(
                "Broken files should not parse successfully, but {} files passed",
                unexpected_successes.len()
            );
        }
    }

    #[test]
    fn assert_suite_contents() {
        let file = Path::new("tests/samples/pmlasserttest.pmlobj");
        let content = parsing::load(file).unwrap();
        let case = parsing::parse(file, &content).unwrap();

        assert_eq!(case.name(), "PmlAssertTest");
        assert!(case.has_set_up());
        assert!(case.has_tear_down());

        let names: Vec<&str> = case
            .test_names()
            .collect();
        assert_eq!(names, vec!["testEqual", "testNotEqual", "testIsTrue"]);
    }

    #[test]
    fn commented_suite_contents() {
        let file = Path::new("tests/samples/commented.pmlobj");
        let content = parsing::load(file).unwrap();
        let case = parsing::parse(file, &content).unwrap();

        assert_eq!(case.name(), "CommentedTest");
        let names: Vec<&str> = case
            .test_names()
            .collect();
        assert_eq!(names, vec!["testEnabled"]);
    }

    #[test]
    fn reading_through_stream() {
        let file = fs::File::open("tests/samples/crlf.pmlobj").unwrap();
        let case = parsing::parse_reader(std::io::BufReader::new(file)).unwrap();

        assert_eq!(case.name(), "CrlfTest");
        assert!(case
            .test("testlineendings")
            .is_some());
    }

    #[test]
    fn missing_file() {
        let result = parsing::load(Path::new("tests/samples/nonexistent.pmlobj"));
        let error = result.unwrap_err();
        assert_eq!(error.problem, "File not found");
    }
}
