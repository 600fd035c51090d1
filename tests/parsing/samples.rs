#[cfg(test)]
mod samples {
    use std::fs;
    use std::path::Path;

    use robotdata::parsing::{self, ParserOptions};

    #[test]
    fn ensure_samples_parse() {
        let dir = Path::new("tests/samples/");

        assert!(dir.exists(), "samples directory missing");

        let entries = fs::read_dir(dir).expect("Failed to read samples directory");

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.expect("Failed to read directory entry");
            let path = entry.path();

            if path
                .extension()
                .and_then(|s| s.to_str())
                == Some("robot")
            {
                files.push(path);
            }
        }

        assert!(!files.is_empty(), "No .robot files found in samples directory");

        let mut failures = Vec::new();

        for file in &files {
            let content = parsing::load(&file)
                .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", file, e));

            let result = parsing::parse(&content, &ParserOptions::default());
            if result.has_errors() {
                for diagnostic in result.errors() {
                    println!("File {:?}: {}", file, diagnostic);
                }
                failures.push(file.clone());
            }
        }

        if !failures.is_empty() {
            panic!(
                "Sample files should parse without errors, but {} files had some",
                failures.len()
            );
        }
    }

    #[test]
    fn every_cell_is_claimed() {
        let content = parsing::load(Path::new("tests/samples/webshop.robot"))
            .expect("Failed to load sample");
        let file = parsing::parse(&content, &ParserOptions::default());

        assert!(file
            .unclaimed
            .is_empty());
        assert_eq!(
            file.settings
                .imports
                .len(),
            3
        );
        assert_eq!(
            file.test_cases
                .len(),
            2
        );
        assert_eq!(
            file.keywords
                .len(),
            2
        );
    }
}
