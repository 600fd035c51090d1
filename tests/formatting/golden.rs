#[cfg(test)]
mod examples {
    use std::fs;
    use std::path::Path;

    use robotdata::formatting::*;
    use robotdata::parsing::{self, ParserOptions};

    /// Golden test for the format command
    ///
    /// This test:
    /// 1. Reads all .robot files from tests/golden/
    /// 2. Parses each one and writes it straight back out
    /// 3. Compares the output with the original input
    /// 4. Shows clear diffs when differences are found
    ///
    /// Nothing is edited, so every file must come back byte for byte. If a
    /// file fails this test the lexer, the parser, or the dumper lost or
    /// moved something on the way through.

    /// Simple diff function to show line-by-line differences
    fn show_diff(original: &str, formatted: &str, file_path: &Path) {
        let original_lines: Vec<&str> = original
            .lines()
            .collect();
        let formatted_lines: Vec<&str> = formatted
            .lines()
            .collect();

        let max_lines = original_lines
            .len()
            .max(formatted_lines.len());

        println!("\nDifferences found in file: {:?}", file_path);
        println!("--- Original");
        println!("+++ Formatted");

        for i in 0..max_lines {
            let orig_line = original_lines
                .get(i)
                .unwrap_or(&"");
            let fmt_line = formatted_lines
                .get(i)
                .unwrap_or(&"");

            if orig_line != fmt_line {
                println!("@@ Line {} @@", i + 1);
                println!("- {}", orig_line);
                println!("+ {}", fmt_line);
            }
        }
    }

    fn round_trip(content: &str) -> String {
        let file = parsing::parse(content, &ParserOptions::default());
        dump(&file)
    }

    #[test]
    fn ensure_identical_output() {
        let dir = Path::new("tests/golden");

        assert!(dir.exists(), "golden directory missing");

        let entries = fs::read_dir(dir).expect("Failed to read golden directory");

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

        assert!(!files.is_empty(), "No .robot files found in golden directory");

        let mut failures = Vec::new();

        for file in &files {
            let original = parsing::load(&file)
                .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", file, e));

            let result = round_trip(&original);

            if result != original {
                show_diff(&original, &result, &file);
                failures.push(file.clone());
            }
        }

        if !failures.is_empty() {
            panic!(
                "All golden files must write back unchanged, but {} did not",
                failures.len()
            );
        }
    }

    #[test]
    fn line_endings_survive() {
        let content = "*** Settings ***\r\nLibrary    A\r\n\r\n*** Test Cases ***\r\nT\r\n    Log    x\r\n";
        assert_eq!(round_trip(content), content);

        let content = "*** Settings ***\rLibrary    A\r";
        assert_eq!(round_trip(content), content);
    }

    #[test]
    fn missing_final_newline_survives() {
        let content = "*** Settings ***\nLibrary    A";
        assert_eq!(round_trip(content), content);
    }

    #[test]
    fn byte_order_mark_survives() {
        let content = "\u{feff}*** Settings ***\nLibrary    A\n";
        assert_eq!(round_trip(content), content);
    }

    #[test]
    fn problems_survive() {
        let content = r#"
*** Settings ***
Libary    Collections
...    more
Test Template    One    Two

*** Test Cases ***
    Log    orphan
Example
    [Bogus]    x
    Log    ${unfinished
...    dangling
"#
        .trim_start();

        let file = parsing::parse(content, &ParserOptions::default());
        assert!(file.has_errors());
        assert_eq!(dump(&file), content);
    }

    #[test]
    fn odd_layout_survives() {
        let content = "*** Test Cases ***\n Name With Space \nT\n\t\tLog\tx  \n    ...\n  \n    Log    \\    y\n";
        assert_eq!(round_trip(content), content);
    }

    #[test]
    fn terminal_output_has_same_text() {
        let content = parsing::load(Path::new("tests/golden/spaces.robot"))
            .expect("Failed to load golden file");
        let file = parsing::parse(&content, &ParserOptions::default());

        let plain = render(&Identity, &file, &DumpOptions::default());
        let fragments = dump_fragments(&file, &DumpOptions::default());
        let joined: String = fragments
            .iter()
            .map(|(_, text)| text.as_str())
            .collect();

        assert_eq!(plain, content);
        assert_eq!(joined, content);
        assert!(fragments
            .iter()
            .any(|(syntax, text)| *syntax == Syntax::Variable && text == "${URL}"));
    }
}
