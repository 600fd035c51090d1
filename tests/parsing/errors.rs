#[cfg(test)]
mod problems {
    use robotdata::language::{Problem, RobotVersion, Severity};
    use robotdata::parsing::{self, ParserOptions};

    /// Helper function to check that parsing reports the expected kind of
    /// problem, and that nothing stopped the parse.
    fn expect_problem(content: &str, expected: Problem) {
        let file = parsing::parse(content, &ParserOptions::default());

        let found_expected = file
            .diagnostics
            .iter()
            .any(|diagnostic| {
                std::mem::discriminant(&diagnostic.problem) == std::mem::discriminant(&expected)
            });

        if !found_expected {
            panic!(
                "Expected problem like {:?} but got: {:?} for input '{}'",
                expected, file.diagnostics, content
            );
        }
    }

    #[test]
    fn unknown_setting() {
        expect_problem(
            r#"
*** Settings ***
Libary    Collections
            "#
            .trim_ascii(),
            Problem::UnknownSetting(String::new()),
        );
    }

    #[test]
    fn unknown_local_setting() {
        expect_problem(
            r#"
*** Test Cases ***
Example
    [Bogus]    value
            "#
            .trim_ascii(),
            Problem::UnknownLocalSetting(String::new()),
        );
    }

    #[test]
    fn invalid_variable_declaration() {
        expect_problem(
            r#"
*** Variables ***
name    value
            "#
            .trim_ascii(),
            Problem::InvalidVariableDeclaration(String::new()),
        );
    }

    #[test]
    fn dictionary_item_without_key() {
        expect_problem(
            r#"
*** Variables ***
&{d}    a=1    justvalue
            "#
            .trim_ascii(),
            Problem::DictionaryItemWithoutKey(String::new()),
        );
    }

    #[test]
    fn missing_closing_bracket() {
        expect_problem(
            r#"
*** Test Cases ***
Example
    Log    ${unfinished
            "#
            .trim_ascii(),
            Problem::MissingClosingBracket(String::new()),
        );
    }

    #[test]
    fn body_line_without_definition() {
        expect_problem(
            r#"
*** Test Cases ***
    Log    orphan
            "#
            .trim_ascii(),
            Problem::DefinitionMissing,
        );
    }

    #[test]
    fn continuation_without_element() {
        expect_problem(
            r#"
*** Settings ***
...    nothing to continue
            "#
            .trim_ascii(),
            Problem::ContinuationWithoutElement,
        );
    }

    #[test]
    fn unsupported_table() {
        let options = ParserOptions {
            version: RobotVersion::new(2, 9),
            ..ParserOptions::default()
        };
        let file = parsing::parse("*** Comments ***\nx\n", &options);

        assert_eq!(
            file.diagnostics[0].problem,
            Problem::UnsupportedTable {
                name: "*** Comments ***".to_string(),
                since: RobotVersion::new(3, 1),
            }
        );
        assert_eq!(file.diagnostics[0].severity, Severity::Warning);
    }

    #[test]
    fn positions_point_at_the_cell() {
        let file = parsing::parse(
            "*** Settings ***\nLibrary    X\nBogus    y\n",
            &ParserOptions::default(),
        );

        let diagnostic = &file.diagnostics[0];
        assert_eq!(diagnostic.position.line, 3);
        assert_eq!(diagnostic.position.column, 0);
        assert_eq!(diagnostic.offset(), 30);
        assert!(diagnostic.is_error());
    }

    #[test]
    fn problems_never_stop_the_parse() {
        let file = parsing::parse(
            "*** Settings ***\nBogus    y\n*** Keywords ***\nStill Here\n    No Operation\n",
            &ParserOptions::default(),
        );

        assert!(file.has_errors());
        assert_eq!(
            file.keywords
                .len(),
            1
        );
    }
}
