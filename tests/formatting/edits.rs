#[cfg(test)]
mod edits {
    use robotdata::formatting::{dump, dump_with, DumpOptions, SeparatorStyle};
    use robotdata::language::{DefinitionKind, RobotFile, SettingKind};
    use robotdata::parsing::{self, ParserOptions};

    fn parsed(content: &str) -> RobotFile {
        parsing::parse(content, &ParserOptions::default())
    }

    #[test]
    fn moved_imports_swap_lines() {
        let mut file = parsed("*** Settings ***\nLibrary    A\nLibrary    B    arg\nResource    r.resource\n");

        assert!(file
            .settings
            .move_import_down(0));

        assert_eq!(
            dump(&file),
            "*** Settings ***\nLibrary    B    arg\nLibrary    A\nResource    r.resource\n"
        );
    }

    #[test]
    fn removed_import_leaves_no_line() {
        let mut file = parsed("*** Settings ***\nLibrary    A\n...    continued\nLibrary    B\n");

        assert!(file
            .settings
            .remove_import(0)
            .is_some());

        assert_eq!(dump(&file), "*** Settings ***\nLibrary    B\n");
    }

    #[test]
    fn new_settings_go_by_priority() {
        let content = r#"
*** Settings ***
Documentation    About
Library    A
Test Timeout    1 min

*** Test Cases ***
T
    No Operation
"#
        .trim_start();
        let mut file = parsed(content);

        file.add_keyword_setting(SettingKind::SuiteSetup, "Prepare", &[]);
        file.add_metadata("Version", &["2"]);

        let expected = r#"
*** Settings ***
Documentation    About
Suite Setup    Prepare
Library    A
Test Timeout    1 min
Metadata    Version    2

*** Test Cases ***
T
    No Operation
"#
        .trim_start();
        assert_eq!(dump(&file), expected);
    }

    #[test]
    fn renamed_argument_keeps_layout() {
        let mut file = parsed("*** Test Cases ***\nT\n    Log      hi    # greet\n");

        let replacement = {
            let row = file
                .test_cases
                .definitions[0]
                .rows()
                .next()
                .expect("row");
            row.arguments[0]
        };
        let replacement = file.replace_token(replacement, "hello");
        file.test_cases
            .get_mut(0)
            .and_then(|definition| definition.row_mut(0))
            .expect("row")
            .set_argument(0, replacement);

        assert_eq!(
            dump(&file),
            "*** Test Cases ***\nT\n    Log      hello    # greet\n"
        );
    }

    #[test]
    fn dictionary_item_rewritten_in_place() {
        let mut file = parsed("*** Variables ***\n&{d}    a=1      b=2    # pairs\n");

        let cell = file
            .set_dictionary_item(0, 1, "b", Some("3"))
            .expect("item");
        assert_eq!(file.text(cell), "b=3");
        assert!(file
            .set_dictionary_item(0, 2, "c", None)
            .is_none());

        let items = file
            .variables
            .variables[0]
            .items(&file);
        assert_eq!(items[1].0, cell);
        assert_eq!(items[1].1.value.as_deref(), Some("3"));

        assert_eq!(
            dump(&file),
            "*** Variables ***\n&{d}    a=1      b=3    # pairs\n"
        );
    }

    #[test]
    fn extra_argument_joins_its_line() {
        let mut file = parsed("*** Test Cases ***\nT\n    Log    hi\n");

        let extra = file.new_token("WARN", DefinitionKind::TestCase.argument_tag());
        file.test_cases
            .get_mut(0)
            .and_then(|definition| definition.row_mut(0))
            .expect("row")
            .add_argument(extra);

        assert_eq!(dump(&file), "*** Test Cases ***\nT\n    Log    hi    WARN\n");
    }

    #[test]
    fn new_row_goes_before_trailing_blank() {
        let mut file = parsed("*** Keywords ***\nFirst\n    Log    1\n\nSecond\n    Log    2\n");

        file.add_row(DefinitionKind::Keyword, 0, "Log", &["more"])
            .expect("definition exists");

        assert_eq!(
            dump(&file),
            "*** Keywords ***\nFirst\n    Log    1\n    Log    more\n\nSecond\n    Log    2\n"
        );
    }

    #[test]
    fn moved_definitions_carry_their_lines() {
        let mut file = parsed("*** Keywords ***\nFirst\n    Log    1\n\nSecond\n    Log    2\n");

        assert!(file
            .keywords
            .move_up(1));

        assert_eq!(
            dump(&file),
            "*** Keywords ***\nSecond\n    Log    2\nFirst\n    Log    1\n\n"
        );
    }

    #[test]
    fn new_test_case_after_the_last() {
        let mut file = parsed("*** Test Cases ***\nFirst\n    No Operation\n");

        let index = file.add_test_case("Second");
        file.add_row(DefinitionKind::TestCase, index, "Log", &["hi"]);

        assert_eq!(
            dump(&file),
            "*** Test Cases ***\nFirst\n    No Operation\nSecond\n    Log    hi\n"
        );
    }

    #[test]
    fn missing_table_is_generated() {
        let mut file = parsed("*** Test Cases ***\nT\n    Log    ${X}\n");

        file.add_scalar_variable("X", "1");

        assert_eq!(
            dump(&file),
            "*** Test Cases ***\nT\n    Log    ${X}\n\n*** Variables ***\n${X}    1\n"
        );
    }

    #[test]
    fn pipes_used_where_the_file_uses_them() {
        let mut file = parsed("| *** Test Cases *** |\n| T |\n| | Log | hi |\n");

        file.add_row(DefinitionKind::TestCase, 0, "Log", &["bye"]);

        assert_eq!(
            dump(&file),
            "| *** Test Cases *** |\n| T |\n| | Log | hi |\n| | Log | bye\n"
        );
    }

    #[test]
    fn new_lines_follow_line_endings() {
        let mut file = parsed("*** Settings ***\r\nLibrary    A\r\n");

        file.add_import(SettingKind::Library, "B", &[]);

        assert_eq!(
            dump(&file),
            "*** Settings ***\r\nLibrary    A\r\nLibrary    B\r\n"
        );
    }

    #[test]
    fn chosen_separator_for_new_lines() {
        let mut file = parsed("*** Test Cases ***\nT\n    Log    hi\n");

        file.add_row(DefinitionKind::TestCase, 0, "Log", &["bye"]);

        let options = DumpOptions {
            separator: Some(SeparatorStyle::Spaces(2)),
            ..DumpOptions::default()
        };
        assert_eq!(
            dump_with(&file, &options),
            "*** Test Cases ***\nT\n    Log    hi\n  Log  bye\n"
        );
    }

    #[test]
    fn empty_argument_written_as_backslash() {
        let mut file = parsed("*** Test Cases ***\nT\n    No Operation\n");

        file.add_row(DefinitionKind::TestCase, 0, "Log Many", &["", "x"]);

        assert_eq!(
            dump(&file),
            "*** Test Cases ***\nT\n    No Operation\n    Log Many    \\    x\n"
        );
    }
}
