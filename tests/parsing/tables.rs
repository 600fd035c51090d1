#[cfg(test)]
mod tables {
    use robotdata::language::{
        BodyItem, LocalSettingKind, Problem, RobotFile, RobotVersion, SectionKind, TokenType,
    };
    use robotdata::parsing::{self, ParserOptions};

    fn parsed(content: &str) -> RobotFile {
        parsing::parse(content, &ParserOptions::default())
    }

    fn parsed_for(version: RobotVersion, content: &str) -> RobotFile {
        let options = ParserOptions {
            version,
            ..ParserOptions::default()
        };
        parsing::parse(content, &options)
    }

    fn section_kinds(file: &RobotFile) -> Vec<SectionKind> {
        file.sections()
            .iter()
            .map(|section| section.kind)
            .collect()
    }

    #[test]
    fn test_case_rows_and_settings() {
        let file = parsed(
            r#"
*** Test Cases ***
Login
    [Tags]    smoke    auth
    Open    http://example.com
    Submit
            "#
            .trim_ascii(),
        );

        let definition = &file
            .test_cases
            .definitions[0];
        assert_eq!(file.text(definition.name), "Login");

        let tags: Vec<_> = definition
            .tags()
            .collect();
        assert_eq!(tags.len(), 1);
        assert_eq!(file.texts(&tags[0].values), vec!["smoke", "auth"]);

        let rows: Vec<_> = definition
            .rows()
            .collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0]
                .action
                .map(|id| file.text(id)),
            Some("Open")
        );
        assert_eq!(file.texts(&rows[0].arguments), vec!["http://example.com"]);
        assert_eq!(
            rows[1]
                .action
                .map(|id| file.token(id).kind()),
            Some(TokenType::TestCaseActionName)
        );
        assert!(file
            .diagnostics
            .is_empty());
    }

    #[test]
    fn local_template_takes_one_keyword() {
        let file = parsed("*** Test Cases ***\nValid\n    [Template]    Kw One    Kw Two\n");

        let definition = &file
            .test_cases
            .definitions[0];
        let template = definition
            .templates()
            .next()
            .expect("template setting");
        assert_eq!(file.texts(&template.values), vec!["Kw One"]);
        assert_eq!(file.texts(&template.unexpected), vec!["Kw Two"]);
        assert_eq!(
            file.token(template.unexpected[0])
                .kind(),
            TokenType::TestCaseSettingTemplateKeywordUnwantedArgument
        );
        assert!(matches!(
            file.diagnostics[0].problem,
            Problem::UnwantedArgument { .. }
        ));
    }

    #[test]
    fn keyword_arguments_and_return() {
        let file = parsed(
            r#"
*** Keywords ***
Add
    [Arguments]    ${a}    ${b}
    ${sum}=    Evaluate    ${a} + ${b}
    [Return]    ${sum}
            "#
            .trim_ascii(),
        );

        let definition = &file
            .keywords
            .definitions[0];
        let arguments: Vec<_> = definition
            .arguments()
            .collect();
        assert_eq!(file.texts(&arguments[0].values), vec!["${a}", "${b}"]);
        assert_eq!(
            file.token(arguments[0].values[0])
                .kind(),
            TokenType::KeywordSettingArgument
        );

        let returns: Vec<_> = definition
            .returns()
            .collect();
        assert_eq!(file.texts(&returns[0].values), vec!["${sum}"]);
        assert_eq!(
            definition
                .rows()
                .count(),
            1
        );
    }

    #[test]
    fn keywords_do_not_take_setup() {
        let file = parsed("*** Keywords ***\nHelper\n    [Setup]    Something\n");

        let definition = &file
            .keywords
            .definitions[0];
        match &definition.body[0] {
            BodyItem::Setting(setting) => {
                assert_eq!(setting.kind, LocalSettingKind::Unknown);
                assert_eq!(file.texts(&setting.values), vec!["Something"]);
            }
            other => panic!("expected a setting, got {:?}", other),
        }
        assert_eq!(
            file.diagnostics[0].problem,
            Problem::UnknownLocalSetting("[Setup]".to_string())
        );
    }

    #[test]
    fn old_for_loop_is_marked() {
        let file = parsed(
            "*** Test Cases ***\nLoop\n    :FOR    ${i}    IN RANGE    3\n    \\    Log    ${i}\n",
        );

        let definition = &file
            .test_cases
            .definitions[0];
        let rows: Vec<_> = definition
            .rows()
            .collect();
        assert_eq!(rows.len(), 2);

        let looping = rows[0]
            .action
            .expect("loop action");
        assert!(file
            .token(looping)
            .has_type(TokenType::ForToken));
        assert!(file
            .token(rows[0].arguments[1])
            .has_type(TokenType::InToken));

        let body = rows[1]
            .action
            .expect("continued action");
        assert!(file
            .token(body)
            .has_type(TokenType::ForContinueToken));
        assert_eq!(file.text(body), "");
        assert_eq!(file.texts(&rows[1].arguments), vec!["Log", "${i}"]);
    }

    /// Kinds of the action and arguments of each row of a test case.
    fn row_kinds(file: &RobotFile, index: usize) -> Vec<Vec<TokenType>> {
        file.test_cases
            .definitions[index]
            .rows()
            .map(|row| {
                row.action
                    .iter()
                    .chain(row.arguments.iter())
                    .map(|id| {
                        file.token(*id)
                            .kind()
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn suite_template_makes_rows_arguments() {
        let file = parsed(
            r#"
*** Settings ***
Test Template    Should Be Equal

*** Test Cases ***
Equal
    a    b
    ${x}    ${x}
Untemplated
    [Template]    NONE
    Log    x
            "#
            .trim_ascii(),
        );

        let argument = TokenType::TestCaseTemplateArgument;
        assert_eq!(
            row_kinds(&file, 0),
            vec![vec![argument, argument], vec![argument, argument]]
        );
        assert_eq!(
            row_kinds(&file, 1),
            vec![vec![
                TokenType::TestCaseActionName,
                TokenType::TestCaseActionArgument
            ]]
        );
    }

    #[test]
    fn local_template_wherever_declared() {
        let file = parsed(
            r#"
*** Test Cases ***
Before
    [Template]    Log
    hello
After
    hello    WARN
    [Template]    Log
Empty
    [Template]
    Log    x
            "#
            .trim_ascii(),
        );

        let argument = TokenType::TestCaseTemplateArgument;
        assert_eq!(row_kinds(&file, 0), vec![vec![argument]]);
        assert_eq!(row_kinds(&file, 1), vec![vec![argument, argument]]);
        assert_eq!(
            row_kinds(&file, 2),
            vec![vec![
                TokenType::TestCaseActionName,
                TokenType::TestCaseActionArgument
            ]]
        );
    }

    #[test]
    fn templated_tasks_and_loops() {
        let file = parsed(
            "*** Tasks ***\nTask\n    [Template]    Log\n    :FOR    ${i}    IN    a\n    \\    ${i}\n",
        );

        let rows = row_kinds(&file, 0);
        assert_eq!(rows[0][0], TokenType::ForToken);
        assert_eq!(rows[0][1], TokenType::TestCaseActionArgument);
        assert_eq!(
            rows[1],
            vec![
                TokenType::ForContinueToken,
                TokenType::TaskTemplateArgument
            ]
        );
    }

    #[test]
    fn for_loop_closed_by_end() {
        let content = r#"
*** Test Cases ***
Loop
    FOR    ${x}    IN    a    b
        Log    ${x}
    END
    END
            "#
        .trim_ascii();

        let file = parsed(content);
        let rows = row_kinds(&file, 0);
        assert_eq!(rows[0][0], TokenType::ForToken);
        assert_eq!(rows[0][2], TokenType::InToken);
        assert_eq!(rows[1][0], TokenType::TestCaseActionName);
        assert_eq!(rows[2], vec![TokenType::ForEndToken]);
        // nothing left open for the second one to close
        assert_eq!(rows[3], vec![TokenType::TestCaseActionName]);

        let file = parsed_for(RobotVersion::new(3, 0), content);
        let rows = row_kinds(&file, 0);
        assert_eq!(rows[2], vec![TokenType::TestCaseActionName]);
    }

    #[test]
    fn pipe_loop_body_marked() {
        let file = parsed(
            "| *** Test Cases *** |\n| Loop |\n| | FOR | ${x} | IN | a |\n| | | Log | ${x} |\n| | END |\n",
        );

        let rows = row_kinds(&file, 0);
        assert_eq!(
            rows[1],
            vec![
                TokenType::ForWithEndContinuation,
                TokenType::TestCaseActionArgument,
                TokenType::TestCaseActionArgument
            ]
        );
        assert_eq!(rows[2], vec![TokenType::ForEndToken]);
    }

    #[test]
    fn rows_continue_over_lines() {
        let file = parsed("*** Test Cases ***\nLong\n    Log Many    a\n    ...    b    c\n");

        let definition = &file
            .test_cases
            .definitions[0];
        let rows: Vec<_> = definition
            .rows()
            .collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(file.texts(&rows[0].arguments), vec!["a", "b", "c"]);
    }

    #[test]
    fn tasks_table_from_three_one() {
        let content = "*** Tasks ***\nDo It\n    Log    done\n";

        let file = parsed(content);
        assert_eq!(section_kinds(&file), vec![SectionKind::Tasks]);
        assert!(file
            .test_cases
            .tasks);
        assert_eq!(
            file.test_cases
                .len(),
            1
        );

        let file = parsed_for(RobotVersion::new(3, 0), content);
        assert_eq!(section_kinds(&file), vec![SectionKind::UserTable]);
        assert!(file
            .test_cases
            .is_empty());
        assert!(matches!(
            file.diagnostics[0].problem,
            Problem::UnsupportedTable { .. }
        ));
    }

    #[test]
    fn comments_table_is_left_alone() {
        let file = parsed("*** Comments ***\nLibrary    Nope\n\n*** Settings ***\nLibrary    Yes\n");

        assert_eq!(
            section_kinds(&file),
            vec![SectionKind::Comments, SectionKind::Settings]
        );
        assert_eq!(
            file.settings
                .imports
                .len(),
            1
        );
        assert!(file
            .diagnostics
            .is_empty());
    }

    #[test]
    fn pipe_separated_test_case() {
        let file = parsed(
            "| *** Test Cases *** |\n| Create |\n| | Create File | x.txt | content |\n",
        );

        let definition = &file
            .test_cases
            .definitions[0];
        assert_eq!(file.text(definition.name), "Create");

        let rows: Vec<_> = definition
            .rows()
            .collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0]
                .action
                .map(|id| file.text(id)),
            Some("Create File")
        );
        assert_eq!(file.texts(&rows[0].arguments), vec!["x.txt", "content"]);
    }

    #[test]
    fn explicit_empty_cell() {
        let file = parsed("*** Test Cases ***\nEmpty\n    Log    \\    after\n");

        let definition = &file
            .test_cases
            .definitions[0];
        let row = definition
            .rows()
            .next()
            .expect("row");
        assert_eq!(file.texts(&row.arguments), vec!["", "after"]);
        assert_eq!(
            file.token(row.arguments[0])
                .raw(),
            Some("\\")
        );
    }

    #[test]
    fn variable_usage_is_an_annotation() {
        let file = parsed("*** Test Cases ***\nUse\n    Log    ${message}\n");

        let row = file
            .test_cases
            .definitions[0]
            .rows()
            .next()
            .expect("row");
        let argument = file.token(row.arguments[0]);
        assert!(argument.has_type(TokenType::VariableUsage));
        assert_eq!(argument.kind(), TokenType::TestCaseActionArgument);
    }
}
