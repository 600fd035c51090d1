#[cfg(test)]
mod settings {
    use robotdata::language::{Problem, RobotFile, RobotVersion, Severity, TokenType};
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

    #[test]
    fn keyword_name_then_arguments() {
        let file = parsed("*** Settings ***\nTest Setup    Open Browser    chrome\n");

        let setup = &file
            .settings
            .test_setups[0];
        let keyword = setup
            .keyword
            .expect("keyword name");
        assert_eq!(file.text(keyword), "Open Browser");
        assert_eq!(file.texts(&setup.arguments), vec!["chrome"]);
        assert_eq!(
            file.token(keyword)
                .kind(),
            TokenType::SettingTestSetupKeywordName
        );
        assert_eq!(
            file.token(setup.arguments[0])
                .kind(),
            TokenType::SettingTestSetupKeywordArgument
        );
        assert!(file
            .diagnostics
            .is_empty());
    }

    #[test]
    fn keyword_name_on_continuation_line() {
        let file = parsed("*** Settings ***\nSuite Setup\n...    Prepare    everything\n");

        let setup = &file
            .settings
            .suite_setups[0];
        assert_eq!(
            setup
                .keyword
                .map(|id| file.text(id)),
            Some("Prepare")
        );
        assert_eq!(file.texts(&setup.arguments), vec!["everything"]);
    }

    #[test]
    fn legacy_keyword_name_only_on_declaration_line() {
        let file = parsed_for(
            RobotVersion::new(2, 9),
            "*** Settings ***\nSuite Setup\n...    Prepare    everything\n",
        );

        let setup = &file
            .settings
            .suite_setups[0];
        assert_eq!(setup.keyword, None);
        assert_eq!(file.texts(&setup.unexpected), vec!["Prepare", "everything"]);
        assert!(file
            .diagnostics
            .iter()
            .all(|d| matches!(d.problem, Problem::UnwantedArgument { .. })));
        assert_eq!(
            file.diagnostics
                .len(),
            2
        );
    }

    #[test]
    fn legacy_form_on_one_line() {
        let file = parsed_for(
            RobotVersion::new(2, 9),
            "*** Settings ***\nTest Teardown    Close    now\n",
        );

        let teardown = &file
            .settings
            .test_teardowns[0];
        assert_eq!(
            teardown
                .keyword
                .map(|id| file.text(id)),
            Some("Close")
        );
        assert_eq!(file.texts(&teardown.arguments), vec!["now"]);
    }

    #[test]
    fn template_takes_one_keyword() {
        let file = parsed("*** Settings ***\nTest Template    Kw One    Kw Two\n");

        let template = &file
            .settings
            .test_templates[0];
        assert_eq!(
            template
                .keyword
                .map(|id| file.text(id)),
            Some("Kw One")
        );
        assert_eq!(file.texts(&template.unexpected), vec!["Kw Two"]);
        assert_eq!(
            file.token(template.unexpected[0])
                .kind(),
            TokenType::SettingTestTemplateKeywordUnwantedArgument
        );

        let diagnostic = &file.diagnostics[0];
        assert_eq!(diagnostic.severity, Severity::Warning);
        assert_eq!(
            diagnostic.problem,
            Problem::UnwantedArgument {
                setting: "Test Template".to_string(),
                text: "Kw Two".to_string(),
            }
        );
    }

    #[test]
    fn library_with_alias() {
        let file = parsed(
            "*** Settings ***\nLibrary    Remote    http://host:8270    WITH NAME    Far\n",
        );

        let import = &file
            .settings
            .imports[0];
        assert_eq!(
            import
                .path
                .map(|id| file.text(id)),
            Some("Remote")
        );
        assert_eq!(file.texts(&import.arguments), vec!["http://host:8270"]);
        assert_eq!(
            import
                .alias_name
                .map(|id| file.text(id)),
            Some("Far")
        );
        assert!(file
            .diagnostics
            .is_empty());
    }

    #[test]
    fn resource_takes_no_arguments() {
        let file = parsed("*** Settings ***\nResource    common.resource    extra\n");

        let import = &file
            .settings
            .imports[0];
        assert_eq!(file.texts(&import.unexpected), vec!["extra"]);
        assert!(matches!(
            file.diagnostics[0].problem,
            Problem::UnwantedArgument { .. }
        ));
    }

    #[test]
    fn declarations_ignore_case_and_spacing() {
        let file = parsed("*** SETTINGS ***\nLIBRARY    Collections\ntest setup    Go\nForce Tags    a    b\n");

        assert_eq!(
            file.settings
                .imports
                .len(),
            1
        );
        assert_eq!(
            file.settings
                .test_setups
                .len(),
            1
        );
        assert_eq!(
            file.texts(
                &file
                    .settings
                    .force_tags[0]
                    .tags
            ),
            vec!["a", "b"]
        );
        assert!(file
            .diagnostics
            .is_empty());
    }

    #[test]
    fn deprecated_names_warn_from_three() {
        let file = parsed("*** Settings ***\nDocument    About this suite\n");

        assert_eq!(
            file.texts(
                &file
                    .settings
                    .documentation[0]
                    .text
            ),
            vec!["About this suite"]
        );
        assert_eq!(
            file.diagnostics[0].problem,
            Problem::DeprecatedDeclaration {
                found: "Document".to_string(),
                replacement: "Documentation".to_string(),
            }
        );

        let file = parsed_for(
            RobotVersion::new(2, 9),
            "*** Settings ***\nDocument    About this suite\n",
        );
        assert!(file
            .diagnostics
            .is_empty());
    }

    #[test]
    fn metadata_table_is_deprecated() {
        let file = parsed("*** Metadata ***\nLibrary    X\n");

        assert_eq!(
            file.settings
                .imports
                .len(),
            1
        );
        assert!(matches!(
            file.diagnostics[0].problem,
            Problem::DeprecatedDeclaration { .. }
        ));
    }

    #[test]
    fn metadata_and_timeout() {
        let file = parsed(
            "*** Settings ***\nMetadata    Version    1.0\nTest Timeout    1 min    Too slow\n",
        );

        let metadata = &file
            .settings
            .metadata[0];
        assert_eq!(
            metadata
                .key
                .map(|id| file.text(id)),
            Some("Version")
        );
        assert_eq!(file.texts(&metadata.values), vec!["1.0"]);

        let timeout = &file
            .settings
            .test_timeouts[0];
        assert_eq!(
            timeout
                .value
                .map(|id| file.text(id)),
            Some("1 min")
        );
        assert_eq!(file.texts(&timeout.message), vec!["Too slow"]);
    }

    #[test]
    fn unknown_setting_keeps_its_cells() {
        let file = parsed("*** Settings ***\nBogus    x    y\n");

        let unknown = &file
            .settings
            .unknown[0];
        assert_eq!(file.text(unknown.declaration), "Bogus");
        assert_eq!(file.texts(&unknown.arguments), vec!["x", "y"]);
        assert_eq!(
            file.diagnostics[0].problem,
            Problem::UnknownSetting("Bogus".to_string())
        );
        assert!(file.has_errors());
    }

    #[test]
    fn trailing_comment_belongs_to_setting() {
        let file = parsed("*** Settings ***\nLibrary    String    # for conversions\n");

        let import = &file
            .settings
            .imports[0];
        assert_eq!(file.texts(&import.comment), vec!["# for conversions"]);
        assert!(import
            .arguments
            .is_empty());
    }
}
