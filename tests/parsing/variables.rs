#[cfg(test)]
mod variables {
    use robotdata::language::{DictionaryItem, RobotFile, TokenType, VariableKind};
    use robotdata::parsing::{self, ParserOptions};
    use robotdata::variables::{extract, ContainerKind};

    fn parsed(content: &str) -> RobotFile {
        parsing::parse(content, &ParserOptions::default())
    }

    #[test]
    fn declarations_by_sigil() {
        let file = parsed(
            r#"
*** Variables ***
${NAME}    demo
@{LIST}    a    b
...    c
&{DICT}    a=1    b=2
            "#
            .trim_ascii(),
        );

        let kinds: Vec<_> = file
            .variables
            .variables
            .iter()
            .map(|variable| variable.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                VariableKind::Scalar,
                VariableKind::List,
                VariableKind::Dictionary
            ]
        );

        let list = &file
            .variables
            .variables[1];
        assert_eq!(file.texts(&list.values), vec!["a", "b", "c"]);
        assert_eq!(
            file.token(list.declaration)
                .kind(),
            TokenType::VariablesListDeclaration
        );
        assert!(file
            .diagnostics
            .is_empty());
    }

    #[test]
    fn dictionary_items_split_on_first_equals() {
        let file = parsed("*** Variables ***\n&{d}    a=1    b=2=3    ${k}=v\n");

        let dictionary = &file
            .variables
            .variables[0];
        let pairs = dictionary.items(&file);
        let cells: Vec<_> = pairs
            .iter()
            .map(|(id, _)| *id)
            .collect();
        assert_eq!(cells, dictionary.values);

        let items: Vec<&DictionaryItem> = pairs
            .iter()
            .map(|(_, item)| item)
            .collect();

        assert_eq!(items[0].key, "a");
        assert_eq!(items[0].value.as_deref(), Some("1"));
        assert_eq!(items[1].key, "b");
        assert_eq!(items[1].value.as_deref(), Some("2=3"));
        assert_eq!(items[2].key, "${k}");
        assert_eq!(items[2].value.as_deref(), Some("v"));
        assert!(items
            .iter()
            .all(|item| item.is_well_formed()));
    }

    #[test]
    fn dictionary_items_through_the_model() {
        let file = parsed("*** Variables ***\n&{d}    a=1    b=2\n${s}    a=1\n");

        let dictionary = &file
            .variables
            .variables[0];
        let items: Vec<_> = dictionary
            .items(&file)
            .into_iter()
            .map(|(id, item)| (file.text(id).to_string(), item.key, item.value))
            .collect();
        assert_eq!(
            items,
            vec![
                ("a=1".to_string(), "a".to_string(), Some("1".to_string())),
                ("b=2".to_string(), "b".to_string(), Some("2".to_string())),
            ]
        );

        let scalar = &file
            .variables
            .variables[1];
        assert!(scalar
            .items(&file)
            .is_empty());
    }

    #[test]
    fn declaration_names_are_not_usages() {
        let file = parsed("*** Variables ***\n${a}    ${b}\n");

        let variable = &file
            .variables
            .variables[0];
        assert!(!file
            .token(variable.declaration)
            .has_type(TokenType::VariableUsage));
        assert!(file
            .token(variable.values[0])
            .has_type(TokenType::VariableUsage));
    }

    #[test]
    fn analysis_can_be_turned_off() {
        let options = ParserOptions {
            analyze_variables: false,
            ..ParserOptions::default()
        };
        let file = parsing::parse("*** Test Cases ***\nT\n    Log    ${open\n", &options);

        assert!(file
            .diagnostics
            .is_empty());
    }

    #[test]
    fn cells_nest_variables() {
        let structure = extract("Hello ${user${id}} from %{HOME}");

        let top = structure.variables();
        assert_eq!(top.len(), 2);
        assert_eq!(structure.name(top[0]), "user${id}");
        assert_eq!(
            structure
                .container(top[1])
                .kind,
            ContainerKind::Environment
        );

        let nested: Vec<_> = structure
            .children(top[0])
            .collect();
        assert_eq!(structure.name(nested[0]), "id");
    }
}
