use robotdata::{
    formatting::{Render, Syntax},
    language::*,
};

/// Generate problem and detail messages for diagnostics found while parsing.
/// Where it helps, the detail shows what the input should look like, styled
/// with the given renderer.
pub fn generate_problem_message(problem: &Problem, renderer: &dyn Render) -> (String, String) {
    match problem {
        Problem::UnknownSetting(name) => (
            format!("Unknown setting '{}'", name),
            r#"
Settings in the Settings table are things like Library, Resource,
Documentation, Suite Setup or Test Timeout. Check the spelling, or remove
the line if it is not needed.
            "#
            .trim_ascii()
            .to_string(),
        ),
        Problem::UnknownLocalSetting(name) => {
            let example = format!(
                "    {}    Open Browser",
                renderer.style(Syntax::Declaration, "[Setup]")
            );
            (
                format!("Unknown setting '{}'", name),
                format!(
                    r#"
Test cases and keywords take their own settings in square brackets, such as

{}

Test cases allow [Documentation], [Tags], [Setup], [Teardown], [Template]
and [Timeout]; keywords allow [Documentation], [Tags], [Arguments],
[Return], [Teardown] and [Timeout].
                    "#,
                    example
                )
                .trim_ascii()
                .to_string(),
            )
        }
        Problem::UnwantedArgument { setting, text } => (
            format!("Unexpected value '{}'", text),
            format!(
                "The {} setting does not take this value. It is kept in the file but ignored.",
                setting
            ),
        ),
        Problem::DeprecatedDeclaration { found, replacement } => (
            format!("'{}' is deprecated", found),
            format!(
                "Use {} instead. The old spelling still works but will be removed.",
                renderer.style(Syntax::Declaration, replacement)
            ),
        ),
        Problem::UnsupportedTable { name, since } => (
            format!("Unsupported table '{}'", name),
            format!(
                "This table is only recognized from Robot Framework {}. Until then its content is ignored.",
                since
            ),
        ),
        Problem::InvalidVariableDeclaration(text) => {
            let example = format!(
                "{}    value",
                renderer.style(Syntax::Variable, "${name}")
            );
            (
                format!("Invalid variable '{}'", text),
                format!(
                    r#"
Variables are declared as a scalar ${{name}}, a list @{{name}} or a
dictionary &{{name}}, optionally followed by '=':

{}
                    "#,
                    example
                )
                .trim_ascii()
                .to_string(),
            )
        }
        Problem::DictionaryItemWithoutKey(text) => (
            format!("Dictionary item '{}' has no key", text),
            "Items of a dictionary variable are written as key=value.".to_string(),
        ),
        Problem::MissingClosingBracket(text) => (
            format!("Missing closing bracket in '{}'", text),
            r#"
Every '{' that starts a variable must have a matching '}', and every '['
of an item access a matching ']'. Escape a literal bracket with '\'.
            "#
            .trim_ascii()
            .to_string(),
        ),
        Problem::DefinitionMissing => {
            let example = format!(
                "{}\n    Log    hello",
                renderer.style(Syntax::Definition, "My Test")
            );
            (
                "Indented line outside of any test case or keyword".to_string(),
                format!(
                    r#"
Indented lines are the body of the test case or keyword named above them.
Give this one a name first:

{}
                    "#,
                    example
                )
                .trim_ascii()
                .to_string(),
            )
        }
        Problem::ContinuationWithoutElement => (
            "Nothing to continue".to_string(),
            r#"
A line starting with '...' continues the line above it, but the line above
is empty, a comment, or a table header.
            "#
            .trim_ascii()
            .to_string(),
        ),
        Problem::IllegalParserState(_) => (
            "Illegal parser state".to_string(),
            "Internal parser error. This should not have happened! Sorry.".to_string(),
        ),
    }
}
