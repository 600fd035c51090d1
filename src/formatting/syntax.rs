//! Renderers for colourizing Robot Framework test data

use crate::language::TokenType;

/// Types of content that can be rendered with different styles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    Neutral, // default
    Newline,
    Separator,
    Header,
    Declaration,
    Definition,
    Invocation,
    Variable,
    Comment,
    Continuation,
    Keyword,
    Unwanted,
}

impl Syntax {
    /// How a token with the given role is shown.
    pub fn of(kind: TokenType) -> Syntax {
        use TokenType as T;

        match kind {
            T::SettingsTableHeader
            | T::VariablesTableHeader
            | T::TestCasesTableHeader
            | T::TasksTableHeader
            | T::KeywordsTableHeader
            | T::CommentsTableHeader
            | T::UserOwnTableHeader
            | T::TableHeaderColumn => Syntax::Header,

            T::StartHashComment | T::CommentContinue => Syntax::Comment,
            T::PreviousLineContinue => Syntax::Continuation,
            T::ForToken
            | T::InToken
            | T::ForContinueToken
            | T::ForEndToken
            | T::ForWithEndContinuation => Syntax::Keyword,

            T::SettingLibraryDeclaration
            | T::SettingLibraryAliasDeclaration
            | T::SettingResourceDeclaration
            | T::SettingVariablesDeclaration
            | T::SettingDocumentation
            | T::SettingMetadataDeclaration
            | T::SettingSuiteSetupDeclaration
            | T::SettingSuiteTeardownDeclaration
            | T::SettingTestSetupDeclaration
            | T::SettingTestTeardownDeclaration
            | T::SettingTestTemplateDeclaration
            | T::SettingTestTimeoutDeclaration
            | T::SettingForceTagsDeclaration
            | T::SettingDefaultTagsDeclaration
            | T::TestCaseSettingDocumentation
            | T::TestCaseSettingTagsDeclaration
            | T::TestCaseSettingSetup
            | T::TestCaseSettingTeardown
            | T::TestCaseSettingTemplate
            | T::TestCaseSettingTimeout
            | T::KeywordSettingDocumentation
            | T::KeywordSettingTags
            | T::KeywordSettingArguments
            | T::KeywordSettingReturn
            | T::KeywordSettingTeardown
            | T::KeywordSettingTimeout => Syntax::Declaration,

            T::VariablesScalarDeclaration
            | T::VariablesListDeclaration
            | T::VariablesDictionaryDeclaration
            | T::KeywordSettingArgument => Syntax::Variable,

            T::TestCaseName | T::KeywordName => Syntax::Definition,

            T::SettingSuiteSetupKeywordName
            | T::SettingSuiteTeardownKeywordName
            | T::SettingTestSetupKeywordName
            | T::SettingTestTeardownKeywordName
            | T::SettingTestTemplateKeywordName
            | T::TestCaseActionName
            | T::TestCaseSettingSetupKeywordName
            | T::TestCaseSettingTeardownKeywordName
            | T::TestCaseSettingTemplateKeywordName
            | T::KeywordActionName
            | T::KeywordSettingTeardownKeywordName => Syntax::Invocation,

            T::UnwantedArgument
            | T::SettingResourceUnwantedArgument
            | T::SettingTestTemplateKeywordUnwantedArgument
            | T::TestCaseSettingTemplateKeywordUnwantedArgument
            | T::SettingUnknownDeclaration
            | T::VariablesUnknownDeclaration
            | T::TestCaseSettingUnknownDeclaration
            | T::KeywordSettingUnknownDeclaration => Syntax::Unwanted,

            _ => Syntax::Neutral,
        }
    }

    /// Cells whose variables are worth picking out individually.
    pub fn splits_variables(self) -> bool {
        matches!(self, Syntax::Neutral | Syntax::Invocation)
    }
}

/// Trait for different rendering backends (the no-op no-markup one, ANSI
/// escapes for terminal colouring)
pub trait Render {
    /// Apply styling to content with the specified syntax type
    fn style(&self, content_type: Syntax, content: &str) -> String;
}

/// Returns content unchanged, with no markup applied
pub struct Identity;

impl Render for Identity {
    fn style(&self, _syntax: Syntax, content: &str) -> String {
        content.to_string()
    }
}
