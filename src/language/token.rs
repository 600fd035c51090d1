//! Tokens and their classification tags

use serde::Serialize;

/// Location of a token in the original input. The line is 1-based; column and
/// offset are 0-based and count bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

/// Index of a token in the arena owned by a RobotFile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TokenId(pub(crate) usize);

impl TokenId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// The lexical or structural role a token has been given. A token collects
/// these as parsing progresses; see Token::types().
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenType {
    Unknown,
    PrettyAlignSpace,
    PreviousLineContinue,
    StartHashComment,
    CommentContinue,
    EmptyCell,
    VariableUsage,
    UnwantedArgument,

    SettingsTableHeader,
    VariablesTableHeader,
    TestCasesTableHeader,
    TasksTableHeader,
    KeywordsTableHeader,
    CommentsTableHeader,
    UserOwnTableHeader,
    TableHeaderColumn,

    SettingLibraryDeclaration,
    SettingLibraryName,
    SettingLibraryArgument,
    SettingLibraryAliasDeclaration,
    SettingLibraryAlias,
    SettingResourceDeclaration,
    SettingResourceFileName,
    SettingResourceUnwantedArgument,
    SettingVariablesDeclaration,
    SettingVariablesFileName,
    SettingVariablesArgument,
    SettingDocumentation,
    SettingDocumentationText,
    SettingMetadataDeclaration,
    SettingMetadataKey,
    SettingMetadataValue,
    SettingSuiteSetupDeclaration,
    SettingSuiteSetupKeywordName,
    SettingSuiteSetupKeywordArgument,
    SettingSuiteTeardownDeclaration,
    SettingSuiteTeardownKeywordName,
    SettingSuiteTeardownKeywordArgument,
    SettingTestSetupDeclaration,
    SettingTestSetupKeywordName,
    SettingTestSetupKeywordArgument,
    SettingTestTeardownDeclaration,
    SettingTestTeardownKeywordName,
    SettingTestTeardownKeywordArgument,
    SettingTestTemplateDeclaration,
    SettingTestTemplateKeywordName,
    SettingTestTemplateKeywordUnwantedArgument,
    SettingTestTimeoutDeclaration,
    SettingTestTimeoutValue,
    SettingTestTimeoutMessage,
    SettingForceTagsDeclaration,
    SettingForceTagsTagName,
    SettingDefaultTagsDeclaration,
    SettingDefaultTagsTagName,
    SettingUnknownDeclaration,
    SettingUnknownArguments,

    VariablesScalarDeclaration,
    VariablesListDeclaration,
    VariablesDictionaryDeclaration,
    VariablesUnknownDeclaration,
    VariablesVariableValue,

    TestCaseName,
    TestCaseActionName,
    TestCaseActionArgument,
    TestCaseTemplateArgument,
    TaskTemplateArgument,
    TestCaseSettingDocumentation,
    TestCaseSettingDocumentationText,
    TestCaseSettingTagsDeclaration,
    TestCaseSettingTagsTagName,
    TestCaseSettingSetup,
    TestCaseSettingSetupKeywordName,
    TestCaseSettingSetupKeywordArgument,
    TestCaseSettingTeardown,
    TestCaseSettingTeardownKeywordName,
    TestCaseSettingTeardownKeywordArgument,
    TestCaseSettingTemplate,
    TestCaseSettingTemplateKeywordName,
    TestCaseSettingTemplateKeywordUnwantedArgument,
    TestCaseSettingTimeout,
    TestCaseSettingTimeoutValue,
    TestCaseSettingTimeoutMessage,
    TestCaseSettingUnknownDeclaration,
    TestCaseSettingUnknownArguments,

    KeywordName,
    KeywordActionName,
    KeywordActionArgument,
    KeywordSettingDocumentation,
    KeywordSettingDocumentationText,
    KeywordSettingTags,
    KeywordSettingTagsTagName,
    KeywordSettingArguments,
    KeywordSettingArgument,
    KeywordSettingReturn,
    KeywordSettingReturnValue,
    KeywordSettingTeardown,
    KeywordSettingTeardownKeywordName,
    KeywordSettingTeardownKeywordArgument,
    KeywordSettingTimeout,
    KeywordSettingTimeoutValue,
    KeywordSettingTimeoutMessage,
    KeywordSettingUnknownDeclaration,
    KeywordSettingUnknownArguments,

    ForToken,
    InToken,
    ForContinueToken,
    ForEndToken,
    ForWithEndContinuation,
}

impl TokenType {
    /// Tokens of these types are part of a line's layout rather than of any
    /// model element.
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            TokenType::PrettyAlignSpace | TokenType::PreviousLineContinue | TokenType::EmptyCell
        )
    }

    pub fn is_comment(self) -> bool {
        matches!(
            self,
            TokenType::StartHashComment | TokenType::CommentContinue
        )
    }

    /// Tags describing what a token contains rather than the role it plays.
    pub fn is_annotation(self) -> bool {
        matches!(self, TokenType::VariableUsage)
    }

    pub fn is_header(self) -> bool {
        matches!(
            self,
            TokenType::SettingsTableHeader
                | TokenType::VariablesTableHeader
                | TokenType::TestCasesTableHeader
                | TokenType::TasksTableHeader
                | TokenType::KeywordsTableHeader
                | TokenType::CommentsTableHeader
                | TokenType::UserOwnTableHeader
        )
    }
}

/// A positioned unit of text. Parsed tokens are never changed once the parse
/// that created them is complete; edits make new ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    raw: Option<String>,
    text: String,
    position: Option<Position>,
    types: Vec<TokenType>,
}

impl Token {
    /// A token read from the input. A lone backslash is the explicit empty
    /// cell, and normalizes to no text at all.
    pub(crate) fn parsed(raw: &str, position: Position) -> Token {
        let text = if raw == "\\" { "" } else { raw };

        Token {
            raw: Some(raw.to_string()),
            text: text.to_string(),
            position: Some(position),
            types: vec![TokenType::Unknown],
        }
    }

    /// A token created by an edit, without any position in the input.
    pub fn new(text: &str, kind: TokenType) -> Token {
        Token {
            raw: None,
            text: text.to_string(),
            position: None,
            types: vec![kind],
        }
    }

    /// A token taking over the cell of another one. It keeps the position
    /// and classification history of what it replaces but none of its text.
    pub(crate) fn replacing(previous: &Token, text: &str) -> Token {
        Token {
            raw: None,
            text: text.to_string(),
            position: previous.position,
            types: previous
                .types
                .clone(),
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw
            .as_deref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// Classification tags, most recently assigned first.
    pub fn types(&self) -> &[TokenType] {
        &self.types
    }

    /// The most recent classification of the token's role.
    pub fn kind(&self) -> TokenType {
        self.types
            .iter()
            .find(|kind| !kind.is_annotation())
            .copied()
            .unwrap_or(TokenType::Unknown)
    }

    pub fn has_type(&self, kind: TokenType) -> bool {
        self.types
            .contains(&kind)
    }

    pub fn is_structural(&self) -> bool {
        self.types
            .iter()
            .any(|kind| kind.is_structural())
    }

    pub fn is_comment(&self) -> bool {
        self.types
            .iter()
            .any(|kind| kind.is_comment())
    }

    /// Tags are only ever added, in front of the ones already present.
    pub(crate) fn tag(&mut self, kind: TokenType) {
        if self
            .types
            .first()
            != Some(&kind)
        {
            self.types
                .insert(0, kind);
        }
    }

    /// Length of the token as it appears (or will appear) in the output.
    pub fn width(&self) -> usize {
        match &self.raw {
            Some(raw) => raw.len(),
            None => self
                .text
                .len(),
        }
    }
}
