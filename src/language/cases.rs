//! Test cases, tasks and user keywords: a name followed by a body of local
//! settings and executable rows.

use serde::Serialize;

use super::element::{move_down, move_up, Element, Slot};
use super::token::{TokenId, TokenType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DefinitionKind {
    TestCase,
    Keyword,
}

impl DefinitionKind {
    pub fn name_tag(self) -> TokenType {
        match self {
            DefinitionKind::TestCase => TokenType::TestCaseName,
            DefinitionKind::Keyword => TokenType::KeywordName,
        }
    }

    pub fn action_tag(self) -> TokenType {
        match self {
            DefinitionKind::TestCase => TokenType::TestCaseActionName,
            DefinitionKind::Keyword => TokenType::KeywordActionName,
        }
    }

    pub fn argument_tag(self) -> TokenType {
        match self {
            DefinitionKind::TestCase => TokenType::TestCaseActionArgument,
            DefinitionKind::Keyword => TokenType::KeywordActionArgument,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LocalSettingKind {
    Documentation,
    Tags,
    Setup,
    Teardown,
    Template,
    Timeout,
    Arguments,
    Return,
    Unknown,
}

impl LocalSettingKind {
    pub const DECLARABLE: [LocalSettingKind; 8] = [
        LocalSettingKind::Documentation,
        LocalSettingKind::Tags,
        LocalSettingKind::Setup,
        LocalSettingKind::Teardown,
        LocalSettingKind::Template,
        LocalSettingKind::Timeout,
        LocalSettingKind::Arguments,
        LocalSettingKind::Return,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LocalSettingKind::Documentation => "[Documentation]",
            LocalSettingKind::Tags => "[Tags]",
            LocalSettingKind::Setup => "[Setup]",
            LocalSettingKind::Teardown => "[Teardown]",
            LocalSettingKind::Template => "[Template]",
            LocalSettingKind::Timeout => "[Timeout]",
            LocalSettingKind::Arguments => "[Arguments]",
            LocalSettingKind::Return => "[Return]",
            LocalSettingKind::Unknown => "unknown setting",
        }
    }

    pub fn deprecated_names(self) -> &'static [&'static str] {
        match self {
            LocalSettingKind::Documentation => &["[Document]"],
            LocalSettingKind::Setup => &["[Precondition]"],
            LocalSettingKind::Teardown => &["[Postcondition]"],
            _ => &[],
        }
    }

    pub fn allowed_in(self, definition: DefinitionKind) -> bool {
        match self {
            LocalSettingKind::Setup | LocalSettingKind::Template => {
                definition == DefinitionKind::TestCase
            }
            LocalSettingKind::Arguments | LocalSettingKind::Return => {
                definition == DefinitionKind::Keyword
            }
            _ => true,
        }
    }

    pub fn is_keyword_based(self) -> bool {
        matches!(
            self,
            LocalSettingKind::Setup | LocalSettingKind::Teardown | LocalSettingKind::Template
        )
    }

    /// Settings written at the end of a body rather than at its start.
    fn is_trailing(self) -> bool {
        matches!(
            self,
            LocalSettingKind::Teardown | LocalSettingKind::Return
        )
    }

    pub fn tag(self, definition: DefinitionKind, slot: Slot) -> TokenType {
        use DefinitionKind::{Keyword, TestCase};
        use TokenType as T;

        if slot == Slot::Unwanted && self != LocalSettingKind::Template {
            return T::UnwantedArgument;
        }

        match (definition, self, slot) {
            (TestCase, LocalSettingKind::Documentation, Slot::Declaration) => {
                T::TestCaseSettingDocumentation
            }
            (TestCase, LocalSettingKind::Documentation, _) => T::TestCaseSettingDocumentationText,
            (TestCase, LocalSettingKind::Tags, Slot::Declaration) => {
                T::TestCaseSettingTagsDeclaration
            }
            (TestCase, LocalSettingKind::Tags, _) => T::TestCaseSettingTagsTagName,
            (TestCase, LocalSettingKind::Setup, Slot::Declaration) => T::TestCaseSettingSetup,
            (TestCase, LocalSettingKind::Setup, Slot::Name) => T::TestCaseSettingSetupKeywordName,
            (TestCase, LocalSettingKind::Setup, _) => T::TestCaseSettingSetupKeywordArgument,
            (TestCase, LocalSettingKind::Teardown, Slot::Declaration) => T::TestCaseSettingTeardown,
            (TestCase, LocalSettingKind::Teardown, Slot::Name) => {
                T::TestCaseSettingTeardownKeywordName
            }
            (TestCase, LocalSettingKind::Teardown, _) => T::TestCaseSettingTeardownKeywordArgument,
            (TestCase, LocalSettingKind::Template, Slot::Declaration) => T::TestCaseSettingTemplate,
            (TestCase, LocalSettingKind::Template, Slot::Name) => {
                T::TestCaseSettingTemplateKeywordName
            }
            (TestCase, LocalSettingKind::Template, _) => {
                T::TestCaseSettingTemplateKeywordUnwantedArgument
            }
            (TestCase, LocalSettingKind::Timeout, Slot::Declaration) => T::TestCaseSettingTimeout,
            (TestCase, LocalSettingKind::Timeout, Slot::Value) => T::TestCaseSettingTimeoutValue,
            (TestCase, LocalSettingKind::Timeout, _) => T::TestCaseSettingTimeoutMessage,
            (TestCase, _, Slot::Declaration) => T::TestCaseSettingUnknownDeclaration,
            (TestCase, _, _) => T::TestCaseSettingUnknownArguments,

            (Keyword, LocalSettingKind::Documentation, Slot::Declaration) => {
                T::KeywordSettingDocumentation
            }
            (Keyword, LocalSettingKind::Documentation, _) => T::KeywordSettingDocumentationText,
            (Keyword, LocalSettingKind::Tags, Slot::Declaration) => T::KeywordSettingTags,
            (Keyword, LocalSettingKind::Tags, _) => T::KeywordSettingTagsTagName,
            (Keyword, LocalSettingKind::Teardown, Slot::Declaration) => T::KeywordSettingTeardown,
            (Keyword, LocalSettingKind::Teardown, Slot::Name) => {
                T::KeywordSettingTeardownKeywordName
            }
            (Keyword, LocalSettingKind::Teardown, _) => T::KeywordSettingTeardownKeywordArgument,
            (Keyword, LocalSettingKind::Timeout, Slot::Declaration) => T::KeywordSettingTimeout,
            (Keyword, LocalSettingKind::Timeout, Slot::Value) => T::KeywordSettingTimeoutValue,
            (Keyword, LocalSettingKind::Timeout, _) => T::KeywordSettingTimeoutMessage,
            (Keyword, LocalSettingKind::Arguments, Slot::Declaration) => T::KeywordSettingArguments,
            (Keyword, LocalSettingKind::Arguments, _) => T::KeywordSettingArgument,
            (Keyword, LocalSettingKind::Return, Slot::Declaration) => T::KeywordSettingReturn,
            (Keyword, LocalSettingKind::Return, _) => T::KeywordSettingReturnValue,
            (Keyword, _, Slot::Declaration) => T::KeywordSettingUnknownDeclaration,
            (Keyword, _, _) => T::KeywordSettingUnknownArguments,
        }
    }
}

/// A `[Setting]` line inside a test case or keyword. For keyword based
/// settings the first value is the keyword name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalSetting {
    pub kind: LocalSettingKind,
    pub declaration: TokenId,
    pub values: Vec<TokenId>,
    pub unexpected: Vec<TokenId>,
    pub comment: Vec<TokenId>,
}

impl LocalSetting {
    pub fn new(kind: LocalSettingKind, declaration: TokenId) -> LocalSetting {
        LocalSetting {
            kind,
            declaration,
            values: Vec::new(),
            unexpected: Vec::new(),
            comment: Vec::new(),
        }
    }

    pub fn has_keyword_name(&self) -> bool {
        self.kind
            .is_keyword_based()
            && !self
                .values
                .is_empty()
    }

    pub fn keyword_name(&self) -> Option<TokenId> {
        if self
            .kind
            .is_keyword_based()
        {
            self.values
                .first()
                .copied()
        } else {
            None
        }
    }

    pub fn arguments(&self) -> &[TokenId] {
        if self
            .kind
            .is_keyword_based()
            && !self
                .values
                .is_empty()
        {
            &self.values[1..]
        } else {
            &self.values
        }
    }
}

impl Element for LocalSetting {
    fn tokens(&self) -> Vec<TokenId> {
        let mut tokens = vec![self.declaration];
        tokens.extend_from_slice(&self.values);
        tokens.extend_from_slice(&self.unexpected);
        tokens.extend_from_slice(&self.comment);
        tokens
    }

    fn comment(&self) -> &[TokenId] {
        &self.comment
    }

    fn comment_mut(&mut self) -> &mut Vec<TokenId> {
        &mut self.comment
    }
}

/// One keyword call. A line holding only a comment is a row without action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutableRow {
    pub action: Option<TokenId>,
    pub arguments: Vec<TokenId>,
    pub comment: Vec<TokenId>,
}

impl ExecutableRow {
    pub fn new(action: TokenId, arguments: Vec<TokenId>) -> ExecutableRow {
        ExecutableRow {
            action: Some(action),
            arguments,
            comment: Vec::new(),
        }
    }

    pub fn set_action(&mut self, action: TokenId) {
        self.action = Some(action);
    }

    pub fn add_argument(&mut self, argument: TokenId) {
        self.arguments
            .push(argument);
    }

    pub fn insert_argument(&mut self, index: usize, argument: TokenId) {
        let index = index.min(
            self.arguments
                .len(),
        );
        self.arguments
            .insert(index, argument);
    }

    /// Replace the argument at index; an index past the end appends.
    pub fn set_argument(&mut self, index: usize, argument: TokenId) {
        match self
            .arguments
            .get_mut(index)
        {
            Some(slot) => *slot = argument,
            None => self
                .arguments
                .push(argument),
        }
    }

    pub fn remove_argument(&mut self, index: usize) -> Option<TokenId> {
        if index < self
            .arguments
            .len()
        {
            Some(
                self.arguments
                    .remove(index),
            )
        } else {
            None
        }
    }

    pub fn set_comment(&mut self, comment: Vec<TokenId>) {
        self.comment = comment;
    }

    pub fn is_comment_only(&self) -> bool {
        self.action
            .is_none()
            && self
                .arguments
                .is_empty()
    }
}

impl Element for ExecutableRow {
    fn tokens(&self) -> Vec<TokenId> {
        let mut tokens: Vec<TokenId> = self
            .action
            .into_iter()
            .collect();
        tokens.extend_from_slice(&self.arguments);
        tokens.extend_from_slice(&self.comment);
        tokens
    }

    fn comment(&self) -> &[TokenId] {
        &self.comment
    }

    fn comment_mut(&mut self) -> &mut Vec<TokenId> {
        &mut self.comment
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyItem {
    Setting(LocalSetting),
    Row(ExecutableRow),
    /// index of an empty line in the file's line list
    Blank(usize),
}

/// A test case, task or user keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub kind: DefinitionKind,
    pub name: TokenId,
    pub body: Vec<BodyItem>,
}

pub type TestCase = Definition;
pub type UserKeyword = Definition;

impl Definition {
    pub fn new(kind: DefinitionKind, name: TokenId) -> Definition {
        Definition {
            kind,
            name,
            body: Vec::new(),
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &ExecutableRow> + '_ {
        self.body
            .iter()
            .filter_map(|item| match item {
                BodyItem::Row(row) => Some(row),
                _ => None,
            })
    }

    pub fn settings(&self, kind: LocalSettingKind) -> impl Iterator<Item = &LocalSetting> + '_ {
        self.body
            .iter()
            .filter_map(move |item| match item {
                BodyItem::Setting(setting) if setting.kind == kind => Some(setting),
                _ => None,
            })
    }

    pub fn documentation(&self) -> impl Iterator<Item = &LocalSetting> + '_ {
        self.settings(LocalSettingKind::Documentation)
    }

    pub fn tags(&self) -> impl Iterator<Item = &LocalSetting> + '_ {
        self.settings(LocalSettingKind::Tags)
    }

    pub fn setups(&self) -> impl Iterator<Item = &LocalSetting> + '_ {
        self.settings(LocalSettingKind::Setup)
    }

    pub fn teardowns(&self) -> impl Iterator<Item = &LocalSetting> + '_ {
        self.settings(LocalSettingKind::Teardown)
    }

    pub fn templates(&self) -> impl Iterator<Item = &LocalSetting> + '_ {
        self.settings(LocalSettingKind::Template)
    }

    pub fn timeouts(&self) -> impl Iterator<Item = &LocalSetting> + '_ {
        self.settings(LocalSettingKind::Timeout)
    }

    pub fn arguments(&self) -> impl Iterator<Item = &LocalSetting> + '_ {
        self.settings(LocalSettingKind::Arguments)
    }

    pub fn returns(&self) -> impl Iterator<Item = &LocalSetting> + '_ {
        self.settings(LocalSettingKind::Return)
    }

    pub fn last_item_mut(&mut self) -> Option<&mut BodyItem> {
        self.body
            .last_mut()
    }

    /// Where content appended to the body goes: before any run of empty
    /// lines closing it.
    fn end_of_content(&self) -> usize {
        let trailing = self
            .body
            .iter()
            .rev()
            .take_while(|item| matches!(item, BodyItem::Blank(_)))
            .count();
        self.body
            .len()
            - trailing
    }

    pub fn add_row(&mut self, row: ExecutableRow) -> usize {
        let index = self.end_of_content();
        self.body
            .insert(index, BodyItem::Row(row));
        index
    }

    /// Add a local setting where it conventionally sits: leading settings
    /// after those already at the start of the body, teardown and return at
    /// the end.
    pub fn add_setting(&mut self, setting: LocalSetting) -> usize {
        let index = if setting
            .kind
            .is_trailing()
        {
            self.end_of_content()
        } else {
            self.body
                .iter()
                .take_while(|item| match item {
                    BodyItem::Setting(existing) => !existing
                        .kind
                        .is_trailing(),
                    _ => false,
                })
                .count()
        };
        self.body
            .insert(index, BodyItem::Setting(setting));
        index
    }

    /// Remove the n-th local setting of the given kind.
    pub fn remove_setting(&mut self, kind: LocalSettingKind, n: usize) -> Option<LocalSetting> {
        let index = self
            .body
            .iter()
            .enumerate()
            .filter(|(_, item)| matches!(item, BodyItem::Setting(setting) if setting.kind == kind))
            .nth(n)
            .map(|(index, _)| index)?;
        match self
            .body
            .remove(index)
        {
            BodyItem::Setting(setting) => Some(setting),
            _ => None,
        }
    }

    /// Insert a row so it becomes the n-th executable row; past the last row
    /// this is add_row().
    pub fn insert_row(&mut self, n: usize, row: ExecutableRow) -> usize {
        match self.row_position(n) {
            Some(index) => {
                self.body
                    .insert(index, BodyItem::Row(row));
                index
            }
            None => self.add_row(row),
        }
    }

    pub fn insert_item(&mut self, index: usize, item: BodyItem) {
        let index = index.min(
            self.body
                .len(),
        );
        self.body
            .insert(index, item);
    }

    pub fn remove_item(&mut self, index: usize) -> Option<BodyItem> {
        if index < self
            .body
            .len()
        {
            Some(
                self.body
                    .remove(index),
            )
        } else {
            None
        }
    }

    pub fn move_item_up(&mut self, index: usize) -> bool {
        move_up(&mut self.body, index)
    }

    pub fn move_item_down(&mut self, index: usize) -> bool {
        move_down(&mut self.body, index)
    }

    /// Index into the body of the n-th executable row.
    pub fn row_position(&self, n: usize) -> Option<usize> {
        self.body
            .iter()
            .enumerate()
            .filter(|(_, item)| matches!(item, BodyItem::Row(_)))
            .nth(n)
            .map(|(index, _)| index)
    }

    pub fn row_mut(&mut self, n: usize) -> Option<&mut ExecutableRow> {
        let index = self.row_position(n)?;
        match &mut self.body[index] {
            BodyItem::Row(row) => Some(row),
            _ => None,
        }
    }

    pub fn remove_row(&mut self, n: usize) -> Option<ExecutableRow> {
        let index = self.row_position(n)?;
        match self
            .body
            .remove(index)
        {
            BodyItem::Row(row) => Some(row),
            _ => None,
        }
    }

    pub fn move_row_up(&mut self, n: usize) -> bool {
        match self.row_position(n) {
            Some(index) => self.move_item_up(index),
            None => false,
        }
    }

    pub fn move_row_down(&mut self, n: usize) -> bool {
        match self.row_position(n) {
            Some(index) => self.move_item_down(index),
            None => false,
        }
    }

    pub fn remove_all_rows(&mut self) {
        self.body
            .retain(|item| !matches!(item, BodyItem::Row(_)));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionTable {
    pub kind: DefinitionKind,
    /// declared as `*** Tasks ***` rather than `*** Test Cases ***`
    pub tasks: bool,
    pub definitions: Vec<Definition>,
}

pub type TestCaseTable = DefinitionTable;
pub type KeywordTable = DefinitionTable;

impl DefinitionTable {
    pub fn new(kind: DefinitionKind) -> DefinitionTable {
        DefinitionTable {
            kind,
            tasks: false,
            definitions: Vec::new(),
        }
    }

    pub fn add(&mut self, definition: Definition) -> usize {
        self.definitions
            .push(definition);
        self.definitions
            .len()
            - 1
    }

    pub fn get(&self, index: usize) -> Option<&Definition> {
        self.definitions
            .get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Definition> {
        self.definitions
            .get_mut(index)
    }

    pub fn last_mut(&mut self) -> Option<&mut Definition> {
        self.definitions
            .last_mut()
    }

    pub fn remove(&mut self, index: usize) -> Option<Definition> {
        if index < self
            .definitions
            .len()
        {
            Some(
                self.definitions
                    .remove(index),
            )
        } else {
            None
        }
    }

    pub fn move_up(&mut self, index: usize) -> bool {
        move_up(&mut self.definitions, index)
    }

    pub fn move_down(&mut self, index: usize) -> bool {
        move_down(&mut self.definitions, index)
    }

    pub fn len(&self) -> usize {
        self.definitions
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions
            .is_empty()
    }
}
