//! The root of a parsed file: its tables, the lines they were read from, and
//! the token arena both refer into.

use std::ops::Range;

use serde::Serialize;

use super::cases::{
    BodyItem, Definition, DefinitionKind, DefinitionTable, ExecutableRow, LocalSetting,
    LocalSettingKind,
};
use super::diagnostic::{Diagnostic, Problem};
use super::element::Slot;
use super::line::Line;
use super::settings::{
    Documentation, Import, KeywordSetting, Metadata, SettingKind, SettingTable, TagsSetting,
    Timeout,
};
use super::token::{Position, Token, TokenId, TokenType};
use super::variables::{DictionaryItem, Variable, VariableKind, VariableTable};
use super::version::RobotVersion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SectionKind {
    /// anything before the first table header
    Preamble,
    Settings,
    Variables,
    TestCases,
    Tasks,
    Keywords,
    Comments,
    /// a table of unknown name, or one the targeted version does not have
    UserTable,
}

impl SectionKind {
    /// Sections written back exactly as they were read.
    pub fn is_verbatim(self) -> bool {
        matches!(
            self,
            SectionKind::Preamble | SectionKind::Comments | SectionKind::UserTable
        )
    }

    pub fn header(self) -> Option<&'static str> {
        match self {
            SectionKind::Settings => Some("*** Settings ***"),
            SectionKind::Variables => Some("*** Variables ***"),
            SectionKind::TestCases => Some("*** Test Cases ***"),
            SectionKind::Tasks => Some("*** Tasks ***"),
            SectionKind::Keywords => Some("*** Keywords ***"),
            SectionKind::Comments => Some("*** Comments ***"),
            _ => None,
        }
    }

    pub fn header_tag(self) -> TokenType {
        match self {
            SectionKind::Settings => TokenType::SettingsTableHeader,
            SectionKind::Variables => TokenType::VariablesTableHeader,
            SectionKind::TestCases => TokenType::TestCasesTableHeader,
            SectionKind::Tasks => TokenType::TasksTableHeader,
            SectionKind::Keywords => TokenType::KeywordsTableHeader,
            SectionKind::Comments => TokenType::CommentsTableHeader,
            SectionKind::Preamble | SectionKind::UserTable => TokenType::UserOwnTableHeader,
        }
    }
}

/// A run of lines introduced by one table header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    /// index of the header line; the preamble has none
    pub header: Option<usize>,
    /// indices of every line in the section, header included
    pub lines: Range<usize>,
    /// lines in the section that belong to no element: blank lines and
    /// comments between elements
    pub trivia: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotFile {
    pub settings: SettingTable,
    pub variables: VariableTable,
    pub test_cases: DefinitionTable,
    pub keywords: DefinitionTable,
    pub diagnostics: Vec<Diagnostic>,
    /// tokens no mapper accepted; they stay in their line
    pub unclaimed: Vec<TokenId>,
    pub version: RobotVersion,
    pub(crate) bom: bool,
    pub(crate) lines: Vec<Line>,
    pub(crate) sections: Vec<Section>,
    tokens: Vec<Token>,
}

impl Default for RobotFile {
    fn default() -> RobotFile {
        RobotFile::new(RobotVersion::default())
    }
}

impl RobotFile {
    pub fn new(version: RobotVersion) -> RobotFile {
        RobotFile {
            settings: SettingTable::default(),
            variables: VariableTable::default(),
            test_cases: DefinitionTable::new(DefinitionKind::TestCase),
            keywords: DefinitionTable::new(DefinitionKind::Keyword),
            diagnostics: Vec::new(),
            unclaimed: Vec::new(),
            version,
            bom: false,
            lines: Vec::new(),
            sections: Vec::new(),
            tokens: Vec::new(),
        }
    }

    pub fn has_bom(&self) -> bool {
        self.bom
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn token(&self, id: TokenId) -> &Token {
        &self.tokens[id.0]
    }

    pub(crate) fn token_mut(&mut self, id: TokenId) -> &mut Token {
        &mut self.tokens[id.0]
    }

    pub fn text(&self, id: TokenId) -> &str {
        self.tokens[id.0].text()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub(crate) fn push_token(&mut self, token: Token) -> TokenId {
        self.tokens
            .push(token);
        TokenId(
            self.tokens
                .len()
                - 1,
        )
    }

    /// Create a token for an edit. It has no position; where it ends up when
    /// written out is decided by the element it is added to.
    pub fn new_token(&mut self, text: &str, kind: TokenType) -> TokenId {
        self.push_token(Token::new(text, kind))
    }

    /// Create a token to stand in for an existing one, in the same cell. The
    /// caller puts the returned id in place of the old one.
    pub fn replace_token(&mut self, id: TokenId, text: &str) -> TokenId {
        let replacement = Token::replacing(self.token(id), text);
        self.push_token(replacement)
    }

    /// Index into lines() of the line a token was read from.
    pub fn line_of(&self, id: TokenId) -> Option<usize> {
        self.token(id)
            .position()
            .map(|position| position.line - 1)
    }

    /// A line with no content: nothing but whitespace and empty cells.
    pub fn is_blank_line(&self, index: usize) -> bool {
        self.lines[index]
            .tokens()
            .all(|id| {
                let token = self.token(id);
                token.kind() != TokenType::PreviousLineContinue
                    && token
                        .text()
                        .trim()
                        .is_empty()
                    && (token.is_structural()
                        || token
                            .raw()
                            .map_or(true, |raw| raw != "\\"))
            })
    }

    pub(crate) fn report(&mut self, problem: Problem, position: Option<Position>) {
        let position = position.unwrap_or(Position {
            line: 0,
            column: 0,
            offset: 0,
        });
        self.diagnostics
            .push(Diagnostic::new(problem, position));
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.is_error())
    }

    pub fn has_errors(&self) -> bool {
        self.errors()
            .next()
            .is_some()
    }

    pub fn table(&self, kind: DefinitionKind) -> &DefinitionTable {
        match kind {
            DefinitionKind::TestCase => &self.test_cases,
            DefinitionKind::Keyword => &self.keywords,
        }
    }

    pub fn table_mut(&mut self, kind: DefinitionKind) -> &mut DefinitionTable {
        match kind {
            DefinitionKind::TestCase => &mut self.test_cases,
            DefinitionKind::Keyword => &mut self.keywords,
        }
    }

    fn new_tokens(&mut self, texts: &[&str], kind: TokenType) -> Vec<TokenId> {
        texts
            .iter()
            .map(|text| self.new_token(text, kind))
            .collect()
    }

    pub fn add_import(&mut self, kind: SettingKind, path: &str, arguments: &[&str]) -> usize {
        let declaration = self.new_token(kind.name(), kind.tag(Slot::Declaration));
        let mut import = Import::new(kind, declaration);
        import.path = Some(self.new_token(path, kind.tag(Slot::Name)));
        import.arguments = self.new_tokens(arguments, kind.tag(Slot::Argument));
        self.settings
            .add_import(import)
    }

    /// Give a library import a `WITH NAME` alias, replacing any it had.
    pub fn set_library_alias(&mut self, index: usize, alias: &str) -> bool {
        let marker = self.new_token("WITH NAME", SettingKind::Library.tag(Slot::Alias));
        let name = self.new_token(alias, SettingKind::Library.tag(Slot::AliasValue));

        match self
            .settings
            .imports
            .get_mut(index)
        {
            Some(import) if import.kind == SettingKind::Library => {
                import.alias = Some(marker);
                import.alias_name = Some(name);
                true
            }
            _ => false,
        }
    }

    pub fn add_keyword_setting(&mut self, kind: SettingKind, keyword: &str, arguments: &[&str]) {
        let declaration = self.new_token(kind.name(), kind.tag(Slot::Declaration));
        let mut setting = KeywordSetting::new(kind, declaration);
        setting.keyword = Some(self.new_token(keyword, kind.tag(Slot::Name)));
        setting.arguments = self.new_tokens(arguments, kind.tag(Slot::Argument));
        self.settings
            .add_keyword_setting(setting);
    }

    pub fn add_documentation(&mut self, text: &[&str]) {
        let kind = SettingKind::Documentation;
        let declaration = self.new_token(kind.name(), kind.tag(Slot::Declaration));
        let mut documentation = Documentation::new(declaration);
        documentation.text = self.new_tokens(text, kind.tag(Slot::Value));
        self.settings
            .add_documentation(documentation);
    }

    pub fn add_metadata(&mut self, key: &str, values: &[&str]) -> usize {
        let kind = SettingKind::Metadata;
        let declaration = self.new_token(kind.name(), kind.tag(Slot::Declaration));
        let mut metadata = Metadata::new(declaration);
        metadata.key = Some(self.new_token(key, kind.tag(Slot::Name)));
        metadata.values = self.new_tokens(values, kind.tag(Slot::Value));
        self.settings
            .add_metadata(metadata)
    }

    pub fn add_tags(&mut self, kind: SettingKind, tags: &[&str]) {
        let declaration = self.new_token(kind.name(), kind.tag(Slot::Declaration));
        let mut setting = TagsSetting::new(kind, declaration);
        setting.tags = self.new_tokens(tags, kind.tag(Slot::Value));
        self.settings
            .add_tags(setting);
    }

    pub fn add_test_timeout(&mut self, value: &str, message: &[&str]) {
        let kind = SettingKind::TestTimeout;
        let declaration = self.new_token(kind.name(), kind.tag(Slot::Declaration));
        let mut timeout = Timeout::new(declaration);
        timeout.value = Some(self.new_token(value, kind.tag(Slot::Value)));
        timeout.message = self.new_tokens(message, kind.tag(Slot::Argument));
        self.settings
            .add_timeout(timeout);
    }

    fn add_variable(&mut self, kind: VariableKind, name: &str, values: Vec<String>) -> usize {
        let declaration = self.new_token(&kind.decorate(name), kind.tag(Slot::Declaration));
        let mut variable = Variable::new(kind, declaration);
        for value in values {
            let id = self.new_token(&value, kind.tag(Slot::Value));
            variable
                .values
                .push(id);
        }
        self.variables
            .add(variable)
    }

    /// Add `${name}`; the name may be given with or without its decoration.
    pub fn add_scalar_variable(&mut self, name: &str, value: &str) -> usize {
        self.add_variable(VariableKind::Scalar, name, vec![value.to_string()])
    }

    pub fn add_list_variable(&mut self, name: &str, values: &[&str]) -> usize {
        let values = values
            .iter()
            .map(|value| value.to_string())
            .collect();
        self.add_variable(VariableKind::List, name, values)
    }

    pub fn add_dictionary_variable(&mut self, name: &str, items: &[(&str, &str)]) -> usize {
        let values = items
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        self.add_variable(VariableKind::Dictionary, name, values)
    }

    /// Rewrite one item of a dictionary variable in place. Returns the cell
    /// now holding it, or None if there is no such dictionary item.
    pub fn set_dictionary_item(
        &mut self,
        variable: usize,
        item: usize,
        key: &str,
        value: Option<&str>,
    ) -> Option<TokenId> {
        let previous = {
            let variable = self
                .variables
                .get(variable)?;
            if variable.kind != VariableKind::Dictionary {
                return None;
            }
            *variable
                .values
                .get(item)?
        };

        let text = DictionaryItem {
            key: key.to_string(),
            value: value.map(str::to_string),
        }
        .text();
        let replacement = self.replace_token(previous, &text);

        let slot = self
            .variables
            .variables
            .get_mut(variable)?
            .values
            .get_mut(item)?;
        *slot = replacement;
        Some(replacement)
    }

    fn add_definition(&mut self, kind: DefinitionKind, name: &str) -> usize {
        let name = self.new_token(name, kind.name_tag());
        self.table_mut(kind)
            .add(Definition::new(kind, name))
    }

    pub fn add_test_case(&mut self, name: &str) -> usize {
        self.add_definition(DefinitionKind::TestCase, name)
    }

    pub fn add_keyword(&mut self, name: &str) -> usize {
        self.add_definition(DefinitionKind::Keyword, name)
    }

    /// Append a keyword call to a test case or keyword. Returns the index of
    /// the new row in the definition's body.
    pub fn add_row(
        &mut self,
        kind: DefinitionKind,
        definition: usize,
        action: &str,
        arguments: &[&str],
    ) -> Option<usize> {
        if definition
            >= self
                .table(kind)
                .len()
        {
            return None;
        }

        let action = self.new_token(action, kind.action_tag());
        let arguments = self.new_tokens(arguments, kind.argument_tag());

        self.table_mut(kind)
            .get_mut(definition)
            .map(|definition| definition.add_row(ExecutableRow::new(action, arguments)))
    }

    pub fn add_local_setting(
        &mut self,
        kind: DefinitionKind,
        definition: usize,
        setting: LocalSettingKind,
        values: &[&str],
    ) -> Option<usize> {
        if definition
            >= self
                .table(kind)
                .len()
        {
            return None;
        }

        let declaration = self.new_token(setting.name(), setting.tag(kind, Slot::Declaration));
        let mut local = LocalSetting::new(setting, declaration);
        for (i, value) in values
            .iter()
            .enumerate()
        {
            let slot = if i == 0 && setting.is_keyword_based() {
                Slot::Name
            } else {
                Slot::Value
            };
            let id = self.new_token(value, setting.tag(kind, slot));
            local
                .values
                .push(id);
        }

        self.table_mut(kind)
            .get_mut(definition)
            .map(|definition| definition.add_setting(local))
    }

    /// The texts of a list of tokens, for inspecting elements.
    pub fn texts(&self, ids: &[TokenId]) -> Vec<&str> {
        ids.iter()
            .map(|id| self.text(*id))
            .collect()
    }

    pub(crate) fn last_definition_mut(&mut self, kind: DefinitionKind) -> Option<&mut Definition> {
        self.table_mut(kind)
            .last_mut()
    }

    pub(crate) fn last_body_item_mut(&mut self, kind: DefinitionKind) -> Option<&mut BodyItem> {
        self.last_definition_mut(kind)?
            .last_item_mut()
    }
}
