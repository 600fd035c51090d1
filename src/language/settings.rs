//! Elements of the `*** Settings ***` table

use serde::Serialize;

use super::element::{move_down, move_up, Element, Slot};
use super::token::{TokenId, TokenType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SettingKind {
    Library,
    Resource,
    Variables,
    Documentation,
    Metadata,
    SuiteSetup,
    SuiteTeardown,
    TestSetup,
    TestTeardown,
    ForceTags,
    DefaultTags,
    TestTemplate,
    TestTimeout,
    Unknown,
}

impl SettingKind {
    pub const DECLARABLE: [SettingKind; 13] = [
        SettingKind::Library,
        SettingKind::Resource,
        SettingKind::Variables,
        SettingKind::Documentation,
        SettingKind::Metadata,
        SettingKind::SuiteSetup,
        SettingKind::SuiteTeardown,
        SettingKind::TestSetup,
        SettingKind::TestTeardown,
        SettingKind::ForceTags,
        SettingKind::DefaultTags,
        SettingKind::TestTemplate,
        SettingKind::TestTimeout,
    ];

    /// Canonical spelling of the declaration.
    pub fn name(self) -> &'static str {
        match self {
            SettingKind::Library => "Library",
            SettingKind::Resource => "Resource",
            SettingKind::Variables => "Variables",
            SettingKind::Documentation => "Documentation",
            SettingKind::Metadata => "Metadata",
            SettingKind::SuiteSetup => "Suite Setup",
            SettingKind::SuiteTeardown => "Suite Teardown",
            SettingKind::TestSetup => "Test Setup",
            SettingKind::TestTeardown => "Test Teardown",
            SettingKind::ForceTags => "Force Tags",
            SettingKind::DefaultTags => "Default Tags",
            SettingKind::TestTemplate => "Test Template",
            SettingKind::TestTimeout => "Test Timeout",
            SettingKind::Unknown => "unknown setting",
        }
    }

    /// Older spellings, deprecated since 3.0 but still accepted.
    pub fn deprecated_names(self) -> &'static [&'static str] {
        match self {
            SettingKind::Documentation => &["Document"],
            SettingKind::Metadata => &["Meta"],
            SettingKind::SuiteSetup => &["Suite Precondition"],
            SettingKind::SuiteTeardown => &["Suite Postcondition"],
            SettingKind::TestSetup => &["Test Precondition"],
            SettingKind::TestTeardown => &["Test Postcondition"],
            _ => &[],
        }
    }

    pub fn is_keyword_based(self) -> bool {
        matches!(
            self,
            SettingKind::SuiteSetup
                | SettingKind::SuiteTeardown
                | SettingKind::TestSetup
                | SettingKind::TestTeardown
                | SettingKind::TestTemplate
        )
    }

    pub fn is_import(self) -> bool {
        matches!(
            self,
            SettingKind::Library | SettingKind::Resource | SettingKind::Variables
        )
    }

    /// Where new elements of this kind go relative to existing ones when
    /// written out; lower comes first.
    pub fn priority(self) -> u8 {
        match self {
            SettingKind::Documentation => 1,
            SettingKind::SuiteSetup => 2,
            SettingKind::SuiteTeardown => 3,
            SettingKind::TestSetup => 4,
            SettingKind::TestTeardown => 5,
            SettingKind::ForceTags => 6,
            SettingKind::DefaultTags => 6,
            SettingKind::TestTemplate => 7,
            SettingKind::TestTimeout => 8,
            SettingKind::Metadata => 9,
            SettingKind::Library => 10,
            SettingKind::Resource => 10,
            SettingKind::Variables => 10,
            SettingKind::Unknown => 11,
        }
    }

    /// The tag a token filling the given slot of this setting receives.
    pub fn tag(self, slot: Slot) -> TokenType {
        use TokenType as T;

        match (self, slot) {
            (SettingKind::Library, Slot::Declaration) => T::SettingLibraryDeclaration,
            (SettingKind::Library, Slot::Name) => T::SettingLibraryName,
            (SettingKind::Library, Slot::Alias) => T::SettingLibraryAliasDeclaration,
            (SettingKind::Library, Slot::AliasValue) => T::SettingLibraryAlias,
            (SettingKind::Library, Slot::Unwanted) => T::UnwantedArgument,
            (SettingKind::Library, _) => T::SettingLibraryArgument,

            (SettingKind::Resource, Slot::Declaration) => T::SettingResourceDeclaration,
            (SettingKind::Resource, Slot::Name) => T::SettingResourceFileName,
            (SettingKind::Resource, _) => T::SettingResourceUnwantedArgument,

            (SettingKind::Variables, Slot::Declaration) => T::SettingVariablesDeclaration,
            (SettingKind::Variables, Slot::Name) => T::SettingVariablesFileName,
            (SettingKind::Variables, Slot::Unwanted) => T::UnwantedArgument,
            (SettingKind::Variables, _) => T::SettingVariablesArgument,

            (SettingKind::Documentation, Slot::Declaration) => T::SettingDocumentation,
            (SettingKind::Documentation, _) => T::SettingDocumentationText,

            (SettingKind::Metadata, Slot::Declaration) => T::SettingMetadataDeclaration,
            (SettingKind::Metadata, Slot::Name) => T::SettingMetadataKey,
            (SettingKind::Metadata, _) => T::SettingMetadataValue,

            (SettingKind::SuiteSetup, Slot::Declaration) => T::SettingSuiteSetupDeclaration,
            (SettingKind::SuiteSetup, Slot::Name) => T::SettingSuiteSetupKeywordName,
            (SettingKind::SuiteSetup, Slot::Unwanted) => T::UnwantedArgument,
            (SettingKind::SuiteSetup, _) => T::SettingSuiteSetupKeywordArgument,

            (SettingKind::SuiteTeardown, Slot::Declaration) => T::SettingSuiteTeardownDeclaration,
            (SettingKind::SuiteTeardown, Slot::Name) => T::SettingSuiteTeardownKeywordName,
            (SettingKind::SuiteTeardown, Slot::Unwanted) => T::UnwantedArgument,
            (SettingKind::SuiteTeardown, _) => T::SettingSuiteTeardownKeywordArgument,

            (SettingKind::TestSetup, Slot::Declaration) => T::SettingTestSetupDeclaration,
            (SettingKind::TestSetup, Slot::Name) => T::SettingTestSetupKeywordName,
            (SettingKind::TestSetup, Slot::Unwanted) => T::UnwantedArgument,
            (SettingKind::TestSetup, _) => T::SettingTestSetupKeywordArgument,

            (SettingKind::TestTeardown, Slot::Declaration) => T::SettingTestTeardownDeclaration,
            (SettingKind::TestTeardown, Slot::Name) => T::SettingTestTeardownKeywordName,
            (SettingKind::TestTeardown, Slot::Unwanted) => T::UnwantedArgument,
            (SettingKind::TestTeardown, _) => T::SettingTestTeardownKeywordArgument,

            (SettingKind::TestTemplate, Slot::Declaration) => T::SettingTestTemplateDeclaration,
            (SettingKind::TestTemplate, Slot::Name) => T::SettingTestTemplateKeywordName,
            (SettingKind::TestTemplate, _) => T::SettingTestTemplateKeywordUnwantedArgument,

            (SettingKind::TestTimeout, Slot::Declaration) => T::SettingTestTimeoutDeclaration,
            (SettingKind::TestTimeout, Slot::Value) => T::SettingTestTimeoutValue,
            (SettingKind::TestTimeout, Slot::Unwanted) => T::UnwantedArgument,
            (SettingKind::TestTimeout, _) => T::SettingTestTimeoutMessage,

            (SettingKind::ForceTags, Slot::Declaration) => T::SettingForceTagsDeclaration,
            (SettingKind::ForceTags, _) => T::SettingForceTagsTagName,

            (SettingKind::DefaultTags, Slot::Declaration) => T::SettingDefaultTagsDeclaration,
            (SettingKind::DefaultTags, _) => T::SettingDefaultTagsTagName,

            (SettingKind::Unknown, Slot::Declaration) => T::SettingUnknownDeclaration,
            (SettingKind::Unknown, _) => T::SettingUnknownArguments,
        }
    }
}

fn collect(front: &[Option<TokenId>], lists: &[&Vec<TokenId>]) -> Vec<TokenId> {
    let mut tokens: Vec<TokenId> = front
        .iter()
        .flatten()
        .copied()
        .collect();
    for list in lists {
        tokens.extend_from_slice(list);
    }
    tokens
}

/// `Library`, `Resource` and `Variables` imports. Only libraries take an
/// alias (`WITH NAME`); only Resource rejects arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub kind: SettingKind,
    pub declaration: TokenId,
    pub path: Option<TokenId>,
    pub arguments: Vec<TokenId>,
    pub alias: Option<TokenId>,
    pub alias_name: Option<TokenId>,
    pub unexpected: Vec<TokenId>,
    pub comment: Vec<TokenId>,
}

impl Import {
    pub fn new(kind: SettingKind, declaration: TokenId) -> Import {
        debug_assert!(kind.is_import());
        Import {
            kind,
            declaration,
            path: None,
            arguments: Vec::new(),
            alias: None,
            alias_name: None,
            unexpected: Vec::new(),
            comment: Vec::new(),
        }
    }
}

impl Element for Import {
    fn tokens(&self) -> Vec<TokenId> {
        let mut tokens = collect(&[Some(self.declaration), self.path], &[&self.arguments]);
        tokens.extend(self.alias);
        tokens.extend(self.alias_name);
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

/// Settings that name a keyword to run: Suite/Test Setup and Teardown, and
/// Test Template (which takes no arguments).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSetting {
    pub kind: SettingKind,
    pub declaration: TokenId,
    pub keyword: Option<TokenId>,
    pub arguments: Vec<TokenId>,
    pub unexpected: Vec<TokenId>,
    pub comment: Vec<TokenId>,
}

impl KeywordSetting {
    pub fn new(kind: SettingKind, declaration: TokenId) -> KeywordSetting {
        debug_assert!(kind.is_keyword_based());
        KeywordSetting {
            kind,
            declaration,
            keyword: None,
            arguments: Vec::new(),
            unexpected: Vec::new(),
            comment: Vec::new(),
        }
    }

    pub fn has_keyword_name(&self) -> bool {
        self.keyword
            .is_some()
    }
}

impl Element for KeywordSetting {
    fn tokens(&self) -> Vec<TokenId> {
        collect(
            &[Some(self.declaration), self.keyword],
            &[&self.arguments, &self.unexpected, &self.comment],
        )
    }

    fn comment(&self) -> &[TokenId] {
        &self.comment
    }

    fn comment_mut(&mut self) -> &mut Vec<TokenId> {
        &mut self.comment
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagsSetting {
    pub kind: SettingKind,
    pub declaration: TokenId,
    pub tags: Vec<TokenId>,
    pub comment: Vec<TokenId>,
}

impl TagsSetting {
    pub fn new(kind: SettingKind, declaration: TokenId) -> TagsSetting {
        TagsSetting {
            kind,
            declaration,
            tags: Vec::new(),
            comment: Vec::new(),
        }
    }
}

impl Element for TagsSetting {
    fn tokens(&self) -> Vec<TokenId> {
        collect(&[Some(self.declaration)], &[&self.tags, &self.comment])
    }

    fn comment(&self) -> &[TokenId] {
        &self.comment
    }

    fn comment_mut(&mut self) -> &mut Vec<TokenId> {
        &mut self.comment
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Documentation {
    pub declaration: TokenId,
    pub text: Vec<TokenId>,
    pub comment: Vec<TokenId>,
}

impl Documentation {
    pub fn new(declaration: TokenId) -> Documentation {
        Documentation {
            declaration,
            text: Vec::new(),
            comment: Vec::new(),
        }
    }
}

impl Element for Documentation {
    fn tokens(&self) -> Vec<TokenId> {
        collect(&[Some(self.declaration)], &[&self.text, &self.comment])
    }

    fn comment(&self) -> &[TokenId] {
        &self.comment
    }

    fn comment_mut(&mut self) -> &mut Vec<TokenId> {
        &mut self.comment
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub declaration: TokenId,
    pub key: Option<TokenId>,
    pub values: Vec<TokenId>,
    pub comment: Vec<TokenId>,
}

impl Metadata {
    pub fn new(declaration: TokenId) -> Metadata {
        Metadata {
            declaration,
            key: None,
            values: Vec::new(),
            comment: Vec::new(),
        }
    }
}

impl Element for Metadata {
    fn tokens(&self) -> Vec<TokenId> {
        collect(
            &[Some(self.declaration), self.key],
            &[&self.values, &self.comment],
        )
    }

    fn comment(&self) -> &[TokenId] {
        &self.comment
    }

    fn comment_mut(&mut self) -> &mut Vec<TokenId> {
        &mut self.comment
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeout {
    pub declaration: TokenId,
    pub value: Option<TokenId>,
    pub message: Vec<TokenId>,
    pub comment: Vec<TokenId>,
}

impl Timeout {
    pub fn new(declaration: TokenId) -> Timeout {
        Timeout {
            declaration,
            value: None,
            message: Vec::new(),
            comment: Vec::new(),
        }
    }

    pub fn has_value(&self) -> bool {
        self.value
            .is_some()
    }
}

impl Element for Timeout {
    fn tokens(&self) -> Vec<TokenId> {
        collect(
            &[Some(self.declaration), self.value],
            &[&self.message, &self.comment],
        )
    }

    fn comment(&self) -> &[TokenId] {
        &self.comment
    }

    fn comment_mut(&mut self) -> &mut Vec<TokenId> {
        &mut self.comment
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSetting {
    pub declaration: TokenId,
    pub arguments: Vec<TokenId>,
    pub comment: Vec<TokenId>,
}

impl UnknownSetting {
    pub fn new(declaration: TokenId) -> UnknownSetting {
        UnknownSetting {
            declaration,
            arguments: Vec::new(),
            comment: Vec::new(),
        }
    }
}

impl Element for UnknownSetting {
    fn tokens(&self) -> Vec<TokenId> {
        collect(&[Some(self.declaration)], &[&self.arguments, &self.comment])
    }

    fn comment(&self) -> &[TokenId] {
        &self.comment
    }

    fn comment_mut(&mut self) -> &mut Vec<TokenId> {
        &mut self.comment
    }
}

/// Everything declared in Settings tables. Several declarations of the same
/// kind are allowed and kept apart; only the last one of each list is open
/// to tokens continuing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingTable {
    pub imports: Vec<Import>,
    pub documentation: Vec<Documentation>,
    pub metadata: Vec<Metadata>,
    pub suite_setups: Vec<KeywordSetting>,
    pub suite_teardowns: Vec<KeywordSetting>,
    pub test_setups: Vec<KeywordSetting>,
    pub test_teardowns: Vec<KeywordSetting>,
    pub test_templates: Vec<KeywordSetting>,
    pub force_tags: Vec<TagsSetting>,
    pub default_tags: Vec<TagsSetting>,
    pub test_timeouts: Vec<Timeout>,
    pub unknown: Vec<UnknownSetting>,
}

impl SettingTable {
    pub fn is_empty(&self) -> bool {
        self.lists()
            .iter()
            .all(|list| list.is_empty())
    }

    pub fn keyword_settings(&self, kind: SettingKind) -> Option<&Vec<KeywordSetting>> {
        match kind {
            SettingKind::SuiteSetup => Some(&self.suite_setups),
            SettingKind::SuiteTeardown => Some(&self.suite_teardowns),
            SettingKind::TestSetup => Some(&self.test_setups),
            SettingKind::TestTeardown => Some(&self.test_teardowns),
            SettingKind::TestTemplate => Some(&self.test_templates),
            _ => None,
        }
    }

    pub fn keyword_settings_mut(&mut self, kind: SettingKind) -> Option<&mut Vec<KeywordSetting>> {
        match kind {
            SettingKind::SuiteSetup => Some(&mut self.suite_setups),
            SettingKind::SuiteTeardown => Some(&mut self.suite_teardowns),
            SettingKind::TestSetup => Some(&mut self.test_setups),
            SettingKind::TestTeardown => Some(&mut self.test_teardowns),
            SettingKind::TestTemplate => Some(&mut self.test_templates),
            _ => None,
        }
    }

    pub fn tags_mut(&mut self, kind: SettingKind) -> Option<&mut Vec<TagsSetting>> {
        match kind {
            SettingKind::ForceTags => Some(&mut self.force_tags),
            SettingKind::DefaultTags => Some(&mut self.default_tags),
            _ => None,
        }
    }

    /// The most recent declaration of a keyword based setting, the only one
    /// still accepting a keyword name or arguments.
    pub fn last_keyword_setting(&self, kind: SettingKind) -> Option<&KeywordSetting> {
        self.keyword_settings(kind)?
            .last()
    }

    pub fn last_import(&self) -> Option<&Import> {
        self.imports
            .last()
    }

    /// The most recent element of the given kind, as a generic element.
    pub fn last_mut(&mut self, kind: SettingKind) -> Option<&mut dyn Element> {
        match kind {
            SettingKind::Library | SettingKind::Resource | SettingKind::Variables => self
                .imports
                .last_mut()
                .map(|e| e as &mut dyn Element),
            SettingKind::Documentation => self
                .documentation
                .last_mut()
                .map(|e| e as &mut dyn Element),
            SettingKind::Metadata => self
                .metadata
                .last_mut()
                .map(|e| e as &mut dyn Element),
            SettingKind::ForceTags | SettingKind::DefaultTags => self
                .tags_mut(kind)?
                .last_mut()
                .map(|e| e as &mut dyn Element),
            SettingKind::TestTimeout => self
                .test_timeouts
                .last_mut()
                .map(|e| e as &mut dyn Element),
            SettingKind::Unknown => self
                .unknown
                .last_mut()
                .map(|e| e as &mut dyn Element),
            _ => self
                .keyword_settings_mut(kind)?
                .last_mut()
                .map(|e| e as &mut dyn Element),
        }
    }

    /// Every list of the table, each in its own order, with the kind of each
    /// element alongside it.
    pub fn lists(&self) -> Vec<Vec<(SettingKind, &dyn Element)>> {
        fn list<T: Element>(kind: SettingKind, items: &[T]) -> Vec<(SettingKind, &dyn Element)> {
            items
                .iter()
                .map(|item| (kind, item as &dyn Element))
                .collect()
        }

        vec![
            self.imports
                .iter()
                .map(|import| (import.kind, import as &dyn Element))
                .collect(),
            list(SettingKind::Documentation, &self.documentation),
            list(SettingKind::Metadata, &self.metadata),
            list(SettingKind::SuiteSetup, &self.suite_setups),
            list(SettingKind::SuiteTeardown, &self.suite_teardowns),
            list(SettingKind::TestSetup, &self.test_setups),
            list(SettingKind::TestTeardown, &self.test_teardowns),
            list(SettingKind::TestTemplate, &self.test_templates),
            list(SettingKind::ForceTags, &self.force_tags),
            list(SettingKind::DefaultTags, &self.default_tags),
            list(SettingKind::TestTimeout, &self.test_timeouts),
            list(SettingKind::Unknown, &self.unknown),
        ]
    }

    pub fn add_import(&mut self, import: Import) -> usize {
        self.imports
            .push(import);
        self.imports
            .len()
            - 1
    }

    pub fn remove_import(&mut self, index: usize) -> Option<Import> {
        if index < self
            .imports
            .len()
        {
            Some(
                self.imports
                    .remove(index),
            )
        } else {
            None
        }
    }

    pub fn move_import_up(&mut self, index: usize) -> bool {
        move_up(&mut self.imports, index)
    }

    pub fn move_import_down(&mut self, index: usize) -> bool {
        move_down(&mut self.imports, index)
    }

    pub fn add_metadata(&mut self, metadata: Metadata) -> usize {
        self.metadata
            .push(metadata);
        self.metadata
            .len()
            - 1
    }

    pub fn remove_metadata(&mut self, index: usize) -> Option<Metadata> {
        if index < self
            .metadata
            .len()
        {
            Some(
                self.metadata
                    .remove(index),
            )
        } else {
            None
        }
    }

    pub fn move_metadata_up(&mut self, index: usize) -> bool {
        move_up(&mut self.metadata, index)
    }

    pub fn move_metadata_down(&mut self, index: usize) -> bool {
        move_down(&mut self.metadata, index)
    }

    pub fn add_keyword_setting(&mut self, setting: KeywordSetting) {
        debug_assert!(setting
            .kind
            .is_keyword_based());
        if let Some(list) = self.keyword_settings_mut(setting.kind) {
            list.push(setting);
        }
    }

    pub fn remove_keyword_setting(
        &mut self,
        kind: SettingKind,
        index: usize,
    ) -> Option<KeywordSetting> {
        let list = self.keyword_settings_mut(kind)?;
        if index < list.len() {
            Some(list.remove(index))
        } else {
            None
        }
    }

    pub fn add_tags(&mut self, setting: TagsSetting) {
        debug_assert!(matches!(
            setting.kind,
            SettingKind::ForceTags | SettingKind::DefaultTags
        ));
        if let Some(list) = self.tags_mut(setting.kind) {
            list.push(setting);
        }
    }

    pub fn add_documentation(&mut self, documentation: Documentation) {
        self.documentation
            .push(documentation);
    }

    pub fn add_timeout(&mut self, timeout: Timeout) {
        self.test_timeouts
            .push(timeout);
    }

    pub fn add_unknown(&mut self, setting: UnknownSetting) {
        self.unknown
            .push(setting);
    }
}

#[cfg(test)]
mod check {
    use super::*;

    fn id(n: usize) -> TokenId {
        TokenId(n)
    }

    #[test]
    fn keyword_setting_tokens_in_order() {
        let mut setting = KeywordSetting::new(SettingKind::TestSetup, id(0));
        assert!(!setting.has_keyword_name());

        setting.keyword = Some(id(1));
        setting
            .arguments
            .push(id(2));
        setting
            .comment
            .push(id(3));

        assert!(setting.has_keyword_name());
        assert_eq!(setting.tokens(), vec![id(0), id(1), id(2), id(3)]);
    }

    #[test]
    fn only_last_declaration_is_queried() {
        let mut table = SettingTable::default();

        let mut first = KeywordSetting::new(SettingKind::TestSetup, id(0));
        first.keyword = Some(id(1));
        table.add_keyword_setting(first);

        let second = KeywordSetting::new(SettingKind::TestSetup, id(2));
        table.add_keyword_setting(second);

        let last = table
            .last_keyword_setting(SettingKind::TestSetup)
            .unwrap();
        assert!(!last.has_keyword_name());
        assert_eq!(table.test_setups.len(), 2);
        assert!(table
            .last_keyword_setting(SettingKind::Library)
            .is_none());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn keyword_setting_of_wrong_kind_is_refused() {
        let mut table = SettingTable::default();
        let mut setting = KeywordSetting::new(SettingKind::TestSetup, id(0));
        setting.kind = SettingKind::Library;
        table.add_keyword_setting(setting);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn tags_of_wrong_kind_are_refused() {
        let mut table = SettingTable::default();
        table.add_tags(TagsSetting::new(SettingKind::Metadata, id(0)));
    }

    #[test]
    fn imports_reorder() {
        let mut table = SettingTable::default();
        table.add_import(Import::new(SettingKind::Library, id(0)));
        table.add_import(Import::new(SettingKind::Resource, id(1)));

        assert!(table.move_import_up(1));
        assert_eq!(table.imports[0].kind, SettingKind::Resource);
        assert!(!table.move_import_down(1));

        let removed = table
            .remove_import(0)
            .unwrap();
        assert_eq!(removed.declaration, id(1));
        assert!(table
            .remove_import(5)
            .is_none());
    }

    #[test]
    fn tags_for_slots() {
        assert_eq!(
            SettingKind::TestSetup.tag(Slot::Name),
            TokenType::SettingTestSetupKeywordName
        );
        assert_eq!(
            SettingKind::TestSetup.tag(Slot::Argument),
            TokenType::SettingTestSetupKeywordArgument
        );
        assert_eq!(
            SettingKind::TestTemplate.tag(Slot::Unwanted),
            TokenType::SettingTestTemplateKeywordUnwantedArgument
        );
        assert_eq!(
            SettingKind::Library.tag(Slot::AliasValue),
            TokenType::SettingLibraryAlias
        );
    }
}
