//! Mappers for the `*** Settings ***` table.

use crate::language::{
    Documentation, Import, KeywordSetting, Metadata, Problem, RobotFile, RobotVersion,
    SettingKind, Slot, TagsSetting, Timeout, Token, TokenId, UnknownSetting,
};
use crate::parsing::recognizers;
use crate::parsing::scope::{ParsingStack, ParsingState};

use super::comments::Comment;
use super::{lost, Mapper, StaticMapper, Versions, DEPRECATION};

/// Keyword names on continuation lines are only accepted from 3.0 on.
const CONTINUED_KEYWORD_NAMES: RobotVersion = RobotVersion::new(3, 0);

/// The first cell of a line naming a known setting.
pub(crate) struct Declaration(SettingKind);

impl Mapper for Declaration {
    fn role(&self) -> &'static str {
        self.0
            .name()
    }

    fn can_map(&self, stack: &ParsingStack, _file: &RobotFile, token: &Token) -> bool {
        stack.current() == Some(ParsingState::SettingTable)
            && recognizers::setting_declaration(token.text()).map(|(kind, _)| kind) == Some(self.0)
    }

    fn map(&self, stack: &mut ParsingStack, file: &mut RobotFile, id: TokenId) {
        let kind = self.0;
        file.token_mut(id)
            .tag(kind.tag(Slot::Declaration));

        let deprecated = recognizers::setting_declaration(file.text(id))
            .map_or(false, |(_, deprecated)| deprecated);
        if deprecated && file
            .version
            .is_newer_or_equal(&DEPRECATION)
        {
            let problem = Problem::DeprecatedDeclaration {
                found: file
                    .text(id)
                    .to_string(),
                replacement: kind
                    .name()
                    .to_string(),
            };
            let position = file
                .token(id)
                .position();
            file.report(problem, position);
        }

        let table = &mut file.settings;
        match kind {
            SettingKind::Library | SettingKind::Resource | SettingKind::Variables => {
                table.add_import(Import::new(kind, id));
            }
            SettingKind::Documentation => table.add_documentation(Documentation::new(id)),
            SettingKind::Metadata => {
                table.add_metadata(Metadata::new(id));
            }
            SettingKind::ForceTags | SettingKind::DefaultTags => {
                table.add_tags(TagsSetting::new(kind, id))
            }
            SettingKind::TestTimeout => table.add_timeout(Timeout::new(id)),
            SettingKind::Unknown => table.add_unknown(UnknownSetting::new(id)),
            _ => table.add_keyword_setting(KeywordSetting::new(kind, id)),
        }

        stack.push(ParsingState::Setting(kind, Slot::Declaration));
    }
}

/// The first cell of a line naming no setting at all.
pub(crate) struct UnknownDeclaration;

impl Mapper for UnknownDeclaration {
    fn role(&self) -> &'static str {
        "unknown setting"
    }

    fn can_map(&self, stack: &ParsingStack, _file: &RobotFile, _token: &Token) -> bool {
        stack.current() == Some(ParsingState::SettingTable)
    }

    fn map(&self, stack: &mut ParsingStack, file: &mut RobotFile, id: TokenId) {
        file.token_mut(id)
            .tag(SettingKind::Unknown.tag(Slot::Declaration));
        file.settings
            .add_unknown(UnknownSetting::new(id));

        let problem = Problem::UnknownSetting(
            file.text(id)
                .to_string(),
        );
        let position = file
            .token(id)
            .position();
        file.report(problem, position);

        stack.push(ParsingState::Setting(SettingKind::Unknown, Slot::Declaration));
    }
}

/// Any cell after the declaration. Which setting it belongs to and which
/// slot it follows pick the mapper; the slot it fills decides its tag and
/// where in the element it goes.
pub(crate) struct Value {
    role: &'static str,
    kind: SettingKind,
    after: &'static [Slot],
    slot: Slot,
    accepts: fn(SettingKind, &RobotFile, &Token) -> bool,
    versions: Versions,
}

fn anything(_kind: SettingKind, _file: &RobotFile, _token: &Token) -> bool {
    true
}

fn alias_marker(_kind: SettingKind, _file: &RobotFile, token: &Token) -> bool {
    recognizers::is_alias_marker(token.text())
}

fn on_declaration_line(kind: SettingKind, file: &RobotFile, token: &Token) -> bool {
    let declared = file
        .settings
        .last_keyword_setting(kind)
        .and_then(|setting| {
            file.token(setting.declaration)
                .position()
        });

    match (declared, token.position()) {
        (Some(declared), Some(here)) => declared.line == here.line,
        _ => true,
    }
}

fn on_continuation_line(kind: SettingKind, file: &RobotFile, token: &Token) -> bool {
    !on_declaration_line(kind, file, token)
}

/// Put a token into the slot of the most recently declared setting of a
/// kind. False if there is no such setting.
fn attach(file: &mut RobotFile, kind: SettingKind, slot: Slot, id: TokenId) -> bool {
    let table = &mut file.settings;

    match kind {
        SettingKind::Library | SettingKind::Resource | SettingKind::Variables => {
            let import = match table
                .imports
                .last_mut()
            {
                Some(import) => import,
                None => return false,
            };
            match slot {
                Slot::Name => import.path = Some(id),
                Slot::Alias => import.alias = Some(id),
                Slot::AliasValue => import.alias_name = Some(id),
                Slot::Unwanted => import
                    .unexpected
                    .push(id),
                _ => import
                    .arguments
                    .push(id),
            }
        }
        SettingKind::Documentation => match table
            .documentation
            .last_mut()
        {
            Some(documentation) => documentation
                .text
                .push(id),
            None => return false,
        },
        SettingKind::Metadata => {
            let metadata = match table
                .metadata
                .last_mut()
            {
                Some(metadata) => metadata,
                None => return false,
            };
            match slot {
                Slot::Name => metadata.key = Some(id),
                _ => metadata
                    .values
                    .push(id),
            }
        }
        SettingKind::ForceTags | SettingKind::DefaultTags => match table
            .tags_mut(kind)
            .and_then(|list| list.last_mut())
        {
            Some(setting) => setting
                .tags
                .push(id),
            None => return false,
        },
        SettingKind::TestTimeout => {
            let timeout = match table
                .test_timeouts
                .last_mut()
            {
                Some(timeout) => timeout,
                None => return false,
            };
            match slot {
                Slot::Value => timeout.value = Some(id),
                _ => timeout
                    .message
                    .push(id),
            }
        }
        SettingKind::Unknown => match table
            .unknown
            .last_mut()
        {
            Some(setting) => setting
                .arguments
                .push(id),
            None => return false,
        },
        _ => {
            let setting = match table
                .keyword_settings_mut(kind)
                .and_then(|list| list.last_mut())
            {
                Some(setting) => setting,
                None => return false,
            };
            match slot {
                Slot::Name => setting.keyword = Some(id),
                Slot::Unwanted => setting
                    .unexpected
                    .push(id),
                _ => setting
                    .arguments
                    .push(id),
            }
        }
    }

    true
}

impl Mapper for Value {
    fn applicable(&self, version: &RobotVersion) -> bool {
        self.versions
            .contain(version)
    }

    fn role(&self) -> &'static str {
        self.role
    }

    fn can_map(&self, stack: &ParsingStack, file: &RobotFile, token: &Token) -> bool {
        match stack.current() {
            Some(ParsingState::Setting(kind, slot)) => {
                kind == self.kind
                    && self
                        .after
                        .contains(&slot)
                    && (self.accepts)(kind, file, token)
            }
            _ => false,
        }
    }

    fn map(&self, stack: &mut ParsingStack, file: &mut RobotFile, id: TokenId) {
        file.token_mut(id)
            .tag(
                self.kind
                    .tag(self.slot),
            );

        if !attach(file, self.kind, self.slot, id) {
            lost(file, id, self.role);
            return;
        }

        if self.slot == Slot::Unwanted {
            let problem = Problem::UnwantedArgument {
                setting: self
                    .kind
                    .name()
                    .to_string(),
                text: file
                    .text(id)
                    .to_string(),
            };
            let position = file
                .token(id)
                .position();
            file.report(problem, position);
        }

        stack.push(ParsingState::Setting(self.kind, self.slot));
    }
}

const fn value(
    role: &'static str,
    kind: SettingKind,
    after: &'static [Slot],
    slot: Slot,
) -> Value {
    Value {
        role,
        kind,
        after,
        slot,
        accepts: anything,
        versions: Versions::All,
    }
}

const DECLARED: &[Slot] = &[Slot::Declaration];
const NAMED: &[Slot] = &[Slot::Name, Slot::Argument];
const VALUED: &[Slot] = &[Slot::Declaration, Slot::Value];

/// Keyword name of a Suite or Test Setup or Teardown, in the current form:
/// it may be given on a continuation line.
const fn keyword_name(role: &'static str, kind: SettingKind) -> Value {
    Value {
        role,
        kind,
        after: DECLARED,
        slot: Slot::Name,
        accepts: anything,
        versions: Versions::From(CONTINUED_KEYWORD_NAMES),
    }
}

/// Keyword name in the legacy form: only on the declaration's own line.
const fn legacy_keyword_name(role: &'static str, kind: SettingKind) -> Value {
    Value {
        role,
        kind,
        after: DECLARED,
        slot: Slot::Name,
        accepts: on_declaration_line,
        versions: Versions::Before(CONTINUED_KEYWORD_NAMES),
    }
}

/// With the legacy form, what a continuation line offers while the name is
/// still missing is not taken as the name.
const fn legacy_unwanted(role: &'static str, kind: SettingKind) -> Value {
    Value {
        role,
        kind,
        after: &[Slot::Declaration, Slot::Unwanted],
        slot: Slot::Unwanted,
        accepts: on_continuation_line,
        versions: Versions::Before(CONTINUED_KEYWORD_NAMES),
    }
}

pub(crate) static MAPPERS: &[StaticMapper] = &[
    &Comment,
    &Declaration(SettingKind::Library),
    &Declaration(SettingKind::Resource),
    &Declaration(SettingKind::Variables),
    &Declaration(SettingKind::Documentation),
    &Declaration(SettingKind::Metadata),
    &Declaration(SettingKind::SuiteSetup),
    &Declaration(SettingKind::SuiteTeardown),
    &Declaration(SettingKind::TestSetup),
    &Declaration(SettingKind::TestTeardown),
    &Declaration(SettingKind::ForceTags),
    &Declaration(SettingKind::DefaultTags),
    &Declaration(SettingKind::TestTemplate),
    &Declaration(SettingKind::TestTimeout),
    &UnknownDeclaration,
    // imports
    &value("library name", SettingKind::Library, DECLARED, Slot::Name),
    &Value {
        role: "library alias declaration",
        kind: SettingKind::Library,
        after: NAMED,
        slot: Slot::Alias,
        accepts: alias_marker,
        versions: Versions::All,
    },
    &value("library alias", SettingKind::Library, &[Slot::Alias], Slot::AliasValue),
    &value("library argument", SettingKind::Library, NAMED, Slot::Argument),
    &value(
        "library unwanted argument",
        SettingKind::Library,
        &[Slot::AliasValue, Slot::Unwanted],
        Slot::Unwanted,
    ),
    &value("resource file name", SettingKind::Resource, DECLARED, Slot::Name),
    &value(
        "resource unwanted argument",
        SettingKind::Resource,
        &[Slot::Name, Slot::Unwanted],
        Slot::Unwanted,
    ),
    &value("variables file name", SettingKind::Variables, DECLARED, Slot::Name),
    &value("variables argument", SettingKind::Variables, NAMED, Slot::Argument),
    // documentation and metadata
    &value(
        "documentation text",
        SettingKind::Documentation,
        VALUED,
        Slot::Value,
    ),
    &value("metadata key", SettingKind::Metadata, DECLARED, Slot::Name),
    &value(
        "metadata value",
        SettingKind::Metadata,
        &[Slot::Name, Slot::Value],
        Slot::Value,
    ),
    // keyword based
    &keyword_name("suite setup keyword name", SettingKind::SuiteSetup),
    &keyword_name("suite teardown keyword name", SettingKind::SuiteTeardown),
    &keyword_name("test setup keyword name", SettingKind::TestSetup),
    &keyword_name("test teardown keyword name", SettingKind::TestTeardown),
    &legacy_keyword_name("suite setup keyword name", SettingKind::SuiteSetup),
    &legacy_keyword_name("suite teardown keyword name", SettingKind::SuiteTeardown),
    &legacy_keyword_name("test setup keyword name", SettingKind::TestSetup),
    &legacy_keyword_name("test teardown keyword name", SettingKind::TestTeardown),
    &legacy_unwanted("suite setup unwanted argument", SettingKind::SuiteSetup),
    &legacy_unwanted("suite teardown unwanted argument", SettingKind::SuiteTeardown),
    &legacy_unwanted("test setup unwanted argument", SettingKind::TestSetup),
    &legacy_unwanted("test teardown unwanted argument", SettingKind::TestTeardown),
    &value(
        "suite setup keyword argument",
        SettingKind::SuiteSetup,
        NAMED,
        Slot::Argument,
    ),
    &value(
        "suite teardown keyword argument",
        SettingKind::SuiteTeardown,
        NAMED,
        Slot::Argument,
    ),
    &value(
        "test setup keyword argument",
        SettingKind::TestSetup,
        NAMED,
        Slot::Argument,
    ),
    &value(
        "test teardown keyword argument",
        SettingKind::TestTeardown,
        NAMED,
        Slot::Argument,
    ),
    &value(
        "test template keyword name",
        SettingKind::TestTemplate,
        DECLARED,
        Slot::Name,
    ),
    &value(
        "test template unwanted argument",
        SettingKind::TestTemplate,
        &[Slot::Name, Slot::Unwanted],
        Slot::Unwanted,
    ),
    // tags, timeout, anything else
    &value("force tags tag name", SettingKind::ForceTags, VALUED, Slot::Value),
    &value(
        "default tags tag name",
        SettingKind::DefaultTags,
        VALUED,
        Slot::Value,
    ),
    &value("test timeout value", SettingKind::TestTimeout, DECLARED, Slot::Value),
    &value(
        "test timeout message",
        SettingKind::TestTimeout,
        &[Slot::Value, Slot::Argument],
        Slot::Argument,
    ),
    &value(
        "unknown setting argument",
        SettingKind::Unknown,
        &[Slot::Declaration, Slot::Argument],
        Slot::Argument,
    ),
];
