//! Mappers for test case, task and keyword tables. The two kinds of table
//! share everything but the settings they allow and the tags they give.

use crate::language::{
    BodyItem, Definition, DefinitionKind, ExecutableRow, LocalSetting, LocalSettingKind, Problem,
    RobotFile, RobotVersion, Slot, Token, TokenId, TokenType,
};
use crate::parsing::recognizers;
use crate::parsing::scope::{ParsingStack, ParsingState};

use super::comments::Comment;
use super::{declaration_state, lost, Mapper, StaticMapper, DEPRECATION};

use DefinitionKind::{Keyword, TestCase};
use LocalSettingKind as L;

/// Version from which a `FOR` loop can be closed with `END`.
const FOR_WITH_END: RobotVersion = RobotVersion::new(3, 1);

fn table_state(kind: DefinitionKind) -> ParsingState {
    match kind {
        DefinitionKind::TestCase => ParsingState::TestCaseTable,
        DefinitionKind::Keyword => ParsingState::KeywordTable,
    }
}

fn at_body_cell(stack: &ParsingStack, kind: DefinitionKind) -> bool {
    stack.current() == Some(declaration_state(kind))
}

/// Whether the definition being read has a `FOR` loop not yet closed by
/// `END`.
fn in_open_loop(file: &RobotFile, kind: DefinitionKind) -> bool {
    let definition = match file
        .table(kind)
        .definitions
        .last()
    {
        Some(definition) => definition,
        None => return false,
    };

    definition
        .body
        .iter()
        .rev()
        .filter_map(|item| match item {
            BodyItem::Row(row) => row.action,
            _ => None,
        })
        .map(|action| file.token(action))
        .find(|token| {
            token.has_type(TokenType::ForToken) || token.has_type(TokenType::ForEndToken)
        })
        .map_or(false, |token| token.has_type(TokenType::ForToken))
}

/// A cell in the first column: the name of a new test case or keyword.
pub(crate) struct Name(DefinitionKind);

impl Mapper for Name {
    fn role(&self) -> &'static str {
        "name"
    }

    fn can_map(&self, stack: &ParsingStack, _file: &RobotFile, _token: &Token) -> bool {
        stack.current() == Some(table_state(self.0))
    }

    fn map(&self, stack: &mut ParsingStack, file: &mut RobotFile, id: TokenId) {
        let kind = self.0;
        file.token_mut(id)
            .tag(kind.name_tag());
        file.table_mut(kind)
            .add(Definition::new(kind, id));

        stack.push(declaration_state(kind));
    }
}

pub(crate) struct LocalDeclaration(DefinitionKind, LocalSettingKind);

impl Mapper for LocalDeclaration {
    fn role(&self) -> &'static str {
        self.1
            .name()
    }

    fn can_map(&self, stack: &ParsingStack, _file: &RobotFile, token: &Token) -> bool {
        at_body_cell(stack, self.0)
            && recognizers::local_setting(token.text()).map(|(kind, _)| kind) == Some(self.1)
    }

    fn map(&self, stack: &mut ParsingStack, file: &mut RobotFile, id: TokenId) {
        let LocalDeclaration(definition, kind) = *self;

        file.token_mut(id)
            .tag(kind.tag(definition, Slot::Declaration));

        let deprecated = recognizers::local_setting(file.text(id))
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

        match file.last_definition_mut(definition) {
            Some(owner) => owner
                .body
                .push(BodyItem::Setting(LocalSetting::new(kind, id))),
            None => {
                lost(file, id, self.role());
                return;
            }
        }

        stack.push(ParsingState::LocalSetting(kind, Slot::Declaration));
    }
}

/// A `[Something]` cell that is no setting this table allows.
pub(crate) struct UnknownLocalDeclaration(DefinitionKind);

impl Mapper for UnknownLocalDeclaration {
    fn role(&self) -> &'static str {
        "unknown setting"
    }

    fn can_map(&self, stack: &ParsingStack, _file: &RobotFile, token: &Token) -> bool {
        at_body_cell(stack, self.0) && recognizers::is_local_setting(token.text())
    }

    fn map(&self, stack: &mut ParsingStack, file: &mut RobotFile, id: TokenId) {
        let definition = self.0;
        let kind = LocalSettingKind::Unknown;

        file.token_mut(id)
            .tag(kind.tag(definition, Slot::Declaration));

        match file.last_definition_mut(definition) {
            Some(owner) => owner
                .body
                .push(BodyItem::Setting(LocalSetting::new(kind, id))),
            None => {
                lost(file, id, self.role());
                return;
            }
        }

        let problem = Problem::UnknownLocalSetting(
            file.text(id)
                .to_string(),
        );
        let position = file
            .token(id)
            .position();
        file.report(problem, position);

        stack.push(ParsingState::LocalSetting(kind, Slot::Declaration));
    }
}

/// Cells following a local setting's declaration.
pub(crate) struct LocalValue {
    role: &'static str,
    definition: DefinitionKind,
    kind: LocalSettingKind,
    after: &'static [Slot],
    slot: Slot,
}

impl Mapper for LocalValue {
    fn role(&self) -> &'static str {
        self.role
    }

    fn can_map(&self, stack: &ParsingStack, _file: &RobotFile, _token: &Token) -> bool {
        match stack.current() {
            Some(ParsingState::LocalSetting(kind, slot)) => {
                kind == self.kind
                    && self
                        .after
                        .contains(&slot)
            }
            _ => false,
        }
    }

    fn map(&self, stack: &mut ParsingStack, file: &mut RobotFile, id: TokenId) {
        file.token_mut(id)
            .tag(
                self.kind
                    .tag(self.definition, self.slot),
            );

        match file.last_body_item_mut(self.definition) {
            Some(BodyItem::Setting(setting)) => match self.slot {
                Slot::Unwanted => setting
                    .unexpected
                    .push(id),
                _ => setting
                    .values
                    .push(id),
            },
            _ => {
                lost(file, id, self.role);
                return;
            }
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

        stack.push(ParsingState::LocalSetting(self.kind, self.slot));
    }
}

/// The keyword a row calls.
pub(crate) struct Action(DefinitionKind);

impl Mapper for Action {
    fn role(&self) -> &'static str {
        "action"
    }

    fn can_map(&self, stack: &ParsingStack, _file: &RobotFile, _token: &Token) -> bool {
        at_body_cell(stack, self.0)
    }

    fn map(&self, stack: &mut ParsingStack, file: &mut RobotFile, id: TokenId) {
        let kind = self.0;
        let looping = in_open_loop(file, kind);
        let ending = looping
            && recognizers::is_for_end(file.text(id))
            && file
                .version
                .is_newer_or_equal(&FOR_WITH_END);

        let token = file.token_mut(id);
        token.tag(kind.action_tag());
        if ending {
            token.tag(TokenType::ForEndToken);
        } else if recognizers::is_for_loop(token.text()) {
            token.tag(TokenType::ForToken);
        } else if token.raw() == Some("\\") {
            token.tag(TokenType::ForContinueToken);
        } else if looping && token.raw() == Some("") {
            token.tag(TokenType::ForWithEndContinuation);
        }

        match file.last_definition_mut(kind) {
            Some(owner) => owner
                .body
                .push(BodyItem::Row(ExecutableRow::new(id, Vec::new()))),
            None => {
                lost(file, id, self.role());
                return;
            }
        }

        stack.push(ParsingState::Action);
    }
}

pub(crate) struct ActionArgument(DefinitionKind);

impl Mapper for ActionArgument {
    fn role(&self) -> &'static str {
        "action argument"
    }

    fn can_map(&self, stack: &ParsingStack, _file: &RobotFile, _token: &Token) -> bool {
        matches!(
            stack.current(),
            Some(ParsingState::Action) | Some(ParsingState::ActionArgument)
        )
    }

    fn map(&self, stack: &mut ParsingStack, file: &mut RobotFile, id: TokenId) {
        let kind = self.0;

        let action = match file.last_body_item_mut(kind) {
            Some(BodyItem::Row(row)) => {
                row.add_argument(id);
                row.action
            }
            _ => {
                lost(file, id, self.role());
                return;
            }
        };

        let looping = action.map_or(false, |action| {
            file.token(action)
                .has_type(TokenType::ForToken)
        });

        let token = file.token_mut(id);
        token.tag(kind.argument_tag());
        if looping && recognizers::is_in_marker(token.text()) {
            token.tag(TokenType::InToken);
        }

        stack.push(ParsingState::ActionArgument);
    }
}

const DECLARED: &[Slot] = &[Slot::Declaration];
const VALUED: &[Slot] = &[Slot::Declaration, Slot::Value];
const NAMED: &[Slot] = &[Slot::Name, Slot::Argument];

const fn local(
    role: &'static str,
    definition: DefinitionKind,
    kind: LocalSettingKind,
    after: &'static [Slot],
    slot: Slot,
) -> LocalValue {
    LocalValue {
        role,
        definition,
        kind,
        after,
        slot,
    }
}

pub(crate) static TEST_CASE_MAPPERS: &[StaticMapper] = &[
    &Comment,
    &Name(TestCase),
    &LocalDeclaration(TestCase, L::Documentation),
    &LocalDeclaration(TestCase, L::Tags),
    &LocalDeclaration(TestCase, L::Setup),
    &LocalDeclaration(TestCase, L::Teardown),
    &LocalDeclaration(TestCase, L::Template),
    &LocalDeclaration(TestCase, L::Timeout),
    &UnknownLocalDeclaration(TestCase),
    &local("setup keyword name", TestCase, L::Setup, DECLARED, Slot::Name),
    &local("setup keyword argument", TestCase, L::Setup, NAMED, Slot::Argument),
    &local("teardown keyword name", TestCase, L::Teardown, DECLARED, Slot::Name),
    &local(
        "teardown keyword argument",
        TestCase,
        L::Teardown,
        NAMED,
        Slot::Argument,
    ),
    &local("template keyword name", TestCase, L::Template, DECLARED, Slot::Name),
    &local(
        "template unwanted argument",
        TestCase,
        L::Template,
        &[Slot::Name, Slot::Unwanted],
        Slot::Unwanted,
    ),
    &local("timeout value", TestCase, L::Timeout, DECLARED, Slot::Value),
    &local(
        "timeout message",
        TestCase,
        L::Timeout,
        &[Slot::Value, Slot::Argument],
        Slot::Argument,
    ),
    &local("tag name", TestCase, L::Tags, VALUED, Slot::Value),
    &local("documentation text", TestCase, L::Documentation, VALUED, Slot::Value),
    &local("unknown setting argument", TestCase, L::Unknown, VALUED, Slot::Value),
    &Action(TestCase),
    &ActionArgument(TestCase),
];

pub(crate) static KEYWORD_MAPPERS: &[StaticMapper] = &[
    &Comment,
    &Name(Keyword),
    &LocalDeclaration(Keyword, L::Documentation),
    &LocalDeclaration(Keyword, L::Tags),
    &LocalDeclaration(Keyword, L::Arguments),
    &LocalDeclaration(Keyword, L::Return),
    &LocalDeclaration(Keyword, L::Teardown),
    &LocalDeclaration(Keyword, L::Timeout),
    &UnknownLocalDeclaration(Keyword),
    &local("teardown keyword name", Keyword, L::Teardown, DECLARED, Slot::Name),
    &local(
        "teardown keyword argument",
        Keyword,
        L::Teardown,
        NAMED,
        Slot::Argument,
    ),
    &local("timeout value", Keyword, L::Timeout, DECLARED, Slot::Value),
    &local(
        "timeout message",
        Keyword,
        L::Timeout,
        &[Slot::Value, Slot::Argument],
        Slot::Argument,
    ),
    &local("tag name", Keyword, L::Tags, VALUED, Slot::Value),
    &local("documentation text", Keyword, L::Documentation, VALUED, Slot::Value),
    &local("argument", Keyword, L::Arguments, VALUED, Slot::Value),
    &local("return value", Keyword, L::Return, VALUED, Slot::Value),
    &local("unknown setting argument", Keyword, L::Unknown, VALUED, Slot::Value),
    &Action(Keyword),
    &ActionArgument(Keyword),
];
