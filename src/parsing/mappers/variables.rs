//! Mappers for the `*** Variables ***` table.

use crate::language::{
    DictionaryItem, Problem, RobotFile, Slot, Token, TokenId, Variable, VariableKind,
};
use crate::parsing::scope::{ParsingStack, ParsingState};

use super::comments::Comment;
use super::{lost, Mapper, StaticMapper};

pub(crate) struct Declaration(VariableKind);

impl Mapper for Declaration {
    fn role(&self) -> &'static str {
        match self.0 {
            VariableKind::Scalar => "scalar declaration",
            VariableKind::List => "list declaration",
            VariableKind::Dictionary => "dictionary declaration",
            VariableKind::Unknown => "unknown declaration",
        }
    }

    fn can_map(&self, stack: &ParsingStack, _file: &RobotFile, token: &Token) -> bool {
        stack.current() == Some(ParsingState::VariableTable)
            && VariableKind::of_declaration(token.text()) == self.0
    }

    fn map(&self, stack: &mut ParsingStack, file: &mut RobotFile, id: TokenId) {
        let kind = self.0;
        file.token_mut(id)
            .tag(kind.tag(Slot::Declaration));
        file.variables
            .add(Variable::new(kind, id));

        if kind == VariableKind::Unknown {
            let problem = Problem::InvalidVariableDeclaration(
                file.text(id)
                    .to_string(),
            );
            let position = file
                .token(id)
                .position();
            file.report(problem, position);
        }

        stack.push(ParsingState::Variable(kind, Slot::Declaration));
    }
}

pub(crate) struct Value;

impl Mapper for Value {
    fn role(&self) -> &'static str {
        "variable value"
    }

    fn can_map(&self, stack: &ParsingStack, _file: &RobotFile, _token: &Token) -> bool {
        matches!(stack.current(), Some(ParsingState::Variable(..)))
    }

    fn map(&self, stack: &mut ParsingStack, file: &mut RobotFile, id: TokenId) {
        let kind = match stack.current() {
            Some(ParsingState::Variable(kind, _)) => kind,
            _ => VariableKind::Unknown,
        };

        file.token_mut(id)
            .tag(kind.tag(Slot::Value));

        match file
            .variables
            .last_mut()
        {
            Some(variable) => variable
                .values
                .push(id),
            None => {
                lost(file, id, self.role());
                return;
            }
        }

        if kind == VariableKind::Dictionary {
            let item = DictionaryItem::split(file.text(id));
            if !item.is_well_formed() {
                let problem = Problem::DictionaryItemWithoutKey(
                    file.text(id)
                        .to_string(),
                );
                let position = file
                    .token(id)
                    .position();
                file.report(problem, position);
            }
        }

        stack.push(ParsingState::Variable(kind, Slot::Value));
    }
}

pub(crate) static MAPPERS: &[StaticMapper] = &[
    &Comment,
    &Declaration(VariableKind::Scalar),
    &Declaration(VariableKind::List),
    &Declaration(VariableKind::Dictionary),
    &Declaration(VariableKind::Unknown),
    &Value,
];
