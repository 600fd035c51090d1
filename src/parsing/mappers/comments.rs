use crate::language::{BodyItem, Element, ExecutableRow, RobotFile, Token, TokenId};
use crate::parsing::scope::{ParsingStack, ParsingState};

use super::{definition_kind, lost, Mapper};

/// A trailing `# comment` on a line, attached to whatever element the line
/// was filling.
pub(crate) struct Comment;

impl Mapper for Comment {
    fn role(&self) -> &'static str {
        "comment"
    }

    fn can_map(&self, stack: &ParsingStack, _file: &RobotFile, token: &Token) -> bool {
        token.is_comment()
            && stack
                .element()
                .map_or(false, |state| !state.is_table())
    }

    fn map(&self, stack: &mut ParsingStack, file: &mut RobotFile, id: TokenId) {
        let continuing = stack.current() == Some(ParsingState::Comment);

        let comment: Option<&mut Vec<TokenId>> = match stack.element() {
            Some(ParsingState::Setting(kind, _)) => file
                .settings
                .last_mut(kind)
                .map(|element| element.comment_mut()),
            Some(ParsingState::Variable(..)) => file
                .variables
                .last_mut()
                .map(|variable| variable.comment_mut()),
            Some(ParsingState::TestCaseDeclaration) | Some(ParsingState::KeywordDeclaration) => {
                // after a name the comment is a row of its own
                match definition_kind(stack).and_then(|kind| file.last_definition_mut(kind)) {
                    Some(definition) => {
                        if !continuing {
                            definition
                                .body
                                .push(BodyItem::Row(ExecutableRow::default()));
                        }
                        match definition.last_item_mut() {
                            Some(BodyItem::Row(row)) => Some(&mut row.comment),
                            _ => None,
                        }
                    }
                    None => None,
                }
            }
            Some(ParsingState::LocalSetting(..)) => {
                match definition_kind(stack).and_then(|kind| file.last_body_item_mut(kind)) {
                    Some(BodyItem::Setting(setting)) => Some(&mut setting.comment),
                    _ => None,
                }
            }
            Some(ParsingState::Action) | Some(ParsingState::ActionArgument) => {
                match definition_kind(stack).and_then(|kind| file.last_body_item_mut(kind)) {
                    Some(BodyItem::Row(row)) => Some(&mut row.comment),
                    _ => None,
                }
            }
            _ => None,
        };

        let attached = match comment {
            Some(list) => {
                list.push(id);
                true
            }
            None => false,
        };

        if !attached {
            lost(file, id, self.role());
            return;
        }

        stack.push(ParsingState::Comment);
    }
}
