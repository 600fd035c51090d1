use crate::language::{LocalSettingKind, SettingKind, Slot, VariableKind};

/// Where in the structure of a file the next token lands. Element states
/// carry the kind of element being filled and which slot the last token
/// took.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ParsingState {
    SettingTable,
    VariableTable,
    TestCaseTable,
    KeywordTable,
    Trash, // a table whose content is kept but not interpreted
    Setting(SettingKind, Slot),
    Variable(VariableKind, Slot),
    TestCaseDeclaration,
    KeywordDeclaration,
    LocalSetting(LocalSettingKind, Slot),
    Action,
    ActionArgument,
    Comment,
}

impl ParsingState {
    pub fn is_table(self) -> bool {
        matches!(
            self,
            ParsingState::SettingTable
                | ParsingState::VariableTable
                | ParsingState::TestCaseTable
                | ParsingState::KeywordTable
                | ParsingState::Trash
        )
    }

    pub fn is_declaration(self) -> bool {
        matches!(
            self,
            ParsingState::TestCaseDeclaration | ParsingState::KeywordDeclaration
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsingStack {
    stack: Vec<ParsingState>,
}

impl ParsingStack {
    pub(crate) fn new() -> ParsingStack {
        ParsingStack { stack: vec![] }
    }

    pub fn current(&self) -> Option<ParsingState> {
        self.stack
            .last()
            .copied()
    }

    pub(crate) fn push(&mut self, state: ParsingState) {
        self.stack
            .push(state);
    }

    /// Start over inside a new table.
    pub(crate) fn reset(&mut self, table: ParsingState) {
        self.stack
            .clear();
        self.stack
            .push(table);
    }

    /// The table the stack is in, if any.
    pub fn table(&self) -> Option<ParsingState> {
        self.stack
            .first()
            .copied()
            .filter(|state| state.is_table())
    }

    /// Drop everything above the table, as at the start of a line.
    pub(crate) fn truncate_to_table(&mut self) {
        self.stack
            .truncate(1);
    }

    /// The innermost state that is not a comment.
    pub fn element(&self) -> Option<ParsingState> {
        self.stack
            .iter()
            .rev()
            .find(|state| **state != ParsingState::Comment)
            .copied()
    }

    pub(crate) fn without_comments(&self) -> ParsingStack {
        ParsingStack {
            stack: self
                .stack
                .iter()
                .filter(|state| **state != ParsingState::Comment)
                .copied()
                .collect(),
        }
    }

    pub fn contains(&self, state: ParsingState) -> bool {
        self.stack
            .contains(&state)
    }

    pub fn states(&self) -> &[ParsingState] {
        &self.stack
    }
}

#[cfg(test)]
mod check {
    use super::*;

    #[test]
    fn stack_operations() {
        let mut stack = ParsingStack::new();
        assert_eq!(stack.current(), None);
        assert_eq!(stack.table(), None);

        stack.reset(ParsingState::SettingTable);
        stack.push(ParsingState::Setting(
            SettingKind::Library,
            Slot::Declaration,
        ));
        stack.push(ParsingState::Setting(SettingKind::Library, Slot::Name));

        assert_eq!(
            stack.current(),
            Some(ParsingState::Setting(SettingKind::Library, Slot::Name))
        );
        assert_eq!(stack.table(), Some(ParsingState::SettingTable));

        stack.truncate_to_table();
        assert_eq!(stack.current(), Some(ParsingState::SettingTable));

        // and a new table forgets the old one entirely
        stack.reset(ParsingState::KeywordTable);
        assert_eq!(stack.states(), &[ParsingState::KeywordTable]);
    }

    #[test]
    fn comments_are_skipped() {
        let mut stack = ParsingStack::new();

        stack.reset(ParsingState::TestCaseTable);
        stack.push(ParsingState::TestCaseDeclaration);
        stack.push(ParsingState::Action);
        stack.push(ParsingState::Comment);
        stack.push(ParsingState::Comment);

        assert_eq!(stack.element(), Some(ParsingState::Action));

        let restored = stack.without_comments();
        assert_eq!(restored.current(), Some(ParsingState::Action));
        assert!(!restored.contains(ParsingState::Comment));
        assert!(stack.contains(ParsingState::TestCaseDeclaration));
    }
}
