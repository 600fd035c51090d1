//! Elements of the `*** Variables ***` table

use serde::Serialize;

use super::document::RobotFile;
use super::element::{move_down, move_up, Element, Slot};
use super::token::{TokenId, TokenType};
use crate::variables::{extract, ContainerKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VariableKind {
    Scalar,
    List,
    Dictionary,
    Unknown,
}

impl VariableKind {
    pub fn tag(self, slot: Slot) -> TokenType {
        match (self, slot) {
            (VariableKind::Scalar, Slot::Declaration) => TokenType::VariablesScalarDeclaration,
            (VariableKind::List, Slot::Declaration) => TokenType::VariablesListDeclaration,
            (VariableKind::Dictionary, Slot::Declaration) => {
                TokenType::VariablesDictionaryDeclaration
            }
            (VariableKind::Unknown, Slot::Declaration) => TokenType::VariablesUnknownDeclaration,
            _ => TokenType::VariablesVariableValue,
        }
    }

    fn sigil(self) -> char {
        match self {
            VariableKind::Scalar => '$',
            VariableKind::List => '@',
            VariableKind::Dictionary => '&',
            VariableKind::Unknown => '$',
        }
    }

    /// Decide what a declaration cell declares. The cell must be exactly one
    /// variable, optionally followed by `=` (with or without a space).
    pub fn of_declaration(text: &str) -> VariableKind {
        let trimmed = text.trim_end();
        let trimmed = match trimmed.strip_suffix('=') {
            Some(rest) => rest.trim_end(),
            None => trimmed,
        };

        let structure = extract(trimmed);
        match structure.single_variable() {
            Some(id) => match structure
                .container(id)
                .kind
            {
                ContainerKind::Scalar => VariableKind::Scalar,
                ContainerKind::List => VariableKind::List,
                ContainerKind::Dictionary => VariableKind::Dictionary,
                _ => VariableKind::Unknown,
            },
            None => VariableKind::Unknown,
        }
    }

    /// Turn a bare name into a declaration of this kind; names already
    /// carrying their decoration are left alone.
    pub fn decorate(self, name: &str) -> String {
        let name = name.trim();
        let sigil = self.sigil();

        if name.starts_with(sigil) && name[1..].starts_with('{') && name.ends_with('}') {
            return name.to_string();
        }

        let inner = name
            .trim_start_matches(['$', '@', '&', '%'])
            .trim_start_matches('{')
            .trim_end_matches('}');

        format!("{}{{{}}}", sigil, inner)
    }
}

/// One item of a dictionary variable's value, split on the first `=` that
/// is neither escaped nor inside a variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryItem {
    pub key: String,
    pub value: Option<String>,
}

impl DictionaryItem {
    pub fn split(text: &str) -> DictionaryItem {
        let structure = extract(text);

        match structure.first_unescaped_outside('=') {
            Some(offset) => DictionaryItem {
                key: text[..offset].to_string(),
                value: Some(text[offset + 1..].to_string()),
            },
            None => DictionaryItem {
                key: text.to_string(),
                value: None,
            },
        }
    }

    /// How the item is written in a cell.
    pub fn text(&self) -> String {
        match &self.value {
            Some(value) => format!("{}={}", self.key, value),
            None => self
                .key
                .clone(),
        }
    }

    /// An item without `=` is still fine if it expands another dictionary.
    pub fn is_well_formed(&self) -> bool {
        if self
            .value
            .is_some()
        {
            return true;
        }
        let structure = extract(&self.key);
        match structure.single_variable() {
            Some(id) => {
                structure
                    .container(id)
                    .kind
                    == ContainerKind::Dictionary
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub kind: VariableKind,
    pub declaration: TokenId,
    pub values: Vec<TokenId>,
    pub comment: Vec<TokenId>,
}

impl Variable {
    pub fn new(kind: VariableKind, declaration: TokenId) -> Variable {
        Variable {
            kind,
            declaration,
            values: Vec::new(),
            comment: Vec::new(),
        }
    }

    /// The key and value of each item of a dictionary variable, paired with
    /// the value cell holding it. Other variables have no items.
    pub fn items(&self, file: &RobotFile) -> Vec<(TokenId, DictionaryItem)> {
        if self.kind != VariableKind::Dictionary {
            return Vec::new();
        }
        self.values
            .iter()
            .map(|id| (*id, DictionaryItem::split(file.text(*id))))
            .collect()
    }
}

impl Element for Variable {
    fn tokens(&self) -> Vec<TokenId> {
        let mut tokens = vec![self.declaration];
        tokens.extend_from_slice(&self.values);
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

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableTable {
    pub variables: Vec<Variable>,
}

impl VariableTable {
    pub fn add(&mut self, variable: Variable) -> usize {
        self.variables
            .push(variable);
        self.variables
            .len()
            - 1
    }

    pub fn get(&self, index: usize) -> Option<&Variable> {
        self.variables
            .get(index)
    }

    pub fn last(&self) -> Option<&Variable> {
        self.variables
            .last()
    }

    pub fn last_mut(&mut self) -> Option<&mut Variable> {
        self.variables
            .last_mut()
    }

    pub fn remove(&mut self, index: usize) -> Option<Variable> {
        if index < self
            .variables
            .len()
        {
            Some(
                self.variables
                    .remove(index),
            )
        } else {
            None
        }
    }

    pub fn move_up(&mut self, index: usize) -> bool {
        move_up(&mut self.variables, index)
    }

    pub fn move_down(&mut self, index: usize) -> bool {
        move_down(&mut self.variables, index)
    }

    pub fn len(&self) -> usize {
        self.variables
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables
            .is_empty()
    }
}
