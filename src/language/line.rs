//! Physical lines as they were read, kept so that unedited content can be
//! written back exactly.

use serde::Serialize;

use super::token::{Position, TokenId};

/// How cells are delimited on a line. Decided once per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeparatorKind {
    Pipe,
    TabulatorOrDoubleSpace,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Separator {
    pub kind: SeparatorKind,
    pub raw: String,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LineElement {
    Token(TokenId),
    Separator(Separator),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Eol {
    Lf,
    CrLf,
    Cr,
    None,
}

impl Eol {
    pub fn as_str(self) -> &'static str {
        match self {
            Eol::Lf => "\n",
            Eol::CrLf => "\r\n",
            Eol::Cr => "\r",
            Eol::None => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    /// 1-based, as in Position
    pub number: usize,
    pub offset: usize,
    pub style: SeparatorKind,
    pub elements: Vec<LineElement>,
    pub eol: Eol,
    /// the first data cell is the `...` marker
    pub continuation: bool,
    /// the first cell is empty; a body line inside a test case or keyword
    pub indented: bool,
}

impl Line {
    pub fn tokens(&self) -> impl Iterator<Item = TokenId> + '_ {
        self.elements
            .iter()
            .filter_map(|element| match element {
                LineElement::Token(id) => Some(*id),
                LineElement::Separator(_) => None,
            })
    }

    pub fn separators(&self) -> impl Iterator<Item = &Separator> + '_ {
        self.elements
            .iter()
            .filter_map(|element| match element {
                LineElement::Separator(separator) => Some(separator),
                LineElement::Token(_) => None,
            })
    }

    pub fn is_empty(&self) -> bool {
        self.elements
            .is_empty()
    }
}
