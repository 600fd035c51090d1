//! Splitting input into physical lines, and lines into cells and separators.
//! Nothing here can fail; text that can't be classified is left UNKNOWN.

use crate::language::{Eol, Position, Separator, SeparatorKind, Token, TokenType};

/// One piece of a line as the lexer found it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lexed {
    Cell(Token),
    Separator(Separator),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexedLine {
    pub style: SeparatorKind,
    pub elements: Vec<Lexed>,
    pub continuation: bool,
    pub indented: bool,
}

impl LexedLine {
    /// Cells holding something other than layout.
    pub fn cells(&self) -> impl Iterator<Item = &Token> + '_ {
        self.elements
            .iter()
            .filter_map(|element| match element {
                Lexed::Cell(token) if !token.is_structural() => Some(token),
                _ => None,
            })
    }
}

/// A physical line of input: where it starts, its content without the line
/// ending, and the line ending itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLine<'i> {
    pub offset: usize,
    pub text: &'i str,
    pub eol: Eol,
}

pub fn split_lines(content: &str, base: usize) -> Vec<RawLine<'_>> {
    let bytes = content.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let eol = match bytes[i] {
            b'\n' => Some((Eol::Lf, 1)),
            b'\r' if bytes.get(i + 1) == Some(&b'\n') => Some((Eol::CrLf, 2)),
            b'\r' => Some((Eol::Cr, 1)),
            _ => None,
        };

        match eol {
            Some((eol, width)) => {
                lines.push(RawLine {
                    offset: base + start,
                    text: &content[start..i],
                    eol,
                });
                i += width;
                start = i;
            }
            None => i += 1,
        }
    }

    if start < bytes.len() {
        lines.push(RawLine {
            offset: base + start,
            text: &content[start..],
            eol: Eol::None,
        });
    }

    lines
}

fn is_pipe_style(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some('|') => match chars.next() {
            None => true,
            Some(c) => c.is_whitespace(),
        },
        _ => false,
    }
}

fn is_space(c: u8) -> bool {
    c == b' ' || c == b'\t'
}

/// Whether the whitespace starting at i is wide enough to separate cells.
fn is_wide_run(bytes: &[u8], i: usize) -> bool {
    let run = bytes[i.min(bytes.len())..]
        .iter()
        .take_while(|c| is_space(**c));
    let (count, tab) = run.fold((0, false), |(count, tab), c| (count + 1, tab || *c == b'\t'));
    count >= 2 || tab
}

/// Whether the character at i is preceded by an odd number of backslashes.
fn is_escaped(bytes: &[u8], i: usize) -> bool {
    let mut count = 0;
    let mut j = i;
    while j > 0 && bytes[j - 1] == b'\\' {
        count += 1;
        j -= 1;
    }
    count % 2 == 1
}

struct Splitter<'i> {
    number: usize,
    offset: usize,
    text: &'i str,
    elements: Vec<Lexed>,
}

impl<'i> Splitter<'i> {
    fn position(&self, column: usize) -> Position {
        Position {
            line: self.number,
            column,
            offset: self.offset + column,
        }
    }

    fn cell(&mut self, start: usize, end: usize) {
        let token = Token::parsed(&self.text[start..end], self.position(start));
        self.elements
            .push(Lexed::Cell(token));
    }

    fn align(&mut self, start: usize, end: usize) {
        let mut token = Token::parsed(&self.text[start..end], self.position(start));
        token.tag(TokenType::PrettyAlignSpace);
        self.elements
            .push(Lexed::Cell(token));
    }

    fn separator(&mut self, kind: SeparatorKind, start: usize, end: usize) {
        let separator = Separator {
            kind,
            raw: self.text[start..end].to_string(),
            position: self.position(start),
        };
        self.elements
            .push(Lexed::Separator(separator));
    }

    /// A `|` is a separator at the start of the line, or between whitespace
    /// (or whitespace and the end of the line) anywhere else.
    fn pipes(&mut self) {
        let bytes = self
            .text
            .as_bytes();
        let mut cell = 0;
        let mut i = 0;

        while i < bytes.len() {
            let delimits = bytes[i] == b'|'
                && (i == 0 || is_space(bytes[i - 1]))
                && (i + 1 == bytes.len() || is_space(bytes[i + 1]));

            if !delimits {
                i += 1;
                continue;
            }

            let mut start = i;
            while start > cell && is_space(bytes[start - 1]) {
                start -= 1;
            }
            let mut end = i + 1;
            while end < bytes.len() && is_space(bytes[end]) {
                end += 1;
            }

            if i > 0 {
                self.cell(cell, start);
            }
            self.separator(SeparatorKind::Pipe, start, end);

            cell = end;
            i = end;
        }

        if cell < bytes.len() {
            let mut end = bytes.len();
            while end > cell && is_space(bytes[end - 1]) {
                end -= 1;
            }
            if end > cell {
                self.cell(cell, end);
            }
            if end < bytes.len() {
                self.align(end, bytes.len());
            }
        }
    }

    /// Runs of two or more spaces, or any run with a tab in it, separate
    /// cells. A single space at either end of the line is alignment.
    fn spaces(&mut self) {
        let bytes = self
            .text
            .as_bytes();
        let mut cell: Option<usize> = None;
        let mut i = 0;

        while i < bytes.len() {
            // an escaped space is text unless a separator follows it directly
            let escaped = is_escaped(bytes, i) && !is_wide_run(bytes, i + 1);
            if !is_space(bytes[i]) || escaped {
                if cell.is_none() {
                    cell = Some(i);
                }
                i += 1;
                continue;
            }

            let start = i;
            let mut end = i;
            while end < bytes.len() && is_space(bytes[end]) {
                end += 1;
            }

            let run = &bytes[start..end];
            let wide = run.len() >= 2 || run.contains(&b'\t');
            let edge = start == 0 || end == bytes.len();

            if wide || edge {
                if let Some(begin) = cell.take() {
                    self.cell(begin, start);
                }
                if wide {
                    self.separator(SeparatorKind::TabulatorOrDoubleSpace, start, end);
                } else {
                    self.align(start, end);
                }
            } else if cell.is_none() {
                cell = Some(start);
            }

            i = end;
        }

        if let Some(begin) = cell {
            self.cell(begin, bytes.len());
        }
    }
}

/// Split the content of one physical line into cells and separators, and
/// mark comments, continuation and indentation.
pub fn split_line(number: usize, offset: usize, text: &str) -> LexedLine {
    let mut splitter = Splitter {
        number,
        offset,
        text,
        elements: Vec::new(),
    };

    let style = if is_pipe_style(text) {
        SeparatorKind::Pipe
    } else {
        SeparatorKind::TabulatorOrDoubleSpace
    };

    if !text.is_empty()
        && text
            .trim()
            .is_empty()
    {
        splitter.align(0, text.len());
    } else {
        match style {
            SeparatorKind::Pipe => splitter.pipes(),
            SeparatorKind::TabulatorOrDoubleSpace => splitter.spaces(),
        }
    }

    let mut elements = splitter.elements;
    let mut indented = false;
    let mut continuation = false;

    match style {
        SeparatorKind::Pipe => {
            if let Some(Lexed::Cell(first)) = elements.get_mut(1) {
                if first
                    .text()
                    .is_empty()
                    && first.raw() == Some("")
                {
                    first.tag(TokenType::EmptyCell);
                    indented = true;
                }
            }
        }
        SeparatorKind::TabulatorOrDoubleSpace => {
            indented = matches!(elements.first(), Some(Lexed::Separator(_)));
        }
    }

    let mut first = true;
    let mut commenting = false;

    for element in elements.iter_mut() {
        let token = match element {
            Lexed::Cell(token) if !token.is_structural() => token,
            _ => continue,
        };

        if commenting {
            token.tag(TokenType::CommentContinue);
        } else if token
            .text()
            .starts_with('#')
        {
            token.tag(TokenType::StartHashComment);
            commenting = true;
        } else if first && token.text() == "..." {
            token.tag(TokenType::PreviousLineContinue);
            continuation = true;
        }
        first = false;
    }

    LexedLine {
        style,
        elements,
        continuation,
        indented,
    }
}
