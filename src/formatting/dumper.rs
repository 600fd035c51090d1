//! Writing a RobotFile back out as text. Lines nothing has touched are
//! copied as they were read; lines whose tokens changed are rebuilt around
//! the separators they already had; new elements get lines of their own.

use std::collections::{BTreeMap, HashSet};
use std::ops::RangeInclusive;

use tracing::debug;

use crate::formatting::Syntax;
use crate::language::{
    BodyItem, Definition, Element, Eol, LineElement, RobotFile, SectionKind,
    SeparatorKind, SettingKind, TokenId,
};
use crate::variables::extract;

/// Separator to use on lines written from scratch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeparatorStyle {
    Pipe,
    Spaces(usize),
    Tab,
}

impl SeparatorStyle {
    /// `pipe`, `tab`, or a number of spaces (at least two).
    pub fn parse(text: &str) -> Option<SeparatorStyle> {
        match text {
            "pipe" | "|" => Some(SeparatorStyle::Pipe),
            "tab" => Some(SeparatorStyle::Tab),
            _ => match text.parse::<usize>() {
                Ok(count) if count >= 2 => Some(SeparatorStyle::Spaces(count)),
                _ => None,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DumpOptions {
    /// separator for new lines; otherwise what most of the file uses
    pub separator: Option<SeparatorStyle>,
    /// line ending for new lines; otherwise what most of the file uses
    pub eol: Option<Eol>,
}

/// Where an entry goes within its section: source line, then whether it is
/// new, then setting priority, then the order it was found in.
type Key = (usize, usize, u8, usize);

enum Part {
    Cells { tokens: Vec<TokenId>, body: bool },
    /// a body line copied as it is
    Line(usize),
}

enum Entry {
    Line(usize),
    Element {
        parts: Vec<Part>,
        /// lines between the element's first and last that belong to nothing
        inner: Vec<usize>,
    },
}

enum Row {
    Line(usize),
    Cells {
        line: Option<usize>,
        tokens: Vec<TokenId>,
        body: bool,
    },
}

enum Piece {
    Separator(String),
    Cell(TokenId),
    /// the empty first cell of a new pipe separated body line
    Empty,
}

struct Output {
    fragments: Vec<(Syntax, String)>,
    /// None for lines written from scratch
    eol: Option<Eol>,
}

/// An element of a model list and where it was read from.
struct Placed {
    index: usize,
    slot: Option<usize>,
    span: Option<RangeInclusive<usize>>,
    parts: Vec<Part>,
}

fn cells(tokens: Vec<TokenId>, body: bool) -> Part {
    Part::Cells { tokens, body }
}

fn definition_parts(definition: &Definition) -> Vec<Part> {
    let mut parts = vec![cells(vec![definition.name], false)];
    for item in &definition.body {
        parts.push(match item {
            BodyItem::Setting(setting) => cells(setting.tokens(), true),
            BodyItem::Row(row) => cells(row.tokens(), true),
            BodyItem::Blank(index) => Part::Line(*index),
        });
    }
    parts
}

struct Dumper<'f> {
    file: &'f RobotFile,
    unclaimed: HashSet<TokenId>,
    pipes: bool,
    spaces: String,
    eol: Eol,
    output: Vec<Output>,
}

impl<'f> Dumper<'f> {
    fn new(file: &'f RobotFile, options: &DumpOptions) -> Dumper<'f> {
        let mut pipe_lines = 0;
        let mut space_lines = 0;
        let mut separators: BTreeMap<&str, usize> = BTreeMap::new();
        let mut endings: BTreeMap<&str, (usize, Eol)> = BTreeMap::new();

        for line in file.lines() {
            let mut any = false;
            for separator in line.separators() {
                any = true;
                if separator.kind == SeparatorKind::TabulatorOrDoubleSpace {
                    *separators
                        .entry(separator.raw.as_str())
                        .or_default() += 1;
                }
            }
            if any {
                match line.style {
                    SeparatorKind::Pipe => pipe_lines += 1,
                    SeparatorKind::TabulatorOrDoubleSpace => space_lines += 1,
                }
            }
            if line.eol != Eol::None {
                endings
                    .entry(line.eol.as_str())
                    .or_insert((0, line.eol))
                    .0 += 1;
            }
        }

        let dominant = separators
            .into_iter()
            .max_by_key(|(_, count)| *count)
            .map(|(raw, _)| raw.to_string());
        let (pipes, spaces) = match options.separator {
            Some(SeparatorStyle::Pipe) => (true, dominant),
            Some(SeparatorStyle::Spaces(count)) => (false, Some(" ".repeat(count))),
            Some(SeparatorStyle::Tab) => (false, Some("\t".to_string())),
            None => (pipe_lines > space_lines, dominant),
        };

        let eol = options
            .eol
            .or_else(|| {
                endings
                    .into_values()
                    .max_by_key(|(count, _)| *count)
                    .map(|(_, eol)| eol)
            })
            .unwrap_or(Eol::Lf);

        Dumper {
            file,
            unclaimed: file
                .unclaimed
                .iter()
                .copied()
                .collect(),
            pipes,
            spaces: spaces.unwrap_or_else(|| "    ".to_string()),
            eol,
            output: Vec::new(),
        }
    }

    /// Index of the section a line belongs to.
    fn section_of(&self, line: usize) -> Option<usize> {
        self.file
            .sections()
            .iter()
            .position(|section| {
                section
                    .lines
                    .contains(&line)
            })
    }

    fn last_section(&self, wanted: impl Fn(SectionKind) -> bool) -> Option<usize> {
        self.file
            .sections()
            .iter()
            .rposition(|section| wanted(section.kind))
    }

    /// The first and last source line of the tokens in some parts.
    fn span(&self, parts: &[Part]) -> Option<RangeInclusive<usize>> {
        let mut lines = parts
            .iter()
            .flat_map(|part| match part {
                Part::Cells { tokens, .. } => tokens
                    .iter()
                    .filter_map(|id| {
                        self.file
                            .line_of(*id)
                    })
                    .collect::<Vec<_>>(),
                Part::Line(index) => vec![*index],
            })
            .peekable();

        let first = *lines.peek()?;
        let (low, high) = lines.fold((first, first), |(low, high), line| {
            (low.min(line), high.max(line))
        });
        Some(low..=high)
    }

    /// Elements of a model list that were read from the input take the
    /// source slots of the list in list order, so that reordering the list
    /// reorders the output. The others have no slot.
    fn place(&self, list: Vec<Vec<Part>>) -> Vec<Placed> {
        let spans: Vec<_> = list
            .iter()
            .map(|parts| self.span(parts))
            .collect();

        let mut slots: Vec<usize> = spans
            .iter()
            .flatten()
            .map(|span| *span.start())
            .collect();
        slots.sort_unstable();
        let mut slots = slots.into_iter();

        list.into_iter()
            .zip(spans)
            .enumerate()
            .map(|(index, (parts, span))| Placed {
                index,
                slot: match span {
                    Some(_) => slots.next(),
                    None => None,
                },
                span,
                parts,
            })
            .collect()
    }

    fn write(&mut self) {
        let file = self.file;
        let sections = file.sections();

        let mut plan: Vec<Vec<(Key, Entry)>> = sections
            .iter()
            .map(|_| Vec::new())
            .collect();
        let mut spans: Vec<(usize, RangeInclusive<usize>, usize)> = Vec::new();
        let mut generated: Vec<(SectionKind, Vec<(Key, Entry)>)> = Vec::new();
        let mut counter = 0;

        // settings, each list in turn, new ones by priority
        let target = self.last_section(|kind| kind == SectionKind::Settings);
        let mut settled: Vec<(usize, u8)> = Vec::new();
        let mut fresh: Vec<(SettingKind, Vec<Part>)> = Vec::new();

        for list in file
            .settings
            .lists()
        {
            let kinds: Vec<SettingKind> = list
                .iter()
                .map(|(kind, _)| *kind)
                .collect();
            let parts = list
                .into_iter()
                .map(|(_, element)| vec![cells(element.tokens(), false)])
                .collect();

            for placed in self.place(parts) {
                let kind = kinds[placed.index];
                match placed.slot {
                    Some(slot) => {
                        let section = self
                            .section_of(slot)
                            .or(target);
                        if section == target {
                            settled.push((slot, kind.priority()));
                        }
                        if let Some(section) = section {
                            self.settle(&mut plan[section], &mut spans, section, slot, placed);
                        }
                    }
                    None => fresh.push((kind, placed.parts)),
                }
            }
        }

        let header = target
            .and_then(|index| sections[index].header)
            .unwrap_or(0);
        for (kind, parts) in fresh {
            let priority = kind.priority();
            let after = settled
                .iter()
                .filter(|(_, settled)| *settled <= priority)
                .map(|(slot, _)| *slot)
                .max()
                .unwrap_or(header);
            counter += 1;
            let entry = Entry::Element {
                parts,
                inner: Vec::new(),
            };
            let key = (after, 1, priority, counter);
            match target {
                Some(index) => plan[index].push((key, entry)),
                None => generated_section(&mut generated, SectionKind::Settings).push((key, entry)),
            }
        }

        // variables, test cases and keywords: new ones go after the last
        let lists: Vec<(SectionKind, Vec<Vec<Part>>)> = vec![
            (
                SectionKind::Variables,
                file.variables
                    .variables
                    .iter()
                    .map(|variable| vec![cells(variable.tokens(), false)])
                    .collect(),
            ),
            (
                if file
                    .test_cases
                    .tasks
                {
                    SectionKind::Tasks
                } else {
                    SectionKind::TestCases
                },
                file.test_cases
                    .definitions
                    .iter()
                    .map(definition_parts)
                    .collect(),
            ),
            (
                SectionKind::Keywords,
                file.keywords
                    .definitions
                    .iter()
                    .map(definition_parts)
                    .collect(),
            ),
        ];

        for (table, list) in lists {
            let wanted = |kind: SectionKind| match table {
                SectionKind::TestCases | SectionKind::Tasks => {
                    kind == SectionKind::TestCases || kind == SectionKind::Tasks
                }
                _ => kind == table,
            };
            let target = self.last_section(wanted);
            let mut last = target.and_then(|index| sections[index].header);
            let mut fresh = Vec::new();

            for placed in self.place(list) {
                match placed.slot {
                    Some(slot) => {
                        let section = self
                            .section_of(slot)
                            .or(target);
                        if section == target {
                            last = last.max(Some(slot));
                        }
                        if let Some(section) = section {
                            self.settle(&mut plan[section], &mut spans, section, slot, placed);
                        }
                    }
                    None => fresh.push(placed.parts),
                }
            }

            for parts in fresh {
                counter += 1;
                let entry = Entry::Element {
                    parts,
                    inner: Vec::new(),
                };
                let key = (last.unwrap_or(0), 1, 0, counter);
                match target {
                    Some(index) => plan[index].push((key, entry)),
                    None => generated_section(&mut generated, table).push((key, entry)),
                }
            }
        }

        // lines of no element, unless inside one
        for (index, section) in sections
            .iter()
            .enumerate()
        {
            for line in &section.trivia {
                let owner = spans
                    .iter()
                    .find(|(owner, span, _)| *owner == index && span.contains(line))
                    .map(|(_, _, slot)| *slot);
                match owner.and_then(|start| find_element(&mut plan[index], start)) {
                    Some(inner) => inner.push(*line),
                    None => plan[index].push(((*line, 0, 0, 0), Entry::Line(*line))),
                }
            }
        }

        for (index, section) in sections
            .iter()
            .enumerate()
        {
            if section
                .kind
                .is_verbatim()
            {
                for line in section
                    .lines
                    .clone()
                {
                    self.copy_line(line);
                }
                continue;
            }

            if let Some(header) = section.header {
                self.copy_line(header);
            }

            let mut entries = std::mem::take(&mut plan[index]);
            entries.sort_by_key(|(key, _)| *key);
            for (_, entry) in entries {
                self.emit(entry);
            }
        }

        for (kind, mut entries) in generated {
            debug!("generating {:?} table", kind);
            let spaced = self
                .output
                .last()
                .map_or(true, |line| {
                    line.fragments
                        .iter()
                        .all(|(_, text)| {
                            text.trim()
                                .is_empty()
                        })
                });
            if !spaced {
                self.output
                    .push(Output {
                        fragments: Vec::new(),
                        eol: None,
                    });
            }
            if let Some(header) = kind.header() {
                self.output
                    .push(Output {
                        fragments: vec![(Syntax::Header, header.to_string())],
                        eol: None,
                    });
            }

            entries.sort_by_key(|(key, _)| *key);
            for (_, entry) in entries {
                self.emit(entry);
            }
        }
    }

    fn settle(
        &self,
        plan: &mut Vec<(Key, Entry)>,
        spans: &mut Vec<(usize, RangeInclusive<usize>, usize)>,
        section: usize,
        slot: usize,
        placed: Placed,
    ) {
        if let Some(span) = placed.span {
            spans.push((section, span, slot));
        }
        plan.push((
            (slot, 0, 0, 0),
            Entry::Element {
                parts: placed.parts,
                inner: Vec::new(),
            },
        ));
    }

    fn emit(&mut self, entry: Entry) {
        match entry {
            Entry::Line(index) => self.copy_line(index),
            Entry::Element { parts, mut inner } => {
                inner.sort_unstable();
                let mut inner = inner.into_iter().peekable();

                for row in self.rows(parts) {
                    let at = match &row {
                        Row::Line(index) => Some(*index),
                        Row::Cells { line, .. } => *line,
                    };
                    if let Some(at) = at {
                        while let Some(line) = inner.next_if(|line| *line < at) {
                            self.copy_line(line);
                        }
                    }
                    self.emit_row(row);
                }
                for line in inner {
                    self.copy_line(line);
                }
            }
        }
    }

    /// Group the tokens of an element by the line they go on. A token read
    /// from the input goes on its own line; a new one follows the token
    /// before it, or the first positioned token of its part if it leads.
    fn rows(&self, parts: Vec<Part>) -> Vec<Row> {
        let mut rows: Vec<Row> = Vec::new();

        for part in parts {
            let (tokens, body) = match part {
                Part::Line(index) => {
                    rows.push(Row::Line(index));
                    continue;
                }
                Part::Cells { tokens, body } => (tokens, body),
            };

            let mut current = tokens
                .iter()
                .find_map(|id| {
                    self.file
                        .line_of(*id)
                });

            for (n, id) in tokens
                .into_iter()
                .enumerate()
            {
                if let Some(line) = self
                    .file
                    .line_of(id)
                {
                    current = Some(line);
                }

                let joins = match rows.last() {
                    Some(Row::Cells { line, .. }) => *line == current && (n > 0 || current.is_some()),
                    _ => false,
                };

                match rows.last_mut() {
                    Some(Row::Cells { tokens, .. }) if joins => tokens.push(id),
                    _ => rows.push(Row::Cells {
                        line: current,
                        tokens: vec![id],
                        body,
                    }),
                }
            }
        }

        rows
    }

    fn emit_row(&mut self, row: Row) {
        match row {
            Row::Line(index) => self.copy_line(index),
            Row::Cells {
                line: Some(index),
                tokens,
                body,
            } => {
                let unchanged = self
                    .data(index)
                    .eq(tokens
                        .iter()
                        .copied());
                if unchanged {
                    self.copy_line(index);
                } else {
                    self.rebuild(index, &tokens, body);
                }
            }
            Row::Cells {
                line: None,
                tokens,
                body,
            } => self.fresh(&tokens, body),
        }
    }

    /// Tokens on a line that belong to the model.
    fn data(&self, index: usize) -> impl Iterator<Item = TokenId> + '_ {
        self.file
            .lines()[index]
            .tokens()
            .filter(|id| {
                !self
                    .file
                    .token(*id)
                    .is_structural()
                    && !self
                        .unclaimed
                        .contains(id)
            })
    }

    fn copy_line(&mut self, index: usize) {
        let file = self.file;
        let line = &file.lines()[index];
        let pieces: Vec<Piece> = line
            .elements
            .iter()
            .map(|element| match element {
                LineElement::Token(id) => Piece::Cell(*id),
                LineElement::Separator(separator) => Piece::Separator(
                    separator
                        .raw
                        .clone(),
                ),
            })
            .collect();

        let fragments = self.fragments(&pieces, line.style);
        self.output
            .push(Output {
                fragments,
                eol: Some(line.eol),
            });
    }

    /// Write a line's tokens anew, keeping its leading and trailing layout
    /// and the separators between cells where there are enough of them.
    fn rebuild(&mut self, index: usize, tokens: &[TokenId], body: bool) {
        debug!("rebuilding line {}", index + 1);

        let file = self.file;
        let line = &file.lines()[index];
        let elements = &line.elements;

        let layout = |element: &LineElement| match element {
            LineElement::Separator(_) => true,
            LineElement::Token(id) => file
                .token(*id)
                .is_structural(),
        };
        let start = elements
            .iter()
            .position(|element| !layout(element))
            .unwrap_or(elements.len());
        let end = elements
            .iter()
            .rposition(|element| !layout(element))
            .map_or(start, |i| i + 1);

        let piece = |element: &LineElement| match element {
            LineElement::Token(id) => Piece::Cell(*id),
            LineElement::Separator(separator) => Piece::Separator(
                separator
                    .raw
                    .clone(),
            ),
        };

        let middle: Vec<String> = elements[start..end]
            .iter()
            .filter_map(|element| match element {
                LineElement::Separator(separator) => Some(
                    separator
                        .raw
                        .clone(),
                ),
                LineElement::Token(_) => None,
            })
            .collect();
        let fallback = match line.style {
            SeparatorKind::Pipe => " | ".to_string(),
            SeparatorKind::TabulatorOrDoubleSpace => middle
                .first()
                .cloned()
                .or_else(|| {
                    line.separators()
                        .next()
                        .map(|separator| {
                            separator
                                .raw
                                .clone()
                        })
                })
                .unwrap_or_else(|| {
                    self.spaces
                        .clone()
                }),
        };

        let unclaimed = line
            .tokens()
            .filter(|id| {
                self.unclaimed
                    .contains(id)
            });

        let mut pieces: Vec<Piece> = elements[..start]
            .iter()
            .map(piece)
            .collect();
        let mut between = middle.into_iter();
        for (n, id) in tokens
            .iter()
            .copied()
            .chain(unclaimed)
            .enumerate()
        {
            if n > 0 {
                let separator = between
                    .next()
                    .unwrap_or_else(|| fallback.clone());
                pieces.push(Piece::Separator(separator));
            }
            pieces.push(Piece::Cell(id));
        }
        pieces.extend(
            elements[end..]
                .iter()
                .map(piece),
        );

        let pieces = fix_separators(pieces, &fallback, body && line.style != SeparatorKind::Pipe);
        let fragments = self.fragments(&pieces, line.style);
        self.output
            .push(Output {
                fragments,
                eol: Some(line.eol),
            });
    }

    fn fresh(&mut self, tokens: &[TokenId], body: bool) {
        let mut pieces = Vec::new();

        let (style, between) = if self.pipes {
            pieces.push(Piece::Separator("| ".to_string()));
            if body {
                pieces.push(Piece::Empty);
                pieces.push(Piece::Separator("| ".to_string()));
            }
            (SeparatorKind::Pipe, " | ".to_string())
        } else {
            if body {
                pieces.push(Piece::Separator(
                    self.spaces
                        .clone(),
                ));
            }
            (
                SeparatorKind::TabulatorOrDoubleSpace,
                self.spaces
                    .clone(),
            )
        };

        for (n, id) in tokens
            .iter()
            .enumerate()
        {
            if n > 0 {
                pieces.push(Piece::Separator(between.clone()));
            }
            pieces.push(Piece::Cell(*id));
        }

        let fragments = self.fragments(&pieces, style);
        self.output
            .push(Output {
                fragments,
                eol: None,
            });
    }

    fn fragments(&self, pieces: &[Piece], style: SeparatorKind) -> Vec<(Syntax, String)> {
        let mut fragments = Vec::new();

        for piece in pieces {
            match piece {
                Piece::Separator(raw) => fragments.push((Syntax::Separator, raw.clone())),
                Piece::Empty => {}
                Piece::Cell(id) => self.cell(*id, style, &mut fragments),
            }
        }

        fragments
    }

    /// A token as it appears in the output. An empty cell is written as `\`
    /// unless pipes already delimit it.
    fn cell(&self, id: TokenId, style: SeparatorKind, fragments: &mut Vec<(Syntax, String)>) {
        let token = self
            .file
            .token(id);

        let text = if token
            .text()
            .is_empty()
            && (token
                .raw()
                .is_none()
                || style == SeparatorKind::TabulatorOrDoubleSpace)
        {
            "\\"
        } else {
            match token.raw() {
                Some(raw) => raw,
                None => token.text(),
            }
        };

        let syntax = Syntax::of(token.kind());
        if !syntax.splits_variables() {
            fragments.push((syntax, text.to_string()));
            return;
        }

        let structure = extract(text);
        let mut done = 0;
        for variable in structure.variables() {
            let span = structure.span(variable);
            if span.start > done {
                fragments.push((syntax, text[done..span.start].to_string()));
            }
            fragments.push((Syntax::Variable, text[span.start..span.end].to_string()));
            done = span.end;
        }
        if done < text.len() {
            fragments.push((syntax, text[done..].to_string()));
        }
    }

    fn finish(self) -> Vec<(Syntax, String)> {
        let mut fragments = Vec::new();
        if self
            .file
            .has_bom()
        {
            fragments.push((Syntax::Neutral, "\u{feff}".to_string()));
        }

        let count = self
            .output
            .len();
        for (n, line) in self
            .output
            .into_iter()
            .enumerate()
        {
            fragments.extend(line.fragments);

            let eol = match line.eol {
                Some(Eol::None) if n + 1 < count => self.eol,
                Some(eol) => eol,
                None => self.eol,
            };
            if eol != Eol::None {
                fragments.push((Syntax::Newline, eol.as_str().to_string()));
            }
        }

        fragments
    }
}

fn generated_section(
    generated: &mut Vec<(SectionKind, Vec<(Key, Entry)>)>,
    kind: SectionKind,
) -> &mut Vec<(Key, Entry)> {
    let index = match generated
        .iter()
        .position(|(existing, _)| *existing == kind)
    {
        Some(index) => index,
        None => {
            generated.push((kind, Vec::new()));
            generated.len() - 1
        }
    };
    &mut generated[index].1
}

fn find_element(plan: &mut [(Key, Entry)], slot: usize) -> Option<&mut Vec<usize>> {
    plan.iter_mut()
        .find_map(|(key, entry)| match entry {
            Entry::Element { inner, .. } if key.0 == slot && key.1 == 0 => Some(inner),
            _ => None,
        })
}

/// Put a separator between cells that have none, drop doubled ones, and
/// indent a body line that starts with a cell.
fn fix_separators(pieces: Vec<Piece>, separator: &str, indent: bool) -> Vec<Piece> {
    let mut fixed: Vec<Piece> = Vec::with_capacity(pieces.len() + 1);

    for piece in pieces {
        let after_separator = matches!(fixed.last(), Some(Piece::Separator(_)));
        let after_cell = matches!(fixed.last(), Some(Piece::Cell(_)) | Some(Piece::Empty));

        match piece {
            Piece::Separator(_) if after_separator => continue,
            Piece::Cell(_) | Piece::Empty if after_cell => {
                fixed.push(Piece::Separator(separator.to_string()));
            }
            _ => {}
        }
        fixed.push(piece);
    }

    if indent && matches!(fixed.first(), Some(Piece::Cell(_))) {
        fixed.insert(0, Piece::Separator(separator.to_string()));
    }

    fixed
}

/// Pass 1: the file as tagged fragments, ready for a renderer.
pub fn dump_fragments(file: &RobotFile, options: &DumpOptions) -> Vec<(Syntax, String)> {
    let mut dumper = Dumper::new(file, options);
    dumper.write();
    dumper.finish()
}
