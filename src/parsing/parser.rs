//! The line driver: feeds each line's tokens through the mapper chain of the
//! table it is in, and keeps track of sections, continuations and which
//! lines belong to no element.

use tracing::debug;

use crate::language::{
    BodyItem, Definition, DefinitionKind, Eol, ExecutableRow, Line, LineElement, Problem,
    RobotFile, RobotVersion, Section, SectionKind, SeparatorKind, SettingKind, TokenId, TokenType,
};
use crate::parsing::lexer::{self, Lexed, LexedLine};
use crate::parsing::mappers::{declaration_state, definition_kind, MapperRegistry, TableKind};
use crate::parsing::recognizers::{self, TableName};
use crate::parsing::scope::{ParsingStack, ParsingState};
use crate::variables::extract;

/// Version from which `*** Tasks ***` and `*** Comments ***` are tables.
const TASKS_AND_COMMENTS: RobotVersion = RobotVersion::new(3, 1);

/// Version from which `*** Metadata ***` is reported as deprecated.
const METADATA_DEPRECATED: RobotVersion = RobotVersion::new(3, 0);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    /// Version of Robot Framework the data is written for
    pub version: RobotVersion,
    /// Tag cells using variables and warn about unclosed brackets in them
    pub analyze_variables: bool,
}

impl Default for ParserOptions {
    fn default() -> ParserOptions {
        ParserOptions {
            version: RobotVersion::default(),
            analyze_variables: true,
        }
    }
}

struct Parser {
    file: RobotFile,
    registry: MapperRegistry,
    stack: ParsingStack,
    /// what a `...` line continues; None when there is nothing to continue
    saved: Option<ParsingStack>,
    /// definitions in the table before the current section began
    definitions_before: usize,
    analyze_variables: bool,
}

impl Parser {
    fn new(options: &ParserOptions) -> Parser {
        let mut file = RobotFile::new(options.version);
        file.sections
            .push(Section {
                kind: SectionKind::Preamble,
                header: None,
                lines: 0..0,
                trivia: Vec::new(),
            });

        let mut stack = ParsingStack::new();
        stack.reset(ParsingState::Trash);

        Parser {
            file,
            registry: MapperRegistry::for_version(&options.version),
            stack,
            saved: None,
            definitions_before: 0,
            analyze_variables: options.analyze_variables,
        }
    }

    fn push_line(&mut self, lexed: LexedLine, offset: usize, eol: Eol) -> usize {
        let mut elements = Vec::with_capacity(
            lexed
                .elements
                .len(),
        );
        for element in lexed.elements {
            match element {
                Lexed::Cell(token) => {
                    let id = self
                        .file
                        .push_token(token);
                    elements.push(LineElement::Token(id));
                }
                Lexed::Separator(separator) => elements.push(LineElement::Separator(separator)),
            }
        }

        let index = self
            .file
            .lines
            .len();
        self.file
            .lines
            .push(Line {
                number: index + 1,
                offset,
                style: lexed.style,
                elements,
                eol,
                continuation: lexed.continuation,
                indented: lexed.indented,
            });
        index
    }

    fn section(&mut self) -> Option<&mut Section> {
        self.file
            .sections
            .last_mut()
    }

    fn section_kind(&self) -> SectionKind {
        self.file
            .sections
            .last()
            .map_or(SectionKind::Preamble, |section| section.kind)
    }

    fn trivia(&mut self, index: usize) {
        if let Some(section) = self.section() {
            section
                .trivia
                .push(index);
        }
    }

    /// Tokens on a line other than layout, in order.
    fn data(&self, index: usize) -> Vec<TokenId> {
        self.file
            .lines[index]
            .tokens()
            .filter(|id| {
                !self
                    .file
                    .token(*id)
                    .is_structural()
            })
            .collect()
    }

    /// The first cell of a line, if it opens a table. Pipe lines may have
    /// their leading pipe in front of it.
    fn header_cell(&self, index: usize) -> Option<TokenId> {
        let line = &self
            .file
            .lines[index];

        let first = match line.elements.first() {
            Some(LineElement::Separator(_)) if line.style == SeparatorKind::Pipe => {
                line.elements
                    .get(1)
            }
            other => other,
        };

        match first {
            Some(LineElement::Token(id))
                if recognizers::is_table_header(
                    self.file
                        .text(*id),
                ) =>
            {
                Some(*id)
            }
            _ => None,
        }
    }

    fn open_section(&mut self, index: usize, header: TokenId) {
        if let Some(section) = self.section() {
            section
                .lines
                .end = index;
        }

        let text = self
            .file
            .text(header)
            .to_string();
        let position = self
            .file
            .token(header)
            .position();
        let version = self
            .file
            .version;
        let modern = version.is_newer_or_equal(&TASKS_AND_COMMENTS);

        let kind = match recognizers::table_name(&text) {
            TableName::Settings => SectionKind::Settings,
            TableName::Metadata => {
                if version.is_newer_or_equal(&METADATA_DEPRECATED) {
                    let problem = Problem::DeprecatedDeclaration {
                        found: text.clone(),
                        replacement: "*** Settings ***".to_string(),
                    };
                    self.file
                        .report(problem, position);
                }
                SectionKind::Settings
            }
            TableName::Variables => SectionKind::Variables,
            TableName::TestCases => SectionKind::TestCases,
            TableName::Keywords => SectionKind::Keywords,
            TableName::Tasks if modern => SectionKind::Tasks,
            TableName::Comments if modern => SectionKind::Comments,
            TableName::Tasks | TableName::Comments => {
                let problem = Problem::UnsupportedTable {
                    name: text.clone(),
                    since: TASKS_AND_COMMENTS,
                };
                self.file
                    .report(problem, position);
                SectionKind::UserTable
            }
            TableName::Other => SectionKind::UserTable,
        };

        debug!("{:?} table at line {}", kind, index + 1);

        // header cells after the name are column titles
        self.file
            .token_mut(header)
            .tag(kind.header_tag());
        for id in self.data(index) {
            if id != header
                && !self
                    .file
                    .token(id)
                    .is_comment()
            {
                self.file
                    .token_mut(id)
                    .tag(TokenType::TableHeaderColumn);
            }
        }

        let state = match kind {
            SectionKind::Settings => ParsingState::SettingTable,
            SectionKind::Variables => ParsingState::VariableTable,
            SectionKind::TestCases | SectionKind::Tasks => ParsingState::TestCaseTable,
            SectionKind::Keywords => ParsingState::KeywordTable,
            _ => ParsingState::Trash,
        };
        self.stack
            .reset(state);
        self.saved = None;

        if kind == SectionKind::Tasks {
            self.file
                .test_cases
                .tasks = true;
        }
        self.definitions_before = match definition_kind(&self.stack) {
            Some(definition) => self
                .file
                .table(definition)
                .len(),
            None => 0,
        };

        self.file
            .sections
            .push(Section {
                kind,
                header: Some(index),
                lines: index..index + 1,
                trivia: Vec::new(),
            });
    }

    fn definition_open(&self, kind: DefinitionKind) -> bool {
        self.file
            .table(kind)
            .len()
            > self.definitions_before
    }

    /// The stack as it stands at the start of a body line of the open
    /// definition.
    fn body_stack(&self, kind: DefinitionKind) -> ParsingStack {
        let mut stack = self
            .stack
            .clone();
        stack.truncate_to_table();
        stack.push(declaration_state(kind));
        stack
    }

    fn take_line(&mut self, index: usize) {
        if let Some(header) = self.header_cell(index) {
            self.open_section(index, header);
            return;
        }

        if self
            .section_kind()
            .is_verbatim()
        {
            return;
        }

        let table = match self
            .stack
            .table()
            .and_then(TableKind::of)
        {
            Some(table) => table,
            None => return,
        };
        let definitions = definition_kind(&self.stack);
        let open = definitions.map_or(false, |kind| self.definition_open(kind));

        let data = self.data(index);
        let commented = data
            .first()
            .map_or(false, |id| {
                self.file
                    .token(*id)
                    .is_comment()
            });

        if self
            .file
            .is_blank_line(index)
            || commented
        {
            match definitions {
                Some(kind) if open => {
                    let item = if commented {
                        BodyItem::Row(ExecutableRow {
                            action: None,
                            arguments: Vec::new(),
                            comment: data,
                        })
                    } else {
                        BodyItem::Blank(index)
                    };
                    if let Some(definition) = self
                        .file
                        .last_definition_mut(kind)
                    {
                        definition
                            .body
                            .push(item);
                    }
                    self.saved = Some(self.body_stack(kind));
                }
                _ => {
                    self.trivia(index);
                    self.saved = None;
                }
            }
            return;
        }

        let line = &self
            .file
            .lines[index];
        let (continuation, indented) = (line.continuation, line.indented);

        if continuation {
            match self
                .saved
                .take()
            {
                Some(saved) => self.stack = saved.without_comments(),
                None => {
                    let position = data
                        .first()
                        .and_then(|id| {
                            self.file
                                .token(*id)
                                .position()
                        });
                    self.file
                        .report(Problem::ContinuationWithoutElement, position);
                    self.trivia(index);
                    return;
                }
            }
        } else {
            self.stack
                .truncate_to_table();

            if let (true, Some(kind)) = (indented, definitions) {
                if open {
                    self.stack
                        .push(declaration_state(kind));
                } else {
                    let position = data
                        .first()
                        .and_then(|id| {
                            self.file
                                .token(*id)
                                .position()
                        });
                    self.file
                        .report(Problem::DefinitionMissing, position);
                    self.trivia(index);
                    self.saved = None;
                    return;
                }
            }
        }

        let mut claimed = 0;
        for id in data.iter() {
            match self
                .registry
                .find(table, &self.stack, &self.file, *id)
            {
                Some(mapper) => {
                    mapper.map(&mut self.stack, &mut self.file, *id);
                    claimed += 1;
                }
                None => {
                    debug!("no mapper for token at line {}", index + 1);
                    self.file
                        .unclaimed
                        .push(*id);
                    let position = self
                        .file
                        .token(*id)
                        .position();
                    self.file
                        .report(
                            Problem::IllegalParserState(format!(
                                "no mapper for {:?}",
                                self.stack
                                    .current()
                            )),
                            position,
                        );
                }
            }
        }

        // a line holding nothing the model took is still kept in place
        if claimed == 0 {
            self.trivia(index);
        }

        if self.analyze_variables {
            self.analyze(&data);
        }

        self.saved = Some(
            self.stack
                .clone(),
        );
    }

    /// Mark cells that use variables, and warn about brackets left open.
    fn analyze(&mut self, data: &[TokenId]) {
        for id in data {
            let token = self
                .file
                .token(*id);
            if token.is_comment()
                || matches!(
                    token.kind(),
                    TokenType::VariablesScalarDeclaration
                        | TokenType::VariablesListDeclaration
                        | TokenType::VariablesDictionaryDeclaration
                        | TokenType::VariablesUnknownDeclaration
                )
            {
                continue;
            }

            let structure = extract(token.text());
            let position = token.position();

            if structure.has_variables() {
                self.file
                    .token_mut(*id)
                    .tag(TokenType::VariableUsage);
            }
            for _ in structure.warnings() {
                let problem = Problem::MissingClosingBracket(
                    structure
                        .text()
                        .to_string(),
                );
                self.file
                    .report(problem, position);
            }
        }
    }

    fn finish(mut self) -> RobotFile {
        let total = self
            .file
            .lines
            .len();
        if let Some(section) = self.section() {
            section
                .lines
                .end = total;
        }

        mark_template_arguments(&mut self.file);

        // a file starting with a table has no preamble
        self.file
            .sections
            .retain(|section| {
                section.kind != SectionKind::Preamble
                    || !section
                        .lines
                        .is_empty()
            });

        let file = self.file;
        debug!(
            "Found {} section{}",
            file.sections
                .len(),
            if file
                .sections
                .len()
                == 1
            {
                ""
            } else {
                "s"
            }
        );
        debug!(
            "{} test case{}, {} keyword{}",
            file.test_cases
                .len(),
            if file
                .test_cases
                .len()
                == 1
            {
                ""
            } else {
                "s"
            },
            file.keywords
                .len(),
            if file
                .keywords
                .len()
                == 1
            {
                ""
            } else {
                "s"
            }
        );
        if !file
            .diagnostics
            .is_empty()
        {
            debug!("diagnostics: {}", file.diagnostics.len());
        }

        file
    }
}

/// Whether the rows of a test case are arguments to a template keyword. A
/// `[Template]` of its own overrides the suite's `Test Template`, and a
/// template named `NONE` turns templating off.
fn is_templated(file: &RobotFile, definition: &Definition) -> bool {
    let mut local = definition
        .templates()
        .peekable();

    let name = if local
        .peek()
        .is_some()
    {
        local.find_map(|setting| setting.keyword_name())
    } else {
        file.settings
            .keyword_settings(SettingKind::TestTemplate)
            .and_then(|templates| {
                templates
                    .iter()
                    .find_map(|template| template.keyword)
            })
    };

    name.map_or(false, |id| {
        let name = file
            .text(id)
            .trim();
        !name.is_empty() && !name.eq_ignore_ascii_case("none")
    })
}

/// Under a template the cells of a row are the template's arguments rather
/// than a keyword call. Loop headers and `END` keep their roles, as does
/// the `\` opening a loop body row.
fn mark_template_arguments(file: &mut RobotFile) {
    let tag = if file
        .test_cases
        .tasks
    {
        TokenType::TaskTemplateArgument
    } else {
        TokenType::TestCaseTemplateArgument
    };

    let mut arguments = Vec::new();
    for definition in &file
        .test_cases
        .definitions
    {
        if !is_templated(file, definition) {
            continue;
        }
        for row in definition.rows() {
            let action = match row.action {
                Some(action) => file.token(action),
                None => continue,
            };
            if action.has_type(TokenType::ForToken) || action.has_type(TokenType::ForEndToken) {
                continue;
            }
            if !action.has_type(TokenType::ForContinueToken)
                && !action.has_type(TokenType::ForWithEndContinuation)
            {
                arguments.extend(row.action);
            }
            arguments.extend_from_slice(&row.arguments);
        }
    }

    if !arguments.is_empty() {
        debug!("{} template arguments", arguments.len());
    }
    for id in arguments {
        file.token_mut(id)
            .tag(tag);
    }
}

/// Parse test data. Never fails; what can't be understood is reported in the
/// result's diagnostics and kept for writing back.
pub fn parse(content: &str, options: &ParserOptions) -> RobotFile {
    let (bom, body, base) = match content.strip_prefix('\u{feff}') {
        Some(rest) => (true, rest, '\u{feff}'.len_utf8()),
        None => (false, content, 0),
    };

    let mut parser = Parser::new(options);
    parser
        .file
        .bom = bom;

    for raw in lexer::split_lines(body, base) {
        let number = parser
            .file
            .lines
            .len()
            + 1;
        let lexed = lexer::split_line(number, raw.offset, raw.text);
        let index = parser.push_line(lexed, raw.offset, raw.eol);
        parser.take_line(index);
    }

    parser.finish()
}
