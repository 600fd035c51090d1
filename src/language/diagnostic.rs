use std::fmt;

use serde::Serialize;

use super::token::Position;
use super::version::RobotVersion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Things found wrong with the input. None of them stop a parse; they are
/// collected on the resulting RobotFile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Problem {
    UnknownSetting(String),
    UnknownLocalSetting(String),
    UnwantedArgument { setting: String, text: String },
    DeprecatedDeclaration { found: String, replacement: String },
    UnsupportedTable { name: String, since: RobotVersion },
    InvalidVariableDeclaration(String),
    DictionaryItemWithoutKey(String),
    MissingClosingBracket(String),
    DefinitionMissing,
    ContinuationWithoutElement,
    IllegalParserState(String),
}

impl Problem {
    pub fn severity(&self) -> Severity {
        match self {
            Problem::UnknownSetting(_) => Severity::Error,
            Problem::UnknownLocalSetting(_) => Severity::Error,
            Problem::UnwantedArgument { .. } => Severity::Warning,
            Problem::DeprecatedDeclaration { .. } => Severity::Warning,
            Problem::UnsupportedTable { .. } => Severity::Warning,
            Problem::InvalidVariableDeclaration(_) => Severity::Error,
            Problem::DictionaryItemWithoutKey(_) => Severity::Error,
            Problem::MissingClosingBracket(_) => Severity::Warning,
            Problem::DefinitionMissing => Severity::Error,
            Problem::ContinuationWithoutElement => Severity::Info,
            Problem::IllegalParserState(_) => Severity::Error,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Problem::UnknownSetting(name) => format!("unknown setting '{}'", name),
            Problem::UnknownLocalSetting(name) => format!("unknown setting '{}'", name),
            Problem::UnwantedArgument { setting, text } => {
                format!("unexpected value '{}' for {}", text, setting)
            }
            Problem::DeprecatedDeclaration { found, replacement } => {
                format!("'{}' is deprecated, use '{}'", found, replacement)
            }
            Problem::UnsupportedTable { name, since } => {
                format!("table '{}' requires version {}", name, since)
            }
            Problem::InvalidVariableDeclaration(text) => {
                format!("invalid variable declaration '{}'", text)
            }
            Problem::DictionaryItemWithoutKey(text) => {
                format!("dictionary item '{}' is not in key=value form", text)
            }
            Problem::MissingClosingBracket(text) => {
                format!("missing closing bracket in '{}'", text)
            }
            Problem::DefinitionMissing => "body line outside of any definition".to_string(),
            Problem::ContinuationWithoutElement => "nothing to continue".to_string(),
            Problem::IllegalParserState(detail) => format!("illegal parser state: {}", detail),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub problem: Problem,
    pub severity: Severity,
    pub position: Position,
}

impl Diagnostic {
    pub fn new(problem: Problem, position: Position) -> Diagnostic {
        Diagnostic {
            severity: problem.severity(),
            problem,
            position,
        }
    }

    pub fn offset(&self) -> usize {
        self.position
            .offset
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}: {}",
            self.position
                .line,
            self.position
                .column
                + 1,
            self.severity,
            self.problem
                .message()
        )
    }
}
