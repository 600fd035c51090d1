//! parser for Robot Framework test data

use std::path::Path;
use tracing::debug;

use crate::language::LoadingError;

pub mod lexer;
pub mod mappers;
mod parser;
pub mod recognizers;
pub mod scope;

pub use parser::{parse, ParserOptions};

/// Read a file and return an owned String. The RobotFile parsed from it
/// copies what it needs, so the content can be dropped afterwards.
pub fn load(filename: &Path) -> Result<String, LoadingError<'_>> {
    match std::fs::read_to_string(filename) {
        Ok(content) => Ok(content),
        Err(error) => {
            debug!(?error);
            match error.kind() {
                std::io::ErrorKind::NotFound => Err(LoadingError {
                    problem: "File not found".to_string(),
                    details: String::new(),
                    filename,
                }),
                std::io::ErrorKind::InvalidData => Err(LoadingError {
                    problem: "Not UTF-8 text".to_string(),
                    details: String::new(),
                    filename,
                }),
                _ => Err(LoadingError {
                    problem: "Failed reading".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename,
                }),
            }
        }
    }
}
