//! Reading and writing Robot Framework test data files, preserving the
//! original layout of every line that was not edited.

pub mod formatting;
pub mod language;
pub mod parsing;
mod regex;
pub mod rendering;
pub mod variables;
