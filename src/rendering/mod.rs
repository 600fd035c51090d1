//! Output backends for highlighted test data

mod terminal;

pub use terminal::Terminal;
