//! Serializing test data back to text

mod dumper;
mod renderer;
mod syntax;

// Re-export all public symbols
pub use dumper::{dump_fragments, DumpOptions, SeparatorStyle};
pub use renderer::*;
pub use syntax::*;
