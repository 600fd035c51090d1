// Types representing Robot Framework test data

mod cases;
mod diagnostic;
mod document;
mod element;
mod error;
mod line;
mod settings;
mod token;
mod variables;
mod version;

// Re-export all public symbols
pub use cases::*;
pub use diagnostic::*;
pub use document::*;
pub use element::{Element, Slot};
pub use error::*;
pub use line::*;
pub use settings::*;
pub use token::*;
pub use variables::*;
pub use version::*;
