//! Turning fragments into output text

use crate::formatting::dumper::{dump_fragments, DumpOptions};
use crate::formatting::{Identity, Render, Syntax};
use crate::language::RobotFile;

/// Write a file back out as plain text. Whatever was not edited comes out
/// exactly as it was read.
pub fn dump(file: &RobotFile) -> String {
    dump_with(file, &DumpOptions::default())
}

pub fn dump_with(file: &RobotFile, options: &DumpOptions) -> String {
    render(&Identity, file, options)
}

/// We write the file out in two passes. First the model and retained lines
/// become a Vec of "fragments" (Syntax tag, String pairs). Then the given
/// renderer is applied to each pair to produce embellished output.
pub fn render(renderer: &impl Render, file: &RobotFile, options: &DumpOptions) -> String {
    // Pass 1: model to tagged fragments
    let fragments = dump_fragments(file, options);

    // Pass 2: tagged fragments to final output
    render_to_string(renderer, fragments)
}

fn render_to_string(renderer: &impl Render, fragments: Vec<(Syntax, String)>) -> String {
    let mut output = String::new();

    for (syntax, content) in fragments {
        let rendered = renderer.style(syntax, &content);
        output.push_str(&rendered);
    }

    output
}
