//! Renderers for colourizing Robot Framework test data

use owo_colors::OwoColorize;

use crate::formatting::*;

/// Embellish fragments with ANSI escapes to create syntax highlighting in
/// terminal output.
pub struct Terminal;

impl Render for Terminal {
    fn style(&self, syntax: Syntax, content: &str) -> String {
        match syntax {
            Syntax::Neutral => content.to_string(),
            Syntax::Newline => content.to_string(),
            Syntax::Separator => content.to_string(),
            Syntax::Header => content // markup.heading - #75507b (purple) bold
                .color(owo_colors::Rgb(0x75, 0x50, 0x7b))
                .bold()
                .to_string(),
            Syntax::Declaration => content // keyword.other.setting - #8f5902 (brown) bold
                .color(owo_colors::Rgb(0x8f, 0x59, 0x02))
                .bold()
                .to_string(),
            Syntax::Definition => content // entity.name.function - #3465a4 (blue) bold
                .color(owo_colors::Rgb(0x34, 0x65, 0xa4))
                .bold()
                .to_string(),
            Syntax::Invocation => content // meta.function-call
                .color(owo_colors::Rgb(0x3b, 0x5d, 0x7d))
                .to_string(),
            Syntax::Variable => content // variable.parameter - #729fcf (light blue) bold
                .color(owo_colors::Rgb(0x72, 0x9f, 0xcf))
                .bold()
                .to_string(),
            Syntax::Comment => content // comment - #999999 (grey)
                .color(owo_colors::Rgb(0x99, 0x99, 0x99))
                .to_string(),
            Syntax::Continuation => content // punctuation.separator.continuation
                .color(owo_colors::Rgb(0x99, 0x99, 0x99))
                .bold()
                .to_string(),
            Syntax::Keyword => content // keyword.control - #75507b (purple) bold
                .color(owo_colors::Rgb(0x75, 0x50, 0x7b))
                .bold()
                .to_string(),
            Syntax::Unwanted => content // invalid - #cc0000 (red) bold
                .color(owo_colors::Rgb(204, 0, 0))
                .bold()
                .to_string(),
        }
    }
}

#[cfg(test)]
mod check {
    use super::*;

    #[test]
    fn basic_handling() {
        let result = Render::style(&Terminal, Syntax::Neutral, "Log    hello");
        assert_eq!(result, "Log    hello");
    }

    #[test]
    fn layout_is_never_styled() {
        assert_eq!(Render::style(&Terminal, Syntax::Separator, "    "), "    ");
        assert_eq!(Render::style(&Terminal, Syntax::Newline, "\r\n"), "\r\n");
        assert_ne!(
            Render::style(&Terminal, Syntax::Header, "*** Settings ***"),
            "*** Settings ***"
        );
    }
}
