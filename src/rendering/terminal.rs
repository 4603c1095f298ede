//! Renderers for colourizing diagnostics in a terminal

use owo_colors::OwoColorize;

use super::{Render, Syntax};

/// Embellish fragments with ANSI escapes to create highlighting in
/// terminal output.
pub struct Terminal;

impl Render for Terminal {
    fn style(&self, syntax: Syntax, content: &str) -> String {
        match syntax {
            Syntax::Neutral => content.to_string(),
            Syntax::Newline => "\n".to_string(),
            Syntax::Error => content
                .bright_red()
                .to_string(),
            Syntax::Warning => content
                .yellow()
                .to_string(),
            Syntax::Problem => content
                .bold()
                .to_string(),
            Syntax::Location => content // #729fcf (light blue)
                .color(owo_colors::Rgb(0x72, 0x9f, 0xcf))
                .to_string(),
            Syntax::Gutter => content
                .bright_blue()
                .to_string(),
            Syntax::Caret => content
                .bright_red()
                .bold()
                .to_string(),
            Syntax::Code => content.to_string(),
            Syntax::Name => content // #3465a4 (blue) bold
                .color(owo_colors::Rgb(0x34, 0x65, 0xa4))
                .bold()
                .to_string(),
            Syntax::Keyword => content // #75507b (purple)
                .color(owo_colors::Rgb(0x75, 0x50, 0x7b))
                .bold()
                .to_string(),
        }
    }
}
