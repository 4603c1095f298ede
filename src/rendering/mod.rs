//! Renderers for colourizing diagnostics

use std::borrow::Cow;

mod terminal;

pub use terminal::Terminal;

/// Types of content that can be rendered with different styles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    Neutral, // default
    Error,
    Warning,
    Problem,
    Location,
    Gutter,
    Caret,
    Code,
    Name,
    Keyword,
    Newline,
}

/// Trait for different rendering backends (the no-op no-markup one, ANSI
/// escapes for terminal colouring)
pub trait Render {
    /// Render content with the specified type/style
    fn style(&self, syntax: Syntax, content: &str) -> String;
}

/// Returns content unchanged, with no markup applied
pub struct Identity;

impl Render for Identity {
    fn style(&self, syntax: Syntax, content: &str) -> String {
        match syntax {
            Syntax::Newline => "\n".to_string(),
            _ => content.to_string(),
        }
    }
}

/// Fragments are built in one pass as (Syntax tag, String) pairs, then the
/// renderer is applied to each pair to produce the final String.
pub type Fragments<'i> = Vec<(Syntax, Cow<'i, str>)>;

pub fn render(renderer: &dyn Render, fragments: Fragments<'_>) -> String {
    let mut output = String::new();

    for (syntax, content) in fragments {
        let rendered = renderer.style(syntax, &content);
        output.push_str(&rendered);
    }

    output
}

#[cfg(test)]
mod check {
    use super::*;

    #[test]
    fn identity_passes_through() {
        let fragments: Fragments = vec![
            (Syntax::Error, Cow::Borrowed("error")),
            (Syntax::Neutral, Cow::Borrowed(": ")),
            (Syntax::Problem, Cow::Owned("oops".to_string())),
            (Syntax::Newline, Cow::Borrowed("")),
        ];

        assert_eq!(render(&Identity, fragments), "error: oops\n");
    }
}
