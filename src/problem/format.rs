use std::borrow::Cow;
use std::path::Path;

use crate::language::LoadingError;
use crate::parsing::ParsingError;
use crate::rendering::{render, Fragments, Render, Syntax};

/// Format a parsing error with full details including the offending line
/// of source, when there is one.
pub fn full_parsing_error(
    error: &ParsingError,
    filename: &Path,
    source: &str,
    renderer: &dyn Render,
) -> String {
    let mut fragments: Fragments = vec![
        (Syntax::Error, Cow::Borrowed("error")),
        (Syntax::Neutral, Cow::Borrowed(": ")),
        (Syntax::Problem, Cow::Owned(error.message())),
        (Syntax::Newline, Cow::Borrowed("")),
    ];

    let line = match error.line() {
        Some(line) => line,
        None => {
            fragments.push((
                Syntax::Location,
                Cow::Owned(
                    filename
                        .to_string_lossy()
                        .to_string(),
                ),
            ));
            return render(renderer, fragments);
        }
    };

    let code = source
        .lines()
        .nth(line - 1)
        .unwrap_or("?");
    let width = 3.max(
        line.to_string()
            .len(),
    );

    fragments.push((
        Syntax::Location,
        Cow::Owned(format!("{}:{}", filename.to_string_lossy(), line)),
    ));
    fragments.push((Syntax::Newline, Cow::Borrowed("")));
    fragments.push((Syntax::Newline, Cow::Borrowed("")));
    fragments.push((Syntax::Neutral, Cow::Owned(format!("{:width$} ", ' '))));
    fragments.push((Syntax::Gutter, Cow::Borrowed("|")));
    fragments.push((Syntax::Newline, Cow::Borrowed("")));
    fragments.push((Syntax::Gutter, Cow::Owned(format!("{:>width$}", line))));
    fragments.push((Syntax::Neutral, Cow::Borrowed(" ")));
    fragments.push((Syntax::Gutter, Cow::Borrowed("|")));
    fragments.push((Syntax::Neutral, Cow::Borrowed(" ")));
    fragments.push((Syntax::Code, Cow::Owned(code.to_string())));
    fragments.push((Syntax::Newline, Cow::Borrowed("")));
    fragments.push((Syntax::Neutral, Cow::Owned(format!("{:width$} ", ' '))));
    fragments.push((Syntax::Gutter, Cow::Borrowed("|")));

    render(renderer, fragments)
}

/// Format a parsing error with concise single-line output
pub fn concise_parsing_error(error: &ParsingError, filename: &Path, renderer: &dyn Render) -> String {
    let location = match error.line() {
        Some(line) => format!("{}:{}", filename.to_string_lossy(), line),
        None => filename
            .to_string_lossy()
            .to_string(),
    };

    let fragments: Fragments = vec![
        (Syntax::Error, Cow::Borrowed("error")),
        (Syntax::Neutral, Cow::Borrowed(": ")),
        (Syntax::Location, Cow::Owned(location)),
        (Syntax::Neutral, Cow::Borrowed(" ")),
        (Syntax::Problem, Cow::Owned(error.message())),
    ];

    render(renderer, fragments)
}

/// Format a LoadingError with concise single-line output
pub fn concise_loading_error(error: &LoadingError<'_>, renderer: &dyn Render) -> String {
    let mut fragments: Fragments = vec![
        (Syntax::Error, Cow::Borrowed("error")),
        (Syntax::Neutral, Cow::Borrowed(": ")),
        (
            Syntax::Location,
            Cow::Owned(
                error
                    .filename
                    .to_string_lossy()
                    .to_string(),
            ),
        ),
        (Syntax::Neutral, Cow::Borrowed(" ")),
        (Syntax::Problem, Cow::Borrowed(error.problem.as_str())),
    ];

    if !error
        .details
        .is_empty()
    {
        fragments.push((Syntax::Neutral, Cow::Owned(format!(" ({})", error.details))));
    }

    render(renderer, fragments)
}

#[cfg(test)]
mod check {
    use super::*;
    use crate::rendering::Identity;

    #[test]
    fn concise() {
        let error = ParsingError::MethodBeforeObject(4);
        let result = concise_parsing_error(&error, Path::new("broken.pmlobj"), &Identity);
        assert_eq!(result, "error: broken.pmlobj:4 method defined outside an object");

        let error = ParsingError::NoObjectDefinition;
        let result = concise_parsing_error(&error, Path::new("empty.pmlobj"), &Identity);
        assert_eq!(result, "error: empty.pmlobj no object definition found");
    }

    #[test]
    fn full_details() {
        let source = "define object A\nendobject\ndefine object B\n";
        let error = ParsingError::MultipleObjectDefinitions(3, "B".to_string());

        let result = full_parsing_error(&error, Path::new("two.pmlobj"), source, &Identity);
        assert_eq!(
            result,
            r#"
error: more than one object defined, 'B' is extra
two.pmlobj:3

    |
  3 | define object B
    |"#
            .trim_start_matches('\n')
        );
    }

    #[test]
    fn full_without_line() {
        let error = ParsingError::NoObjectDefinition;
        let result = full_parsing_error(&error, Path::new("none.pmlobj"), "", &Identity);
        assert_eq!(result, "error: no object definition found\nnone.pmlobj");
    }

    #[test]
    fn loading() {
        let error = LoadingError {
            problem: "File not found".to_string(),
            details: String::new(),
            filename: Path::new("missing.pmlobj"),
        };
        assert_eq!(
            concise_loading_error(&error, &Identity),
            "error: missing.pmlobj File not found"
        );
    }
}
