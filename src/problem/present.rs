use std::borrow::Cow;

use crate::rendering::{render, Fragments, Render, Syntax};
use crate::stack::{PmlError, StackFrame};

/// Present an error raised by PML code: the message, then each frame of
/// the stack trace with its call site and, where the host marked one, a
/// caret under the failing column.
pub fn present_error(error: &PmlError, renderer: &dyn Render) -> String {
    let mut fragments: Fragments = vec![
        (Syntax::Error, Cow::Borrowed("error")),
        (Syntax::Neutral, Cow::Borrowed(": ")),
        (Syntax::Problem, Cow::Borrowed(error.message())),
    ];

    let trace = error.stack_trace();
    if trace.is_empty() {
        fragments.push((Syntax::Newline, Cow::Borrowed("")));
        fragments.push((Syntax::Warning, Cow::Borrowed("    (no stack information)")));
    }

    for frame in trace {
        fragments.push((Syntax::Newline, Cow::Borrowed("")));
        present_frame(frame, &mut fragments);
    }

    render(renderer, fragments)
}

fn present_frame<'i>(frame: &'i StackFrame, fragments: &mut Fragments<'i>) {
    let entry = frame.entry_point();

    fragments.push((Syntax::Neutral, Cow::Borrowed("  ")));
    fragments.push((Syntax::Keyword, Cow::Borrowed("at")));
    fragments.push((Syntax::Neutral, Cow::Borrowed(" ")));
    fragments.push((Syntax::Name, Cow::Owned(entry.to_string())));
    fragments.push((
        Syntax::Neutral,
        Cow::Owned(format!(" line {}", frame.line_number())),
    ));

    if let Some(file) = entry.file_name() {
        fragments.push((Syntax::Newline, Cow::Borrowed("")));
        fragments.push((Syntax::Gutter, Cow::Borrowed("    --> ")));
        fragments.push((
            Syntax::Location,
            Cow::Owned(format!("{}:{}", file.to_string_lossy(), frame.line_number())),
        ));
    }

    fragments.push((Syntax::Newline, Cow::Borrowed("")));
    fragments.push((Syntax::Gutter, Cow::Borrowed("     | ")));
    fragments.push((Syntax::Code, Cow::Borrowed(frame.call_site())));

    if frame.column_number() > 0 {
        fragments.push((Syntax::Newline, Cow::Borrowed("")));
        fragments.push((Syntax::Gutter, Cow::Borrowed("     | ")));
        fragments.push((
            Syntax::Neutral,
            Cow::Owned(" ".repeat(frame.column_number())),
        ));
        fragments.push((Syntax::Caret, Cow::Borrowed("^")));
    }
}
