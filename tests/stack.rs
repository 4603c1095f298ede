#[cfg(test)]
mod stack {
    use std::path::Path;

    use pmlunit::host::{HostOutcome, HostValue};
    use pmlunit::language::ArgumentError;
    use pmlunit::resolving::{EntryPointKind, FileMap, IndexResolver, SimpleResolver};
    use pmlunit::stack::{PmlError, StackError, StackFrame};

    const MESSAGE: &str = "(44,33) FNF:File not found";
    const LINE_A: &str = "In line 2 of PML function calculatortest.testAdd";
    const SITE_A: &str = "!assert.equal(4, !this.calculator.^^add(2, 2))";
    const LINE_B: &str = "Called from line 30 of Macro C:\\pmlunit\\run.pmlmac";
    const SITE_B: &str = "!suite.testAdd(!assert)";

    #[test]
    fn five_lines_two_frames() {
        let error = PmlError::from_list(&[MESSAGE, LINE_A, SITE_A, LINE_B, SITE_B])
            .unwrap()
            .unwrap();

        assert_eq!(error.message(), MESSAGE);

        let frames = error
            .stack_trace()
            .frames();
        assert_eq!(frames.len(), 2);

        let expected_a = StackFrame::parse(LINE_A, SITE_A, &SimpleResolver).unwrap();
        let expected_b = StackFrame::parse(LINE_B, SITE_B, &SimpleResolver).unwrap();
        assert_eq!(frames[0], expected_a);
        assert_eq!(frames[1], expected_b);

        assert_eq!(
            frames[1]
                .entry_point()
                .kind(),
            EntryPointKind::Macro
        );
        assert_eq!(
            frames[1]
                .entry_point()
                .name(),
            "C:\\pmlunit\\run.pmlmac"
        );
    }

    #[test]
    fn frame_round_trip() {
        let frame = StackFrame::parse(LINE_A, SITE_A, &SimpleResolver).unwrap();
        assert_eq!(frame.to_string(), format!("{}\n{}", LINE_A, SITE_A));

        let frame = StackFrame::parse(LINE_B, SITE_B, &SimpleResolver).unwrap();
        assert_eq!(frame.column_number(), 0);
        assert_eq!(frame.to_string(), format!("{}\n{}", LINE_B, SITE_B));
    }

    #[test]
    fn sentinel_means_no_frames() {
        let error = PmlError::from_list(&[
            MESSAGE,
            " *** Unable to show stack",
            " *** Stack information missing",
        ])
        .unwrap()
        .unwrap();

        assert_eq!(error.message(), MESSAGE);
        assert!(error
            .stack_trace()
            .is_empty());
    }

    #[test]
    fn even_lengths_are_malformed() {
        for count in [2, 4, 6] {
            let lines: Vec<&str> = [MESSAGE, LINE_A, SITE_A, LINE_B, SITE_B, LINE_A]
                .into_iter()
                .take(count)
                .collect();

            assert_eq!(
                PmlError::from_list(&lines),
                Err(StackError::Argument(ArgumentError::UnpairedStackLines(count)))
            );
        }
    }

    #[test]
    fn resolving_through_library() {
        let index = FileMap::load(Path::new("tests/library")).unwrap();
        let resolver = IndexResolver::new(index);

        let error = PmlError::from_list_with(&[MESSAGE, LINE_A, SITE_A], &resolver)
            .unwrap()
            .unwrap();

        let entry = error.stack_trace()[0].entry_point();
        assert_eq!(entry.kind(), EntryPointKind::Method);
        assert_eq!(
            entry.file_name(),
            Some(Path::new("tests/library/objects/calculatortest.pmlobj"))
        );
    }

    #[test]
    fn host_outcomes() {
        let table = vec![
            (2.0, HostValue::String(LINE_A.to_string())),
            (1.0, HostValue::String(MESSAGE.to_string())),
            (3.0, HostValue::String(SITE_A.to_string())),
        ];

        let error = HostOutcome::Raised(table)
            .into_error()
            .unwrap()
            .unwrap();
        assert_eq!(error.message(), MESSAGE);
        assert_eq!(
            error
                .stack_trace()
                .len(),
            1
        );

        assert_eq!(HostOutcome::Returned.into_error(), Ok(None));
    }
}
