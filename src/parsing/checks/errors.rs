use super::definition::*;

/// Helper function to check that parsing fails with exactly the expected
/// error
fn expect_error(content: &str, expected: ParsingError) {
    match parse_definition(content) {
        Ok(case) => panic!(
            "Expected parsing to fail, but it succeeded with {:?} for input: {}",
            case, content
        ),
        Err(error) => assert_eq!(error, expected, "for input '{}'", content),
    }
}

#[test]
fn empty_source() {
    expect_error("", ParsingError::NoObjectDefinition);
    expect_error("\n\n   \n", ParsingError::NoObjectDefinition);
}

#[test]
fn only_functions() {
    expect_error(
        r#"
define function !!helper()
endfunction
        "#
        .trim_ascii(),
        ParsingError::NoObjectDefinition,
    );
}

#[test]
fn only_commented_object() {
    expect_error(
        r#"
$(
define object Gone
endobject
$)
        "#
        .trim_ascii(),
        ParsingError::NoObjectDefinition,
    );
}

#[test]
fn unterminated_comment_hides_everything() {
    expect_error(
        r#"
$( never closed
define object Gone
        "#
        .trim_ascii(),
        ParsingError::NoObjectDefinition,
    );
}

#[test]
fn two_objects() {
    expect_error(
        r#"
define object First
endobject
define object Second
endobject
        "#
        .trim_ascii(),
        ParsingError::MultipleObjectDefinitions(3, "Second".to_string()),
    );
}

#[test]
fn second_object_commented_out() {
    let case = parse_definition(
        r#"
define object First
endobject
$(
define object Second
endobject
$)
        "#
        .trim_ascii(),
    )
    .unwrap();

    assert_eq!(case.name(), "First");
}

#[test]
fn method_before_object() {
    expect_error(
        r#"
define method .testEarly(!a is PmlAssert)
endmethod
define object Late
endobject
        "#
        .trim_ascii(),
        ParsingError::MethodBeforeObject(1),
    );
}

#[test]
fn malformed_signatures() {
    expect_error(
        r#"
define object Broken
define method .testNoParens
        "#
        .trim_ascii(),
        ParsingError::MalformedSignature(2),
    );

    expect_error(
        r#"
define object Broken
define method .helper(!a is REAL, !b)
        "#
        .trim_ascii(),
        ParsingError::MalformedParameter(2, "!b".to_string()),
    );
}

#[test]
fn invalid_names() {
    expect_error(
        "define object my_suite",
        ParsingError::InvalidName(1, "my_suite".to_string()),
    );

    expect_error(
        r#"
define object Suite
define method .test_underscore(!a is PmlAssert)
        "#
        .trim_ascii(),
        ParsingError::InvalidName(2, "test_underscore".to_string()),
    );
}

#[test]
fn error_lines_and_messages() {
    assert_eq!(ParsingError::NoObjectDefinition.line(), None);
    assert_eq!(ParsingError::MethodBeforeObject(7).line(), Some(7));
    assert_eq!(
        ParsingError::MultipleObjectDefinitions(3, "B".to_string()).to_string(),
        "second object definition 'B' on line 3"
    );
    assert_eq!(
        ParsingError::MalformedParameter(2, "!x".to_string()).message(),
        "parameter '!x' has no type"
    );
}
