use super::definition::*;

fn trim(s: &str) -> &str {
    s.strip_prefix('\n')
        .unwrap_or(s)
}

#[test]
fn object_name() {
    let case = parse_definition(trim(
        r#"
define object SampleTest
endobject
        "#,
    ))
    .unwrap();

    assert_eq!(case.name(), "SampleTest");
    assert!(case.is_empty());
    assert!(!case.has_set_up());
    assert!(!case.has_tear_down());
}

#[test]
fn object_keyword_spacing_and_case() {
    let case = parse_definition("   DEFINE    Object\tMixedCase  -- trailing comment\n").unwrap();
    assert_eq!(case.name(), "MixedCase");
}

#[test]
fn classifying_methods() {
    let case = parse_definition(trim(
        r#"
define object ArithmeticTest
    member .value is REAL
endobject

define method .ArithmeticTest()
endmethod

define method .setUp()
    !this.value = 1
endmethod

define method .tearDown()
endmethod

define method .testAddition(!assert is PmlAssert)
    !assert.equal(2, !this.value + 1)
endmethod

define method .testWrongType(!assert is REAL)
endmethod

define method .testTooMany(!assert is PmlAssert, !other is PmlAssert)
endmethod

define method .helper()
endmethod

define method .TESTSubtraction(!a IS pmlassert)
endmethod
        "#,
    ))
    .unwrap();

    assert_eq!(case.name(), "ArithmeticTest");
    assert!(case.has_set_up());
    assert!(case.has_tear_down());

    let names: Vec<&str> = case
        .test_names()
        .collect();
    assert_eq!(names, vec!["testAddition", "TESTSubtraction"]);
}

#[test]
fn argument_name_irrelevant() {
    let one = parse_definition("define object A\ndefine method .testFoo(!a is PmlAssert)").unwrap();
    let two =
        parse_definition("define object A\ndefine method .testFoo(!whatever is PmlAssert)").unwrap();

    assert_eq!(one, two);
    assert_eq!(one.len(), 1);
}

#[test]
fn digits_and_accents_in_names() {
    let case = parse_definition("define object 9Lives\n").unwrap();
    assert_eq!(case.name(), "9Lives");

    let case = parse_definition("define object A\ndefine method .testÄpfel(!a is PmlAssert)\n")
        .unwrap();
    assert_eq!(case.len(), 1);
    assert_eq!(
        case.test_names()
            .collect::<Vec<_>>(),
        vec!["testÄpfel"]
    );
}

#[test]
fn set_up_with_parameters_ignored() {
    let case = parse_definition(trim(
        r#"
define object Fixture
define method .setUp(!x is REAL)
endmethod
define method .tearDown(!x is REAL)
endmethod
        "#,
    ))
    .unwrap();

    assert!(!case.has_set_up());
    assert!(!case.has_tear_down());
}

#[test]
fn duplicate_tests_collapse() {
    let case = parse_definition(trim(
        r#"
define object Twice
define method .testSame(!a is PmlAssert)
endmethod
define method .TestSAME(!a is PmlAssert)
endmethod
        "#,
    ))
    .unwrap();

    assert_eq!(case.len(), 1);
    assert_eq!(case.tests()[0].name(), "testSame");
}

#[test]
fn commented_out_definitions() {
    let case = parse_definition(trim(
        r#"
$(
define object OldTest
define method .testOld(!a is PmlAssert)
endmethod
$)
define object NewTest
endobject
$(  define method .testHidden(!a is PmlAssert)
    define object Hidden
    still hidden $) define method .testAlsoHidden(!a is PmlAssert)
define method .testVisible(!a is PmlAssert)
endmethod
        "#,
    ))
    .unwrap();

    assert_eq!(case.name(), "NewTest");
    let names: Vec<&str> = case
        .test_names()
        .collect();
    assert_eq!(names, vec!["testVisible"]);
}

#[test]
fn single_line_comment_block() {
    let case = parse_definition(trim(
        r#"
$( a comment that closes here $)
define object Inline
define method .testIt(!a is PmlAssert)
endmethod
        "#,
    ))
    .unwrap();

    assert_eq!(case.name(), "Inline");
    assert_eq!(case.len(), 1);
}

#[test]
fn comment_must_start_line() {
    // an opening marker that is not at the start of the line does not
    // begin a comment
    let case = parse_definition(trim(
        r#"
define object Marker
!x = '$('
define method .testAfter(!a is PmlAssert)
endmethod
        "#,
    ))
    .unwrap();

    assert_eq!(case.len(), 1);
}

#[test]
fn state_transitions() {
    let mut parser = Parser::new();
    assert_eq!(parser.state, State::Scanning);

    parser
        .read_line("  $( opening")
        .unwrap();
    assert_eq!(parser.state, State::InComment);

    parser
        .read_line("define object Ignored")
        .unwrap();
    assert_eq!(parser.state, State::InComment);

    parser
        .read_line("closing $)")
        .unwrap();
    assert_eq!(parser.state, State::Scanning);
    assert_eq!(parser.line, 3);

    assert_eq!(parser.finish(), Err(ParsingError::NoObjectDefinition));
}

#[test]
fn signatures() {
    let signature = parse_signature(1, "testFoo(!a is PmlAssert)").unwrap();
    assert_eq!(signature.name, "testFoo");
    assert_eq!(
        signature.parameters,
        vec![Parameter {
            type_name: "PmlAssert"
        }]
    );

    let signature = parse_signature(1, "helper()").unwrap();
    assert_eq!(signature.name, "helper");
    assert!(signature
        .parameters
        .is_empty());

    let signature = parse_signature(1, "mixed( !a is REAL , !b Is STRING ) is BOOLEAN").unwrap();
    assert_eq!(signature.name, "mixed");
    assert_eq!(
        signature.parameters,
        vec![
            Parameter { type_name: "REAL" },
            Parameter {
                type_name: "STRING"
            }
        ]
    );

    assert_eq!(
        parse_signature(4, "noParens"),
        Err(ParsingError::MalformedSignature(4))
    );
    assert_eq!(
        parse_signature(5, "unclosed(!a is REAL"),
        Err(ParsingError::MalformedSignature(5))
    );
    assert_eq!(
        parse_signature(6, "untyped(!a)"),
        Err(ParsingError::MalformedParameter(6, "!a".to_string()))
    );
}

#[test]
fn classification() {
    let check = |text: &str| classify(&parse_signature(1, text).unwrap());

    assert_eq!(check("testFoo(!a is PmlAssert)"), Classification::Test);
    assert_eq!(check("TestFoo(!a is PMLASSERT)"), Classification::Test);
    assert_eq!(check("test(!a is PmlAssert)"), Classification::Test);
    assert_eq!(check("testFoo(!a is Real)"), Classification::Ignored);
    assert_eq!(check("testFoo()"), Classification::Ignored);
    assert_eq!(check("fooTest(!a is PmlAssert)"), Classification::Ignored);
    assert_eq!(check("setUp()"), Classification::SetUp);
    assert_eq!(check("SETUP()"), Classification::SetUp);
    assert_eq!(check("tearDown()"), Classification::TearDown);
    assert_eq!(check("teardown(!a is PmlAssert)"), Classification::Ignored);
    assert_eq!(check("helper()"), Classification::Ignored);
}

#[test]
fn reading_from_stream() {
    let source = "define object Streamed\r\ndefine method .testOne(!a is PmlAssert)\r\nendmethod\r\n";
    let case = parse_reader(std::io::Cursor::new(source)).unwrap();

    assert_eq!(case.name(), "Streamed");
    assert_eq!(case.len(), 1);
}

#[test]
fn parsing_is_repeatable() {
    let source = trim(
        r#"
define object Again
define method .setUp()
endmethod
define method .testA(!a is PmlAssert)
endmethod
        "#,
    );

    let first = parse_definition(source).unwrap();
    let second = parse_definition(source).unwrap();
    assert_eq!(first, second);
}

#[test]
fn windows_code_page_sources() {
    use super::decode_windows_1252;

    // 0x93 and 0x94 are curly quotes, 0xC4 is the same as in Latin-1
    let bytes = b"define object Quoted\n$( \x93\xC4pfel\x94 \x80 $)\n";
    let content = decode_windows_1252(bytes);

    assert_eq!(content, "define object Quoted\n$( \u{201C}Äpfel\u{201D} € $)\n");
    assert_eq!(
        parse_definition(&content)
            .unwrap()
            .name(),
        "Quoted"
    );

    // undefined positions in the code page pass through
    assert_eq!(decode_windows_1252(b"\x81\x9D"), "\u{0081}\u{009D}");
}
