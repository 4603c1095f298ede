//! Output generation for the pmlunit CLI application

use serde::Serialize;
use tinytemplate::TinyTemplate;
use tracing::debug;

use crate::discovery::Discovery;

static TEMPLATE: &'static str = r#"{{ for suite in suites }}{suite.name} ({suite.count} test{{ if suite.plural }}s{{ endif }}{{ if suite.set_up }}, setUp{{ endif }}{{ if suite.tear_down }}, tearDown{{ endif }})
{{ for test in suite.tests }}    {test}
{{ endfor }}{{ endfor }}{{ if has_skipped }}
Skipped:
{{ for skip in skipped }}    {skip.filename}: {skip.reason}
{{ endfor }}{{ endif }}
{suite_count} suite{{ if suites_plural }}s{{ endif }}, {test_count} test{{ if tests_plural }}s{{ endif }}, {skipped_count} skipped
"#;

#[derive(Serialize)]
struct Suite {
    name: String,
    count: usize,
    plural: bool,
    set_up: bool,
    tear_down: bool,
    tests: Vec<String>,
}

#[derive(Serialize)]
struct Skip {
    filename: String,
    reason: String,
}

#[derive(Serialize)]
struct Context {
    suites: Vec<Suite>,
    skipped: Vec<Skip>,
    has_skipped: bool,
    suite_count: usize,
    suites_plural: bool,
    test_count: usize,
    tests_plural: bool,
    skipped_count: usize,
}

impl Context {
    fn from(discovery: &Discovery) -> Context {
        let suites: Vec<Suite> = discovery
            .suites
            .iter()
            .map(|case| Suite {
                name: case
                    .name()
                    .to_string(),
                count: case.len(),
                plural: case.len() != 1,
                set_up: case.has_set_up(),
                tear_down: case.has_tear_down(),
                tests: case
                    .test_names()
                    .map(str::to_string)
                    .collect(),
            })
            .collect();

        let skipped: Vec<Skip> = discovery
            .skipped
            .iter()
            .map(|skip| Skip {
                filename: skip
                    .filename
                    .to_string_lossy()
                    .to_string(),
                reason: skip
                    .reason
                    .clone(),
            })
            .collect();

        let test_count = discovery.test_count();

        Context {
            has_skipped: !skipped.is_empty(),
            suite_count: suites.len(),
            suites_plural: suites.len() != 1,
            test_count,
            tests_plural: test_count != 1,
            skipped_count: skipped.len(),
            suites,
            skipped,
        }
    }
}

/// Render a summary of the suites found by a discovery run.
pub fn report(discovery: &Discovery) -> Result<String, tinytemplate::error::Error> {
    let mut tt = TinyTemplate::new();
    tt.set_default_formatter(&tinytemplate::format_unescaped);
    tt.add_template("report", TEMPLATE)?;

    let context = Context::from(discovery);
    let rendered = tt.render("report", &context)?;

    debug!(bytes = rendered.len(), "Rendered report");
    Ok(rendered)
}

#[cfg(test)]
mod check {
    use super::*;
    use crate::discovery::Skipped;
    use crate::language::TestCaseBuilder;
    use std::path::PathBuf;

    #[test]
    fn reporting() {
        let mut builder = TestCaseBuilder::new("SampleTest").unwrap();
        builder
            .add_test("testOne")
            .unwrap()
            .add_test("testTwo")
            .unwrap();
        builder.set_up(true);

        let mut single = TestCaseBuilder::new("Single").unwrap();
        single
            .add_test("testOnly")
            .unwrap();

        let discovery = Discovery {
            suites: vec![builder.build(), single.build()],
            skipped: vec![Skipped {
                filename: PathBuf::from("/lib/broken.pmlobj"),
                reason: "no object definition found".to_string(),
            }],
            ..Default::default()
        };

        let result = report(&discovery).unwrap();
        assert_eq!(
            result,
            r#"SampleTest (2 tests, setUp)
    testOne
    testTwo
Single (1 test)
    testOnly

Skipped:
    /lib/broken.pmlobj: no object definition found

2 suites, 3 tests, 1 skipped
"#
        );
    }

    #[test]
    fn reporting_nothing() {
        let result = report(&Discovery::default()).unwrap();
        assert_eq!(result, "\n0 suites, 0 tests, 0 skipped\n");
    }
}
