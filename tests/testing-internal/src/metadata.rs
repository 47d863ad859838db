//! Contains a file metadata builder which is able
//! to parse metadata about a unit test based on the
//! first line of input within the test.

use std::{
    fs,
    io::{self, BufRead, BufReader},
    path::Path,
};

use itertools::{Itertools, peek_nth};
use proc_macro2::TokenStream;
use quote::{ToTokens, format_ident, quote};
use sumtype_emit::Stage;

/// Whether the expansion of the case should succeed or fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestResult {
    /// The expansion should fail and produce diagnostics. If no diagnostics
    /// are produced by the stage, this means that the test did not fail.
    Fail,
    /// The expansion should not produce any diagnostics.
    Pass,
}

/// Metadata about a specific test case, derived from the
/// comment at the top of the file if any... if no comment
/// is found, or parsing the comment fails, then the
/// default [TestMetadata] is assumed which means two things:
///
/// - The test should succeed
///
/// - The test runs the entire expansion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestMetadata {
    /// The stage the expansion should reach before stopping.
    pub stage: Stage,
    /// How should the test complete, pass or fail.
    pub completion: TestResult,
}

impl Default for TestMetadata {
    fn default() -> Self {
        Self { stage: Stage::Emit, completion: TestResult::Pass }
    }
}

impl ToTokens for TestResult {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        match self {
            TestResult::Fail => tokens.extend(quote!(TestResult::Fail)),
            TestResult::Pass => tokens.extend(quote!(TestResult::Pass)),
        }
    }
}

impl ToTokens for TestMetadata {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let TestMetadata { stage, completion } = *self;

        // Convert the stage into the `tokenised` stage...
        let stage = format_ident!("{}", format!("{stage:?}"));

        tokens.extend(quote!(TestMetadata { completion: #completion, stage: Stage::#stage }))
    }
}

#[derive(Debug, Default)]
pub struct TestMetadataBuilder {
    /// Stage that the test should run to
    stage: Option<Stage>,

    /// Whether the test is expected to pass or fail.
    completion: Option<TestResult>,
}

impl TestMetadataBuilder {
    /// Create a new [TestMetadataBuilder]
    pub fn new() -> Self {
        Self { stage: None, completion: None }
    }

    /// Add a stage value to the test.
    pub fn with_stage(&mut self, stage: Stage) -> &mut Self {
        self.stage = Some(stage);
        self
    }

    /// Add a `completion` value to the test.
    pub fn with_completion(&mut self, completion: TestResult) -> &mut Self {
        self.completion = Some(completion);
        self
    }

    /// Build the [TestMetadata], defaulting to the specified defaults
    /// for any missing property.
    pub fn build(&mut self) -> TestMetadata {
        let TestMetadata { stage, completion } = TestMetadata::default();

        TestMetadata {
            completion: self.completion.unwrap_or(completion),
            stage: self.stage.unwrap_or(stage),
        }
    }
}

/// Parse the [TestMetadata] from the first line of a case, which holds comma
/// separated key value pairs in a comment like so:
///
/// ```ignore
/// // run=fail, stage=validate
/// Broken { A, A }
/// ```
///
/// From the above example, this function will produce a [TestMetadata] that
/// specifies that this test should `fail` and should only run up until
/// [Stage::Validate].
pub fn parse_metadata_line(line: &str) -> TestMetadata {
    if !line.starts_with("//") {
        return TestMetadata::default();
    }

    let mut builder = TestMetadataBuilder::new();

    // Turn the line into chars, strip all white-spaces and start after `//`
    let mut source = peek_nth(line.chars().filter(|c| !c.is_whitespace()).skip(2));

    // Continue eating `key=value` pairs until we reach the end of the input
    while source.peek().is_some() {
        // Try and parse a key...
        let key = source.take_while_ref(|c| *c != '=').collect::<String>();

        // Parse the `=`
        source.next_if_eq(&'=');

        // Parse the `value` of the key
        let value = source.take_while_ref(|c| *c != ',').collect::<String>();

        match key.as_str() {
            "run" => {
                let value = match value.as_str() {
                    "fail" => TestResult::Fail,
                    // We always default `pass` here
                    _ => TestResult::Pass,
                };

                builder.with_completion(value);
            }
            // We always default to `emit` here
            "stage" => {
                builder.with_stage(value.parse().unwrap_or(Stage::Emit));
            }
            _ => break,
        }

        // Parse an optional comma `,`
        source.next_if_eq(&',');
    }

    builder.build()
}

/// Read the first line of the case at the given path and parse the
/// [TestMetadata] from it, see [parse_metadata_line].
pub fn parse_test_case_metadata(path: &Path) -> Result<TestMetadata, io::Error> {
    let file = fs::File::open(path)?;

    let mut buffer = BufReader::new(file);
    let mut config = String::new();
    let _ = buffer.read_line(&mut config)?;

    Ok(parse_metadata_line(&config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_metadata() {
        let metadata = parse_metadata_line("// run=fail, stage=validate\n");
        assert_eq!(metadata, TestMetadata { stage: Stage::Validate, completion: TestResult::Fail });
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let metadata = parse_metadata_line("// stage=parse");
        assert_eq!(metadata, TestMetadata { stage: Stage::Parse, completion: TestResult::Pass });

        assert_eq!(parse_metadata_line("Foo { A }"), TestMetadata::default());
    }

    #[test]
    fn test_unknown_stage_is_emit() {
        let metadata = parse_metadata_line("// run=fail,stage=typecheck");
        assert_eq!(metadata, TestMetadata { stage: Stage::Emit, completion: TestResult::Fail });
    }

    #[test]
    fn test_metadata_tokens() {
        let metadata = TestMetadata { stage: Stage::Parse, completion: TestResult::Fail };
        assert_eq!(
            quote!(#metadata).to_string(),
            "TestMetadata { completion : TestResult :: Fail , stage : Stage :: Parse }"
        );
    }
}
