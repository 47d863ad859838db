//! Testing utilities for running various tests that might include
//! resources on the disk. This file primarily has the `generate_tests` macro
//! that will read a directory and generate various test cases from the provided
//! `case.sum` files and names of the directories that contain the cases.

use std::{
    env, fs, io, iter,
    path::{Path, PathBuf},
};

use convert_case::{Case, Casing};
use itertools::Itertools;
use proc_macro::TokenStream;
use quote::{format_ident, quote};
use regex::Regex;
use sumtype_testing_internal::metadata::{TestMetadata, parse_test_case_metadata};
use syn::{
    Expr,
    parse::{Parse, ParseStream},
    parse_macro_input,
    punctuated::Punctuated,
    token::Comma,
};

/// Struct representing parameter inputs to the [`generate_tests!`] proc macro.
#[derive(Debug)]
struct GenerateTestsInput {
    /// The entry point of the `ui_tests`
    path: String,
    /// What is the function that handles each test case.
    func: Expr,
    /// What pattern to use when matching for case files.
    test_pattern: String,

    /// prefix to use for when generating each test case.
    test_prefix: String,
}

impl Parse for GenerateTestsInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let parse_str_lit = |expr: &Expr| -> syn::Result<String> {
            let str_lit_err = || syn::Error::new_spanned(expr, "Expecting string literal");

            match expr {
                Expr::Lit(expr_lit) => match &expr_lit.lit {
                    syn::Lit::Str(str) => Ok(str.value()),
                    _ => Err(str_lit_err()),
                },
                _ => Err(str_lit_err()),
            }
        };

        let mut result = Punctuated::<Expr, Comma>::parse_terminated(input)?;
        let args_err = || syn::Error::new(input.span(), "Expecting four arguments to macro");

        let func = result.pop().ok_or_else(args_err)?;
        let test_prefix = result.pop().ok_or_else(args_err)?;
        let test_pattern = result.pop().ok_or_else(args_err)?;
        let path = result.pop().ok_or_else(args_err)?;

        if !result.is_empty() {
            return Err(args_err());
        }

        Ok(GenerateTestsInput {
            path: parse_str_lit(path.value())?,
            test_pattern: parse_str_lit(test_pattern.value())?,
            test_prefix: parse_str_lit(test_prefix.value())?,
            func: func.into_value(),
        })
    }
}

/// A detected case entry, which holds the path of the case file, and some
/// other metadata about the test case, such as whether the case should pass,
/// or which stage of the expansion it should run to.
#[derive(Debug, Clone)]
struct TestEntry {
    /// The path of the test
    path: PathBuf,

    /// Name of the file in snake case, only used to create
    /// the name of the unit test.
    snake_name: String,

    /// file metadata that is generated from checking the top of the file
    /// for any test case configuration settings
    metadata: TestMetadata,
}

/// Get the file name of a path without its extension.
fn file_stem(path: &Path) -> io::Result<&str> {
    path.file_stem().and_then(|stem| stem.to_str()).ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, format!("invalid file name: {path:?}"))
    })
}

/// Function to read a directory and extract all of the test cases within
/// the directory recursively. The function will collect all files that match
/// the specified `test_pattern`.
fn read_tests_from_dir(
    path: &Path,
    test_pattern: &Regex,
    base_name: Option<&str>,
) -> io::Result<Vec<TestEntry>> {
    let mut entries = vec![];

    for entry in path.read_dir()? {
        let entry = entry?;
        let path = entry.path();

        let entry_snake_name = file_stem(&path)?.to_case(Case::Snake);
        let snake_name =
            base_name.into_iter().chain(iter::once(entry_snake_name.as_str())).join("_");

        // Get the metadata for the current path...
        let entry_metadata = entry.metadata()?;

        // If this is a `directory`, then we recurse and perform
        // the same operation, otherwise if it is a file, then
        // we check if name matches the regex pattern and add it
        // to the entries if so...
        if entry_metadata.is_dir() {
            entries.extend(read_tests_from_dir(&path, test_pattern, Some(&snake_name))?);
        } else if entry_metadata.is_file()
            && test_pattern.is_match(&entry.file_name().to_string_lossy())
        {
            let metadata = parse_test_case_metadata(&path).unwrap_or_default();
            entries.push(TestEntry { path, snake_name, metadata });
        }
    }

    Ok(entries)
}

/// Generate test cases based on a directory structure.
///
/// Test cases are generated based on a given test folder path (see `TEST_DIR`
/// below). Each generated test corresponds to the full path of each "wanted"
/// (see `TEST_PATTERN` below) leaf node of the test folder structure, converted
/// to snake case. For example, for a file path `validate/duplicate_name/
/// case.sum`, a test function named `ui_test_validate_duplicate_name_case`
/// will be generated.
///
/// The format of this macro is as follows:
/// ```ignore
/// generate_tests!(TEST_DIR, TEST_PATTERN, FN_PREFIX, TEST_FN);
/// ```
///
/// - `TEST_DIR` must be a string literal path, relative to the manifest of the
///   crate in which the macro is invoked, which is the root directory of the
///   test folder structure (whose name is not included in the test function
///   names).
///
/// - `TEST_PATTERN` must be a string literal regular expression, which should
///   match the file names of the leaf nodes of the test folder structure.
///
/// - `FN_PREFIX` is a unique prefix for the generated function in case the
///   macro is used more than once in a single file.
///
/// - `TEST_FN` must be an expression of type `fn(TestingInput)`. Every
///   generated test case body will invoke this function with the appropriate
///   [`TestingInput`](sumtype_testing_internal::TestingInput).
#[proc_macro]
pub fn generate_tests(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as GenerateTestsInput);
    let test_func = input.func;

    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(error) => {
            let message = format!("cannot locate the test directory: {error}");
            return quote!(::core::compile_error!(#message);).into();
        }
    };

    let file_path = match fs::canonicalize(manifest_dir.join(&input.path)) {
        Ok(path) => path,
        Err(error) => {
            let message = format!("cannot read test directory `{}`: {error}", input.path);
            return quote!(::core::compile_error!(#message);).into();
        }
    };

    let test_pattern = match Regex::new(&input.test_pattern) {
        Ok(pattern) => pattern,
        Err(error) => {
            let message = format!("invalid test pattern: {error}");
            return quote!(::core::compile_error!(#message);).into();
        }
    };

    let mut entries = match read_tests_from_dir(&file_path, &test_pattern, None) {
        Ok(entries) => entries,
        Err(error) => {
            let message = format!("cannot read test cases: {error}");
            return quote!(::core::compile_error!(#message);).into();
        }
    };
    entries.sort_by_cached_key(|entry| entry.path.to_owned());

    // Compute the test parameters from each entry
    let paths = entries.iter().map(|entry| entry.path.to_string_lossy().into_owned());
    let filenames = entries
        .iter()
        .map(|entry| file_stem(&entry.path).map(str::to_owned).unwrap_or_default());
    let case_metadata = entries.iter().map(|entry| entry.metadata);

    // Create the test names from the provided prefix and the computed `snake_name`
    let test_names = entries
        .iter()
        .map(|entry| format_ident!("{}_test_{}", input.test_prefix, entry.snake_name));

    // Create the tests
    let output = quote! {
        #(
            #[test]
            fn #test_names() {
                use sumtype_emit::Stage;
                use sumtype_testing_internal::metadata::{TestMetadata, TestResult};

                #test_func(TestingInput {
                    path: #paths.into(),
                    filename: #filenames.into(),
                    metadata: #case_metadata,
                });
            }
        )*
    };

    output.into()
}
