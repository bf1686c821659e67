use std::borrow::Cow;
use studio_derive::studio_error;

#[studio_error]
pub enum SampleError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("There must be at least two groups{}", format_context(.context))]
    MinimumGroups { context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read_missing() -> Result<Vec<u8>, SampleError> {
    std::fs::read("/definitely/not/here.json").context("Reading settings")
}

#[test]
fn studio_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/studio_error_pass.rs");
}

#[test]
fn display_without_context_is_the_bare_message() {
    let err = SampleError::MinimumGroups { context: None };
    assert_eq!(err.to_string(), "There must be at least two groups");
    assert_eq!(err.kind(), "MinimumGroups");
}

#[test]
fn context_is_appended_in_parentheses() {
    let err: Result<(), SampleError> = Err(SampleError::MinimumGroups { context: None });
    let err = err.context("saving draft").unwrap_err();
    assert_eq!(err.to_string(), "There must be at least two groups (saving draft)");
}

#[test]
fn source_errors_convert_with_context() {
    let err = read_missing().unwrap_err();
    assert_eq!(err.kind(), "Io");
    assert!(err.to_string().starts_with("IO error (Reading settings): "));
}

#[test]
fn strings_fall_back_to_internal() {
    let err = SampleError::from(String::from("unexpected"));
    assert!(matches!(err, SampleError::Internal { .. }));
    assert_eq!(err.to_string(), "Internal error: unexpected");
}
