use corefcheck_core::{ValidationError, ValidationErrorCode};
use rstest::rstest;

#[rstest]
#[case(
    ValidationError::MissingMention { mention: "e4".to_owned() },
    ValidationErrorCode::MissingMention,
    "COREFCHECK_MISSING_MENTION",
)]
#[case(
    ValidationError::DuplicateIdentifier { identifier: "m1".to_owned() },
    ValidationErrorCode::DuplicateIdentifier,
    "COREFCHECK_DUPLICATE_IDENTIFIER",
)]
fn returns_expected_validation_code(
    #[case] error: ValidationError,
    #[case] expected: ValidationErrorCode,
    #[case] rendered: &str,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().as_str(), rendered);
    assert_eq!(expected.to_string(), rendered);
}

#[test]
fn missing_mention_message_names_the_mention() {
    let error = ValidationError::MissingMention {
        mention: "e4".to_owned(),
    };
    assert_eq!(
        error.to_string(),
        "cluster contains mention `e4` that is not in the mention list"
    );
}
