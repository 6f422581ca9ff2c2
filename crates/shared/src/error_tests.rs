use super::*;
use rstest::rstest;

#[rstest]
#[case(AppError::NotFound("x".into()), 2, "NOT_FOUND")]
#[case(AppError::Validation("x".into()), 3, "VALIDATION_ERROR")]
#[case(AppError::BusinessRule("x".into()), 4, "BUSINESS_RULE_VIOLATION")]
#[case(AppError::Conflict("x".into()), 5, "CONFLICT")]
#[case(AppError::Database("x".into()), 1, "DATABASE_ERROR")]
#[case(AppError::Configuration("x".into()), 78, "CONFIGURATION_ERROR")]
#[case(AppError::Internal("x".into()), 1, "INTERNAL_ERROR")]
fn test_error_codes(#[case] err: AppError, #[case] exit: i32, #[case] code: &str) {
    assert_eq!(err.exit_code(), exit);
    assert_eq!(err.error_code(), code);
}

#[test]
fn test_error_display() {
    assert_eq!(
        AppError::NotFound("campaign 1".into()).to_string(),
        "Not found: campaign 1"
    );
    assert_eq!(
        AppError::BusinessRule("msg".into()).to_string(),
        "Business rule violation: msg"
    );
    assert_eq!(
        AppError::Configuration("msg".into()).to_string(),
        "Configuration error: msg"
    );
}

#[test]
fn test_config_error_maps_to_configuration() {
    let err: AppError = config::ConfigError::NotFound("database.url".into()).into();
    assert!(matches!(err, AppError::Configuration(_)));
}
