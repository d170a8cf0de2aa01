use super::*;

#[test]
fn messages_are_single_sentences() {
    let err = MockupError::invalid_viewport("insets leave no screen area");
    assert_eq!(
        err.to_string(),
        "invalid viewport: insets leave no screen area"
    );

    let err = MockupError::frame_not_found("iPhone 16 - Black - Portrait");
    assert_eq!(err.to_string(), "frame not found: iPhone 16 - Black - Portrait");
}

#[test]
fn anyhow_errors_pass_through_transparently() {
    let err: MockupError = anyhow::anyhow!("boom").into();
    assert_eq!(err.to_string(), "boom");
    assert!(matches!(err, MockupError::Other(_)));
}
