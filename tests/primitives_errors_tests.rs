#![cfg(feature = "dev")]

use meshfree_accumulate::internals::primitives::errors::MeshfreeError;

#[test]
fn test_meshfree_error_display() {
    // MismatchedLengths
    let err = MeshfreeError::MismatchedLengths {
        what: "kernels",
        got: 3,
        expected: 5,
    };
    assert_eq!(
        format!("{}", err),
        "Length mismatch: kernels has 3 entries, expected 5"
    );

    // UnsupportedDimension
    let err = MeshfreeError::UnsupportedDimension(4);
    assert_eq!(
        format!("{}", err),
        "Unsupported dimension: 4 (must be 1, 2 or 3)"
    );

    // MissingOperator
    let err = MeshfreeError::MissingOperator;
    assert_eq!(
        format!("{}", err),
        "Operator regression requires an operator"
    );

    // MissingParameter
    let err = MeshfreeError::MissingParameter("smoothing");
    assert_eq!(format!("{}", err), "Missing required parameter: smoothing");

    // IndexOutOfBounds
    let err = MeshfreeError::IndexOutOfBounds {
        what: "source",
        index: 7,
        len: 4,
    };
    assert_eq!(
        format!("{}", err),
        "Index out of bounds: source index 7 (len 4)"
    );

    // InvalidOperatorData
    let err = MeshfreeError::InvalidOperatorData("bad domain".to_string());
    assert_eq!(format!("{}", err), "Invalid operator data: bad domain");

    // InvalidSmoothing
    let err = MeshfreeError::InvalidSmoothing("negative".to_string());
    assert_eq!(format!("{}", err), "Invalid smoothing: negative");

    // InvalidOwnedCount
    let err = MeshfreeError::InvalidOwnedCount { owned: 5, total: 3 };
    assert_eq!(
        format!("{}", err),
        "Invalid owned count: 5 (must not exceed 3 particles)"
    );

    // DuplicateParameter
    let err = MeshfreeError::DuplicateParameter { parameter: "basis" };
    assert_eq!(
        format!("{}", err),
        "Parameter 'basis' was set more than once"
    );
}

#[test]
fn test_meshfree_error_is_std_error() {
    fn assert_error<E: std::error::Error>(_: &E) {}
    assert_error(&MeshfreeError::MissingOperator);
}
