// Path: crates/test_utils/src/assertions/mod.rs
//! Result assertions for service and keeper tests.

/// Unwraps a successful result, panicking with the error otherwise.
/// Extra arguments are formatted into the panic message.
#[macro_export]
macro_rules! assert_ok {
    ($result:expr $(,)?) => {
        $crate::assert_ok!($result, "operation failed")
    };
    ($result:expr, $($context:tt)+) => {
        match $result {
            Ok(value) => value,
            Err(err) => panic!("{}: expected success, got {:?}", format_args!($($context)+), err),
        }
    };
}

/// Unwraps a failed result into its error, panicking if it succeeded.
/// Extra arguments are formatted into the panic message.
#[macro_export]
macro_rules! assert_err {
    ($result:expr $(,)?) => {
        $crate::assert_err!($result, "operation succeeded")
    };
    ($result:expr, $($context:tt)+) => {
        match $result {
            Err(err) => err,
            Ok(value) => panic!("{}: expected an error, got {:?}", format_args!($($context)+), value),
        }
    };
}

/// Expects a `TransactionError::Vesting` whose inner error matches `$pattern`,
/// and yields that inner `VestingError`.
#[macro_export]
macro_rules! assert_vesting_err {
    ($result:expr, $pattern:pat) => {
        match $result {
            Err($crate::__types::error::TransactionError::Vesting(err)) => {
                assert!(matches!(err, $pattern), "wrong vesting error: {:?}", err);
                err
            }
            other => panic!("expected a vesting error, got {:?}", other),
        }
    };
}
