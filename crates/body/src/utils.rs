//! Utility macros shared by the decoders.

/// Returns early with an error if a condition is not met.
///
/// Like `assert!`, but yields `Err($error)` from the enclosing function instead of panicking.
///
/// ```ignore
/// ensure!(size <= max_size, DecodeError::too_large_body(size, max_size));
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;
