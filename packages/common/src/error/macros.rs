//! Macros for error creation and handling

/// Build an [`Error`](crate::Error) from a constructor name and an optional
/// format string used as context.
///
/// `err!(configuration, "max_depth must be non-zero")`
#[doc(hidden)]
#[macro_export]
macro_rules! err {
    ($kind:ident) => {
        $crate::error::Error::$kind()
    };
    ($kind:ident, $($arg:tt)+) => {
        $crate::error::Error::$kind().context(format!($($arg)+))
    };
}

/// Return early with an error built by [`err!`]
#[doc(hidden)]
#[macro_export]
macro_rules! bail {
    ($($arg:tt)+) => {
        return Err($crate::err!($($arg)+))
    };
}

/// Return early with an error built by [`err!`] unless the condition holds
#[doc(hidden)]
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            $crate::bail!($($arg)+);
        }
    };
}
