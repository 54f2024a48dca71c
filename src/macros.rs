//! Helper macros used across the crate.

/// Declare a lazily compiled [`Regex`] for a `static`.
///
/// Expands to `LazyLock::new(..)`, so the caller's module must import both
/// `LazyLock` and `Regex`. An invalid pattern panics on first use with
/// `$msg`; patterns built this way are fixed strings known to compile.
///
/// # Examples
///
/// ```
/// use std::sync::LazyLock;
///
/// use regex::Regex;
///
/// static TICKET: LazyLock<Regex> =
///     tagtext::lazy_regex!(r"\bTT-\d+\b", "ticket pattern regex should compile");
///
/// let tagged: Vec<_> = TICKET.find_iter("fixed TT-12, see TT-7").map(|m| m.as_str()).collect();
/// assert_eq!(tagged, ["TT-12", "TT-7"]);
/// ```
#[macro_export]
macro_rules! lazy_regex {
    ($pattern:expr, $msg:expr $(,)?) => {
        LazyLock::new(|| Regex::new($pattern).expect($msg))
    };
}
