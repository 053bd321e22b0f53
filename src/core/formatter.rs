//! Placeholder message formatting
//!
//! Substitutes `{}` markers in a pattern with positional arguments:
//!
//! ```
//! use rust_log_facade::core::formatter::format;
//!
//! let message = format("first {}, second {}, end {}.", &[&1, &2, &"x"]).unwrap();
//! assert_eq!(message, "first 1, second 2, end x.");
//! ```
//!
//! Extra placeholders are copied through untouched; extra arguments are an
//! error.

use super::error::{FacadeError, Result};
use std::fmt::{self, Display, Write};

/// The two-character marker substituted by [`format`]
pub const PLACEHOLDER: &str = "{}";

/// Render `pattern`, replacing the first `args.len()` placeholders in order.
///
/// Returns the pattern unchanged when `args` is empty. Fails with
/// [`FacadeError::FormatMismatch`] when the pattern runs out of placeholders
/// before the arguments run out.
pub fn format(pattern: &str, args: &[&dyn Display]) -> Result<String> {
    if args.is_empty() {
        return Ok(pattern.to_owned());
    }

    let mut out = String::with_capacity(pattern.len() + args.len() * 8);
    let mut rest = pattern;

    for (index, arg) in args.iter().enumerate() {
        let Some(at) = rest.find(PLACEHOLDER) else {
            return Err(FacadeError::format_mismatch(index, args.len()));
        };
        out.push_str(&rest[..at]);
        write!(out, "{}", arg).map_err(|_| FacadeError::FormatArgument { index })?;
        rest = &rest[at + PLACEHOLDER.len()..];
    }

    out.push_str(rest);
    Ok(out)
}

/// Strategy used by a log handle to render `pattern` + arguments
pub trait MessageFormatter: Send + Sync {
    fn format(&self, pattern: &str, args: &[&dyn Display]) -> Result<String>;
}

/// The `{}` substitution formatter used by every built-in backend
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderFormatter;

impl MessageFormatter for PlaceholderFormatter {
    #[inline]
    fn format(&self, pattern: &str, args: &[&dyn Display]) -> Result<String> {
        format(pattern, args)
    }
}

/// Displays `null` for an absent value
#[derive(Debug, Clone, Copy)]
pub struct OrNull<'a, T: ?Sized>(pub Option<&'a T>);

impl<T: Display + ?Sized> Display for OrNull<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => value.fmt(f),
            None => f.write_str("null"),
        }
    }
}

/// Wrap an optional argument so that `None` renders as `null`
///
/// ```
/// use rust_log_facade::core::formatter::{format, or_null};
///
/// let user: Option<&str> = None;
/// let message = format("user={}", &[&or_null(user.as_ref())]).unwrap();
/// assert_eq!(message, "user=null");
/// ```
pub fn or_null<T: Display + ?Sized>(value: Option<&T>) -> OrNull<'_, T> {
    OrNull(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitutes_in_order() {
        let first = 134334;
        let second = 12312312412_i64;
        let end = "next end";
        let actual = format("first {}, second {}, end {}.", &[&first, &second, &end]).unwrap();
        assert_eq!(actual, "first 134334, second 12312312412, end next end.");
    }

    #[test]
    fn test_no_args_returns_pattern() {
        assert_eq!(format("a {} b", &[]).unwrap(), "a {} b");
        assert_eq!(format("", &[]).unwrap(), "");
    }

    #[test]
    fn test_excess_placeholders_are_kept() {
        assert_eq!(format("{} {} {}", &[&1]).unwrap(), "1 {} {}");
    }

    #[test]
    fn test_excess_arguments_fail() {
        let err = format("{}", &[&1, &2]).unwrap_err();
        assert!(matches!(
            err,
            FacadeError::FormatMismatch {
                placeholders: 1,
                arguments: 2
            }
        ));

        let err = format("no markers here", &[&1]).unwrap_err();
        assert!(err.is_format_error());
    }

    #[test]
    fn test_adjacent_and_edge_placeholders() {
        assert_eq!(format("{}{}", &[&"a", &"b"]).unwrap(), "ab");
        assert_eq!(format("{}", &[&"only"]).unwrap(), "only");
        assert_eq!(format("x{}", &[&7]).unwrap(), "x7");
    }

    #[test]
    fn test_argument_text_is_not_rescanned() {
        // a substituted value containing a marker must not consume the next argument
        assert_eq!(format("{} and {}", &[&"{}", &2]).unwrap(), "{} and 2");
    }

    #[test]
    fn test_partial_markers_copied_verbatim() {
        assert_eq!(format("{ {x} }{}", &[&1]).unwrap(), "{ {x} }1");
    }

    #[test]
    fn test_null_rendering() {
        let missing: Option<&i32> = None;
        let present = Some(&5);
        let out = format("{} {}", &[&or_null(missing), &or_null(present)]).unwrap();
        assert_eq!(out, "null 5");
    }

    #[test]
    fn test_failing_display_is_reported() {
        struct Broken;
        impl Display for Broken {
            fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
                Err(fmt::Error)
            }
        }

        let err = format("a {} b {}", &[&1, &Broken]).unwrap_err();
        assert!(matches!(err, FacadeError::FormatArgument { index: 1 }));
    }

    #[test]
    fn test_unicode_pattern() {
        assert_eq!(format("héllo {} wörld", &[&"ñ"]).unwrap(), "héllo ñ wörld");
    }
}
