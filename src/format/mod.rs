//! Argument formatting for `*f` log calls.
//!
//! # Data Flow
//! ```text
//! format string + [LogArg]
//!     → arg.rs (each LogArg → display string)
//!         Request   → http::RequestSnapshot (consume-and-restore) → JSON
//!         Callable  → signature.rs "func(<params>) (<returns>)"
//!         Reference → "nil pointer" or JSON of the target
//!         Value     → JSON
//!     → template.rs (substitute strings into the format string)
//!     → message handed to the engine
//! ```
//!
//! # Design Decisions
//! - Argument kinds are a closed enum chosen by the caller, no runtime inspection
//! - Every step is total; failures become inline diagnostics

pub mod arg;
pub mod signature;
pub mod template;

pub use arg::{FormatFailure, JsonArg, LogArg, NIL_POINTER};
pub use signature::{FnSignature, Signature};

/// Transform each argument, in order.
pub fn transform_all<'a>(args: impl IntoIterator<Item = LogArg<'a>>) -> Vec<String> {
    args.into_iter().map(LogArg::transform).collect()
}

/// Transform `args` and substitute them into `format`.
pub fn format_message<'a>(format: &str, args: impl IntoIterator<Item = LogArg<'a>>) -> String {
    template::render(format, &transform_all(args))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lengths_match() {
        let n = 5;
        let out = transform_all([
            LogArg::value(&n),
            LogArg::reference::<i32>(None),
            LogArg::callable(&|| 1u8),
        ]);
        assert_eq!(out, vec!["5", "nil pointer", "func() (u8)"]);
    }

    #[test]
    fn test_format_message() {
        let name = String::from("worker-1");
        assert_eq!(
            format_message("started {} with {}", [LogArg::value(&name), LogArg::value(&3)]),
            r#"started "worker-1" with 3"#
        );
    }
}
