//! Runtime substitution of transformed arguments into a format string.
//!
//! Every `{...}` placeholder takes the next argument in order; whatever sits
//! between the braces is ignored because arguments are already strings.
//! `{{` and `}}` produce literal braces.

/// Rendered in place of a placeholder that has no argument left.
pub const MISSING: &str = "{!missing}";

/// Substitute `args` into `format`. Never fails: missing arguments render as
/// [`MISSING`] and surplus ones are appended as `{!extra: a, b}`.
pub fn render<S: AsRef<str>>(format: &str, args: &[S]) -> String {
    let arg_len: usize = args.iter().map(|a| a.as_ref().len()).sum();
    let mut out = String::with_capacity(format.len() + arg_len);
    let mut next = args.iter();
    let mut chars = format.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut closed = false;
                let mut spec = String::new();
                for inner in chars.by_ref() {
                    if inner == '}' {
                        closed = true;
                        break;
                    }
                    spec.push(inner);
                }
                if !closed {
                    // Unterminated placeholder is kept as text.
                    out.push('{');
                    out.push_str(&spec);
                    continue;
                }
                match next.next() {
                    Some(arg) => out.push_str(arg.as_ref()),
                    None => out.push_str(MISSING),
                }
            }
            other => out.push(other),
        }
    }

    let extra: Vec<&str> = next.map(AsRef::as_ref).collect();
    if !extra.is_empty() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str("{!extra: ");
        out.push_str(&extra.join(", "));
        out.push('}');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_substitution() {
        assert_eq!(render("a={} b={:?}", &["1", "\"x\""]), "a=1 b=\"x\"");
    }

    #[test]
    fn test_escaped_braces() {
        assert_eq!(render("{{}} {}", &["v"]), "{} v");
    }

    #[test]
    fn test_missing_and_extra() {
        assert_eq!(render("{} {}", &["only"]), "only {!missing}");
        assert_eq!(render("req:", &["a", "b"]), "req: {!extra: a, b}");
        assert_eq!(render("", &["a"]), "{!extra: a}");
    }

    #[test]
    fn test_unterminated_placeholder_is_literal() {
        assert_eq!(render("oops {", &["x"]), "oops { {!extra: x}");
    }
}
