//! Function signatures for callable arguments.
//!
//! Callables are never serialized. Their parameter and return types are read
//! from the type system and rendered as `func(<params>) (<returns>)`.

use std::any::type_name;
use std::fmt;

/// Parameter and return type names of a callable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub params: Vec<String>,
    pub returns: Vec<String>,
}

impl Signature {
    /// Signature of the callable `f`. The value itself is never called.
    pub fn of<F, Args, Ret>(_f: &F) -> Self
    where
        F: FnSignature<Args, Ret>,
    {
        F::signature()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "func({}) ({})",
            self.params.join(", "),
            self.returns.join(", ")
        )
    }
}

/// Implemented for every `FnOnce` up to eight parameters.
///
/// `Args` is the parameter tuple; it only exists so each arity gets its own
/// impl and is inferred at the call site.
pub trait FnSignature<Args, Ret> {
    fn signature() -> Signature;
}

macro_rules! impl_fn_signature {
    ($($param:ident),*) => {
        impl<Func, Ret, $($param,)*> FnSignature<($($param,)*), Ret> for Func
        where
            Func: FnOnce($($param),*) -> Ret,
        {
            fn signature() -> Signature {
                Signature {
                    params: vec![$(short_type_name(type_name::<$param>())),*],
                    returns: return_types(type_name::<Ret>()),
                }
            }
        }
    };
}

impl_fn_signature!();
impl_fn_signature!(A1);
impl_fn_signature!(A1, A2);
impl_fn_signature!(A1, A2, A3);
impl_fn_signature!(A1, A2, A3, A4);
impl_fn_signature!(A1, A2, A3, A4, A5);
impl_fn_signature!(A1, A2, A3, A4, A5, A6);
impl_fn_signature!(A1, A2, A3, A4, A5, A6, A7);
impl_fn_signature!(A1, A2, A3, A4, A5, A6, A7, A8);

/// Strip module paths from a type name.
///
/// `core::result::Result<(), std::io::error::Error>` becomes `Result<(), Error>`.
pub fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut path = String::new();

    for c in full.chars() {
        if c.is_alphanumeric() || c == '_' || c == ':' {
            path.push(c);
        } else {
            push_last_segment(&mut out, &path);
            path.clear();
            out.push(c);
        }
    }
    push_last_segment(&mut out, &path);

    out
}

/// A path ending in `::` names something anonymous, like `f::{{closure}}`;
/// keep the last named segment in front of it.
fn push_last_segment(out: &mut String, path: &str) {
    let (named, trailing) = match path.strip_suffix("::") {
        Some(prefix) => (prefix, "::"),
        None => (path, ""),
    };
    if let Some(last) = named.rsplit("::").next() {
        out.push_str(last);
        out.push_str(trailing);
    }
}

/// Split a return type into its rendered list: `()` is empty, a tuple lists
/// its elements, anything else is a single entry.
fn return_types(full: &str) -> Vec<String> {
    let short = short_type_name(full);
    let Some(inner) = short.strip_prefix('(').and_then(|s| s.strip_suffix(')')) else {
        return vec![short];
    };

    split_top_level(inner)
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split on commas that are not nested inside `<>`, `()` or `[]`.
fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in s.char_indices() {
        match c {
            '<' | '(' | '[' => depth += 1,
            '>' | ')' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);

    parts
}
