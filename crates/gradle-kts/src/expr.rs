//! Right-hand-side expressions.

use std::fmt;

/// A Kotlin DSL expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// String literal, escaped on output
    Str(String),
    /// Integer literal
    Int(i64),
    /// Boolean literal
    Bool(bool),
    /// Verbatim expression (e.g. `JavaVersion.VERSION_17`)
    Raw(String),
    /// Function call with positional arguments
    Call { name: String, args: Vec<Expr> },
}

impl Expr {
    pub fn str(s: impl Into<String>) -> Self {
        Expr::Str(s.into())
    }

    pub fn raw(s: impl Into<String>) -> Self {
        Expr::Raw(s.into())
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call {
            name: name.into(),
            args,
        }
    }

    /// Names referenced by this expression that must be valid identifiers
    pub(crate) fn call_names(&self) -> Vec<&str> {
        match self {
            Expr::Call { name, args } => {
                let mut names = vec![name.as_str()];
                for arg in args {
                    names.extend(arg.call_names());
                }
                names
            }
            _ => Vec::new(),
        }
    }
}

impl From<&str> for Expr {
    fn from(s: &str) -> Self {
        Expr::Str(s.to_string())
    }
}

impl From<String> for Expr {
    fn from(s: String) -> Self {
        Expr::Str(s)
    }
}

impl From<i64> for Expr {
    fn from(i: i64) -> Self {
        Expr::Int(i)
    }
}

impl From<u32> for Expr {
    fn from(i: u32) -> Self {
        Expr::Int(i64::from(i))
    }
}

impl From<bool> for Expr {
    fn from(b: bool) -> Self {
        Expr::Bool(b)
    }
}

/// Quote a string as a Kotlin string literal.
///
/// `$` is escaped so values are never interpreted as string templates.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Str(s) => f.write_str(&quote(s)),
            Expr::Int(i) => write!(f, "{}", i),
            Expr::Bool(b) => write!(f, "{}", b),
            Expr::Raw(s) => f.write_str(s),
            Expr::Call { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_escapes_templates() {
        assert_eq!(quote("a$b"), r#""a\$b""#);
        assert_eq!(quote(r#"say "hi""#), r#""say \"hi\"""#);
        assert_eq!(quote("C:\\sdk"), r#""C:\\sdk""#);
    }

    #[test]
    fn test_call_display() {
        let e = Expr::call(
            "implementation",
            vec![Expr::call("platform", vec![Expr::str("com.google.firebase:firebase-bom:33.5.1")])],
        );
        assert_eq!(
            e.to_string(),
            r#"implementation(platform("com.google.firebase:firebase-bom:33.5.1"))"#
        );
    }

    #[test]
    fn test_literals() {
        assert_eq!(Expr::from(34u32).to_string(), "34");
        assert_eq!(Expr::from(false).to_string(), "false");
        assert_eq!(Expr::raw("JavaVersion.VERSION_17").to_string(), "JavaVersion.VERSION_17");
    }
}
