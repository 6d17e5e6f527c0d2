//! Line-level recognition of the Lua class convention.
//!
//! Each source line is classified on its own. The only context a caller
//! supplies is whether a class body is currently open, which enables the
//! `self.field = ...` form.
//!
//! Recognized forms, checked in this order (first match wins):
//!
//! | Form                                   | Result                      |
//! |----------------------------------------|-----------------------------|
//! | `name = require("a.b")`                | [`LineMatch::Import`]       |
//! | `Name = class(_, Base)`                | [`LineMatch::ClassDecl`]    |
//! | `implement(Name, I1, I2)`              | [`LineMatch::Implement`]    |
//! | `function Name.m(args)` / `Name:m`     | [`LineMatch::Method`]       |
//! | `function name(args)`                  | [`LineMatch::Function`]     |
//! | `name = function(args)`                | [`LineMatch::Function`]     |
//! | `name = ...` at column 0               | [`LineMatch::Variable`]     |
//! | `self.field = ...` inside a class body | [`LineMatch::Field`]        |

use regex::Regex;
use std::sync::LazyLock;

static IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*(?:local\s+)?(\w+)\s*=\s*require\s*\(?\s*["']([\w./]+)["']"#).unwrap()
});
static CLASS_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:local\s+)?(\w+)\s*=\s*class\s*\(([^)]*)\)").unwrap()
});
static IMPLEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*implement\s*\(([^)]*)\)").unwrap());
static METHOD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^function\s+(\w+)\s*[.:]\s*(\w+)\s*\(([^)]*)\)").unwrap());
static FUNCTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^function\s+(\w+)\s*\(([^)]*)\)").unwrap());
static FUNCTION_ASSIGN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)\s*=\s*function\s*\(([^)]*)\)").unwrap());
static VARIABLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\w+)\s*=(?:[^=]|$)").unwrap());
static FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*self\.(\w+)\s*=(?:[^=]|$)").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineMatch<'a> {
    /// `alias = require("module.path")`; slashes in the path become dots.
    Import { alias: &'a str, module: String },
    /// `Name = class(..., Base)`; `base` is `None` for `nil` or a single argument.
    ClassDecl { name: &'a str, base: Option<&'a str> },
    Implement { class: &'a str, bases: Vec<&'a str> },
    Method {
        class: &'a str,
        name: &'a str,
        args: &'a str,
    },
    Function { name: &'a str, args: &'a str },
    Variable { name: &'a str },
    Field { name: &'a str },
}

/// Classify one line. `in_class` enables the instance-field form.
pub fn classify(line: &str, in_class: bool) -> Option<LineMatch<'_>> {
    if let Some(caps) = IMPORT.captures(line) {
        return Some(LineMatch::Import {
            alias: caps.get(1)?.as_str(),
            module: caps.get(2)?.as_str().replace('/', "."),
        });
    }

    if let Some(caps) = CLASS_DECL.captures(line) {
        let args: Vec<&str> = caps.get(2)?.as_str().split(',').map(str::trim).collect();
        let base = if args.len() >= 2 {
            args.last()
                .copied()
                .filter(|b| *b != "nil" && is_identifier(b))
        } else {
            None
        };
        return Some(LineMatch::ClassDecl {
            name: caps.get(1)?.as_str(),
            base,
        });
    }

    if let Some(caps) = IMPLEMENT.captures(line) {
        let mut args = caps.get(1)?.as_str().split(',').map(str::trim);
        let class = args.next().filter(|c| is_identifier(c))?;
        return Some(LineMatch::Implement {
            class,
            bases: args.filter(|b| is_identifier(b)).collect(),
        });
    }

    if let Some(caps) = METHOD.captures(line) {
        return Some(LineMatch::Method {
            class: caps.get(1)?.as_str(),
            name: caps.get(2)?.as_str(),
            args: caps.get(3)?.as_str(),
        });
    }

    if let Some(caps) = FUNCTION
        .captures(line)
        .or_else(|| FUNCTION_ASSIGN.captures(line))
    {
        return Some(LineMatch::Function {
            name: caps.get(1)?.as_str(),
            args: caps.get(2)?.as_str(),
        });
    }

    if let Some(caps) = VARIABLE.captures(line) {
        return Some(LineMatch::Variable {
            name: caps.get(1)?.as_str(),
        });
    }

    if in_class {
        if let Some(caps) = FIELD.captures(line) {
            return Some(LineMatch::Field {
                name: caps.get(1)?.as_str(),
            });
        }
    }

    None
}

pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {
            chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        _ => false,
    }
}
