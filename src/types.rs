//! C type descriptors and parameter-name sanitization.
//!
//! Command prototypes in the registry split a declaration across a base type
//! token (`<ptype>`) and loose character data carrying pointers and
//! qualifiers (`const `, ` *`). `CType` folds both into a structured form
//! once, at decode time, and can render itself back to C declaration text
//! for header emission.

use serde::Serialize;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CType {
    base: String,
    pointer_depth: u8,
    const_qualified: bool,
}

impl CType {
    /// Build a descriptor from a base type token and the surrounding
    /// pointer/qualifier text fragment. An empty base means the registry
    /// omitted `<ptype>`, which only happens for untyped pointers.
    pub fn parse(base: &str, fragment: &str) -> Self {
        let base = base.trim();
        let base = if base.is_empty() { "void" } else { base };
        Self {
            base: base.to_string(),
            pointer_depth: fragment.bytes().filter(|&b| b == b'*').count() as u8,
            const_qualified: fragment.contains("const"),
        }
    }

    pub fn base_name(&self) -> &str {
        &self.base
    }

    pub fn pointer_depth(&self) -> u8 {
        self.pointer_depth
    }

    pub fn is_const(&self) -> bool {
        self.const_qualified
    }

    pub fn is_void(&self) -> bool {
        self.base == "void" && self.pointer_depth == 0
    }
}

impl fmt::Display for CType {
    /// C declaration text, e.g. `const GLubyte *`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.const_qualified {
            f.write_str("const ")?;
        }
        f.write_str(&self.base)?;
        if self.pointer_depth > 0 {
            f.write_str(" ")?;
            for _ in 0..self.pointer_depth {
                f.write_str("*")?;
            }
        }
        Ok(())
    }
}

// Keywords and primitive type names of the downstream binding language
// (Rust). A registry parameter named like one of these gets a trailing
// underscore so emitted surfaces can use parameter names verbatim.
const RESERVED: &[&str] = &[
    "abstract", "as", "async", "await", "become", "bool", "box", "break", "char", "const",
    "continue", "crate", "do", "dyn", "else", "enum", "extern", "f32", "f64", "false", "final",
    "fn", "for", "gen", "i128", "i16", "i32", "i64", "i8", "if", "impl", "in", "isize", "let",
    "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref", "return",
    "self", "static", "str", "struct", "super", "trait", "true", "try", "type", "typeof", "u128",
    "u16", "u32", "u64", "u8", "unsafe", "unsized", "use", "usize", "virtual", "where", "while",
    "yield",
];

/// Disambiguate a parameter name that collides with a reserved identifier of
/// the binding target language. Pure function of the name string.
pub fn sanitize_param_name(name: &str) -> String {
    if RESERVED.binary_search(&name).is_ok() {
        format!("{name}_")
    } else {
        name.to_string()
    }
}
