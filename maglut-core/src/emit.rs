//! C Array Emitter
//!
//! Serializes generated tables as static C array initializers:
//!
//! ```text
//! // Auto-generated lookup tables, do not edit
//! // lookup_sqrt: sqrt, Q0.16, nearest-even, 2048 entries
//!
//! #include <stdint.h>
//!
//! const uint16_t lookup_sqrt [0x800] __attr_flash = {
//!     0,
//!     1449,
//!     ...
//! };
//! ```
//!
//! Fixed-point tables are written as raw integer words, float tables as
//! decimal literals with the shortest representation that round-trips
//! (`f` suffix for `float`). Array names and element types are checked to be
//! C identifiers; the attribute is emitted verbatim.

use alloc::{
    string::{String, ToString},
    vec::Vec,
};
use core::fmt;

use crate::{
    encoding::EncodedValue,
    errors::{GenerateError, GenerateResult},
    table::Table,
};

/// One array declaration
#[derive(Debug, Clone, PartialEq)]
pub struct CArray {
    name: String,
    ctype: String,
    attribute: Option<String>,
    per_line: usize,
    table: Table,
}

/// A complete generated header: banner, includes and arrays
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CHeader {
    includes: Vec<String>,
    arrays: Vec<CArray>,
}

/// Whether `s` is a C identifier (`[A-Za-z_][A-Za-z0-9_]*`)
pub fn is_c_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl CArray {
    /// Declaration named `name` using the format's default element type
    pub fn new(name: &str, table: Table) -> GenerateResult<Self> {
        if !is_c_identifier(name) {
            return Err(GenerateError::InvalidIdentifier { what: "array name" });
        }
        Ok(Self {
            name: name.to_string(),
            ctype: table.format().default_ctype().to_string(),
            attribute: None,
            per_line: 1,
            table,
        })
    }

    /// Override the element type (e.g. `fix_0_16_t`, `unsigned short`)
    pub fn with_ctype(mut self, ctype: &str) -> GenerateResult<Self> {
        let mut words = ctype.split_whitespace().peekable();
        if words.peek().is_none() || !words.all(is_c_identifier) {
            return Err(GenerateError::InvalidIdentifier { what: "element type" });
        }
        self.ctype = ctype.split_whitespace().collect::<Vec<_>>().join(" ");
        Ok(self)
    }

    /// Attribute placed between declarator and initializer
    /// (e.g. `__attr_flash`)
    pub fn with_attribute(mut self, attribute: &str) -> Self {
        let attribute = attribute.trim();
        self.attribute = (!attribute.is_empty()).then(|| attribute.to_string());
        self
    }

    /// Values written per line, at least one
    pub fn with_per_line(mut self, per_line: usize) -> Self {
        self.per_line = per_line.max(1);
        self
    }

    /// Array name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Element type
    pub fn ctype(&self) -> &str {
        &self.ctype
    }

    /// Table being emitted
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// One-line description for the banner
    pub fn summary(&self) -> String {
        alloc::format!(
            "{}: {}, {}, {}, {} entries",
            self.name,
            self.table.formula(),
            self.table.format(),
            self.table.rounding(),
            self.table.len()
        )
    }
}

/// Literal for one entry
struct Literal(EncodedValue);

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            EncodedValue::F32(_) => write!(f, "{}f", self.0),
            value => write!(f, "{}", value),
        }
    }
}

impl fmt::Display for CArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "const {} {} [{:#x}]", self.ctype, self.name, self.table.len())?;
        if let Some(attribute) = &self.attribute {
            write!(f, " {}", attribute)?;
        }
        f.write_str(" = {\n")?;

        for line in self.table.values().chunks(self.per_line) {
            f.write_str("\t")?;
            for (i, value) in line.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{},", Literal(*value))?;
            }
            f.write_str("\n")?;
        }

        f.write_str("};\n")
    }
}

impl CHeader {
    /// Empty header
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an include directive
    ///
    /// `<x.h>` and `"x.h"` are kept as given, a bare `x.h` is quoted.
    pub fn include(&mut self, path: &str) -> &mut Self {
        let path = path.trim();
        let directive = if path.starts_with('<') || path.starts_with('"') {
            path.to_string()
        } else {
            alloc::format!("\"{}\"", path)
        };
        self.includes.push(directive);
        self
    }

    /// Add an array declaration
    pub fn push(&mut self, array: CArray) -> &mut Self {
        self.arrays.push(array);
        self
    }

    /// Arrays in emission order
    pub fn arrays(&self) -> &[CArray] {
        &self.arrays
    }

    /// Render the header as C source
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("// Auto-generated lookup tables, do not edit\n")?;
        for array in &self.arrays {
            writeln!(f, "// {}", array.summary())?;
        }

        if !self.includes.is_empty() {
            f.write_str("\n")?;
            for include in &self.includes {
                writeln!(f, "#include {}", include)?;
            }
        }

        for array in &self.arrays {
            write!(f, "\n{}", array)?;
        }
        Ok(())
    }
}
