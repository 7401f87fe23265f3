//! Table manifests
//!
//! A manifest lists the include directives and the tables of one generated
//! header. It is loaded from JSON, built from a preset reproducing one of the
//! firmware's historical headers, or assembled from command line flags.
//!
//! ```json
//! {
//!   "includes": ["<libmaple/libmaple_types.h>", "\"cmc_private.h\""],
//!   "tables": [
//!     {
//!       "name": "dist",
//!       "formula": { "kind": "inverse-square", "a": 1.0 },
//!       "format": { "kind": "q32", "frac_bits": 16 },
//!       "attribute": "__attr_flash"
//!     }
//!   ]
//! }
//! ```

use std::{collections::HashSet, fs, path::Path};

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use log::{debug, info};
use maglut_core::{
    constants::sensor::TABLE_LENGTH, generate_table_with, CArray, CHeader, Formula,
    NumericFormat, Rounding, TableOptions,
};
use serde::{Deserialize, Serialize};

/// One header worth of tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Include directives, `<x.h>`, `"x.h"` or a bare file name
    #[serde(default)]
    pub includes: Vec<String>,
    /// Tables in emission order
    pub tables: Vec<TableConfig>,
}

/// Parameters of one emitted array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableConfig {
    /// C array name
    pub name: String,
    pub formula: Formula,
    pub format: NumericFormat,
    #[serde(default = "default_length")]
    pub length: usize,
    #[serde(default)]
    pub rounding: Rounding,
    /// Element type, the format's integer or float type when absent
    #[serde(default)]
    pub ctype: Option<String>,
    /// Placed between declarator and initializer, e.g. `__attr_flash`
    #[serde(default)]
    pub attribute: Option<String>,
    #[serde(default = "default_per_line")]
    pub per_line: usize,
}

fn default_length() -> usize {
    TABLE_LENGTH
}

fn default_per_line() -> usize {
    1
}

/// Headers the firmware has shipped with
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// `lookup_sqrt` as `fix_0_32_t` for the armfix build
    Lookup,
    /// `lookup` and `lookup_sqrt` in Q0.16 flash tables
    CmcLookup,
    /// Empirical magnet distance `dist` in a Q0.16 flash table
    CmcDist,
}

const CMC_INCLUDES: [&str; 2] = ["<libmaple/libmaple_types.h>", "\"cmc_private.h\""];
const FLASH_ATTRIBUTE: &str = "__attr_flash";

impl TableConfig {
    /// Full-size table with default rounding and element type
    pub fn new(name: &str, formula: Formula, format: NumericFormat) -> Self {
        Self {
            name: name.to_string(),
            formula,
            format,
            length: default_length(),
            rounding: Rounding::default(),
            ctype: None,
            attribute: None,
            per_line: default_per_line(),
        }
    }

    fn in_flash(mut self) -> Self {
        self.attribute = Some(FLASH_ATTRIBUTE.to_string());
        self
    }

    /// Generate the table and wrap it in its declaration
    pub fn build(&self) -> Result<CArray> {
        let options = TableOptions { rounding: self.rounding };
        let table = generate_table_with(self.formula, self.format, self.length, options)?;

        let mut array = CArray::new(&self.name, table)?.with_per_line(self.per_line);
        if let Some(ctype) = &self.ctype {
            array = array.with_ctype(ctype)?;
        }
        if let Some(attribute) = &self.attribute {
            array = array.with_attribute(attribute);
        }
        Ok(array)
    }
}

impl Manifest {
    /// Read a JSON manifest
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse manifest {}", path.display()))
    }

    /// Manifest reproducing a shipped header
    pub fn preset(preset: Preset) -> Self {
        let cmc_includes = || CMC_INCLUDES.iter().map(|s| s.to_string()).collect();

        match preset {
            Preset::Lookup => Self {
                includes: vec!["<armfix.h>".to_string()],
                tables: vec![TableConfig {
                    ctype: Some("fix_0_32_t".to_string()),
                    ..TableConfig::new("lookup_sqrt", Formula::SquareRoot, NumericFormat::F64)
                }],
            },
            Preset::CmcLookup => Self {
                includes: cmc_includes(),
                tables: vec![
                    TableConfig::new("lookup", Formula::Identity, NumericFormat::Q0_16).in_flash(),
                    TableConfig::new("lookup_sqrt", Formula::SquareRoot, NumericFormat::Q0_16)
                        .in_flash(),
                ],
            },
            Preset::CmcDist => Self {
                includes: cmc_includes(),
                tables: vec![
                    TableConfig::new("dist", Formula::distance(), NumericFormat::Q0_16).in_flash(),
                ],
            },
        }
    }

    /// Reject manifests that cannot produce a compilable header
    pub fn validate(&self) -> Result<()> {
        if self.tables.is_empty() {
            bail!("Manifest contains no tables");
        }

        let mut seen = HashSet::new();
        for table in &self.tables {
            if !seen.insert(table.name.as_str()) {
                bail!("Duplicate array name `{}`", table.name);
            }
        }
        Ok(())
    }

    /// Generate every table; nothing is returned unless all succeed
    pub fn build(&self) -> Result<CHeader> {
        self.validate()?;

        let mut header = CHeader::new();
        for include in &self.includes {
            header.include(include);
        }

        for config in &self.tables {
            let array = config
                .build()
                .with_context(|| format!("Failed to generate table `{}`", config.name))?;
            info!("Generated {}", array.summary());
            if !array.table().clamps().is_empty() {
                debug!("{}: {} clamped entries", array.name(), array.table().clamps().len());
            }
            header.push(array);
        }
        Ok(header)
    }
}
