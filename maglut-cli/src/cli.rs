//! Command line arguments

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{ArgAction, Args, Parser, ValueEnum};
use clap_num::maybe_hex;
use maglut_core::{
    constants::{sensor::TABLE_LENGTH, DISTANCE_C0, DISTANCE_C1, DISTANCE_C2},
    EmpiricalDistance, Formula, NumericFormat, Rounding,
};

use crate::config::{Manifest, Preset, TableConfig};

/// Flags describing a one-shot table; meaningless next to `--config` or `--preset`
const ONE_SHOT_FLAGS: [&str; 13] = [
    "formula", "format", "frac_bits", "geometry", "c0", "c1", "c2", "length", "rounding", "name",
    "ctype", "attribute", "per_line",
];

#[derive(Parser, Debug)]
#[command(name = "build_tables", version)]
#[command(about = "Generate sensor lookup tables as C array initializers")]
pub struct Cli {
    /// JSON manifest listing includes and tables
    #[arg(long, value_name = "MANIFEST", conflicts_with = "preset", conflicts_with_all = ONE_SHOT_FLAGS)]
    pub config: Option<PathBuf>,

    /// Reproduce a shipped header
    #[arg(long, value_enum, conflicts_with_all = ONE_SHOT_FLAGS)]
    pub preset: Option<Preset>,

    #[command(flatten)]
    pub table: TableArgs,

    /// Output file, stdout when absent
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Append to the output file instead of replacing it
    #[arg(long, requires = "output")]
    pub append: bool,

    /// More log output (-v info, -vv debug, -vvv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Single table described by flags
#[derive(Args, Debug)]
pub struct TableArgs {
    /// Curve to tabulate
    #[arg(long, value_enum)]
    pub formula: Option<FormulaArg>,

    /// Numeric format of the entries
    #[arg(long, value_enum, default_value = "q0.16")]
    pub format: FormatArg,

    /// Fractional bits of the q32 format
    #[arg(long, default_value_t = 16)]
    pub frac_bits: u8,

    /// Geometry constant `a` of the inverse-square curve
    #[arg(long, short = 'a', allow_negative_numbers = true)]
    pub geometry: Option<f64>,

    /// Distance calibration, constant term
    #[arg(long, default_value_t = DISTANCE_C0, allow_negative_numbers = true)]
    pub c0: f64,

    /// Distance calibration, square-root term
    #[arg(long, default_value_t = DISTANCE_C1, allow_negative_numbers = true)]
    pub c1: f64,

    /// Distance calibration, linear term
    #[arg(long, default_value_t = DISTANCE_C2, allow_negative_numbers = true)]
    pub c2: f64,

    /// Number of entries, decimal or 0x-prefixed hex
    #[arg(long, value_parser = length_parser, default_value_t = TABLE_LENGTH)]
    pub length: usize,

    #[arg(long, value_enum, default_value = "nearest-even")]
    pub rounding: RoundingArg,

    /// C array name
    #[arg(long, default_value = "lookup")]
    pub name: String,

    /// Element type, e.g. fix_0_16_t
    #[arg(long)]
    pub ctype: Option<String>,

    /// Declaration attribute, e.g. __attr_flash
    #[arg(long)]
    pub attribute: Option<String>,

    /// Include directive, repeatable
    #[arg(long = "include", value_name = "HEADER")]
    pub includes: Vec<String>,

    /// Values per line
    #[arg(long, default_value_t = 1)]
    pub per_line: usize,
}

fn length_parser(s: &str) -> Result<usize, String> {
    maybe_hex(s)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormulaArg {
    Identity,
    Sqrt,
    Distance,
    InverseSquare,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    #[value(name = "q0.16")]
    Q0_16,
    Q32,
    F32,
    F64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoundingArg {
    NearestEven,
    TowardZero,
}

impl From<RoundingArg> for Rounding {
    fn from(arg: RoundingArg) -> Self {
        match arg {
            RoundingArg::NearestEven => Rounding::NearestEven,
            RoundingArg::TowardZero => Rounding::TowardZero,
        }
    }
}

impl TableArgs {
    fn formula(&self, kind: FormulaArg) -> Result<Formula> {
        Ok(match kind {
            FormulaArg::Identity => Formula::Identity,
            FormulaArg::Sqrt => Formula::SquareRoot,
            FormulaArg::Distance => {
                Formula::Distance(EmpiricalDistance::new(self.c0, self.c1, self.c2))
            }
            FormulaArg::InverseSquare => {
                let a = self
                    .geometry
                    .ok_or_else(|| anyhow!("--geometry is required for the inverse-square formula"))?;
                Formula::inverse_square(a)
            }
        })
    }

    fn format(&self) -> NumericFormat {
        match self.format {
            FormatArg::Q0_16 => NumericFormat::Q0_16,
            FormatArg::Q32 => NumericFormat::Q32 { frac_bits: self.frac_bits },
            FormatArg::F32 => NumericFormat::F32,
            FormatArg::F64 => NumericFormat::F64,
        }
    }

    fn manifest(&self, kind: FormulaArg) -> Result<Manifest> {
        let table = TableConfig {
            length: self.length,
            rounding: self.rounding.into(),
            ctype: self.ctype.clone(),
            attribute: self.attribute.clone(),
            per_line: self.per_line,
            ..TableConfig::new(&self.name, self.formula(kind)?, self.format())
        };
        Ok(Manifest {
            includes: self.includes.clone(),
            tables: vec![table],
        })
    }
}

impl Cli {
    /// Tables to generate, from whichever source was given
    pub fn manifest(&self) -> Result<Manifest> {
        let mut manifest = match (&self.config, self.preset, self.table.formula) {
            (Some(path), _, _) => Manifest::load(path)?,
            (None, Some(preset), _) => Manifest::preset(preset),
            (None, None, Some(kind)) => return self.table.manifest(kind),
            (None, None, None) => {
                return Err(anyhow!("Nothing to generate: pass --config, --preset or --formula"))
            }
        };
        manifest.includes.extend(self.table.includes.iter().cloned());
        Ok(manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use maglut_core::GenerateError;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("build_tables").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn one_shot_table() {
        let cli = parse(&[
            "--formula", "inverse-square", "-a", "2", "--format", "q32", "--frac-bits", "16",
            "--length", "0x800", "--rounding", "toward-zero", "--name", "dist",
            "--include", "<stdint.h>",
        ]);
        let manifest = cli.manifest().unwrap();
        assert_eq!(manifest.includes, ["<stdint.h>"]);

        let table = &manifest.tables[0];
        assert_eq!(table.name, "dist");
        assert_eq!(table.formula, Formula::inverse_square(2.0));
        assert_eq!(table.format, NumericFormat::Q16_16);
        assert_eq!(table.length, 2048);
        assert_eq!(table.rounding, Rounding::TowardZero);
    }

    #[test]
    fn negative_calibration_coefficient() {
        let cli = parse(&["--formula", "distance", "--c2", "-0.5"]);
        let manifest = cli.manifest().unwrap();
        assert_eq!(
            manifest.tables[0].formula,
            Formula::Distance(EmpiricalDistance::new(DISTANCE_C0, DISTANCE_C1, -0.5))
        );
    }

    #[test]
    fn inverse_square_needs_geometry() {
        let cli = parse(&["--formula", "inverse-square"]);
        let err = cli.manifest().unwrap_err();
        assert!(err.to_string().contains("--geometry"));
    }

    #[test]
    fn preset_takes_extra_includes() {
        let cli = parse(&["--preset", "cmc-dist", "--include", "<stdint.h>"]);
        let manifest = cli.manifest().unwrap();
        assert_eq!(manifest.tables[0].name, "dist");
        assert_eq!(manifest.includes.last().map(String::as_str), Some("<stdint.h>"));
    }

    #[test]
    fn conflicting_sources_are_rejected() {
        let args = ["build_tables", "--preset", "lookup", "--formula", "sqrt"];
        assert!(Cli::try_parse_from(args).is_err());
        assert!(Cli::try_parse_from(["build_tables", "--append"]).is_err());
        assert!(parse(&[]).manifest().is_err());
    }

    #[test]
    fn table_flags_rejected_next_to_preset_or_config() {
        for flags in [
            &["--format", "q32"][..],
            &["--rounding", "toward-zero"],
            &["--length", "16"],
            &["--geometry", "2"],
            &["--c0", "0.1"],
            &["--name", "dist"],
            &["--ctype", "fix_0_16_t"],
            &["--attribute", "__attr_flash"],
            &["--per-line", "8"],
            &["--frac-bits", "8"],
        ] {
            let with_preset = ["build_tables", "--preset", "cmc-dist"].iter().chain(flags);
            assert!(Cli::try_parse_from(with_preset).is_err(), "{:?} with --preset", flags);

            let with_config = ["build_tables", "--config", "tables.json"].iter().chain(flags);
            assert!(Cli::try_parse_from(with_config).is_err(), "{:?} with --config", flags);
        }
        assert!(Cli::try_parse_from(["build_tables", "--config", "t.json", "--preset", "lookup"]).is_err());
    }

    #[test]
    fn negative_geometry_reaches_validation() {
        for args in [["-a", "-1"], ["--geometry", "-1"]] {
            let cli = parse(&[&["--formula", "inverse-square", "--format", "q32"][..], &args].concat());
            let manifest = cli.manifest().unwrap();
            assert_eq!(manifest.tables[0].formula, Formula::inverse_square(-1.0));

            let err = manifest.build().unwrap_err();
            assert_eq!(
                err.downcast_ref::<GenerateError>(),
                Some(&GenerateError::InvalidGeometry { a: -1.0 })
            );
        }
    }

    #[test]
    fn verbosity_counts() {
        assert_eq!(parse(&["-vv", "--formula", "sqrt"]).verbose, 2);
    }
}
