//! Distance Table Example
//!
//! Generates the magnet distance tables in the two shapes the firmware has
//! used, and shows why the inverse-square curve needs a wider format.
//!
//! ## What You'll Learn
//!
//! - Generating a table from a formula and a numeric format
//! - Spotting clamped samples (format too narrow for the curve)
//! - Emitting a C header
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_distance_table
//! ```

use maglut_core::{
    constants::sensor::TABLE_LENGTH, generate_table, CArray, CHeader, Formula, GenerateError,
    NumericFormat, Table,
};

fn main() -> Result<(), GenerateError> {
    println!("maglut Distance Table Example");
    println!("=============================\n");

    println!("Empirical distance curve (Q0.16):");
    println!("---------------------------------");
    let distance = generate_table(Formula::distance(), NumericFormat::Q0_16, TABLE_LENGTH)?;
    describe(&distance);

    println!("\nInverse-square curve, a = 1:");
    println!("----------------------------");
    for format in [NumericFormat::Q0_16, NumericFormat::Q16_16] {
        let table = generate_table(Formula::inverse_square(1.0), format, TABLE_LENGTH)?;
        println!(
            "  {:>6}: {} clamped sample(s), last entry {}",
            format.to_string(),
            table.clamps().len(),
            table.values()[TABLE_LENGTH - 1]
        );
    }

    println!("\nInvalid geometry is rejected up front:");
    println!("--------------------------------------");
    match generate_table(Formula::inverse_square(0.0), NumericFormat::Q16_16, TABLE_LENGTH) {
        Ok(_) => println!("  unexpected success"),
        Err(e) => println!("  {}", e),
    }

    println!("\nGenerated header (first lines):");
    println!("-------------------------------");
    let mut header = CHeader::new();
    header
        .include("<stdint.h>")
        .push(CArray::new("dist", distance)?.with_attribute("__attr_flash"));
    for line in header.render().lines().take(10) {
        println!("  {}", line);
    }

    Ok(())
}

fn describe(table: &Table) {
    let values = table.values();
    println!("  first entry: {}", values[0]);
    println!("  last entry:  {}", values[values.len() - 1]);
    println!("  clamped:     {}", table.clamps().len());
}
