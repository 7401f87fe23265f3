//! Firmware Lookup Example
//!
//! Reads the square-root table the way the firmware does,
//! `lookup_sqrt[(uint16_t)(y * 0x7ff)]`, and compares it with the exact value.
//!
//! ## What You'll Learn
//!
//! - The cost of a truncated index versus interpolation
//! - How much precision Q0.16 gives away compared to a float table
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 02_firmware_lookup
//! ```

use maglut_core::{
    constants::sensor::TABLE_LENGTH, generate_table, Formula, GenerateError, NumericFormat,
};
use std::time::Instant;

fn main() -> Result<(), GenerateError> {
    println!("maglut Firmware Lookup Example");
    println!("==============================\n");

    let table = generate_table(Formula::SquareRoot, NumericFormat::Q0_16, TABLE_LENGTH)?;
    let format = table.format();

    println!("Accuracy against sqrt():");
    println!("------------------------");
    let readings = [0.001f32, 0.01, 0.1, 0.25, 0.5, 0.9];
    for y in readings {
        let exact = (y as f64).sqrt();
        let indexed = format.decode(table.lookup_normalized(y));
        let interpolated = table.interpolate(y as f64);
        println!(
            "  y = {:<6} exact {:.6}  indexed {:.6} (err {:.2e})  interpolated {:.6} (err {:.2e})",
            y,
            exact,
            indexed,
            (indexed - exact).abs(),
            interpolated,
            (interpolated - exact).abs()
        );
    }
    println!("\n  Note: indexed error is largest near 0 where sqrt is steepest");

    println!("\nLookup versus calculation:");
    println!("--------------------------");
    const ITERATIONS: usize = 1_000_000;

    let start = Instant::now();
    let mut acc = 0u64;
    for i in 0..ITERATIONS {
        let code = (i % TABLE_LENGTH) as u16;
        acc += table.at(code).raw().unwrap_or(0) as u64;
    }
    let lookup_time = start.elapsed();

    let start = Instant::now();
    let mut exact_acc = 0.0;
    for i in 0..ITERATIONS {
        exact_acc += ((i % TABLE_LENGTH) as f64 / 2047.0).sqrt();
    }
    let calc_time = start.elapsed();

    println!("  {} iterations:", ITERATIONS);
    println!("  Lookup:      {:?} (checksum {})", lookup_time, acc);
    println!("  Calculation: {:?} (checksum {:.1})", calc_time, exact_acc);

    Ok(())
}
