//! Hello Array Example
//!
//! Optimises a five-element array steered to 60° and prints the result.

use aadp::prelude::*;
use aadp::report;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    println!("AADP Hello Array Example");
    println!("========================");

    let config = RunConfig::builder()
        .antennae(5)
        .steering_angle(60.0)
        .iterations(200)
        .seed(2024)
        .build();

    println!("Configuration:");
    println!("  Antennae: {}", config.n_antennae);
    println!("  Steering angle: {}°", config.steering_angle);
    println!("  Population: {}", config.population());

    let record = run(&config)?;

    println!("\n{}", report::render_text(&record.report));
    println!("\nReplay with seed {}", record.seed);

    Ok(())
}
