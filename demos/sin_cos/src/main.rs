use anyhow::{Context, Result};
use clap::Parser;
use cordic_core::{CordicConfig, CordicEngine, StepTrace};
use cordic_math::FixedPointFormat;
use log::info;
use std::path::PathBuf;

/// Compute cos/sin of one angle with fixed-point CORDIC and compare against
/// the floating-point library values.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
struct Args {
    /// Input angle in radians
    #[arg(long, default_value_t = 0.945, allow_negative_numbers = true)]
    angle: f64,

    /// Number of CORDIC iterations
    #[arg(long, default_value_t = 24)]
    iterations: usize,

    /// Total word width in bits
    #[arg(long, default_value_t = 32)]
    word_bits: u32,

    /// Fractional bits
    #[arg(long, default_value_t = 30)]
    frac_bits: u32,

    /// Write the per-iteration trace as JSON to this path
    #[arg(long)]
    trace: Option<PathBuf>,

    /// Only print x_n and y_n
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let format = FixedPointFormat::new(args.word_bits, args.frac_bits)?;
    let config = CordicConfig::new(args.iterations, format).with_steps(args.trace.is_some());
    let engine = CordicEngine::new(config)?;
    info!("{}", config.description());

    let output = engine
        .rotate(args.angle)
        .with_context(|| format!("rotating by {}", args.angle))?;

    if args.quiet {
        println!("{} {}", output.cos(), output.sin());
    } else {
        println!("x_n    = {}", output.cos());
        println!("cos    = {}", args.angle.cos());
        println!("y_n    = {}", output.sin());
        println!("sin    = {}", args.angle.sin());
        println!();

        let gamma = engine.table().last();
        let residual_ok = output.state.theta.abs()? <= *gamma;
        println!("theta_n                 {}", output.state.theta);
        println!("gamma_(n-1)             {}", gamma);
        println!("|theta_n| <= gamma_(n-1)? {}", residual_ok);
        println!("theta_max               {}", engine.theta_max());
    }

    if let Some(path) = &args.trace {
        engine.verify(&output.steps)?;
        let trace = StepTrace::new(&engine, args.angle, &output);
        std::fs::write(path, trace.to_json_pretty()?)
            .with_context(|| format!("writing trace to {}", path.display()))?;
        info!("Trace digest {}", trace.digest());
        println!("Wrote {} steps to {}", trace.steps.len(), path.display());
    }

    Ok(())
}
