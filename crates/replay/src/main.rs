mod config;
mod replay;

use anyhow::{Result, bail};
use clap::Parser;
use glam::Vec2;

use config::ReplayConfig;
use physical2d::BendingMultiples;
use replay::Replay;

#[derive(Parser)]
#[command(name = "physical2d-replay")]
#[command(about = "Replays a predicted object drifting from its authoritative state")]
struct Args {
    #[arg(short, long, default_value_t = 120)]
    ticks: u32,

    #[arg(short, long, default_value_t = 6, help = "Ticks between authoritative updates")]
    update_interval: u32,

    #[arg(long, default_value_t = 1000.0 / 60.0, help = "Step length in milliseconds")]
    step_ms: f32,

    #[arg(long, num_args = 2, default_values_t = [4.0, 0.0])]
    predicted_velocity: Vec<f32>,

    #[arg(long, num_args = 2, default_values_t = [3.5, 0.5])]
    authoritative_velocity: Vec<f32>,

    #[arg(long, help = "Treat the object as locally controlled")]
    local: bool,

    #[arg(long, help = "Override the global bending strength")]
    bending: Option<f32>,

    #[arg(long, help = "Override the angle bending strength")]
    angle_bending: Option<f32>,

    #[arg(long, default_value_t = 10)]
    increments: u32,

    #[arg(long, default_value_t = 0, help = "Interpolated render frames per tick")]
    render_steps: u32,
}

fn vec2(values: &[f32]) -> Result<Vec2> {
    match values {
        [x, y] => Ok(Vec2::new(*x, *y)),
        _ => bail!("expected two components, got {}", values.len()),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if args.increments == 0 {
        bail!("--increments must be at least 1");
    }

    let mut config = ReplayConfig {
        ticks: args.ticks,
        update_interval: args.update_interval,
        step_ms: args.step_ms,
        predicted_velocity: vec2(&args.predicted_velocity)?,
        authoritative_velocity: vec2(&args.authoritative_velocity)?,
        is_local: args.local,
        render_steps: args.render_steps,
        multiples: BendingMultiples {
            bending: args.bending,
            angle: args.angle_bending,
            ..Default::default()
        },
        ..Default::default()
    };
    config.reconcile.bending_increments = args.increments;

    log::info!("replaying {} ticks at {:.2}ms", config.ticks, config.step_ms);
    let summary = Replay::new(config).run()?;
    log::info!(
        "done: {} corrections, max error {:.4}, final error {:.4}",
        summary.corrections,
        summary.max_error,
        summary.final_error
    );

    Ok(())
}
