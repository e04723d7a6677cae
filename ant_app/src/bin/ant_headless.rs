// ant_headless.rs - Runs a preset or configuration file without a window
// Usage: ant_headless [PRESET|FILE.json] [STEPS_PER_SECOND] [SECONDS]

use std::env;
use std::time::Duration;

use ant_engine::{CELL_SIZE, PRESETS, Session};
use tracing_subscriber::EnvFilter;

// Grid size for headless runs, in cells
const ROWS: u32 = 200;
const COLS: u32 = 200;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().collect();

    let source = args.get(1).cloned().unwrap_or_else(|| PRESETS[0].name.to_owned());

    let steps_per_second: u32 = args.get(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(1000);

    let seconds: u64 = args.get(3)
        .and_then(|s| s.parse().ok())
        .unwrap_or(5);

    let mut session = Session::new(COLS * CELL_SIZE, ROWS * CELL_SIZE)?;
    match PRESETS.iter().position(|p| p.name.eq_ignore_ascii_case(&source)) {
        Some(index) => session.select_preset(index)?,
        None => {
            let text = std::fs::read_to_string(&source)?;
            session.load_config(&text)?;
        }
    }

    session.add_ant(i64::from(COLS / 2), i64::from(ROWS / 2));
    session.set_rate(steps_per_second);
    session.play();

    tracing::info!(
        config = %session.engine().config(),
        steps_per_second = session.steps_per_second(),
        seconds,
        "running"
    );

    let ran = session.run_for(Duration::from_secs(seconds)).await;

    let engine = session.engine();
    println!("Configuration: {}", engine.config());
    println!("Steps run:     {ran}");
    for (color, count) in engine.grid().census().iter().enumerate() {
        println!("  color {color:>2}: {count} cells");
    }
    for (i, ant) in engine.ants().iter().enumerate() {
        let (x, y) = ant.position();
        println!("  ant {i}: ({x}, {y}) facing {:?}, state {}", ant.facing(), ant.state());
    }

    Ok(())
}
