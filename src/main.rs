//! pinchcalc demo driver.
//!
//! Replays a synthetic gesture session through the core: for each key in
//! `--keys`, fabricates landmark frames that pinch over that button,
//! then releases. Stands in for the external camera and hand-detector
//! loop, with deterministic timestamps.

use clap::Parser;
use tracing::{debug, info};

use pinchcalc::geometry::Point;
use pinchcalc::keypad::Key;
use pinchcalc::landmarks::{HandFrame, HandLandmark, LANDMARK_COUNT};
use pinchcalc::session::{CalcSession, SessionConfig, SessionEvent};

#[derive(Parser, Debug)]
#[command(name = "pinchcalc", about = "Pinch-gesture calculator demo")]
struct Cli {
    /// Key sequence to press via synthetic pinches
    #[arg(long, default_value = "12+3=")]
    keys: String,

    /// Simulated camera frame rate
    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Show version and exit
    #[arg(long)]
    version: bool,
}

/// A full landmark frame with the index tip at `tip`; `pinched` selects
/// whether the thumb tip sits inside or outside pinch range.
fn synth_frame(tip: Point, pinched: bool) -> HandFrame {
    let spread = if pinched { 10.0 } else { 120.0 };
    let mut points = vec![Point::default(); LANDMARK_COUNT];
    points[HandLandmark::IndexTip.index()] = tip;
    points[HandLandmark::ThumbTip.index()] = Point::new(tip.x + spread, tip.y);
    HandFrame::new(points, 0.9)
}

fn step(session: &mut CalcSession, frame: &HandFrame, now_s: f64) {
    for event in session.process_frame(Some(frame), now_s) {
        match event {
            SessionEvent::KeyPressed { key } => info!("pressed '{}'", key.as_char()),
            SessionEvent::DisplayChanged { text } => info!("display: {}", text),
            other => debug!("{:?}", other),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.version {
        println!("pinchcalc {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pinchcalc=info".into()),
        )
        .init();

    anyhow::ensure!(cli.fps > 0.0, "--fps must be positive");

    let mut session = CalcSession::new(SessionConfig::default());
    let dt = 1.0 / cli.fps;
    // Enough pinched frames to clear the confirmation delay, and enough
    // released frames to let the press cooldown lapse before the next key.
    let hold_frames = ((0.3 * cli.fps).ceil() as usize).max(2);
    let release_frames = ((0.6 * cli.fps).ceil() as usize).max(2);

    info!(
        "pinchcalc v{} replaying {:?} at {} fps",
        env!("CARGO_PKG_VERSION"),
        cli.keys,
        cli.fps,
    );

    let mut now_s = 0.0;
    for c in cli.keys.chars() {
        let key = Key::from_char(c)
            .ok_or_else(|| anyhow::anyhow!("no key for character {:?}", c))?;
        let center = session
            .keypad()
            .button(key)
            .map(|b| b.center())
            .ok_or_else(|| anyhow::anyhow!("no button for key {:?}", key))?;

        for _ in 0..hold_frames {
            step(&mut session, &synth_frame(center, true), now_s);
            now_s += dt;
        }
        for _ in 0..release_frames {
            step(&mut session, &synth_frame(center, false), now_s);
            now_s += dt;
        }
    }

    println!("{}", session.display());
    Ok(())
}
