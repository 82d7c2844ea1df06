//! Bulwark entry point
//!
//! Natively this is a headless runner: it builds a ring of walls each
//! build phase, plays waves to completion and reports the outcome. The
//! browser build drives the library through `bulwark::web` instead.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use clap::Parser;
    use env_logger::{Builder, Env};
    use glam::Vec2;
    use log::LevelFilter;

    use bulwark::Tuning;
    use bulwark::sim::{GameState, Phase, tick};

    /// Play scripted waves of the defense simulation without a screen
    #[derive(Parser)]
    #[command(author, version, about, long_about = None)]
    struct Args {
        /// RNG seed
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Number of waves to play
        #[arg(long, default_value_t = 5)]
        waves: u32,
        /// Seconds per simulation step
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f32,
        /// Give up on a wave after this many simulated seconds
        #[arg(long, default_value_t = 300.0)]
        max_seconds: f32,
        /// JSON tuning overrides
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    }

    fn init_logging(verbose: bool) {
        let level = if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };
        let env = Env::default().default_filter_or(level.to_string());
        let _ = Builder::from_env(env).try_init();
    }

    /// Spend gold on walls spaced around a ring, innermost ring first
    fn build_ring(state: &mut GameState) -> usize {
        let center = state.objective.pos;
        let mut placed = 0;
        for ring in 0..3 {
            let radius = 110.0 + ring as f32 * 70.0;
            let slots = 8 + ring * 4;
            for slot in 0..slots {
                if state.gold < state.tuning.obstacle_cost {
                    return placed;
                }
                let angle = slot as f32 / slots as f32 * std::f32::consts::TAU;
                let pos = center + Vec2::new(angle.cos(), angle.sin()) * radius;
                if state.request_place_obstacle(pos).is_ok() {
                    placed += 1;
                }
            }
        }
        placed
    }

    pub fn run() {
        let args = Args::parse();
        init_logging(args.verbose);

        let tuning = args
            .tuning
            .as_deref()
            .map(Tuning::load)
            .unwrap_or_default();
        // min then max, so a tiny max_frame_dt can't invert the clamp
        let dt = args.dt.min(tuning.max_frame_dt).max(0.001);
        let mut state = GameState::with_tuning(args.seed, tuning);

        log::info!("Bulwark (headless) seed={} waves={} dt={}", args.seed, args.waves, dt);

        for _ in 0..args.waves {
            let placed = build_ring(&mut state);
            if !state.request_start_attack() {
                break;
            }

            let mut elapsed = 0.0;
            let mut kills = 0;
            while state.phase == Phase::Attacking && elapsed < args.max_seconds {
                tick(&mut state, dt);
                elapsed += dt;
                kills += state
                    .drain_events()
                    .iter()
                    .filter(|e| matches!(e, bulwark::sim::GameEvent::AgentKilled { .. }))
                    .count();
            }

            println!(
                "wave {:>2}: {:<9} {:>5.1}s  walls+{:<2} kills {:<3} core {:>5.1}  gold {:<4} score {}",
                state.wave,
                format!("{:?}", state.phase),
                elapsed,
                placed,
                kills,
                state.objective.health,
                state.gold,
                state.score
            );

            if state.phase != Phase::Building {
                break;
            }
        }

        match state.snapshot_json() {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Could not serialize final snapshot: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is bulwark::web::wasm_start, this is just to satisfy the compiler
}
