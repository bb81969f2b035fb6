//! corridor — smallest demo for the context-based steering engine.
//!
//! Three agents share a walled corridor with a pillar in the middle: a
//! pathfinder runs the corridor end to end, a wanderer drifts on a leash,
//! and a third agent orbits the pillar before fleeing it (exercising a
//! behavior blend mid-run). Steering traces land in `output/corridor/`.

mod scene;

use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use cbs_behavior::{BehaviorName, BehaviorParams, DeadlockSide, PathLock};
use cbs_context::Steering;
use cbs_core::{AgentId, Vec2};
use cbs_pilot::{FieldSnapshot, PilotBuilder, PilotConfig, SteerInput, SteerObserver, SteerState};
use cbs_trace::{CsvTraceWriter, TraceRecorder, TraceWriter};

use scene::{CorridorScene, PILLAR_CENTER};

// ── Constants ─────────────────────────────────────────────────────────────────

const AGENT_COUNT: usize = 3;
const SEED:        u64   = 7;
const DT:          f32   = 0.05; // 20 Hz
const TICKS:       u64   = 400;  // 20 simulated seconds
const SENSE_RANGE: f32   = 30.0;

/// Tick at which the orbiter switches from strafe to flee.
const ORBIT_TICKS: u64 = 200;

// ── Observer wrapper to count events ──────────────────────────────────────────

struct CountingRecorder<W: TraceWriter> {
    inner:     TraceRecorder<W>,
    locks:     usize,
    blocked:   usize,
    deadlocks: usize,
    blends:    usize,
    arrivals:  usize,
}

impl<W: TraceWriter> CountingRecorder<W> {
    fn new(inner: TraceRecorder<W>) -> Self {
        Self {
            inner,
            locks: 0,
            blocked: 0,
            deadlocks: 0,
            blends: 0,
            arrivals: 0,
        }
    }
}

impl<W: TraceWriter> SteerObserver for CountingRecorder<W> {
    fn on_solve(&mut self, agent: AgentId, steering: &Steering) {
        self.inner.on_solve(agent, steering);
    }

    fn on_path_lock(&mut self, agent: AgentId, report: PathLock) {
        match report {
            PathLock::Locked => self.locks += 1,
            PathLock::Blocked => self.blocked += 1,
            PathLock::TooClose => {}
        }
        self.inner.on_path_lock(agent, report);
    }

    fn on_deadlock(&mut self, agent: AgentId, side: DeadlockSide) {
        self.deadlocks += 1;
        self.inner.on_deadlock(agent, side);
    }

    fn on_blend_complete(&mut self, agent: AgentId, behavior: BehaviorName) {
        self.blends += 1;
        self.inner.on_blend_complete(agent, behavior);
    }

    fn on_path_complete(&mut self, agent: AgentId) {
        self.arrivals += 1;
        self.inner.on_path_complete(agent);
    }

    fn on_field(&mut self, agent: AgentId, snapshot: &FieldSnapshot) {
        self.inner.on_field(agent, snapshot);
    }
}

// ── Behavior schedule ─────────────────────────────────────────────────────────

/// Which behavior each agent requests at `tick`.
fn behavior_for(agent: usize, tick: u64) -> BehaviorName {
    match agent {
        0 => BehaviorName::Pathfind,
        1 => BehaviorName::Wander,
        _ if tick < ORBIT_TICKS => BehaviorName::Strafe,
        _ => BehaviorName::Flee,
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== corridor — context-based steering demo ===");
    println!("Agents: {AGENT_COUNT}  |  Ticks: {TICKS} (dt {DT} s)  |  Seed: {SEED}");
    println!();

    // 1. Build the scene and the pilot.
    let scene = CorridorScene::new(16);
    let mut pilot = PilotBuilder::new(PilotConfig { global_seed: SEED, ..Default::default() })
        .behavior_params(
            BehaviorName::Strafe,
            BehaviorParams {
                min_range: 10.0,
                max_range: 25.0,
                ..Default::default()
            },
        )
        .behavior_params(
            BehaviorName::Pathfind,
            BehaviorParams {
                arrive_radius: 4.0,
                wander_weight: 0.3,
                ..Default::default()
            },
        )
        .build()?;
    println!(
        "Pilot: {} slots, blend {} s",
        pilot.resolution(),
        pilot.config.blend_duration
    );

    // 2. Spawn agents and seat them in the corridor.
    let mut positions = vec![
        Vec2::new(5.0, 0.0),   // pathfinder
        Vec2::new(20.0, 5.0),  // wanderer, leashed to its spawn
        Vec2::new(45.0, -8.0), // orbiter
    ];
    let mut states: Vec<SteerState> = vec![
        pilot.spawn(AgentId(0), positions[0], 0.0),
        pilot.spawn(AgentId(1), positions[1], 18.0),
        pilot.spawn(AgentId(2), positions[2], 0.0),
    ];
    let route = [
        Vec2::new(40.0, 0.0),
        Vec2::new(80.0, 0.0),
        Vec2::new(115.0, 0.0),
    ];

    // 3. Set up trace output.
    std::fs::create_dir_all("output/corridor")?;
    let writer = CsvTraceWriter::new(Path::new("output/corridor"))?;
    let mut obs = CountingRecorder::new(TraceRecorder::new(writer));

    // 4. Run: sense, steer, integrate.
    let t0 = Instant::now();
    for tick in 0..TICKS {
        obs.inner.begin_tick(tick);
        for i in 0..AGENT_COUNT {
            let behavior = behavior_for(i, tick);
            let rays = scene.sense(positions[i], SENSE_RANGE);
            let mut input = SteerInput::new(positions[i], behavior, DT)
                .rays(&rays)
                .obstacles(scene.obstacles());
            input = match i {
                0 => input.waypoints(&route),
                2 => input.target(PILLAR_CENTER),
                _ => input,
            };

            let velocity = pilot.steer(&mut states[i], &input, &mut obs);
            obs.inner.sample(&states[i], positions[i], velocity);
            positions[i] += velocity * DT;
        }
    }
    let elapsed = t0.elapsed();
    obs.inner.finish()?;

    // 5. Summary.
    println!(
        "Run complete in {:.3} s ({} steering evaluations)",
        elapsed.as_secs_f64(),
        TICKS as usize * AGENT_COUNT
    );
    println!("  path locks  : {} locked / {} blocked", obs.locks, obs.blocked);
    println!("  deadlocks   : {}", obs.deadlocks);
    println!("  blends done : {}", obs.blends);
    println!("  paths done  : {}", obs.arrivals);
    println!();

    println!("{:<8} {:<10} {:<22} {:<8}", "Agent", "Behavior", "Position", "Speed");
    println!("{}", "-".repeat(50));
    for (i, state) in states.iter().enumerate() {
        println!(
            "{:<8} {:<10} {:<22} {:<8.2}",
            i,
            state.mode.active().as_str(),
            positions[i].to_string(),
            state.speed,
        );
    }

    Ok(())
}
