//! CorePlugin wires the fixed world tick and its bookkeeping.
use bevy::prelude::*;
#[cfg(feature = "core_debug")]
use bevy::time::TimerMode;
use std::time::Duration;

/// World tick rate: one tick every 31.25 ms.
pub const DEFAULT_TICK_HZ: f64 = 32.0;
const MIN_TICK_HZ: f64 = 0.001;

#[cfg(feature = "core_debug")]
#[derive(Resource)]
struct DebugTickTimer {
    timer: Timer,
    ticks_at_last_report: u64,
}

#[cfg(feature = "core_debug")]
impl Default for DebugTickTimer {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(1.0, TimerMode::Repeating),
            ticks_at_last_report: 0,
        }
    }
}

/// Counts fixed world ticks independently of the render cadence.
#[derive(Resource, Debug, Default)]
pub struct WorldTicks {
    count: u64,
    last_delta: Duration,
    elapsed: Duration,
}

impl WorldTicks {
    /// Number of fixed ticks run so far.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Fixed delta of the most recent tick.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn last_delta(&self) -> Duration {
        self.last_delta
    }

    /// Total fixed time accumulated across all ticks.
    #[cfg_attr(not(feature = "core_debug"), allow(dead_code))]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Records one tick of the given fixed delta.
    pub fn tick(&mut self, delta: Duration) {
        self.count = self.count.saturating_add(1);
        self.last_delta = delta;
        self.elapsed += delta;
    }
}

/// Installs the fixed world tick period.
#[derive(Debug, Clone, Copy)]
pub struct CorePlugin {
    tick_hz: f64,
}

impl CorePlugin {
    /// Creates a CorePlugin ticking the world at `tick_hz` (clamped to a small positive minimum).
    pub fn with_tick_hz(tick_hz: f64) -> Self {
        let tick_hz = if tick_hz.is_finite() {
            tick_hz.max(MIN_TICK_HZ)
        } else {
            DEFAULT_TICK_HZ
        };
        Self { tick_hz }
    }

    /// Period between two world ticks.
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_hz)
    }
}

impl Default for CorePlugin {
    fn default() -> Self {
        Self::with_tick_hz(DEFAULT_TICK_HZ)
    }
}

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_duration(self.tick_period()))
            .init_resource::<WorldTicks>()
            .add_systems(Startup, log_startup_tick_rate)
            .add_systems(FixedFirst, count_world_tick);

        #[cfg(feature = "core_debug")]
        {
            app.insert_resource(DebugTickTimer::default())
                .add_systems(Update, log_tick_rate);
        }
    }
}

fn count_world_tick(mut ticks: ResMut<WorldTicks>, time: Res<Time<Fixed>>) {
    ticks.tick(time.delta());
}

fn log_startup_tick_rate(time: Res<Time<Fixed>>) {
    info!(
        "CorePlugin initialised with world tick period: {:.2} ms",
        time.timestep().as_secs_f64() * 1000.0
    );
}

#[cfg(feature = "core_debug")]
fn log_tick_rate(
    mut timer: ResMut<DebugTickTimer>,
    time: Res<Time<Real>>,
    ticks: Res<WorldTicks>,
) {
    if timer.timer.tick(time.delta()).just_finished() {
        let since_last = ticks.count() - timer.ticks_at_last_report;
        timer.ticks_at_last_report = ticks.count();
        info!(
            target: "core_debug",
            "World ticks: {} total | {} in last second | fixed elapsed: {:.2}s",
            ticks.count(),
            since_last,
            ticks.elapsed().as_secs_f32(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tick_period_is_31_25_ms() {
        let plugin = CorePlugin::default();
        assert_eq!(plugin.tick_period(), Duration::from_micros(31_250));
    }

    #[test]
    fn tick_rate_clamps_to_minimum() {
        let plugin = CorePlugin::with_tick_hz(0.0);
        assert!((plugin.tick_hz - MIN_TICK_HZ).abs() < f64::EPSILON);

        let plugin = CorePlugin::with_tick_hz(f64::NAN);
        assert!((plugin.tick_hz - DEFAULT_TICK_HZ).abs() < f64::EPSILON);
    }

    #[test]
    fn ticks_accumulate_count_and_elapsed() {
        let mut ticks = WorldTicks::default();
        let period = CorePlugin::default().tick_period();
        for _ in 0..4 {
            ticks.tick(period);
        }

        assert_eq!(ticks.count(), 4);
        assert_eq!(ticks.last_delta(), period);
        assert_eq!(ticks.elapsed(), Duration::from_millis(125));
    }
}
