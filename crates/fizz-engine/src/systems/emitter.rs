// systems/emitter.rs
//
// Ambient and burst emitters. Neither creates elements itself — they
// decide *when* a spawn should be attempted and hand the attempt to the
// lifecycle manager, which owns the ceilings.

use glam::Vec2;

use crate::api::types::Rect;
use crate::core::rng::Rng;
use crate::core::timer::TimerRegistry;

/// Emitter state machine. Stopped is terminal; Paused is resumable any
/// number of times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmitterPhase {
    #[default]
    Idle,
    Running,
    Paused,
    Stopped,
}

impl EmitterPhase {
    pub fn is_running(self) -> bool {
        self == Self::Running
    }
}

/// Steady trickle of elements on a per-cycle randomized interval.
///
/// A cycle that cannot spawn (hidden host, full layer) is skipped but the
/// next one is always scheduled — a transient condition never stops
/// ambient emission permanently.
#[derive(Debug, Default)]
pub struct AmbientEmitter {
    phase: EmitterPhase,
    /// Seconds until the next spawn attempt.
    countdown: f32,
}

impl AmbientEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> EmitterPhase {
        self.phase
    }

    pub fn start(&mut self, interval: (f32, f32), rng: &mut Rng) {
        match self.phase {
            EmitterPhase::Idle => {
                self.phase = EmitterPhase::Running;
                self.countdown = rng.range_f32(interval.0, interval.1);
            }
            EmitterPhase::Paused => self.phase = EmitterPhase::Running,
            _ => {}
        }
    }

    pub fn pause(&mut self) {
        if self.phase == EmitterPhase::Running {
            self.phase = EmitterPhase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == EmitterPhase::Paused {
            self.phase = EmitterPhase::Running;
        }
    }

    pub fn stop(&mut self) {
        self.phase = EmitterPhase::Stopped;
    }

    /// Advance by `dt` seconds. Returns the number of spawn attempts due
    /// this tick; each elapsed cycle immediately draws the next interval.
    pub fn tick(&mut self, dt: f32, interval: (f32, f32), rng: &mut Rng) -> u32 {
        if !self.phase.is_running() || dt <= 0.0 {
            return 0;
        }
        self.countdown -= dt;
        let mut attempts = 0;
        while self.countdown <= 0.0 {
            attempts += 1;
            self.countdown += rng.range_f32(interval.0.max(0.05), interval.1.max(0.05));
        }
        attempts
    }
}

/// One element of a burst, due for release at its staggered deadline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurstSpawn {
    pub origin: Vec2,
}

/// Releases a configured number of elements per trigger, staggered over a
/// few frames so a large burst never stalls a single frame.
#[derive(Debug, Default)]
pub struct BurstEmitter {
    phase: EmitterPhase,
    pending: TimerRegistry<BurstSpawn>,
    /// Triggers originating inside any of these regions are suppressed
    /// (buttons, players, navigation).
    regions: Vec<Rect>,
}

impl BurstEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> EmitterPhase {
        self.phase
    }

    pub fn start(&mut self) {
        if matches!(self.phase, EmitterPhase::Idle | EmitterPhase::Paused) {
            self.phase = EmitterPhase::Running;
        }
    }

    pub fn pause(&mut self) {
        if self.phase == EmitterPhase::Running {
            self.phase = EmitterPhase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == EmitterPhase::Paused {
            self.phase = EmitterPhase::Running;
        }
    }

    /// Stop permanently and drop any staggered spawns not yet released.
    pub fn stop(&mut self) {
        self.phase = EmitterPhase::Stopped;
        self.pending.clear();
    }

    pub fn set_interactive_regions(&mut self, regions: Vec<Rect>) {
        self.regions = regions;
    }

    pub fn add_interactive_region(&mut self, region: Rect) {
        self.regions.push(region);
    }

    /// Handle a pointer trigger. Schedules N staggered spawns and returns
    /// N, or 0 when the emitter is not running or the trigger is
    /// suppressed (declared interactive, or inside an interactive region).
    pub fn trigger(
        &mut self,
        origin: Vec2,
        interactive: bool,
        intensity: (u32, u32),
        stagger: f32,
        now: f64,
        rng: &mut Rng,
    ) -> u32 {
        if !self.phase.is_running() {
            return 0;
        }
        if interactive || self.regions.iter().any(|r| r.contains(origin)) {
            return 0;
        }
        let count = rng.range_u32(intensity.0, intensity.1);
        for i in 0..count {
            self.pending
                .schedule(now + (i as f64) * stagger.max(0.0) as f64, BurstSpawn { origin });
        }
        count
    }

    /// Release every staggered spawn whose deadline has passed.
    pub fn release_due(&mut self, now: f64) -> Vec<BurstSpawn> {
        self.pending
            .drain_due(now)
            .into_iter()
            .map(|(_, spawn)| spawn)
            .collect()
    }

    /// Staggered spawns not yet released.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambient_idle_emits_nothing() {
        let mut emitter = AmbientEmitter::new();
        let mut rng = Rng::new(42);
        assert_eq!(emitter.tick(10.0, (0.5, 1.0), &mut rng), 0);
    }

    #[test]
    fn ambient_fires_after_interval_and_reschedules() {
        let mut emitter = AmbientEmitter::new();
        let mut rng = Rng::new(42);
        emitter.start((0.5, 1.0), &mut rng);
        // A whole second of time always covers at least one cycle and the
        // next cycle is already scheduled.
        let attempts = emitter.tick(1.0, (0.5, 1.0), &mut rng);
        assert!(attempts >= 1);
        assert!(emitter.countdown > 0.0);
    }

    #[test]
    fn ambient_pause_freezes_the_countdown() {
        let mut emitter = AmbientEmitter::new();
        let mut rng = Rng::new(42);
        emitter.start((0.5, 1.0), &mut rng);
        emitter.pause();
        assert_eq!(emitter.tick(100.0, (0.5, 1.0), &mut rng), 0);
        emitter.resume();
        assert_eq!(emitter.phase(), EmitterPhase::Running);
    }

    #[test]
    fn ambient_stop_is_terminal() {
        let mut emitter = AmbientEmitter::new();
        let mut rng = Rng::new(42);
        emitter.start((0.5, 1.0), &mut rng);
        emitter.stop();
        emitter.start((0.5, 1.0), &mut rng);
        emitter.resume();
        assert_eq!(emitter.phase(), EmitterPhase::Stopped);
    }

    #[test]
    fn burst_schedules_within_intensity_range() {
        let mut emitter = BurstEmitter::new();
        let mut rng = Rng::new(42);
        emitter.start();
        for _ in 0..32 {
            let n = emitter.trigger(Vec2::new(10.0, 10.0), false, (6, 10), 0.03, 0.0, &mut rng);
            assert!((6..=10).contains(&n), "burst count out of range: {}", n);
        }
    }

    #[test]
    fn burst_releases_are_staggered() {
        let mut emitter = BurstEmitter::new();
        let mut rng = Rng::new(42);
        emitter.start();
        let n = emitter.trigger(Vec2::ZERO, false, (6, 6), 0.03, 0.0, &mut rng);
        assert_eq!(n, 6);
        // Only the first element is due at the trigger instant.
        assert_eq!(emitter.release_due(0.0).len(), 1);
        assert_eq!(emitter.release_due(0.031).len(), 1);
        // The rest arrive by the final stagger deadline.
        assert_eq!(emitter.release_due(1.0).len(), 4);
        assert_eq!(emitter.pending_len(), 0);
    }

    #[test]
    fn interactive_triggers_are_suppressed() {
        let mut emitter = BurstEmitter::new();
        let mut rng = Rng::new(42);
        emitter.start();
        assert_eq!(
            emitter.trigger(Vec2::ZERO, true, (6, 10), 0.03, 0.0, &mut rng),
            0
        );
    }

    #[test]
    fn triggers_inside_declared_regions_are_suppressed() {
        let mut emitter = BurstEmitter::new();
        let mut rng = Rng::new(42);
        emitter.start();
        emitter.add_interactive_region(Rect::from_xywh(0.0, 0.0, 100.0, 50.0));
        assert_eq!(
            emitter.trigger(Vec2::new(50.0, 25.0), false, (6, 10), 0.03, 0.0, &mut rng),
            0
        );
        assert!(emitter.trigger(Vec2::new(50.0, 200.0), false, (6, 10), 0.03, 0.0, &mut rng) > 0);
    }

    #[test]
    fn stop_drops_pending_releases() {
        let mut emitter = BurstEmitter::new();
        let mut rng = Rng::new(42);
        emitter.start();
        emitter.trigger(Vec2::ZERO, false, (6, 6), 0.03, 0.0, &mut rng);
        emitter.stop();
        assert_eq!(emitter.pending_len(), 0);
        assert!(emitter.release_due(10.0).is_empty());
    }

    #[test]
    fn paused_burst_ignores_triggers() {
        let mut emitter = BurstEmitter::new();
        let mut rng = Rng::new(42);
        emitter.start();
        emitter.pause();
        assert_eq!(
            emitter.trigger(Vec2::ZERO, false, (6, 10), 0.03, 0.0, &mut rng),
            0
        );
    }
}
