//! Ready gate for deferred control commands
//!
//! Control commands that arrive while media is still loading are deferred and
//! re-tried until the session becomes ready. Deferral is fire-once-or-never:
//! an action either runs on a later ready observation or is abandoned when
//! the session goes idle. There is no ordering guarantee between two actions
//! deferred in the same loading window.

/// A control operation whose execution is gated on readiness
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GatedAction {
    Play,
    Pause,
    Seek(f64),
    SetVolume(f64),
    GetStatus,
}

/// Holds deferred actions stamped with a monotonic generation counter.
///
/// A transition to idle bumps the generation and drops everything pending;
/// the stamp check on drain additionally guards any entry deferred under an
/// older generation, so abandonment never races a status re-check.
#[derive(Debug, Default)]
pub struct ReadyGate {
    generation: u64,
    pending: Vec<(u64, GatedAction)>,
}

impl ReadyGate {
    pub fn new() -> Self {
        ReadyGate::default()
    }

    /// Defer an action under the current generation
    pub fn defer(&mut self, action: GatedAction) {
        self.pending.push((self.generation, action));
    }

    /// Abandon everything deferred so far
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.pending.clear();
    }

    /// Take the actions still eligible to run, in deferral order.
    /// Stale-generation entries are dropped permanently.
    pub fn drain(&mut self) -> Vec<GatedAction> {
        let generation = self.generation;
        std::mem::take(&mut self.pending)
            .into_iter()
            .filter(|(g, _)| *g == generation)
            .map(|(_, a)| a)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
