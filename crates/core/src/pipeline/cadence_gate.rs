/// Limits sink emissions to at most one per interval.
///
/// Plain timestamp comparison: nothing is scheduled, so there is nothing to
/// cancel. The first call always opens the gate.
#[derive(Clone, Debug)]
pub struct CadenceGate {
    interval_ms: u64,
    last_emit_ms: Option<u64>,
}

impl CadenceGate {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_emit_ms: None,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn last_emit_ms(&self) -> Option<u64> {
        self.last_emit_ms
    }

    /// True when strictly more than the interval has passed since the last
    /// recorded emission. A clock that moved backwards keeps the gate shut.
    pub fn is_open(&self, now_ms: u64) -> bool {
        match self.last_emit_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) > self.interval_ms,
        }
    }

    pub fn record_emit(&mut self, now_ms: u64) {
        self.last_emit_ms = Some(now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_opens() {
        let gate = CadenceGate::new(2000);
        assert!(gate.is_open(0));
        assert!(gate.last_emit_ms().is_none());
    }

    #[test]
    fn test_closed_within_interval() {
        let mut gate = CadenceGate::new(2000);
        gate.record_emit(10_000);
        assert!(!gate.is_open(10_000));
        assert!(!gate.is_open(11_999));
    }

    #[test]
    fn test_interval_boundary_is_exclusive() {
        let mut gate = CadenceGate::new(2000);
        gate.record_emit(10_000);
        assert!(!gate.is_open(12_000));
        assert!(gate.is_open(12_001));
    }

    #[test]
    fn test_backwards_clock_keeps_gate_closed() {
        let mut gate = CadenceGate::new(2000);
        gate.record_emit(10_000);
        assert!(!gate.is_open(5_000));
    }

    #[test]
    fn test_unrecorded_open_does_not_advance() {
        let mut gate = CadenceGate::new(100);
        gate.record_emit(0);
        assert!(gate.is_open(150));
        // Caller failed to deliver and did not record; still open later.
        assert!(gate.is_open(160));
        gate.record_emit(160);
        assert!(!gate.is_open(200));
    }
}
