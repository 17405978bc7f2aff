//! Interval spawn trigger driven by host frame time

/// Repeating timer advanced by elapsed milliseconds
///
/// Fires at most once per `advance` call. Leftover time is capped at one
/// interval so a long stall cannot queue a burst of spawns.
#[derive(Debug, Clone, Default)]
pub struct SpawnTimer {
    interval_ms: f32,
    elapsed_ms: f32,
    armed: bool,
}

impl SpawnTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm with a fresh interval, discarding any previous schedule
    pub fn arm(&mut self, interval_ms: f32) {
        self.disarm();
        self.interval_ms = interval_ms;
        self.armed = true;
    }

    /// Change the interval without losing accumulated time
    pub fn rearm(&mut self, interval_ms: f32) {
        if self.armed {
            self.interval_ms = interval_ms;
            self.elapsed_ms = self.elapsed_ms.min(interval_ms);
        }
    }

    pub fn disarm(&mut self) {
        self.armed = false;
        self.elapsed_ms = 0.0;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn interval_ms(&self) -> f32 {
        self.interval_ms
    }

    /// Accumulate time; returns true when the trigger fires
    pub fn advance(&mut self, elapsed_ms: f32) -> bool {
        if !self.armed || self.interval_ms <= 0.0 {
            return false;
        }
        self.elapsed_ms += elapsed_ms.max(0.0);
        if self.elapsed_ms >= self.interval_ms {
            self.elapsed_ms = (self.elapsed_ms - self.interval_ms).min(self.interval_ms);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disarmed_never_fires() {
        let mut timer = SpawnTimer::new();
        assert!(!timer.advance(10_000.0));
        timer.arm(100.0);
        timer.disarm();
        assert!(!timer.advance(10_000.0));
    }

    #[test]
    fn test_fires_on_interval() {
        let mut timer = SpawnTimer::new();
        timer.arm(100.0);
        assert!(!timer.advance(60.0));
        assert!(timer.advance(60.0));
        // 20ms carried over
        assert!(!timer.advance(70.0));
        assert!(timer.advance(10.0));
    }

    #[test]
    fn test_stall_fires_once() {
        let mut timer = SpawnTimer::new();
        timer.arm(100.0);
        assert!(timer.advance(5_000.0));
        assert!(timer.advance(0.0));
        assert!(!timer.advance(0.0));
    }

    #[test]
    fn test_arm_resets_accumulated_time() {
        let mut timer = SpawnTimer::new();
        timer.arm(100.0);
        timer.advance(90.0);
        timer.arm(100.0);
        assert!(!timer.advance(20.0));
    }

    #[test]
    fn test_rearm_keeps_progress() {
        let mut timer = SpawnTimer::new();
        timer.arm(900.0);
        timer.advance(500.0);
        timer.rearm(400.0);
        assert_eq!(timer.interval_ms(), 400.0);
        assert!(timer.advance(0.0));
    }
}
