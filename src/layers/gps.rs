use crate::core::constants::{BLINK_BASE_SIZE, BLINK_MAX_SIZE, BLINK_PERIOD_MS};
use crate::core::geo::LatLng;
use crate::layers::animation::{lerp, EasingType};
use instant::{Duration, Instant};

/// Phase of the blink cycle. The ring expands and fades for one period,
/// then spends one resetting step snapping back before it expands again,
/// forever; the restart lives in the state machine rather than in a
/// completion callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkPhase {
    Expanding,
    Resetting,
}

/// Device-position indicator with a pulsing ring
#[derive(Debug, Clone)]
pub struct GpsIndicator {
    position: LatLng,
    phase: BlinkPhase,
    phase_started: Instant,
    period: Duration,
    easing: EasingType,
    ring_size: f64,
    ring_opacity: f64,
}

impl GpsIndicator {
    pub fn new(now: Instant) -> Self {
        Self::at(LatLng::new(4.1587278341067755, 9.28267375685355), now)
    }

    pub fn at(position: LatLng, now: Instant) -> Self {
        Self {
            position,
            phase: BlinkPhase::Expanding,
            phase_started: now,
            period: Duration::from_millis(BLINK_PERIOD_MS),
            easing: EasingType::Linear,
            ring_size: BLINK_BASE_SIZE,
            ring_opacity: 1.0,
        }
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    /// Moves the indicator. Position updates never disturb the blink cycle.
    pub fn set_position(&mut self, position: LatLng) {
        self.position = position;
    }

    pub fn phase(&self) -> BlinkPhase {
        self.phase
    }

    /// Current ring diameter in pixels
    pub fn ring_size(&self) -> f64 {
        self.ring_size
    }

    /// Current ring opacity in `[0, 1]`
    pub fn ring_opacity(&self) -> f64 {
        self.ring_opacity
    }

    /// Advances the blink cycle to `now`.
    pub fn tick(&mut self, now: Instant) {
        match self.phase {
            BlinkPhase::Expanding => {
                let elapsed = now.saturating_duration_since(self.phase_started);
                if elapsed >= self.period {
                    self.phase = BlinkPhase::Resetting;
                    self.phase_started = now;
                    return;
                }
                let t = self
                    .easing
                    .apply(elapsed.as_secs_f64() / self.period.as_secs_f64());
                self.ring_size = lerp(BLINK_BASE_SIZE, BLINK_MAX_SIZE, t);
                self.ring_opacity = lerp(1.0, 0.0, t);
            }
            BlinkPhase::Resetting => {
                self.ring_size = BLINK_BASE_SIZE;
                self.ring_opacity = 1.0;
                self.phase = BlinkPhase::Expanding;
                self.phase_started = now;
            }
        }
    }
}
