//! Time-based scalar tweens with a delay, in the style of a keyframe animator.

/// Easing curves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Ease {
    Linear,
    /// Quadratic ease-out, `1 - (1 - p)^2`.
    #[default]
    Power1Out,
    /// Smoothstep ease-in-out.
    InOut,
}

impl Ease {
    pub fn apply(self, p: f64) -> f64 {
        let p = p.clamp(0.0, 1.0);
        match self {
            Ease::Linear => p,
            Ease::Power1Out => 1.0 - (1.0 - p) * (1.0 - p),
            Ease::InOut => p * p * (3.0 - 2.0 * p),
        }
    }
}

/// Linear interpolation between two values.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// A value animated from `from` to `to`, starting `delay` seconds after `start`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub start: f64,
    pub delay: f64,
    pub duration: f64,
    pub ease: Ease,
}

impl Tween {
    pub fn new(from: f64, to: f64, start: f64, delay: f64, duration: f64) -> Self {
        Self {
            from,
            to,
            start,
            delay: delay.max(0.0),
            duration: duration.max(0.0),
            ease: Ease::default(),
        }
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Wall-clock time at which the value starts to move.
    pub fn begins_at(&self) -> f64 {
        self.start + self.delay
    }

    pub fn ends_at(&self) -> f64 {
        self.begins_at() + self.duration
    }

    /// Normalized progress in [0, 1].
    pub fn progress(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return if now >= self.begins_at() { 1.0 } else { 0.0 };
        }
        ((now - self.begins_at()) / self.duration).clamp(0.0, 1.0)
    }

    pub fn value_at(&self, now: f64) -> f64 {
        lerp(self.from, self.to, self.ease.apply(self.progress(now)))
    }

    pub fn is_finished(&self, now: f64) -> bool {
        now >= self.ends_at()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_endpoints() {
        for e in [Ease::Linear, Ease::Power1Out, Ease::InOut] {
            assert_eq!(e.apply(0.0), 0.0);
            assert_eq!(e.apply(1.0), 1.0);
        }
        assert!((Ease::Power1Out.apply(0.5) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn tween_holds_before_delay_and_after_end() {
        let t = Tween::new(1.0, 0.0, 10.0, 1.0, 3.0);
        assert_eq!(t.value_at(10.5), 1.0);
        assert_eq!(t.value_at(11.0), 1.0);
        assert_eq!(t.value_at(14.0), 0.0);
        assert_eq!(t.value_at(100.0), 0.0);
        assert!(t.is_finished(14.0));
        assert!(!t.is_finished(13.9));
    }

    #[test]
    fn zero_duration_jumps() {
        let t = Tween::new(0.0, 1.0, 0.0, 0.5, 0.0);
        assert_eq!(t.value_at(0.4), 0.0);
        assert_eq!(t.value_at(0.5), 1.0);
    }
}
