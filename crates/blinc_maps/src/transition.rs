use crate::color::Color;
use crate::interpolate::lerp_f32;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueTransition {
    start: f32,
    end: f32,
    duration: f32,
    elapsed: f32,
    value: f32,
}

impl ValueTransition {
    pub fn new(start: f32, end: f32, duration_seconds: f32) -> Self {
        let duration = duration_seconds.max(1e-6);
        Self {
            start,
            end,
            duration,
            elapsed: 0.0,
            value: start,
        }
    }

    pub fn step(&mut self, dt_seconds: f32) {
        if self.is_finished() {
            self.value = self.end;
            return;
        }
        self.elapsed = (self.elapsed + dt_seconds.max(0.0)).min(self.duration);
        let t = self.elapsed / self.duration;
        self.value = lerp_f32(self.start, self.end, t);
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Fill tween from the hover color back to a shape's normal color after the
/// pointer leaves it. Runs independently of zoom redraws.
///
/// The normal color is supplied on every read, so a fade follows a shape
/// whose value changes mid-fade.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorFade {
    from: Color,
    progress: ValueTransition,
}

impl ColorFade {
    pub fn new(from: Color, duration_seconds: f32) -> Self {
        Self {
            from,
            progress: ValueTransition::new(0.0, 1.0, duration_seconds),
        }
    }

    pub fn step(&mut self, dt_seconds: f32) {
        self.progress.step(dt_seconds);
    }

    /// Current fill on the way to `normal`.
    pub fn color(&self, normal: Color) -> Color {
        Color::tween(self.from, normal, self.progress.value())
    }

    pub fn is_finished(&self) -> bool {
        self.progress.is_finished()
    }
}
