/// Dots drifting behind the page.
pub const PARTICLE_COUNT: usize = 35;

const MIN_DURATION_S: f64 = 10.0;
const DURATION_SPREAD_S: f64 = 30.0;

/// One background dot drifting between two points, given in percent of the
/// viewport, and back again.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub duration_s: f64,
}

impl Particle {
    /// Inline style feeding the `drift` keyframes.
    pub fn style(&self) -> String {
        format!(
            "--from-x:{:.2}vw;--from-y:{:.2}vh;--to-x:{:.2}vw;--to-y:{:.2}vh;animation-duration:{:.2}s",
            self.from.0, self.from.1, self.to.0, self.to.1, self.duration_s
        )
    }
}

/// Places `count` particles using `random`, which yields values in `[0, 1)`.
pub fn scatter(count: usize, mut random: impl FnMut() -> f64) -> Vec<Particle> {
    let mut unit = move || random().clamp(0.0, 1.0);
    (0..count)
        .map(|_| Particle {
            from: (unit() * 100.0, unit() * 100.0),
            to: (unit() * 100.0, unit() * 100.0),
            duration_s: MIN_DURATION_S + unit() * DURATION_SPREAD_S,
        })
        .collect()
}
