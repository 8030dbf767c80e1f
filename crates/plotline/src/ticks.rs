//! Nice-number axis tick computation.

/// Bounds on how many ticks an axis aims for.
#[derive(Clone, Debug)]
pub struct TickConfig {
    pub min_ticks: usize,
    pub max_ticks: usize,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            min_ticks: 4,
            max_ticks: 10,
        }
    }
}

/// Tick positions plus the step that produced them.
#[derive(Clone, Debug)]
pub struct Ticks {
    pub positions: Vec<f64>,
    pub step: f64,
}

impl Ticks {
    /// Format a tick value with the precision its step calls for.
    pub fn label(&self, value: f64) -> String {
        let decimals = if self.step >= 1.0 {
            0
        } else {
            (-self.step.log10().floor() as i32).clamp(0, 6) as usize
        };
        format!("{value:.decimals$}")
    }
}

/// Compute nice tick positions covering `[min, max]`.
///
/// The step is the 1/2/5-scaled power of ten closest to the rough step for
/// the target tick count; the first tick is the step-multiple at or below
/// `min`.
pub fn linear_ticks(range_min: f64, range_max: f64, config: &TickConfig) -> Ticks {
    if !range_min.is_finite() || !range_max.is_finite() || (range_max - range_min).abs() < f64::EPSILON {
        return Ticks {
            positions: vec![range_min],
            step: 1.0,
        };
    }

    let (lo, hi) = if range_min < range_max {
        (range_min, range_max)
    } else {
        (range_max, range_min)
    };

    let target = ((config.min_ticks + config.max_ticks) / 2).max(2) as f64;
    let rough_step = (hi - lo) / target;

    let magnitude = 10.0_f64.powf(rough_step.log10().floor());
    let normalized = rough_step / magnitude;

    let nice_factor = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };

    let step = nice_factor * magnitude;
    let start = (lo / step).floor() * step;

    let mut positions = Vec::new();
    let mut v = start;
    while v <= hi + step * 0.001 {
        positions.push(v);
        v += step;
    }

    Ticks { positions, step }
}
