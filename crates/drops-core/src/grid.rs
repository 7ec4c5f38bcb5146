// File: crates/drops-core/src/grid.rs
// Summary: Simple grid/tick layout helpers.

pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

/// Round 1/2/5 x 10^k step giving roughly `target` intervals over `[0, max]`.
pub fn nice_step(max: f64, target: usize) -> f64 {
    if !(max.is_finite() && max > 0.0) || target == 0 {
        return 1.0;
    }
    let raw = max / target as f64;
    let mag = 10f64.powf(raw.log10().floor());
    let norm = raw / mag;
    let nice = if norm <= 1.0 { 1.0 } else if norm <= 2.0 { 2.0 } else if norm <= 5.0 { 5.0 } else { 10.0 };
    // Drop counts are whole numbers.
    (nice * mag).max(1.0)
}

/// Tick values from 0 up to and including the last step not above `max`.
pub fn value_ticks(max: f64, target: usize) -> Vec<f64> {
    let step = nice_step(max, target);
    let top = if max.is_finite() && max > 0.0 { max } else { 1.0 };
    let n = (top / step + 1e-9).floor() as usize;
    (0..=n).map(|i| i as f64 * step).collect()
}
