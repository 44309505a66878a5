//! Waveform reduction for time-domain display.

/// Reduces a sample buffer to at most `max_points` values for plotting.
///
/// A buffer that already fits is returned as-is; longer buffers are sampled
/// proportionally (`src = i * len / max_points`), which covers the whole
/// signal but can skip short peaks. Use [`envelope`] when peaks must
/// survive the reduction.
pub fn decimate(samples: &[f32], max_points: usize) -> Vec<f32> {
    if max_points == 0 || samples.is_empty() {
        return Vec::new();
    }
    if samples.len() <= max_points {
        return samples.to_vec();
    }
    (0..max_points)
        .map(|i| samples[i * samples.len() / max_points])
        .collect()
}

/// Per-column (min, max) envelope over `columns` proportional slices.
///
/// Every column covers at least one sample, so with more columns than
/// samples the pairs collapse to min == max.
pub fn envelope(samples: &[f32], columns: usize) -> Vec<(f32, f32)> {
    if columns == 0 || samples.is_empty() {
        return Vec::new();
    }
    let len = samples.len();
    let mut out = Vec::with_capacity(columns);
    for c in 0..columns {
        let i0 = c * len / columns;
        let i1 = ((c + 1) * len / columns).max(i0 + 1).min(len);
        let mut min_val = f32::MAX;
        let mut max_val = f32::MIN;
        for &s in &samples[i0..i1] {
            if s < min_val {
                min_val = s;
            }
            if s > max_val {
                max_val = s;
            }
        }
        out.push((min_val, max_val));
    }
    out
}
