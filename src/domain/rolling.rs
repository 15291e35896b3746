//! Rolling-window series math backing the in-memory bar series.
//!
//! Inputs are ordered oldest first. Each function returns one entry per
//! input value; entries inside the warmup window are `None`.

use crate::domain::ohlcv::OhlcvBar;

/// SMA(n)[i] = sum(P[i-n+1..=i]) / n
pub fn sma(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());
    if period == 0 {
        out.resize(values.len(), None);
        return out;
    }

    let mut sum = 0.0;
    for (i, &v) in values.iter().enumerate() {
        sum += v;
        if i >= period {
            sum -= values[i - period];
        }
        out.push((i + 1 >= period).then(|| sum / period as f64));
    }
    out
}

/// k = 2/(n+1), seeded with the first SMA, then EMA[i] = P[i]*k + EMA[i-1]*(1-k).
pub fn ema(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let k = 2.0 / (period as f64 + 1.0);
    recursive(values, period, |prev, v| v * k + prev * (1.0 - k))
}

/// Wilder smoothing, seeded with the first SMA: SMMA[i] = (SMMA[i-1]*(n-1) + P[i]) / n.
pub fn smma(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let n = period as f64;
    recursive(values, period, |prev, v| (prev * (n - 1.0) + v) / n)
}

fn recursive(values: &[f64], period: usize, step: impl Fn(f64, f64) -> f64) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());
    if period == 0 {
        out.resize(values.len(), None);
        return out;
    }

    let mut sum = 0.0;
    let mut current = 0.0;
    for (i, &v) in values.iter().enumerate() {
        if i + 1 < period {
            sum += v;
            out.push(None);
        } else if i + 1 == period {
            sum += v;
            current = sum / period as f64;
            out.push(Some(current));
        } else {
            current = step(current, v);
            out.push(Some(current));
        }
    }
    out
}

/// O(n) sliding window.
/// LWMA(n) = (1*P[i-n+1] + 2*P[i-n+2] + ... + n*P[i]) / (n*(n+1)/2)
pub fn lwma(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());
    if period == 0 {
        out.resize(values.len(), None);
        return out;
    }

    let divisor = (period * (period + 1)) as f64 / 2.0;
    let mut weighted_sum = 0.0;
    let mut window_sum = 0.0;
    for (i, &v) in values.iter().enumerate() {
        if i < period {
            weighted_sum += (i + 1) as f64 * v;
            window_sum += v;
        } else {
            weighted_sum += period as f64 * v - window_sum;
            window_sum += v - values[i - period];
        }
        out.push((i + 1 >= period).then(|| weighted_sum / divisor));
    }
    out
}

/// Population standard deviation around the window's SMA.
/// STDDEV(n)[i] = sqrt(sum((P[i-j] - SMA(n)[i])^2 for j in 0..n) / n)
pub fn stddev(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let means = sma(values, period);
    means
        .iter()
        .enumerate()
        .map(|(i, mean)| {
            let mean = (*mean)?;
            let window = &values[i + 1 - period..=i];
            let variance = window
                .iter()
                .map(|v| {
                    let diff = v - mean;
                    diff * diff
                })
                .sum::<f64>()
                / period as f64;
            Some(variance.sqrt())
        })
        .collect()
}

/// Average true range with Wilder smoothing, seeded with the mean of the
/// first `period` true ranges. The first bar's true range is high - low.
pub fn atr(bars: &[OhlcvBar], period: usize) -> Vec<Option<f64>> {
    let true_ranges: Vec<f64> = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            if i == 0 {
                bar.high - bar.low
            } else {
                bar.true_range(bars[i - 1].close)
            }
        })
        .collect();
    smma(&true_ranges, period)
}
