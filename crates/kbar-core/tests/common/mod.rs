// File: crates/kbar-core/tests/common/mod.rs
// Purpose: Shared fixture frames for integration tests.

use chrono::NaiveDate;
use kbar_core::{date_range, OhlcvFrame};

/// Four daily rows starting 2023-01-01, all closing above their open.
pub fn four_day_frame() -> OhlcvFrame {
    OhlcvFrame::new(
        date_range(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(), 4),
        vec![100.0, 102.0, 101.0, 105.0],
        vec![103.0, 106.0, 104.0, 108.0],
        vec![99.0, 100.0, 98.0, 102.0],
        vec![102.0, 104.0, 103.0, 107.0],
        Some(vec![1000.0, 1500.0, 1200.0, 1300.0]),
    )
    .expect("valid frame")
}

/// `n` rows of a gently oscillating price path with volume.
#[allow(dead_code)]
pub fn wave_frame(n: usize) -> OhlcvFrame {
    let mut open = Vec::with_capacity(n);
    let mut high = Vec::with_capacity(n);
    let mut low = Vec::with_capacity(n);
    let mut close = Vec::with_capacity(n);
    let mut volume = Vec::with_capacity(n);
    let mut price = 100.0f64;
    for i in 0..n {
        let o = price;
        let c = o + (i as f64 * 0.7).sin() * 2.0;
        high.push(o.max(c) + 1.0);
        low.push(o.min(c) - 1.0);
        open.push(o);
        close.push(c);
        volume.push(1000.0 + (i % 7) as f64 * 150.0);
        price = c;
    }
    OhlcvFrame::new(
        date_range(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), n),
        open,
        high,
        low,
        close,
        Some(volume),
    )
    .expect("valid frame")
}
