// File: crates/kbar-core/src/series.rs
// Summary: One-dimensional named value column; NaN marks a missing value.

#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    name: String,
    values: Vec<f64>,
}

impl Series {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self { name: name.into(), values }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<f64> {
        self.values.get(i).copied()
    }

    /// Trailing simple moving average over `window` values.
    ///
    /// The output has the same length as the input; the first `window - 1`
    /// positions (and any window containing a NaN) are NaN.
    pub fn rolling_mean(&self, window: usize) -> Series {
        let name = format!("{}_ma{}", self.name, window);
        let n = self.values.len();
        let mut out = vec![f64::NAN; n];
        if window == 0 || n < window {
            return Series::new(name, out);
        }
        let mut sum = 0.0f64;
        let mut nans = 0usize;
        for i in 0..n {
            let v = self.values[i];
            if v.is_nan() { nans += 1; } else { sum += v; }
            if i >= window {
                let old = self.values[i - window];
                if old.is_nan() { nans -= 1; } else { sum -= old; }
            }
            if i + 1 >= window && nans == 0 {
                out[i] = sum / window as f64;
            }
        }
        Series::new(name, out)
    }

    /// Finite (min, max) over the column, ignoring NaN.
    pub fn finite_range(&self) -> Option<(f64, f64)> {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for &v in &self.values {
            if v.is_finite() {
                lo = lo.min(v);
                hi = hi.max(v);
            }
        }
        if lo.is_finite() { Some((lo, hi)) } else { None }
    }
}

impl From<Vec<f64>> for Series {
    fn from(values: Vec<f64>) -> Self {
        Series::new("", values)
    }
}
