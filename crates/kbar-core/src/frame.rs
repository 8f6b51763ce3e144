// File: crates/kbar-core/src/frame.rs
// Summary: Tabular OHLCV frame (datetime index + open/high/low/close[/volume] columns).

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::error::{PlotError, PlotResult};
use crate::series::Series;

/// One row of the frame, as handed to the candle renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candle {
    pub o: f64,
    pub h: f64,
    pub l: f64,
    pub c: f64,
}

impl Candle {
    pub fn is_up(&self) -> bool {
        self.c >= self.o
    }

    pub fn is_finite(&self) -> bool {
        self.o.is_finite() && self.h.is_finite() && self.l.is_finite() && self.c.is_finite()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OhlcvFrame {
    index: Vec<NaiveDateTime>,
    open: Series,
    high: Series,
    low: Series,
    close: Series,
    volume: Option<Series>,
}

impl OhlcvFrame {
    /// Build a frame from equally sized columns.
    pub fn new(
        index: Vec<NaiveDateTime>,
        open: Vec<f64>,
        high: Vec<f64>,
        low: Vec<f64>,
        close: Vec<f64>,
        volume: Option<Vec<f64>>,
    ) -> PlotResult<Self> {
        let expected = index.len();
        let check = |column: &'static str, len: usize| {
            if len == expected {
                Ok(())
            } else {
                Err(PlotError::ColumnLength { column, expected, actual: len })
            }
        };
        check("Open", open.len())?;
        check("High", high.len())?;
        check("Low", low.len())?;
        check("Close", close.len())?;
        if let Some(v) = &volume {
            check("Volume", v.len())?;
        }
        Ok(Self {
            index,
            open: Series::new("Open", open),
            high: Series::new("High", high),
            low: Series::new("Low", low),
            close: Series::new("Close", close),
            volume: volume.map(|v| Series::new("Volume", v)),
        })
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn index(&self) -> &[NaiveDateTime] {
        &self.index
    }

    pub fn open(&self) -> &Series {
        &self.open
    }

    pub fn high(&self) -> &Series {
        &self.high
    }

    pub fn low(&self) -> &Series {
        &self.low
    }

    pub fn close(&self) -> &Series {
        &self.close
    }

    pub fn volume(&self) -> Option<&Series> {
        self.volume.as_ref()
    }

    /// Row `i` as a candle; `None` when out of range.
    pub fn candle(&self, i: usize) -> Option<Candle> {
        Some(Candle {
            o: self.open.get(i)?,
            h: self.high.get(i)?,
            l: self.low.get(i)?,
            c: self.close.get(i)?,
        })
    }

    pub fn candles(&self) -> impl Iterator<Item = Candle> + '_ {
        (0..self.len()).filter_map(move |i| self.candle(i))
    }

    /// Finite (low, high) price range across all rows.
    pub fn price_range(&self) -> Option<(f64, f64)> {
        let (lo, _) = self.low.finite_range()?;
        let (_, hi) = self.high.finite_range()?;
        Some((lo.min(hi), hi.max(lo)))
    }
}

/// Daily timestamps starting at `start` (midnight), `periods` long.
pub fn date_range(start: NaiveDate, periods: usize) -> Vec<NaiveDateTime> {
    let first = start.and_time(chrono::NaiveTime::MIN);
    (0..periods)
        .map(|i| first + Duration::days(i as i64))
        .collect()
}
