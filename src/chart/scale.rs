//! Time (x) and linear (y) scales plus their tick generation.
//!
//! Both scales interpolate linearly between a domain and a pixel range. Ticks
//! follow the usual "nice step" rule: 1, 2 or 5 times a power of ten, picked so
//! that roughly `count` ticks cover the domain.

use chrono::{Datelike, NaiveDate};
use num_format::{Locale, ToFormattedString};
use serde::Serialize;

use crate::config::ChartConfig;
use crate::domain::Dataset;

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Approximate tick count used for both axes.
pub const DEFAULT_TICK_COUNT: usize = 10;

/// A monotonic mapping from a domain to pixels.
pub trait Scale {
    type Domain: Copy;

    fn map(&self, v: Self::Domain) -> f64;

    /// Output range as `(start, end)`; `end` may be smaller than `start`.
    fn range(&self) -> (f64, f64);

    fn ticks(&self, count: usize) -> Vec<Self::Domain>;

    fn tick_label(&self, v: Self::Domain) -> String;
}

/// Dates to pixels, linear over elapsed days.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeScale {
    pub domain: (NaiveDate, NaiveDate),
    pub range: (f64, f64),
}

impl TimeScale {
    pub fn new(domain: (NaiveDate, NaiveDate), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    fn span_days(&self) -> i64 {
        (self.domain.1 - self.domain.0).num_days()
    }
}

impl Scale for TimeScale {
    type Domain = NaiveDate;

    fn map(&self, date: NaiveDate) -> f64 {
        let (r0, r1) = self.range;
        let span = self.span_days();
        if span == 0 {
            return (r0 + r1) / 2.0;
        }
        let t = (date - self.domain.0).num_days() as f64 / span as f64;
        r0 + t * (r1 - r0)
    }

    fn range(&self) -> (f64, f64) {
        self.range
    }

    fn ticks(&self, count: usize) -> Vec<NaiveDate> {
        let (lo, hi) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        if count == 0 {
            return Vec::new();
        }

        let span = (hi - lo).num_days() as f64;
        match TimeInterval::pick(lo, hi, span / count as f64, count) {
            TimeInterval::Days(step) => day_ticks(lo, hi, step),
            TimeInterval::Months(step) => month_ticks(lo, hi, step),
            TimeInterval::Years(step) => year_ticks(lo, hi, step),
        }
    }

    fn tick_label(&self, date: NaiveDate) -> String {
        time_tick_label(date)
    }
}

/// Values to pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }
}

impl Scale for LinearScale {
    type Domain = f64;

    fn map(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (v - d0) / (d1 - d0) * (r1 - r0)
    }

    fn range(&self) -> (f64, f64) {
        self.range
    }

    fn ticks(&self, count: usize) -> Vec<f64> {
        let (start, stop) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        linear_ticks(start, stop, count)
    }

    fn tick_label(&self, v: f64) -> String {
        let (start, stop) = self.domain;
        let step = tick_step(start.min(stop), start.max(stop), DEFAULT_TICK_COUNT).abs();
        let decimals = if step > 0.0 && step.is_finite() {
            (-step.log10().floor()).max(0.0) as usize
        } else {
            0
        };
        format_fixed_grouped(v, decimals)
    }
}

/// The pair of scales every bar is positioned with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScaleMapping {
    pub x: TimeScale,
    pub y: LinearScale,
}

impl ScaleMapping {
    /// Time scale over `[from_date, to_date]` onto `[0, plot_width]`, linear
    /// scale over `[0, max(value)]` onto `[plot_height, 0]`.
    ///
    /// An empty dataset (or one whose maximum is not positive) uses the value
    /// domain `[0, 1]` so the y axis stays drawable.
    pub fn build(config: &ChartConfig, dataset: &Dataset) -> Self {
        let max = dataset.max_value().filter(|m| *m > 0.0).unwrap_or(1.0);
        Self {
            x: TimeScale::new(
                (dataset.from_date, dataset.to_date),
                (0.0, config.plot_width),
            ),
            y: LinearScale::new((0.0, max), (config.plot_height, 0.0)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimeInterval {
    Days(u32),
    Months(u32),
    Years(i32),
}

impl TimeInterval {
    /// Pick the interval whose nominal length is closest to `target_days`.
    fn pick(lo: NaiveDate, hi: NaiveDate, target_days: f64, count: usize) -> Self {
        const CANDIDATES: [(TimeInterval, f64); 4] = [
            (TimeInterval::Days(1), 1.0),
            (TimeInterval::Days(2), 2.0),
            (TimeInterval::Months(1), 30.0),
            (TimeInterval::Months(3), 91.0),
        ];
        const YEAR_DAYS: f64 = 365.0;

        if target_days > YEAR_DAYS {
            let start = lo.year() as f64 + lo.ordinal0() as f64 / YEAR_DAYS;
            let stop = hi.year() as f64 + hi.ordinal0() as f64 / YEAR_DAYS;
            let step = tick_step(start, stop, count).max(1.0).round() as i32;
            return TimeInterval::Years(step);
        }

        let mut prev = CANDIDATES[0];
        for cand in CANDIDATES.iter().copied().chain(std::iter::once((TimeInterval::Years(1), YEAR_DAYS))) {
            if cand.1 >= target_days {
                // Closer in ratio terms wins, matching the geometric spacing of candidates.
                return if prev.1 < target_days && target_days / prev.1 < cand.1 / target_days {
                    prev.0
                } else {
                    cand.0
                };
            }
            prev = cand;
        }
        TimeInterval::Years(1)
    }
}

fn day_ticks(lo: NaiveDate, hi: NaiveDate, step: u32) -> Vec<NaiveDate> {
    lo.iter_days()
        .take_while(|d| *d <= hi)
        .filter(|d| (d.day() - 1) % step == 0)
        .collect()
}

fn month_ticks(lo: NaiveDate, hi: NaiveDate, step: u32) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let (mut y, mut m) = (lo.year(), lo.month());
    loop {
        let Some(first) = NaiveDate::from_ymd_opt(y, m, 1) else {
            break;
        };
        if first > hi {
            break;
        }
        if first >= lo && (m - 1) % step == 0 {
            out.push(first);
        }
        if m == 12 {
            y += 1;
            m = 1;
        } else {
            m += 1;
        }
    }
    out
}

fn year_ticks(lo: NaiveDate, hi: NaiveDate, step: i32) -> Vec<NaiveDate> {
    let step = step.max(1);
    let mut year = lo.year();
    if NaiveDate::from_ymd_opt(year, 1, 1).is_some_and(|d| d < lo) {
        year += 1;
    }
    year += (step - year.rem_euclid(step)) % step;

    let mut out = Vec::new();
    while let Some(d) = NaiveDate::from_ymd_opt(year, 1, 1) {
        if d > hi {
            break;
        }
        out.push(d);
        year += step;
    }
    out
}

/// Label for a time tick: `YYYY` on year boundaries, the month name on month
/// boundaries, `Mon DD` otherwise.
pub fn time_tick_label(date: NaiveDate) -> String {
    if date.day() != 1 {
        date.format("%b %d").to_string()
    } else if date.month() != 1 {
        date.format("%B").to_string()
    } else {
        date.format("%Y").to_string()
    }
}

/// Nice step size covering `[start, stop]` with about `count` ticks.
///
/// Negative results encode `1 / step` for sub-unit steps, keeping the tick
/// arithmetic exact.
fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / count.max(1) as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    if power >= 0.0 {
        10f64.powf(power) * factor
    } else {
        -(10f64.powf(-power)) / factor
    }
}

fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    if !(start.is_finite() && stop.is_finite()) || stop <= start || count == 0 {
        return 0.0;
    }
    let inc = tick_increment(start, stop, count);
    if inc < 0.0 { -1.0 / inc } else { inc }
}

fn linear_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !(start.is_finite() && stop.is_finite()) {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let inc = tick_increment(start, stop, count);
    if !inc.is_finite() || inc == 0.0 {
        return Vec::new();
    }

    if inc > 0.0 {
        let mut i1 = (start / inc).round();
        let mut i2 = (stop / inc).round();
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
        let n = (i2 - i1 + 1.0).max(0.0) as usize;
        (0..n).map(|i| (i1 + i as f64) * inc).collect()
    } else {
        let inv = -inc;
        let mut i1 = (start * inv).round();
        let mut i2 = (stop * inv).round();
        if i1 / inv < start {
            i1 += 1.0;
        }
        if i2 / inv > stop {
            i2 -= 1.0;
        }
        let n = (i2 - i1 + 1.0).max(0.0) as usize;
        (0..n).map(|i| (i1 + i as f64) / inv).collect()
    }
}

fn format_fixed_grouped(v: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, v.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let grouped = int_part
        .parse::<u64>()
        .map(|n| n.to_formatted_string(&Locale::en))
        .unwrap_or_else(|_| int_part.to_string());
    let sign = if v < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}
