//! Scales mapping data values to pixel positions and colors.
//!
//! Each scale is built once from the dataset's statistics and is immutable
//! afterwards; mapping is a pure method call.

use std::collections::HashMap;
use std::hash::Hash;

use crate::color::Color;
use crate::palette::Palette;

/// Categorical scale dividing a continuous range into equal, padded bands.
#[derive(Debug, Clone)]
pub struct BandScale<T> {
    domain: Vec<T>,
    index: HashMap<T, usize>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
    align: f64,
    step: f64,
    bandwidth: f64,
    offset: f64,
}

impl<T: Copy + Eq + Hash> BandScale<T> {
    /// Create a band scale. Duplicate domain values collapse, first
    /// occurrence wins the slot.
    pub fn new(domain: impl IntoIterator<Item = T>, range: (f64, f64)) -> Self {
        let mut index = HashMap::new();
        let mut values = Vec::new();
        for value in domain {
            if !index.contains_key(&value) {
                index.insert(value, values.len());
                values.push(value);
            }
        }

        let mut scale = Self {
            domain: values,
            index,
            range,
            padding_inner: 0.0,
            padding_outer: 0.0,
            align: 0.5,
            step: 0.0,
            bandwidth: 0.0,
            offset: 0.0,
        };
        scale.rescale();
        scale
    }

    /// Set inner and outer padding together.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding_inner = padding.clamp(0.0, 1.0);
        self.padding_outer = padding.max(0.0);
        self.rescale();
        self
    }

    /// Set where leftover space goes: 0 = start, 0.5 = centered, 1 = end.
    pub fn with_align(mut self, align: f64) -> Self {
        self.align = align.clamp(0.0, 1.0);
        self.rescale();
        self
    }

    fn rescale(&mut self) {
        let n = self.domain.len() as f64;
        let (r0, r1) = self.range;
        let (start, stop) = if r1 < r0 { (r1, r0) } else { (r0, r1) };

        self.step = (stop - start) / (n - self.padding_inner + self.padding_outer * 2.0).max(1.0);
        self.offset = start + (stop - start - self.step * (n - self.padding_inner)) * self.align;
        self.bandwidth = self.step * (1.0 - self.padding_inner);
    }

    /// Start position of the band for `value`, or `None` if it is not in
    /// the domain.
    pub fn map(&self, value: &T) -> Option<f64> {
        let i = *self.index.get(value)?;
        let slot = if self.range.1 < self.range.0 {
            self.domain.len() - 1 - i
        } else {
            i
        };
        Some(self.offset + self.step * slot as f64)
    }

    /// Center of the band for `value`.
    pub fn center(&self, value: &T) -> Option<f64> {
        self.map(value).map(|start| start + self.bandwidth / 2.0)
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn domain(&self) -> &[T] {
        &self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }
}

/// Continuous linear mapping between two intervals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Map a domain value. A degenerate domain maps everything to the
    /// middle of the range.
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let t = if d1 == d0 { 0.5 } else { (value - d0) / (d1 - d0) };
        r0 + t * (r1 - r0)
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }
}

/// Continuous mapping from a numeric domain onto a palette.
#[derive(Debug, Clone)]
pub struct SequentialScale {
    domain: (f64, f64),
    palette: Palette,
}

impl SequentialScale {
    pub fn new(domain: (f64, f64), palette: Palette) -> Self {
        Self { domain, palette }
    }

    /// Normalized position of `value` in the domain. Equal bounds give 0.5.
    pub fn normalize(&self, value: f64) -> f64 {
        let (x0, x1) = self.domain;
        if x1 == x0 {
            0.5
        } else {
            (value - x0) / (x1 - x0)
        }
    }

    /// Color for `value`; NaN is transparent.
    pub fn map(&self, value: f64) -> Color {
        if value.is_nan() {
            return Color::transparent();
        }
        self.palette.interpolate(self.normalize(value))
    }

    /// Roughly `count` evenly spaced round values across the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count)
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = 1.4142135623730951; // sqrt(2)

/// Integer bounds and increment for [`ticks`]. A negative increment means
/// "divide by its magnitude", which keeps decimal ticks exact.
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
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

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let scale = 10f64.powf(-power) / factor;
        i1 = (start * scale).round();
        i2 = (stop * scale).round();
        if i1 / scale < start {
            i1 += 1.0;
        }
        if i2 / scale > stop {
            i2 -= 1.0;
        }
        inc = -scale;
    } else {
        let scale = 10f64.powf(power) * factor;
        i1 = (start / scale).round();
        i2 = (stop / scale).round();
        if i1 * scale < start {
            i1 += 1.0;
        }
        if i2 * scale > stop {
            i2 -= 1.0;
        }
        inc = scale;
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

/// Approximately `count` round, evenly spaced values within `[start, stop]`.
///
/// The spacing is 1, 2 or 5 times a power of ten, so the exact number of
/// values depends on the interval. Equal bounds yield the single bound.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || start.is_nan() || stop.is_nan() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let (i1, i2, inc) = tick_spec(lo, hi, count as f64);
    if !(i2 >= i1) {
        return Vec::new();
    }

    let n = (i2 - i1) as usize + 1;
    let value = |k: f64| if inc < 0.0 { k / -inc } else { k * inc };
    (0..n)
        .map(|i| {
            if reverse {
                value(i2 - i as f64)
            } else {
                value(i1 + i as f64)
            }
        })
        .collect()
}
