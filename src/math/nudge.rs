/// One band of a snap table: values from `start` up to the next band step by `step`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NudgeRange {
    pub start: f64,
    pub step: f64,
}

/// Monotonic table of snap bands plus a global maximum.
///
/// Band `i` covers `[ranges[i].start, ranges[i + 1].start)`, the last band runs up to
/// `max`. The table minimum is the first band's start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NudgeTable<'a> {
    pub ranges: &'a [NudgeRange],
    pub max: f64,
}

const fn band(start: f64, step: f64) -> NudgeRange {
    NudgeRange { start, step }
}

/// Focal length in millimetres
pub const FOCAL_LENGTH_TABLE: NudgeTable<'static> = NudgeTable {
    ranges: &[
        band(1.0, 1.0),
        band(10.0, 2.0),
        band(20.0, 5.0),
        band(50.0, 10.0),
        band(100.0, 25.0),
        band(200.0, 50.0),
        band(500.0, 100.0),
    ],
    max: 1000.0,
};

/// Field of view in degrees
pub const FOV_TABLE: NudgeTable<'static> = NudgeTable {
    ranges: &[
        band(1.0, 1.0),
        band(10.0, 2.0),
        band(20.0, 5.0),
        band(60.0, 10.0),
        band(120.0, 15.0),
    ],
    max: 175.0,
};

/// Strafe sensitivity (distance travelled per moderate mouse movement)
pub const STRAFE_SENSITIVITY_TABLE: NudgeTable<'static> = NudgeTable {
    ranges: &[
        band(0.1, 0.1),
        band(1.0, 0.5),
        band(5.0, 1.0),
        band(10.0, 5.0),
        band(50.0, 10.0),
        band(100.0, 50.0),
        band(500.0, 100.0),
        band(1000.0, 500.0),
    ],
    max: 5000.0,
};

/// Step used in precise mode; values are rounded to three decimals
pub const PRECISE_STEP: f64 = 0.001;

/// Tolerance, in units of the active step, for treating a value as already snapped
const SNAP_EPSILON: f64 = 1e-9;

impl NudgeTable<'_> {
    pub fn min(&self) -> f64 {
        self.ranges.first().map_or(self.max, |r| r.start)
    }

    fn band_end(&self, index: usize) -> f64 {
        self.ranges.get(index + 1).map_or(self.max, |r| r.start)
    }

    /// Band a value belongs to when moving up: `start <= value < end`
    fn band_above(&self, value: f64) -> usize {
        self.ranges
            .iter()
            .rposition(|r| r.start <= value)
            .unwrap_or(0)
    }

    /// Band a value belongs to when moving down: `start < value <= end`
    fn band_below(&self, value: f64) -> usize {
        self.ranges
            .iter()
            .rposition(|r| r.start < value)
            .unwrap_or(0)
    }
}

/// Move `value` exactly one notch up (`direction > 0`) or down (`direction < 0`) along the
/// table, clamped to the table's range.
///
/// Off-grid values snap to the next grid value in the requested direction. A step never
/// carries past the neighbouring band boundary; the following call picks up the new band's
/// step.
pub fn nudge_value(value: f64, direction: i32, precise: bool, table: &NudgeTable) -> f64 {
    let (min, max) = (table.min(), table.max);
    let value = value.clamp(min, max);

    if direction == 0 {
        return value;
    }

    let next = if precise {
        let scaled = value / PRECISE_STEP;
        if direction > 0 {
            ((scaled + SNAP_EPSILON).floor() + 1.0) * PRECISE_STEP
        } else {
            ((scaled - SNAP_EPSILON).ceil() - 1.0) * PRECISE_STEP
        }
    } else if direction > 0 {
        let index = table.band_above(value);
        let NudgeRange { start, step } = table.ranges[index];
        let notches = ((value - start) / step + SNAP_EPSILON).floor() + 1.0;
        (start + notches * step).min(table.band_end(index))
    } else {
        let index = table.band_below(value);
        let NudgeRange { start, step } = table.ranges[index];
        let notches = ((value - start) / step - SNAP_EPSILON).ceil() - 1.0;
        (start + notches.max(0.0) * step).max(start)
    };

    let next = if precise {
        (next * 1000.0).round() / 1000.0
    } else {
        next
    };

    next.clamp(min, max)
}

/// Apply `step` to `value` `times` times
pub fn repeated<T>(times: u32, value: T, step: impl Fn(T) -> T) -> T {
    (0..times).fold(value, |acc, _| step(acc))
}

/// Multi-notch nudge: `|magnitude|` single notches in the direction of its sign
pub fn nudge_by(value: f64, magnitude: i32, precise: bool, table: &NudgeTable) -> f64 {
    let direction = magnitude.signum();
    repeated(magnitude.unsigned_abs(), value, |v| {
        nudge_value(v, direction, precise, table)
    })
}
