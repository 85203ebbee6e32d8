/// Rate used when a currency has no entry in the FX table
pub const DEFAULT_FX_RATE: f64 = 1.0;

/// Number of trailing years in the historical average. Missing years still count.
pub const HISTORY_YEARS: f64 = 3.0;

/// Exponent for a growth rate spanning Y1..Y3 (two periods)
pub const CAGR_EXPONENT: f64 = 0.5;

/// Lowest adjusted multiple the combiner will return
pub const MULTIPLE_FLOOR: f64 = 0.5;

/// Adjusted multiple may exceed the sector base by at most this much
pub const MULTIPLE_CAP_SPREAD: f64 = 2.0;

/// Weight of the last trailing EBIT year in the EV basis
pub const TRAILING_EBIT_WEIGHT: f64 = 0.6;

/// Weight of the first forecast EBIT year in the EV basis
pub const FORWARD_EBIT_WEIGHT: f64 = 0.4;

/// EV figures are expressed in thousands
pub const EV_UNIT_DIVISOR: f64 = 1000.0;

pub const EV_MID_FACTOR: f64 = 0.85;

pub const EV_HIGH_FACTOR: f64 = 1.15;

/// Suffix appended to formatted EV figures
pub const EV_DISPLAY_SUFFIX: &str = "k EUR";

/// Decimal precision for percentages and multiples
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;
