//! Stepped integer domains
//!
//! An integer parameter with bounds `[min, max]`, a step and a step mode
//! induces the sequence `min, min (+|*) step, ...`. These helpers count the
//! values of such a domain and convert between positions and values.

use crate::parameters::value::StepMode;
use thiserror::Error;

/// A multiplicative domain whose bound ratio is not a multiple of the step
#[derive(Error, Debug, Clone, PartialEq)]
#[error("multiplicative domain [{min}, {max}] is not evenly divisible by step {step}")]
pub struct UnevenDomain {
    pub min: i32,
    pub max: i32,
    pub step: i32,
}

/// Check whether a value lies in the closed interval `[min, max]`
pub fn within<T: PartialOrd>(value: T, min: T, max: T) -> bool {
    value >= min && value <= max
}

/// Count the values a stepped domain enumerates
///
/// Returns `Ok(None)` when the domain is not enumerable:
/// - additive domains are enumerable only with a unit step
/// - multiplicative domains need a non-zero minimum and a step above one
/// - reversed bounds never enumerate
///
/// A multiplicative domain whose `max / min` ratio is not a multiple of the
/// step is malformed and reported as an error.
pub fn count_values(min: i32, max: i32, step: i32, mode: StepMode) -> Result<Option<usize>, UnevenDomain> {
    let count = match mode {
        StepMode::Additive => {
            if step != 1 || max < min {
                return Ok(None);
            }
            (max as i64 - min as i64 + 1) as usize
        }
        StepMode::Multiplicative => {
            if min == 0 || step <= 1 || max < min {
                return Ok(None);
            }
            let ratio = max as i64 / min as i64;
            if ratio % step as i64 != 0 {
                return Err(UnevenDomain { min, max, step });
            }
            let mut remaining = ratio;
            let mut count = 0usize;
            while remaining >= 1 {
                count += 1;
                remaining /= step as i64;
            }
            count
        }
    };

    Ok(if count == 0 { None } else { Some(count) })
}

/// Apply one step to a value
pub fn next_value(value: i64, step: i32, mode: StepMode) -> i64 {
    match mode {
        StepMode::Additive => value.saturating_add(step as i64),
        StepMode::Multiplicative => value.saturating_mul(step as i64),
    }
}

/// The value at position `index` of the sequence starting at `min`
///
/// Multiplicative sequences stop growing once they leave the `i32` range.
pub fn nth_value(min: i32, step: i32, mode: StepMode, index: usize) -> i64 {
    match mode {
        StepMode::Additive => {
            let index = i64::try_from(index).unwrap_or(i64::MAX);
            (min as i64).saturating_add((step as i64).saturating_mul(index))
        }
        StepMode::Multiplicative => {
            let mut value = min as i64;
            for _ in 0..index {
                if value == 0 || !within(value, i32::MIN as i64, i32::MAX as i64) {
                    break;
                }
                value = next_value(value, step, mode);
            }
            value
        }
    }
}

/// Walk the sequence from `min` until reaching or passing `target`
///
/// Returns the number of steps taken, never more than `limit`.
pub fn steps_to(min: i32, step: i32, mode: StepMode, target: i32, limit: usize) -> usize {
    let target = target as i64;
    let mut value = min as i64;
    let mut steps = 0;
    while value < target && steps < limit {
        value = next_value(value, step, mode);
        steps += 1;
    }
    steps
}
