use std::fmt;
use std::mem;

/// Sums floats with a single rounding at the end.
///
/// Keeps the running total as a list of non-overlapping partials, each the
/// exact rounding error of the one above it (Shewchuk's algorithm), and
/// rounds half-to-even when collapsing them.
pub fn exact_sum(values: &[f64]) -> f64 {
    let mut partials: Vec<f64> = Vec::new();

    for &value in values {
        let mut x = value;
        let mut kept = 0;
        for j in 0..partials.len() {
            let mut y = partials[j];
            if x.abs() < y.abs() {
                mem::swap(&mut x, &mut y);
            }
            let hi = x + y;
            let lo = y - (hi - x);
            if lo != 0.0 {
                partials[kept] = lo;
                kept += 1;
            }
            x = hi;
        }
        partials.truncate(kept);
        partials.push(x);
    }

    let Some(mut n) = partials.len().checked_sub(1) else {
        return 0.0;
    };
    let mut hi = partials[n];
    let mut lo = 0.0;
    while n > 0 {
        let x = hi;
        n -= 1;
        let y = partials[n];
        hi = x + y;
        lo = y - (hi - x);
        if lo != 0.0 {
            break;
        }
    }

    // Exactly halfway between two floats: break the tie using the sign of
    // the remaining partials
    if n > 0 && ((lo < 0.0 && partials[n - 1] < 0.0) || (lo > 0.0 && partials[n - 1] > 0.0)) {
        let y = lo * 2.0;
        let x = hi + y;
        if y == x - hi {
            hi = x;
        }
    }

    hi
}

/// Arithmetic mean of `values`, rounded once from the exact value.
///
/// Returns 0.0 for an empty slice.
pub fn exact_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let count = values.len() as f64;
    let quotient = exact_sum(values) / count;
    if !quotient.is_finite() {
        return quotient;
    }

    // quotient * count == product + error, exactly
    let product = quotient * count;
    let error = quotient.mul_add(count, -product);

    let mut terms = Vec::with_capacity(values.len() + 2);
    terms.extend_from_slice(values);
    terms.push(-product);
    terms.push(-error);

    quotient + exact_sum(&terms) / count
}

/// Displays a float the way the report prints numbers.
///
/// Values use the shortest representation that round-trips, always with a
/// fractional digit (`100.0`). Below 1e-4 or from 1e16 up they switch to
/// exponent notation with a signed, two-digit minimum exponent (`1e-05`,
/// `1.5e+16`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportFloat(pub f64);

impl fmt::Display for ReportFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0;
        if value.is_nan() {
            return f.write_str("nan");
        }
        if value.is_infinite() {
            return f.write_str(if value > 0.0 { "inf" } else { "-inf" });
        }

        // Debug already switches notation at the same thresholds
        let shortest = format!("{:?}", value);
        match shortest.split_once('e') {
            Some((mantissa, exponent)) => {
                let (sign, digits) = match exponent.strip_prefix('-') {
                    Some(digits) => ('-', digits),
                    None => ('+', exponent),
                };
                write!(f, "{}e{}{:0>2}", mantissa, sign, digits)
            }
            None => f.write_str(&shortest),
        }
    }
}
