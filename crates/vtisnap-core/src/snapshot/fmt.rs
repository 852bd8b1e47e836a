// crates/vtisnap-core/src/snapshot/fmt.rs

/// General-notation float formatting with `precision` significant digits.
///
/// - `dot_zero = false` is C/Python `%g`: fixed when the decimal exponent is
///   in `[-4, precision)`, trailing zeros and a bare `.` removed.
/// - `dot_zero = true` keeps at least one fractional digit in fixed notation,
///   which moves the switch to scientific one exponent earlier.
///
/// Scientific output uses a signed exponent of at least two digits (`1e-05`).
pub fn general(v: f64, precision: usize, dot_zero: bool) -> String {
    let precision = precision.max(1);

    if !v.is_finite() {
        return if v.is_nan() {
            "nan".into()
        } else if v > 0.0 {
            "inf".into()
        } else {
            "-inf".into()
        };
    }
    if v == 0.0 {
        let z = if dot_zero { "0.0" } else { "0" };
        return if v.is_sign_negative() { format!("-{z}") } else { z.into() };
    }

    let sci = format!("{:.*e}", precision - 1, v);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    let limit = if dot_zero { precision as i32 - 1 } else { precision as i32 };
    if exp >= -4 && exp < limit {
        let decimals = (precision as i32 - 1 - exp).max(0) as usize;
        let fixed = format!("{:.*}", decimals, v);
        trim_fraction(&fixed, dot_zero)
    } else {
        let m = trim_fraction(mantissa, false);
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{m}e{sign}{:02}", exp.abs())
    }
}

/// `%g` with the default six significant digits.
pub fn g(v: f64) -> String {
    general(v, 6, false)
}

fn trim_fraction(s: &str, keep_one: bool) -> String {
    if !s.contains('.') {
        return if keep_one { format!("{s}.0") } else { s.to_string() };
    }
    let t = s.trim_end_matches('0');
    match (t.strip_suffix('.'), keep_one) {
        (Some(_), true) => format!("{t}0"),
        (Some(bare), false) => bare.to_string(),
        (None, _) => t.to_string(),
    }
}
