pub mod auth;
pub mod categories;
pub mod products;
pub mod sellers;

/// Lenient float parse used for numeric form inputs. Reads the longest
/// leading number, so `"12.5kg"` gives `12.5`; no number at all is `0`.
pub fn coerce_f64(raw: &str) -> f64 {
    let s = raw.trim();
    let end = float_prefix_len(s.as_bytes());
    match s[..end].parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

// Length of `[+-]digits[.digits][e[+-]digits]` at the start of `b`.
// The exponent only counts when at least one digit follows it.
fn float_prefix_len(b: &[u8]) -> usize {
    let digits = |from: usize| b[from..].iter().take_while(|c| c.is_ascii_digit()).count();

    let mut i = usize::from(matches!(b.first(), Some(b'+' | b'-')));
    let int = digits(i);
    i += int;
    let mut frac = 0;
    if b.get(i) == Some(&b'.') {
        frac = digits(i + 1);
        if int > 0 || frac > 0 {
            i += 1 + frac;
        }
    }
    if int == 0 && frac == 0 {
        return 0;
    }
    if matches!(b.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(b.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp = digits(j);
        if exp > 0 {
            i = j + exp;
        }
    }
    i
}

/// Lenient integer parse: reads an optional sign and the leading digits,
/// so `"12"`, `" 12 "` and `"12.9"` all give `12`. Anything else is `0`.
pub fn coerce_i32(raw: &str) -> i32 {
    let s = raw.trim();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1i64, rest),
        None => (1i64, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());
    match digits[..end].parse::<i64>() {
        Ok(v) => i32::try_from(sign * v).unwrap_or(0),
        Err(_) => 0,
    }
}
