use super::Printer;
use crate::source_writer::Writer;

impl<W: Writer> Printer<'_, W> {
    // =========================================================================
    // Literals
    // =========================================================================

    /// Reconstruct a numeric constant with no recorded lexeme. The fallback
    /// must not alter the value: integers in `i32` range print as decimal
    /// integers for readability, everything else goes through the 17
    /// significant-digit round-trip-safe format.
    pub(super) fn emit_number_value(&mut self, value: f64) {
        if value.is_infinite() {
            if value > 0.0 {
                self.writer.literal("1e500");
            } else {
                self.writer.literal("-1e500");
            }
        } else if value.is_nan() {
            self.writer.literal("0/0");
        } else if is_integerish(value) {
            self.writer.literal(&(value as i32).to_string());
        } else {
            self.writer.literal(&format_g17(value));
        }
    }
}

/// Whether a double can print as a plain decimal integer: representable as
/// an `i32`, exact under the round trip, and not negative zero.
pub(super) fn is_integerish(value: f64) -> bool {
    if value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX) {
        f64::from(value as i32) == value && !(value == 0.0 && value.is_sign_negative())
    } else {
        false
    }
}

/// Format a finite double with 17 significant digits, `printf("%.17g")`
/// style: fixed notation for moderate exponents, scientific with a signed
/// two-digit-minimum exponent otherwise, trailing zeros trimmed.
pub(super) fn format_g17(value: f64) -> String {
    if value == 0.0 {
        return if value.is_sign_negative() {
            "-0".to_string()
        } else {
            "0".to_string()
        };
    }

    let sci = format!("{value:.16e}");
    let (mantissa, exp_str) = sci
        .split_once('e')
        .unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp_str.parse().unwrap_or(0);

    if exp >= -4 && exp < 17 {
        let precision = (16 - exp).max(0) as usize;
        trim_trailing_zeros(format!("{value:.precision$}"))
    } else {
        let mantissa = trim_trailing_zeros(mantissa.to_string());
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exp.abs())
    }
}

fn trim_trailing_zeros(mut s: String) -> String {
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integerish() {
        assert!(is_integerish(0.0));
        assert!(is_integerish(42.0));
        assert!(is_integerish(-2147483648.0));
        assert!(is_integerish(2147483647.0));
        assert!(!is_integerish(-0.0));
        assert!(!is_integerish(0.5));
        assert!(!is_integerish(2147483648.0));
    }

    #[test]
    fn test_format_g17_fixed() {
        assert_eq!(format_g17(0.5), "0.5");
        assert_eq!(format_g17(-0.0), "-0");
        assert_eq!(format_g17(2147483648.0), "2147483648");
        assert_eq!(format_g17(0.1), "0.10000000000000001");
    }

    #[test]
    fn test_format_g17_scientific() {
        assert_eq!(format_g17(1e100), "1e+100");
        assert_eq!(format_g17(2.5e20), "2.5e+20");
        assert!(format_g17(1e-7).ends_with("e-08") || format_g17(1e-7).ends_with("e-07"));
    }

    #[test]
    fn test_format_g17_round_trips() {
        for &value in &[0.1, 1.5e-10, 3.141592653589793, 1e300, -7.25, 1e-7] {
            let text = format_g17(value);
            let reparsed: f64 = text.parse().expect("g17 output parses");
            assert_eq!(reparsed, value, "{text}");
        }
    }
}
