use std::fmt::{Debug, Display, Formatter};

/// Amount in the Norwegian accounting notation: `1 234 567,50`.
#[derive(Copy, Clone)]
pub struct Accounting(pub f64);

impl Debug for Accounting {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for Accounting {
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let magnitude = self.0.abs();
        let mut integer = magnitude.trunc() as u64;

        // The fraction is rounded on its own, so `0.999` yields 100 hundredths.
        let mut hundredths = ((magnitude - magnitude.trunc()) * 100.0).round() as u64;
        if hundredths >= 100 {
            integer = integer.saturating_add(1);
            hundredths -= 100;
        }

        if self.0.is_sign_negative() && (integer != 0 || hundredths != 0) {
            f.write_str("-")?;
        }
        write!(f, "{},{hundredths:02}", group_thousands(integer))
    }
}

/// Format the amount in the Norwegian accounting notation.
#[must_use]
pub fn format_accounting(amount: f64) -> String {
    Accounting(amount).to_string()
}

fn group_thousands(integer: u64) -> String {
    let digits = integer.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i != 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_accounting() {
        assert_eq!(format_accounting(1_234_567.5), "1 234 567,50");
        assert_eq!(format_accounting(-42.3), "-42,30");
        assert_eq!(format_accounting(0.0), "0,00");
        assert_eq!(format_accounting(23.25), "23,25");
        assert_eq!(format_accounting(999.0), "999,00");
        assert_eq!(format_accounting(1000.0), "1 000,00");
        assert_eq!(format_accounting(123_456.07), "123 456,07");
    }

    #[test]
    fn test_negative_below_one() {
        assert_eq!(format_accounting(-0.5), "-0,50");
        assert_eq!(format_accounting(-0.001), "0,00");
    }

    /// Diverges from the old web tool, which printed `0,100` here.
    #[test]
    fn test_fraction_overflow_is_carried() {
        assert_eq!(format_accounting(0.999), "1,00");
        assert_eq!(format_accounting(1999.996), "2 000,00");
        assert_eq!(format_accounting(-9.999), "-10,00");
    }

    #[test]
    fn test_non_finite_does_not_panic() {
        let _ = format_accounting(f64::NAN);
        let _ = format_accounting(f64::INFINITY);
    }
}
