//! Utility functions and helpers

use num_bigint::BigInt;

/// Format integer base units with the token's decimals, trimming trailing zeros
pub fn format_units(units: &BigInt, decimals: u8) -> String {
    let digits = units.magnitude().to_string();
    let sign = if units.sign() == num_bigint::Sign::Minus { "-" } else { "" };
    let decimals = decimals as usize;

    if decimals == 0 {
        return format!("{sign}{digits}");
    }

    let padded = format!("{digits:0>width$}", width = decimals + 1);
    let (int_part, frac_part) = padded.split_at(padded.len() - decimals);
    let frac_part = frac_part.trim_end_matches('0');

    if frac_part.is_empty() {
        format!("{sign}{int_part}")
    } else {
        format!("{sign}{int_part}.{frac_part}")
    }
}

/// Shorten a long hex address for log lines
pub fn format_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 14 {
        return address.to_string();
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_units() {
        assert_eq!(format_units(&BigInt::from(150_000_000), 8), "1.5");
        assert_eq!(format_units(&BigInt::from(1), 6), "0.000001");
        assert_eq!(format_units(&BigInt::from(0), 6), "0");
        assert_eq!(format_units(&BigInt::from(42), 0), "42");
        assert_eq!(format_units(&BigInt::from(-2_500_000), 6), "-2.5");
    }

    #[test]
    fn test_format_address() {
        assert_eq!(
            format_address("0xc7efb4076dbe143cbcd98cfaaa929ecfc8f299203dfff63b95ccb6bfe19850fa"),
            "0xc7efb4...50fa"
        );
        assert_eq!(format_address("0x1"), "0x1");
        assert_eq!(format_address("ééééééééééééééé"), "éééééééé...éééé");
    }
}
