// src/math.rs
use bigdecimal::{BigDecimal, One, Zero};

/// Constant product output for an input that has already had fees removed.
///
/// Solves `(x + dx)(y - dy) = xy` for `dy`. Returns `None` when the
/// denominator is zero, i.e. both the reserve and the input are empty.
pub fn constant_product_output(
    net_amount_in: &BigDecimal,
    reserve_in: &BigDecimal,
    reserve_out: &BigDecimal,
) -> Option<BigDecimal> {
    let denominator = reserve_in + net_amount_in;
    if denominator.is_zero() {
        return None;
    }
    Some((net_amount_in * reserve_out) / denominator)
}

/// Price impact of a trade in basis points.
///
/// Compares the execution price `amount_out / amount_in` against the spot
/// price `reserve_out / reserve_in` before the trade. Fees are included, so a
/// tiny trade on a 0.3% pool reports roughly 30 bps.
pub fn price_impact_bps(
    amount_in: &BigDecimal,
    amount_out: &BigDecimal,
    reserve_in: &BigDecimal,
    reserve_out: &BigDecimal,
) -> Option<BigDecimal> {
    if amount_in.is_zero() || reserve_in.is_zero() || reserve_out.is_zero() {
        return None;
    }
    let spot = reserve_out / reserve_in;
    let execution = amount_out / amount_in;
    Some((BigDecimal::one() - execution / spot) * BigDecimal::from(10_000))
}

/// Minimum acceptable output after applying a slippage tolerance
pub fn min_out_with_slippage(amount_out: &BigDecimal, slippage_bps: u32) -> BigDecimal {
    let slippage_bps = slippage_bps.min(10_000);
    amount_out.clone() * BigDecimal::from(10_000 - slippage_bps) / BigDecimal::from(10_000)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn test_constant_product_output() {
        let out = constant_product_output(&dec("997"), &dec("1000000"), &dec("2000000")).unwrap();
        assert_eq!(out.with_scale(20), dec("1992.01396207980643298631"));
    }

    #[test]
    fn test_constant_product_empty_pool() {
        assert!(constant_product_output(&dec("0"), &dec("0"), &dec("100")).is_none());
    }

    #[test]
    fn test_price_impact_bps() {
        // no fee, input equal to the reserve: output is half the other side, price halves
        let impact = price_impact_bps(&dec("100"), &dec("50"), &dec("100"), &dec("100")).unwrap();
        assert_eq!(impact, dec("5000"));

        assert!(price_impact_bps(&dec("0"), &dec("0"), &dec("100"), &dec("100")).is_none());
    }

    #[test]
    fn test_min_out_with_slippage() {
        assert_eq!(min_out_with_slippage(&dec("1000"), 100), dec("990"));
        assert_eq!(min_out_with_slippage(&dec("1000"), 0), dec("1000"));
        assert_eq!(min_out_with_slippage(&dec("1000"), 20_000), dec("0"));
    }
}
