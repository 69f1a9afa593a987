//! Four-significant-bit memory rounding.

const KIB: u64 = 1 << 10;
const MIB: u64 = 1 << 20;
const GIB: u64 = 1 << 30;

/// Largest unit first; the first base not above the multiplier wins.
const UNITS: [(u64, &str); 3] = [(GIB, "GB"), (MIB, "MB"), (KIB, "kB")];

/// Truncates `bytes` to its four most significant bits and renders it with the
/// largest binary unit that keeps the mantissa integral.
///
/// Only the bits below the top four are dropped, so the result is never above
/// the input (`1023` becomes `960`).
///
/// ```
/// use psf_pgtune::round_to_four_significant_bits;
///
/// assert_eq!(round_to_four_significant_bits(256 * 1024 * 1024), "256MB");
/// assert_eq!(round_to_four_significant_bits(1023), "960");
/// assert_eq!(round_to_four_significant_bits(3 * 1024 * 1024 * 1024), "3GB");
/// ```
#[must_use]
pub fn round_to_four_significant_bits(bytes: u64) -> String {
    if bytes == 0 {
        return "0".to_owned();
    }

    let mut value = bytes;
    let mut multiplier: u64 = 1;

    while value >= 16 {
        value /= 2;
        multiplier *= 2;
    }
    while value % 2 == 0 {
        value /= 2;
        multiplier *= 2;
    }

    let (base, unit) =
        UNITS.iter().copied().find(|(base, _)| multiplier >= *base).unwrap_or((1, ""));

    while multiplier > base {
        value *= 2;
        multiplier /= 2;
    }

    format!("{value}{unit}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_powers_keep_their_unit() {
        assert_eq!(round_to_four_significant_bits(KIB), "1kB");
        assert_eq!(round_to_four_significant_bits(MIB), "1MB");
        assert_eq!(round_to_four_significant_bits(GIB), "1GB");
        assert_eq!(round_to_four_significant_bits(8 * GIB), "8GB");
    }

    #[test]
    fn values_below_a_kilobyte_have_no_unit() {
        assert_eq!(round_to_four_significant_bits(1), "1");
        assert_eq!(round_to_four_significant_bits(15), "15");
        assert_eq!(round_to_four_significant_bits(1000), "960");
        assert_eq!(round_to_four_significant_bits(1023), "960");
    }

    #[test]
    fn truncates_instead_of_rounding_up() {
        // 1.99 GiB keeps only 1.875 GiB worth of bits.
        assert_eq!(round_to_four_significant_bits(2 * GIB - 1), "1920MB");
        // 3 GiB + 1 byte drops the stray byte.
        assert_eq!(round_to_four_significant_bits(3 * GIB + 1), "3GB");
    }

    #[test]
    fn picks_the_unit_by_trailing_zero_bits() {
        // 1536 MiB = 3 * 2^29; not a whole number of GiB.
        assert_eq!(round_to_four_significant_bits(1536 * MIB), "1536MB");
        assert_eq!(round_to_four_significant_bits(4096 * KIB), "4MB");
        assert_eq!(round_to_four_significant_bits(24 * KIB), "24kB");
    }

    #[test]
    fn zero_is_rendered_without_unit() {
        assert_eq!(round_to_four_significant_bits(0), "0");
    }
}
