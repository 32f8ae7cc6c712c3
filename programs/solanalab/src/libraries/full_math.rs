//! Multiply-then-divide on `u64` without intermediate overflow.
//!
//! The product of two `u64` values always fits in 128 bits, so it is computed
//! in a fixed-width `U128` and only the quotient has to fit back into `u64`.

use uint::construct_uint;

construct_uint! {
    pub struct U128(2);
}

pub trait MulDiv<RHS = Self> {
    type Output;

    /// `floor(self * num / denom)`, `None` on division by zero or when the
    /// quotient does not fit in `Output`.
    fn mul_div_floor(self, num: RHS, denom: RHS) -> Option<Self::Output>;

    /// `ceil(self * num / denom)`, same failure modes as `mul_div_floor`.
    fn mul_div_ceil(self, num: RHS, denom: RHS) -> Option<Self::Output>;
}

impl MulDiv for u64 {
    type Output = u64;

    fn mul_div_floor(self, num: Self, denom: Self) -> Option<Self::Output> {
        if denom == 0 {
            return None;
        }
        let r = U128::from(self) * U128::from(num) / U128::from(denom);
        narrow(r)
    }

    fn mul_div_ceil(self, num: Self, denom: Self) -> Option<Self::Output> {
        if denom == 0 {
            return None;
        }
        let r = (U128::from(self) * U128::from(num) + U128::from(denom - 1)) / U128::from(denom);
        narrow(r)
    }
}

fn narrow(r: U128) -> Option<u64> {
    if r > U128::from(u64::MAX) {
        None
    } else {
        Some(r.as_u64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_and_ceil_differ_on_remainder() {
        assert_eq!(10u64.mul_div_floor(1, 3), Some(3));
        assert_eq!(10u64.mul_div_ceil(1, 3), Some(4));
        assert_eq!(9u64.mul_div_ceil(1, 3), Some(3));
    }

    #[test]
    fn test_large_intermediate_product() {
        // u64::MAX * u64::MAX overflows u64 but not the 128-bit intermediate
        assert_eq!(u64::MAX.mul_div_floor(u64::MAX, u64::MAX), Some(u64::MAX));
        assert_eq!(u64::MAX.mul_div_ceil(u64::MAX, u64::MAX), Some(u64::MAX));
    }

    #[test]
    fn test_quotient_overflow_and_zero_denominator() {
        assert_eq!(u64::MAX.mul_div_floor(2, 1), None);
        assert_eq!(5u64.mul_div_floor(5, 0), None);
        assert_eq!(5u64.mul_div_ceil(5, 0), None);
    }
}
