//! Saturating shift primitives
//!
//! `saturating_shift(v, s, bits)` is defined as `ssat(v >> s, bits)`: an
//! arithmetic right shift followed by a clamp to the signed `bits`-wide range.
//! Two implementations satisfy that contract:
//!
//! * [`shift_then_saturate`] shifts first, then clamps
//! * [`saturate_prescaled`] compares against bounds pre-scaled by `2^s` and
//!   only shifts in-range values (the fused shift-and-saturate form)
//!
//! The `fused-saturation` cargo feature selects which one backs
//! [`saturating_shift`]. Both are always compiled so they can be checked
//! against each other.

/// Clamp `value` to the range of a `bits`-wide signed integer
#[inline]
pub fn ssat(value: i64, bits: u32) -> i64 {
    debug_assert!((1..=64).contains(&bits), "saturation width out of range");
    if bits >= 64 {
        return value;
    }
    let max = (1i64 << (bits - 1)) - 1;
    let min = -(1i64 << (bits - 1));
    value.clamp(min, max)
}

/// Shift, then clamp
#[inline]
pub fn shift_then_saturate(value: i64, shift: u32, bits: u32) -> i64 {
    debug_assert!(shift < 64, "shift out of range");
    ssat(value >> shift, bits)
}

/// Clamp against pre-scaled bounds, then shift
#[inline]
pub fn saturate_prescaled(value: i64, shift: u32, bits: u32) -> i64 {
    debug_assert!(shift < 64, "shift out of range");
    debug_assert!((1..=64).contains(&bits), "saturation width out of range");
    if bits >= 64 {
        return value >> shift;
    }
    // floor(v / 2^s) >= 2^(b-1)  <=>  v >= 2^(b-1+s), likewise for the lower bound
    let bound = 1i128 << (bits - 1 + shift);
    let wide = i128::from(value);
    if wide >= bound {
        (1i64 << (bits - 1)) - 1
    } else if wide < -bound {
        -(1i64 << (bits - 1))
    } else {
        value >> shift
    }
}

/// Arithmetic right shift by `shift`, saturated to `bits` signed bits
#[inline]
pub fn saturating_shift(value: i64, shift: u32, bits: u32) -> i64 {
    #[cfg(not(feature = "fused-saturation"))]
    {
        shift_then_saturate(value, shift, bits)
    }
    #[cfg(feature = "fused-saturation")]
    {
        saturate_prescaled(value, shift, bits)
    }
}

/// Saturate a 64-bit value to 32 bits
#[inline]
pub fn clip_q63_to_q31(value: i64) -> i32 {
    ssat(value, 32) as i32
}

/// Saturate a 32-bit value to 16 bits
#[inline]
pub fn clip_q31_to_q15(value: i32) -> i16 {
    ssat(i64::from(value), 16) as i16
}

/// Saturate a 32-bit value to 8 bits
#[inline]
pub fn clip_q31_to_q7(value: i32) -> i8 {
    ssat(i64::from(value), 8) as i8
}
