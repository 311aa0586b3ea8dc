//! Fixed-point number model
//!
//! A value of type `Fixed<T, FRAC>` is a signed integer `T` whose `FRAC` low
//! bits are fractional, i.e. a Qm.n number with `m = T::BITS - FRAC` integer
//! bits (sign included) and `n = FRAC`. The format lives in the type only;
//! nothing is stored at runtime.
//!
//! Growth rules:
//! * Q7 × Q7 → Q2.14, Q15 × Q15 → Q2.30, Q31 × Q31 → Q2.62 (exact, no overflow)
//! * accumulation wraps (`wrapping_add`), it never saturates
//! * narrowing a product drops low bits (`shr_truncate`), no rounding
//! * the final conversion to an output format shifts and saturates
//!   (`saturate_narrow`)

pub mod saturate;
pub mod sqrt;

use std::fmt;

pub use saturate::{clip_q31_to_q15, clip_q31_to_q7, clip_q63_to_q31, saturating_shift, ssat};
pub use sqrt::{sqrt_q15, sqrt_q31};

/// Signed two's-complement storage for a fixed-point value
pub trait Word: Copy + Default + Ord + fmt::Debug + Send + Sync + 'static {
    const BITS: u32;
    const MIN: Self;
    const MAX: Self;
    const ZERO: Self;

    fn to_i64(self) -> i64;

    /// Keep the low `BITS` bits of `value`
    fn wrapping_from_i64(value: i64) -> Self;

    fn wrapping_add(self, rhs: Self) -> Self;

    fn saturating_add(self, rhs: Self) -> Self;

    fn saturating_sub(self, rhs: Self) -> Self;

    /// Arithmetic right shift
    fn shr(self, shift: u32) -> Self;
}

macro_rules! impl_word {
    ($($t:ty),*) => {$(
        impl Word for $t {
            const BITS: u32 = <$t>::BITS;
            const MIN: Self = <$t>::MIN;
            const MAX: Self = <$t>::MAX;
            const ZERO: Self = 0;

            #[inline]
            fn to_i64(self) -> i64 {
                self as i64
            }

            #[inline]
            fn wrapping_from_i64(value: i64) -> Self {
                value as $t
            }

            #[inline]
            fn wrapping_add(self, rhs: Self) -> Self {
                <$t>::wrapping_add(self, rhs)
            }

            #[inline]
            fn saturating_add(self, rhs: Self) -> Self {
                <$t>::saturating_add(self, rhs)
            }

            #[inline]
            fn saturating_sub(self, rhs: Self) -> Self {
                <$t>::saturating_sub(self, rhs)
            }

            #[inline]
            fn shr(self, shift: u32) -> Self {
                self >> shift
            }
        }
    )*};
}

impl_word!(i8, i16, i32, i64);

/// Signed fixed-point number with `FRAC` fractional bits stored in `T`
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Fixed<T, const FRAC: u32>(T);

/// 1.7 sample
pub type Q7 = Fixed<i8, 7>;
/// 1.15 sample
pub type Q15 = Fixed<i16, 15>;
/// 1.31 sample
pub type Q31 = Fixed<i32, 31>;
/// 1.63 sample
pub type Q63 = Fixed<i64, 63>;

/// Q7 × Q7 product
pub type Q2_14 = Fixed<i16, 14>;
/// Q15 × Q15 product
pub type Q2_30 = Fixed<i32, 30>;
/// Q31 × Q31 product, also the single-guard-bit Q31 accumulator
pub type Q2_62 = Fixed<i64, 62>;
/// Q15 accumulator: Q2.30 terms with 32 guard bits
pub type Q34_30 = Fixed<i64, 30>;
/// Q31 dot-product accumulator: Q2.48 terms with 14 guard bits
pub type Q16_48 = Fixed<i64, 48>;

impl<T: Word, const FRAC: u32> Fixed<T, FRAC> {
    pub const FRAC_BITS: u32 = FRAC;
    /// Integer bits, sign bit included
    pub const INT_BITS: u32 = T::BITS - FRAC;
    pub const ZERO: Self = Self(T::ZERO);
    pub const MIN: Self = Self(T::MIN);
    pub const MAX: Self = Self(T::MAX);

    /// Wrap a raw integer without conversion
    #[inline]
    pub const fn from_bits(bits: T) -> Self {
        Self(bits)
    }

    /// Raw two's-complement storage
    #[inline]
    pub fn to_bits(self) -> T {
        self.0
    }

    /// Quantize a real value (round to nearest, saturate out-of-range input)
    pub fn from_f64(value: f64) -> Self {
        let scaled = (value * Self::scale()).round();
        let clamped = scaled.clamp(T::MIN.to_i64() as f64, T::MAX.to_i64() as f64);
        // `as` saturates at the i64 boundary, which covers the Q63 case
        Self(T::wrapping_from_i64(clamped as i64))
    }

    /// Real value represented by this number
    pub fn to_f64(self) -> f64 {
        self.0.to_i64() as f64 / Self::scale()
    }

    /// Accumulate without saturation; overflow wraps
    #[inline]
    pub fn wrapping_add(self, rhs: Self) -> Self {
        Self(self.0.wrapping_add(rhs.0))
    }

    #[inline]
    pub fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    #[inline]
    pub fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }

    /// Drop `FRAC - TO` low-order bits, keeping the storage width
    ///
    /// Plain arithmetic shift: the discarded bits are lost, not rounded.
    #[inline]
    pub fn shr_truncate<const TO: u32>(self) -> Fixed<T, TO> {
        debug_assert!(TO <= FRAC, "truncation cannot add fractional bits");
        Fixed(self.0.shr(FRAC - TO))
    }

    /// Shift down to `TO` fractional bits and saturate into storage `U`
    #[inline]
    pub fn saturate_narrow<U: Word, const TO: u32>(self) -> Fixed<U, TO> {
        debug_assert!(TO <= FRAC, "narrowing cannot add fractional bits");
        let narrowed = saturating_shift(self.0.to_i64(), FRAC - TO, U::BITS);
        Fixed(U::wrapping_from_i64(narrowed))
    }

    /// Sign-extend into wider storage with the same fractional bits
    #[inline]
    pub fn widen<U: Word>(self) -> Fixed<U, FRAC> {
        debug_assert!(U::BITS >= T::BITS, "widen cannot drop storage bits");
        Fixed(U::wrapping_from_i64(self.0.to_i64()))
    }

    /// Guard bits this format offers when accumulating terms with
    /// `term_int_bits` integer bits
    ///
    /// Summing fewer than `2^guard_bits` terms cannot overflow.
    pub fn guard_bits(term_int_bits: u32) -> u32 {
        Self::INT_BITS.saturating_sub(term_int_bits)
    }

    fn scale() -> f64 {
        2f64.powi(FRAC as i32)
    }
}

macro_rules! impl_widening_mul {
    ($($narrow:ty => $wide:ty, $product:ty;)*) => {$(
        impl $narrow {
            /// Exact double-width product
            #[inline]
            pub fn widening_mul(self, rhs: Self) -> $product {
                Fixed(<$wide>::from(self.0) * <$wide>::from(rhs.0))
            }
        }
    )*};
}

impl_widening_mul! {
    Q7 => i16, Q2_14;
    Q15 => i32, Q2_30;
    Q31 => i64, Q2_62;
}

impl<T: Word, const FRAC: u32> fmt::Debug for Fixed<T, FRAC> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}.{}({:?})", Self::INT_BITS, FRAC, self.0)
    }
}

impl<T: Word, const FRAC: u32> fmt::Display for Fixed<T, FRAC> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_f64())
    }
}
