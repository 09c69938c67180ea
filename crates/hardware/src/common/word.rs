//! Machine word type and arithmetic helpers.
//!
//! Registers and memory cells hold 128-bit two's-complement words. The
//! width absorbs any single product of 64-bit operands; additions,
//! subtractions and multiplications wrap at the type boundary.

/// The machine word: a 128-bit signed integer.
pub type Word = i128;

/// Floor division (rounds toward negative infinity).
///
/// Returns `None` on division by zero. Note that `i128::div_euclid` is not
/// floor division for negative divisors, so the quotient is adjusted by
/// hand.
pub fn floor_div(a: Word, b: Word) -> Option<Word> {
    if b == 0 {
        return None;
    }
    let q = a.wrapping_div(b);
    let r = a.wrapping_rem(b);
    if r != 0 && (r < 0) != (b < 0) {
        Some(q - 1)
    } else {
        Some(q)
    }
}

/// Left shift by a word-valued amount.
///
/// Returns `None` for negative amounts. Amounts of 128 or more shift every
/// bit out and yield 0.
pub fn shift_left(a: Word, amount: Word) -> Option<Word> {
    if amount < 0 {
        return None;
    }
    if amount >= 128 {
        Some(0)
    } else {
        Some(a.wrapping_shl(amount as u32))
    }
}

/// Arithmetic right shift by a word-valued amount.
///
/// Returns `None` for negative amounts. Amounts of 128 or more saturate to
/// the sign fill (0 or -1).
pub fn shift_right(a: Word, amount: Word) -> Option<Word> {
    if amount < 0 {
        return None;
    }
    if amount >= 128 {
        Some(if a < 0 { -1 } else { 0 })
    } else {
        Some(a.wrapping_shr(amount as u32))
    }
}
