//! Index arithmetic over a dynamic-length sequence.
//!
//! Both functions are pure. When `looping` is false the result saturates at the
//! ends, so a caller detects "no movement" by comparing against `current`.

/// Index after `current`, wrapping to 0 when looping.
#[inline]
pub fn next(current: usize, len: usize, looping: bool) -> usize {
    if len == 0 {
        return current;
    }
    if looping {
        (current + 1) % len
    } else {
        (current + 1).min(len - 1)
    }
}

/// Index before `current`, wrapping to `len - 1` when looping.
#[inline]
pub fn previous(current: usize, len: usize, looping: bool) -> usize {
    if len == 0 {
        return current;
    }
    if looping {
        (current % len + len - 1) % len
    } else {
        current.saturating_sub(1).min(len - 1)
    }
}
