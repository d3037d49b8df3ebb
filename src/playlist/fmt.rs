//! Numeric primitives and the bounded output buffer.
//!
//! Everything here is integer-only: durations are formatted by repeated
//! division so playlist text never round-trips through floating point.

use bytes::Bytes;

use crate::error::{PlaylistError, Result};

/// Worst-case decimal width of a `u32`.
pub(crate) const U32_DECIMAL_LEN: usize = 10;

/// Number of decimal digits `n` prints with.
pub(crate) fn digit_count(mut n: u32) -> usize {
    let mut len = 1;
    while n >= 10 {
        len += 1;
        n /= 10;
    }
    len
}

/// Emit the decimal digits of `n`, most significant first.
pub(crate) fn uint_digits(mut n: u32, emit: &mut dyn FnMut(u8)) {
    let mut digits = [0u8; U32_DECIMAL_LEN];
    let mut len = 0;
    loop {
        digits[len] = b'0' + (n % 10) as u8;
        len += 1;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    while len > 0 {
        len -= 1;
        emit(digits[len]);
    }
}

/// Emit `value / scale` in decimal: the integer part and, when
/// `scale != 1`, a point followed by `log10(scale)` fraction digits.
/// `scale` must be a power of ten.
pub(crate) fn fixed_digits(value: u32, mut scale: u32, emit: &mut dyn FnMut(u8)) {
    uint_digits(value / scale, emit);
    let mut fraction = value % scale;

    if scale == 1 {
        return;
    }

    emit(b'.');
    loop {
        scale /= 10;
        if scale == 0 {
            break;
        }
        let digit = fraction / scale;
        emit(b'0' + digit as u8);
        fraction -= digit * scale;
    }
}

/// Output buffer with a fixed upper bound.
///
/// The bound is reserved in a single allocation up front. `finish`
/// re-checks the written length against it, so a size estimate that has
/// drifted from the writer surfaces as
/// [`PlaylistError::LengthExceeded`] instead of a silently grown buffer.
pub(crate) struct PlaylistBuf {
    buf: Vec<u8>,
    bound: usize,
}

impl PlaylistBuf {
    pub(crate) fn with_capacity(bound: usize) -> Result<Self> {
        let mut buf = Vec::new();
        if let Err(e) = buf.try_reserve_exact(bound) {
            tracing::debug!("failed to reserve {} bytes for playlist buffer", bound);
            return Err(PlaylistError::Alloc(e));
        }
        Ok(Self { buf, bound })
    }

    pub(crate) fn push_str(&mut self, s: &str) {
        self.buf.extend_from_slice(s.as_bytes());
    }

    pub(crate) fn push_byte(&mut self, b: u8) {
        self.buf.push(b);
    }

    pub(crate) fn push_uint(&mut self, n: u32) {
        uint_digits(n, &mut |b| self.buf.push(b));
    }

    pub(crate) fn push_fixed(&mut self, value: u32, scale: u32) {
        fixed_digits(value, scale, &mut |b| self.buf.push(b));
    }

    pub(crate) fn finish(self) -> Result<Bytes> {
        if self.buf.len() > self.bound {
            tracing::error!(
                "result length {} exceeded allocated length {}",
                self.buf.len(),
                self.bound
            );
            return Err(PlaylistError::LengthExceeded {
                written: self.buf.len(),
                allocated: self.bound,
            });
        }
        Ok(Bytes::from(self.buf))
    }
}
