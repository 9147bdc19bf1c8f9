/// A formatter for converting `i64` values to ASCII digits without going
/// through `core::fmt`.
///
/// Only a negative sign is ever written. Zero padding counts digits only,
/// never the sign, so `-44` padded to `4` is `-0044`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DecimalFormatter {
    minimum_digits: u8,
}

impl DecimalFormatter {
    pub(crate) const fn new() -> DecimalFormatter {
        DecimalFormatter { minimum_digits: 0 }
    }

    /// Pad with leading zeros until at least this many digits are written.
    ///
    /// This is capped at the number of digits in `i64::MAX`.
    pub(crate) const fn padding(self, digits: u8) -> DecimalFormatter {
        let minimum_digits = if digits > Decimal::MAX_DIGITS {
            Decimal::MAX_DIGITS
        } else {
            digits
        };
        DecimalFormatter { minimum_digits }
    }

    #[cfg_attr(feature = "perf-inline", inline(always))]
    pub(crate) fn format(&self, value: i64) -> Decimal {
        Decimal::new(self, value)
    }
}

/// A formatted integer. See `DecimalFormatter`.
#[derive(Debug)]
pub(crate) struct Decimal {
    buf: [u8; Decimal::MAX_LEN as usize],
    start: u8,
}

impl Decimal {
    /// `i64::MIN.to_string().len()`.
    const MAX_LEN: u8 = 20;
    /// `i64::MAX.to_string().len()`.
    const MAX_DIGITS: u8 = 19;

    fn new(formatter: &DecimalFormatter, value: i64) -> Decimal {
        let mut decimal = Decimal {
            buf: [b'0'; Decimal::MAX_LEN as usize],
            start: Decimal::MAX_LEN,
        };
        let mut magnitude = value.unsigned_abs();
        loop {
            decimal.start -= 1;
            decimal.buf[usize::from(decimal.start)] =
                b'0' + (magnitude % 10) as u8;
            magnitude /= 10;
            if magnitude == 0 {
                break;
            }
        }
        let min_start = Decimal::MAX_LEN - formatter.minimum_digits;
        if decimal.start > min_start {
            // The buffer starts out as all zeros.
            decimal.start = min_start;
        }
        if value < 0 {
            decimal.start -= 1;
            decimal.buf[usize::from(decimal.start)] = b'-';
        }
        decimal
    }

    pub(crate) fn as_str(&self) -> &str {
        let bytes = &self.buf[usize::from(self.start)..];
        // Every byte written is ASCII.
        match core::str::from_utf8(bytes) {
            Ok(s) => s,
            Err(_) => unreachable!("decimal buffer is always ASCII"),
        }
    }
}

/// A formatter for the fractional digits of a nanosecond value in
/// `0..=999_999_999`.
///
/// Without a precision, trailing zeros are trimmed (so zero formats as the
/// empty string). With a precision, exactly that many digits are written,
/// truncating (never rounding) the rest.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FractionalFormatter {
    precision: Option<u8>,
}

impl FractionalFormatter {
    pub(crate) const fn new() -> FractionalFormatter {
        FractionalFormatter { precision: None }
    }

    /// Set the number of digits to write. Values above `9` are clamped.
    pub(crate) const fn precision(
        self,
        precision: Option<u8>,
    ) -> FractionalFormatter {
        let precision = match precision {
            Some(p) if p > 9 => Some(9),
            p => p,
        };
        FractionalFormatter { precision }
    }

    #[cfg_attr(feature = "perf-inline", inline(always))]
    pub(crate) fn format(&self, nanos: i32) -> Fractional {
        Fractional::new(self, nanos)
    }
}

/// A formatted fraction. See `FractionalFormatter`.
#[derive(Debug)]
pub(crate) struct Fractional {
    buf: [u8; 9],
    end: u8,
}

impl Fractional {
    fn new(formatter: &FractionalFormatter, nanos: i32) -> Fractional {
        debug_assert!(0 <= nanos && nanos <= 999_999_999);
        let mut fractional = Fractional { buf: [b'0'; 9], end: 9 };
        let mut value = nanos.unsigned_abs();
        for i in (0..9).rev() {
            fractional.buf[i] = b'0' + (value % 10) as u8;
            value /= 10;
        }
        match formatter.precision {
            Some(precision) => fractional.end = precision,
            None => {
                while fractional.end > 0
                    && fractional.buf[usize::from(fractional.end) - 1] == b'0'
                {
                    fractional.end -= 1;
                }
            }
        }
        fractional
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.end == 0
    }

    pub(crate) fn as_str(&self) -> &str {
        let bytes = &self.buf[..usize::from(self.end)];
        match core::str::from_utf8(bytes) {
            Ok(s) => s,
            Err(_) => unreachable!("fraction buffer is always ASCII"),
        }
    }
}
