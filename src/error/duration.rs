use crate::error;

#[derive(Clone, Debug)]
pub(crate) enum Error {
    ConvertExtent,
    ConvertNegative,
    ConvertUnsigned,
    OverflowAdd,
    OverflowFrom { unit: &'static str },
    OverflowNegate,
    OverflowNanoseconds,
    OverflowSub,
    TimeSpanTooLarge,
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::Duration(err).into()
    }
}

impl error::IntoError for Error {
    fn into_error(self) -> error::Error {
        self.into()
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::Error::*;

        match *self {
            ConvertExtent => f.write_str(
                "extent is too big to fit in a fixed width duration",
            ),
            ConvertNegative => f.write_str(
                "cannot convert negative duration to unsigned duration",
            ),
            ConvertUnsigned => f.write_str(
                "unsigned duration is too big to fit in a duration",
            ),
            OverflowAdd => f.write_str("duration addition overflowed"),
            OverflowFrom { unit } => {
                write!(f, "number of {unit} overflows duration")
            }
            OverflowNegate => f.write_str("duration negation overflowed"),
            OverflowNanoseconds => f.write_str(
                "number of nanoseconds overflows extent's seconds",
            ),
            OverflowSub => f.write_str("duration subtraction overflowed"),
            TimeSpanTooLarge => f.write_str(
                "duration exceeds the maximum time of day span of 100 hours",
            ),
        }
    }
}
