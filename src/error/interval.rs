use crate::error;

#[derive(Clone, Debug)]
pub(crate) enum Error {
    FractionalPeriod,
    NoEnd,
    NoStart,
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::Interval(err).into()
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
            FractionalPeriod => f.write_str(
                "interval has no representation for this quantity: \
                 a period with fractional years, months, weeks or days \
                 cannot be applied to a datetime",
            ),
            NoEnd => f.write_str(
                "interval has no representation for its end: \
                 it stores only a duration",
            ),
            NoStart => f.write_str(
                "interval has no representation for its start: \
                 it stores only a duration",
            ),
        }
    }
}
