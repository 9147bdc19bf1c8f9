use crate::error;

pub(crate) mod iso8601;
pub(crate) mod layout;

#[derive(Clone, Debug)]
pub(crate) enum Error {
    NoDigitsFound,
    StdFmtWriteAdapter,
    #[allow(dead_code)] // not used without `std`
    StdIoWriteAdapter,
    TooBig,
}

impl Error {
    pub(crate) fn is_syntax(&self) -> bool {
        matches!(*self, Error::NoDigitsFound | Error::TooBig)
    }
}

impl error::IntoError for Error {
    fn into_error(self) -> error::Error {
        self.into()
    }
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::Fmt(err).into()
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::Error::*;

        match *self {
            NoDigitsFound => f.write_str("expected at least one digit"),
            StdFmtWriteAdapter => {
                f.write_str("an error occurred when formatting an argument")
            }
            StdIoWriteAdapter => {
                f.write_str("an I/O error occurred when writing output")
            }
            TooBig => f.write_str("number too big to parse into 64-bit integer"),
        }
    }
}
