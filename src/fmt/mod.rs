/*!
Text formats for the value types in this crate.

There are two families of formats:

* [`layout`] is a strftime-like mini-language (`%Y-%m-%d`) used to both
format and parse dates, times, datetimes and UTC offsets. Every value type's
`Display` and `FromStr` implementation is defined in terms of one of the
predefined layouts in that module.
* [`iso8601`] implements the ISO 8601 duration grammar (`PnYnMnDTnHnMnS`)
and the interval grammar built on top of it.

Both families write through the [`Write`] trait defined here, which is
implemented for `String`, `Vec<u8>` and, via adapters, for any
[`core::fmt::Write`] ([`FmtWrite`]) or `std::io::Write` ([`StdWrite`]).
*/

use alloc::{string::String, vec::Vec};

use crate::error::{fmt::Error as E, Error};

use self::util::{DecimalFormatter, FractionalFormatter};

pub mod iso8601;
pub mod layout;
#[cfg(feature = "serde")]
pub(crate) mod serde;
mod util;

/// A trait for printing formatted values.
///
/// This is a simplified version of [`core::fmt::Write`] whose error type is
/// this crate's [`Error`]. Use [`FmtWrite`] or [`StdWrite`] to adapt other
/// writers.
pub trait Write {
    /// Write the given string to this writer, returning whether the write
    /// succeeded or not.
    fn write_str(&mut self, string: &str) -> Result<(), Error>;

    /// Write the given character to this writer, returning whether the write
    /// succeeded or not.
    #[inline]
    fn write_char(&mut self, char: char) -> Result<(), Error> {
        self.write_str(char.encode_utf8(&mut [0; 4]))
    }
}

impl Write for String {
    #[inline]
    fn write_str(&mut self, string: &str) -> Result<(), Error> {
        self.push_str(string);
        Ok(())
    }
}

impl Write for Vec<u8> {
    #[inline]
    fn write_str(&mut self, string: &str) -> Result<(), Error> {
        self.extend_from_slice(string.as_bytes());
        Ok(())
    }
}

impl<W: Write> Write for &mut W {
    fn write_str(&mut self, string: &str) -> Result<(), Error> {
        (**self).write_str(string)
    }

    #[inline]
    fn write_char(&mut self, char: char) -> Result<(), Error> {
        (**self).write_char(char)
    }
}

/// An adapter for using `std::io::Write` implementations with [`Write`].
///
/// # Example
///
/// ```
/// use tempora::{civil::date, fmt::{layout::Layout, StdWrite}};
///
/// let layout = Layout::new("%B %-d, %Y")?;
/// let mut buf = vec![];
/// layout.format_to(date(2024, 7, 14), StdWrite(&mut buf))?;
/// assert_eq!(buf, b"July 14, 2024");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[cfg(feature = "std")]
#[derive(Clone, Debug)]
pub struct StdWrite<W>(pub W);

#[cfg(feature = "std")]
impl<W: std::io::Write> Write for StdWrite<W> {
    #[inline]
    fn write_str(&mut self, string: &str) -> Result<(), Error> {
        self.0
            .write_all(string.as_bytes())
            .map_err(|_| Error::from(E::StdIoWriteAdapter))
    }
}

/// An adapter for using `core::fmt::Write` implementations with [`Write`].
///
/// This is what the `Display` impls in this crate use to write into a
/// `core::fmt::Formatter`.
#[derive(Clone, Debug)]
pub struct FmtWrite<W>(pub W);

impl<W: core::fmt::Write> Write for FmtWrite<W> {
    #[inline]
    fn write_str(&mut self, string: &str) -> Result<(), Error> {
        self.0.write_str(string).map_err(|_| Error::from(E::StdFmtWriteAdapter))
    }
}

/// Helpers for writing integers and fractions without `core::fmt`.
trait WriteExt: Write {
    #[cfg_attr(feature = "perf-inline", inline(always))]
    fn write_int(
        &mut self,
        formatter: &DecimalFormatter,
        n: impl Into<i64>,
    ) -> Result<(), Error> {
        self.write_str(formatter.format(n.into()).as_str())
    }

    #[cfg_attr(feature = "perf-inline", inline(always))]
    fn write_fraction(
        &mut self,
        formatter: &FractionalFormatter,
        nanos: i32,
    ) -> Result<(), Error> {
        self.write_str(formatter.format(nanos).as_str())
    }
}

impl<W: Write> WriteExt for W {}
