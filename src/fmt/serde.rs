use core::{marker::PhantomData, str::FromStr};

use serde::de;

use crate::error::Error;

/// A visitor for any value whose canonical form is a string accepted by its
/// `FromStr` impl.
///
/// Every string-backed type in this crate deserializes through this, so
/// their error messages and accepted inputs always match `str::parse`.
pub(crate) struct FromStrVisitor<T> {
    expecting: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> FromStrVisitor<T> {
    pub(crate) fn new(expecting: &'static str) -> FromStrVisitor<T> {
        FromStrVisitor { expecting, _marker: PhantomData }
    }
}

impl<'de, T: FromStr<Err = Error>> de::Visitor<'de> for FromStrVisitor<T> {
    type Value = T;

    fn expecting(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.expecting)
    }

    #[inline]
    fn visit_str<E: de::Error>(self, value: &str) -> Result<T, E> {
        value.parse().map_err(de::Error::custom)
    }

    #[inline]
    fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<T, E> {
        match core::str::from_utf8(value) {
            Ok(s) => self.visit_str(s),
            Err(_) => {
                Err(de::Error::invalid_value(de::Unexpected::Bytes(value), &self))
            }
        }
    }
}
