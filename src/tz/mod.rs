/*!
Fixed UTC offsets and the seam for plugging in a time zone database.

This crate does not ship a time zone database. Instead, routines that need
to know "what offset applies here" accept any [`OffsetProvider`]. A fixed
[`Offset`] is the simplest provider: it reports itself for every datetime.

```
use tempora::{civil::datetime, tz::{Offset, OffsetProvider}};

/// A provider for a place that observes a +01:00 offset in summer.
struct Summer;

impl OffsetProvider for Summer {
    fn offset_for_local(
        &self,
        dt: tempora::civil::LocalDateTime,
    ) -> Result<Offset, tempora::Error> {
        let hours = if (4..=9).contains(&dt.month()) { 1 } else { 0 };
        Offset::new(hours, 0)
    }

    fn offset_for_utc(
        &self,
        dt: tempora::civil::LocalDateTime,
    ) -> Result<Offset, tempora::Error> {
        self.offset_for_local(dt)
    }
}

let odt = datetime(2024, 7, 14, 12, 0, 0, 0).to_offset_with(&Summer)?;
assert_eq!(odt.to_string(), "2024-07-14T12:00:00+01:00");

# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

use crate::{civil::LocalDateTime, error::Error};

pub use self::offset::Offset;

mod offset;

/// A source of UTC offsets, such as a time zone database.
///
/// Implementations decide which offset is in effect either for a wall clock
/// reading (`offset_for_local`) or for an instant expressed as a UTC
/// datetime (`offset_for_utc`). How gaps and folds in wall clock time are
/// resolved is up to the implementation.
pub trait OffsetProvider {
    /// Returns the offset in effect at the given civil datetime.
    fn offset_for_local(&self, dt: LocalDateTime) -> Result<Offset, Error>;

    /// Returns the offset in effect at the instant given as a datetime in
    /// UTC.
    fn offset_for_utc(&self, dt: LocalDateTime) -> Result<Offset, Error>;
}

impl OffsetProvider for Offset {
    #[inline]
    fn offset_for_local(&self, _: LocalDateTime) -> Result<Offset, Error> {
        Ok(*self)
    }

    #[inline]
    fn offset_for_utc(&self, _: LocalDateTime) -> Result<Offset, Error> {
        Ok(*self)
    }
}

impl<'a, P: OffsetProvider + ?Sized> OffsetProvider for &'a P {
    #[inline]
    fn offset_for_local(&self, dt: LocalDateTime) -> Result<Offset, Error> {
        (**self).offset_for_local(dt)
    }

    #[inline]
    fn offset_for_utc(&self, dt: LocalDateTime) -> Result<Offset, Error> {
        (**self).offset_for_utc(dt)
    }
}
