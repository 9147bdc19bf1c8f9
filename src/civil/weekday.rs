use crate::error::{civil::Error as E, Error};

static NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// A representation for the day of the week.
///
/// The default representation follows ISO 8601. That is, the week starts with
/// Monday and numbering starts at `1`. However, the various constructors and
/// accessors support using other schemes in wide use:
///
/// * [`Weekday::from_monday_zero_offset`] builds a weekday from
/// a scheme that starts the week on Monday at offset `0`, while
/// [`Weekday::to_monday_zero_offset`] converts to it.
/// * [`Weekday::from_monday_one_offset`] builds a weekday from a scheme
/// that starts the week on Monday at offset `1` (the default representation),
/// while [`Weekday::to_monday_one_offset`] converts to it.
/// * [`Weekday::from_sunday_zero_offset`] builds a weekday from
/// a scheme that starts the week on Sunday at offset `0`, while
/// [`Weekday::to_sunday_zero_offset`] converts to it.
///
/// Callers must not assume that the discriminant of this enum lines up with
/// the numbering used by other libraries.
///
/// # Example
///
/// ```
/// use tempora::civil::{date, Weekday};
///
/// let wd = date(2024, 7, 14).weekday();
/// assert_eq!(wd, Weekday::Sunday);
/// assert_eq!(wd.to_monday_one_offset(), 7);
/// assert_eq!(wd.to_sunday_zero_offset(), 0);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Weekday {
    Monday = 0,
    Tuesday = 1,
    Wednesday = 2,
    Thursday = 3,
    Friday = 4,
    Saturday = 5,
    Sunday = 6,
}

impl Weekday {
    /// Convert an offset to a structured `Weekday`.
    ///
    /// The offset should be from a scheme where the first day of the week
    /// is Monday and starts numbering at `0`.
    ///
    /// # Errors
    ///
    /// This returns an error when the given offset is not in the range
    /// `0..=6`.
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::civil::Weekday;
    ///
    /// assert_eq!(Weekday::from_monday_zero_offset(3)?, Weekday::Thursday);
    /// assert!(Weekday::from_monday_zero_offset(7).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_monday_zero_offset(offset: i8) -> Result<Weekday, Error> {
        if !(0 <= offset && offset <= 6) {
            let offset = i64::from(offset);
            return Err(Error::from(E::InvalidWeekday { offset, min: 0 }));
        }
        Ok(Weekday::from_monday_zero_offset_unchecked(offset))
    }

    /// Convert an offset to a structured `Weekday`.
    ///
    /// The offset should be from a scheme where the first day of the week
    /// is Monday and starts numbering at `1`. This is the ISO 8601 scheme
    /// used by `%u`.
    ///
    /// # Errors
    ///
    /// This returns an error when the given offset is not in the range
    /// `1..=7`.
    pub fn from_monday_one_offset(offset: i8) -> Result<Weekday, Error> {
        if !(1 <= offset && offset <= 7) {
            let offset = i64::from(offset);
            return Err(Error::from(E::InvalidWeekday { offset, min: 1 }));
        }
        Ok(Weekday::from_monday_zero_offset_unchecked(offset - 1))
    }

    /// Convert an offset to a structured `Weekday`.
    ///
    /// The offset should be from a scheme where the first day of the week
    /// is Sunday and starts numbering at `0`.
    ///
    /// # Errors
    ///
    /// This returns an error when the given offset is not in the range
    /// `0..=6`.
    pub fn from_sunday_zero_offset(offset: i8) -> Result<Weekday, Error> {
        if !(0 <= offset && offset <= 6) {
            let offset = i64::from(offset);
            return Err(Error::from(E::InvalidWeekday { offset, min: 0 }));
        }
        Ok(Weekday::from_monday_zero_offset_unchecked((offset + 6) % 7))
    }

    /// Returns this weekday as an offset, starting at Monday with `0`.
    pub fn to_monday_zero_offset(self) -> i8 {
        self as i8
    }

    /// Returns this weekday as an offset, starting at Monday with `1`.
    pub fn to_monday_one_offset(self) -> i8 {
        self.to_monday_zero_offset() + 1
    }

    /// Returns this weekday as an offset, starting at Sunday with `0`.
    pub fn to_sunday_zero_offset(self) -> i8 {
        (self.to_monday_zero_offset() + 1) % 7
    }

    /// Returns the next weekday, wrapping around at the end of the week.
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::civil::Weekday;
    ///
    /// assert_eq!(Weekday::Sunday.next(), Weekday::Monday);
    /// assert_eq!(Weekday::Monday.previous(), Weekday::Sunday);
    /// ```
    pub fn next(self) -> Weekday {
        Weekday::from_monday_zero_offset_unchecked(
            (self.to_monday_zero_offset() + 1) % 7,
        )
    }

    /// Returns the previous weekday, wrapping around at the start of the
    /// week.
    pub fn previous(self) -> Weekday {
        Weekday::from_monday_zero_offset_unchecked(
            (self.to_monday_zero_offset() + 6) % 7,
        )
    }

    /// Returns the full English name of this weekday, e.g., `Wednesday`.
    pub fn name(self) -> &'static str {
        NAMES[usize::from(self as u8)]
    }

    /// Returns the three letter English abbreviation of this weekday, e.g.,
    /// `Wed`.
    pub fn abbreviation(self) -> &'static str {
        &self.name()[..3]
    }

    /// The caller must guarantee `0 <= offset <= 6`.
    pub(crate) fn from_monday_zero_offset_unchecked(offset: i8) -> Weekday {
        match offset {
            0 => Weekday::Monday,
            1 => Weekday::Tuesday,
            2 => Weekday::Wednesday,
            3 => Weekday::Thursday,
            4 => Weekday::Friday,
            5 => Weekday::Saturday,
            6 => Weekday::Sunday,
            _ => unreachable!("invalid weekday offset {offset}"),
        }
    }

    pub(crate) fn all() -> impl Iterator<Item = Weekday> {
        (0..7).map(Weekday::from_monday_zero_offset_unchecked)
    }
}

impl core::fmt::Display for Weekday {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Weekday {
    fn arbitrary(g: &mut quickcheck::Gen) -> Weekday {
        let offset = u8::arbitrary(g) % 7;
        Weekday::from_monday_zero_offset_unchecked(offset as i8)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn offsets() {
        for wd in Weekday::all() {
            let zero = wd.to_monday_zero_offset();
            assert_eq!(Weekday::from_monday_zero_offset(zero).unwrap(), wd);
            let one = wd.to_monday_one_offset();
            assert_eq!(Weekday::from_monday_one_offset(one).unwrap(), wd);
            let sun = wd.to_sunday_zero_offset();
            assert_eq!(Weekday::from_sunday_zero_offset(sun).unwrap(), wd);
        }
        assert_eq!(Weekday::Sunday.to_sunday_zero_offset(), 0);
        assert_eq!(Weekday::Monday.to_sunday_zero_offset(), 1);
        assert_eq!(Weekday::Sunday.to_monday_one_offset(), 7);
    }

    #[test]
    fn invalid_offsets() {
        insta::assert_snapshot!(
            Weekday::from_monday_one_offset(0).unwrap_err(),
            @"invalid weekday number 0, must be in range 1..=7",
        );
        insta::assert_snapshot!(
            Weekday::from_sunday_zero_offset(7).unwrap_err(),
            @"invalid weekday number 7, must be in range 0..=6",
        );
        assert!(Weekday::from_monday_zero_offset(-1)
            .unwrap_err()
            .is_invalid_date());
    }

    #[test]
    fn names() {
        assert_eq!(Weekday::Wednesday.name(), "Wednesday");
        assert_eq!(Weekday::Wednesday.abbreviation(), "Wed");
        assert_eq!(Weekday::Sunday.to_string(), "Sunday");
    }

    quickcheck::quickcheck! {
        fn prop_next_previous_inverse(wd: Weekday) -> bool {
            wd.next().previous() == wd && wd.previous().next() == wd
        }
    }
}
