use alloc::boxed::Box;

use crate::{
    civil::{Era, LocalDate, Weekday},
    error,
    fmt::layout::Meridiem,
};

#[derive(Clone, Debug)]
pub(crate) enum Error {
    ExpectedColon { found: Option<char> },
    ExpectedDigits { found: Option<char> },
    ExpectedOffsetSign { found: Option<char> },
    LiteralEndOfInput { expected: char, position: usize },
    LiteralMismatch { expected: char, remaining: Box<str>, position: usize },
    /// `implied` is `None` when the day of year does not exist in the year.
    MismatchDayOfYear {
        day_of_year: i16,
        implied: Option<LocalDate>,
        date: LocalDate,
    },
    MismatchEra { year: i32, era: Era },
    MismatchHour { hour24: i8, hour12: i8, meridiem: Meridiem },
    MismatchISOWeekDate {
        year: i32,
        week: i8,
        weekday: Weekday,
        implied: Option<LocalDate>,
        date: LocalDate,
    },
    MismatchISOWeekYear { parsed: i32, date: LocalDate, got: i32 },
    MismatchMeridiem { hour: i8, meridiem: Meridiem },
    MismatchWeekday { parsed: Weekday, date: LocalDate, got: Weekday },
    RequiredDate,
    RequiredOffset,
    RequiredTime,
    Specifier { sequence: Box<str>, position: usize },
    UnconsumedInput { remaining: Box<str>, position: usize },
    UnexpectedEndAfterPercent { position: usize },
    UnknownName { what: &'static str, found: Box<str> },
    UnsupportedSpecifier { sequence: Box<str>, position: usize },
}

impl Error {
    /// Returns true if this error concerns the shape of the layout or the
    /// input rather than the meaning of the parsed fields.
    pub(crate) fn is_syntax(&self) -> bool {
        use self::Error::*;

        matches!(
            *self,
            ExpectedColon { .. }
                | ExpectedDigits { .. }
                | ExpectedOffsetSign { .. }
                | LiteralEndOfInput { .. }
                | LiteralMismatch { .. }
                | UnconsumedInput { .. }
                | UnexpectedEndAfterPercent { .. }
                | UnknownName { .. }
                | UnsupportedSpecifier { .. }
        )
    }
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::FmtLayout(err).into()
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
            ExpectedColon { found: None } => f.write_str(
                "expected `:` between offset hours and minutes, \
                 but reached end of input",
            ),
            ExpectedColon { found: Some(found) } => write!(
                f,
                "expected `:` between offset hours and minutes, \
                 but found {found:?}",
            ),
            ExpectedDigits { found: None } => f.write_str(
                "expected at least one digit, but reached end of input",
            ),
            ExpectedDigits { found: Some(found) } => write!(
                f,
                "expected at least one digit, but found {found:?}",
            ),
            ExpectedOffsetSign { found: None } => f.write_str(
                "expected `+`, `-` or `Z` to begin a UTC offset, \
                 but reached end of input",
            ),
            ExpectedOffsetSign { found: Some(found) } => write!(
                f,
                "expected `+`, `-` or `Z` to begin a UTC offset, \
                 but found {found:?}",
            ),
            LiteralEndOfInput { expected, position } => write!(
                f,
                "cannot parse input at position {position}: expected \
                 literal {expected:?}, but reached end of input",
            ),
            LiteralMismatch { expected, ref remaining, position } => write!(
                f,
                "cannot parse {remaining:?} at position {position}: \
                 expected literal {expected:?}",
            ),
            MismatchDayOfYear {
                day_of_year,
                implied: Some(implied),
                date,
            } => write!(
                f,
                "parsed day of year {day_of_year} implies date {implied}, \
                 which does not agree with parsed date {date}",
            ),
            MismatchDayOfYear { day_of_year, implied: None, date } => write!(
                f,
                "parsed day of year {day_of_year} does not exist in {year}, \
                 so it does not agree with parsed date {date}",
                year = date.year(),
            ),
            MismatchEra { year, era } => write!(
                f,
                "parsed year {year} does not agree with parsed era {era}",
            ),
            MismatchHour { hour24, hour12, meridiem } => write!(
                f,
                "parsed hour {hour24} does not agree with parsed \
                 12-hour clock reading {hour12} {meridiem}",
            ),
            MismatchISOWeekDate {
                year,
                week,
                weekday,
                implied: Some(implied),
                date,
            } => write!(
                f,
                "parsed ISO week date {year:04}-W{week:02}-{weekday} \
                 implies date {implied}, which does not agree with \
                 parsed date {date}",
                weekday = weekday.to_monday_one_offset(),
            ),
            MismatchISOWeekDate {
                year,
                week,
                weekday,
                implied: None,
                date,
            } => write!(
                f,
                "parsed ISO week date {year:04}-W{week:02}-{weekday} \
                 does not exist, so it does not agree with parsed date {date}",
                weekday = weekday.to_monday_one_offset(),
            ),
            MismatchISOWeekYear { parsed, date, got } => write!(
                f,
                "parsed ISO week year {parsed} does not agree with \
                 parsed date {date}, whose ISO week year is {got}",
            ),
            MismatchMeridiem { hour, meridiem } => write!(
                f,
                "parsed hour {hour} does not agree with parsed \
                 designator {meridiem}",
            ),
            MismatchWeekday { parsed, date, got } => write!(
                f,
                "parsed weekday {parsed} does not agree with parsed \
                 date {date}, which falls on a {got}",
                parsed = parsed.name(),
                got = got.name(),
            ),
            RequiredDate => f.write_str(
                "parsed fields do not include a year \
                 (one of %Y, %y, %C, %Ey, %EY or %G is required)",
            ),
            RequiredOffset => f.write_str(
                "parsed fields do not include a UTC offset \
                 (one of %z or %Ez is required)",
            ),
            RequiredTime => f.write_str(
                "parsed fields do not include a time of day \
                 (one of %H, %I, %M, %S or %f is required)",
            ),
            Specifier { ref sequence, position } => write!(
                f,
                "failed to parse input for `{sequence}` at position \
                 {position}",
            ),
            UnconsumedInput { ref remaining, position } => write!(
                f,
                "extra text {remaining:?} at position {position} remains \
                 after parsing the entire layout",
            ),
            UnexpectedEndAfterPercent { position } => write!(
                f,
                "layout ends with an incomplete specifier starting at \
                 position {position}",
            ),
            UnknownName { what, ref found } => {
                write!(f, "unrecognized {what} {found:?}")
            }
            UnsupportedSpecifier { ref sequence, position } => write!(
                f,
                "unsupported specifier `{sequence}` at position {position} \
                 in layout",
            ),
        }
    }
}
