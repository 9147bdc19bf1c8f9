use crate::error;

#[derive(Clone, Debug)]
pub(crate) enum Error {
    DateOutOfBounds { year: i32, month: i8, day: i8 },
    DatetimeOutOfRange,
    DayIndexOutOfBounds { index: i64 },
    FailedAddCalendar { years: i64, months: i64, days: i64 },
    FailedAddDays { days: i64 },
    FailedAddExtent,
    FailedAddTime,
    FailedToOffset,
    InvalidDay { year: i32, month: i8, day: i64, max: i8 },
    InvalidDayOfYear { year: i32, day: i64, max: i16 },
    InvalidHour { hour: i64 },
    InvalidHour12 { hour: i64 },
    InvalidISOWeek { year: i32, week: i64, max: i8 },
    InvalidMinute { minute: i64 },
    InvalidMonth { month: i64 },
    InvalidNanosecond { nanosecond: i64 },
    InvalidNanosecondOfDay { nanos: i64 },
    InvalidSecond { second: i64 },
    InvalidWeekday { offset: i64, min: i8 },
    YearOutOfBounds { year: i64 },
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::Civil(err).into()
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
            DateOutOfBounds { year, month, day } => write!(
                f,
                "date {year:04}-{month:02}-{day:02} is outside the \
                 supported range of -4713-11-24..=5874898-06-03",
            ),
            DatetimeOutOfRange => f.write_str(
                "datetime is outside the supported range of \
                 -4713-11-24T00:00:00..=5874898-06-03T23:59:59.999999999",
            ),
            DayIndexOutOfBounds { index } => write!(
                f,
                "day index {index} is outside the supported range \
                 of 0..=2147483647",
            ),
            FailedAddCalendar { years, months, days } => write!(
                f,
                "failed to add {years} years, {months} months \
                 and {days} days to date",
            ),
            FailedAddDays { days } => {
                write!(f, "failed to add {days} days to date")
            }
            FailedAddExtent => f.write_str("failed to add extent to datetime"),
            FailedAddTime => f.write_str("failed to add duration to time"),
            FailedToOffset => f.write_str(
                "failed to convert datetime to the requested offset",
            ),
            InvalidDay { year, month, day, max } => write!(
                f,
                "invalid day {day} for {year:04}-{month:02}, \
                 must be in range 1..={max}",
            ),
            InvalidDayOfYear { year, day, max } => write!(
                f,
                "invalid day of year {day} for year {year}, \
                 must be in range 1..={max}",
            ),
            InvalidHour { hour } => {
                write!(f, "invalid hour {hour}, must be in range 0..=99")
            }
            InvalidHour12 { hour } => write!(
                f,
                "invalid 12-hour clock hour {hour}, must be in range 1..=12",
            ),
            InvalidISOWeek { year, week, max } => write!(
                f,
                "invalid ISO week {week} for ISO week year {year}, \
                 must be in range 1..={max}",
            ),
            InvalidMinute { minute } => {
                write!(f, "invalid minute {minute}, must be in range 0..=59")
            }
            InvalidMonth { month } => {
                write!(f, "invalid month {month}, must be in range 1..=12")
            }
            InvalidNanosecond { nanosecond } => write!(
                f,
                "invalid nanosecond {nanosecond}, \
                 must be in range 0..=999999999",
            ),
            InvalidNanosecondOfDay { nanos } => write!(
                f,
                "invalid nanosecond of day {nanos}, \
                 must be in range 0..=359999999999999",
            ),
            InvalidSecond { second } => {
                write!(f, "invalid second {second}, must be in range 0..=59")
            }
            InvalidWeekday { offset, min } => write!(
                f,
                "invalid weekday number {offset}, \
                 must be in range {min}..={max}",
                max = min + 6,
            ),
            YearOutOfBounds { year } => write!(
                f,
                "year {year} is outside the supported range \
                 of -4713..=5874898",
            ),
        }
    }
}
