use crate::error;

#[derive(Clone, Debug)]
pub(crate) enum Error {
    CalendarUnitsInDuration,
    EmptyDuration { position: usize },
    EmptyTime { position: usize },
    ExpectedDesignator { found: Option<char>, expected: &'static str, position: usize },
    ExpectedDesignatorP { found: Option<char>, position: usize },
    ExpectedNumber { found: Option<char>, position: usize },
    FractionNotLast { position: usize },
    FractionTooLong { position: usize },
    IntervalEndpoint { position: usize },
    IntervalMissingSeparator,
    IntervalRepetition { position: usize },
    IntervalTwoDurations,
    OutOfOrder { designator: char, expected: &'static str, position: usize },
    Overflow { position: usize },
    TimeUnitsInPeriod,
    UnexpectedTrailing { found: char, position: usize },
    WeeksMixed { position: usize },
}

impl Error {
    pub(crate) fn is_syntax(&self) -> bool {
        use self::Error::*;

        !matches!(
            *self,
            Overflow { .. }
                | CalendarUnitsInDuration
                | TimeUnitsInPeriod
                | IntervalEndpoint { .. }
        )
    }
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::FmtIso8601(err).into()
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
            CalendarUnitsInDuration => f.write_str(
                "a fixed length duration cannot contain years, \
                 months, weeks or days",
            ),
            EmptyDuration { position } => write!(
                f,
                "expected at least one duration component at \
                 position {position}",
            ),
            EmptyTime { position } => write!(
                f,
                "expected at least one of H, M or S after `T` at \
                 position {position}",
            ),
            ExpectedDesignator { found: None, expected, position } => write!(
                f,
                "expected one of {expected} at position {position}, \
                 but reached end of input",
            ),
            ExpectedDesignator { found: Some(found), expected, position } => {
                write!(
                    f,
                    "unexpected character {found:?} at position \
                     {position}, expected one of {expected}",
                )
            }
            ExpectedDesignatorP { found: None, position } => write!(
                f,
                "expected `P` to begin a duration at position {position}, \
                 but reached end of input",
            ),
            ExpectedDesignatorP { found: Some(found), position } => write!(
                f,
                "unexpected character {found:?} at position {position}, \
                 expected `P` to begin a duration",
            ),
            ExpectedNumber { found: None, position } => write!(
                f,
                "expected a number at position {position}, \
                 but reached end of input",
            ),
            ExpectedNumber { found: Some(found), position } => write!(
                f,
                "unexpected character {found:?} at position {position}, \
                 expected a number",
            ),
            FractionNotLast { position } => write!(
                f,
                "found component at position {position} after a \
                 fractional time component, which must be the last one",
            ),
            FractionTooLong { position } => write!(
                f,
                "fraction at position {position} has more than \
                 9 digits of precision",
            ),
            IntervalEndpoint { position } => write!(
                f,
                "failed to parse interval endpoint at position {position}",
            ),
            IntervalMissingSeparator => f.write_str(
                "an interval without a `/` or `--` separator \
                 must be a single duration",
            ),
            IntervalRepetition { position } => write!(
                f,
                "invalid repetition count at position {position}, \
                 expected `R`, optional digits and a separator",
            ),
            IntervalTwoDurations => f.write_str(
                "an interval cannot be made of two durations",
            ),
            OutOfOrder { designator, expected, position } => write!(
                f,
                "designator {designator:?} at position {position} is \
                 repeated or out of order, expected one of {expected}",
            ),
            Overflow { position } => write!(
                f,
                "duration component ending at position {position} \
                 overflows the range of a duration",
            ),
            TimeUnitsInPeriod => f.write_str(
                "a period cannot contain hours, minutes or seconds",
            ),
            UnexpectedTrailing { found, position } => write!(
                f,
                "unexpected character {found:?} at position {position} \
                 after the end of the duration",
            ),
            WeeksMixed { position } => write!(
                f,
                "week designator at position {position} cannot be \
                 combined with years, months or days",
            ),
        }
    }
}
