/*!
A strftime-like layout language for formatting and parsing.

A layout is literal text interspersed with specifiers of the form
`%[-][E][0-9]<letter>`:

* `-` turns off zero padding when formatting.
* `E` selects an alternate representation of the field.
* A single digit sets the width of a numeric field (both the padding when
formatting and the maximum number of digits accepted when parsing), or the
number of fractional digits for `%f`.

# Example

```
use tempora::civil::{date, LocalDate};

let d = date(2024, 7, 14);
assert_eq!(d.strftime("%A, %B %-d, %Y")?, "Sunday, July 14, 2024");

let d = LocalDate::strptime("%Y-%j", "2024-196")?;
assert_eq!(d, date(2024, 7, 14));

# Ok::<(), Box<dyn std::error::Error>>(())
```

A [`Layout`] can be tokenized once and reused:

```
use tempora::{civil::time, fmt::layout::Layout};

let layout = Layout::new("%H:%M:%S%Ef")?;
assert_eq!(layout.format(time(9, 5, 0, 0))?, "09:05:00");
assert_eq!(layout.format(time(9, 5, 0, 250_000_000))?, "09:05:00.25");
assert_eq!(layout.parse("09:05:00,25")?.to_time()?, time(9, 5, 0, 250_000_000));

# Ok::<(), Box<dyn std::error::Error>>(())
```

# Specifiers

| Specifier | Example | Description |
| --------- | ------- | ----------- |
| `%%` | `%` | A literal `%`. |
| `%A`, `%a` | `Sunday`, `Sun` | The full and abbreviated weekday name. |
| `%B`, `%b` | `July`, `Jul` | The full and abbreviated month name. |
| `%C` | `20` | The century of the year. |
| `%d` | `14` | The day of the month. |
| `%f` | `25` | Fractional seconds, with trailing zeros trimmed. |
| `%G` | `2024` | The ISO 8601 week-numbering year. |
| `%H` | `16` | The hour, `00` through `99`. |
| `%I` | `04` | The hour on a 12-hour clock. |
| `%j` | `196` | The day of the year. |
| `%M` | `24` | The minute. |
| `%m` | `07` | The month. |
| `%P`, `%p` | `pm`, `PM` | The meridiem designator. |
| `%S` | `00` | The second. |
| `%u` | `7` | The ISO 8601 weekday, `1` (Monday) through `7` (Sunday). |
| `%V` | `28` | The ISO 8601 week number. |
| `%Y` | `2024` | The year, with a `-` for years before `0`. |
| `%y` | `24` | The year within its century. |
| `%z` | `-0400` | The UTC offset as `+hhmm`. |
| `%EC` | `CE` | The era name. |
| `%Ef` | `.25` | Fractional seconds with a leading `.`, omitted when zero. |
| `%EY` | `44 BCE` | The year within its era, followed by the era name. |
| `%Ey` | `44` | The year within its era. |
| `%Ez` | `-04:00` | The UTC offset as `+hh:mm`, or `Z` when zero. |

When parsing, names are matched case-insensitively, both `.` and `,` are
accepted before the digits of `%Ef`, and `%z` accepts `Z`, `+hh` and `+hhmm`.
`%Y` and `%G` accept up to seven digits, but only four (or the given width)
when another directive follows with no literal in between, as in `%Y%m%d`.

# Reconciliation

Parsing first collects every field and only then builds a value, so fields
may appear in any order. Redundant fields must agree: a date parsed from
`%Y-%m-%d` is checked against any `%j`, `%G`/`%V`/`%u` and `%A` that were
also parsed, and a redundant field naming a day that does not exist in
that year is a mismatch too. Missing month and day fields default to
January 1st, missing time fields default to zero, and a missing meridiem
means AM.

Two-digit years from `%y` are placed in a century using the rule configured
by [`ParseConfig`].
*/

use alloc::{boxed::Box, string::String, vec::Vec};

use crate::{
    civil::{Era, LocalDate, LocalDateTime, LocalTime, Weekday},
    error::{fmt::layout::Error as E, Error},
    fmt::Write,
    tz::Offset,
    OffsetDateTime,
};

pub(crate) use self::format::IsoPrinter;

mod format;
mod parse;

/// `2024-07-14`
pub const ISO_DATE: &str = "%Y-%m-%d";
/// `20240714`
pub const ISO_DATE_BASIC: &str = "%Y%m%d";
/// `2024-196`
pub const ISO_ORDINAL_DATE: &str = "%Y-%j";
/// `2024-W28-7`
pub const ISO_WEEK_DATE: &str = "%G-W%V-%u";
/// `16:24:00.5`
pub const ISO_TIME: &str = "%H:%M:%S%Ef";
/// `162400.5`
pub const ISO_TIME_BASIC: &str = "%H%M%S%Ef";
/// `2024-07-14T16:24:00.5`
pub const ISO_DATETIME: &str = "%Y-%m-%dT%H:%M:%S%Ef";
/// `20240714T162400.5`
pub const ISO_DATETIME_BASIC: &str = "%Y%m%dT%H%M%S%Ef";
/// `2024-07-14T16:24:00.5-04:00`
pub const ISO_OFFSET_DATETIME: &str = "%Y-%m-%dT%H:%M:%S%Ef%Ez";
/// `20240714T162400.5-0400`
pub const ISO_OFFSET_DATETIME_BASIC: &str = "%Y%m%dT%H%M%S%Ef%z";
/// `Sun, 14 Jul 2024 16:24:00 -0400`
pub const RFC1123: &str = "%a, %d %b %Y %H:%M:%S %z";
/// `4:24PM`
pub const KITCHEN: &str = "%-I:%M%p";

/// Formats the given value with a layout.
///
/// # Errors
///
/// This returns an error when the layout is invalid or when the writer
/// fails.
///
/// # Panics
///
/// This panics when the layout uses a specifier for a field that `pieces`
/// does not have, such as `%Y` with a [`LocalTime`].
pub fn format(
    layout: &str,
    pieces: impl Into<Pieces>,
) -> Result<String, Error> {
    Layout::new(layout)?.format(pieces)
}

/// Parses `input` with a layout, using the default [`ParseConfig`].
///
/// # Errors
///
/// This returns an error when the layout is invalid or when the input does
/// not match it.
pub fn parse(layout: &str, input: &str) -> Result<Fields, Error> {
    Layout::new(layout)?.parse(input)
}

/// Parses `input` with each layout in turn and converts the first match.
/// When every layout fails, the error from the first one is returned.
pub(crate) fn parse_first<T>(
    layouts: &[&str],
    input: &str,
    convert: impl Fn(Fields) -> Result<T, Error>,
) -> Result<T, Error> {
    let mut first_err = None;
    for &layout in layouts {
        match parse(layout, input).and_then(&convert) {
            Ok(value) => return Ok(value),
            Err(err) => {
                trace!("layout {layout:?} rejected {input:?}: {err}");
                first_err.get_or_insert(err);
            }
        }
    }
    Err(first_err.unwrap_or_else(|| Error::from(E::RequiredDate)))
}

/// A tokenized layout.
///
/// Tokenizing validates the layout, so formatting and parsing with a
/// `Layout` only fail because of the value or the input.
#[derive(Clone, Debug)]
pub struct Layout {
    source: Box<str>,
    items: Vec<Item>,
}

impl Layout {
    /// Tokenizes a layout.
    ///
    /// # Errors
    ///
    /// This returns an error for an unsupported specifier or a trailing `%`.
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::fmt::layout::Layout;
    ///
    /// assert_eq!(
    ///     Layout::new("%Y-%Q").unwrap_err().to_string(),
    ///     "unsupported specifier `%Q` at position 3 in layout",
    /// );
    /// ```
    pub fn new(layout: &str) -> Result<Layout, Error> {
        let items = tokenize(layout)?;
        Ok(Layout { source: layout.into(), items })
    }

    /// Returns the layout string this was built from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Formats a value into a new string.
    ///
    /// # Panics
    ///
    /// This panics when the layout uses a specifier for a field that
    /// `pieces` does not have.
    pub fn format(&self, pieces: impl Into<Pieces>) -> Result<String, Error> {
        let mut buf = String::new();
        self.format_to(pieces, &mut buf)?;
        Ok(buf)
    }

    /// Formats a value into the given writer.
    ///
    /// # Panics
    ///
    /// This panics when the layout uses a specifier for a field that
    /// `pieces` does not have.
    pub fn format_to<W: Write>(
        &self,
        pieces: impl Into<Pieces>,
        wtr: W,
    ) -> Result<(), Error> {
        format::Formatter { layout: self, pieces: pieces.into(), wtr }.format()
    }

    /// Parses `input` with the default [`ParseConfig`].
    pub fn parse(&self, input: &str) -> Result<Fields, Error> {
        self.parse_with(&ParseConfig::new(), input)
    }

    /// Parses `input` with the given configuration.
    ///
    /// ```
    /// use tempora::{
    ///     civil::date,
    ///     fmt::layout::{Century, Layout, ParseConfig},
    /// };
    ///
    /// let layout = Layout::new("%y-%m-%d")?;
    /// assert_eq!(layout.parse("80-01-02")?.to_date()?, date(1980, 1, 2));
    ///
    /// let config = ParseConfig::new().century(Century::Fixed(21));
    /// assert_eq!(layout.parse_with(&config, "80-01-02")?.to_date()?, date(2180, 1, 2));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn parse_with(
        &self,
        config: &ParseConfig,
        input: &str,
    ) -> Result<Fields, Error> {
        if config.century != Century::Posix {
            debug!("parsing {input:?} with century rule {:?}", config.century);
        }
        let mut fields = Fields::new(config.century);
        parse::Parser { layout: self, input, pos: 0, fields: &mut fields }
            .parse()?;
        Ok(fields)
    }
}

#[derive(Clone, Debug)]
enum Item {
    Literal(core::ops::Range<usize>),
    Directive(Directive),
}

#[derive(Clone, Copy, Debug)]
struct Directive {
    kind: Kind,
    no_pad: bool,
    precision: Option<u8>,
    /// The byte range of the specifier in the layout.
    start: usize,
    end: usize,
}

impl Directive {
    fn sequence<'l>(&self, layout: &'l Layout) -> &'l str {
        &layout.source[self.start..self.end]
    }

    /// The zero padding width when formatting.
    fn width(&self) -> u8 {
        if self.no_pad {
            0
        } else {
            self.precision.unwrap_or_else(|| self.kind.default_width())
        }
    }

    /// The maximum number of digits accepted when parsing.
    ///
    /// `abutting` is true when the next layout item is another directive,
    /// as in `%Y%m%d`, where a year can only take its default width.
    fn max_digits(&self, abutting: bool) -> usize {
        let default = self.kind.max_digits(abutting);
        self.precision.map_or(default, |p| default.max(usize::from(p)))
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Kind {
    Century,
    Day,
    DayOfYear,
    EraName,
    EraYear,
    EraYearFull,
    Fraction,
    FractionDot,
    Hour,
    Hour12,
    IsoWeek,
    IsoWeekYear,
    MeridiemLower,
    MeridiemUpper,
    Minute,
    Month,
    MonthAbbrev,
    MonthName,
    Offset,
    OffsetColon,
    Percent,
    Second,
    WeekdayAbbrev,
    WeekdayIso,
    WeekdayName,
    Year,
    Year2,
}

/// Which of the pieces of a value a specifier reads.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Needs {
    Date,
    Time,
    Offset,
    Nothing,
}

impl Kind {
    fn from_letter(letter: char, alt: bool) -> Option<Kind> {
        use self::Kind::*;

        let kind = match (alt, letter) {
            (false, '%') => Percent,
            (false, 'A') => WeekdayName,
            (false, 'a') => WeekdayAbbrev,
            (false, 'B') => MonthName,
            (false, 'b') => MonthAbbrev,
            (false, 'C') => Century,
            (false, 'd') => Day,
            (false, 'f') => Fraction,
            (false, 'G') => IsoWeekYear,
            (false, 'H') => Hour,
            (false, 'I') => Hour12,
            (false, 'j') => DayOfYear,
            (false, 'M') => Minute,
            (false, 'm') => Month,
            (false, 'P') => MeridiemLower,
            (false, 'p') => MeridiemUpper,
            (false, 'S') => Second,
            (false, 'u') => WeekdayIso,
            (false, 'V') => IsoWeek,
            (false, 'Y') => Year,
            (false, 'y') => Year2,
            (false, 'z') => Offset,
            (true, 'C') => EraName,
            (true, 'f') => FractionDot,
            (true, 'Y') => EraYearFull,
            (true, 'y') => EraYear,
            (true, 'z') => OffsetColon,
            _ => return None,
        };
        Some(kind)
    }

    fn needs(self) -> Needs {
        use self::Kind::*;

        match self {
            Century | Day | DayOfYear | EraName | EraYear | EraYearFull
            | IsoWeek | IsoWeekYear | Month | MonthAbbrev | MonthName
            | WeekdayAbbrev | WeekdayIso | WeekdayName | Year | Year2 => {
                Needs::Date
            }
            Fraction | FractionDot | Hour | Hour12 | MeridiemLower
            | MeridiemUpper | Minute | Second => Needs::Time,
            Offset | OffsetColon => Needs::Offset,
            Percent => Needs::Nothing,
        }
    }

    fn default_width(self) -> u8 {
        use self::Kind::*;

        match self {
            Year | IsoWeekYear => 4,
            DayOfYear => 3,
            Century | Day | Hour | Hour12 | IsoWeek | Minute | Month
            | Second | Year2 => 2,
            _ => 1,
        }
    }

    fn max_digits(self, abutting: bool) -> usize {
        use self::Kind::*;

        match self {
            Year | IsoWeekYear if !abutting => 7,
            EraYear | EraYearFull => 7,
            Fraction | FractionDot => 9,
            kind => usize::from(kind.default_width()),
        }
    }
}

fn tokenize(layout: &str) -> Result<Vec<Item>, Error> {
    let mut items = Vec::new();
    let mut pos = 0;
    while pos < layout.len() {
        if layout.as_bytes()[pos] != b'%' {
            let end = layout[pos..].find('%').map_or(layout.len(), |i| pos + i);
            items.push(Item::Literal(pos..end));
            pos = end;
            continue;
        }
        let directive = tokenize_directive(layout, pos)?;
        pos = directive.end;
        items.push(Item::Directive(directive));
    }
    Ok(items)
}

fn tokenize_directive(
    layout: &str,
    start: usize,
) -> Result<Directive, Error> {
    let bytes = layout.as_bytes();
    let mut pos = start + 1;
    let no_pad = bytes.get(pos) == Some(&b'-');
    if no_pad {
        pos += 1;
    }
    let alt = bytes.get(pos) == Some(&b'E');
    if alt {
        pos += 1;
    }
    let mut precision = None;
    if let Some(&digit @ b'0'..=b'9') = bytes.get(pos) {
        precision = Some(digit - b'0');
        pos += 1;
    }
    let Some(letter) = layout[pos..].chars().next() else {
        return Err(Error::from(E::UnexpectedEndAfterPercent { position: start }));
    };
    let end = pos + letter.len_utf8();
    let kind = Kind::from_letter(letter, alt).ok_or_else(|| {
        E::UnsupportedSpecifier {
            sequence: layout[start..end].into(),
            position: start,
        }
    })?;
    Ok(Directive { kind, no_pad, precision, start, end })
}

/// The date, time and offset of a value being formatted.
///
/// This is usually created implicitly through one of its `From` impls.
#[derive(Clone, Copy, Debug, Default)]
pub struct Pieces {
    date: Option<LocalDate>,
    time: Option<LocalTime>,
    offset: Option<Offset>,
}

impl Pieces {
    /// Returns empty pieces.
    pub fn new() -> Pieces {
        Pieces::default()
    }

    /// Sets the date.
    pub fn date(self, date: LocalDate) -> Pieces {
        Pieces { date: Some(date), ..self }
    }

    /// Sets the time of day.
    pub fn time(self, time: LocalTime) -> Pieces {
        Pieces { time: Some(time), ..self }
    }

    /// Sets the UTC offset.
    pub fn offset(self, offset: Offset) -> Pieces {
        Pieces { offset: Some(offset), ..self }
    }
}

impl From<LocalDate> for Pieces {
    fn from(date: LocalDate) -> Pieces {
        Pieces::new().date(date)
    }
}

impl From<LocalTime> for Pieces {
    fn from(time: LocalTime) -> Pieces {
        Pieces::new().time(time)
    }
}

impl From<LocalDateTime> for Pieces {
    fn from(dt: LocalDateTime) -> Pieces {
        Pieces::new().date(dt.date()).time(dt.time())
    }
}

impl From<OffsetDateTime> for Pieces {
    fn from(odt: OffsetDateTime) -> Pieces {
        Pieces::from(odt.datetime()).offset(odt.offset())
    }
}

/// How to place a two-digit year from `%y` in a century.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Century {
    /// `69` through `99` are in the 1900s, and `00` through `68` are in the
    /// 2000s.
    #[default]
    Posix,
    /// Every two-digit year is in the given century, so `Fixed(19)` puts
    /// `10` in 1910.
    Fixed(i32),
}

/// Configuration for parsing with a layout.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParseConfig {
    century: Century,
}

impl ParseConfig {
    /// Returns the default configuration.
    pub fn new() -> ParseConfig {
        ParseConfig::default()
    }

    /// Sets the rule for two-digit years.
    pub fn century(self, century: Century) -> ParseConfig {
        ParseConfig { century, ..self }
    }
}

/// The morning or afternoon half of a 12-hour clock.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Meridiem {
    AM,
    PM,
}

impl Meridiem {
    fn from_hour(hour: i8) -> Meridiem {
        if hour < 12 {
            Meridiem::AM
        } else {
            Meridiem::PM
        }
    }
}

impl core::fmt::Display for Meridiem {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            Meridiem::AM => f.write_str("AM"),
            Meridiem::PM => f.write_str("PM"),
        }
    }
}

/// The fields collected by parsing with a layout.
///
/// A `Fields` value is not validated as a whole until it is converted into
/// a value with one of its `to_*` methods.
///
/// # Example
///
/// ```
/// use tempora::{civil::date, fmt::layout};
///
/// let fields = layout::parse("%A %Y-%m-%d", "Monday 2024-07-15")?;
/// assert_eq!(fields.to_date()?, date(2024, 7, 15));
///
/// let fields = layout::parse("%A %Y-%m-%d", "Tuesday 2024-07-15")?;
/// assert_eq!(
///     fields.to_date().unwrap_err().to_string(),
///     "parsed weekday Tuesday does not agree with parsed date 2024-07-15, \
///      which falls on a Monday",
/// );
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct Fields {
    century_rule: Century,
    year: Option<i32>,
    year2: Option<i32>,
    century: Option<i32>,
    era: Option<Era>,
    era_year: Option<i32>,
    month: Option<i8>,
    day: Option<i8>,
    day_of_year: Option<i16>,
    iso_week_year: Option<i32>,
    iso_week: Option<i8>,
    weekday: Option<Weekday>,
    hour: Option<i8>,
    hour12: Option<i8>,
    meridiem: Option<Meridiem>,
    minute: Option<i8>,
    second: Option<i8>,
    subsec: Option<i32>,
    offset: Option<Offset>,
}

/// Which fields a reconciled date was built from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum DateSource {
    Calendar,
    DayOfYear,
    IsoWeek,
}

impl Fields {
    fn new(century_rule: Century) -> Fields {
        Fields {
            century_rule,
            year: None,
            year2: None,
            century: None,
            era: None,
            era_year: None,
            month: None,
            day: None,
            day_of_year: None,
            iso_week_year: None,
            iso_week: None,
            weekday: None,
            hour: None,
            hour12: None,
            meridiem: None,
            minute: None,
            second: None,
            subsec: None,
            offset: None,
        }
    }

    /// Builds a date from the parsed fields and checks that every redundant
    /// field agrees with it.
    ///
    /// # Errors
    ///
    /// This returns an error when no year was parsed, when the fields do not
    /// form a valid date or when they disagree with each other.
    pub fn to_date(&self) -> Result<LocalDate, Error> {
        let (date, source) = self.resolve_date()?;
        if let Some(day_of_year) = self.day_of_year {
            if source != DateSource::DayOfYear {
                let implied =
                    LocalDate::from_day_of_year(date.year(), day_of_year).ok();
                if implied != Some(date) {
                    return Err(Error::from(E::MismatchDayOfYear {
                        day_of_year,
                        implied,
                        date,
                    }));
                }
            }
        }
        if let Some(week) = self.iso_week {
            if source != DateSource::IsoWeek {
                let year = self.iso_week_year.unwrap_or(date.iso_week().0);
                let weekday = self.weekday.unwrap_or(date.weekday());
                let implied =
                    LocalDate::from_iso_week(year, week, weekday).ok();
                if implied != Some(date) {
                    return Err(Error::from(E::MismatchISOWeekDate {
                        year,
                        week,
                        weekday,
                        implied,
                        date,
                    }));
                }
            }
        } else if let Some(parsed) = self.iso_week_year {
            let got = date.iso_week().0;
            if parsed != got {
                return Err(Error::from(E::MismatchISOWeekYear {
                    parsed,
                    date,
                    got,
                }));
            }
        }
        if let Some(parsed) = self.weekday {
            let got = date.weekday();
            if parsed != got {
                return Err(Error::from(E::MismatchWeekday { parsed, date, got }));
            }
        }
        Ok(date)
    }

    fn resolve_date(&self) -> Result<(LocalDate, DateSource), Error> {
        let Some(year) = self.resolve_year()? else {
            if let (Some(year), Some(week)) = (self.iso_week_year, self.iso_week)
            {
                if self.month.is_none() && self.day.is_none() {
                    let weekday = self.weekday.unwrap_or(Weekday::Monday);
                    let date = LocalDate::from_iso_week(year, week, weekday)?;
                    return Ok((date, DateSource::IsoWeek));
                }
            }
            return Err(Error::from(E::RequiredDate));
        };
        if self.month.is_some() || self.day.is_some() {
            let month = self.month.unwrap_or(1);
            let day = self.day.unwrap_or(1);
            return Ok((LocalDate::new(year, month, day)?, DateSource::Calendar));
        }
        if let Some(day_of_year) = self.day_of_year {
            let date = LocalDate::from_day_of_year(year, day_of_year)?;
            return Ok((date, DateSource::DayOfYear));
        }
        if let Some(week) = self.iso_week {
            let year = self.iso_week_year.unwrap_or(year);
            let weekday = self.weekday.unwrap_or(Weekday::Monday);
            let date = LocalDate::from_iso_week(year, week, weekday)?;
            return Ok((date, DateSource::IsoWeek));
        }
        Ok((LocalDate::new(year, 1, 1)?, DateSource::Calendar))
    }

    /// Returns the year from `%Y`, `%y`/`%C` or the era fields, checking
    /// that the era agrees with any other year that was parsed.
    fn resolve_year(&self) -> Result<Option<i32>, Error> {
        let era_year = match self.era_year {
            None => None,
            Some(era_year) => {
                let era = self.era.unwrap_or(Era::CE);
                let year = era.to_year(i64::from(era_year));
                Some(i32::try_from(year).map_err(|_| {
                    Error::range("era year", era_year, 1, i32::MAX)
                })?)
            }
        };
        let in_century = |century: i32, yy: i32| {
            let year = i64::from(century) * 100 + i64::from(yy);
            i32::try_from(year)
                .map_err(|_| Error::range("year", year, i32::MIN, i32::MAX))
        };
        let year = match (self.year, self.year2, self.century) {
            (Some(year), _, _) => Some(year),
            (None, Some(yy), Some(century)) => Some(in_century(century, yy)?),
            (None, Some(yy), None) => Some(match self.century_rule {
                Century::Posix if yy >= 69 => 1900 + yy,
                Century::Posix => 2000 + yy,
                Century::Fixed(century) => in_century(century, yy)?,
            }),
            (None, None, Some(century)) => Some(in_century(century, 0)?),
            (None, None, None) => None,
        };
        match (year, era_year) {
            (Some(year), Some(from_era)) if year != from_era => {
                let era = self.era.unwrap_or(Era::CE);
                Err(Error::from(E::MismatchEra { year, era }))
            }
            (Some(year), None) => {
                if let Some(era) = self.era {
                    let agrees = match era {
                        Era::BCE => year <= 0,
                        Era::CE => year > 0,
                    };
                    if !agrees {
                        return Err(Error::from(E::MismatchEra { year, era }));
                    }
                }
                Ok(Some(year))
            }
            (year, from_era) => Ok(year.or(from_era)),
        }
    }

    /// Builds a time of day from the parsed fields. The 12-hour clock and
    /// meridiem are combined here, after all fields have been seen.
    ///
    /// # Errors
    ///
    /// This returns an error when no time fields were parsed, when the
    /// fields are out of range or when the 12-hour clock disagrees with the
    /// 24-hour clock.
    pub fn to_time(&self) -> Result<LocalTime, Error> {
        if !self.has_time() {
            return Err(Error::from(E::RequiredTime));
        }
        self.resolve_time()
    }

    fn has_time(&self) -> bool {
        self.hour.is_some()
            || self.hour12.is_some()
            || self.minute.is_some()
            || self.second.is_some()
            || self.subsec.is_some()
    }

    fn resolve_time(&self) -> Result<LocalTime, Error> {
        use crate::error::civil::Error as CE;

        let hour = match (self.hour, self.hour12) {
            (hour, Some(hour12)) => {
                if !(1..=12).contains(&hour12) {
                    return Err(Error::from(CE::InvalidHour12 {
                        hour: i64::from(hour12),
                    }));
                }
                let meridiem = self.meridiem.unwrap_or(Meridiem::AM);
                let hour24 = match meridiem {
                    Meridiem::AM => hour12 % 12,
                    Meridiem::PM => hour12 % 12 + 12,
                };
                if let Some(hour) = hour {
                    if hour % 24 != hour24 {
                        return Err(Error::from(E::MismatchHour {
                            hour24: hour,
                            hour12,
                            meridiem,
                        }));
                    }
                    hour
                } else {
                    hour24
                }
            }
            (Some(hour), None) => {
                if let Some(meridiem) = self.meridiem {
                    if Meridiem::from_hour(hour % 24) != meridiem {
                        return Err(Error::from(E::MismatchMeridiem {
                            hour,
                            meridiem,
                        }));
                    }
                }
                hour
            }
            (None, None) => 0,
        };
        LocalTime::new(
            hour,
            self.minute.unwrap_or(0),
            self.second.unwrap_or(0),
            self.subsec.unwrap_or(0),
        )
    }

    /// Builds a datetime from the parsed fields. Without any time fields,
    /// the time is midnight.
    pub fn to_datetime(&self) -> Result<LocalDateTime, Error> {
        let date = self.to_date()?;
        let time = if self.has_time() {
            self.resolve_time()?
        } else {
            LocalTime::MIDNIGHT
        };
        LocalDateTime::new(date, time)
    }

    /// Returns the parsed UTC offset.
    pub fn to_offset(&self) -> Result<Offset, Error> {
        self.offset.ok_or_else(|| Error::from(E::RequiredOffset))
    }

    /// Builds an offset datetime from the parsed fields. An offset is
    /// required.
    pub fn to_offset_datetime(&self) -> Result<OffsetDateTime, Error> {
        let dt = self.to_datetime()?;
        Ok(OffsetDateTime::new(dt, self.to_offset()?))
    }
}

static MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

fn month_name(month: i8) -> &'static str {
    MONTH_NAMES[usize::from(month.unsigned_abs() - 1)]
}

fn month_abbreviation(month: i8) -> &'static str {
    &month_name(month)[..3]
}
