use alloc::sync::Arc;

pub(crate) mod civil;
pub(crate) mod duration;
pub(crate) mod fmt;
pub(crate) mod interval;

/// An error that can occur in this crate.
///
/// Errors come from a handful of places:
///
/// * Constructing a date or time from components that are out of range,
/// e.g., February 30 or minute 61.
/// * Arithmetic that would leave the supported range of dates, datetimes or
/// durations.
/// * Parsing a layout, or parsing input with a layout or with one of the
/// ISO 8601 grammars.
/// * Asking an [`Interval`](crate::Interval) for a quantity it cannot
/// derive.
///
/// # Introspection
///
/// Besides the [`core::fmt::Display`] and [`core::fmt::Debug`] impls (and
/// `std::error::Error` when the `std` feature is enabled), the error exposes
/// a set of `is_*` predicates. Each predicate inspects the *root* cause of
/// the error, so contextual wrapping (for example, "failed to parse `%m` at
/// position 5") never changes the answer.
///
/// ```
/// use tempora::civil::LocalDate;
///
/// assert!(LocalDate::new(2023, 2, 29).unwrap_err().is_invalid_date());
/// assert!(LocalDate::new(-4713, 11, 23).unwrap_err().is_out_of_bounds());
/// ```
///
/// # Design
///
/// A single error type is used for every operation in this crate. Finer
/// grained error types tend to compose poorly: parsing a datetime can fail
/// because of a bad layout, a bad literal, or an invalid date, and callers
/// rarely want to match on all of them separately.
#[derive(Clone)]
pub struct Error {
    /// The internal representation of an error.
    ///
    /// This is in an `Arc` to make an `Error` cheap to clone and exactly one
    /// word in size.
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Creates a new error value from `core::fmt::Arguments`.
    ///
    /// It is expected to use [`format_args!`](format_args) from
    /// Rust's standard library (available in `core`) to create a
    /// `core::fmt::Arguments`.
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::Error;
    ///
    /// let err = Error::from_args(format_args!("something failed"));
    /// assert_eq!(err.to_string(), "something failed");
    /// ```
    pub fn from_args<'a>(message: core::fmt::Arguments<'a>) -> Error {
        Error::from(ErrorKind::Adhoc(AdhocError::from_args(message)))
    }

    /// Returns true when this error originated from a value that is not in
    /// its required range.
    ///
    /// This is the union of [`Error::is_invalid_date`],
    /// [`Error::is_invalid_time`] and [`Error::is_out_of_bounds`], plus
    /// range errors on other parameters such as UTC offsets.
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::civil::LocalDate;
    ///
    /// assert!(LocalDate::new(2025, 2, 29).unwrap_err().is_range());
    /// assert!("2025-02-29".parse::<LocalDate>().unwrap_err().is_range());
    /// ```
    pub fn is_range(&self) -> bool {
        matches!(*self.root().kind(), ErrorKind::Range(_))
            || self.is_invalid_date()
            || self.is_invalid_time()
            || self.is_out_of_bounds()
    }

    /// Returns true when a date was constructed from components that do not
    /// name a real day, such as month `13`, April 31, February 29 in a common
    /// year, ordinal day `366` in a common year or ISO week `53` in a year
    /// with only 52 weeks.
    pub fn is_invalid_date(&self) -> bool {
        use self::civil::Error::*;

        matches!(
            *self.root().kind(),
            ErrorKind::Civil(
                InvalidMonth { .. }
                    | InvalidDay { .. }
                    | InvalidDayOfYear { .. }
                    | InvalidISOWeek { .. }
                    | InvalidWeekday { .. }
            )
        )
    }

    /// Returns true when a time of day was constructed from components out
    /// of range, for example, hour `100` or second `60`.
    pub fn is_invalid_time(&self) -> bool {
        use self::civil::Error::*;

        matches!(
            *self.root().kind(),
            ErrorKind::Civil(
                InvalidHour { .. }
                    | InvalidHour12 { .. }
                    | InvalidMinute { .. }
                    | InvalidSecond { .. }
                    | InvalidNanosecond { .. }
                    | InvalidNanosecondOfDay { .. }
            )
        )
    }

    /// Returns true when a value is individually valid but falls outside
    /// the representable range of dates or datetimes.
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::civil::LocalDate;
    ///
    /// let err = LocalDate::MAX.checked_add_days(1).unwrap_err();
    /// assert!(err.is_out_of_bounds());
    /// ```
    pub fn is_out_of_bounds(&self) -> bool {
        use self::civil::Error::*;

        matches!(
            *self.root().kind(),
            ErrorKind::Civil(
                DateOutOfBounds { .. }
                    | YearOutOfBounds { .. }
                    | DayIndexOutOfBounds { .. }
                    | DatetimeOutOfRange { .. }
            )
        )
    }

    /// Returns true when duration arithmetic, or the accumulation of a
    /// duration while parsing, exceeded the range of the duration type.
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::Extent;
    ///
    /// let err = "PT9999999999999999999H".parse::<Extent>().unwrap_err();
    /// assert!(err.is_duration_overflow());
    /// ```
    pub fn is_duration_overflow(&self) -> bool {
        matches!(*self.root().kind(), ErrorKind::Duration(_))
            || matches!(
                *self.root().kind(),
                ErrorKind::FmtIso8601(self::fmt::iso8601::Error::Overflow {
                    ..
                })
            )
    }

    /// Returns true when this error is a syntax error from parsing a layout,
    /// parsing input with a layout or parsing one of the ISO 8601 grammars.
    ///
    /// Both of [`Error::is_unconsumed_input`] and
    /// [`Error::is_literal_mismatch`] imply this predicate.
    pub fn is_syntax(&self) -> bool {
        match *self.root().kind() {
            ErrorKind::FmtLayout(ref err) => err.is_syntax(),
            ErrorKind::FmtIso8601(ref err) => err.is_syntax(),
            ErrorKind::Fmt(ref err) => err.is_syntax(),
            _ => false,
        }
    }

    /// Returns true when parsing with a layout succeeded for the entire
    /// layout, but input remained afterwards.
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::civil::LocalDate;
    ///
    /// let err = LocalDate::strptime("%Y-%m-%d", "2024-07-15 extra")
    ///     .unwrap_err();
    /// assert!(err.is_unconsumed_input());
    /// assert!(!err.is_literal_mismatch());
    /// ```
    pub fn is_unconsumed_input(&self) -> bool {
        matches!(
            *self.root().kind(),
            ErrorKind::FmtLayout(self::fmt::layout::Error::UnconsumedInput {
                ..
            })
        )
    }

    /// Returns true when literal text in a layout did not match the input
    /// being parsed.
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::civil::LocalDate;
    ///
    /// let err = LocalDate::strptime("%Y-%m-%d", "2024/07/15").unwrap_err();
    /// assert!(err.is_literal_mismatch());
    /// assert!(!err.is_unconsumed_input());
    /// ```
    pub fn is_literal_mismatch(&self) -> bool {
        use self::fmt::layout::Error::*;

        matches!(
            *self.root().kind(),
            ErrorKind::FmtLayout(
                LiteralMismatch { .. } | LiteralEndOfInput { .. }
            )
        )
    }

    /// Returns true when redundant fields parsed from the same input do not
    /// agree with one another. For example, a day of year that names a
    /// different date than the month and day, or a weekday that the date does
    /// not fall on.
    pub fn is_mismatch(&self) -> bool {
        use self::fmt::layout::Error::*;

        matches!(
            *self.root().kind(),
            ErrorKind::FmtLayout(
                MismatchDayOfYear { .. }
                    | MismatchISOWeekDate { .. }
                    | MismatchWeekday { .. }
                    | MismatchMeridiem { .. }
                    | MismatchHour { .. }
                    | MismatchEra { .. }
                    | MismatchISOWeekYear { .. }
            )
        )
    }

    /// Returns true when an [`Interval`](crate::Interval) was asked for a
    /// start, end or duration that cannot be derived from what it stores.
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::Interval;
    ///
    /// let interval: Interval = "P1Y2M".parse()?;
    /// assert!(interval.start().unwrap_err().is_unsupported_representation());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn is_unsupported_representation(&self) -> bool {
        matches!(*self.root().kind(), ErrorKind::Interval(_))
    }
}

impl Error {
    /// Creates a new error indicating that a `given` value is out of the
    /// specified `min..=max` range. The given `what` label is used in the
    /// error message as a human readable description of what exactly is out
    /// of range. (e.g., "offset minutes")
    #[inline(never)]
    #[cold]
    pub(crate) fn range(
        what: &'static str,
        given: impl Into<i128>,
        min: impl Into<i128>,
        max: impl Into<i128>,
    ) -> Error {
        Error::from(ErrorKind::Range(RangeError::new(what, given, min, max)))
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let mut err = consequent;
        if err.inner.is_none() {
            err = Error::from(ErrorKind::Unknown);
        }
        let Some(inner) = err.inner.as_mut() else { return self };
        // Only freshly created errors are used as consequents, so the `Arc`
        // is unshared here.
        if let Some(inner) = Arc::get_mut(inner) {
            debug_assert!(
                inner.cause.is_none(),
                "cause of consequence must be `None`"
            );
            inner.cause = Some(self);
        }
        err
    }

    /// Returns the root error in this chain.
    fn root(&self) -> &Error {
        let mut err = self;
        while let Some(cause) =
            err.inner.as_ref().and_then(|inner| inner.cause.as_ref())
        {
            err = cause;
        }
        err
    }

    /// Returns a chain of error values.
    ///
    /// This starts with the most recent error added to the chain. That is,
    /// the highest level context. The last error in the chain is always the
    /// "root" cause.
    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    /// Returns the kind of this error.
    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f
                    .debug_struct("Error")
                    .field("kind", &"None")
                    .finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

/// The underlying kind of a [`Error`].
#[derive(Debug)]
enum ErrorKind {
    Adhoc(AdhocError),
    Civil(self::civil::Error),
    Duration(self::duration::Error),
    Fmt(self::fmt::Error),
    FmtIso8601(self::fmt::iso8601::Error),
    FmtLayout(self::fmt::layout::Error),
    Interval(self::interval::Error),
    Range(RangeError),
    Unknown,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match *self {
            Adhoc(ref msg) => msg.fmt(f),
            Civil(ref err) => err.fmt(f),
            Duration(ref err) => err.fmt(f),
            Fmt(ref err) => err.fmt(f),
            FmtIso8601(ref err) => err.fmt(f),
            FmtLayout(ref err) => err.fmt(f),
            Interval(ref err) => err.fmt(f),
            Range(ref err) => err.fmt(f),
            Unknown => f.write_str("unknown tempora error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error { inner: Some(Arc::new(ErrorInner { kind, cause: None })) }
    }
}

/// A generic error message.
///
/// This supports the `Error::from_args` public API, which permits callers
/// to manufacture their own `Error` values from an arbitrary message.
struct AdhocError {
    message: alloc::boxed::Box<str>,
}

impl AdhocError {
    fn from_args<'a>(message: core::fmt::Arguments<'a>) -> AdhocError {
        use alloc::string::ToString;

        let message = message.to_string().into_boxed_str();
        AdhocError { message }
    }
}

impl core::fmt::Display for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.message, f)
    }
}

impl core::fmt::Debug for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Debug::fmt(&self.message, f)
    }
}

/// An error that occurs when an input value is out of bounds.
///
/// The error message produced by this type will include a name describing
/// which input was out of bounds, the value given and its minimum and maximum
/// allowed values.
#[derive(Debug)]
struct RangeError {
    what: &'static str,
    given: i128,
    min: i128,
    max: i128,
}

impl RangeError {
    fn new(
        what: &'static str,
        given: impl Into<i128>,
        min: impl Into<i128>,
        max: impl Into<i128>,
    ) -> RangeError {
        RangeError { what, given: given.into(), min: min.into(), max: max.into() }
    }
}

impl core::fmt::Display for RangeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let RangeError { what, given, min, max } = *self;
        write!(
            f,
            "parameter '{what}' with value {given} \
             is not in the required range of {min}..={max}",
        )
    }
}

/// A simple trait to encapsulate automatic conversion to `Error`.
///
/// This keeps the `From` impls for the internal error enums out of the
/// public API while still letting `Error::context` accept any of them.
pub(crate) trait IntoError {
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}

/// A trait for contextualizing error values.
///
/// This makes it easy to contextualize either `Error` or `Result<T, Error>`.
/// Specifically, in the latter case, it absolves one of the need to call
/// `map_err` everywhere one wants to add context to an error.
pub(crate) trait ErrorContext<T, E> {
    /// Contextualize the given consequent error with this (`self`) error as
    /// the cause.
    ///
    /// This is equivalent to saying that "consequent is caused by self."
    fn context(self, consequent: impl IntoError) -> Result<T, Error>;

    /// Like `context`, but hides error construction within a closure.
    ///
    /// Use this when the consequent allocates (say, it holds a copy of the
    /// remaining input) so that the happy path never pays for it.
    fn with_context<C: IntoError>(
        self,
        consequent: impl FnOnce() -> C,
    ) -> Result<T, Error>;
}

impl<T, E> ErrorContext<T, E> for Result<T, E>
where
    E: IntoError,
{
    #[cfg_attr(feature = "perf-inline", inline(always))]
    fn context(self, consequent: impl IntoError) -> Result<T, Error> {
        self.map_err(|err| {
            err.into_error().context_impl(consequent.into_error())
        })
    }

    #[cfg_attr(feature = "perf-inline", inline(always))]
    fn with_context<C: IntoError>(
        self,
        consequent: impl FnOnce() -> C,
    ) -> Result<T, Error> {
        self.map_err(|err| {
            err.into_error().context_impl(consequent().into_error())
        })
    }
}
