// Internal logging macros. They expand to calls into the `log` crate when the
// `logging` feature is enabled and to nothing otherwise, so call sites never
// need their own `cfg` attributes.
//
// Not every feature combination uses every macro.
#![allow(unused_macros)]

macro_rules! log {
    ($($tt:tt)*) => {
        #[cfg(feature = "logging")]
        {
            $($tt)*
        }
    }
}

/// Emitted for configuration that changes how input is interpreted.
macro_rules! debug {
    ($($tt:tt)*) => { log!(log::debug!($($tt)*)) }
}

/// Emitted for each rejected attempt when trying several layouts in turn.
macro_rules! trace {
    ($($tt:tt)*) => { log!(log::trace!($($tt)*)) }
}
