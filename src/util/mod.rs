pub(crate) mod itime;
pub(crate) mod parse;
