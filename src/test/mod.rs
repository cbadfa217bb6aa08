//! `geo` fixtures shared by the unit tests.

pub(crate) mod multilinestring;
pub(crate) mod multipoint;
