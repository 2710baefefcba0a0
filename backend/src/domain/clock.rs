//! Timestamp precision shared by every store.

use chrono::{DateTime, SubsecRound, Utc};

/// Sub-second digits PostgreSQL keeps in a `timestamptz`.
const STORED_SUBSEC_DIGITS: u16 = 6;

/// Drop sub-microsecond precision so in-memory and PostgreSQL stores hand
/// back identical instants.
pub(crate) fn to_stored_precision(at: DateTime<Utc>) -> DateTime<Utc> {
    at.trunc_subsecs(STORED_SUBSEC_DIGITS)
}
