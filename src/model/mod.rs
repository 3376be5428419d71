//! Entity model.
//!
//! Pure data: [`Customer`] records, the closed [`Tier`] set with its
//! priority weights, the [`Status`] lifecycle, and the [`Clock`] that
//! stamps arrivals and service times.
//!
//! The canonical order used everywhere in the crate is
//! `(tier weight ascending, arrival ascending)`; see [`Customer::key`].

mod clock;
mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use types::{minutes, Customer, CustomerId, CustomerRequest, Status, Tier, Timestamp};
pub(crate) use types::minutes_between;
