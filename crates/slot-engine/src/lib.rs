//! # slot-engine
//!
//! Deterministic bookable-slot computation for calendar scheduling.
//!
//! Given busy intervals for one or more calendar identities, the engine
//! subtracts merged busy time from a working-hours window and enumerates
//! every increment-aligned slot of the requested duration. Results can be
//! grouped into per-day suggestions and a single best-day summary.
//!
//! The engine is pure and synchronous: it never reads files or the network.
//! Busy time comes in through the [`BusySource`] trait and every wall-clock
//! computation uses the timezone carried by [`SearchConfig`].
//!
//! ## Modules
//!
//! - [`interval`]: busy intervals and the interval merger
//! - [`engine`]: day-by-day slot enumeration
//! - [`rank`]: per-day grouping, ranking, and best-day selection
//! - [`source`]: the busy-interval source seam
//! - [`config`]: resolved search configuration and deployment defaults
//! - [`request`]: best-effort parsing of raw caller input
//! - [`dst`]: local wall-clock resolution across DST transitions
//! - [`error`]: Error types

pub mod config;
pub mod dst;
pub mod engine;
pub mod error;
pub mod interval;
pub mod rank;
pub mod request;
pub mod source;

pub use config::{EngineDefaults, SearchConfig, WorkHours};
pub use engine::{check_availability, compute_available_slots, find_slots, AvailableSlot};
pub use error::EngineError;
pub use interval::{merge, Interval};
pub use rank::{best_day, rank_days, BestDaySummary, DayAvailability};
pub use request::{parse_or_default, SearchRequest};
pub use source::{BusySource, InMemoryBusySource};
