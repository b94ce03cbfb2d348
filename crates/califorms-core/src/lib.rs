//! Core data model for the califorms access-overhead benchmark.
//!
//! "Califorms" is a byte-granular memory protection scheme: every 32-bit
//! word carries a metadata tag that can force individual byte lanes (or
//! arbitrary bit positions) to present a fixed pattern on read, regardless
//! of what ordinary stores put in the word. On real hardware the tag is
//! written by a dedicated instruction; here the primitive is an injected
//! capability ([`LaneProtector`]) with a software emulation
//! ([`SoftLaneProtector`]) so the benchmark harness runs on any target.
//!
//! This crate holds only the protection semantics and the reusable array
//! fixture the harness measures against. Clocks, probes, and reporting
//! live in `califorms-harness`.

pub mod fixture;
pub mod lane;
pub mod protect;

pub use fixture::ArrayFixture;
pub use protect::{LaneProtector, ProtectionTag, SoftLaneProtector};
