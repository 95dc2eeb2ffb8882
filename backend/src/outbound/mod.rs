//! Outbound adapters: infrastructure the domain drives.

pub mod persistence;
