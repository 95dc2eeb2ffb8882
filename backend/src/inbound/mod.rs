//! Inbound adapters: interfaces that drive the domain.

pub mod http;
