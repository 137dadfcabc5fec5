//! Inbound ports (driving side): callbacks external triggers invoke.

pub mod schedule;
