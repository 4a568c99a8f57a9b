//! Consumer side of a streamed plan-generation operation: event decoding,
//! the bounded progress model, the transition table and display projections.

pub mod action;
pub mod api;
pub mod channel;
pub mod config;
pub mod error;
pub mod event;
pub mod plan;
pub mod reducer;
pub mod segment;
pub mod source;
pub mod state;
pub mod util;
pub mod view;
