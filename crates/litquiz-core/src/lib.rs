//! litquiz-core: literal parsing, answer validation and the quiz session.
//!
//! This crate holds everything the quiz needs that is independent of a
//! terminal: the question bank, the Python literal parser used to check
//! answers, the session state machine, the score store, and the render loop
//! written against the `Screen`/`InputSource`/`Clock` seams.

pub mod bank;
pub mod config;
pub mod error;
pub mod literal;
pub mod mock;
pub mod model;
pub mod runtime;
pub mod scores;
pub mod session;
pub mod statistics;
pub mod traits;
pub mod validator;
pub mod view;
