//! Run loop orchestration.
//!
//! `runner` invokes the test command once and captures what it produced;
//! `controller` drives the sequential loop and routes failures into the log.
//! The CLI layer owns console headers and the log file's lifetime.

mod controller;
mod runner;

pub(crate) use controller::run_loop;
