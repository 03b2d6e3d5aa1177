//! Terminal front end: one human seat against three bots.

pub mod app;
pub mod controller;
pub mod ui;
