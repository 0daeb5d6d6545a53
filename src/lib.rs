//! Core library for audio-spot-assign
pub mod config;
pub mod models;
pub mod normalize;
pub mod grammar;
pub mod naming;
pub mod classify;
pub mod spots;
pub mod rename;
pub mod assign;
pub mod pipeline;
pub mod util;
