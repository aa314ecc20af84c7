//! Web chat relay: axum gateway in front of a Groq completion call with a
//! JSON transcript on disk.
//!
//! The request path is sequential per call: load the transcript, append the
//! user turn, call the completion API with the fixed preamble and a
//! real-time-info line, persist user + assistant turns, return the cleaned
//! answer. Concurrent posts against the same store file can race across the
//! load-modify-save cycle (only the final write is atomic); accepted for the
//! single-user deployments this targets.

pub mod answer;
pub mod chatbot;
pub mod config;
pub mod prompt;
pub mod server;
