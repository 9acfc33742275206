//! RAG chatbot backend for the Midonación platform.
//!
//! Indexes a catalog of charitable causes into a persistent vector store,
//! retrieves the most relevant causes for a user query, asks a generative
//! model for a recommendation, and parses intent control tokens out of the
//! response into a structured action for the front end.

pub mod catalog;
pub mod core;
pub mod index;
pub mod pipeline;
pub mod providers;
pub mod server;
pub mod state;
