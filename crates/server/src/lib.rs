//! MCP (Model Context Protocol) server for deck generation.
//!
//! Exposes one tool, `generate_presentation`, and one prompt,
//! `presentation_prompt`, over JSON-RPC 2.0 with Content-Length framed
//! stdio transport.

pub mod protocol;
pub mod server;
pub mod tools;

pub use server::McpServer;
pub use tools::{generate_presentation, run_generate, ToolError};
