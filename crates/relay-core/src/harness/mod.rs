//! Harness adapter interface for LLM coding agents.
//!
//! This module defines the [`Harness`] trait that all agent adapters
//! implement, the data passed across it ([`AgentTask`], [`AgentResult`]),
//! and the [`HarnessRegistry`] for runtime lookup.
//!
//! # Architecture
//!
//! ```text
//! Entry point
//!     |
//!     v
//! HarnessRegistry --take("claude-code")--> Box<dyn Harness>
//!                                              |
//!                        is_available() -------+  (advisory)
//!                        deploy(task) ---------+--> AgentResult { id, success }
//! ```

pub mod claude_code;
pub mod registry;
pub mod trait_def;
pub mod types;

// Re-export the primary public API at the module level.
pub use claude_code::ClaudeCodeAdapter;
pub use registry::{HarnessRegistry, LoadError};
pub use trait_def::Harness;
pub use types::{AgentResult, AgentTask};
