//! End-to-end tests: tool workflows and the JSON-RPC front end

mod mcp_tests;
mod workflow_tests;
