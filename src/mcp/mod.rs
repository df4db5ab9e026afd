// JSON-RPC exposure of the tool dispatcher, shared by the stdio and HTTP transports
pub mod handler;
pub mod protocol;
pub mod stdio;

pub use handler::handle_mcp_request;
