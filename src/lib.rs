// Dating Wingman - MCP tool server for dating assistance
// Library exports

pub mod config;
pub mod errors;
pub mod media; // Screenshot normalization
pub mod providers; // Completion backend
pub mod server; // HTTP / JSON-RPC surface
pub mod tools; // Catalog, validation and dispatch
