// Proxy module - HTTP server that relays chat completions to a model backend
//
// The handler reads each request once, routes on the body's `stream` flag,
// and forwards it with hop-specific headers removed. Streaming responses
// pass through chunk by chunk; buffered responses are checked for JSON and
// returned with the backend's own status.

mod error;
mod handlers;
mod helpers;
mod server;
mod state;


pub use server::start_proxy;
