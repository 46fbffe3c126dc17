//! Header filtering predicates for request forwarding

/// Headers dropped when forwarding a buffered (non-streaming) request.
///
/// Hop metadata only: the outbound client computes its own Host and
/// Content-Length for the new connection.
pub(crate) const BUFFERED_DENIED_HEADERS: &[&str] = &["host", "content-length"];

/// Headers dropped when forwarding a streaming request.
///
/// Adds accept-encoding on top of the buffered list so the backend never
/// negotiates a compressed stream with us while we relay bytes verbatim
/// to a client that offered a different encoding set.
pub(crate) const STREAMING_DENIED_HEADERS: &[&str] =
    &["host", "content-length", "accept-encoding"];

/// Check if a header name is on the given deny-list (case-insensitive)
pub(crate) fn is_denied_header(name: &str, denied: &[&str]) -> bool {
    let lower = name.to_lowercase();
    denied.iter().any(|d| *d == lower)
}
