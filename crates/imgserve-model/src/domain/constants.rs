//! Well-known param names shared by servers and their callers.

/// Param that identifies what to retrieve.
///
/// `SourceServer` forwards this key, and only this key, to the server it wraps.
/// Callers building requests for a source-narrowed chain must set it.
pub const SOURCE_PARAM: &str = "source";
