//! Shared cache-control policies for HTTP handlers.

/// Store-backed responses change on every mutation and must be revalidated.
pub const PRIVATE_NO_CACHE_MUST_REVALIDATE: &str = "private, no-cache, must-revalidate";

/// Score responses may be shared briefly and served stale while refreshing.
pub const PUBLIC_SHORT_LIVED: &str = "public, s-maxage=60, stale-while-revalidate=300";

/// Build the standard cache-control header tuple for private API responses.
pub const fn private_no_cache_header() -> (&'static str, &'static str) {
    ("Cache-Control", PRIVATE_NO_CACHE_MUST_REVALIDATE)
}

/// Build the cache-control header tuple for the public score feed.
pub const fn public_short_lived_header() -> (&'static str, &'static str) {
    ("Cache-Control", PUBLIC_SHORT_LIVED)
}
