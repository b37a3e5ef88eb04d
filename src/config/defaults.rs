//! Default values for configuration

/// Default TMDB API base URL
pub fn default_tmdb_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

/// Default environment variable name for the TMDB API key
pub fn default_tmdb_api_key_env() -> String {
    "TMDB_API_KEY".to_string()
}

/// Default delay before each TMDB call in milliseconds
pub fn default_tmdb_call_delay_ms() -> u64 {
    1000
}

/// Default Wikipedia base URL
pub fn default_wikipedia_base_url() -> String {
    "https://en.wikipedia.org".to_string()
}

/// Default delay before each Wikipedia call in milliseconds
pub fn default_wikipedia_call_delay_ms() -> u64 {
    100
}

/// Default number of search results requested from Wikipedia
pub fn default_wikipedia_search_limit() -> u32 {
    5
}

/// Default user agent
pub fn default_user_agent() -> String {
    format!(
        "truestory/{} (Movie Subject Analysis)",
        env!("CARGO_PKG_VERSION")
    )
}

/// Default request timeout in seconds
pub fn default_request_timeout() -> u64 {
    30
}

/// Default number of movies a stage advances per run
pub fn default_batch_size() -> u32 {
    25
}
