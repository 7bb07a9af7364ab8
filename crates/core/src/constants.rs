/// Category assigned to every record that originates from the remote endpoint
pub const SERVER_CATEGORY: &str = "Server";

/// Default remote endpoint (a public mock REST API)
pub const DEFAULT_SERVER_URL: &str = "https://jsonplaceholder.typicode.com/posts";

/// Maximum number of remote records taken per fetch
pub const DEFAULT_FETCH_LIMIT: usize = 5;

/// Seconds between two scheduled sync cycles
pub const DEFAULT_SYNC_INTERVAL_SECS: u64 = 30;

/// Seed collection used when persistent storage holds no quotes yet.
pub const SEED_QUOTES: [(&str, &str); 3] = [
    (
        "The only limit to our realization of tomorrow is our doubts of today.",
        "Motivational",
    ),
    (
        "In the middle of every difficulty lies opportunity.",
        "Inspirational",
    ),
    ("Simplicity is the soul of efficiency.", "Philosophy"),
];
