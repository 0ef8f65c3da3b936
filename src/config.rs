use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::str::FromStr;

pub const DEFAULT_API_URL: &str = "https://en.wikipedia.org/w/api.php";
pub const DEFAULT_USER_AGENT: &str = "WikipediaFetcher/1.0 (https://github.com/yajneshx94/wikipedia-fetcher; yajneshrajan83@gmail.com)";

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config {
        api_url: get_env_or_default("WIKI_API_URL", DEFAULT_API_URL),
        user_agent: get_env_or_default("WIKI_USER_AGENT", DEFAULT_USER_AGENT),
        timeout_secs: get_parsed_or_default("WIKI_TIMEOUT_SECS", 10),
        result_limit: get_parsed_or_default("WIKI_RESULT_LIMIT", 5),
        bind_addr: get_env_or_default("BIND_ADDR", "127.0.0.1:8080"),
    }
});

pub struct Config {
    pub api_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub result_limit: u32,
    pub bind_addr: String,
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn get_parsed_or_default<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "ignoring invalid config value");
            default
        }),
        Err(_) => default,
    }
}
