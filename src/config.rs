use envconfig::Envconfig;

#[derive(Envconfig, Debug, Clone)]
pub struct Config {
    #[envconfig(from = "DATABASE_URL", default = "postgresql://localhost/blog_server")]
    pub database_url: String,

    #[envconfig(from = "BLOG_SERVER_PORT", default = "3000")]
    pub server_port: u16,

    /// Posts per feed page.
    #[envconfig(from = "BLOG_PAGE_SIZE", default = "10")]
    pub page_size: usize,

    /// TTL of the whole-response feed cache. Zero disables caching.
    #[envconfig(from = "BLOG_FEED_CACHE_SECONDS", default = "20")]
    pub feed_cache_seconds: u64,

    #[envconfig(from = "RUST_LOG", default = "info")]
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, envconfig::Error> {
        Self::init_from_env()
    }
}
