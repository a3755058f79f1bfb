use copydesk_engine::CollectionNames;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development against a store
/// instance on its default port.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// Base URL of the hosted record store.
    pub store_url: String,
    /// Collection holding the category records.
    pub categories_collection: String,
    /// Collection whose records reference categories.
    pub articles_collection: String,
}

impl ApiConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                  |
    /// |------------------------|--------------------------|
    /// | `HOST`                 | `0.0.0.0`                |
    /// | `PORT`                 | `3000`                   |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`  |
    /// | `STORE_URL`            | `http://localhost:8090`  |
    /// | `CATEGORIES_COLLECTION`| `categories`             |
    /// | `ARTICLES_COLLECTION`  | `articles`               |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let store_url =
            std::env::var("STORE_URL").unwrap_or_else(|_| "http://localhost:8090".into());

        let categories_collection =
            std::env::var("CATEGORIES_COLLECTION").unwrap_or_else(|_| "categories".into());
        let articles_collection =
            std::env::var("ARTICLES_COLLECTION").unwrap_or_else(|_| "articles".into());

        Self {
            host,
            port,
            cors_origins,
            store_url,
            categories_collection,
            articles_collection,
        }
    }

    /// The engine-facing collection names.
    pub fn collection_names(&self) -> CollectionNames {
        CollectionNames {
            categories: self.categories_collection.clone(),
            articles: self.articles_collection.clone(),
        }
    }
}
