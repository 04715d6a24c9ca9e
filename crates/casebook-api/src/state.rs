//! Application state wiring storage and stores together.
//!
//! AppState holds the concrete instances used by the CLI handlers. The
//! memory stores are generic over the key-value trait, but AppState pins
//! them to the SQLite implementation.

use std::path::PathBuf;

use casebook_core::chat::store::ConversationMemoryStore;
use casebook_core::citation::catalog::CitationCatalog;
use casebook_core::memory::store::ResponseMemoryStore;
use casebook_infra::config::load_config;
use casebook_infra::paths::resolve_data_dir;
use casebook_infra::sqlite::kv::SqliteKvStore;
use casebook_infra::sqlite::pool::DatabasePool;
use casebook_types::config::AppConfig;

/// Application state holding storage, memory stores, and configuration.
pub struct AppState {
    pub kv: SqliteKvStore,
    pub responses: ResponseMemoryStore<SqliteKvStore>,
    pub conversations: ConversationMemoryStore<SqliteKvStore>,
    pub catalog: CitationCatalog,
    pub config: AppConfig,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: connect to the database, hydrate
    /// the response memory, and load configuration.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let db_url = format!(
            "sqlite://{}?mode=rwc",
            data_dir.join("casebook.db").display()
        );
        let pool = DatabasePool::new(&db_url).await?;

        let kv = SqliteKvStore::new(pool);
        let responses = ResponseMemoryStore::load(kv.clone()).await;
        let conversations = ConversationMemoryStore::new(kv.clone());
        let config = load_config(&data_dir).await;

        Ok(Self {
            kv,
            responses,
            conversations,
            catalog: CitationCatalog::builtin(),
            config,
            data_dir,
        })
    }
}
