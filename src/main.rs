//! Tier Board headless host
//!
//! Loads configuration and the catalog, opens the saved board and prints it.
//! Usage: `tier-board [config.json]`

use std::path::PathBuf;
use std::sync::Arc;

use tier_board::catalog::CatalogLoader;
use tier_board::{
    BoardConfig, BoardRepository, CatalogSource, KeyValueStore, Location, MemoryKeyValueStore,
    RemoteCatalog, SqliteKeyValueStore, StaticCatalog, TierBoard,
};

type HostResult<T> = Result<T, Box<dyn std::error::Error>>;

fn log_dir(config: &BoardConfig) -> PathBuf {
    config
        .log_dir
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("tier-board"))
}

fn open_store(config: &BoardConfig) -> HostResult<Arc<dyn KeyValueStore>> {
    Ok(match &config.db_path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            Arc::new(SqliteKeyValueStore::open(path)?)
        }
        None => Arc::new(MemoryKeyValueStore::new()),
    })
}

fn print_board(board: &TierBoard) {
    let names = |location: &Location| {
        board
            .get_by_location(location)
            .into_iter()
            .map(|placed| placed.item.name)
            .collect::<Vec<_>>()
            .join(", ")
    };

    for row in board.rows().entries() {
        println!("{}", row.name);
        for tier in board.tiers().entries() {
            let cell = Location::cell(row.id.as_str(), tier.id.as_str());
            println!("  {:<8} {}", tier.name, names(&cell));
        }
    }
    println!("Unassigned: {}", names(&Location::Unassigned));
}

#[tokio::main]
async fn main() -> HostResult<()> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = BoardConfig::load(config_path.as_deref())?;

    rolling_logger::init_logger(log_dir(&config), "TierBoard")?;
    log::info!("Host: starting");

    let store = open_store(&config)?;
    let source: Arc<dyn CatalogSource> = if config.catalog.is_remote() {
        Arc::new(RemoteCatalog::new(
            config.catalog.clone(),
            store.clone(),
            config.storage.clone(),
        )?)
    } else {
        Arc::new(StaticCatalog::default())
    };

    let mut loader = CatalogLoader::new(source);
    let Some(catalog) = loader.load().await else {
        let message = loader.state().error.clone().unwrap_or_default();
        let _ = rolling_logger::error(&format!("Catalog load failed: {}", message));
        return Err(format!("could not load catalog: {}", message).into());
    };

    let board = TierBoard::open(catalog, BoardRepository::new(store, config.storage.clone()));
    print_board(&board);
    let _ = rolling_logger::info("Host: board printed");
    Ok(())
}
