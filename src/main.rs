use anyhow::Context;
use dotenv::dotenv;
use log::warn;
use mentora::app::App;
use mentora::config;
use mentora::logging;
use mentora::storage::{self, FileStore};
use mentora::ui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    config::initialize_config().context("failed to initialize configuration")?;
    let cfg = config::get_config();

    let store = FileStore::in_data_dir().context("failed to open the data directory")?;
    let _logger = logging::init(&cfg.log_level, store.dir())?;

    if cfg.api_key.is_empty() {
        warn!("no API key configured; chat requests will fail until one is set");
        eprintln!(
            "mentora: no API key configured — set GEMINI_API_KEY or edit the config file; \
             chat requests will fail until then"
        );
    }

    // Malformed persisted data fails loudly here; there is no recovery path.
    let saved_messages =
        storage::load_transcript(&store).context("failed to load the persisted transcript")?;

    let app = App::new(cfg.profile, Box::new(store), saved_messages);
    ui::run(app).await
}
