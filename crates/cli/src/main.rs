use std::io;

use storefront_cli::{Config, Session, catalog};

fn main() -> anyhow::Result<()> {
    let config = Config::parse_args();
    storefront_observability::init(config.log_format);

    let store = catalog::load_store(config.catalog.as_deref())?;
    tracing::info!(products = store.len(), "store ready");

    let mut session = Session::new(store, io::stdin().lock(), io::stdout().lock());
    session.run()
}
