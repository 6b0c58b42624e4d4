use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use atomspace_rest::atomspace::{AtomSpace, MemoryAtomSpace};
use atomspace_rest::server::{load_seed, router};
use atomspace_rest::settings::Settings;

#[tokio::main]
async fn main() -> atomspace_rest::Result<()> {
    let settings = Settings::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let space = Arc::new(MemoryAtomSpace::new());
    if let Some(seed) = &settings.seed {
        load_seed(space.as_ref(), seed)?;
    }
    info!(atoms = space.len()?, "atom space ready");

    let listener = tokio::net::TcpListener::bind(&settings.listen).await?;
    info!(listen = %settings.listen, "serving atoms");
    axum::serve(listener, router(space)).await?;
    Ok(())
}
