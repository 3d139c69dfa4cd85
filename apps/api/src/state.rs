use std::sync::Arc;

use crate::config::Config;
use crate::screening::Screener;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pipeline with its pluggable scorer. Default: HeuristicScorer.
    pub screener: Arc<Screener>,
}

#[cfg(test)]
impl AppState {
    pub(crate) fn for_tests() -> Self {
        use crate::nlp::resources::ensure_resources_loaded;
        use crate::scoring::HeuristicScorer;

        let config = Config::default();
        let resources = ensure_resources_loaded().expect("embedded resources load");
        let scorer = Arc::new(HeuristicScorer::new(resources, config.weights));
        Self {
            screener: Arc::new(Screener::new(resources, scorer)),
            config,
        }
    }
}
