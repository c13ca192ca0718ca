//! Builders wiring adapters and services into HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use backend::domain::ports::{SkillSuggestionSource, UnconfiguredSkillSuggestionSource};
use backend::domain::{DirectoryService, SkillSuggestionService, SwapService};
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::outbound::gemini::GeminiHttpSource;
use backend::outbound::memory::{InMemoryDirectory, load_seed};

use super::ServerConfig;

/// Select the suggestion source for the configured provider.
///
/// Without an API key every suggestion request fails with a generic
/// unavailable error, matching a provider outage.
fn build_suggestion_source(
    config: &ServerConfig,
) -> std::io::Result<Arc<dyn SkillSuggestionSource>> {
    match config.settings.gemini().map_err(std::io::Error::other)? {
        Some(gemini) => {
            info!(model = %gemini.model, "using Gemini skill suggestions");
            let source = GeminiHttpSource::new(gemini).map_err(std::io::Error::other)?;
            Ok(Arc::new(source))
        }
        None => {
            warn!("no Gemini API key configured; skill suggestions are unavailable");
            Ok(Arc::new(UnconfiguredSkillSuggestionSource))
        }
    }
}

fn build_directory(config: &ServerConfig) -> std::io::Result<Arc<InMemoryDirectory>> {
    let path = config.settings.seed_path();
    let seed = load_seed(&path).map_err(std::io::Error::other)?;
    info!(
        path = %path.display(),
        users = seed.users.len(),
        swaps = seed.swaps.len(),
        reviews = seed.reviews.len(),
        "directory seed loaded"
    );
    let store = InMemoryDirectory::from_seed(seed).map_err(std::io::Error::other)?;
    Ok(Arc::new(store))
}

/// Build the shared HTTP state from the configured seed and providers.
///
/// # Errors
/// Returns [`std::io::Error`] when the seed cannot be loaded or a configured
/// value is invalid.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let session = config.settings.session().map_err(std::io::Error::other)?;
    let store = build_directory(config)?;
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

    let directory = Arc::new(DirectoryService::new(store.clone(), clock.clone()));
    let swaps = Arc::new(SwapService::new(store, clock));
    let suggestions = Arc::new(SkillSuggestionService::new(build_suggestion_source(
        config,
    )?));

    info!(current_user = %session.user_id(), "acting user configured");
    Ok(web::Data::new(HttpState::new(
        HttpStatePorts {
            directory: directory.clone(),
            profile: directory.clone(),
            profile_command: directory,
            swaps: swaps.clone(),
            swap_commands: swaps,
            suggestions,
        },
        session,
    )))
}
