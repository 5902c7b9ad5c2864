//! Static asset serving for the frontend and input data.
//!
//! The public directory answers every path no route claims, with
//! `index.html` served for directory requests. The input directory is
//! mounted under `/input`. Missing files get `tower-http`'s plain 404.

use axum::Router;
use tower_http::services::ServeDir;

use crate::config::AssetConfig;

/// URL prefix for the input data directory.
pub const INPUT_PREFIX: &str = "/input";

/// Mounts the asset directories from `assets` onto `router`.
pub fn mount<S>(router: Router<S>, assets: &AssetConfig) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .nest_service(INPUT_PREFIX, ServeDir::new(&assets.input_dir))
        .fallback_service(ServeDir::new(&assets.public_dir))
}
