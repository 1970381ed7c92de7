use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use rust_embed::Embed;

#[derive(Embed)]
#[folder = "static/"]
struct StaticAssets;

/// Asset names are not content-hashed, so browsers must revalidate.
const CACHE_CONTROL: &str = "no-cache";

const INDEX: &str = "index.html";

fn asset(path: &str) -> Option<Response> {
    let content = <StaticAssets as Embed>::get(path)?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    Some(
        (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, mime.as_ref()),
                (header::CACHE_CONTROL, CACHE_CONTROL),
            ],
            content.data.to_vec(),
        )
            .into_response(),
    )
}

/// Serve the embedded UI. Paths that name no asset get `index.html`, and
/// `/` maps to it directly.
pub async fn static_handler(uri: axum::http::Uri) -> Response {
    let path = match uri.path().trim_start_matches('/') {
        "" => INDEX,
        path => path,
    };

    asset(path)
        .or_else(|| asset(INDEX))
        .unwrap_or_else(|| (StatusCode::NOT_FOUND, "ui not embedded").into_response())
}
