//! Request filter resolving the principal and enforcing the access policy

use axum::{
    extract::{OriginalUri, Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::{error::AppError, AppState};

/// Runs ahead of every handler: resolves the Basic principal, applies the
/// [`AccessPolicy`](super::policy::AccessPolicy) and stores the principal in
/// the request extensions for handlers.
pub async fn enforce_access(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let auth = &state.services.auth;
    let principal = auth.resolve(header).await?;

    // Nested routers see a stripped uri, rules are written against the full path
    let path = request
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.path().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());

    if let Err(denial) = state.policy.check(request.method(), &path, &principal) {
        tracing::info!(
            method = %request.method(),
            path = %path,
            principal = principal.display_name(),
            ?denial,
            "Request refused"
        );
        return Err(denial.into_error(auth.realm()));
    }

    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}
