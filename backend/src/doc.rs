//! OpenAPI document for the account API.

use utoipa::OpenApi;

/// Aggregated OpenAPI description of the HTTP surface.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::check_availability,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    tags(
        (name = "accounts", description = "Registration, login, and availability checks"),
        (name = "health", description = "Orchestration probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn document_lists_the_account_endpoints() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/api/register"));
        assert!(paths.contains_key("/api/login"));
        assert!(paths.contains_key("/api/check-availability"));
        assert!(paths.contains_key("/health/ready"));
        assert!(paths.contains_key("/health/live"));
    }
}
