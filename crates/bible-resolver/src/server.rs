use std::sync::Arc;

use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use tracing::info;

use crate::health::HealthMonitor;
use crate::model::{BibleChapter, HealthReport};
use crate::resolver::Resolver;
use scripture_common::mcp_api::{
    BookListResponse, CodeChapterParams, ReferenceParams, ResolveReferenceResponse,
};

#[derive(Clone)]
pub struct BibleResolverServer {
    resolver: Resolver,
    monitor: Arc<HealthMonitor>,
    tool_router: ToolRouter<BibleResolverServer>,
}

impl BibleResolverServer {
    pub fn new(resolver: Resolver, monitor: Arc<HealthMonitor>) -> Self {
        Self {
            resolver,
            monitor,
            tool_router: Self::tool_router(),
        }
    }
}

fn non_empty(reference: &str) -> Result<String, String> {
    let reference = reference.trim();
    if reference.is_empty() {
        return Err("reference must not be empty".to_string());
    }
    Ok(reference.to_string())
}

#[tool_router]
impl BibleResolverServer {
    #[tool(description = "Parse a free-text scripture reference (e.g. 'Mt 5', '1 timothée 5', 'timothée 1 ch 5') into a book and chapter without fetching it. Returns candidates when the book is ambiguous.")]
    async fn resolve_reference(
        &self,
        Parameters(params): Parameters<ReferenceParams>,
    ) -> Result<Json<ResolveReferenceResponse>, String> {
        let reference = non_empty(&params.reference)?;
        let outcome = self.resolver.parse(&reference).to_response();
        Ok(Json(ResolveReferenceResponse {
            input: reference,
            outcome,
        }))
    }

    #[tool(description = "Resolve a free-text scripture reference and fetch the chapter's verses, in page order, from the upstream site.")]
    async fn fetch_chapter(
        &self,
        Parameters(params): Parameters<ReferenceParams>,
    ) -> Result<Json<BibleChapter>, String> {
        let reference = non_empty(&params.reference)?;
        self.resolver
            .fetch_chapter(&reference)
            .await
            .map(Json)
            .map_err(|e| format!("fetch_chapter failed ({}): {e}", e.kind().as_str()))
    }

    #[tool(description = "Fetch a chapter by canonical book code and chapter number, as returned by list_books. The chapter is range-checked before any request is made.")]
    async fn fetch_by_code(
        &self,
        Parameters(params): Parameters<CodeChapterParams>,
    ) -> Result<Json<BibleChapter>, String> {
        self.resolver
            .fetch_by_code(&params.code, params.chapter)
            .await
            .map(Json)
            .map_err(|e| format!("fetch_by_code failed ({}): {e}", e.kind().as_str()))
    }

    #[tool(description = "List every known book with its code, display name and valid chapter range.")]
    async fn list_books(&self) -> Result<Json<BookListResponse>, String> {
        let books = self
            .resolver
            .registry()
            .all_books()
            .iter()
            .map(|b| b.summary())
            .collect();
        Ok(Json(BookListResponse { books }))
    }

    #[tool(description = "Fetch a fixed sample of chapters across markup categories and report whether extraction still works.")]
    async fn run_health_check(&self) -> Result<Json<HealthReport>, String> {
        info!("run_health_check tool invoked");
        Ok(Json(self.monitor.check().await))
    }
}

#[tool_handler]
impl ServerHandler for BibleResolverServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "bible-resolver".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Scripture reference resolver. Use resolve_reference to turn free text into a \
                 book and chapter (with disambiguation candidates when needed), fetch_chapter to \
                 get the verses of a chapter, fetch_by_code when the book code is already known, list_books for the catalogue of books and chapter \
                 ranges, and run_health_check to verify the upstream site still parses."
                    .to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BibleResolverServer;

    #[test]
    fn tools_publish_output_schemas() {
        let tools = BibleResolverServer::tool_router().list_all();
        for name in [
            "resolve_reference",
            "fetch_chapter",
            "fetch_by_code",
            "list_books",
            "run_health_check",
        ] {
            let tool = tools
                .iter()
                .find(|t| t.name == name)
                .unwrap_or_else(|| panic!("missing tool: {name}"));
            assert!(
                tool.output_schema.is_some(),
                "tool {name} should publish output_schema"
            );
        }
    }
}
