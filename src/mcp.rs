use anyhow::Result;
use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    schemars, tool, tool_handler, tool_router,
};
use serde::{Deserialize, Serialize};

use crate::pdf::document::save;
use crate::pdf::{merge_documents, split_document, PdfInput};

// Request structs for tools

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PathRequest {
    #[schemars(description = "Path to the PDF file")]
    pub path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfSplitRequest {
    #[schemars(description = "Path to the source PDF file")]
    pub path: String,
    #[schemars(description = "Page ranges (e.g., '1-5,10,12-14'). Output pages are in ascending order.")]
    pub pages: String,
    #[schemars(description = "Output file path")]
    pub output: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfMergeRequest {
    #[schemars(description = "Paths of the PDF files to merge, in order (at least two)")]
    pub paths: Vec<String>,
    #[schemars(description = "Output file path")]
    pub output: String,
}

#[derive(Debug, Clone)]
pub struct PdfServer {
    tool_router: ToolRouter<Self>,
}

impl PdfServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }
}

impl Default for PdfServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl PdfServer {
    #[tool(description = "Get the number of pages in a PDF")]
    fn pdf_page_count(&self, Parameters(PathRequest { path }): Parameters<PathRequest>) -> String {
        match PdfInput::from_path(&path).load() {
            Ok(doc) => {
                let result = PageCountResult {
                    page_count: doc.page_count(),
                    path,
                };
                to_json(&result)
            }
            Err(e) => format!("Error: {}", e),
        }
    }

    #[tool(description = "Extract specific pages from a PDF and save them to a new file")]
    fn pdf_split(&self, Parameters(req): Parameters<PdfSplitRequest>) -> String {
        let output = match split_document(&PdfInput::from_path(&req.path), &req.pages) {
            Ok(o) => o,
            Err(e) => return format!("Error: {}", e),
        };

        if let Err(e) = save(&output.bytes, &req.output) {
            return format!("Error: {}", e);
        }

        let result = SplitResult {
            output_path: req.output,
            page_count: output.page_count(),
            pages: output.pages.iter().map(|p| p + 1).collect(),
        };
        to_json(&result)
    }

    #[tool(description = "Merge two or more PDFs into one file, keeping every page in input order")]
    fn pdf_merge(&self, Parameters(req): Parameters<PdfMergeRequest>) -> String {
        let inputs: Vec<PdfInput> = req.paths.iter().map(PdfInput::from_path).collect();

        let output = match merge_documents(&inputs) {
            Ok(o) => o,
            Err(e) => return format!("Error: {}", e),
        };

        if let Err(e) = save(&output.bytes, &req.output) {
            return format!("Error: {}", e);
        }

        let result = MergeResult {
            output_path: req.output,
            documents: output.documents,
            page_count: output.page_count,
        };
        to_json(&result)
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("Error: {}", e))
}

// Result types for MCP tools

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PageCountResult {
    pub path: String,
    pub page_count: u32,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SplitResult {
    pub output_path: String,
    pub page_count: usize,
    /// 1-based source page numbers that were kept
    pub pages: Vec<u32>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct MergeResult {
    pub output_path: String,
    pub documents: usize,
    pub page_count: usize,
}

#[tool_handler]
impl ServerHandler for PdfServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "PDF split and merge tools. Use pdf_page_count to inspect a document, \
                 pdf_split to write selected pages to a new PDF, and pdf_merge to \
                 concatenate several PDFs."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

pub async fn run_server() -> Result<()> {
    let server = PdfServer::new();

    // Serve using stdin/stdout as a tuple
    let service = server.serve((tokio::io::stdin(), tokio::io::stdout())).await?;

    service.waiting().await?;

    Ok(())
}
