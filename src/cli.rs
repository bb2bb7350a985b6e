use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdf-toolkit")]
#[command(about = "Split and merge PDF documents over HTTP, MCP, or the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP service
    Serve(ServeArgs),

    /// Run as MCP server on stdin/stdout
    Mcp,

    /// Extract page ranges to a new PDF
    #[command(alias = "extract")]
    Split {
        /// PDF file to split
        path: PathBuf,

        /// Page ranges (e.g., "1-5,10,12-14")
        pages: String,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Combine multiple PDFs into one
    Merge {
        /// PDF files to merge, in order (at least two)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Largest accepted request body, in MiB
    #[arg(long, env = "PDF_TOOLKIT_MAX_UPLOAD_MB", default_value_t = 100)]
    pub max_upload_mb: usize,

    /// CORS origin to allow (repeatable); any origin when none is given
    #[arg(long = "allowed-origin", env = "PDF_TOOLKIT_ALLOWED_ORIGINS", value_delimiter = ',')]
    pub allowed_origins: Vec<String>,

    /// Directory for per-request scratch files (defaults to the system temp dir)
    #[arg(long, env = "PDF_TOOLKIT_SCRATCH_DIR")]
    pub scratch_dir: Option<PathBuf>,
}
