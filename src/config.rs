use crate::cli::ServeArgs;
use anyhow::{Context, Result};
use axum::http::HeaderValue;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Settings for the HTTP service. Immutable once the server starts.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub max_upload_bytes: usize,
    /// Empty means any origin is allowed.
    pub allowed_origins: Vec<HeaderValue>,
    pub scratch_root: PathBuf,
}

impl ServerConfig {
    pub fn from_args(args: &ServeArgs) -> Result<Self> {
        let ip: IpAddr = args
            .host
            .parse()
            .with_context(|| format!("Invalid bind host: {}", args.host))?;

        let scratch_root = args.scratch_dir.clone().unwrap_or_else(std::env::temp_dir);
        std::fs::create_dir_all(&scratch_root).with_context(|| {
            format!(
                "Failed to create scratch directory: {}",
                scratch_root.display()
            )
        })?;

        let allowed_origins = args
            .allowed_origins
            .iter()
            .map(|origin| origin.trim())
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .with_context(|| format!("Invalid CORS origin: {:?}", origin))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ServerConfig {
            bind: SocketAddr::new(ip, args.port),
            max_upload_bytes: args.max_upload_mb.saturating_mul(1024 * 1024),
            allowed_origins,
            scratch_root,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: SocketAddr::from(([0, 0, 0, 0], 8000)),
            max_upload_bytes: 100 * 1024 * 1024,
            allowed_origins: Vec::new(),
            scratch_root: std::env::temp_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ServeArgs {
        ServeArgs {
            host: "127.0.0.1".to_string(),
            port: 9000,
            max_upload_mb: 2,
            allowed_origins: vec![" http://localhost:5173 ".to_string(), String::new()],
            scratch_dir: None,
        }
    }

    #[test]
    fn test_from_args() {
        let config = ServerConfig::from_args(&args()).unwrap();
        assert_eq!(config.bind, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(config.max_upload_bytes, 2 * 1024 * 1024);
        assert_eq!(
            config.allowed_origins,
            vec![HeaderValue::from_static("http://localhost:5173")]
        );
    }

    #[test]
    fn test_bad_host_rejected() {
        let mut args = args();
        args.host = "not a host".to_string();
        assert!(ServerConfig::from_args(&args).is_err());
    }

    #[test]
    fn test_invalid_origin_rejected() {
        let mut args = args();
        args.allowed_origins = vec!["http://ok.example".to_string(), "bad\norigin".to_string()];
        let err = ServerConfig::from_args(&args).unwrap_err();
        assert!(err.to_string().contains("Invalid CORS origin"));
    }

    #[test]
    fn test_scratch_dir_is_created() {
        let root = tempfile::tempdir().unwrap();
        let mut args = args();
        args.scratch_dir = Some(root.path().join("nested").join("scratch"));
        let config = ServerConfig::from_args(&args).unwrap();
        assert!(config.scratch_root.is_dir());
    }
}
