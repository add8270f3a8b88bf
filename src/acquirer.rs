use crate::error::{CleanerError, Result};
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Port for fetching the raw table body, kept narrow so tests can stub the
/// network.
#[async_trait]
pub trait HttpFetch: Send + Sync {
    async fn get_text(&self, url: &str) -> Result<String>;
}

/// Production adapter backed by reqwest. `Response::text` decodes using the
/// charset advertised by the server, falling back to UTF-8.
pub struct ReqwestFetch;

#[async_trait]
impl HttpFetch for ReqwestFetch {
    async fn get_text(&self, url: &str) -> Result<String> {
        let client = reqwest::Client::new();
        let resp = client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CleanerError::Acquisition {
                message: format!("GET {} returned status {}", url, status),
            });
        }
        Ok(resp.text().await?)
    }
}

/// Returns a readable local copy of the source table.
///
/// URLs are downloaded into `data_dir` under the basename of the URL path
/// (query string stripped) and the cached copy is reused unless `force` is
/// set. A plain filesystem path is returned as-is, which supports offline
/// runs against an already-downloaded file.
pub async fn fetch(
    http: &dyn HttpFetch,
    source: &str,
    data_dir: &Path,
    force: bool,
) -> Result<PathBuf> {
    if !source.contains("://") {
        let local = PathBuf::from(source);
        if local.exists() {
            return Ok(local);
        }
        return Err(CleanerError::Acquisition {
            message: format!("source file {} does not exist", local.display()),
        });
    }

    let cached = data_dir.join(cache_file_name(source)?);
    if cached.exists() && !force {
        debug!(path = %cached.display(), "reusing cached download");
        return Ok(cached);
    }

    fs::create_dir_all(data_dir)?;
    info!(url = %source, "downloading source table");
    let body = http.get_text(source).await?;
    fs::write(&cached, body)?;
    Ok(cached)
}

fn cache_file_name(url: &str) -> Result<String> {
    let without_query = url.split('?').next().unwrap_or(url);
    without_query
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or_else(|| CleanerError::Acquisition {
            message: format!("cannot derive a cache file name from {}", url),
        })
}
