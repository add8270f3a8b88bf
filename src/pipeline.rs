use crate::acquirer::{self, HttpFetch};
use crate::config::Config;
use crate::error::Result;
use crate::{frame, normalize, sink, table};
use std::path::PathBuf;
use tracing::info;

/// Summary handed back to the CLI after a full run.
pub struct PipelineReport {
    pub total_records: usize,
    pub output_path: PathBuf,
}

pub struct Pipeline;

impl Pipeline {
    /// Runs acquire -> load -> normalize -> frame -> write in strict sequence.
    ///
    /// Stage errors propagate unchanged and abort the run before the output
    /// file is opened. Malformed cell values never reach this level; the
    /// stages degrade them to absent fields.
    pub async fn run(config: &Config, http: &dyn HttpFetch) -> Result<PipelineReport> {
        let source = &config.source;

        let path =
            acquirer::fetch(http, &source.url, &source.data_dir, source.force_refresh).await?;
        info!(path = %path.display(), "acquired source table");

        let raw = table::load_raw_table(&path)?;
        let normalized = normalize::normalize(raw);
        let framed = frame::frame(normalized);
        sink::write_table(&source.output, &framed)?;
        info!(records = framed.len(), output = %source.output.display(), "pipeline finished");

        Ok(PipelineReport {
            total_records: framed.len(),
            output_path: source.output.clone(),
        })
    }
}
