//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputArgs};
use crate::config::{load_config, ScrollConfig};
use crate::error::{Error, Result};
use crate::hits::HitSequence;
use crate::http::HttpClient;
use crate::page::HitsPath;
use crate::pagination::{PageSequence, ScrollPages, VecPages};
use serde_json::{json, Value};
use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, printing to stdout
    pub fn run(&self) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_with_writer(&mut out)
    }

    /// Run the CLI command, printing to the given writer
    pub fn run_with_writer<W: Write>(&self, out: &mut W) -> Result<()> {
        match &self.cli.command {
            Commands::Scroll {
                config,
                url,
                index,
                query,
                size,
                scroll,
                output,
            } => {
                let config = self.build_scroll_config(
                    config.as_deref(),
                    url.as_deref(),
                    index.as_deref(),
                    query.as_deref(),
                    *size,
                    scroll.as_deref(),
                )?;
                self.scroll(&config, output, out)
            }
            Commands::Flatten { file, output } => self.flatten(file, output, out),
            Commands::Validate { config } => self.validate(config, out),
        }
    }

    /// Merge the config file (if any) with command-line overrides
    fn build_scroll_config(
        &self,
        path: Option<&Path>,
        url: Option<&str>,
        index: Option<&str>,
        query: Option<&str>,
        size: Option<u32>,
        scroll: Option<&str>,
    ) -> Result<ScrollConfig> {
        let mut config = match path {
            Some(path) => load_config(path)?,
            None => ScrollConfig::new(
                url.ok_or_else(|| Error::missing_field("url"))?,
                index.ok_or_else(|| Error::missing_field("index"))?,
            ),
        };

        if let Some(url) = url {
            config.url = url.to_string();
        }
        if let Some(index) = index {
            config.index = index.to_string();
        }
        if let Some(query) = query {
            config.query = serde_json::from_str(query)
                .map_err(|e| Error::invalid_value("query", e.to_string()))?;
        }
        if let Some(size) = size {
            config.size = size;
        }
        if let Some(scroll) = scroll {
            config.scroll = scroll.to_string();
        }
        if let Some(hits_path) = &self.cli.hits_path {
            config.hits_path.clone_from(hits_path);
        }

        config.validate()?;
        Ok(config)
    }

    fn scroll<W: Write>(
        &self,
        config: &ScrollConfig,
        output: &OutputArgs,
        out: &mut W,
    ) -> Result<()> {
        info!(
            url = %config.url,
            index = %config.index,
            auth = config.auth.kind(),
            "Starting scroll"
        );
        let client = HttpClient::with_auth(config.http_client_config(), config.auth.clone())?;
        let pages = ScrollPages::new(client, config.scroll_request()?);
        let mut hits = HitSequence::new(pages);

        let start = Instant::now();
        let count = emit_hits(&mut hits, output, out)?;
        hits.pages_mut().clear_scroll();

        info!(
            hits = count,
            pages = hits.pages().pages_fetched(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Scroll complete"
        );
        Ok(())
    }

    fn flatten<W: Write>(&self, file: &Path, output: &OutputArgs, out: &mut W) -> Result<()> {
        let pages = VecPages::from_file(file)?;
        debug!(pages = pages.len(), file = %file.display(), "Loaded pages");

        let hits_path = match &self.cli.hits_path {
            Some(path) => HitsPath::parse(path)?,
            None => HitsPath::default(),
        };
        let mut hits = HitSequence::with_hits_path(pages, hits_path);
        let count = emit_hits(&mut hits, output, out)?;
        info!(hits = count, "Flatten complete");
        Ok(())
    }

    fn validate<W: Write>(&self, path: &Path, out: &mut W) -> Result<()> {
        let config = load_config(path)?;
        config.validate()?;

        let summary = json!({
            "status": "valid",
            "url": config.url,
            "index": config.index,
            "size": config.size,
            "scroll": config.scroll,
            "hits_path": config.hits_path,
            "auth": config.auth.kind(),
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
        Ok(())
    }
}

/// Write hits as JSON lines, returning how many were written.
///
/// Stops before fetching anything beyond `max_hits`.
pub fn emit_hits<P, W>(hits: &mut HitSequence<P>, output: &OutputArgs, out: &mut W) -> Result<u64>
where
    P: PageSequence,
    W: Write,
{
    let mut count = 0;
    let mut iter = hits.hits();

    while output.max_hits.map_or(true, |max| count < max) {
        let Some(item) = iter.next() else {
            break;
        };
        let (position, hit) = item?;

        let line: Value = if output.with_position {
            json!({ "position": position, "hit": hit })
        } else {
            hit
        };
        writeln!(out, "{}", serde_json::to_string(&line)?)?;
        count += 1;
    }

    out.flush()?;
    Ok(count)
}
