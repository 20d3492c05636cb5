//! Referrer queries for located declarations.
//!
//! Each match is turned into a `<target>:#<offset>` position and handed to
//! a [`ReferrerTool`]. The tool's output is copied to the caller's stream
//! unchanged. A query that fails is logged and skipped; the rest of the
//! batch still runs.

pub mod errors;
pub mod guru;

pub use errors::QueryError;
pub use guru::GuruTool;

use crate::config::RunConfig;
use crate::locator::MatchResult;
use std::io::Write;
use std::path::Path;

/// Something that can report the referrers of the symbol at a position.
pub trait ReferrerTool {
    /// Run one query and return the tool's raw output.
    fn referrers(&self, scope: &str, position: &str) -> Result<Vec<u8>, QueryError>;
}

/// Position string for a byte offset, as accepted by guru.
pub fn position_key(target: &Path, offset: usize) -> String {
    format!("{}:#{}", target.display(), offset)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedQuery {
    pub name: String,
    pub position: String,
    pub reason: String,
}

/// What happened to each match during a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryReport {
    /// Names whose query succeeded, in order
    pub queried: Vec<String>,
    /// Names never queried (`main` and configured exclusions)
    pub skipped: Vec<String>,
    pub failed: Vec<FailedQuery>,
}

impl QueryReport {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Query referrers for every match, in order, writing tool output to `out`.
///
/// Only a failure to write to `out` aborts the batch.
pub fn query_referrers<T, W>(
    tool: &T,
    config: &RunConfig,
    matches: &MatchResult,
    out: &mut W,
) -> Result<QueryReport, QueryError>
where
    T: ReferrerTool + ?Sized,
    W: Write,
{
    let mut report = QueryReport::default();

    for m in matches.iter() {
        if config.is_excluded(&m.name) {
            log::debug!("not querying {}", m.name);
            report.skipped.push(m.name.clone());
            continue;
        }

        let position = position_key(config.target(), m.offset);
        match tool.referrers(config.scope(), &position) {
            Ok(output) => {
                out.write_all(&output)?;
                report.queried.push(m.name.clone());
            }
            Err(e) => {
                log::warn!("referrers of {} ({}) failed: {}", m.name, position, e);
                report.failed.push(FailedQuery {
                    name: m.name.clone(),
                    position,
                    reason: e.to_string(),
                });
            }
        }
    }

    out.flush()?;
    Ok(report)
}
