use anyhow::{Context, Result};
use hex_voyage_world::GameStore;
use tracing::{debug, warn};

/// Outcome of running a script.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct RunSummary {
    /// Actions that were committed.
    pub(crate) applied: usize,
    /// Actions that were parsed or applied unsuccessfully and skipped.
    pub(crate) rejected: usize,
}

/// Yields the one-based line number and text of every action in `source`.
///
/// Blank lines are skipped and `#` starts a comment that runs to the end of
/// the line.
pub(crate) fn actions(source: &str) -> impl Iterator<Item = (usize, &str)> {
    source
        .lines()
        .enumerate()
        .map(|(index, line)| {
            let action = line.split_once('#').map_or(line, |(action, _)| action);
            (index + 1, action.trim())
        })
        .filter(|(_, action)| !action.is_empty())
}

/// Dispatches every action of `source` in order.
///
/// Rejected actions are logged and skipped unless `strict` is set, in which
/// case the first rejection ends the run with an error.
pub(crate) fn run(store: &mut GameStore, source: &str, strict: bool) -> Result<RunSummary> {
    let mut summary = RunSummary::default();
    for (line, action) in actions(source) {
        match store.dispatch_line(action) {
            Ok(events) => {
                summary.applied += 1;
                debug!(line, action, events = events.len(), "applied action");
            }
            Err(error) if strict => {
                return Err(error).with_context(|| format!("line {line}: `{action}` was rejected"));
            }
            Err(error) => {
                summary.rejected += 1;
                warn!(line, action, %error, "rejected action");
            }
        }
    }
    Ok(summary)
}
