//! Pretty RON dump of a parsed ruleset.

use std::path::Path;

use fc_core::ruleset::{self, Ruleset};
use ron::ser::PrettyConfig;

use crate::error::{Result, ToolError};
use crate::loader::RulesetFiles;

/// Ruleset as pretty-printed RON.
pub fn to_ron(ruleset: &Ruleset) -> Result<String> {
    let config = PrettyConfig::new().depth_limit(4).indentor("    ".to_string());
    Ok(ron::ser::to_string_pretty(ruleset, config)?)
}

/// Parse the ruleset in `dir` and render it as RON, writing to `output`
/// when given.
///
/// Returns the rendered text either way.
pub fn dump_ruleset(dir: &Path, output: Option<&Path>) -> Result<String> {
    let files = RulesetFiles::read_dir(dir)?;
    let ruleset = ruleset::parse_ruleset(&files.sources())?;
    let text = to_ron(&ruleset)?;

    if let Some(path) = output {
        std::fs::write(path, &text).map_err(|e| ToolError::io(path, e))?;
        tracing::info!(path = %path.display(), bytes = text.len(), "ruleset dumped");
    }
    Ok(text)
}
