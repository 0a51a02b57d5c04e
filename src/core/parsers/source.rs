use anyhow::{Context, Result, bail};
use regex::Regex;

use crate::{
    core::{KeyUsage, SourceContext, SourceLocation},
    utils::{build_line_index, line_text, offset_to_line_col},
};

/// Matches lookup calls that pass a literal key, e.g. `t("common.ok")`.
///
/// A call only counts when the function name is not preceded by an identifier
/// character or `.`, so `format("x")` and `obj.t("x")` are ignored for `t`.
/// Template literals are accepted only when they have no `${...}`.
#[derive(Debug, Clone)]
pub struct CallSitePattern {
    regex: Regex,
}

impl CallSitePattern {
    pub fn new(functions: &[String]) -> Result<Self> {
        if functions.is_empty() {
            bail!("At least one lookup function name is required.");
        }

        let names = functions
            .iter()
            .map(|name| regex::escape(name))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(
            r#"(?:^|[^\w$.])(?P<call>{names})\s*\(\s*(?:'(?P<single>[^'\\\r\n]*)'|"(?P<double>[^"\\\r\n]*)"|`(?P<tpl>[^`\\$]*)`)"#
        );
        let regex = Regex::new(&pattern)
            .with_context(|| format!("Invalid lookup function names: {:?}", functions))?;

        Ok(Self { regex })
    }

    /// Extract every literal key reference in `content`, in source order.
    pub fn find_usages(&self, content: &str, file_path: &str) -> Vec<KeyUsage> {
        let line_index = build_line_index(content);

        self.regex
            .captures_iter(content)
            .filter_map(|caps| {
                let call = caps.name("call")?;
                let key = caps
                    .name("single")
                    .or_else(|| caps.name("double"))
                    .or_else(|| caps.name("tpl"))?
                    .as_str();
                if key.is_empty() {
                    return None;
                }

                let (line, col) = offset_to_line_col(content, &line_index, call.start());
                Some(KeyUsage {
                    key: key.to_string(),
                    context: SourceContext::new(
                        SourceLocation::new(file_path, line, col),
                        line_text(content, &line_index, line),
                    ),
                })
            })
            .collect()
    }
}
