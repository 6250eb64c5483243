//! Finding the placeholders a template refers to.

use std::sync::OnceLock;

use log::{debug, trace};
use regex::Regex;

use crate::types::{parse_index, SafexResult};

/// Matches doubled braces as well as placeholders, so that `{{0}}` is skipped
/// as literal text the same way the renderer treats it.
fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{\{|\}\}|\{([0-9]+)\}").expect("placeholder pattern is valid")
    })
}

/// The placeholder indices found in a template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Analysis {
    /// The smallest index referenced.
    pub min: usize,

    /// The largest index referenced.
    pub max: usize,

    /// `max + 1` entries, `true` wherever an index is referenced at least once.
    pub present: Vec<bool>,
}

impl Analysis {
    /// The distinct referenced indices in ascending order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.present
            .iter()
            .enumerate()
            .filter_map(|(index, &present)| present.then_some(index))
    }
}

/// Scan a template for `{N}` placeholders.
///
/// Returns `Ok(None)` when there are none, which is not an error. Fails only
/// when an index exceeds [`MAX_INDEX`](crate::types::MAX_INDEX), before
/// anything is allocated for it.
pub fn analyze(template: &str) -> SafexResult<Option<Analysis>> {
    let mut indices = Vec::new();
    for captures in placeholder_pattern().captures_iter(template) {
        if let Some(digits) = captures.get(1) {
            trace!("placeholder {} at byte {}", digits.as_str(), digits.start() - 1);
            indices.push(parse_index(digits.as_str())?);
        }
    }

    let (Some(&min), Some(&max)) = (indices.iter().min(), indices.iter().max()) else {
        debug!("template has no placeholders");
        return Ok(None);
    };

    let mut present = vec![false; max + 1];
    for index in indices {
        present[index] = true;
    }

    debug!("template references indices {min}..={max}");
    Ok(Some(Analysis { min, max, present }))
}
