//! Lining the supplied arguments up with the placeholders of a template.

use log::debug;

use crate::analyze::analyze;
use crate::transform::substitute;
use crate::types::SafexResult;

/// The value of every slot no argument was supplied for.
///
/// Distinct from an empty string, which is a legitimate argument.
pub const NIL: &str = "<nil>";

/// A dense array of values covering every index up to the largest placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Filled<'a> {
    /// The smallest index referenced by the template.
    pub min: usize,

    /// The largest index referenced by the template.
    pub max: usize,

    /// `max + 1` values, each either a supplied argument or [`NIL`].
    pub values: Vec<&'a str>,
}

impl Filled<'_> {
    /// Substitute the filled values into `template`.
    pub fn render(&self, template: &str) -> SafexResult {
        substitute(template, &self.values)
    }
}

/// Pair each placeholder index of `template` with the argument at that position.
///
/// Returns `Ok(None)` when there is nothing to substitute, either because the
/// template has no placeholders or because no arguments were given.
pub fn fill<'a, S: AsRef<str>>(template: &str, args: &'a [S]) -> SafexResult<Option<Filled<'a>>> {
    let Some(analysis) = analyze(template)? else {
        return Ok(None);
    };
    if args.is_empty() {
        debug!("no arguments to fill {} placeholder slots", analysis.max + 1);
        return Ok(None);
    }

    let mut values = vec![NIL; analysis.max + 1];
    for index in analysis.indices() {
        if let Some(arg) = args.get(index) {
            values[index] = arg.as_ref();
        } else {
            debug!("no argument for placeholder {{{index}}}, using {NIL}");
        }
    }

    Ok(Some(Filled {
        min: analysis.min,
        max: analysis.max,
        values,
    }))
}
