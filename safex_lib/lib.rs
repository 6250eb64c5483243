#![doc = include_str!("README.md")]

use log::debug;

pub mod analyze;
pub mod fill;
pub mod segment;
pub mod transform;
pub mod types;

use fill::fill;
use segment::Template;
use transform::{escape_single_quotes, is_valid_name};
use types::{SafexError, SafexResult};

/// Re-exports the types required to run safex.
pub mod prelude {
    pub use crate::{
        analyze::{analyze, Analysis},
        expand,
        fill::{fill, Filled, NIL},
        transform::{escape_single_quotes, substitute},
        types::{SafexError, SyntaxError},
        Output,
    };
}

/// How the escaped text is presented.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Output {
    /// Just the escaped value, for the caller to wrap in single quotes.
    #[default]
    Value,

    /// `name='value'`, ready for `eval`.
    Assignment(String),
}

/// Fill, render and escape a template in one go.
///
/// Malformed templates fail with [`SafexError::Syntax`] first. A well-formed
/// template without placeholders, or a call without arguments, is refused
/// with [`SafexError::NoPlaceholders`] rather than echoed back.
pub fn expand<S: AsRef<str>>(template: &str, args: &[S], output: &Output) -> SafexResult {
    if let Output::Assignment(name) = output {
        if !is_valid_name(name) {
            return Err(SafexError::InvalidName(name.clone()));
        }
    }

    Template::parse(template)?;

    let filled = fill(template, args)?.ok_or(SafexError::NoPlaceholders)?;
    debug!(
        "filled {} slots for indices {}..={}",
        filled.values.len(),
        filled.min,
        filled.max
    );

    let escaped = escape_single_quotes(&filled.render(template)?);

    Ok(match output {
        Output::Value => escaped,
        Output::Assignment(name) => format!("{name}='{escaped}'"),
    })
}
