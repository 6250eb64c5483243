use std::fmt::Display;
use std::ops::Deref;
use std::vec::IntoIter;

use crate::types::{parse_index, SafexError, SafexResult, SyntaxError};

/// A run of plain text, an escaped brace or a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment<'a> {
    /// Text copied to the output verbatim.
    Text(&'a str),

    /// A doubled `{{` or `}}`, rendered as a single brace.
    Brace(char),

    /// A `{N}` placeholder starting at byte `offset` of the template.
    Placeholder { index: usize, offset: usize },
}

impl Display for Segment<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Segment::Text(text) => write!(f, "{text}")?,
            Segment::Brace(ch) => write!(f, "{ch}{ch}")?,
            Segment::Placeholder { index, .. } => write!(f, "{{{index}}}")?,
        }
        Ok(())
    }
}

/// A parsed template, the input of [`substitute`](crate::transform::substitute).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Template<'a>(pub Vec<Segment<'a>>);

impl<'a> Template<'a> {
    /// Split a template string into segments.
    ///
    /// Every `{` must either be doubled or open a placeholder made of decimal
    /// digits only, and every `}` must either be doubled or close one.
    pub fn parse(s: &'a str) -> SafexResult<Self> {
        let bytes = s.as_bytes();
        let mut segments = Vec::new();

        let mut start = 0;
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'{' | b'}' if bytes.get(i + 1) == Some(&bytes[i]) => {
                    if start < i {
                        segments.push(Segment::Text(&s[start..i]));
                    }
                    segments.push(Segment::Brace(bytes[i] as char));

                    i += 2;
                    start = i;
                }

                b'{' => {
                    let close = s[i + 1..]
                        .find('}')
                        .map(|n| i + 1 + n)
                        .ok_or(SyntaxError::UnmatchedOpen)
                        .map_err(SafexError::syntax(i))?;

                    let digits = &s[i + 1..close];
                    if digits.is_empty() {
                        return Err(SafexError::syntax(i)(SyntaxError::Empty));
                    }
                    if !digits.bytes().all(|b| b.is_ascii_digit()) {
                        return Err(SafexError::syntax(i)(SyntaxError::InvalidIndex(
                            digits.to_string(),
                        )));
                    }
                    let index = parse_index(digits)?;

                    if start < i {
                        segments.push(Segment::Text(&s[start..i]));
                    }
                    segments.push(Segment::Placeholder { index, offset: i });

                    i = close + 1;
                    start = i;
                }

                b'}' => return Err(SafexError::syntax(i)(SyntaxError::UnmatchedClose)),

                _ => i += 1,
            }
        }

        if start < bytes.len() {
            segments.push(Segment::Text(&s[start..]));
        }

        Ok(Self(segments))
    }

    /// The placeholder indices in order of occurrence, duplicates included.
    pub fn placeholders(&self) -> impl Iterator<Item = usize> + '_ {
        self.iter().filter_map(|segment| match segment {
            Segment::Placeholder { index, .. } => Some(*index),
            _ => None,
        })
    }
}

impl<'a> Deref for Template<'a> {
    type Target = Vec<Segment<'a>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> IntoIterator for Template<'a> {
    type Item = Segment<'a>;
    type IntoIter = IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Display for Template<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for segment in self.iter() {
            write!(f, "{segment}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_text_and_placeholders() {
        let template = Template::parse("My dog's name is {0} and {1}{0}!").unwrap();
        assert_eq!(
            template.0,
            vec![
                Segment::Text("My dog's name is "),
                Segment::Placeholder {
                    index: 0,
                    offset: 17,
                },
                Segment::Text(" and "),
                Segment::Placeholder {
                    index: 1,
                    offset: 25,
                },
                Segment::Placeholder {
                    index: 0,
                    offset: 28,
                },
                Segment::Text("!"),
            ]
        );
        assert_eq!(template.placeholders().collect::<Vec<_>>(), vec![0, 1, 0]);
    }

    #[test]
    fn doubled_braces() {
        let template = Template::parse("{{{0}}} {{0}}").unwrap();
        assert_eq!(
            template.0,
            vec![
                Segment::Brace('{'),
                Segment::Placeholder {
                    index: 0,
                    offset: 2,
                },
                Segment::Brace('}'),
                Segment::Text(" "),
                Segment::Brace('{'),
                Segment::Text("0"),
                Segment::Brace('}'),
            ]
        );
        assert_eq!(template.to_string(), "{{{0}}} {{0}}");
    }

    #[test]
    fn multibyte_text() {
        let template = Template::parse("é{2}ß").unwrap();
        assert_eq!(
            template.0,
            vec![
                Segment::Text("é"),
                Segment::Placeholder {
                    index: 2,
                    offset: 2,
                },
                Segment::Text("ß"),
            ]
        );
    }

    #[test]
    fn syntax_errors() {
        assert_eq!(
            Template::parse("abc {0"),
            Err(SafexError::Syntax {
                offset: 4,
                cause: SyntaxError::UnmatchedOpen,
            })
        );
        assert_eq!(
            Template::parse("a } b"),
            Err(SafexError::Syntax {
                offset: 2,
                cause: SyntaxError::UnmatchedClose,
            })
        );
        assert_eq!(
            Template::parse("{}"),
            Err(SafexError::Syntax {
                offset: 0,
                cause: SyntaxError::Empty,
            })
        );
        assert_eq!(
            Template::parse("x{name}"),
            Err(SafexError::Syntax {
                offset: 1,
                cause: SyntaxError::InvalidIndex("name".to_string()),
            })
        );
        assert_eq!(
            Template::parse("{-1}"),
            Err(SafexError::Syntax {
                offset: 0,
                cause: SyntaxError::InvalidIndex("-1".to_string()),
            })
        );
        assert_eq!(
            Template::parse("{100000}"),
            Err(SafexError::IndexTooLarge("100000".to_string()))
        );
    }
}
