//! Positional text templates.
//!
//! Placeholders are `{0}`, `{1}`, ... and `{{`/`}}` produce literal braces.
//! A template referring to an argument that was not supplied is an error.

use std::fmt::{self, Write};

use crate::{Error, Result};

/// A named, immutable template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    name: &'static str,
    text: &'static str,
}

enum Piece<'a> {
    Literal(&'a str),
    Argument(usize),
}

impl Template {
    pub const fn new(name: &'static str, text: &'static str) -> Self {
        Self { name, text }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of arguments the template consumes (highest index plus one).
    pub fn arity(&self) -> Result<usize> {
        let mut arity = 0;
        self.walk(|piece| {
            if let Piece::Argument(index) = piece {
                arity = arity.max(index + 1);
            }
            Ok(())
        })?;
        Ok(arity)
    }

    /// Substitute `args` into the template.
    pub fn render(&self, args: &[&dyn fmt::Display]) -> Result<String> {
        let expected = self.arity()?;
        if expected > args.len() {
            return Err(Error::TemplateArguments {
                template: self.name,
                expected,
                provided: args.len(),
            });
        }

        let mut output = String::with_capacity(self.text.len());
        self.walk(|piece| {
            match piece {
                Piece::Literal(text) => output.push_str(text),
                Piece::Argument(index) => {
                    // Writing into a String cannot fail
                    let _ = write!(output, "{}", args[index]);
                }
            }
            Ok(())
        })?;
        Ok(output)
    }

    fn walk<'t>(&'t self, mut visit: impl FnMut(Piece<'t>) -> Result<()>) -> Result<()> {
        let text = self.text;
        let bytes = text.as_bytes();
        let mut literal_start = 0;
        let mut pos = 0;

        while pos < bytes.len() {
            match bytes[pos] {
                b'{' | b'}' if bytes.get(pos + 1) == Some(&bytes[pos]) => {
                    visit(Piece::Literal(&text[literal_start..=pos]))?;
                    pos += 2;
                    literal_start = pos;
                }
                b'{' => {
                    let close = text[pos..]
                        .find('}')
                        .map(|offset| pos + offset)
                        .ok_or_else(|| self.syntax_error(pos))?;
                    let index = text[pos + 1..close]
                        .parse::<usize>()
                        .map_err(|_| self.syntax_error(pos))?;
                    visit(Piece::Literal(&text[literal_start..pos]))?;
                    visit(Piece::Argument(index))?;
                    pos = close + 1;
                    literal_start = pos;
                }
                b'}' => return Err(self.syntax_error(pos)),
                _ => pos += 1,
            }
        }
        visit(Piece::Literal(&text[literal_start..]))
    }

    fn syntax_error(&self, position: usize) -> Error {
        Error::TemplateSyntax {
            template: self.name,
            position,
        }
    }
}
