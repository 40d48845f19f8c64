// src/command/template.rs

//! Command templates and argument flattening.
//!
//! A template is a format string with `{}` placeholders plus one [`Arg`] per
//! placeholder. Literal text between placeholders is split into words with
//! shell quoting rules; interpolated arguments are inserted as-is and never
//! re-split.
//!
//! ```text
//! "echo -n {}"  +  ["Hello \"Mr White\""]
//!   -> ["echo", "-n", "Hello \"Mr White\""]
//! ```

use crate::errors::CommandError;

use super::Command;

/// One interpolated value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    /// Contributes nothing (an absent value).
    Empty,
    /// A single word, never re-split. Numbers end up here in decimal form.
    Word(String),
    /// The resolved argument vector of a nested command.
    Argv(Vec<String>),
    /// Ordered nested arguments, flattened recursively.
    List(Vec<Arg>),
}

impl Arg {
    pub fn flatten(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(&self, out: &mut Vec<String>) {
        match self {
            Arg::Empty => {}
            Arg::Word(word) => out.push(word.clone()),
            Arg::Argv(argv) => out.extend(argv.iter().cloned()),
            Arg::List(items) => {
                for item in items {
                    item.flatten_into(out);
                }
            }
        }
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Word(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Word(value)
    }
}

impl From<&String> for Arg {
    fn from(value: &String) -> Self {
        Arg::Word(value.clone())
    }
}

macro_rules! number_args {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    Arg::Word(value.to_string())
                }
            }
        )*
    };
}

number_args!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl<T: Into<Arg>> From<Option<T>> for Arg {
    fn from(value: Option<T>) -> Self {
        value.map_or(Arg::Empty, Into::into)
    }
}

impl<T: Into<Arg>> From<Vec<T>> for Arg {
    fn from(value: Vec<T>) -> Self {
        Arg::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Clone + Into<Arg>> From<&[T]> for Arg {
    fn from(value: &[T]) -> Self {
        Arg::List(value.iter().cloned().map(Into::into).collect())
    }
}

impl<T: Into<Arg>, const N: usize> From<[T; N]> for Arg {
    fn from(value: [T; N]) -> Self {
        Arg::List(value.into_iter().map(Into::into).collect())
    }
}

impl From<Command> for Arg {
    fn from(value: Command) -> Self {
        Arg::Argv(value.args().to_vec())
    }
}

impl From<&Command> for Arg {
    fn from(value: &Command) -> Self {
        Arg::Argv(value.args().to_vec())
    }
}

/// Literal segments interleaved with arguments.
///
/// Invariant: argument `i` follows segment `i`. Segments without an argument
/// contribute only their own words; arguments past the last segment are
/// appended at the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<String>,
    args: Vec<Arg>,
}

impl Template {
    /// Build from a format string with `{}` placeholders.
    ///
    /// `{{` and `}}` produce literal braces.
    pub fn new(fmt: &str, args: Vec<Arg>) -> Self {
        Self {
            segments: split_placeholders(fmt),
            args,
        }
    }

    pub fn from_parts(segments: Vec<String>, args: Vec<Arg>) -> Self {
        Self { segments, args }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Resolve into a flat argument vector. Pure: no process, no filesystem.
    pub fn resolve(&self) -> Result<Vec<String>, CommandError> {
        let mut argv = Vec::new();

        for (i, segment) in self.segments.iter().enumerate() {
            let words = shell_words::split(segment).map_err(|e| CommandError::Tokenize {
                segment: segment.clone(),
                reason: e.to_string(),
            })?;
            argv.extend(words);

            if let Some(arg) = self.args.get(i) {
                arg.flatten_into(&mut argv);
            }
        }

        for arg in self.args.iter().skip(self.segments.len()) {
            arg.flatten_into(&mut argv);
        }

        Ok(argv)
    }
}

fn split_placeholders(fmt: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = fmt.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('{', Some('{')) => {
                chars.next();
                current.push('{');
            }
            ('{', Some('}')) => {
                chars.next();
                segments.push(std::mem::take(&mut current));
            }
            ('}', Some('}')) => {
                chars.next();
                current.push('}');
            }
            _ => current.push(c),
        }
    }

    segments.push(current);
    segments
}
