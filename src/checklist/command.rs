//! Probe command vectors.
//!
//! A probe command is an argument vector handed straight to process creation.
//! The only token with special meaning is [`PIPE_TOKEN`], which splits the
//! vector into a two-stage pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Token that separates the two stages of a piped probe.
pub const PIPE_TOKEN: &str = "|";

/// Reasons a probe command vector is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeCommandError {
    /// No tokens at all.
    #[error("probe command is empty")]
    Empty,

    /// More than one pipe token.
    #[error("probe command contains {count} pipe tokens; at most one is supported")]
    TooManyPipes { count: usize },

    /// A pipe token with nothing on its left.
    #[error("nothing to the left of '|'")]
    EmptyLeftStage,

    /// A pipe token with nothing on its right.
    #[error("nothing to the right of '|'")]
    EmptyRightStage,
}

/// A validated argument vector used to test for a tool's presence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ProbeCommand {
    argv: Vec<String>,
    pipe_at: Option<usize>,
}

/// The execution shape of a probe command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeShape<'a> {
    /// Run one process.
    Single(&'a [String]),
    /// Run `left`, feeding its stdout into `right`.
    Pipeline {
        left: &'a [String],
        right: &'a [String],
    },
}

impl ProbeCommand {
    /// Validate and build a probe command from its tokens.
    pub fn parse<I, S>(tokens: I) -> Result<Self, ProbeCommandError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let argv: Vec<String> = tokens.into_iter().map(Into::into).collect();
        if argv.is_empty() {
            return Err(ProbeCommandError::Empty);
        }

        let pipes: Vec<usize> = argv
            .iter()
            .enumerate()
            .filter(|(_, token)| token.as_str() == PIPE_TOKEN)
            .map(|(i, _)| i)
            .collect();

        let pipe_at = match pipes.as_slice() {
            [] => None,
            [0] => return Err(ProbeCommandError::EmptyLeftStage),
            [i] if *i == argv.len() - 1 => return Err(ProbeCommandError::EmptyRightStage),
            [i] => Some(*i),
            _ => return Err(ProbeCommandError::TooManyPipes { count: pipes.len() }),
        };

        Ok(Self { argv, pipe_at })
    }

    /// The raw tokens, including any pipe token.
    pub fn tokens(&self) -> &[String] {
        &self.argv
    }

    /// Whether this probe runs as a two-stage pipeline.
    pub fn is_pipeline(&self) -> bool {
        self.pipe_at.is_some()
    }

    /// Split the vector into its execution shape.
    pub fn shape(&self) -> ProbeShape<'_> {
        match self.pipe_at {
            Some(i) => ProbeShape::Pipeline {
                left: &self.argv[..i],
                right: &self.argv[i + 1..],
            },
            None => ProbeShape::Single(&self.argv),
        }
    }
}

impl TryFrom<Vec<String>> for ProbeCommand {
    type Error = ProbeCommandError;

    fn try_from(tokens: Vec<String>) -> Result<Self, Self::Error> {
        Self::parse(tokens)
    }
}

impl From<ProbeCommand> for Vec<String> {
    fn from(command: ProbeCommand) -> Self {
        command.argv
    }
}

/// Displays the vector space-joined. For logs and messages only; the result
/// is never executed.
impl fmt::Display for ProbeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.argv.join(" "))
    }
}
