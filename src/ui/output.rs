//! Output verbosity.

/// How much a check run prints.
///
/// Results, warnings and errors are printed in every mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Also show each probe's command line.
    Verbose,
    /// Per-item progress with a header.
    #[default]
    Normal,
    /// Final result only (`--quiet`).
    Quiet,
}

impl OutputMode {
    /// Check if this mode lists probe commands alongside results.
    pub fn shows_details(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Check if this mode shows spinners, headers and hints.
    pub fn shows_progress(&self) -> bool {
        !matches!(self, Self::Quiet)
    }
}
