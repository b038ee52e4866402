//! Analysis options.

/// Options that change how strictly a service declaration is analysed.
///
/// # Example
///
/// ```
/// use fnpack_core::AnalysisConfig;
///
/// let config = AnalysisConfig::default().with_strict_paths(true);
/// assert!(config.strict_paths());
/// assert!(config.report_generated());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisConfig {
    strict_paths: bool,
    report_generated: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisConfig {
    /// Creates the default options: lenient paths, generated functions
    /// reported.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            strict_paths: false,
            report_generated: true,
        }
    }

    /// Fails on resource path segments that cannot be resolved statically
    /// instead of skipping them.
    #[must_use]
    pub const fn with_strict_paths(mut self, strict_paths: bool) -> Self {
        self.strict_paths = strict_paths;
        self
    }

    /// Controls whether an informational diagnostic is reported for every
    /// generated function.
    #[must_use]
    pub const fn with_report_generated(mut self, report_generated: bool) -> Self {
        self.report_generated = report_generated;
        self
    }

    /// Returns `true` when unresolvable path segments are errors.
    #[must_use]
    pub const fn strict_paths(&self) -> bool {
        self.strict_paths
    }

    /// Returns `true` when generated functions are reported.
    #[must_use]
    pub const fn report_generated(&self) -> bool {
        self.report_generated
    }
}
