//! Clap-free settings for a walk.

use camino::Utf8PathBuf;

pub const DEFAULT_ROOT: &str = "src/main/resources/static";

#[derive(Debug, Clone)]
pub struct RunSettings {
    pub root: Utf8PathBuf,

    /// Allowed file-name suffixes. `None` means the union of the plan's
    /// rule-set scopes.
    pub extensions: Option<Vec<String>>,

    /// Glob patterns matched against root-relative paths.
    pub exclude: Vec<String>,

    /// Compute and report, never write.
    pub dry_run: bool,

    /// Keep before/after text so a unified diff can be rendered.
    pub collect_patch: bool,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            root: Utf8PathBuf::from(DEFAULT_ROOT),
            extensions: None,
            exclude: Vec::new(),
            dry_run: false,
            collect_patch: false,
        }
    }
}
