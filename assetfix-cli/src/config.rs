//! Configuration file loading for assetfix.
//!
//! Discovers and loads `assetfix.toml` from the working directory.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "assetfix.toml";

/// Top-level configuration from assetfix.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetfixConfig {
    /// Which files a run considers.
    pub walk: WalkConfig,

    /// Where report artifacts go.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WalkConfig {
    /// Asset root. Relative paths resolve against the working directory.
    pub root: Option<Utf8PathBuf>,

    /// Glob patterns matched against root-relative paths.
    pub exclude: Vec<String>,

    /// Allowed file-name suffixes. Unset means each catalog's own scope.
    pub extensions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub report_json: Option<Utf8PathBuf>,
    pub report_md: Option<Utf8PathBuf>,
}

/// Discover the assetfix.toml config file in `dir`.
pub fn discover_config(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse an assetfix.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<AssetfixConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

pub fn parse_config(contents: &str) -> anyhow::Result<AssetfixConfig> {
    let config: AssetfixConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load the explicit config if given (it must exist), else the discovered
/// one, else defaults.
pub fn resolve(explicit: Option<&Utf8Path>, dir: &Utf8Path) -> anyhow::Result<AssetfixConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    match discover_config(dir) {
        Some(path) => load_config(&path),
        None => Ok(AssetfixConfig::default()),
    }
}

/// Run settings after merging the config file with CLI arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedConfig {
    pub root: Utf8PathBuf,
    pub extensions: Option<Vec<String>>,
    pub exclude: Vec<String>,
    pub report_json: Option<Utf8PathBuf>,
    pub report_md: Option<Utf8PathBuf>,
}

/// The CLI side of a merge. Empty lists and `None` mean "not given".
#[derive(Debug, Clone, Default)]
pub struct CliOverrides<'a> {
    pub root: Option<&'a Utf8Path>,
    pub extensions: &'a [String],
    pub exclude: &'a [String],
    pub report_json: Option<&'a Utf8Path>,
    pub report_md: Option<&'a Utf8Path>,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: AssetfixConfig,
}

impl ConfigMerger {
    pub fn new(config: AssetfixConfig) -> Self {
        Self { config }
    }

    /// CLI values win. A non-empty CLI list replaces the config list.
    pub fn merge_run_args(self, cli: &CliOverrides<'_>, default_root: &str) -> MergedConfig {
        let root = cli
            .root
            .map(Utf8Path::to_path_buf)
            .or(self.config.walk.root)
            .unwrap_or_else(|| Utf8PathBuf::from(default_root));

        let extensions = if cli.extensions.is_empty() {
            self.config.walk.extensions
        } else {
            Some(cli.extensions.to_vec())
        }
        .map(|exts| exts.iter().map(|e| normalize_extension(e)).collect());

        let exclude = if cli.exclude.is_empty() {
            self.config.walk.exclude
        } else {
            cli.exclude.to_vec()
        };

        MergedConfig {
            root,
            extensions,
            exclude,
            report_json: cli
                .report_json
                .map(Utf8Path::to_path_buf)
                .or(self.config.output.report_json),
            report_md: cli
                .report_md
                .map(Utf8Path::to_path_buf)
                .or(self.config.output.report_md),
        }
    }
}

/// `js` and `.js` both mean the `.js` suffix.
pub fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim();
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{ext}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const DEFAULT_ROOT: &str = "src/main/resources/static";

    #[test]
    fn test_parse_example_config() {
        let cfg = parse_config(
            r#"
[walk]
root = "web/static"
exclude = ["**/vendor/**"]
extensions = [".html", ".js", ".css"]

[output]
report_json = "target/assetfix/report.json"
report_md = "target/assetfix/report.md"
"#,
        )
        .expect("parse");

        assert_eq!(cfg.walk.root.as_deref(), Some(Utf8Path::new("web/static")));
        assert_eq!(cfg.walk.exclude, vec!["**/vendor/**"]);
        assert_eq!(cfg.walk.extensions.as_ref().map(Vec::len), Some(3));
        assert_eq!(
            cfg.output.report_md.as_deref(),
            Some(Utf8Path::new("target/assetfix/report.md"))
        );
    }

    #[test]
    fn test_parse_empty_config() {
        let cfg = parse_config("").expect("parse");
        assert!(cfg.walk.root.is_none());
        assert!(cfg.walk.exclude.is_empty());
        assert!(cfg.output.report_json.is_none());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = parse_config("[walk]\nroots = \"x\"\n").expect_err("typo");
        assert!(format!("{err:#}").contains("roots"));
    }

    #[test]
    fn test_defaults_when_nothing_given() {
        let merged = ConfigMerger::new(AssetfixConfig::default())
            .merge_run_args(&CliOverrides::default(), DEFAULT_ROOT);
        assert_eq!(merged.root, Utf8PathBuf::from(DEFAULT_ROOT));
        assert_eq!(merged.extensions, None);
        assert!(merged.exclude.is_empty());
    }

    #[test]
    fn test_cli_overrides_config() {
        let cfg = parse_config(
            "[walk]\nroot = \"from-config\"\nexclude = [\"a/**\"]\nextensions = [\"css\"]\n\
             [output]\nreport_json = \"cfg.json\"\n",
        )
        .unwrap();
        let ext = vec!["js".to_string()];
        let exclude = vec!["b/**".to_string()];
        let merged = ConfigMerger::new(cfg).merge_run_args(
            &CliOverrides {
                root: Some(Utf8Path::new("from-cli")),
                extensions: &ext,
                exclude: &exclude,
                report_json: None,
                report_md: Some(Utf8Path::new("cli.md")),
            },
            DEFAULT_ROOT,
        );

        assert_eq!(
            merged,
            MergedConfig {
                root: Utf8PathBuf::from("from-cli"),
                extensions: Some(vec![".js".to_string()]),
                exclude: vec!["b/**".to_string()],
                report_json: Some(Utf8PathBuf::from("cfg.json")),
                report_md: Some(Utf8PathBuf::from("cli.md")),
            }
        );
    }

    #[test]
    fn test_config_used_when_cli_silent() {
        let cfg = parse_config("[walk]\nroot = \"web\"\nextensions = [\"html\", \".css\"]\n").unwrap();
        let merged = ConfigMerger::new(cfg).merge_run_args(&CliOverrides::default(), DEFAULT_ROOT);
        assert_eq!(merged.root, Utf8PathBuf::from("web"));
        assert_eq!(
            merged.extensions,
            Some(vec![".html".to_string(), ".css".to_string()])
        );
    }

    #[test]
    fn test_discover_config_some_and_none() {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        assert!(discover_config(&root).is_none());

        std::fs::write(root.join(CONFIG_FILE_NAME), "").expect("write config");
        assert!(discover_config(&root).is_some());
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        let missing = root.join("nope.toml");
        assert!(resolve(Some(&missing), &root).is_err());
        assert!(resolve(None, &root).is_ok());
    }
}
