mod config;
mod explain;

use anyhow::Context;
use assetfix_core::adapters::{ConsoleReporter, FsAssetStore, FsWritePort};
use assetfix_core::settings::DEFAULT_ROOT;
use assetfix_core::{
    ApiBaseProfile, CatalogId, RewritePlan, RunSettings, TreeWalker, write_report_artifacts,
};
use assetfix_domain::{Replacement, RuleSet};
use assetfix_types::ToolInfo;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use config::{CliOverrides, ConfigMerger};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "assetfix",
    version,
    about = "Repairs mojibake and canonicalizes API base URLs in static web assets."
)]
struct Cli {
    /// Config file (default: ./assetfix.toml when present).
    #[arg(long, global = true)]
    config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Repair known corrupted character sequences in .html, .js and .css files.
    Clean(RunArgs),
    /// Rewrite API_BASE declarations in scripts to the canonical expression.
    ApiBase(RunArgs),
    /// Strip the retired absolute backend origin from scripts.
    Urls(RunArgs),
    /// Run clean, api-base and urls in a single walk.
    All(RunArgs),
    /// List catalogs and their rules.
    ListRules(ListRulesArgs),
    /// Explain what a catalog repairs and how to fix files by hand.
    Explain(ExplainArgs),
}

#[derive(Debug, Parser)]
struct RunArgs {
    /// Asset root to walk (default: src/main/resources/static).
    #[arg(long)]
    root: Option<Utf8PathBuf>,

    /// Allowed file-name suffix, repeatable (default: each catalog's own scope).
    #[arg(long = "ext", value_name = "SUFFIX")]
    ext: Vec<String>,

    /// Glob of root-relative paths to skip, repeatable.
    #[arg(long, value_name = "GLOB")]
    exclude: Vec<String>,

    /// Report what would change without writing any file.
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Print a unified diff of all changes after the summary.
    #[arg(long, default_value_t = false)]
    diff: bool,

    /// Write the JSON change report to this path.
    #[arg(long)]
    report_json: Option<Utf8PathBuf>,

    /// Write the markdown change report to this path.
    #[arg(long)]
    report_md: Option<Utf8PathBuf>,
}

#[derive(Debug, Parser)]
struct ListRulesArgs {
    /// Only list this catalog (mojibake, api-base, legacy-origin).
    #[arg(long)]
    catalog: Option<CatalogId>,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Parser)]
struct ExplainArgs {
    /// Catalog name or subcommand (e.g., "mojibake", "urls").
    catalog: String,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        error!("{:?}", e);
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config;
    match cli.cmd {
        Command::Clean(args) => cmd_run(&[CatalogId::Mojibake], args, config),
        Command::ApiBase(args) => cmd_run(&[CatalogId::ApiBase], args, config),
        Command::Urls(args) => cmd_run(&[CatalogId::LegacyOrigin], args, config),
        Command::All(args) => cmd_run(&CatalogId::ALL, args, config),
        Command::ListRules(args) => cmd_list_rules(args),
        Command::Explain(args) => cmd_explain(args),
    }
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: "assetfix".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    }
}

fn cmd_run(
    catalogs: &[CatalogId],
    args: RunArgs,
    config_path: Option<Utf8PathBuf>,
) -> anyhow::Result<()> {
    let cwd = Utf8PathBuf::from(".");
    let file_config =
        config::resolve(config_path.as_deref(), &cwd).context("load assetfix.toml config")?;
    let merged = ConfigMerger::new(file_config).merge_run_args(
        &CliOverrides {
            root: args.root.as_deref(),
            extensions: &args.ext,
            exclude: &args.exclude,
            report_json: args.report_json.as_deref(),
            report_md: args.report_md.as_deref(),
        },
        DEFAULT_ROOT,
    );
    debug!(
        "merged config: root={}, extensions={:?}, exclude={:?}",
        merged.root, merged.extensions, merged.exclude
    );

    let plan = RewritePlan::for_catalogs(catalogs, &ApiBaseProfile::default())
        .context("load rule catalogs")?;
    let settings = RunSettings {
        root: merged.root.clone(),
        extensions: merged.extensions.clone(),
        exclude: merged.exclude.clone(),
        dry_run: args.dry_run,
        collect_patch: args.diff,
    };
    let walker = TreeWalker::new(plan, settings)?;

    let stdout = io::stdout();
    let mut reporter = ConsoleReporter::new(stdout.lock());
    let outcome = walker.run(&FsAssetStore, &mut reporter, tool_info())?;
    let mut out = reporter.into_inner();
    if args.diff && !outcome.patch.is_empty() {
        write!(out, "\n{}", outcome.patch).context("write diff")?;
        out.flush().context("flush diff")?;
    }
    drop(out);

    write_report_artifacts(
        &outcome,
        merged.report_json.as_deref(),
        merged.report_md.as_deref(),
        &FsWritePort,
    )
    .context("write report artifacts")?;

    Ok(())
}

fn cmd_list_rules(args: ListRulesArgs) -> anyhow::Result<()> {
    let ids: Vec<CatalogId> = match args.catalog {
        Some(id) => vec![id],
        None => CatalogId::ALL.to_vec(),
    };
    let plan = RewritePlan::for_catalogs(&ids, &ApiBaseProfile::default())
        .context("load rule catalogs")?;

    match args.format {
        OutputFormat::Text => {
            for set in &plan.rule_sets {
                println!(
                    "{} (label \"{}\", scope {}, {} rules)",
                    set.name(),
                    set.label(),
                    set.extensions().join(" "),
                    set.len()
                );
                for rule in set.rules() {
                    println!("  {:<40} {}", rule.id(), rule_kind(rule.matcher().is_literal()));
                }
                println!();
            }
            for fallback in &plan.fallbacks {
                println!(
                    "{} (label \"{}\", only {} when `{}` is present)",
                    fallback.name(),
                    fallback.label(),
                    fallback.file_name(),
                    fallback.marker()
                );
                println!();
            }
            println!("Use 'assetfix explain <catalog>' for details.");
        }
        OutputFormat::Json => {
            let mut catalogs: Vec<_> = plan.rule_sets.iter().map(rule_set_json).collect();
            catalogs.extend(plan.fallbacks.iter().map(|f| {
                serde_json::json!({
                    "name": f.name(),
                    "label": f.label(),
                    "file_name": f.file_name(),
                    "marker": f.marker(),
                    "endpoints": f.endpoints().iter().map(|e| serde_json::json!({
                        "from": e.from,
                        "to": e.to,
                    })).collect::<Vec<_>>(),
                })
            }));
            println!("{}", serde_json::to_string_pretty(&catalogs)?);
        }
    }
    Ok(())
}

fn rule_kind(literal: bool) -> &'static str {
    if literal { "literal" } else { "pattern" }
}

fn rule_set_json(set: &RuleSet) -> serde_json::Value {
    let rules: Vec<_> = set
        .rules()
        .iter()
        .map(|rule| {
            let (replacement_kind, replacement) = match rule.replacement() {
                Replacement::Literal(text) => ("literal", text.as_str()),
                Replacement::Template(text) => ("template", text.as_str()),
            };
            serde_json::json!({
                "id": rule.id(),
                "matcher": rule_kind(rule.matcher().is_literal()),
                "source": rule.matcher().source(),
                "replacement_kind": replacement_kind,
                "replacement": replacement,
            })
        })
        .collect();
    serde_json::json!({
        "name": set.name(),
        "label": set.label(),
        "extensions": set.extensions(),
        "rules": rules,
    })
}

fn cmd_explain(args: ExplainArgs) -> anyhow::Result<()> {
    use explain::{list_catalog_names, lookup_catalog};

    let Some(catalog) = lookup_catalog(&args.catalog) else {
        let available = list_catalog_names().join(", ");
        anyhow::bail!(
            "Unknown catalog: '{}'\n\nAvailable catalogs: {}",
            args.catalog,
            available
        );
    };

    println!("================================================================================");
    println!("CATALOG: {}", catalog.title);
    println!("================================================================================");
    println!();
    println!("Name:     {}", catalog.id.name());
    println!("Command:  assetfix {}", catalog.command);
    println!();

    println!("DESCRIPTION");
    println!("--------------------------------------------------------------------------------");
    println!("{}", catalog.description);
    println!();

    println!("RULE ORDER");
    println!("--------------------------------------------------------------------------------");
    println!("{}", catalog.ordering);
    println!();

    println!("REMEDIATION GUIDANCE");
    println!("--------------------------------------------------------------------------------");
    println!("{}", catalog.remediation);
    println!();

    Ok(())
}
