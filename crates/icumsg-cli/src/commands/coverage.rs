//! Coverage command implementation.

use std::collections::BTreeSet;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use clap::Args;
use icumsg::translate::{Bundle, LoadError, Resource};
use miette::{IntoDiagnostic, Result, miette};
use serde::Serialize;

use crate::output::ResourceDiagnostic;
use crate::output::table::{LanguageCoverage, format_coverage_table};

/// Arguments for the coverage command.
#[derive(Debug, Args)]
pub struct CoverageArgs {
    /// Directory containing `<tag>.toml` resources.
    #[arg(long, env = "ICUMSG_DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Source language tag whose keys define completeness.
    #[arg(long, default_value = "en")]
    pub source: String,

    /// Languages to check (comma-separated). Defaults to every resource
    /// in the directory except the source.
    #[arg(long, value_delimiter = ',')]
    pub lang: Vec<String>,

    /// Exit with non-zero code if any translation is incomplete.
    #[arg(long)]
    pub strict: bool,

    /// Output results as JSON.
    #[arg(long)]
    pub json: bool,
}

/// JSON output format for coverage data.
#[derive(Debug, Serialize)]
struct CoverageJson {
    language: String,
    translated: usize,
    total: usize,
    missing: Vec<String>,
    extra: Vec<String>,
}

/// Run the coverage command.
pub fn run_coverage(args: CoverageArgs) -> Result<i32> {
    let bundle = Bundle::builder().directory(args.dir.clone()).build();
    let source_path = bundle.resource_path(&args.source);
    let Some(source_keys) = read_keys(&source_path)? else {
        return Err(miette!(
            "source resource {} does not exist",
            source_path.display()
        ));
    };
    let source_count = source_keys.len();

    let languages = if args.lang.is_empty() {
        bundle
            .available_languages()
            .into_diagnostic()?
            .into_iter()
            .filter(|tag| *tag != args.source)
            .collect()
    } else {
        args.lang.clone()
    };

    let mut coverage_data: Vec<LanguageCoverage> = Vec::new();
    for lang in &languages {
        let path = bundle.resource_path(lang);
        // A missing file means every source key is missing.
        let keys = read_keys(&path)?.unwrap_or_default();
        let missing: Vec<String> = source_keys.difference(&keys).cloned().collect();
        let extra: Vec<String> = keys.difference(&source_keys).cloned().collect();
        coverage_data.push(LanguageCoverage {
            language: lang.clone(),
            translated: source_count - missing.len(),
            missing,
            extra,
        });
    }

    let any_incomplete = coverage_data.iter().any(|c| !c.missing.is_empty());

    if args.json {
        let json_data: Vec<CoverageJson> = coverage_data
            .iter()
            .map(|c| CoverageJson {
                language: c.language.clone(),
                translated: c.translated,
                total: source_count,
                missing: c.missing.clone(),
                extra: c.extra.clone(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&json_data).into_diagnostic()?);
    } else {
        println!("{}", format_coverage_table(source_count, &coverage_data));
        for lang_coverage in &coverage_data {
            if !lang_coverage.missing.is_empty() {
                println!("\nMissing in {}:", lang_coverage.language);
                for name in &lang_coverage.missing {
                    println!("  - {name}");
                }
            }
            if !lang_coverage.extra.is_empty() {
                println!("\nNot in {} but in {}:", args.source, lang_coverage.language);
                for name in &lang_coverage.extra {
                    println!("  - {name}");
                }
            }
        }
    }

    if args.strict && any_incomplete {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}

/// Keys of a resource file, or `None` when the file does not exist.
fn read_keys(path: &Path) -> Result<Option<BTreeSet<String>>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = read_to_string(path)
        .into_diagnostic()
        .map_err(|e| miette!("failed to read {}: {e}", path.display()))?;
    match Resource::parse(&content) {
        Ok(resource) => Ok(Some(resource.translations.into_keys().collect())),
        Err(source) => {
            let err = LoadError::Decode {
                path: path.to_path_buf(),
                source,
            };
            Err(ResourceDiagnostic::from_load_error(path, &content, &err).into())
        }
    }
}
