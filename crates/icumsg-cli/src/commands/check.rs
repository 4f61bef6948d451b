//! Implementation of the `icumsg check` command.

use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use icumsg::MessageFormatter;
use icumsg::parser::parse_message;
use icumsg::translate::{LoadError, Resource};
use miette::{IntoDiagnostic, Report};
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::output::{ResourceDiagnostic, TemplateDiagnostic};

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Resource files to check (.toml)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON report for one file.
#[derive(Debug, Default, Serialize)]
struct FileReport {
    path: String,
    templates: usize,
    errors: Vec<ProblemJson>,
    warnings: Vec<ProblemJson>,
}

#[derive(Debug, Serialize)]
struct ProblemJson {
    key: Option<String>,
    message: String,
    line: Option<usize>,
    column: Option<usize>,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> miette::Result<i32> {
    let formatter = MessageFormatter::builder().cache_templates(false).build();
    let reports: Vec<FileReport> = args
        .files
        .iter()
        .map(|path| check_file(path, &formatter, args.json))
        .collect();

    let error_count: usize = reports.iter().map(|r| r.errors.len()).sum();
    let warning_count: usize = reports.iter().map(|r| r.warnings.len()).sum();
    let template_count: usize = reports.iter().map(|r| r.templates).sum();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports).into_diagnostic()?);
    } else if error_count == 0 {
        println!(
            "{} {template_count} template(s) in {} file(s) checked, {warning_count} warning(s)",
            "ok:".green().bold(),
            reports.len(),
        );
    } else {
        println!(
            "{} {error_count} error(s), {warning_count} warning(s) in {template_count} template(s)",
            "failed:".red().bold(),
        );
    }

    if error_count > 0 {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}

fn check_file(path: &Path, formatter: &MessageFormatter, json: bool) -> FileReport {
    let mut report = FileReport {
        path: path.display().to_string(),
        ..FileReport::default()
    };

    let content = match read_to_string(path) {
        Ok(content) => content,
        Err(source) => {
            let err = LoadError::Io {
                path: path.to_path_buf(),
                source,
            };
            if !json {
                eprintln!("{} {err}", "error:".red().bold());
            }
            report.errors.push(problem(None, err.to_string(), None));
            return report;
        }
    };

    let resource = match Resource::parse(&content) {
        Ok(resource) => resource,
        Err(source) => {
            let err = LoadError::Decode {
                path: path.to_path_buf(),
                source,
            };
            if !json {
                let diagnostic = ResourceDiagnostic::from_load_error(path, &content, &err);
                eprintln!("{:?}", Report::new(diagnostic));
            }
            report.errors.push(problem(None, err.to_string(), None));
            return report;
        }
    };

    let language = resource.tag.clone().unwrap_or_else(|| file_stem(path));
    if let Some(base) = &resource.base {
        let base_path = path.with_file_name(format!("{base}.toml"));
        if !base_path.exists() {
            let message = format!("base resource '{}' does not exist", base_path.display());
            if !json {
                eprintln!("{} {}: {message}", "warning:".yellow().bold(), path.display());
            }
            report.warnings.push(problem(None, message, None));
        }
    }

    for (key, template) in &resource.translations {
        report.templates += 1;
        match parse_message(template) {
            Ok(message) => {
                for warning in formatter.lint(&message, &language) {
                    if !json {
                        eprintln!(
                            "{} {} [{}]: {warning}",
                            "warning:".yellow().bold(),
                            path.display(),
                            key.bold(),
                        );
                    }
                    report
                        .warnings
                        .push(problem(Some(key.as_str()), warning.to_string(), None));
                }
            }
            Err(e) => {
                if !json {
                    let name = format!("{} [{key}]", path.display());
                    let diagnostic = TemplateDiagnostic::from_parse_error(&name, template, &e);
                    eprintln!("{:?}", Report::new(diagnostic));
                }
                report
                    .errors
                    .push(problem(Some(key.as_str()), e.message().to_string(), Some(e.position())));
            }
        }
    }
    report
}

fn problem(key: Option<&str>, message: String, position: Option<(usize, usize)>) -> ProblemJson {
    ProblemJson {
        key: key.map(str::to_string),
        message,
        line: position.map(|(line, _)| line),
        column: position.map(|(_, column)| column),
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
