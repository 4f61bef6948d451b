//! Implementation of the `icumsg negotiate` command.

use std::path::PathBuf;

use icumsg::translate::{Bundle, LanguageRange, parse_accept_language};
use miette::IntoDiagnostic;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::output::table::format_ranges_table;

/// Arguments for the negotiate command.
#[derive(Debug, clap::Args)]
pub struct NegotiateArgs {
    /// Directory containing `<tag>.toml` resources.
    #[arg(long, env = "ICUMSG_DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Accept-Language header value (e.g., "de-CH, de;q=0.9, en;q=0.5")
    #[arg(long = "accept-language", required = true)]
    pub accept_language: String,

    /// Tag used when no range matches a resource
    #[arg(long = "default", default_value = "en")]
    pub default_language: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct NegotiationJson<'a> {
    ranges: &'a [LanguageRange],
    selected: Option<&'a str>,
    language: &'a str,
}

/// Run the negotiate command.
pub fn run_negotiate(args: NegotiateArgs) -> miette::Result<i32> {
    let bundle = Bundle::builder()
        .directory(args.dir.clone())
        .default_language(args.default_language.clone())
        .build();
    let ranges = parse_accept_language(&args.accept_language);
    let selected = bundle.select_language(&args.accept_language);
    let language = selected.as_deref().unwrap_or(bundle.default_language());

    if args.json {
        let output = NegotiationJson {
            ranges: &ranges,
            selected: selected.as_deref(),
            language,
        };
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
        return Ok(exitcode::OK);
    }

    if !ranges.is_empty() {
        println!("{}", format_ranges_table(&ranges, selected.as_deref()));
    }
    match &selected {
        Some(tag) => println!("{} {tag}", "selected:".green().bold()),
        None => println!(
            "{} {language} (no range matched a resource in {})",
            "default:".yellow().bold(),
            bundle.directory().display(),
        ),
    }
    Ok(exitcode::OK)
}
