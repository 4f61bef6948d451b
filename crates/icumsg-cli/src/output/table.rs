//! Table formatting utilities for CLI output.

use comfy_table::{ContentArrangement, Table, presets};
use icumsg::translate::LanguageRange;

/// Coverage data for a single language.
pub struct LanguageCoverage {
    /// Language tag (e.g., "es", "pt-BR").
    pub language: String,
    /// Number of source keys translated.
    pub translated: usize,
    /// Source keys with no translation.
    pub missing: Vec<String>,
    /// Keys present in the translation but not in the source.
    pub extra: Vec<String>,
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

/// Format coverage data as an ASCII table.
pub fn format_coverage_table(source_count: usize, coverage: &[LanguageCoverage]) -> Table {
    let mut table = new_table(vec!["Language", "Coverage", "Missing", "Extra"]);
    for lang in coverage {
        table.add_row(vec![
            lang.language.clone(),
            format!("{}/{}", lang.translated, source_count),
            lang.missing.len().to_string(),
            lang.extra.len().to_string(),
        ]);
    }
    table
}

/// Format parsed `Accept-Language` ranges, marking the selected tag.
pub fn format_ranges_table(ranges: &[LanguageRange], selected: Option<&str>) -> Table {
    let mut table = new_table(vec!["Tag", "Quality", "Selected"]);
    for range in ranges {
        let is_selected = selected.is_some_and(|tag| tag.eq_ignore_ascii_case(&range.tag));
        table.add_row(vec![
            range.tag.clone(),
            format!("{:.3}", range.quality),
            if is_selected { "*".to_string() } else { String::new() },
        ]);
    }
    table
}
