//! Generated type declaration artifact
//!
//! [`TypeTemplate`] is the render callback handed to the host: every call reads
//! the latest cached snapshot and rebuilds the declaration text from scratch.

use crate::cache::SnapshotCache;
use crate::infer::{interface_body, FormatTable, MergedOptions};

/// Artifact path relative to the host's build directory
pub const GENERATED_FILENAME: &str = "types/i18n-messages.d.ts";

const HEADER: &str = "// generated by i18n-typegen";

const FORMAT_IMPORTS: &str = "import type { DateTimeFormatOptions, NumberFormatOptions, SpecificNumberFormatOptions, CurrencyNumberFormatOptions } from '@intlify/core'";

const MODULE_AUGMENTATIONS: &str = "declare module 'vue-i18n' {
  export interface DefineLocaleMessage extends GeneratedLocaleMessage {}
  export interface DefineDateTimeFormat extends GeneratedDateTimeFormat {}
  export interface DefineNumberFormat extends GeneratedNumberFormat {}
}

declare module '@intlify/core' {
  export interface DefineCoreLocaleMessage extends GeneratedLocaleMessage {}
}

export {}";

/// Builds the full declaration source for a merged options snapshot
pub fn render_declaration(options: &MergedOptions) -> String {
    let messages = interface_body(&options.messages);
    let datetime_formats = format_entries(&options.datetime_formats, "DateTimeFormatOptions");
    let number_formats = format_entries(&options.number_formats, "NumberFormatOptions");

    format!(
        "{HEADER}
{FORMAT_IMPORTS}

interface GeneratedLocaleMessage {{
  {messages}
}}

interface GeneratedDateTimeFormat {{
  {datetime_formats}
}}

interface GeneratedNumberFormat {{
  {number_formats}
}}

{MODULE_AUGMENTATIONS}"
    )
}

fn format_entries(table: &FormatTable, type_name: &str) -> String {
    table
        .keys()
        .map(|name| format!("{name}: {type_name};"))
        .collect::<Vec<_>>()
        .join("\n  ")
}

/// Render callback for the generated declaration artifact
#[derive(Debug, Clone)]
pub struct TypeTemplate {
    cache: SnapshotCache,
}

impl TypeTemplate {
    pub fn new(cache: SnapshotCache) -> Self {
        Self { cache }
    }

    pub fn filename(&self) -> &'static str {
        GENERATED_FILENAME
    }

    /// Current artifact contents; empty until the first successful fetch
    pub fn get_contents(&self) -> String {
        match self.cache.latest() {
            Some(options) => render_declaration(&options),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infer::MessageTree;
    use serde_json::json;

    #[test]
    fn test_unset_cache_renders_empty() {
        let template = TypeTemplate::new(SnapshotCache::new());
        assert_eq!(template.get_contents(), "");
    }

    #[test]
    fn test_format_entries_joined_with_indent() {
        let options: MergedOptions = serde_json::from_value(json!({
            "datetimeFormats": {"short": {}, "long": {}},
            "numberFormats": {"currency": {}}
        }))
        .unwrap();
        let text = render_declaration(&options);
        assert!(text.contains(
            "interface GeneratedDateTimeFormat {\n  short: DateTimeFormatOptions;\n  long: DateTimeFormatOptions;\n}"
        ));
        assert!(text.contains("interface GeneratedNumberFormat {\n  currency: NumberFormatOptions;\n}"));
    }

    #[test]
    fn test_header_and_augmentations() {
        let text = render_declaration(&MergedOptions::default());
        assert!(text.starts_with("// generated by i18n-typegen\nimport type {"));
        assert!(text.contains("export interface DefineLocaleMessage extends GeneratedLocaleMessage {}"));
        assert!(text.contains("export interface DefineCoreLocaleMessage extends GeneratedLocaleMessage {}"));
        assert!(text.ends_with("export {}"));
    }

    #[test]
    fn test_template_reads_latest_snapshot() {
        let cache = SnapshotCache::new();
        let template = TypeTemplate::new(cache.clone());

        cache.store(MergedOptions::with_messages(MessageTree::object([("old", MessageTree::string("x"))])));
        assert!(template.get_contents().contains("\"old\": string;"));

        cache.store(MergedOptions::with_messages(MessageTree::object([("new", MessageTree::string("y"))])));
        let contents = template.get_contents();
        assert!(contents.contains("\"new\": string;"));
        assert!(!contents.contains("\"old\""));
    }
}
