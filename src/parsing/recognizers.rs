//! Lightweight recognition of the fixed vocabulary: table names, setting
//! declarations, and the few markers with meaning inside a row.

use crate::language::{LocalSettingKind, SettingKind};

/// What a table header line names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableName {
    Settings,
    /// the old name of the settings table
    Metadata,
    Variables,
    TestCases,
    Tasks,
    Keywords,
    Comments,
    Other,
}

/// Lower case, single spaced; the form declarations are compared in.
fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn is_table_header(text: &str) -> bool {
    text.starts_with('*')
}

pub fn table_name(text: &str) -> TableName {
    let re = crate::compile!(r"^\*+\s*(.*?)\s*\**$");

    let name = match re.captures(text) {
        Some(captures) => match captures.get(1) {
            Some(name) => normalize(name.as_str()),
            None => return TableName::Other,
        },
        None => return TableName::Other,
    };

    match name.as_str() {
        "settings" | "setting" => TableName::Settings,
        "metadata" => TableName::Metadata,
        "variables" | "variable" => TableName::Variables,
        "test cases" | "test case" | "testcases" | "testcase" => TableName::TestCases,
        "tasks" | "task" => TableName::Tasks,
        "keywords" | "keyword" | "user keywords" | "user keyword" => TableName::Keywords,
        "comments" | "comment" => TableName::Comments,
        _ => TableName::Other,
    }
}

/// Recognize a declaration in the first cell of a Settings table line. The
/// second value is true for a deprecated spelling.
pub fn setting_declaration(text: &str) -> Option<(SettingKind, bool)> {
    let re = crate::compile!(r"^\s*([A-Za-z][A-Za-z ]*?)\s*:?\s*$");

    let captures = re.captures(text)?;
    let name = normalize(
        captures
            .get(1)?
            .as_str(),
    );

    SettingKind::DECLARABLE
        .iter()
        .find_map(|kind| {
            if normalize(kind.name()) == name {
                Some((*kind, false))
            } else if kind
                .deprecated_names()
                .iter()
                .any(|deprecated| normalize(deprecated) == name)
            {
                Some((*kind, true))
            } else {
                None
            }
        })
}

/// Whether a cell has the `[Name]` shape of a local setting, known or not.
pub fn is_local_setting(text: &str) -> bool {
    let re = crate::compile!(r"^\s*\[.*\]\s*$");

    re.is_match(text)
}

pub fn local_setting(text: &str) -> Option<(LocalSettingKind, bool)> {
    let re = crate::compile!(r"^\s*\[\s*([A-Za-z][A-Za-z ]*?)\s*\]\s*$");

    let captures = re.captures(text)?;
    let name = normalize(
        captures
            .get(1)?
            .as_str(),
    );
    let bare = |declared: &str| normalize(declared.trim_matches(|c| c == '[' || c == ']'));

    LocalSettingKind::DECLARABLE
        .iter()
        .find_map(|kind| {
            if bare(kind.name()) == name {
                Some((*kind, false))
            } else if kind
                .deprecated_names()
                .iter()
                .any(|deprecated| bare(deprecated) == name)
            {
                Some((*kind, true))
            } else {
                None
            }
        })
}

/// The library alias marker. Only this exact spelling counts.
pub fn is_alias_marker(text: &str) -> bool {
    text == "WITH NAME"
}

pub fn is_continuation_marker(text: &str) -> bool {
    text == "..."
}

/// `FOR`, or the older `:FOR` in any case and spacing.
pub fn is_for_loop(text: &str) -> bool {
    let re = crate::compile!(r"^(?:FOR|:\s*(?i:for))$");

    re.is_match(text)
}

/// The `END` closing a `FOR` loop. Only upper case counts.
pub fn is_for_end(text: &str) -> bool {
    text == "END"
}

pub fn is_in_marker(text: &str) -> bool {
    let re = crate::compile!(r"^(?i:in(?: range| enumerate| zip)?)$");

    re.is_match(text)
}
