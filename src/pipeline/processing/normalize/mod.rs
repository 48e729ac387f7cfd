//! Canonicalization of free-text specialty labels.

use crate::types::NormalizationEntry;
use std::collections::HashMap;

/// Words kept lowercase wherever they appear, including first position.
const LOWERCASE_WORDS: [&str; 9] = ["de", "da", "do", "das", "dos", "e", "em", "para", "por"];

/// Fixed corrections checked before the general title-casing.
const PLACEHOLDER_LABEL: &str = "(medicina)";
const PLACEHOLDER_REPLACEMENT: &str = "Medicina";
const KNOWN_MISSPELLING: &str = "cancerologista cirurgíco";
const KNOWN_MISSPELLING_FIX: &str = "Cancerologista Cirúrgico";

/// Normalizes a specialty label to its presentable form.
///
/// ```
/// use clinicas::pipeline::processing::normalize::canonical_label;
///
/// assert_eq!(canonical_label("alergista e imunologista"), "Alergista e Imunologista");
/// assert_eq!(canonical_label("(medicina)"), "Medicina");
/// ```
pub fn canonical_label(label: &str) -> String {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return label.to_string();
    }

    if trimmed == PLACEHOLDER_LABEL {
        return PLACEHOLDER_REPLACEMENT.to_string();
    }
    if trimmed.to_lowercase() == KNOWN_MISSPELLING {
        return KNOWN_MISSPELLING_FIX.to_string();
    }

    trimmed
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            if LOWERCASE_WORDS.contains(&word) {
                word.to_string()
            } else {
                capitalize(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Upper-cases the first character. When that expands to several characters
/// (`ß` -> `SS`) only the first stays upper case, so the result is a fixed point.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut upper = first.to_uppercase();
    let mut out = String::with_capacity(word.len());
    out.extend(upper.next());
    for expanded in upper {
        out.extend(expanded.to_lowercase());
    }
    out.extend(chars);
    out
}

/// Memo of raw label -> canonical label for one pipeline run.
///
/// Each distinct raw label (compared byte for byte) is canonicalized once;
/// later occurrences reuse the stored result.
#[derive(Debug, Default)]
pub struct LabelDictionary {
    entries: Vec<NormalizationEntry>,
    index: HashMap<String, usize>,
}

impl LabelDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical form of `raw`, computing and recording it on first sight.
    pub fn canonicalize(&mut self, raw: &str) -> &str {
        let idx = self.index.get(raw).copied().unwrap_or(self.entries.len());
        if idx == self.entries.len() {
            self.entries.push(NormalizationEntry {
                especialidade_original: raw.to_string(),
                especialidade: canonical_label(raw),
            });
            self.index.insert(raw.to_string(), idx);
        }
        &self.entries[idx].especialidade
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered case-insensitively by raw label; ties keep the order
    /// in which the labels were first seen.
    pub fn into_sorted_entries(self) -> Vec<NormalizationEntry> {
        let mut entries = self.entries;
        entries.sort_by_cached_key(|entry| entry.especialidade_original.to_lowercase());
        entries
    }
}
