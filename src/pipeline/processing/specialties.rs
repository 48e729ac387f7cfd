//! Extraction of clinic x CBO x specialty facts from the `dados_cbo` payload.
//!
//! The payload is a JSON object keyed by CBO code:
//!
//! ```json
//! {"225125": {"profissao": "Médico", "especialidades": ["cardiologia", "pediatria"]}}
//! ```

use crate::pipeline::processing::normalize::LabelDictionary;
use crate::types::SpecialtyFact;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct CboEntry {
    #[serde(default)]
    profissao: Option<String>,
    #[serde(default)]
    especialidades: Option<Vec<Value>>,
}

/// Parses a `dados_cbo` cell. Blank, malformed or non-object payloads give
/// `None`.
pub fn parse_payload(raw: &str) -> Option<Map<String, Value>> {
    if raw.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) => None,
        Err(e) => {
            debug!("Unparseable dados_cbo payload: {}", e);
            None
        }
    }
}

/// Emits one fact per (code, specialty) found in the payload, in payload
/// order, canonicalizing labels through `dictionary`.
///
/// Returns `None` when the payload itself is unusable; the row is then
/// skipped without failing the run.
pub fn extract_facts(
    cnpj: &str,
    payload: &str,
    dictionary: &mut LabelDictionary,
) -> Option<Vec<SpecialtyFact>> {
    let codes = parse_payload(payload)?;
    let mut facts = Vec::new();

    for (cbo, info) in codes {
        let entry: CboEntry = match serde_json::from_value(info) {
            Ok(entry) => entry,
            Err(e) => {
                debug!(cnpj, cbo = %cbo, "Skipping malformed CBO entry: {}", e);
                continue;
            }
        };

        let profissao = entry.profissao.as_deref().unwrap_or("").trim().to_string();

        for specialty in entry.especialidades.unwrap_or_default() {
            let Some(original) = specialty.as_str().map(str::trim) else {
                continue;
            };
            if original.is_empty() {
                continue;
            }
            let canonical = dictionary.canonicalize(original).to_string();
            facts.push(SpecialtyFact {
                cnpj: cnpj.to_string(),
                cbo: cbo.clone(),
                profissao: profissao.clone(),
                especialidade_original: original.to_string(),
                especialidade: canonical,
            });
        }
    }

    Some(facts)
}

/// Collapses facts sharing (cnpj, cbo, especialidade), keeping the first.
pub fn dedup_facts(facts: Vec<SpecialtyFact>) -> Vec<SpecialtyFact> {
    let mut seen = HashSet::new();
    facts
        .into_iter()
        .filter(|fact| {
            seen.insert((
                fact.cnpj.clone(),
                fact.cbo.clone(),
                fact.especialidade.clone(),
            ))
        })
        .collect()
}
