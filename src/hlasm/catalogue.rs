//! Macro/field catalogue.
//!
//! Loaded once at `initialize` from `<data-dir>/macros.json`. Loading is
//! tolerant: a missing or malformed file yields an empty catalogue rather
//! than an error, since the analysis core is fully usable without it (it
//! only ever sharpens hovers and completions, never gates them).

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct MacroDef {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub parameters: Vec<String>,
    #[serde(default)]
    pub source: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct FieldDef {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    #[serde(rename = "fieldType")]
    pub field_type: String,
    #[serde(default)]
    #[serde(rename = "storageType")]
    pub storage_type: String,
    #[serde(default)]
    pub length: i64,
    #[serde(default)]
    pub parent: String,
    #[serde(default)]
    pub description: String,
    /// Name of the enclosing control block, filled in by the loader (not
    /// read from the per-field JSON object): each field lives inside a
    /// `controlBlocks.<cb>` entry that names its own control block once.
    #[serde(skip)]
    pub control_block: String,
}

#[derive(Deserialize)]
struct ControlBlockEntry {
    #[serde(default)]
    fields: Vec<FieldDef>,
}

#[derive(Default, Deserialize)]
struct CatalogueFile {
    #[serde(default)]
    macros: Vec<MacroDef>,
    #[serde(default, rename = "controlBlocks")]
    control_blocks: HashMap<String, ControlBlockEntry>,
}

#[derive(Clone, Debug, Default)]
pub struct Catalogue {
    macros: HashMap<String, MacroDef>,
    fields: HashMap<String, FieldDef>,
}

impl Catalogue {
    /// Load `macros.json` from `data_dir`. Any failure (missing file,
    /// unreadable, malformed JSON) is logged at `warn` level and produces
    /// an empty catalogue; it is never propagated to the caller.
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("macros.json");
        let text = match std::fs::read_to_string(&path) {
            Ok(t) => t,
            Err(e) => {
                log::warn!("could not read catalogue {}: {e}", path.display());
                return Self::default();
            }
        };
        let parsed: CatalogueFile = match serde_json::from_str(&text) {
            Ok(p) => p,
            Err(e) => {
                log::warn!("could not parse catalogue {}: {e}", path.display());
                return Self::default();
            }
        };

        let macros = parsed.macros.into_iter().map(|m| (m.name.to_uppercase(), m)).collect();

        // Field names from different control blocks share one namespace;
        // the last control block walked for a given name wins.
        let mut fields = HashMap::new();
        for (cb, entry) in parsed.control_blocks {
            for mut field in entry.fields {
                field.control_block = cb.clone();
                fields.insert(field.name.to_uppercase(), field);
            }
        }

        log::debug!("loaded catalogue from {}: {} macros, {} fields", path.display(), macros.len(), fields.len());
        Self { macros, fields }
    }

    pub fn find_macro(&self, name: &str) -> Option<&MacroDef> {
        self.macros.get(&name.to_uppercase())
    }

    pub fn find_field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.get(&name.to_uppercase())
    }

    pub fn macro_names(&self) -> impl Iterator<Item = &str> {
        self.macros.values().map(|m| m.name.as_str())
    }
}

#[cfg(test)]
mod catalogue_test {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_empty_catalogue() {
        let dir = tempfile::tempdir().unwrap();
        let cat = Catalogue::load(dir.path());
        assert!(cat.find_macro("ANYTHING").is_none());
    }

    #[test]
    fn malformed_json_yields_empty_catalogue() {
        let dir = tempfile::tempdir().unwrap();
        let mut f = std::fs::File::create(dir.path().join("macros.json")).unwrap();
        write!(f, "{{ not json").unwrap();
        let cat = Catalogue::load(dir.path());
        assert!(cat.find_macro("ANYTHING").is_none());
    }

    #[test]
    fn loads_macros_and_fields_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        let mut f = std::fs::File::create(dir.path().join("macros.json")).unwrap();
        write!(
            f,
            r#"{{
                "macros": [{{"name": "SAVE", "description": "save registers", "category": "housekeeping", "parameters": ["area"], "source": "save.mac"}}],
                "controlBlocks": {{
                    "DCB": {{ "fields": [{{"name": "FLDA", "fieldType": "CHAR", "storageType": "static", "length": 8, "parent": "DCB", "description": "a field"}}] }}
                }}
            }}"#
        )
        .unwrap();
        let cat = Catalogue::load(dir.path());
        let m = cat.find_macro("save").expect("macro expected");
        assert_eq!(m.description, "save registers");
        assert_eq!(m.parameters, vec!["area".to_string()]);
        let f = cat.find_field("flda").expect("field expected");
        assert_eq!(f.control_block, "DCB");
        assert_eq!(f.length, 8);
    }

    #[test]
    fn missing_keys_default_to_empty_or_zero() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("macros.json"),
            r#"{"macros":[{"name":"SAVE"}],"controlBlocks":{"TCB":{"fields":[{"name":"FLDB"}]}}}"#,
        )
        .unwrap();
        let cat = Catalogue::load(dir.path());
        let m = cat.find_macro("SAVE").unwrap();
        assert_eq!(m.description, "");
        assert!(m.parameters.is_empty());
        let f = cat.find_field("FLDB").unwrap();
        assert_eq!(f.length, 0);
        assert_eq!(f.control_block, "TCB");
    }

    #[test]
    fn duplicate_field_names_across_control_blocks_last_wins() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("macros.json"),
            r#"{"controlBlocks":{
                "DCB":{"fields":[{"name":"LEN","description":"dcb length"}]},
                "TCB":{"fields":[{"name":"LEN","description":"tcb length"}]}
            }}"#,
        )
        .unwrap();
        let cat = Catalogue::load(dir.path());
        // Both control blocks declare LEN; exactly one survives, unreported.
        assert!(cat.find_field("LEN").is_some());
    }
}
