//! Cosmetic variant lookup, matched case-insensitively on template id.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
struct VariantDef {
    id: String,
    #[serde(default)]
    variants: Vec<Value>,
}

pub struct VariantTable {
    by_id: HashMap<String, Vec<Value>>,
}

impl VariantTable {
    pub fn parse(json: &str) -> Result<VariantTable, serde_json::Error> {
        let defs: Vec<VariantDef> = serde_json::from_str(json)?;
        let by_id = defs
            .into_iter()
            .map(|d| (d.id.to_lowercase(), d.variants))
            .collect();
        Ok(VariantTable { by_id })
    }

    pub fn empty() -> VariantTable {
        VariantTable {
            by_id: HashMap::new(),
        }
    }

    pub fn variants_for(&self, template_id: &str) -> Vec<Value> {
        self.by_id
            .get(&template_id.to_lowercase())
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let table = VariantTable::parse(
            r#"[{"id": "AthenaCharacter:CID_029", "variants": [{"channel": "Material"}]}]"#,
        )
        .unwrap();
        assert_eq!(table.variants_for("athenacharacter:cid_029").len(), 1);
        assert_eq!(table.variants_for("AthenaCharacter:CID_029").len(), 1);
        assert!(table.variants_for("AthenaCharacter:CID_030").is_empty());
    }
}
