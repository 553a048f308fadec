//! Item names from the game's text tables.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub const LANGUAGE_JP: usize = 0;
pub const LANGUAGE_EN: usize = 1;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameEntry {
    pub name: String,
    #[serde(rename = "str")]
    pub text: String,
}

/// A language-partitioned text table: `text[category][language]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameText {
    #[serde(default)]
    pub category_names: Vec<String>,
    #[serde(default)]
    pub text: Vec<Vec<Vec<NameEntry>>>,
}

impl NameText {
    fn category(&self, category: &str) -> Option<&Vec<Vec<NameEntry>>> {
        let index = self
            .category_names
            .iter()
            .position(|c| c.eq_ignore_ascii_case(category))?;
        self.text.get(index)
    }
}

/// Japanese and English names by item id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameDict {
    names: HashMap<u32, [String; 2]>,
}

impl NameDict {
    /// Names of one text category. Entries are keyed `No####`, or by a name
    /// found in `lookup`.
    pub fn from_text(text: &NameText, category: &str, lookup: Option<&HashMap<String, u32>>) -> Self {
        let mut dict = NameDict::default();
        dict.extend_from_text(text, category, lookup);
        dict
    }

    pub fn extend_from_text(
        &mut self,
        text: &NameText,
        category: &str,
        lookup: Option<&HashMap<String, u32>>,
    ) {
        let Some(languages) = text.category(category) else {
            log::debug!("No text category \"{}\"", category);
            return;
        };

        for (lang, entries) in languages.iter().enumerate().take(2) {
            for entry in entries {
                let id = lookup
                    .and_then(|l| l.get(&entry.name).copied())
                    .or_else(|| parse_item_id(&entry.name));

                match id {
                    Some(id) => {
                        self.names.entry(id).or_default()[lang] = entry.text.clone();
                    }
                    None => log::debug!("Failed to parse {} ID \"{}\"", category, entry.name),
                }
            }
        }
    }

    pub fn insert(&mut self, id: u32, name_jp: &str, name_en: &str) {
        self.names
            .insert(id, [name_jp.to_string(), name_en.to_string()]);
    }

    /// Names of an item, falling back to its base item (last digit zeroed).
    pub fn get(&self, id: u32) -> Option<&[String; 2]> {
        self.names.get(&id).or_else(|| self.names.get(&(id - id % 10)))
    }

    /// `(name_jp, name_en)`, empty when unknown.
    pub fn names(&self, id: u32) -> (String, String) {
        match self.get(id) {
            Some([jp, en]) => (jp.clone(), en.clone()),
            None => (String::new(), String::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn parse_item_id(name: &str) -> Option<u32> {
    let trimmed = name.trim();
    let digits = match trimmed.get(..2) {
        Some(prefix) if prefix.eq_ignore_ascii_case("no") => &trimmed[2..],
        _ => trimmed,
    };
    digits.trim().parse().ok()
}

/// Map of language key to face id from the face variation script.
///
/// The script pairs a `language = "..."` line with the `crop_name` line that
/// follows it; the crop name carries the id after a 7 character prefix.
pub fn parse_face_variation_script(script: &str) -> HashMap<String, u32> {
    let mut result = HashMap::new();
    let mut language: Option<String> = None;

    for line in script.trim_end_matches('\0').lines() {
        match language.take() {
            Some(lang) => {
                if line.contains("crop_name") {
                    if let Some(id) = quoted(line).and_then(|n| n.get(7..)).and_then(|n| n.parse().ok()) {
                        result.insert(lang, id);
                    }
                } else {
                    language = Some(lang);
                }
            }
            None => {
                if line.contains("language") {
                    language = quoted(line).map(str::to_string);
                }
            }
        }
    }

    result
}

fn quoted(line: &str) -> Option<&str> {
    line.split('"').nth(1).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, text: &str) -> NameEntry {
        NameEntry {
            name: name.to_string(),
            text: text.to_string(),
        }
    }

    fn text() -> NameText {
        NameText {
            category_names: vec!["basewear".into(), "facevariation".into()],
            text: vec![
                vec![
                    vec![entry("No100010", "ベース"), entry("bogus", "x")],
                    vec![entry("no100010", "Base"), entry("NO100020", "Other")],
                ],
                vec![vec![entry("face_a", "顔")], vec![entry("face_a", "Face A")]],
            ],
        }
    }

    #[test]
    fn names_by_id_with_base_fallback() {
        let dict = NameDict::from_text(&text(), "basewear", None);
        assert_eq!(dict.names(100010), ("ベース".to_string(), "Base".to_string()));
        assert_eq!(dict.names(100013), ("ベース".to_string(), "Base".to_string()));
        assert_eq!(dict.names(100020), (String::new(), "Other".to_string()));
        assert_eq!(dict.names(5), (String::new(), String::new()));
        assert_eq!(dict.len(), 2);
    }

    #[test]
    fn category_lookup_is_case_insensitive() {
        assert!(!NameDict::from_text(&text(), "BaseWear", None).is_empty());
        assert!(NameDict::from_text(&text(), "leg", None).is_empty());
    }

    #[test]
    fn lookup_table_keys() {
        let lookup = HashMap::from([("face_a".to_string(), 100001)]);
        let dict = NameDict::from_text(&text(), "facevariation", Some(&lookup));
        assert_eq!(dict.names(100001).1, "Face A");
    }

    #[test]
    fn face_variation_script() {
        let script = r#"
            {
                language = "face_a",
                other = 1,
                crop_name = "crop_fc100001",
            },
            {
                language = "face_b",
                crop_name = "",
            },
        "#;
        let map = parse_face_variation_script(script);
        assert_eq!(map.get("face_a"), Some(&100001));
        assert_eq!(map.len(), 1);
    }
}
