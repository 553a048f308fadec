use std::collections::BTreeMap;
use std::path::Path;

use crate::object_info::{ModelPart, ObjectCategory, ObjectInfo, ObjectType};

use super::ColorId;

/// Per-object color slots, keyed by table category then object id.
///
/// Loaded from `ColorChannels.json`:
/// `{"basewear": {"100010": [3, 4]}, "hair": {...}}`.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(transparent)]
pub struct ColorChannelTable {
    categories: BTreeMap<String, BTreeMap<String, Vec<i64>>>,
}

impl ColorChannelTable {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)?;
        let table = serde_json::from_reader(std::io::BufReader::new(file))?;
        Ok(table)
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Color slots used by the object, falling back to the generic slots of
    /// its kind when the table has no entry.
    pub fn object_channels(&self, info: &ObjectInfo) -> Vec<ColorId> {
        if let Some(indices) = self.lookup(info) {
            let colors = indices
                .iter()
                .filter_map(|i| match ColorId::try_from(*i) {
                    Ok(c) => Some(c),
                    Err(e) => {
                        log::warn!("{}: {}", info.name, e);
                        None
                    }
                })
                .collect::<Vec<_>>();
            log::debug!("Colors for {:?} = {:?}", info.object_id, colors);
            return colors;
        }

        fallback_channels(info)
    }

    fn lookup(&self, info: &ObjectInfo) -> Option<&Vec<i64>> {
        let id = info.object_id?.to_string();
        // Variants share the entry of their base item (last digit zeroed).
        let base_id = format!("{}0", &id[..id.len() - 1]);

        search_categories(info)
            .iter()
            .filter_map(|category| self.categories.get(*category))
            .find_map(|items| {
                items
                    .get(&id)
                    .filter(|v| !v.is_empty())
                    .or_else(|| items.get(&base_id).filter(|v| !v.is_empty()))
            })
    }
}

fn search_categories(info: &ObjectInfo) -> &'static [&'static str] {
    if info.category != Some(ObjectCategory::Player) {
        return &[];
    }

    if info.object_type == Some(ObjectType::NgsHair) {
        return &["hair"];
    }

    match info.part {
        Some(ModelPart::NgsBasewear) => &["basewear", "costume"],
        Some(ModelPart::NgsOuterwear) => &["outerwear"],
        Some(ModelPart::NgsCastArms) => &["castarm"],
        Some(ModelPart::NgsCastLegs) => &["castleg"],
        Some(ModelPart::NgsCastBody) => &["costume"],
        _ => &[],
    }
}

fn fallback_channels(info: &ObjectInfo) -> Vec<ColorId> {
    if info.category != Some(ObjectCategory::Player) {
        return vec![];
    }

    if info.is_outerwear() {
        vec![ColorId::Outer1, ColorId::Outer2]
    } else if info.is_basewear() {
        vec![ColorId::Base1, ColorId::Base2]
    } else if info.is_innerwear() {
        vec![ColorId::Inner1, ColorId::Inner2]
    } else if info.is_cast_part() {
        vec![ColorId::Cast1, ColorId::Cast2, ColorId::Cast3, ColorId::Cast4]
    } else if info.is_hair() {
        vec![ColorId::Hair1, ColorId::Hair2]
    } else {
        vec![]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ColorChannelTable {
        ColorChannelTable::from_json(
            r#"{
                "basewear": {"100010": [3, 4, 11]},
                "costume": {"100020": [1]},
                "hair": {"100000": [17]}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn exact_and_base_id_lookup() {
        let table = table();

        let info = ObjectInfo::from_file_name("pl_rbd_100010_bw.aqp");
        assert_eq!(
            table.object_channels(&info),
            vec![ColorId::Base1, ColorId::Base2, ColorId::MainSkin]
        );

        let variant = ObjectInfo::from_file_name("pl_rhr_100003.aqp");
        assert_eq!(table.object_channels(&variant), vec![ColorId::Hair1]);

        // Second search category
        let costume = ObjectInfo::from_file_name("pl_rbd_100020_bw.aqp");
        assert_eq!(table.object_channels(&costume), vec![ColorId::Outer1]);
    }

    #[test]
    fn falls_back_by_kind() {
        let table = ColorChannelTable::default();

        let outer = ObjectInfo::from_file_name("pl_rbd_100050_ow.aqp");
        assert_eq!(
            table.object_channels(&outer),
            vec![ColorId::Outer1, ColorId::Outer2]
        );

        let cast = ObjectInfo::from_file_name("pl_rbd_300050_rm.aqp");
        assert_eq!(table.object_channels(&cast).len(), 4);

        let weapon = ObjectInfo::from_file_name("wp_r_01_02.aqp");
        assert!(table.object_channels(&weapon).is_empty());
    }
}
