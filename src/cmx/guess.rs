use std::path::Path;

use super::catalog::ObjectCatalog;
use super::records::{CmxObject, Table};
use super::CatalogError;

/// Catalog table and id a model file name refers to.
///
/// NGS models are named `pl_{type}_{id}[_{part}]`, classic body models
/// `pl_bd_{id}_{x}_{x}_{part}` and other classic parts `pl_{type}_{id}_...`.
pub fn object_key(aqp_name: &str) -> Option<(Table, u32)> {
    let stem = Path::new(aqp_name).file_stem()?.to_str()?.to_ascii_lowercase();
    let parts: Vec<&str> = stem.split('_').collect();

    let (table, id) = match parts.as_slice() {
        ["pl", "rac", id] | ["pl", "ah", id, ..] => (Table::Accessories, id),
        ["pl", "rbd", id, "bw"] | ["pl", "bd", id, _, _, "bw"] => (Table::Basewear, id),
        ["pl", "rbd", id, "ow"] | ["pl", "bd", id, _, _, "ow"] => (Table::Outerwear, id),
        ["pl", "bd", id, _, _, "xx"] => (Table::Costumes, id),
        ["pl", "rbd", id, "bd"] | ["pl", "bd", id, _, _, "tr"] => (Table::CastBodies, id),
        ["pl", "rbd", id, "rm"] | ["pl", "bd", id, _, _, "rm"] => (Table::CastArms, id),
        ["pl", "rbd", id, "lg"] | ["pl", "bd", id, _, _, "lg"] => (Table::CastLegs, id),
        ["pl", "rdt", id] => (Table::Teeth, id),
        ["pl", "rea", id] => (Table::Ears, id),
        ["pl", "rhd", id] | ["pl", "hd", id, ..] => (Table::Faces, id),
        ["pl", "rhn", id] => (Table::Horns, id),
        ["pl", "rhr", id] | ["pl", "hr", id, ..] => (Table::Hair, id),
        _ => return None,
    };

    Some((table, id.parse().ok()?))
}

/// Best catalog match for a model file, if any.
pub fn guess_object(
    catalog: &ObjectCatalog,
    aqp_name: &str,
) -> Result<Option<CmxObject>, CatalogError> {
    let Some((table, id)) = object_key(aqp_name) else {
        log::debug!("No catalog table for {}", aqp_name);
        return Ok(None);
    };

    Ok(catalog.query(table, Some(id))?.into_iter().next())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_names() {
        assert_eq!(
            object_key("pl_rbd_100010_bw.aqp"),
            Some((Table::Basewear, 100010))
        );
        assert_eq!(
            object_key("models/pl_bd_20001_a_b_ow.aqp"),
            Some((Table::Outerwear, 20001))
        );
        assert_eq!(
            object_key("pl_bd_00100_x_x_xx.aqp"),
            Some((Table::Costumes, 100))
        );
        assert_eq!(object_key("pl_rhr_100001.aqp"), Some((Table::Hair, 100001)));
        assert_eq!(object_key("pl_hr_00042_x.aqp"), Some((Table::Hair, 42)));
        assert_eq!(object_key("pl_rac_300000.aqp"), Some((Table::Accessories, 300000)));
    }

    #[test]
    fn unknown_names() {
        assert_eq!(object_key("pl_rbd_100010_bw_l2.aqp"), None);
        assert_eq!(object_key("pl_rbd_abc_bw.aqp"), None);
        assert_eq!(object_key("ob_0000_0001.aqp"), None);
        assert_eq!(object_key(""), None);
    }
}
