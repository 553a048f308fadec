// Object catalog: rebuild, persistence and lookups against an on-disk database

use std::collections::BTreeMap;

use pso2_tools_lib::cmx::{
    self, CatalogError, CmxData, CmxDict, CmxFileName, CmxObject, CmxSource, NameText, ObjectCatalog,
    RawCmxObject, Table, CATALOG_FILE,
};

#[path = "common/mod.rs"]
mod common;

/// Wraps a dump and fails one dictionary the way a broken extractor would
struct FailingSource {
    data: CmxData,
    failing: CmxDict,
    unavailable: bool,
}

impl CmxSource for FailingSource {
    fn objects(&self, dict: CmxDict) -> Result<&BTreeMap<u32, RawCmxObject>, CatalogError> {
        if dict != self.failing {
            return self.data.objects(dict);
        }
        if self.unavailable {
            Err(CatalogError::SourceUnavailable {
                path: "character/making/hair.cmx".into(),
                reason: "archive missing".to_string(),
            })
        } else {
            Err(CatalogError::Io(std::io::Error::other("truncated archive")))
        }
    }

    fn id_link(&self, dict: CmxDict, id: u32) -> Option<u32> {
        self.data.id_link(dict, id)
    }

    fn parts_text(&self) -> &NameText {
        self.data.parts_text()
    }

    fn accessory_text(&self) -> &NameText {
        self.data.accessory_text()
    }

    fn face_variation_script(&self) -> Option<&str> {
        self.data.face_variation_script()
    }
}

fn snapshot(catalog: &ObjectCatalog) -> Vec<CmxObject> {
    catalog.get_all(None).expect("Failed to read catalog")
}

#[test]
fn rebuild_is_repeatable() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = ObjectCatalog::open(dir.path()).unwrap();
    assert!(dir.path().join(CATALOG_FILE).exists());

    let first = catalog.build(&common::sample_cmx()).unwrap();
    let rows = snapshot(&catalog);

    let second = catalog.build(&common::sample_cmx()).unwrap();
    assert_eq!(first.tables, second.tables);
    assert_eq!(snapshot(&catalog), rows);

    assert_eq!(first.total(), 9);
    assert_eq!(first.skipped, 0);
    assert_eq!(catalog.count(Table::Hair).unwrap(), 2);
}

#[test]
fn catalog_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let catalog = ObjectCatalog::open(dir.path()).unwrap();
        catalog.build(&common::sample_cmx()).unwrap();
    }

    let catalog = ObjectCatalog::open(dir.path()).unwrap();
    let accessories = catalog.get_accessories(None).unwrap();
    assert_eq!(accessories.len(), 1);
    assert_eq!(accessories[0].name(), "Halo");

    let CmxObject::Accessory(halo) = &accessories[0] else {
        panic!("expected an accessory record");
    };
    assert_eq!(halo.node_attach[0], "head");
    assert_eq!(halo.effect_name, "eff_glow");
}

#[test]
fn failed_rebuild_keeps_previous_catalog() {
    let catalog = ObjectCatalog::open_in_memory().unwrap();
    catalog.build(&common::sample_cmx()).unwrap();
    let before = snapshot(&catalog);

    let mut changed = common::sample_cmx();
    changed.objects.remove(&CmxDict::Basewear);
    let source = FailingSource {
        data: changed,
        failing: CmxDict::Hair,
        unavailable: false,
    };

    let err = catalog.build(&source).unwrap_err();
    assert!(matches!(err, CatalogError::Io(_)));
    assert_eq!(snapshot(&catalog), before);
    assert_eq!(catalog.count(Table::Basewear).unwrap(), 2);
}

#[test]
fn unavailable_dictionary_is_skipped() {
    let catalog = ObjectCatalog::open_in_memory().unwrap();
    let source = FailingSource {
        data: common::sample_cmx(),
        failing: CmxDict::Hair,
        unavailable: true,
    };

    let summary = catalog.build(&source).unwrap();
    assert_eq!(catalog.count(Table::Hair).unwrap(), 0);
    assert_eq!(catalog.count(Table::Basewear).unwrap(), 2);
    assert!(!summary.tables.contains_key(&Table::Hair));
}

#[test]
fn names_and_links() {
    let catalog = ObjectCatalog::open_in_memory().unwrap();
    catalog.build(&common::sample_cmx()).unwrap();

    let hair = catalog.get_hair(None).unwrap();
    // Japanese name only, then no name at all.
    assert_eq!(hair[0].name(), "髪");
    assert_eq!(hair[1].name(), "Unnamed 100002");
    assert_eq!(hair[0].get_colors().len(), 2);
    assert!(hair[1].get_colors().is_empty());

    let linked = catalog.get_basewear(Some(100011)).unwrap();
    let CmxObject::Body(body) = &linked[0] else {
        panic!("expected a body record");
    };
    assert_eq!(body.base.adjusted_id, 100010);
    assert_eq!(body.base.name_en, "Base Suit");
    assert_eq!(body.sound_id, None);

    let CmxObject::Body(base) = &catalog.get_basewear(Some(100010)).unwrap()[0] else {
        panic!("expected a body record");
    };
    assert_eq!(base.sound_id, Some(5));
    // Sound archives are not part of the model.
    let files = catalog.get_basewear(Some(100010)).unwrap()[0].get_files();
    assert_eq!(files.len(), 2);
    assert!(files.iter().all(|f| *f != base.sound_file));

    assert_eq!(catalog.get_costumes(None).unwrap().len(), 1);
    assert_eq!(catalog.get_cast_bodies(None).unwrap()[0].id(), 40001);
}

#[test]
fn linked_inner_file_follows_linked_id() {
    let source = CmxData::from_json(
        r#"{
            "objects": {
                "basewear": {
                    "100010": {"body": {"linkedInnerId": -1}},
                    "100020": {"body": {"linkedInnerId": 100030}}
                }
            }
        }"#,
    )
    .unwrap();

    let catalog = ObjectCatalog::open_in_memory().unwrap();
    catalog.build(&source).unwrap();

    let CmxObject::Body(unlinked) = &catalog.get_basewear(Some(100010)).unwrap()[0] else {
        panic!("expected a body record");
    };
    assert_eq!(unlinked.linked_inner_id, None);
    assert!(unlinked.linked_inner_file.is_empty());
    assert_eq!(unlinked.linked_inner_file.name(), "");

    let CmxObject::Body(linked) = &catalog.get_basewear(Some(100020)).unwrap()[0] else {
        panic!("expected a body record");
    };
    assert_eq!(linked.linked_inner_id, Some(100030));
    assert_eq!(
        linked.linked_inner_file.name(),
        "character/making_reboot/pl_b1_100030.ice"
    );
    assert_eq!(linked.file.name(), "character/making_reboot/pl_bw_100020.ice");
}

#[test]
fn lookup_by_hash_and_model_name() {
    let catalog = ObjectCatalog::open_in_memory().unwrap();
    catalog.build(&common::sample_cmx()).unwrap();

    let inner = catalog.get_innerwear(Some(100010)).unwrap();
    let file: &CmxFileName = inner[0].file();
    let found = catalog.find_by_file_hash(&file.hash().to_uppercase()).unwrap();
    assert!(found.iter().any(|o| o.table() == Table::Innerwear));

    let guessed = cmx::guess_object(&catalog, "pl_rbd_100010_bw.aqp").unwrap().unwrap();
    assert_eq!(guessed.table(), Table::Basewear);
    assert_eq!(guessed.id(), 100010);

    assert!(cmx::guess_object(&catalog, "pl_rhr_999999.aqp").unwrap().is_none());
    assert!(cmx::guess_object(&catalog, "readme.txt").unwrap().is_none());
}
