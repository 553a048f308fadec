// File list directory: spreadsheets on disk to file groups and the browser tree

use pso2_tools_lib::filelist::{self, FileGroup, ItemCategory, Variant};
use pso2_tools_lib::object_info::{ModelPart, ObjectType};

#[path = "common/mod.rs"]
mod common;

const BASEWEAR_HEADER: &str =
    "Id,Adjusted Id,English Name,Japanese Name,Material Anim,High Quality,Normal Quality,Normal Quality RP,HQ Linked Inner,Linked Inner";

fn sample_root() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();

    // Exported with a BOM, as the spreadsheet tool writes them.
    common::write_sheet(
        dir.path(),
        "Player/NGS/MaleNGSBasewear.csv",
        &format!(
            "\u{feff}{BASEWEAR_HEADER}\n\
             100010,100010,Base Suit,ベース,anim_a,hq_a,nq_a,,hq_inner,nq_inner\n\
             100011,100010,,ベース改,,,,rp_b,,\n\
             100012,,,,,,,,,\n"
        ),
    );
    common::write_sheet(
        dir.path(),
        "Player/Accessories.csv",
        "Id,English Name,Normal Quality\n300000,Halo,ac_halo\n",
    );
    common::write_sheet(
        dir.path(),
        "Player/MagsNGS.csv",
        "1,Mag Alpha,x,mag_alpha\n2,Mag Beta,x,(Not found)\n",
    );
    dir
}

fn groups(root: &std::path::Path) -> Vec<FileGroup> {
    filelist::file_groups(root).collect()
}

#[test]
fn reads_every_sheet_present() {
    let root = sample_root();
    let groups = groups(root.path());

    let names: Vec<_> = groups.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["Base Suit", "ベース改 (100011)", "Halo", "Mag Alpha"]);

    let base = &groups[0];
    assert_eq!(base.category, ItemCategory::NgsOutfit);
    assert_eq!(base.object_type, Some(ObjectType::NgsBody));
    assert_eq!(base.part, Some(ModelPart::NgsBasewear));
    assert_eq!(base.object_id, 100010);
    assert_eq!(base.files[&Variant::HighQuality], vec!["anim_a", "hq_inner", "hq_a"]);
    assert_eq!(base.files[&Variant::NormalQuality], vec!["anim_a", "nq_inner", "nq_a"]);

    // Missing cells come from the row named by Adjusted Id.
    let variant = &groups[1];
    assert_eq!(variant.variants(), vec![Variant::Replacement]);
    assert_eq!(variant.files[&Variant::Replacement], vec!["anim_a", "nq_inner", "rp_b"]);

    let mag = &groups[3];
    assert_eq!(mag.category, ItemCategory::NgsMag);
    assert_eq!(mag.files[&Variant::NormalQuality], vec!["mag_alpha"]);
}

#[test]
fn empty_directory_has_no_groups() {
    let dir = tempfile::tempdir().unwrap();
    assert!(groups(dir.path()).is_empty());
}

#[test]
fn search_then_tree() {
    let root = sample_root();
    let found: Vec<_> = filelist::search(filelist::file_groups(root.path()), "halo").collect();
    assert_eq!(found.len(), 1);

    let all = groups(root.path());
    let tree = filelist::build_tree(&all);
    let categories: Vec<_> = tree.children.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(categories, vec!["Outfit (NGS)", "Mag (NGS)", "Accessory"]);

    let outfit = &tree.children[0];
    let suit = &outfit.children[0];
    assert_eq!(suit.text, "Base Suit");
    assert_eq!(suit.children[0].text, "High Quality");
    assert_eq!(suit.children[0].children.len(), 3);
    assert!(suit.children[0].children[2].children.is_empty());
}

#[test]
fn locates_archives_by_hash() {
    let data = tempfile::tempdir().unwrap();
    common::write_sheet(data.path(), "win32_na/0123abcd", "");
    common::write_sheet(data.path(), "win32reboot/01/23abcd", "");

    assert_eq!(
        filelist::find_ice_file(data.path(), "0123abcd"),
        Some(data.path().join("win32_na/0123abcd"))
    );
    assert_eq!(
        filelist::find_ice_file(data.path(), "01/23abcd"),
        Some(data.path().join("win32reboot/01/23abcd"))
    );
    assert_eq!(filelist::find_ice_file(data.path(), "ffff"), None);
}
