//! The spreadsheets of a file list directory.

use crate::object_info::{ModelPart, ObjectType};

use super::ItemCategory;

/// One player spreadsheet and the kind of item its rows describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerList {
    pub category: ItemCategory,
    pub file: &'static str,
    pub object_type: Option<ObjectType>,
    pub part: Option<ModelPart>,
}

const fn list(
    category: ItemCategory,
    file: &'static str,
    object_type: Option<ObjectType>,
    part: Option<ModelPart>,
) -> PlayerList {
    PlayerList {
        category,
        file,
        object_type,
        part,
    }
}

use ItemCategory as C;
use ModelPart as P;
use ObjectType as T;

pub static NGS_PLAYER_LISTS: &[PlayerList] = &[
    list(C::NgsHeadPart, "AllFacesNGS.csv", Some(T::NgsHead), None),
    list(C::NgsHeadPart, "AllHairNGS.csv", Some(T::NgsHair), None),
    list(C::NgsHeadPart, "EarsNGS.csv", Some(T::NgsEar), None),
    list(C::NgsHeadPart, "EyebrowsNGS.csv", Some(T::NgsEyebrow), None),
    list(C::NgsHeadPart, "EyelashesNGS.csv", Some(T::NgsEyelashes), None),
    list(C::NgsHeadPart, "EyesNGS.csv", Some(T::NgsEye), None),
    list(C::NgsHeadPart, "FacePaintNGS.csv", Some(T::NgsFacePaint), None),
    list(C::NgsHeadPart, "HornsNGS.csv", Some(T::NgsHorn), None),
    list(C::NgsHeadPart, "TeethNGS.csv", Some(T::NgsTeeth), None),
    list(C::NgsCastPart, "CasealArmsNGS.csv", Some(T::NgsBody), Some(P::NgsCastArms)),
    list(C::NgsCastPart, "CasealLegsNGS.csv", Some(T::NgsBody), Some(P::NgsCastLegs)),
    list(C::NgsCastPart, "CasealNGSBodies.csv", Some(T::NgsBody), Some(P::NgsCastBody)),
    list(C::NgsCastPart, "CastArmsNGS.csv", Some(T::NgsBody), Some(P::NgsCastArms)),
    list(C::NgsCastPart, "CastLegsNGS.csv", Some(T::NgsBody), Some(P::NgsCastLegs)),
    list(C::NgsCastPart, "CastNGSBodies.csv", Some(T::NgsBody), Some(P::NgsCastBody)),
    list(C::NgsOutfit, "FemaleNGSBasewear.csv", Some(T::NgsBody), Some(P::NgsBasewear)),
    list(C::NgsOutfit, "FemaleNGSInnerwear.csv", Some(T::NgsBody), Some(P::NgsInnerwear)),
    list(C::NgsOutfit, "FemaleNGSOuters.csv", Some(T::NgsBody), Some(P::NgsOuterwear)),
    list(C::NgsOutfit, "GenderlessNGSBasewear.csv", Some(T::NgsBody), Some(P::NgsBasewear)),
    list(C::NgsOutfit, "MaleNGSBasewear.csv", Some(T::NgsBody), Some(P::NgsBasewear)),
    list(C::NgsOutfit, "MaleNGSInnerwear.csv", Some(T::NgsBody), Some(P::NgsInnerwear)),
    list(C::NgsOutfit, "MaleNGSOuters.csv", Some(T::NgsBody), Some(P::NgsOuterwear)),
    list(C::NgsBodyPaint, "CasealNGSBodyPaint.csv", Some(T::NgsBodyPaint), None),
    list(C::NgsBodyPaint, "CastNGSBodyPaint.csv", Some(T::NgsBodyPaint), None),
    list(C::NgsBodyPaint, "FemaleNGSBodyPaint.csv", Some(T::NgsBodyPaint), None),
    list(C::NgsBodyPaint, "GenderlessNGSBodyPaint.csv", Some(T::NgsBodyPaint), None),
    list(C::NgsBodyPaint, "MaleNGSBodyPaint.csv", Some(T::NgsBodyPaint), None),
    list(C::NgsBodyPaint, "SkinsNGS.csv", Some(T::NgsBody), Some(P::NgsSkin)),
];

pub static CLASSIC_PLAYER_LISTS: &[PlayerList] = &[
    list(C::ClassicHeadPart, "CasealFaces_Heads.csv", Some(T::Head), Some(P::FemaleCastHead)),
    list(C::ClassicHeadPart, "CasealHair.csv", Some(T::Hair), None),
    list(C::ClassicHeadPart, "CastFaces_Heads.csv", Some(T::Head), None),
    list(C::ClassicHeadPart, "Eyebrows.csv", Some(T::Eyebrow), None),
    list(C::ClassicHeadPart, "Eyelashes.csv", Some(T::Eyelashes), None),
    list(C::ClassicHeadPart, "Eyes.csv", Some(T::Eye), None),
    list(C::ClassicHeadPart, "FacePaint.csv", Some(T::FacePaint), None),
    list(C::ClassicHeadPart, "FaceTextures.csv", Some(T::Head), None),
    list(C::ClassicHeadPart, "FemaleDeumanFaces.csv", Some(T::Head), None),
    list(C::ClassicHeadPart, "FemaleHair.csv", Some(T::Hair), None),
    list(C::ClassicHeadPart, "FemaleHumanFaces.csv", Some(T::Head), None),
    list(C::ClassicHeadPart, "FemaleNewmanFaces.csv", Some(T::Head), None),
    list(C::ClassicHeadPart, "MaleDeumanFaces.csv", Some(T::Head), None),
    list(C::ClassicHeadPart, "MaleHair.csv", Some(T::Hair), None),
    list(C::ClassicHeadPart, "MaleHumanFaces.csv", Some(T::Head), None),
    list(C::ClassicHeadPart, "MaleNewmanFaces.csv", Some(T::Head), None),
    list(C::ClassicCastPart, "CasealArms.csv", Some(T::Body), Some(P::FemaleCastArms)),
    list(C::ClassicCastPart, "CasealBodies.csv", Some(T::Body), None),
    list(C::ClassicCastPart, "CasealLegs.csv", Some(T::Body), None),
    list(C::ClassicCastPart, "CastArms.csv", Some(T::Body), None),
    list(C::ClassicCastPart, "CastBodies.csv", Some(T::Body), None),
    list(C::ClassicCastPart, "CastLegs.csv", Some(T::Body), None),
    list(C::ClassicOutfit, "FemaleBasewear.csv", Some(T::Body), None),
    list(C::ClassicOutfit, "FemaleCostumes.csv", Some(T::Body), None),
    list(C::ClassicOutfit, "FemaleInnerwear.csv", Some(T::Body), None),
    list(C::ClassicOutfit, "FemaleOuters.csv", Some(T::Body), None),
    list(C::ClassicOutfit, "MaleBasewear.csv", Some(T::Body), None),
    list(C::ClassicOutfit, "MaleCostumes.csv", Some(T::Body), None),
    list(C::ClassicOutfit, "MaleOuters.csv", Some(T::Body), None),
    list(C::ClassicBodyPaint, "FemaleBodyPaint.csv", Some(T::BodyPaint), None),
    list(C::ClassicBodyPaint, "FemaleLayeredBodyPaint.csv", Some(T::BodyPaint), None),
    list(C::ClassicBodyPaint, "MaleBodyPaint.csv", Some(T::BodyPaint), None),
    list(C::ClassicBodyPaint, "MaleLayeredBodyPaint.csv", Some(T::BodyPaint), None),
    list(C::ClassicBodyPaint, "Skins.csv", Some(T::NgsBody), Some(P::NgsSkin)),
    list(C::ClassicOther, "PhotonBlastCreatures.csv", None, None),
];

pub static COMMON_PLAYER_LISTS: &[PlayerList] = &[
    list(C::Accessory, "Accessories.csv", Some(T::Accessory), None),
    list(C::Sticker, "Stickers.csv", Some(T::Sticker), None),
    list(C::NgsOther, "DarkBlasts_DrivableVehiclesNGS.csv", None, None),
    list(C::ClassicOther, "DarkBlasts_DrivableVehicles.csv", None, None),
];

/// Player spreadsheet sets by directory, in read order.
pub static PLAYER_LISTS: [(&str, &[PlayerList]); 3] = [
    ("Player/Classic", CLASSIC_PLAYER_LISTS),
    ("Player/NGS", NGS_PLAYER_LISTS),
    ("Player", COMMON_PLAYER_LISTS),
];

/// Headerless mag spreadsheets under `Player`.
pub static MAG_LISTS: [(ItemCategory, &str); 2] = [
    (C::NgsMag, "MagsNGS.csv"),
    (C::ClassicMag, "Mags.csv"),
];
