//! Object id ranges.
//!
//! Gender, body family and file-name prefix of every character object are
//! encoded purely in its numeric id. Both the file-name classifier and the
//! CMX catalog read the same table.

use serde::Serialize;

pub const CLASSIC_MALE_COSTUME_START: u32 = 0;
pub const CLASSIC_FEMALE_COSTUME_START: u32 = 10000;
pub const CLASSIC_MALE_START: u32 = 20000;
pub const CLASSIC_FEMALE_START: u32 = 30000;
pub const CLASSIC_CAST_START: u32 = 40000;
pub const CLASSIC_CASEAL_START: u32 = 50000;
pub const CLASSIC_UNKNOWN_START: u32 = 60000;
pub const NGS_START: u32 = 100000;
pub const NGS_T1_START: u32 = 100000;
pub const NGS_T2_START: u32 = 200000;
pub const NGS_CAST_START: u32 = 300000;
pub const NGS_CASEAL_START: u32 = 400000;
pub const NGS_GENDERLESS_START: u32 = 500000;
pub const NGS_UNKNOWN_START: u32 = 600000;

/// Costume ids at or above this value are cast bodies.
pub const CAST_BODY_START: u32 = CLASSIC_CAST_START;

pub fn is_ngs(id: u32) -> bool {
    id >= NGS_START
}

pub fn is_classic_male(id: u32) -> bool {
    (CLASSIC_MALE_COSTUME_START..CLASSIC_FEMALE_COSTUME_START).contains(&id)
        || (CLASSIC_MALE_START..CLASSIC_FEMALE_START).contains(&id)
        || (CLASSIC_CAST_START..CLASSIC_CASEAL_START).contains(&id)
}

pub fn is_classic_female(id: u32) -> bool {
    (CLASSIC_FEMALE_COSTUME_START..CLASSIC_MALE_START).contains(&id)
        || (CLASSIC_FEMALE_START..CLASSIC_CAST_START).contains(&id)
        || (CLASSIC_CASEAL_START..CLASSIC_UNKNOWN_START).contains(&id)
}

pub fn is_ngs_t1(id: u32) -> bool {
    (NGS_T1_START..NGS_T2_START).contains(&id) || (NGS_CAST_START..NGS_CASEAL_START).contains(&id)
}

pub fn is_ngs_t2(id: u32) -> bool {
    (NGS_T2_START..NGS_CAST_START).contains(&id)
        || (NGS_CASEAL_START..NGS_GENDERLESS_START).contains(&id)
}

/// Male or NGS type 1.
pub fn is_t1(id: u32) -> bool {
    is_classic_male(id) || is_ngs_t1(id)
}

/// Female or NGS type 2.
pub fn is_t2(id: u32) -> bool {
    is_classic_female(id) || is_ngs_t2(id)
}

pub fn is_genderless(id: u32) -> bool {
    !is_t1(id) && !is_t2(id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyType {
    Genderless,
    Male,
    Female,
    NgsMale,
    NgsFemale,
}

impl BodyType {
    pub fn from_id(id: u32) -> Self {
        if is_ngs_t1(id) {
            BodyType::NgsMale
        } else if is_ngs_t2(id) {
            BodyType::NgsFemale
        } else if is_classic_male(id) {
            BodyType::Male
        } else if is_classic_female(id) {
            BodyType::Female
        } else {
            BodyType::Genderless
        }
    }
}

/// Coarse part family used by the catalog's part-type filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CmxPartType {
    ClassicGenderless,
    ClassicMale,
    ClassicFemale,
    ClassicCast,
    ClassicCaseal,
    NgsMale,
    NgsFemale,
    NgsCast,
    NgsCaseal,
    NgsGenderless,
    Unknown,
}

impl CmxPartType {
    pub fn from_id(id: u32) -> Self {
        match id {
            _ if id < CLASSIC_MALE_START => CmxPartType::ClassicGenderless,
            _ if id < CLASSIC_FEMALE_START => CmxPartType::ClassicMale,
            _ if id < CLASSIC_CAST_START => CmxPartType::ClassicFemale,
            _ if id < CLASSIC_CASEAL_START => CmxPartType::ClassicCast,
            _ if id < CLASSIC_UNKNOWN_START => CmxPartType::ClassicCaseal,
            _ if id < NGS_START => CmxPartType::Unknown,
            _ if id < NGS_T2_START => CmxPartType::NgsMale,
            _ if id < NGS_CAST_START => CmxPartType::NgsFemale,
            _ if id < NGS_CASEAL_START => CmxPartType::NgsCast,
            _ if id < NGS_GENDERLESS_START => CmxPartType::NgsCaseal,
            _ if id < NGS_UNKNOWN_START => CmxPartType::NgsGenderless,
            _ => CmxPartType::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_type_boundaries() {
        assert_eq!(BodyType::from_id(0), BodyType::Male);
        assert_eq!(BodyType::from_id(9999), BodyType::Male);
        assert_eq!(BodyType::from_id(10000), BodyType::Female);
        assert_eq!(BodyType::from_id(20001), BodyType::Male);
        assert_eq!(BodyType::from_id(39999), BodyType::Female);
        assert_eq!(BodyType::from_id(45000), BodyType::Male);
        assert_eq!(BodyType::from_id(59999), BodyType::Female);
        assert_eq!(BodyType::from_id(60000), BodyType::Genderless);
        assert_eq!(BodyType::from_id(100000), BodyType::NgsMale);
        assert_eq!(BodyType::from_id(200000), BodyType::NgsFemale);
        assert_eq!(BodyType::from_id(399999), BodyType::NgsMale);
        assert_eq!(BodyType::from_id(400000), BodyType::NgsFemale);
        assert_eq!(BodyType::from_id(500000), BodyType::Genderless);
    }

    #[test]
    fn t1_t2_are_disjoint() {
        for id in [0, 15000, 25000, 35000, 45000, 55000, 150000, 250000, 350000, 450000, 550000] {
            assert!(!(is_t1(id) && is_t2(id)), "{id}");
        }
        assert!(is_genderless(550000));
        assert!(is_genderless(70000));
    }

    #[test]
    fn part_type_thresholds() {
        assert_eq!(CmxPartType::from_id(19999), CmxPartType::ClassicGenderless);
        assert_eq!(CmxPartType::from_id(20000), CmxPartType::ClassicMale);
        assert_eq!(CmxPartType::from_id(59999), CmxPartType::ClassicCaseal);
        assert_eq!(CmxPartType::from_id(99999), CmxPartType::Unknown);
        assert_eq!(CmxPartType::from_id(100000), CmxPartType::NgsMale);
        assert_eq!(CmxPartType::from_id(599999), CmxPartType::NgsGenderless);
        assert_eq!(CmxPartType::from_id(600000), CmxPartType::Unknown);
    }
}
