//! Catalog record types and their column layout.

use std::collections::BTreeSet;

use rusqlite::types::{Type, Value};
use rusqlite::Row;
use serde::Serialize;

use crate::colors::{ColorId, ColorMapping};
use crate::ids::{self, CmxPartType};

use super::file_name::CmxFileName;

/// One catalog table per kind of character part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Accessories,
    Costumes,
    Basewear,
    Outerwear,
    CastArms,
    CastBodies,
    CastLegs,
    Innerwear,
    Bodypaint,
    Stickers,
    Skins,
    Faces,
    FaceTextures,
    Facepaint,
    Eyes,
    Eyebrows,
    Eyelashes,
    Ears,
    Teeth,
    Horns,
    Hair,
}

impl Table {
    pub const ALL: [Table; 21] = [
        Table::Accessories,
        Table::Costumes,
        Table::Basewear,
        Table::Outerwear,
        Table::CastArms,
        Table::CastBodies,
        Table::CastLegs,
        Table::Innerwear,
        Table::Bodypaint,
        Table::Stickers,
        Table::Skins,
        Table::Faces,
        Table::FaceTextures,
        Table::Facepaint,
        Table::Eyes,
        Table::Eyebrows,
        Table::Eyelashes,
        Table::Ears,
        Table::Teeth,
        Table::Horns,
        Table::Hair,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Table::Accessories => "accessories",
            Table::Costumes => "costumes",
            Table::Basewear => "basewear",
            Table::Outerwear => "outerwear",
            Table::CastArms => "cast_arms",
            Table::CastBodies => "cast_bodies",
            Table::CastLegs => "cast_legs",
            Table::Innerwear => "innerwear",
            Table::Bodypaint => "bodypaint",
            Table::Stickers => "stickers",
            Table::Skins => "skins",
            Table::Faces => "faces",
            Table::FaceTextures => "face_textures",
            Table::Facepaint => "facepaint",
            Table::Eyes => "eyes",
            Table::Eyebrows => "eyebrows",
            Table::Eyelashes => "eyelashes",
            Table::Ears => "ears",
            Table::Teeth => "teeth",
            Table::Horns => "horns",
            Table::Hair => "hair",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Table::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Tag used in the table's archive names.
    pub fn file_tag(&self) -> &'static str {
        match self {
            Table::Accessories => "ac",
            Table::Costumes | Table::CastBodies => "bd",
            Table::Basewear => "bw",
            Table::Outerwear => "ow",
            Table::CastArms => "am",
            Table::CastLegs => "lg",
            Table::Innerwear => "iw",
            Table::Bodypaint => "b1",
            Table::Stickers => "b2",
            Table::Skins => "sk",
            Table::Faces => "fc",
            Table::FaceTextures => "f1",
            Table::Facepaint => "f2",
            Table::Eyes => "ey",
            Table::Eyebrows => "eb",
            Table::Eyelashes => "el",
            Table::Ears => "ea",
            Table::Teeth => "de",
            Table::Horns => "hn",
            Table::Hair => "hr",
        }
    }

    pub fn is_body(&self) -> bool {
        matches!(
            self,
            Table::Costumes
                | Table::Basewear
                | Table::Outerwear
                | Table::CastArms
                | Table::CastBodies
                | Table::CastLegs
        )
    }

    pub fn columns(&self) -> &'static [Column] {
        match self {
            Table::Accessories => ACCESSORY_COLUMNS,
            Table::Costumes
            | Table::Basewear
            | Table::Outerwear
            | Table::CastArms
            | Table::CastBodies
            | Table::CastLegs => BODY_COLUMNS,
            Table::Innerwear | Table::Bodypaint | Table::Eyes => TEX_5_COLUMNS,
            Table::Stickers => STICKER_COLUMNS,
            Table::Skins => SKIN_COLUMNS,
            Table::Faces => TEX_6_COLUMNS,
            Table::FaceTextures | Table::Facepaint | Table::Eyebrows | Table::Eyelashes | Table::Teeth => {
                TEX_4_COLUMNS
            }
            Table::Ears => EAR_COLUMNS,
            Table::Horns => FILE_COLUMNS,
            Table::Hair => HAIR_COLUMNS,
        }
    }

    /// Number of texture string columns.
    pub fn texture_count(&self) -> usize {
        self.columns().iter().filter(|c| c.is_texture()).count()
    }

    /// `CREATE TABLE` plus the file hash indexes.
    pub fn schema_sql(&self) -> String {
        let columns = self
            .columns()
            .iter()
            .map(|c| format!("{} {}", c.name, c.kind.sql()))
            .collect::<Vec<_>>()
            .join(", ");

        let name = self.name();
        format!(
            "CREATE TABLE IF NOT EXISTS {name} ({columns});
             CREATE INDEX IF NOT EXISTS {name}_file ON {name}(md5(file));
             CREATE INDEX IF NOT EXISTS {name}_file_ex ON {name}(md5_ex(file));"
        )
    }

    pub fn insert_sql(&self) -> String {
        let placeholders = (1..=self.columns().len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!("INSERT INTO {} VALUES ({})", self.name(), placeholders)
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Column descriptors
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Id,
    Integer,
    OptionalInteger,
    OptionalReal,
    Text,
    FileName,
    ColorMap,
}

impl ColumnKind {
    pub fn sql(&self) -> &'static str {
        match self {
            ColumnKind::Id => "INTEGER PRIMARY KEY",
            ColumnKind::Integer => "INTEGER NOT NULL",
            ColumnKind::OptionalInteger => "INTEGER",
            ColumnKind::OptionalReal => "REAL",
            ColumnKind::Text | ColumnKind::FileName | ColumnKind::ColorMap => "TEXT NOT NULL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
}

impl Column {
    fn is_texture(&self) -> bool {
        self.name.starts_with("tex")
    }
}

const fn col(name: &'static str, kind: ColumnKind) -> Column {
    Column { name, kind }
}

use ColumnKind::{ColorMap, FileName, Id, Integer, OptionalInteger, OptionalReal, Text};

static ACCESSORY_COLUMNS: &[Column] = &[
    col("id", Id),
    col("adjusted_id", Integer),
    col("name_en", Text),
    col("name_jp", Text),
    col("file", FileName),
    col("node_attach_1", Text),
    col("node_attach_2", Text),
    col("node_attach_3", Text),
    col("node_attach_4", Text),
    col("node_attach_5", Text),
    col("node_attach_6", Text),
    col("node_attach_7", Text),
    col("node_attach_8", Text),
    col("node_attach_9", Text),
    col("node_attach_10", Text),
    col("node_attach_11", Text),
    col("node_attach_12", Text),
    col("node_attach_13", Text),
    col("node_attach_14", Text),
    col("node_attach_15", Text),
    col("node_attach_16", Text),
    col("node_attach_17", Text),
    col("node_attach_18", Text),
    col("effect_name", Text),
];

static BODY_COLUMNS: &[Column] = &[
    col("id", Id),
    col("adjusted_id", Integer),
    col("name_en", Text),
    col("name_jp", Text),
    col("head_id", OptionalInteger),
    col("sound_id", OptionalInteger),
    col("linked_inner_id", OptionalInteger),
    col("linked_outer_id", OptionalInteger),
    col("file", FileName),
    col("linked_inner_file", FileName),
    col("linked_outer_file", FileName),
    col("sound_file", FileName),
    col("cast_sound_file", FileName),
    col("tex_1", Text),
    col("tex_2", Text),
    col("tex_3", Text),
    col("tex_4", Text),
    col("tex_5", Text),
    col("tex_6", Text),
    col("leg_length", OptionalReal),
    col("color_mapping", ColorMap),
];

static FILE_COLUMNS: &[Column] = &[
    col("id", Id),
    col("adjusted_id", Integer),
    col("name_en", Text),
    col("name_jp", Text),
    col("file", FileName),
];

static STICKER_COLUMNS: &[Column] = &[
    col("id", Id),
    col("adjusted_id", Integer),
    col("name_en", Text),
    col("name_jp", Text),
    col("file", FileName),
    col("tex", Text),
];

static TEX_4_COLUMNS: &[Column] = &[
    col("id", Id),
    col("adjusted_id", Integer),
    col("name_en", Text),
    col("name_jp", Text),
    col("file", FileName),
    col("tex_1", Text),
    col("tex_2", Text),
    col("tex_3", Text),
    col("tex_4", Text),
];

static TEX_5_COLUMNS: &[Column] = &[
    col("id", Id),
    col("adjusted_id", Integer),
    col("name_en", Text),
    col("name_jp", Text),
    col("file", FileName),
    col("tex_1", Text),
    col("tex_2", Text),
    col("tex_3", Text),
    col("tex_4", Text),
    col("tex_5", Text),
];

static TEX_6_COLUMNS: &[Column] = &[
    col("id", Id),
    col("adjusted_id", Integer),
    col("name_en", Text),
    col("name_jp", Text),
    col("file", FileName),
    col("tex_1", Text),
    col("tex_2", Text),
    col("tex_3", Text),
    col("tex_4", Text),
    col("tex_5", Text),
    col("tex_6", Text),
];

static SKIN_COLUMNS: &[Column] = &[
    col("id", Id),
    col("adjusted_id", Integer),
    col("name_en", Text),
    col("name_jp", Text),
    col("file", FileName),
    col("tex_1", Text),
    col("tex_2", Text),
    col("tex_3", Text),
    col("tex_4", Text),
    col("tex_5", Text),
    col("tex_6", Text),
    col("tex_7", Text),
    col("tex_8", Text),
    col("tex_9", Text),
    col("tex_10", Text),
];

static EAR_COLUMNS: &[Column] = &[
    col("id", Id),
    col("adjusted_id", Integer),
    col("name_en", Text),
    col("name_jp", Text),
    col("file", FileName),
    col("tex_1", Text),
    col("tex_2", Text),
    col("tex_3", Text),
    col("tex_4", Text),
    col("tex_5", Text),
    col("color_mapping", ColorMap),
];

static HAIR_COLUMNS: &[Column] = &[
    col("id", Id),
    col("adjusted_id", Integer),
    col("name_en", Text),
    col("name_jp", Text),
    col("file", FileName),
    col("tex_1", Text),
    col("tex_2", Text),
    col("tex_3", Text),
    col("tex_4", Text),
    col("tex_5", Text),
    col("tex_6", Text),
    col("tex_7", Text),
    col("color_mapping", ColorMap),
];

// ============================================================================
// Records
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CmxObjectBase {
    pub table: Table,
    pub id: u32,
    pub adjusted_id: u32,
    pub name_en: String,
    pub name_jp: String,
}

impl CmxObjectBase {
    pub fn new(table: Table, id: u32, adjusted_id: u32) -> Self {
        Self {
            table,
            id,
            adjusted_id,
            name_en: String::new(),
            name_jp: String::new(),
        }
    }

    pub fn name(&self) -> String {
        if !self.name_en.is_empty() {
            self.name_en.clone()
        } else if !self.name_jp.is_empty() {
            self.name_jp.clone()
        } else {
            format!("Unnamed {}", self.id)
        }
    }

    pub fn part_type(&self) -> CmxPartType {
        CmxPartType::from_id(self.id)
    }

    pub fn is_ngs(&self) -> bool {
        ids::is_ngs(self.id)
    }

    fn push_values(&self, values: &mut Vec<Value>) {
        values.push(Value::Integer(self.id as i64));
        values.push(Value::Integer(self.adjusted_id as i64));
        values.push(Value::Text(self.name_en.clone()));
        values.push(Value::Text(self.name_jp.clone()));
    }

    fn read(table: Table, row: &mut RowReader) -> rusqlite::Result<Self> {
        Ok(Self {
            table,
            id: row.integer()?,
            adjusted_id: row.integer()?,
            name_en: row.text()?,
            name_jp: row.text()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CmxAccessory {
    #[serde(flatten)]
    pub base: CmxObjectBase,
    pub file: CmxFileName,
    pub node_attach: Vec<String>,
    pub effect_name: String,
}

/// Costumes, basewear, outerwear and cast parts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CmxBody {
    #[serde(flatten)]
    pub base: CmxObjectBase,
    pub head_id: Option<u32>,
    pub sound_id: Option<u32>,
    pub linked_inner_id: Option<u32>,
    pub linked_outer_id: Option<u32>,
    pub file: CmxFileName,
    pub linked_inner_file: CmxFileName,
    pub linked_outer_file: CmxFileName,
    pub sound_file: CmxFileName,
    pub cast_sound_file: CmxFileName,
    pub tex: Vec<String>,
    pub leg_length: Option<f64>,
    pub color_mapping: ColorMapping,
}

/// Every other part: a file, its texture strings and, for hair and ears,
/// a color mapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CmxPart {
    #[serde(flatten)]
    pub base: CmxObjectBase,
    pub file: CmxFileName,
    pub tex: Vec<String>,
    pub color_mapping: Option<ColorMapping>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CmxObject {
    Accessory(CmxAccessory),
    Body(CmxBody),
    Part(CmxPart),
}

impl CmxObject {
    pub fn base(&self) -> &CmxObjectBase {
        match self {
            CmxObject::Accessory(o) => &o.base,
            CmxObject::Body(o) => &o.base,
            CmxObject::Part(o) => &o.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut CmxObjectBase {
        match self {
            CmxObject::Accessory(o) => &mut o.base,
            CmxObject::Body(o) => &mut o.base,
            CmxObject::Part(o) => &mut o.base,
        }
    }

    pub fn table(&self) -> Table {
        self.base().table
    }

    pub fn id(&self) -> u32 {
        self.base().id
    }

    pub fn name(&self) -> String {
        self.base().name()
    }

    pub fn file(&self) -> &CmxFileName {
        match self {
            CmxObject::Accessory(o) => &o.file,
            CmxObject::Body(o) => &o.file,
            CmxObject::Part(o) => &o.file,
        }
    }

    /// Which color slot tints each mask channel.
    pub fn get_color_map(&self) -> ColorMapping {
        match self {
            CmxObject::Accessory(_) => ColorMapping::default(),
            CmxObject::Body(body) => {
                if body.base.is_ngs() {
                    return body.color_mapping;
                }
                classic_color_map(body.base.table).unwrap_or(body.color_mapping)
            }
            CmxObject::Part(part) => match part.base.table {
                Table::Faces => ColorMapping {
                    red: ColorId::MainSkin,
                    green: ColorId::SubSkin,
                    ..Default::default()
                },
                Table::Eyebrows => ColorMapping {
                    red: ColorId::Eyebrow,
                    ..Default::default()
                },
                Table::Eyelashes => ColorMapping {
                    red: ColorId::Eyelash,
                    ..Default::default()
                },
                _ => part.color_mapping.unwrap_or_default(),
            },
        }
    }

    /// Every color slot the object uses.
    pub fn get_colors(&self) -> BTreeSet<ColorId> {
        match self {
            CmxObject::Body(body) => {
                let mut colors = self.get_color_map().used_colors();
                colors.insert(ColorId::MainSkin);
                if body.base.is_ngs() {
                    colors.insert(ColorId::SubSkin);
                }
                colors
            }
            CmxObject::Part(part) if part.base.table == Table::Eyes => {
                BTreeSet::from([ColorId::LeftEye, ColorId::RightEye])
            }
            _ => self.get_color_map().used_colors(),
        }
    }

    /// Archives needed to import the object. Sound archives are left out.
    pub fn get_files(&self) -> Vec<CmxFileName> {
        let files = match self {
            CmxObject::Body(body) => vec![
                body.file.clone(),
                body.linked_inner_file.clone(),
                body.linked_outer_file.clone(),
            ],
            _ => vec![self.file().clone()],
        };
        files.into_iter().filter(|f| !f.is_empty()).collect()
    }

    pub fn get_textures(&self) -> Vec<String> {
        let tex = match self {
            CmxObject::Accessory(_) => return vec![],
            CmxObject::Body(body) => &body.tex,
            CmxObject::Part(part) => &part.tex,
        };
        tex.iter().filter(|t| !t.is_empty()).cloned().collect()
    }

    /// Column values in [`Table::columns`] order.
    pub fn to_values(&self) -> Vec<Value> {
        let mut values = vec![];
        self.base().push_values(&mut values);

        match self {
            CmxObject::Accessory(o) => {
                values.push(file_value(&o.file));
                values.extend(padded(&o.node_attach, 18).map(Value::Text));
                values.push(Value::Text(o.effect_name.clone()));
            }
            CmxObject::Body(o) => {
                values.push(optional_id(o.head_id));
                values.push(optional_id(o.sound_id));
                values.push(optional_id(o.linked_inner_id));
                values.push(optional_id(o.linked_outer_id));
                values.push(file_value(&o.file));
                values.push(file_value(&o.linked_inner_file));
                values.push(file_value(&o.linked_outer_file));
                values.push(file_value(&o.sound_file));
                values.push(file_value(&o.cast_sound_file));
                values.extend(padded(&o.tex, 6).map(Value::Text));
                values.push(o.leg_length.map(Value::Real).unwrap_or(Value::Null));
                values.push(Value::Text(o.color_mapping.encode()));
            }
            CmxObject::Part(o) => {
                let table = o.base.table;
                values.push(file_value(&o.file));
                values.extend(padded(&o.tex, table.texture_count()).map(Value::Text));
                if table.columns().iter().any(|c| c.kind == ColumnKind::ColorMap) {
                    values.push(Value::Text(o.color_mapping.unwrap_or_default().encode()));
                }
            }
        }

        values
    }

    /// Decode a `SELECT *` row of `table`.
    pub fn from_row(table: Table, row: &Row) -> rusqlite::Result<Self> {
        let mut reader = RowReader::new(row);
        let base = CmxObjectBase::read(table, &mut reader)?;

        let object = match table {
            Table::Accessories => CmxObject::Accessory(CmxAccessory {
                base,
                file: reader.file_name()?,
                node_attach: reader.texts(18)?,
                effect_name: reader.text()?,
            }),
            t if t.is_body() => CmxObject::Body(CmxBody {
                base,
                head_id: reader.optional_integer()?,
                sound_id: reader.optional_integer()?,
                linked_inner_id: reader.optional_integer()?,
                linked_outer_id: reader.optional_integer()?,
                file: reader.file_name()?,
                linked_inner_file: reader.file_name()?,
                linked_outer_file: reader.file_name()?,
                sound_file: reader.file_name()?,
                cast_sound_file: reader.file_name()?,
                tex: reader.texts(6)?,
                leg_length: reader.optional_real()?,
                color_mapping: reader.color_map()?,
            }),
            _ => {
                let file = reader.file_name()?;
                let tex = reader.texts(table.texture_count())?;
                let color_mapping = if reader.remaining() > 0 {
                    Some(reader.color_map()?)
                } else {
                    None
                };
                CmxObject::Part(CmxPart {
                    base,
                    file,
                    tex,
                    color_mapping,
                })
            }
        };

        Ok(object)
    }
}

fn classic_color_map(table: Table) -> Option<ColorMapping> {
    match table {
        Table::Basewear | Table::Costumes => Some(ColorMapping {
            blue: ColorId::Base1,
            ..Default::default()
        }),
        Table::Outerwear => Some(ColorMapping {
            blue: ColorId::Outer1,
            ..Default::default()
        }),
        _ => None,
    }
}

fn file_value(file: &CmxFileName) -> Value {
    Value::Text(file.name().to_string())
}

fn optional_id(id: Option<u32>) -> Value {
    id.map(|i| Value::Integer(i as i64)).unwrap_or(Value::Null)
}

fn padded(values: &[String], len: usize) -> impl Iterator<Item = String> + '_ {
    (0..len).map(move |i| values.get(i).cloned().unwrap_or_default())
}

/// Reads the columns of a row in order, decoding the custom column types.
struct RowReader<'a, 'stmt> {
    row: &'a Row<'stmt>,
    index: usize,
}

impl<'a, 'stmt> RowReader<'a, 'stmt> {
    fn new(row: &'a Row<'stmt>) -> Self {
        Self { row, index: 0 }
    }

    fn next<T: rusqlite::types::FromSql>(&mut self) -> rusqlite::Result<T> {
        let value = self.row.get(self.index)?;
        self.index += 1;
        Ok(value)
    }

    fn remaining(&self) -> usize {
        self.row.as_ref().column_count().saturating_sub(self.index)
    }

    fn integer(&mut self) -> rusqlite::Result<u32> {
        self.next()
    }

    fn optional_integer(&mut self) -> rusqlite::Result<Option<u32>> {
        self.next()
    }

    fn optional_real(&mut self) -> rusqlite::Result<Option<f64>> {
        self.next()
    }

    fn text(&mut self) -> rusqlite::Result<String> {
        self.next()
    }

    fn texts(&mut self, count: usize) -> rusqlite::Result<Vec<String>> {
        (0..count).map(|_| self.text()).collect()
    }

    fn file_name(&mut self) -> rusqlite::Result<CmxFileName> {
        Ok(CmxFileName::new(self.text()?))
    }

    fn color_map(&mut self) -> rusqlite::Result<ColorMapping> {
        let index = self.index;
        let text = self.text()?;
        ColorMapping::decode(&text)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
    }
}
