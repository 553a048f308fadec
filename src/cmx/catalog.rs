use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use rusqlite::functions::FunctionFlags;
use rusqlite::{params_from_iter, Connection, Transaction};
use serde::Serialize;

use crate::colors::ColorMapping;
use crate::db::{self, DB};
use crate::ids;

use super::file_name::{md5_hex, CmxFileName};
use super::names::{parse_face_variation_script, NameDict, NameText};
use super::records::{CmxAccessory, CmxBody, CmxObject, CmxObjectBase, CmxPart, Table};
use super::source::{CmxDict, CmxSource, RawCmxObject};
use super::CatalogError;

pub const CATALOG_FILE: &str = "objects.sqlite";

/// Bumped whenever the table layout changes. A catalog stamped with any other
/// version is dropped and recreated.
pub const SCHEMA_VERSION: i64 = 1;

/// Number of rows written per table by a rebuild.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildSummary {
    pub tables: BTreeMap<Table, usize>,
    pub skipped: usize,
}

impl BuildSummary {
    pub fn total(&self) -> usize {
        self.tables.values().sum()
    }

    fn add(&mut self, table: Table) {
        *self.tables.entry(table).or_default() += 1;
    }
}

/// The persisted object catalog.
#[derive(Clone)]
pub struct ObjectCatalog {
    db: DB,
}

impl ObjectCatalog {
    pub fn open(state_dir: &Path) -> Result<Self, CatalogError> {
        let db = DB::open(&db::state_file(state_dir, CATALOG_FILE))?;
        Self::init(db)
    }

    pub fn open_in_memory() -> Result<Self, CatalogError> {
        Self::init(DB::open_in_memory()?)
    }

    fn init(db: DB) -> Result<Self, CatalogError> {
        {
            let conn = db.lock()?;
            register_functions(&conn)?;
            ensure_schema(&conn)?;
        }
        Ok(Self { db })
    }

    /// Replace the whole catalog with the contents of `source`.
    ///
    /// Runs as one transaction while holding the connection lock, so an error
    /// leaves the previous catalog in place and readers never see a partial
    /// rebuild.
    pub fn build(&self, source: &dyn CmxSource) -> Result<BuildSummary, CatalogError> {
        let mut conn = self.db.lock()?;
        let tx = conn.transaction()?;

        for table in Table::ALL {
            tx.execute(&format!("DELETE FROM {table}"), [])?;
        }

        let names = CatalogNames::new(source);
        let mut summary = BuildSummary::default();

        for dict in CmxDict::ALL {
            let objects = match source.objects(dict) {
                Ok(objects) => objects,
                Err(CatalogError::SourceUnavailable { path, reason }) => {
                    log::warn!("Skipping {:?}: {} ({})", dict, reason, path.display());
                    continue;
                }
                Err(e) => return Err(e),
            };

            let name_dict = names.for_dict(dict);

            for (&id, raw) in objects {
                match read_object(source, dict, name_dict, id, raw) {
                    Ok(object) => {
                        insert(&tx, &object)?;
                        summary.add(object.table());
                    }
                    Err(e) => {
                        log::warn!("Skipping {:?} {}: {}", dict, id, e);
                        summary.skipped += 1;
                    }
                }
            }
        }

        tx.commit()?;

        log::info!(
            "Catalog rebuilt: {} objects ({} skipped)",
            summary.total(),
            summary.skipped
        );
        Ok(summary)
    }

    /// Rows of `table` ordered by id, or the single row with `id`.
    pub fn query(&self, table: Table, id: Option<u32>) -> Result<Vec<CmxObject>, CatalogError> {
        let conn = self.db.lock()?;
        query_table(&conn, table, id)
    }

    /// Matching rows of every table.
    pub fn get_all(&self, id: Option<u32>) -> Result<Vec<CmxObject>, CatalogError> {
        let conn = self.db.lock()?;
        let mut result = vec![];
        for table in Table::ALL {
            result.extend(query_table(&conn, table, id)?);
        }
        Ok(result)
    }

    /// Rows whose archive, or its high quality variant, hashes to `hash`.
    pub fn find_by_file_hash(&self, hash: &str) -> Result<Vec<CmxObject>, CatalogError> {
        let conn = self.db.lock()?;
        let hash = hash.to_ascii_lowercase();
        let mut result = vec![];

        for table in Table::ALL {
            let mut stmt = conn.prepare(&format!(
                "SELECT * FROM {table} WHERE md5(file) = ?1 OR md5_ex(file) = ?1 ORDER BY id"
            ))?;
            let rows = stmt
                .query_map(rusqlite::params![hash], |row| CmxObject::from_row(table, row))?
                .collect::<Result<Vec<_>, _>>()?;
            result.extend(rows);
        }

        Ok(result)
    }

    pub fn count(&self, table: Table) -> Result<usize, CatalogError> {
        let conn = self.db.lock()?;
        let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
            row.get(0)
        })?;
        Ok(count as usize)
    }

    pub fn get_accessories(&self, id: Option<u32>) -> Result<Vec<CmxObject>, CatalogError> {
        self.query(Table::Accessories, id)
    }

    pub fn get_costumes(&self, id: Option<u32>) -> Result<Vec<CmxObject>, CatalogError> {
        self.query(Table::Costumes, id)
    }

    pub fn get_basewear(&self, id: Option<u32>) -> Result<Vec<CmxObject>, CatalogError> {
        self.query(Table::Basewear, id)
    }

    pub fn get_outerwear(&self, id: Option<u32>) -> Result<Vec<CmxObject>, CatalogError> {
        self.query(Table::Outerwear, id)
    }

    pub fn get_cast_arms(&self, id: Option<u32>) -> Result<Vec<CmxObject>, CatalogError> {
        self.query(Table::CastArms, id)
    }

    pub fn get_cast_bodies(&self, id: Option<u32>) -> Result<Vec<CmxObject>, CatalogError> {
        self.query(Table::CastBodies, id)
    }

    pub fn get_cast_legs(&self, id: Option<u32>) -> Result<Vec<CmxObject>, CatalogError> {
        self.query(Table::CastLegs, id)
    }

    pub fn get_innerwear(&self, id: Option<u32>) -> Result<Vec<CmxObject>, CatalogError> {
        self.query(Table::Innerwear, id)
    }

    pub fn get_bodypaint(&self, id: Option<u32>) -> Result<Vec<CmxObject>, CatalogError> {
        self.query(Table::Bodypaint, id)
    }

    pub fn get_stickers(&self, id: Option<u32>) -> Result<Vec<CmxObject>, CatalogError> {
        self.query(Table::Stickers, id)
    }

    pub fn get_skins(&self, id: Option<u32>) -> Result<Vec<CmxObject>, CatalogError> {
        self.query(Table::Skins, id)
    }

    pub fn get_faces(&self, id: Option<u32>) -> Result<Vec<CmxObject>, CatalogError> {
        self.query(Table::Faces, id)
    }

    pub fn get_face_textures(&self, id: Option<u32>) -> Result<Vec<CmxObject>, CatalogError> {
        self.query(Table::FaceTextures, id)
    }

    pub fn get_facepaint(&self, id: Option<u32>) -> Result<Vec<CmxObject>, CatalogError> {
        self.query(Table::Facepaint, id)
    }

    pub fn get_eyes(&self, id: Option<u32>) -> Result<Vec<CmxObject>, CatalogError> {
        self.query(Table::Eyes, id)
    }

    pub fn get_eyebrows(&self, id: Option<u32>) -> Result<Vec<CmxObject>, CatalogError> {
        self.query(Table::Eyebrows, id)
    }

    pub fn get_eyelashes(&self, id: Option<u32>) -> Result<Vec<CmxObject>, CatalogError> {
        self.query(Table::Eyelashes, id)
    }

    pub fn get_ears(&self, id: Option<u32>) -> Result<Vec<CmxObject>, CatalogError> {
        self.query(Table::Ears, id)
    }

    pub fn get_teeth(&self, id: Option<u32>) -> Result<Vec<CmxObject>, CatalogError> {
        self.query(Table::Teeth, id)
    }

    pub fn get_horns(&self, id: Option<u32>) -> Result<Vec<CmxObject>, CatalogError> {
        self.query(Table::Horns, id)
    }

    pub fn get_hair(&self, id: Option<u32>) -> Result<Vec<CmxObject>, CatalogError> {
        self.query(Table::Hair, id)
    }
}

// ============================================================================
// SQLite persistence
// ============================================================================

/// Registers `md5(file)` and `md5_ex(file)` for hash lookups.
///
/// `md5_ex` hashes the high quality archive path from [`CmxFileName::ex`]
/// (`making_reboot_ex/..._ex.ice`), not the plain name with `_ex` appended,
/// so its result matches archives that actually exist on disk.
fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    let flags = FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC;

    conn.create_scalar_function("md5", 1, flags, |ctx| {
        let text: Option<String> = ctx.get(0)?;
        Ok(text.map(|t| md5_hex(&t)))
    })?;

    conn.create_scalar_function("md5_ex", 1, flags, |ctx| {
        let text: Option<String> = ctx.get(0)?;
        Ok(text
            .map(|t| CmxFileName::new(t).ex())
            .filter(|ex| !ex.is_empty())
            .map(|ex| ex.hash()))
    })?;

    Ok(())
}

fn ensure_schema(conn: &Connection) -> rusqlite::Result<()> {
    let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    if version == SCHEMA_VERSION {
        return Ok(());
    }

    if version != 0 {
        log::info!(
            "Catalog schema version changed ({} -> {}). Resetting.",
            version,
            SCHEMA_VERSION
        );
        drop_tables(conn)?;
    }

    let schema = Table::ALL
        .iter()
        .map(|t| t.schema_sql())
        .collect::<Vec<_>>()
        .join("\n");

    conn.execute_batch(&schema)?;
    conn.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION}"))?;
    Ok(())
}

fn drop_tables(conn: &Connection) -> rusqlite::Result<()> {
    let tables = {
        let mut stmt = conn.prepare(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
        )?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        rows
    };

    for table in tables {
        conn.execute(&format!("DROP TABLE IF EXISTS \"{}\"", table), [])?;
    }
    Ok(())
}

fn query_table(
    conn: &Connection,
    table: Table,
    id: Option<u32>,
) -> Result<Vec<CmxObject>, CatalogError> {
    let rows = match id {
        Some(id) => {
            let mut stmt = conn.prepare(&format!("SELECT * FROM {table} WHERE id = ?1"))?;
            let rows = stmt
                .query_map(rusqlite::params![id], |row| CmxObject::from_row(table, row))?
                .collect::<Result<Vec<_>, _>>()?;
            rows
        }
        None => {
            let mut stmt = conn.prepare(&format!("SELECT * FROM {table} ORDER BY id"))?;
            let rows = stmt
                .query_map([], |row| CmxObject::from_row(table, row))?
                .collect::<Result<Vec<_>, _>>()?;
            rows
        }
    };
    Ok(rows)
}

fn insert(tx: &Transaction, object: &CmxObject) -> rusqlite::Result<()> {
    let table = object.table();
    let mut stmt = tx.prepare_cached(&table.insert_sql())?;
    stmt.execute(params_from_iter(object.to_values()))?;
    Ok(())
}

// ============================================================================
// Reading the source
// ============================================================================

/// Name dictionaries of every text category the catalog uses.
struct CatalogNames {
    dicts: HashMap<CmxDict, NameDict>,
}

impl CatalogNames {
    fn new(source: &dyn CmxSource) -> Self {
        let parts = source.parts_text();
        let mut dicts = HashMap::new();

        for dict in CmxDict::ALL {
            let names = match dict {
                CmxDict::Accessory => NameDict::from_text(source.accessory_text(), "decoy", None),
                CmxDict::Face => face_names(parts, source.face_variation_script()),
                _ => text_names(parts, name_categories(dict)),
            };
            dicts.insert(dict, names);
        }

        Self { dicts }
    }

    fn for_dict(&self, dict: CmxDict) -> &NameDict {
        &self.dicts[&dict]
    }
}

/// Text categories naming the items of a dictionary. Later categories
/// override earlier ones.
fn name_categories(dict: CmxDict) -> &'static [&'static str] {
    match dict {
        CmxDict::Accessory => &["decoy"],
        CmxDict::Costume => &["costume", "body"],
        CmxDict::Basewear => &["basewear"],
        CmxDict::Outerwear => &["costume"],
        CmxDict::CastArm => &["arm"],
        CmxDict::CastLeg => &["leg"],
        CmxDict::Innerwear => &["innerwear"],
        CmxDict::BodyPaint => &["bodypaint1"],
        CmxDict::Sticker => &["bodypaint2"],
        CmxDict::Skin => &["skin"],
        CmxDict::Face => &["face"],
        CmxDict::FaceTexture => &["facepaint1"],
        CmxDict::FacePaint => &["facepaint2"],
        CmxDict::Eye => &["eye"],
        CmxDict::Eyebrow => &["eyebrows"],
        CmxDict::Eyelash => &["eyelashes"],
        CmxDict::Ear => &["ears"],
        CmxDict::Teeth => &["dental"],
        CmxDict::Horn => &["horn"],
        CmxDict::Hair => &["hair"],
    }
}

fn text_names(text: &NameText, categories: &[&str]) -> NameDict {
    let mut names = NameDict::default();
    for category in categories {
        names.extend_from_text(text, category, None);
    }
    names
}

fn face_names(text: &NameText, script: Option<&str>) -> NameDict {
    let mut names = text_names(text, name_categories(CmxDict::Face));
    if let Some(script) = script {
        let lookup = parse_face_variation_script(script);
        names.extend_from_text(text, "facevariation", Some(&lookup));
    }
    names
}

fn table_for(dict: CmxDict, id: u32) -> Table {
    match dict {
        CmxDict::Accessory => Table::Accessories,
        CmxDict::Costume if id < ids::CAST_BODY_START => Table::Costumes,
        CmxDict::Costume => Table::CastBodies,
        CmxDict::Basewear => Table::Basewear,
        CmxDict::Outerwear => Table::Outerwear,
        CmxDict::CastArm => Table::CastArms,
        CmxDict::CastLeg => Table::CastLegs,
        CmxDict::Innerwear => Table::Innerwear,
        CmxDict::BodyPaint => Table::Bodypaint,
        CmxDict::Sticker => Table::Stickers,
        CmxDict::Skin => Table::Skins,
        CmxDict::Face => Table::Faces,
        CmxDict::FaceTexture => Table::FaceTextures,
        CmxDict::FacePaint => Table::Facepaint,
        CmxDict::Eye => Table::Eyes,
        CmxDict::Eyebrow => Table::Eyebrows,
        CmxDict::Eyelash => Table::Eyelashes,
        CmxDict::Ear => Table::Ears,
        CmxDict::Teeth => Table::Teeth,
        CmxDict::Horn => Table::Horns,
        CmxDict::Hair => Table::Hair,
    }
}

fn read_object(
    source: &dyn CmxSource,
    dict: CmxDict,
    names: &NameDict,
    id: u32,
    raw: &RawCmxObject,
) -> Result<CmxObject, crate::colors::ColorError> {
    let table = table_for(dict, id);
    let adjusted_id = source.id_link(dict, id).unwrap_or(id);

    let mut base = CmxObjectBase::new(table, id, adjusted_id);
    (base.name_jp, base.name_en) = names.names(id);

    let file = CmxFileName::for_object(id, table.file_tag(), adjusted_id);
    let tex = (1..=table.texture_count()).map(|i| raw.tex(i)).collect();

    let object = match table {
        Table::Accessories => CmxObject::Accessory(CmxAccessory {
            base,
            file,
            node_attach: (1..=18).map(|i| raw.node(i)).collect(),
            effect_name: raw.effect_name.clone(),
        }),
        t if t.is_body() => CmxObject::Body(read_body(base, file, tex, raw)?),
        Table::Hair => {
            let color_mapping = match raw.hair_colors {
                Some([red_green, blue_alpha]) if ids::is_ngs(id) => {
                    ColorMapping::from_packed(red_green, blue_alpha)?
                }
                _ => ColorMapping::default(),
            };
            CmxObject::Part(CmxPart {
                base,
                file,
                tex,
                color_mapping: Some(color_mapping),
            })
        }
        Table::Ears => CmxObject::Part(CmxPart {
            base,
            file,
            tex,
            color_mapping: Some(raw_color_mapping(raw)?),
        }),
        _ => CmxObject::Part(CmxPart {
            base,
            file,
            tex,
            color_mapping: None,
        }),
    };

    Ok(object)
}

fn read_body(
    base: CmxObjectBase,
    file: CmxFileName,
    tex: Vec<String>,
    raw: &RawCmxObject,
) -> Result<CmxBody, crate::colors::ColorError> {
    let optional = |value: i64| u32::try_from(value).ok();

    let (head_id, sound_id, linked_inner_id, linked_outer_id, leg_length) = match &raw.body {
        Some(body) => (
            optional(body.head_id),
            optional(body.sound_id),
            optional(body.linked_inner_id),
            optional(body.linked_outer_id),
            Some(body.leg_length).filter(|l| *l >= 0.0),
        ),
        None => (None, None, None, None, None),
    };

    let id = base.id;
    let linked_file = |tag: &str, linked: Option<u32>| match linked {
        Some(linked) => CmxFileName::for_object(id, tag, linked),
        None => CmxFileName::default(),
    };

    Ok(CmxBody {
        head_id,
        sound_id,
        linked_inner_id,
        linked_outer_id,
        file,
        linked_inner_file: linked_file("b1", linked_inner_id),
        linked_outer_file: linked_file("ow", linked_outer_id),
        sound_file: linked_file("bs", sound_id),
        cast_sound_file: linked_file("ls", sound_id),
        tex,
        leg_length,
        color_mapping: raw_color_mapping(raw)?,
        base,
    })
}

fn raw_color_mapping(raw: &RawCmxObject) -> Result<ColorMapping, crate::colors::ColorError> {
    match raw.color_mapping {
        Some(indices) => ColorMapping::from_indices(indices),
        None => Ok(ColorMapping::default()),
    }
}
