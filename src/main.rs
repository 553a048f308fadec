use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use pso2_tools_lib::cmx::{self, CmxData, ObjectCatalog, Table};
use pso2_tools_lib::colors::ColorChannelTable;
use pso2_tools_lib::db::DEFAULT_STATE_DIR;
use pso2_tools_lib::filelist;
use pso2_tools_lib::material::{AqpInfo, MaterialIdentity, ModelMaterials, TexturePool};
use pso2_tools_lib::object_info::classify;
use pso2_tools_lib::preferences::{Preferences, KEYS};

/// Material, texture and object catalog tooling for PSO2/NGS character models
#[derive(Parser)]
#[command(name = "pso2-tools")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the catalog and preferences databases
    #[arg(long, global = true, default_value = DEFAULT_STATE_DIR)]
    state_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode an encoded material name
    Material {
        name: String,
    },

    /// Classify game file names
    Classify {
        files: Vec<String>,

        /// ColorChannels.json used to look up color slots
        #[arg(long)]
        colors: Option<PathBuf>,
    },

    /// Resolve the textures of every material of a model
    Textures {
        /// Material sidecar (JSON) written next to the exported model
        #[arg(short, long)]
        aqp: PathBuf,

        /// Directory of the model's images
        #[arg(short, long)]
        textures: PathBuf,

        /// Directory of skin images
        #[arg(long)]
        skin: Option<PathBuf>,

        /// Directory of images of other objects
        #[arg(long)]
        extra: Option<PathBuf>,

        /// Directory of linked innerwear images
        #[arg(long)]
        inner: Option<PathBuf>,
    },

    /// Object catalog
    #[command(subcommand)]
    Catalog(CatalogCommand),

    /// Browse the file lists
    Files {
        /// File list directory
        #[arg(short, long)]
        root: PathBuf,

        /// Only show items whose name contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Print JSON instead of a tree
        #[arg(long)]
        json: bool,
    },

    /// Locate an archive by hash under the game data directory
    Find {
        hash: String,

        /// Game data directory; defaults to the configured one
        #[arg(long)]
        data: Option<PathBuf>,
    },

    /// Read or change preferences
    #[command(subcommand)]
    Prefs(PrefsCommand),
}

#[derive(Subcommand)]
enum CatalogCommand {
    /// Rebuild the catalog from a CMX data dump
    Build {
        /// JSON dump written by the CMX extractor
        cmx: PathBuf,
    },

    /// List the rows of a table
    Query {
        table: String,

        #[arg(long)]
        id: Option<u32>,
    },

    /// Find objects by archive hash
    Hash {
        hash: String,
    },

    /// Find the object a model file belongs to
    Guess {
        aqp: String,
    },
}

#[derive(Subcommand)]
enum PrefsCommand {
    Get {
        key: Option<String>,
    },
    Set {
        key: String,
        value: String,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Material { name } => cmd_material(&name)?,
        Commands::Classify { files, colors } => cmd_classify(&files, colors.as_deref())?,
        Commands::Textures {
            aqp,
            textures,
            skin,
            extra,
            inner,
        } => cmd_textures(&aqp, &textures, skin.as_deref(), extra.as_deref(), inner.as_deref())?,
        Commands::Catalog(command) => cmd_catalog(&cli.state_dir, command)?,
        Commands::Files { root, search, json } => cmd_files(&root, search.as_deref(), json)?,
        Commands::Find { hash, data } => cmd_find(&cli.state_dir, &hash, data)?,
        Commands::Prefs(command) => cmd_prefs(&cli.state_dir, command)?,
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_material(name: &str) -> Result<()> {
    let identity = MaterialIdentity::decode(name)?;

    #[derive(Serialize)]
    struct Output<'a> {
        identity: &'a MaterialIdentity,
        encoded: String,
        shader_family: pso2_tools_lib::material::ShaderFamily,
        render: pso2_tools_lib::material::RenderSettings,
    }

    print_json(&Output {
        encoded: identity.encode(),
        shader_family: pso2_tools_lib::material::ShaderFamily::from_identity(&identity),
        render: pso2_tools_lib::material::RenderSettings::from_identity(&identity),
        identity: &identity,
    })
}

fn cmd_classify(files: &[String], colors: Option<&Path>) -> Result<()> {
    let table = match colors {
        Some(path) => Some(
            ColorChannelTable::load(path)
                .with_context(|| format!("Failed to load {}", path.display()))?,
        ),
        None => None,
    };

    for file in files {
        let info = classify(file);
        let channels = table.as_ref().map(|t| t.object_channels(&info));

        print_json(&serde_json::json!({
            "info": info,
            "description": info.description(),
            "body_type": info.body_type(),
            "uv_mapping": info.uv_mapping(),
            "colors": channels,
        }))?;
    }

    Ok(())
}

fn image_names(dir: Option<&Path>) -> Result<Vec<String>> {
    let Some(dir) = dir else {
        return Ok(vec![]);
    };

    let mut names = vec![];
    for entry in std::fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

fn cmd_textures(
    aqp: &Path,
    textures: &Path,
    skin: Option<&Path>,
    extra: Option<&Path>,
    inner: Option<&Path>,
) -> Result<()> {
    let info = AqpInfo::load(aqp).with_context(|| format!("Failed to load {}", aqp.display()))?;

    // Linked innerwear images sit alongside the model's own.
    let mut own = image_names(Some(textures))?;
    own.extend(image_names(inner)?);

    let mut model = ModelMaterials::new(info.materials, TexturePool::new(own));
    model.skin_textures = TexturePool::new(image_names(skin)?);
    model.extra_textures = TexturePool::new(image_names(extra)?);

    log::info!(
        "{} materials, {} images ({} skin, {} extra)",
        model.materials.len(),
        model.textures.len(),
        model.skin_textures.len(),
        model.extra_textures.len()
    );

    let resolved = model
        .materials
        .iter()
        .map(|material| {
            serde_json::json!({
                "material": material.fbx_name(),
                "textures": model.get_textures(material),
            })
        })
        .collect::<Vec<_>>();

    print_json(&resolved)
}

fn cmd_catalog(state_dir: &Path, command: CatalogCommand) -> Result<()> {
    let catalog = ObjectCatalog::open(state_dir)?;

    match command {
        CatalogCommand::Build { cmx } => {
            let data = CmxData::load(&cmx)?;
            let summary = catalog.build(&data)?;
            print_json(&summary)?;
        }
        CatalogCommand::Query { table, id } => {
            let Some(table) = Table::from_name(&table) else {
                let names = Table::ALL.iter().map(|t| t.name()).collect::<Vec<_>>();
                bail!("Unknown table \"{}\". Expected one of: {}", table, names.join(", "));
            };
            print_json(&catalog.query(table, id)?)?;
        }
        CatalogCommand::Hash { hash } => {
            print_json(&catalog.find_by_file_hash(&hash)?)?;
        }
        CatalogCommand::Guess { aqp } => match cmx::guess_object(&catalog, &aqp)? {
            Some(object) => print_json(&object)?,
            None => bail!("No catalog object matches {}", aqp),
        },
    }

    Ok(())
}

fn cmd_files(root: &Path, search: Option<&str>, json: bool) -> Result<()> {
    let groups: Vec<_> = match search {
        Some(text) => filelist::search(filelist::file_groups(root), text).collect(),
        None => filelist::file_groups(root).collect(),
    };

    if json {
        return print_json(&groups);
    }

    ptree::print_tree(&filelist::build_tree(&groups))?;
    Ok(())
}

fn cmd_find(state_dir: &Path, hash: &str, data: Option<PathBuf>) -> Result<()> {
    let data = match data {
        Some(data) => data,
        None => Preferences::open(state_dir)?
            .pso2_data_path()?
            .context("No game data directory configured or detected")?,
    };

    match filelist::find_ice_file(&data, hash) {
        Some(path) => println!("{}", path.display()),
        None => bail!("{} not found under {}", hash, data.display()),
    }
    Ok(())
}

fn cmd_prefs(state_dir: &Path, command: PrefsCommand) -> Result<()> {
    let prefs = Preferences::open(state_dir)?;

    match command {
        PrefsCommand::Get { key: Some(key) } => {
            println!("{}", prefs.get(&key)?.unwrap_or_default());
        }
        PrefsCommand::Get { key: None } => {
            for key in KEYS {
                println!("{} = {}", key, prefs.get(key)?.unwrap_or_default());
            }
        }
        PrefsCommand::Set { key, value } => prefs.set(&key, &value)?,
    }

    Ok(())
}
