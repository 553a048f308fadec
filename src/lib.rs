pub mod cmx;
pub mod colors;
pub mod db;
pub mod filelist;
pub mod ids;
pub mod material;
pub mod object_info;
pub mod preferences;

pub use cmx::{CatalogError, ObjectCatalog};
pub use material::{Material, MaterialIdentity, MaterialTextureBundle, TexturePool};
pub use object_info::{classify, ObjectInfo};
