//! Static game data: roster, equipment catalog, item and materia names.

mod character;
pub mod equipment;
mod item;
mod materia;

pub use character::Character;
pub use equipment::{
    Catalog, CatalogId, EquipId, EquipmentInfo, EquipmentItem, EquipmentKind, ItemId,
    NOTHING_EQUIPPED,
};
pub use item::item_name;
pub use materia::{materia_name, parse_materia};
