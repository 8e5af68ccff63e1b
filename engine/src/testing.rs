//! Fixtures shared by the engine's unit tests.

use inlay_catalog::{Catalog, CatalogBuilder, PropertyDef};
use inlay_core::{KeyDescriptor, PrimitiveKind};

/// Widgets (Int32 key) with a to-one Maker and to-many Parts, and Makers
/// (String key).
pub fn fixture_catalog() -> Catalog {
    let mut builder = CatalogBuilder::new();
    builder
        .add_type("Widget")
        .key("id", PrimitiveKind::Int32)
        .property(PropertyDef::new("name", PrimitiveKind::String).nullable())
        .navigation("Maker", "Makers")
        .navigation_many("Parts", "Widgets")
        .done()
        .unwrap();
    builder
        .add_type("Maker")
        .key("code", PrimitiveKind::String)
        .property(PropertyDef::new("name", PrimitiveKind::String).nullable())
        .navigation_many("Widgets", "Widgets")
        .done()
        .unwrap();
    builder.add_set("Widgets", "Widget").add_set("Makers", "Maker");
    builder.build().unwrap()
}

pub fn widget_key(predicate: &str) -> KeyDescriptor {
    KeyDescriptor::parse(predicate, "Widget", &[("id", PrimitiveKind::Int32)]).unwrap()
}

pub fn maker_key(predicate: &str) -> KeyDescriptor {
    KeyDescriptor::parse(predicate, "Maker", &[("code", PrimitiveKind::String)]).unwrap()
}
