//! Fixture catalog used across the integration tests.

use inlay_catalog::{Catalog, CatalogBuilder, CatalogResult, PropertyDef};
use inlay_core::{KeyDescriptor, KeyResult, PrimitiveKind};

/// Build the fixture catalog, reporting builder errors.
///
/// - `Widgets` (Widget, Int32 key `id`): to-one `Maker` and `Sub`, to-many `Parts`
/// - `Makers` (Maker, String key `code`): to-many `Widgets`
/// - `Sub` (Sub, Int32 key `id`)
/// - `Lines` (Line, composite key `OrderID` Int64 + `Code` String)
pub fn try_catalog() -> CatalogResult<Catalog> {
    let mut builder = CatalogBuilder::new();
    builder
        .add_type("Widget")
        .key("id", PrimitiveKind::Int32)
        .property(PropertyDef::new("name", PrimitiveKind::String).nullable())
        .property(PropertyDef::new("weight", PrimitiveKind::Double).nullable())
        .property(PropertyDef::complex("dimensions"))
        .navigation("Maker", "Makers")
        .navigation("Sub", "Sub")
        .navigation_many("Parts", "Widgets")
        .navigation_many("Lines", "Lines")
        .done()?;
    builder
        .add_type("Maker")
        .key("code", PrimitiveKind::String)
        .property(PropertyDef::new("name", PrimitiveKind::String).nullable())
        .navigation_many("Widgets", "Widgets")
        .done()?;
    builder
        .add_type("Sub")
        .key("id", PrimitiveKind::Int32)
        .property(PropertyDef::new("label", PrimitiveKind::String).nullable())
        .done()?;
    builder
        .add_type("Line")
        .key("OrderID", PrimitiveKind::Int64)
        .key("Code", PrimitiveKind::String)
        .property(PropertyDef::new("qty", PrimitiveKind::Int32))
        .done()?;
    builder
        .add_set("Widgets", "Widget")
        .add_set("Makers", "Maker")
        .add_set("Sub", "Sub")
        .add_set("Lines", "Line");
    builder.build()
}

/// The fixture catalog.
///
/// # Panics
///
/// Panics if the fixture definitions are inconsistent.
pub fn catalog() -> Catalog {
    try_catalog().unwrap_or_else(|err| panic!("fixture catalog is invalid: {}", err))
}

/// Descriptor for a Widget key predicate such as `7` or `id=7`.
pub fn widget_key(predicate: &str) -> KeyResult<KeyDescriptor> {
    KeyDescriptor::parse(predicate, "Widget", &[("id", PrimitiveKind::Int32)])
}

/// Descriptor for a Sub key predicate.
pub fn sub_key(predicate: &str) -> KeyResult<KeyDescriptor> {
    KeyDescriptor::parse(predicate, "Sub", &[("id", PrimitiveKind::Int32)])
}

/// Descriptor for a Maker key predicate such as `'acme'`.
pub fn maker_key(predicate: &str) -> KeyResult<KeyDescriptor> {
    KeyDescriptor::parse(predicate, "Maker", &[("code", PrimitiveKind::String)])
}
