use convert_case::{Case, Casing};

/// Lower-case an identifier and drop its word separators.
///
/// This is the label form used for table names, foreign-key columns and
/// back-reference accessors (`GroceryItem` and `grocery-item` both become
/// `groceryitem`).
#[must_use]
pub fn flat(ident: &str) -> String {
    ident.to_case(Case::Flat)
}

/// Column or relationship name for an authored property name. Casing is
/// kept; dashes become underscores so the name is a valid identifier.
#[must_use]
pub fn column_ident(ident: &str) -> String {
    ident.replace('-', "_")
}
