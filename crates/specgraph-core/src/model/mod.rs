//! Relational model vocabulary produced by the builder.

pub mod column;
pub mod entity;
pub mod join_table;
pub mod relationship;

pub use column::{Column, ColumnType};
pub use entity::Entity;
pub use join_table::JoinTable;
pub use relationship::{Cardinality, Relationship};
