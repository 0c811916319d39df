//! Core domain models for addoncat
//!
//! This module contains the plain records handed between the catalog
//! client, the update cache and the caller:
//! - Items and addons
//! - Dependencies of an addon
//! - Repositories addons originate from
//! - Update records reported by the catalog

mod addon;
mod dependency;
mod item;
mod repository;
mod update_record;

pub use addon::{Addon, License};
pub use dependency::{Dependency, DependencyKind};
pub use item::Item;
pub use repository::Repository;
pub use update_record::UpdateRecord;
