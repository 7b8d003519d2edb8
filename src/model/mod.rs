//! The flat editing model.
//!
//! Records here are independently addressable through internally generated
//! [`EntityId`]s, which is what form-bound editing needs. They know nothing
//! about the nested CSAF product tree; [`crate::transform`] converts between
//! the two shapes.
//!
//! ```
//! use csaf_bridge::model::{BranchCategory, EditingModel, ProductTreeBranch};
//!
//! let mut model = EditingModel::new();
//! let pro = model.families.add("Pro", None);
//! model.products.push(
//!     ProductTreeBranch::new(BranchCategory::Vendor, "Acme").with_child(
//!         ProductTreeBranch::new(BranchCategory::ProductName, "Widget")
//!             .with_family(pro)
//!             .with_child(ProductTreeBranch::new(BranchCategory::ProductVersion, "1.0")),
//!     ),
//! );
//! assert_eq!(model.version_count(), 1);
//! ```

mod document;
mod family;
mod id_cache;
mod identifiers;
mod product;
mod relationship;
mod snapshot;
mod vulnerability;

pub use document::*;
pub use family::*;
pub use id_cache::*;
pub use identifiers::*;
pub use product::*;
pub use relationship::*;
pub use snapshot::*;
pub use vulnerability::*;
