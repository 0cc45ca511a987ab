//! # kitx Core
//!
//! Core data structures for the kitx combination engine.
//!
//! - [`FeatureVector`] - Dense profile over named feature axes
//! - [`Item`] / [`ItemRecord`] - A catalogued item and its decoded input row
//! - [`Catalog`] - Validated, immutable items grouped by category
//! - [`CatalogHandle`] - Atomically swappable reference to the active catalog
//! - [`Error`] - The error taxonomy shared by every kitx crate
//!
//! ## Example
//!
//! ```rust
//! use kitx_core::{Catalog, ItemRecord};
//!
//! let catalog = Catalog::from_records(vec![
//!     ItemRecord::new("Head", "cap", vec![1.0, 0.0, 0.0]),
//!     ItemRecord::new("Face", "glasses", vec![0.0, 1.0, 0.0]),
//! ])
//! .unwrap();
//!
//! assert_eq!(catalog.dim(), 3);
//! assert_eq!(catalog.require("Head").unwrap().len(), 1);
//! ```

pub mod catalog;
pub mod error;
pub mod handle;
pub mod item;
pub mod vector;

pub use catalog::{Catalog, Category, DEFAULT_GENRE_AXES};
pub use error::{CatalogError, Error, InputError, ResourceError, Result};
pub use handle::CatalogHandle;
pub use item::{Item, ItemRecord};
pub use vector::FeatureVector;
