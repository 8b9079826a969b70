//! Projection of schema-less NRQL query results into columnar frames.
//!
//! ```rust,ignore
//! use nrql_frames::{BuildOptions, FrameBuilder, ResultSet};
//!
//! let result = ResultSet::from_json(payload)?;
//! let frames = FrameBuilder::new(BuildOptions::default()).build(&result);
//! ```
//!
//! The pipeline is synchronous and total: [`classify`] picks a
//! [`QueryShape`], [`FieldCatalog`] types each field, [`FacetGrouper`] splits
//! faceted rows and [`FrameBuilder`] lays out the frames. Values that do not
//! fit their column become null cells.

pub mod builder;
pub mod catalog;
pub mod coerce;
pub mod config;
pub mod error;
pub mod facet;
pub mod frame;
pub mod reserved;
pub mod shape;
pub mod value;

pub use builder::{FrameBuilder, derive_time};
pub use catalog::{CatalogEntry, ColumnType, FieldCatalog};
pub use config::{BuildOptions, TimeRange};
pub use error::FormatError;
pub use facet::{FacetGroup, FacetGrouper, facet_key};
pub use frame::{Column, ColumnValues, Frame, Visualization};
pub use shape::{QueryShape, classify};
pub use value::{ResultSet, Row};
