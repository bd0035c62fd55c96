//! # dxfgraph
//!
//! A pure Rust library for decoding DXF files into a linked document graph.
//!
//! The reader accepts both ASCII and Binary DXF, picks the text encoding from
//! the file version and `$DWGCODEPAGE`, decodes every section into typed
//! records and then resolves the handle references between them: entity
//! owners, block names, style references, hatch boundary contours and
//! dimension style overrides.
//!
//! ## Features
//!
//! - ASCII and Binary DXF, AC1012 onwards
//! - 29 entity types and the nine symbol tables
//! - Dictionaries, layouts, groups, multiline styles, image and underlay definitions
//! - Extended data (XData) and application-defined groups
//! - Deferred reference resolution with recoverable notifications
//! - Object coordinate system transforms
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dxfgraph::{read_dxf, EntityType};
//!
//! let doc = read_dxf("sample.dxf")?;
//!
//! for (_, entity) in doc.entities() {
//!     if let EntityType::Line(line) = entity {
//!         println!("line on {}: {:?} -> {:?}", line.common.layer, line.start, line.end);
//!     }
//! }
//!
//! for notification in doc.notifications.iter() {
//!     println!("{}", notification);
//! }
//! # Ok::<(), dxfgraph::DxfError>(())
//! ```
//!
//! ## Architecture
//!
//! - `io::dxf` - value cursors, section decoders and the reference fix-up pass
//! - `CadDocument` - arenas of entities and objects plus the symbol tables
//! - `types::transform` - arbitrary axis algorithm for OCS/WCS conversion

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod classes;
pub mod document;
pub mod entities;
pub mod error;
pub mod io;
pub mod notification;
pub mod objects;
pub mod tables;
pub mod types;
pub mod xdata;

// Re-export commonly used types
pub use error::{DxfError, Result};
pub use types::{
    conversion_factor, transform, Color, CoordinateFrame, DxfVersion, Handle, LineWeight,
    Transparency, Units, Vector2, Vector3,
};

// Re-export entity types
pub use entities::{
    Arc, Circle, Dimension, Ellipse, EntityType, Hatch, Insert, Line, LwPolyline, MText, Point,
    Polyline, Spline, Text,
};

// Re-export table types
pub use tables::{
    AppId, BlockRecord, DimStyle, Layer, LineType, Table, TableEntry, TextStyle, Ucs, VPort, View,
};

// Re-export document
pub use document::{CadDocument, EntityId, ObjectId};
pub use notification::{Notification, NotificationType};

// Re-export I/O types
pub use io::dxf::{read_dxf, DxfReader, DxfReaderConfiguration};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
