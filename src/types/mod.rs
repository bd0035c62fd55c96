//! Value types shared by tables, entities and objects

pub mod color;
pub mod handle;
pub mod line_weight;
pub mod transform;
pub mod transparency;
pub mod units;
pub mod vector;
pub mod version;

pub use color::Color;
pub use handle::Handle;
pub use line_weight::LineWeight;
pub use transform::{transform, CoordinateFrame, Matrix3};
pub use transparency::Transparency;
pub use units::{conversion_factor, Units};
pub use vector::{Vector2, Vector3};
pub use version::DxfVersion;
