//! Entity types (ENTITIES section and block bodies)

use crate::types::{Color, Handle, LineWeight, Transparency};
use crate::xdata::ExtendedData;

macro_rules! impl_entity {
    ($ty:ty, $name:expr) => {
        impl $crate::entities::Entity for $ty {
            fn common(&self) -> &$crate::entities::EntityCommon {
                &self.common
            }

            fn common_mut(&mut self) -> &mut $crate::entities::EntityCommon {
                &mut self.common
            }

            fn entity_type(&self) -> &'static str {
                $name
            }
        }
    };
}

pub mod arc;
pub mod attribute_definition;
pub mod circle;
pub mod dimension;
pub mod ellipse;
pub mod face3d;
pub mod hatch;
pub mod insert;
pub mod leader;
pub mod line;
pub mod lwpolyline;
pub mod mesh;
pub mod mline;
pub mod mtext;
pub mod point;
pub mod polyline;
pub mod raster_image;
pub mod ray;
pub mod solid;
pub mod spline;
pub mod text;
pub mod tolerance;
pub mod underlay;
pub mod viewport;

pub use arc::Arc;
pub use attribute_definition::{Attribute, AttributeBase, AttributeDefinition, AttributeFlags};
pub use circle::Circle;
pub use dimension::{Dimension, DimensionKind};
pub use ellipse::Ellipse;
pub use face3d::{Face3D, InvisibleEdgeFlags};
pub use hatch::{BoundaryEdge, BoundaryPath, BoundaryPathFlags, Hatch, HatchPatternLine};
pub use insert::Insert;
pub use leader::Leader;
pub use line::Line;
pub use lwpolyline::{LwPolyline, LwVertex};
pub use mesh::Mesh;
pub use mline::{MLine, MLineSegment, MLineVertex};
pub use mtext::MText;
pub use point::Point;
pub use polyline::{Polyline, PolylineFlags, PolylineKind, Vertex};
pub use raster_image::{RasterImage, Wipeout};
pub use ray::{Ray, XLine};
pub use solid::Solid;
pub use spline::{Spline, SplineFlags};
pub use text::Text;
pub use tolerance::Tolerance;
pub use underlay::{Underlay, UnderlayKind};
pub use viewport::Viewport;

/// Fields shared by every entity record
#[derive(Debug, Clone, PartialEq)]
pub struct EntityCommon {
    /// Code 5
    pub handle: Handle,
    /// Owner as written in the file (code 330)
    pub owner: Handle,
    /// Code 8
    pub layer: String,
    /// Code 6
    pub line_type: String,
    /// Code 48
    pub line_type_scale: f64,
    /// Codes 62 and 420
    pub color: Color,
    /// Code 370
    pub line_weight: LineWeight,
    /// Code 440
    pub transparency: Transparency,
    /// Code 60
    pub invisible: bool,
    /// Code 67
    pub paper_space: bool,
    /// Code 410
    pub layout_tab: String,
    /// Code 360 inside `{ACAD_XDICTIONARY`
    pub extension_dictionary: Handle,
    /// Codes 330 inside `{ACAD_REACTORS`
    pub reactors: Vec<Handle>,
    pub extended_data: ExtendedData,
}

impl EntityCommon {
    pub fn new() -> Self {
        EntityCommon {
            handle: Handle::NULL,
            owner: Handle::NULL,
            layer: "0".to_string(),
            line_type: "ByLayer".to_string(),
            line_type_scale: 1.0,
            color: Color::ByLayer,
            line_weight: LineWeight::ByLayer,
            transparency: Transparency::ByLayer,
            invisible: false,
            paper_space: false,
            layout_tab: String::new(),
            extension_dictionary: Handle::NULL,
            reactors: Vec::new(),
            extended_data: ExtendedData::new(),
        }
    }
}

impl Default for EntityCommon {
    fn default() -> Self {
        Self::new()
    }
}

/// Access to the shared entity fields
pub trait Entity {
    fn common(&self) -> &EntityCommon;

    fn common_mut(&mut self) -> &mut EntityCommon;

    /// Record name as written after code 0
    fn entity_type(&self) -> &'static str;

    fn handle(&self) -> Handle {
        self.common().handle
    }

    fn layer(&self) -> &str {
        &self.common().layer
    }
}


/// A decoded entity
#[derive(Debug, Clone, PartialEq)]
pub enum EntityType {
    Arc(Arc),
    AttributeDefinition(AttributeDefinition),
    Circle(Circle),
    Dimension(Dimension),
    Ellipse(Ellipse),
    Face3D(Face3D),
    Hatch(Hatch),
    Insert(Insert),
    Leader(Leader),
    Line(Line),
    LwPolyline(LwPolyline),
    Mesh(Mesh),
    MLine(MLine),
    MText(MText),
    Point(Point),
    Polyline(Polyline),
    RasterImage(RasterImage),
    Ray(Ray),
    Solid(Solid),
    Spline(Spline),
    Text(Text),
    Tolerance(Tolerance),
    Trace(Solid),
    Underlay(Underlay),
    Viewport(Viewport),
    Wipeout(Wipeout),
    XLine(XLine),
}

macro_rules! dispatch {
    ($self:expr, $e:ident => $body:expr) => {
        match $self {
            EntityType::Arc($e) => $body,
            EntityType::AttributeDefinition($e) => $body,
            EntityType::Circle($e) => $body,
            EntityType::Dimension($e) => $body,
            EntityType::Ellipse($e) => $body,
            EntityType::Face3D($e) => $body,
            EntityType::Hatch($e) => $body,
            EntityType::Insert($e) => $body,
            EntityType::Leader($e) => $body,
            EntityType::Line($e) => $body,
            EntityType::LwPolyline($e) => $body,
            EntityType::Mesh($e) => $body,
            EntityType::MLine($e) => $body,
            EntityType::MText($e) => $body,
            EntityType::Point($e) => $body,
            EntityType::Polyline($e) => $body,
            EntityType::RasterImage($e) => $body,
            EntityType::Ray($e) => $body,
            EntityType::Solid($e) => $body,
            EntityType::Spline($e) => $body,
            EntityType::Text($e) => $body,
            EntityType::Tolerance($e) => $body,
            EntityType::Trace($e) => $body,
            EntityType::Underlay($e) => $body,
            EntityType::Viewport($e) => $body,
            EntityType::Wipeout($e) => $body,
            EntityType::XLine($e) => $body,
        }
    };
}

impl EntityType {
    pub fn common(&self) -> &EntityCommon {
        dispatch!(self, e => &e.common)
    }

    pub fn common_mut(&mut self) -> &mut EntityCommon {
        dispatch!(self, e => &mut e.common)
    }

    pub fn handle(&self) -> Handle {
        self.common().handle
    }

    /// Record name as written after code 0
    pub fn entity_type(&self) -> &'static str {
        match self {
            EntityType::Trace(_) => "TRACE",
            EntityType::Wipeout(_) => "WIPEOUT",
            EntityType::XLine(_) => "XLINE",
            EntityType::Underlay(u) => u.kind.entity_name(),
            other => dispatch!(other, e => Entity::entity_type(e)),
        }
    }

    /// Insert or dimension block name, for block resolution
    pub fn block_name(&self) -> Option<&str> {
        match self {
            EntityType::Insert(i) => Some(&i.block_name),
            EntityType::Dimension(d) => Some(&d.block_name),
            _ => None,
        }
    }
}
