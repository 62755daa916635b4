pub mod config;
pub mod connection;
pub mod error;
pub mod id;
pub mod metadata;
pub mod model;
pub mod placement;
pub mod seed;
pub mod store;
pub mod timeline;
pub mod viewport;

pub use config::CanvasConfig;
pub use connection::{Connection, EdgeTone, connection_curve, route_connections};
pub use error::{VcError, VcResult};
pub use id::NodeId;
pub use metadata::{MetadataMap, NodeMetadata};
pub use model::*;
pub use placement::PlacementResolver;
pub use store::NodeStore;
pub use viewport::Viewport;

// Re-export kurbo geometry so downstream crates don't need a direct dependency
pub use kurbo::{Point, Rect, Size, Vec2};
