//! SMIL preset core
//!
//! Turns presentation animation presets (`ooo-entrance-fly-in`,
//! `ooo-exit-box`, ...) into declarative timed primitives: assignments,
//! interpolations, reveal masks and motion paths, plus the quick
//! reverse/forward bundles a scrubbing player uses to jump between clicks.
//! The crate never executes time; [`sampling`] evaluates primitives offline.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod geometry;
pub mod ids;
pub mod interp;
pub mod motion_path;
pub mod partition;
pub mod primitive;
pub mod quick;
pub mod registry;
pub mod request;
pub mod result;
pub mod sampling;
pub mod subtype;
pub mod sweep;
pub mod timeline;
pub mod timing;
pub mod value;

mod builder;
mod effects;

// Re-exports for drivers
pub use config::Config;
pub use dispatch::{dispatch, Synthesizer};
pub use error::{EffectError, Result};
pub use geometry::{compass_offset, edge_offset, Compass, DocumentBounds, Edge, ObjectGeometry};
pub use ids::{IdAllocator, IdSource, PrimitiveId, SharedIdAllocator};
pub use interp::KeySpline;
pub use motion_path::MotionPath;
pub use primitive::{Assign, Interpolate, MaskShape, MotionAlongPath, Primitive, RevealMask};
pub use quick::{Polarity, QuickBundle};
pub use registry::{Effect, EffectClass, Entrance, Exit};
pub use request::{parse_request_json, AnimationRequest};
pub use result::EffectResult;
pub use sampling::{apply_bundle, final_state, sample_object, ObjectState, Schedule};
pub use timeline::{ObjectRegistry, PageSource, PageTimeline, PresentationTimeline};
pub use timing::{Begin, BeginTrigger, DurationKind, DurationSource, EventRef, TimingNode};
pub use value::{AttrValue, Attribute, Visibility};
