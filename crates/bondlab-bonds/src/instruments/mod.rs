//! Bond instruments.
//!
//! A single [`Bond`] type covers every supported structure; what differs is
//! the [`StructuralVariant`] that produced its cash flows and an optional
//! put or call [`ExerciseOverlay`](crate::types::ExerciseOverlay).

mod bond;

pub use bond::{Bond, StructuralVariant};
