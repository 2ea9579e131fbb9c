//! Scene object model.
//!
//! A scene is a flat list of [`Object`]s owned by the batch renderer. Each
//! object carries its own mesh (vertices + local triangle indices) and a
//! position / rotation / scale transform.

mod object;
mod vertex;

pub use object::{Object, ObjectId, Triangle};
pub use vertex::{Vertex, VertexExtra};
