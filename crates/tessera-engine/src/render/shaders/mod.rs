//! Built-in WGSL programs.
//!
//! Vertex modules expose `vs_main`, fragment modules `fs_main`. All vertex
//! modules follow the batch renderer's input contract.

/// Mesh vertex stage: matrix-texture transform plus depth fog.
pub const MESH_VERTEX: &str = include_str!("mesh_vertex.wgsl");

/// Flat vertex-colour fragment stage.
pub const MESH_FRAGMENT: &str = include_str!("mesh_fragment.wgsl");

/// Curve vertex stage; forwards pixel position and control points `a_a`..`a_d`.
pub const CURVE_VERTEX: &str = include_str!("curve_vertex.wgsl");

/// Newton-solver stroke for cubic ribbons, with control-point markers.
pub const CUBIC_BEZIER_FRAGMENT: &str = include_str!("cubic_bezier_fragment.wgsl");

/// Analytic stroke for quadratic bounding quads.
pub const QUADRATIC_BEZIER_FRAGMENT: &str = include_str!("quadratic_bezier_fragment.wgsl");
