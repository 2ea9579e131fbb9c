//! Bézier curve model.
//!
//! Curves own an [`Object`](crate::scene::Object) whose geometry is baked in
//! world (pixel) space, so its transform stays identity. Every vertex also
//! carries the curve's control points for the GPU distance solver.
//!
//! - [`CubicBezier`] tessellates into a ribbon of quads whose count follows the
//!   approximate arc length.
//! - [`QuadraticBezier`] is a fixed padded bounding quad; the fragment stage
//!   solves the curve analytically.

mod coeffs;
mod cubic;
pub mod distance;
mod picking;
mod quadratic;

pub use coeffs::CubicCoefficients;
pub use cubic::{
    step_count, CubicBezier, CubicResize, ARC_LENGTH_SUBDIVISIONS, RIBBON_HALF_THICKNESS,
};
pub use picking::{pick_control_point, pick_curve, ControlPoint, EditableCurve, EDIT_DISTANCE_THRESHOLD};
pub use quadratic::{QuadraticBezier, QuadraticResize, BOUNDS_PADDING};
