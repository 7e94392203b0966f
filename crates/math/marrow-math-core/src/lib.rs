//! marrow-math-core: the 4x4 transform algebra the animation core builds on
//! (engine-agnostic, f32 throughout).

pub mod error;
pub mod mat4;
pub mod quat;
pub mod vec3;

pub use error::DegenerateMatrixError;
pub use mat4::Mat4;
pub use quat::Quat;
pub use vec3::Vec3;
