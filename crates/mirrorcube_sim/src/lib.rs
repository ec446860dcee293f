//! Headless 3×3×3 cube that implements [`CubeInstance`].
//!
//! [`SimCube`] tracks the position and stickers of every cubelet, answers ray
//! queries against axis-aligned boxes, and animates turns on a queue that is
//! advanced by [`CubeInstance::step()`]. It has no renderer; hosts that draw
//! the cube read its state and [`SimCube::animated_twist()`].
//!
//! [`CubeInstance`]: mirrorcube_core::CubeInstance
//! [`CubeInstance::step()`]: mirrorcube_core::CubeInstance::step

mod animation;
mod cube;
mod state;


pub use animation::{Twist, TwistAnimation, TwistAnimationState, TwistTarget};
pub use cube::{SimCube, SimCubeParams};
pub use state::{Color, CubeImage, Cubelet};
