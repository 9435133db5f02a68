//! Camera, controls and surroundings of the 3D model view

pub mod camera;
pub mod controls;
pub mod environment;
pub mod frame;
pub mod placement;

pub use camera::Camera3D;
pub use controls::{OrbitControls, Spherical};
pub use environment::{DirectionalLight, Floor, Fog, HemisphereLight, SceneEnvironment, SkyGradient, SkyParameters};
pub use frame::{DrawItem, FrameScene};
pub use placement::{IntroSpin, ModelPlacement, NoticePhase};
