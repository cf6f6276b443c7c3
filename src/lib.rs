// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Orthographic 3D scene setup built on wgpu.
//!
//! Orthoview bootstraps a scene graph, an orthographic camera, trackball
//! controls, a default light rig, an axes helper and a screen-space label
//! overlay, and frames any set of objects with a single call to the camera
//! fitter.
//!
//! # Key entry points
//!
//! - [`stage::Stage`] - scene, camera, controls and overlay for one viewport
//! - [`camera::fit::CameraFitter`] - zoom and place the camera so objects
//!   fill the viewport
//! - [`scene::Scene`] - objects, lights and helpers
//! - [`picking::Raycaster`] - pointer picking, accelerated by an optional
//!   [`picking::BoundsTree`] per geometry
//! - [`renderer::SceneRenderer`] - wgpu forward renderer
//! - [`options::Options`] - TOML-backed configuration
//!
//! With the `viewer` feature, `Viewer` opens a winit window and runs the
//! animation loop: render the scene, render labels, update controls.
//!
//! ```
//! use glam::Vec3;
//! use orthoview::{options::Options, scene::{Geometry, Object3D}, stage::Stage};
//!
//! let mut stage = Stage::new(100.0, 100.0, &Options::default());
//! let _ = stage.scene.add(Object3D::mesh("cube", Geometry::cuboid(Vec3::ONE)));
//! assert_eq!(stage.fit_scene(), 100.0);
//! ```

pub mod camera;
pub mod error;
pub mod gpu;
pub mod input;
pub mod math;
pub mod options;
pub mod overlay;
pub mod picking;
pub mod renderer;
pub mod scene;
pub mod stage;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use camera::fit::{fit_camera, CameraFitter};
pub use error::OrthoviewError;
pub use stage::Stage;
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
