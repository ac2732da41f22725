//! Mesh subdivision algorithms.
//!
//! This module provides the subdivision driver and the two per-iteration
//! step algorithms.
//!
//! # Loop Subdivision (Triangle Meshes)
//!
//! Loop subdivision (Loop, 1987) is an approximating subdivision scheme
//! for triangle meshes. Each iteration:
//!
//! 1. Inserts new vertices at weighted positions along each edge
//! 2. Updates original vertex positions based on neighbors
//! 3. Splits each triangle into 4 smaller triangles
//!
//! The result converges to a C² continuous surface (C¹ at extraordinary
//! vertices). The driver triangulates non-triangular input before the
//! first iteration.
//!
//! # Catmull-Clark Subdivision (Polygon Meshes)
//!
//! Catmull-Clark subdivision (Catmull & Clark, 1978) is an approximating
//! subdivision scheme for faces of arbitrary degree. Each iteration:
//!
//! 1. Creates a face point at each face centroid
//! 2. Creates edge points from edge endpoints and adjacent face centroids
//! 3. Updates original vertices using a weighted average of their one-ring
//! 4. Connects each old face of degree k into k quads
//!
//! The result converges to a C² continuous surface (C¹ at extraordinary
//! vertices).
//!
//! # Example
//!
//! ```
//! use tessella::algo::subdivide::{subdivide, SubdivideOptions, SubdivisionRule};
//! use tessella::mesh::IndexedMesh;
//! use nalgebra::Point3;
//!
//! let quad = IndexedMesh::from_parts(
//!     vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.0),
//!         Point3::new(1.0, 1.0, 0.0),
//!         Point3::new(0.0, 1.0, 0.0),
//!     ],
//!     vec![vec![0, 1, 2, 3]],
//! );
//!
//! let options = SubdivideOptions::new(SubdivisionRule::CatmullClark, 1);
//! let out = subdivide(&quad, &options).unwrap();
//! assert_eq!(out.num_vertices(), 9);
//! assert_eq!(out.num_faces(), 4);
//! ```
//!
//! # References
//!
//! - Loop, C. (1987). "Smooth Subdivision Surfaces Based on Triangles."
//!   Master's thesis, University of Utah.
//! - Catmull, E. & Clark, J. (1978). "Recursively generated B-spline surfaces
//!   on arbitrary topological meshes." Computer-Aided Design, 10(6), 350-355.

mod catmull_clark;
mod loop_subdivision;

pub use catmull_clark::catmull_clark_step;
pub use loop_subdivision::loop_step;

use crate::algo::Progress;
use crate::error::{MeshError, Result};
use crate::mesh::{build, restore, HalfEdgeMesh, IndexedMesh, MeshIndex};

/// The subdivision rule applied by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubdivisionRule {
    /// Catmull-Clark: faces of arbitrary degree, k quads per degree-k face.
    CatmullClark,
    /// Loop: triangles only; the driver triangulates the input first.
    Loop,
}

/// Options for the subdivision driver.
#[derive(Debug, Clone)]
pub struct SubdivideOptions {
    /// Which subdivision rule to apply.
    pub rule: SubdivisionRule,

    /// Number of subdivision iterations; 0 is a valid identity transform.
    pub iterations: usize,
}

impl SubdivideOptions {
    /// Create options for the given rule and iteration count.
    pub fn new(rule: SubdivisionRule, iterations: usize) -> Self {
        Self { rule, iterations }
    }

    /// Set the number of iterations.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }
}

/// Subdivide an indexed mesh.
///
/// Builds the half-edge structure once, applies the selected step
/// `options.iterations` times — each iteration reading the previous mesh
/// and producing a fresh one — then flattens the final mesh back to
/// indexed form and recomputes its per-vertex normals. The input mesh is
/// never modified.
///
/// For [`SubdivisionRule::Loop`] the input is fan-triangulated before the
/// half-edge structure is built.
///
/// # Errors
///
/// - [`MeshError::EmptyMesh`] if the input has no vertices or no faces
/// - any construction error from [`build`] for malformed input
/// - any error from the step algorithms (for example the consistency
///   self-test after an iteration)
pub fn subdivide(mesh: &IndexedMesh, options: &SubdivideOptions) -> Result<IndexedMesh> {
    subdivide_with_progress(mesh, options, &Progress::none())
}

/// [`subdivide`] with per-iteration progress reporting.
pub fn subdivide_with_progress(
    mesh: &IndexedMesh,
    options: &SubdivideOptions,
    progress: &Progress,
) -> Result<IndexedMesh> {
    if !mesh.is_ready() {
        return Err(MeshError::EmptyMesh);
    }

    let mut current: HalfEdgeMesh = match options.rule {
        SubdivisionRule::CatmullClark => build(mesh)?,
        SubdivisionRule::Loop => build(&mesh.triangulated())?,
    };
    current.check_consistency()?;

    for iter in 0..options.iterations {
        progress.report(iter, options.iterations, rule_name(options.rule));
        current = apply_step(&current, options.rule)?;
    }
    progress.report(
        options.iterations,
        options.iterations,
        rule_name(options.rule),
    );

    let mut out = restore(&current);
    out.recalc_vertex_normals();
    Ok(out)
}

fn rule_name(rule: SubdivisionRule) -> &'static str {
    match rule {
        SubdivisionRule::CatmullClark => "Catmull-Clark subdivision",
        SubdivisionRule::Loop => "Loop subdivision",
    }
}

fn apply_step<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    rule: SubdivisionRule,
) -> Result<HalfEdgeMesh<I>> {
    match rule {
        SubdivisionRule::CatmullClark => catmull_clark_step(mesh),
        SubdivisionRule::Loop => loop_step(mesh),
    }
}
