//! Progress reporting for long-running algorithms.
//!
//! This module provides a simple progress callback mechanism that
//! algorithms can use to report their progress to callers. Subdivision
//! iterations multiply mesh size by four each round, so a run over a large
//! mesh can take a while; the callback lets a caller drive a progress bar
//! or log line without the library taking a dependency on either.
//!
//! # Example
//!
//! ```
//! use tessella::algo::subdivide::{
//!     subdivide_with_progress, SubdivideOptions, SubdivisionRule,
//! };
//! use tessella::algo::Progress;
//! use tessella::mesh::IndexedMesh;
//! use nalgebra::Point3;
//!
//! let mesh = IndexedMesh::from_parts(
//!     vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.0),
//!         Point3::new(0.5, 1.0, 0.0),
//!     ],
//!     vec![vec![0, 1, 2]],
//! );
//!
//! let progress = Progress::new(|current, total, message| {
//!     eprintln!("[{}/{}] {}", current, total, message);
//! });
//!
//! let options = SubdivideOptions::new(SubdivisionRule::Loop, 2);
//! let out = subdivide_with_progress(&mesh, &options, &progress).unwrap();
//! assert_eq!(out.num_faces(), 16);
//! ```

/// A progress callback that receives updates during long-running operations.
///
/// The callback receives:
/// - `current`: Current step (0-based)
/// - `total`: Total number of steps
/// - `message`: Description of the current operation
pub struct Progress {
    callback: Box<dyn Fn(usize, usize, &str) + Send + Sync>,
}

impl Progress {
    /// Create a new progress reporter with the given callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(usize, usize, &str) + Send + Sync + 'static,
    {
        Self {
            callback: Box::new(callback),
        }
    }

    /// Report progress.
    #[inline]
    pub fn report(&self, current: usize, total: usize, message: &str) {
        (self.callback)(current, total, message);
    }

    /// Create a no-op progress reporter that discards all updates.
    pub fn none() -> Self {
        Self::new(|_, _, _| {})
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::none()
    }
}

impl std::fmt::Debug for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Progress").finish_non_exhaustive()
    }
}
