//! Indexed face/vertex mesh representation.
//!
//! [`IndexedMesh`] is the exchange format at the library boundary: a list
//! of 3D positions plus a list of faces, each an ordered list of vertex
//! indices. The subdivision driver accepts and returns this type; the
//! half-edge structure is an internal working representation between
//! [`build`](crate::mesh::build) and [`restore`](crate::mesh::restore).
//!
//! Per-vertex normals ride along as an optional attribute: the subdivision
//! core never reads them, and the driver recomputes them from scratch on
//! its output via [`IndexedMesh::recalc_vertex_normals`].

use nalgebra::{Point3, Vector3};

/// An indexed polygon mesh: positions plus face loops of arbitrary degree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexedMesh {
    /// Vertex positions.
    pub positions: Vec<Point3<f64>>,

    /// Faces, each an ordered (counter-clockwise) list of vertex indices.
    pub faces: Vec<Vec<usize>>,

    /// Per-vertex unit normals; empty until
    /// [`recalc_vertex_normals`](Self::recalc_vertex_normals) runs.
    pub normals: Vec<Vector3<f64>>,
}

impl IndexedMesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh from positions and faces, with no normals.
    pub fn from_parts(positions: Vec<Point3<f64>>, faces: Vec<Vec<usize>>) -> Self {
        Self {
            positions,
            faces,
            normals: Vec::new(),
        }
    }

    /// Whether the mesh has at least one vertex and one face.
    pub fn is_ready(&self) -> bool {
        !self.positions.is_empty() && !self.faces.is_empty()
    }

    /// Get the number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of faces.
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Return a copy with every face fan-triangulated.
    ///
    /// A face `[v0, v1, …, vk]` becomes the triangles `[v0, vi, vi+1]`;
    /// triangles pass through unchanged. Positions are shared, normals are
    /// dropped (they no longer match the connectivity).
    pub fn triangulated(&self) -> IndexedMesh {
        let mut faces = Vec::with_capacity(self.faces.len());
        for face in &self.faces {
            if face.len() <= 3 {
                faces.push(face.clone());
                continue;
            }
            for i in 1..face.len() - 1 {
                faces.push(vec![face[0], face[i], face[i + 1]]);
            }
        }
        IndexedMesh::from_parts(self.positions.clone(), faces)
    }

    /// Recompute per-vertex unit normals from positions and faces.
    ///
    /// Each face contributes its area-weighted normal (Newell's method,
    /// which is exact for planar polygons and robust for near-planar ones)
    /// to all of its corners; the accumulated vectors are then normalized.
    /// Vertices with no incident area get a zero normal.
    pub fn recalc_vertex_normals(&mut self) {
        let mut normals = vec![Vector3::zeros(); self.positions.len()];

        for face in &self.faces {
            let mut n = Vector3::zeros();
            for i in 0..face.len() {
                let p = &self.positions[face[i]];
                let q = &self.positions[face[(i + 1) % face.len()]];
                n.x += (p.y - q.y) * (p.z + q.z);
                n.y += (p.z - q.z) * (p.x + q.x);
                n.z += (p.x - q.x) * (p.y + q.y);
            }
            for &vi in face {
                normals[vi] += n;
            }
        }

        for n in &mut normals {
            let len = n.norm();
            if len > 1e-12 {
                *n /= len;
            } else {
                *n = Vector3::zeros();
            }
        }

        self.normals = normals;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> IndexedMesh {
        IndexedMesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![vec![0, 1, 2, 3]],
        )
    }

    #[test]
    fn test_ready() {
        assert!(!IndexedMesh::new().is_ready());
        assert!(quad().is_ready());
        assert!(!IndexedMesh::from_parts(vec![Point3::origin()], vec![]).is_ready());
    }

    #[test]
    fn test_triangulate_quad() {
        let tris = quad().triangulated();
        assert_eq!(tris.faces, vec![vec![0, 1, 2], vec![0, 2, 3]]);
        assert_eq!(tris.positions.len(), 4);
    }

    #[test]
    fn test_triangulate_keeps_triangles() {
        let mesh = IndexedMesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.5, 1.0, 0.0),
            ],
            vec![vec![0, 1, 2]],
        );
        assert_eq!(mesh.triangulated().faces, mesh.faces);
    }

    #[test]
    fn test_triangulate_pentagon_fan() {
        let mesh = IndexedMesh::from_parts(
            vec![Point3::origin(); 5],
            vec![vec![0, 1, 2, 3, 4]],
        );
        assert_eq!(
            mesh.triangulated().faces,
            vec![vec![0, 1, 2], vec![0, 2, 3], vec![0, 3, 4]]
        );
    }

    #[test]
    fn test_vertex_normals_planar_quad() {
        let mut mesh = quad();
        mesh.recalc_vertex_normals();

        assert_eq!(mesh.normals.len(), 4);
        for n in &mesh.normals {
            // CCW winding in the xy plane points along +z.
            assert!((n - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-10);
        }
    }

    #[test]
    fn test_vertex_normals_isolated_vertex() {
        let mut mesh = quad();
        mesh.positions.push(Point3::new(5.0, 5.0, 5.0));
        mesh.recalc_vertex_normals();

        assert_eq!(mesh.normals.len(), 5);
        assert_eq!(mesh.normals[4], Vector3::zeros());
    }
}
