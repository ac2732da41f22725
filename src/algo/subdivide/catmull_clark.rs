//! Catmull-Clark subdivision for polygon meshes.

use nalgebra::{Point3, Vector3};

use crate::error::Result;
use crate::mesh::{
    FaceId, HalfEdgeId, HalfEdgeMesh, MeshIndex, VertexClass, VertexId, VertexRing,
};

/// Perform one Catmull-Clark subdivision iteration.
///
/// Accepts faces of arbitrary degree ≥ 3; every old face of degree k
/// becomes k quadrilaterals in the returned mesh. The input mesh is only
/// read; the result is a freshly allocated mesh.
///
/// # Vertex Rules
///
/// - **Face point**: centroid of the face's corners
/// - **Edge point**: midpoint of the endpoints on a boundary edge;
///   ¼(start + end + both adjacent face centroids) on an interior edge
/// - **Even vertex, interior**: `(n-3)/n · old + 4/n · R − 1/n · S`, where
///   `R` averages the incident edge points, `S` the incident face
///   centroids, and `n` is the valence
/// - **Even vertex, boundary**: `¾ · old + ⅛ · (neighbor1 + neighbor2)`,
///   the neighbors being the far endpoints of the two incident boundary
///   edges (original positions)
///
/// # Errors
///
/// Returns a topology error from the final
/// [`check_consistency`](HalfEdgeMesh::check_consistency) self-test if the
/// rebuilt graph is malformed; with manifold input this indicates an
/// internal defect and is not recoverable.
pub fn catmull_clark_step<I: MeshIndex>(mesh: &HalfEdgeMesh<I>) -> Result<HalfEdgeMesh<I>> {
    let n_old_halfedges = mesh.num_halfedges();
    let n_old_faces = mesh.num_faces();

    let mut out = HalfEdgeMesh::with_capacity(
        mesh.num_vertices() + n_old_faces + mesh.num_edges(),
        4 * n_old_halfedges,
        n_old_halfedges,
    );

    // Step 1: even vertices, one per old vertex, repositioned in step 4.
    for v in mesh.vertex_ids() {
        out.add_vertex(*mesh.position(v));
    }

    // Step 2: one face point per old face, at its centroid.
    let mut centroids: Vec<Point3<f64>> = Vec::with_capacity(n_old_faces);
    let mut face_points: Vec<VertexId<I>> = Vec::with_capacity(n_old_faces);
    for f in mesh.face_ids() {
        let c = mesh.face_centroid(f);
        centroids.push(c);
        face_points.push(out.add_vertex(c));
    }

    // Step 3: one edge point per undirected edge, and a (former, latter)
    // pair of new half-edges splitting every old half-edge at its edge
    // point. The edge point is created when the first half-edge of a pair
    // is visited and reused for the second.
    let mut edge_points: Vec<VertexId<I>> = vec![VertexId::invalid(); n_old_halfedges];
    let mut splits: Vec<(HalfEdgeId<I>, HalfEdgeId<I>)> =
        vec![(HalfEdgeId::invalid(), HalfEdgeId::invalid()); n_old_halfedges];

    for he in mesh.halfedge_ids() {
        let pair = mesh.pair(he);

        let edge_point = if !pair.is_valid() {
            // Boundary edge: plain midpoint.
            out.add_vertex(mesh.edge_midpoint(he))
        } else if edge_points[pair.index()].is_valid() {
            edge_points[pair.index()]
        } else {
            let p0 = mesh.position(mesh.origin(he)).coords;
            let p1 = mesh.position(mesh.dest(he)).coords;
            let c0 = centroids[mesh.face_of(he).index()].coords;
            let c1 = centroids[mesh.face_of(pair).index()].coords;
            out.add_vertex(Point3::from((p0 + p1 + c0 + c1) * 0.25))
        };
        edge_points[he.index()] = edge_point;

        let former = out.add_halfedge();
        let latter = out.add_halfedge();

        let even_start = VertexId::new(mesh.origin(he).index());
        out.halfedge_mut(former).origin = even_start;
        if !out.vertex(even_start).halfedge.is_valid() {
            out.vertex_mut(even_start).halfedge = former;
        }
        out.halfedge_mut(latter).origin = edge_point;
        if !out.vertex(edge_point).halfedge.is_valid() {
            out.vertex_mut(edge_point).halfedge = latter;
        }
        splits[he.index()] = (former, latter);

        // Cross-pair the split halves once both sides of the edge exist.
        if pair.is_valid() && splits[pair.index()].0.is_valid() {
            let (pair_former, pair_latter) = splits[pair.index()];
            out.set_pair(pair_former, latter);
            out.set_pair(pair_latter, former);
        }
    }

    // Step 4: reposition even vertices from the one-ring of the old mesh.
    for v in mesh.vertex_ids() {
        let old_pos = mesh.position(v).coords;
        let ring = VertexRing::around(mesh, v);
        if ring.valence() == 0 {
            continue; // isolated vertex keeps its position
        }

        let new_pos = match ring.classify(mesh) {
            VertexClass::Boundary { prev, next } => {
                old_pos * 0.75
                    + (mesh.position(prev).coords + mesh.position(next).coords) * 0.125
            }
            VertexClass::Interior => {
                let n = ring.valence() as f64;
                let mut r = Vector3::zeros();
                let mut s = Vector3::zeros();
                for &he in ring.halfedges() {
                    r += out.position(edge_points[he.index()]).coords;
                    s += centroids[mesh.face_of(he).index()].coords;
                }
                r /= n;
                s /= n;
                old_pos * ((n - 3.0) / n) + r * (4.0 / n) - s * (1.0 / n)
            }
        };
        out.set_position(VertexId::new(v.index()), Point3::from(new_pos));
    }

    // Step 5: rebuild topology. Each old face of degree k becomes k quads
    // `corner_i -> edgepoint_i -> facepoint -> edgepoint_{i-1}`, assembled
    // from the corner's former half, the previous edge's latter half and
    // two fresh spokes; the spokes shared between adjacent quads of the
    // same old face are paired at the end.
    for f in mesh.face_ids() {
        let old_hes: Vec<HalfEdgeId<I>> = mesh.face_halfedges(f).collect();
        let k = old_hes.len();
        let centroid_vertex = face_points[f.index()];

        let new_faces: Vec<FaceId<I>> = (0..k).map(|_| out.add_face()).collect();
        let mut to_centroid: Vec<HalfEdgeId<I>> = Vec::with_capacity(k);

        for (i, &he) in old_hes.iter().enumerate() {
            let spoke_in = out.add_halfedge(); // edgepoint_i -> facepoint
            let spoke_out = out.add_halfedge(); // facepoint -> edgepoint_{i-1}
            let (h1, _) = splits[he.index()]; // corner_i -> edgepoint_i
            let (_, h2) = splits[mesh.prev(he).index()]; // edgepoint_{i-1} -> corner_i
            let quad = new_faces[i];

            out.halfedge_mut(spoke_in).origin = edge_points[he.index()];
            out.halfedge_mut(spoke_out).origin = centroid_vertex;

            for h in [h1, h2, spoke_in, spoke_out] {
                out.halfedge_mut(h).face = quad;
            }

            out.link(h2, h1);
            out.link(h1, spoke_in);
            out.link(spoke_in, spoke_out);
            out.link(spoke_out, h2);

            out.vertex_mut(edge_points[he.index()]).halfedge = spoke_in;
            out.vertex_mut(centroid_vertex).halfedge = spoke_out;
            out.face_mut(quad).halfedge = spoke_out;
            to_centroid.push(spoke_in);
        }

        for i in 0..k {
            let spoke_out = out.face(new_faces[i]).halfedge;
            let j = (i + k - 1) % k;
            out.set_pair(spoke_out, to_centroid[j]);
        }
    }

    out.check_consistency()?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{build, restore, IndexedMesh};

    fn single_quad() -> HalfEdgeMesh {
        build(&IndexedMesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![vec![0, 1, 2, 3]],
        ))
        .unwrap()
    }

    fn two_quads() -> HalfEdgeMesh {
        build(&IndexedMesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(2.0, 0.0, 0.0),
                Point3::new(2.0, 1.0, 0.0),
            ],
            vec![vec![0, 1, 2, 3], vec![1, 4, 5, 2]],
        ))
        .unwrap()
    }

    fn quad_cube() -> HalfEdgeMesh {
        build(&IndexedMesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(0.0, 0.0, 1.0),
                Point3::new(1.0, 0.0, 1.0),
                Point3::new(1.0, 1.0, 1.0),
                Point3::new(0.0, 1.0, 1.0),
            ],
            vec![
                vec![0, 3, 2, 1],
                vec![4, 5, 6, 7],
                vec![0, 1, 5, 4],
                vec![2, 3, 7, 6],
                vec![0, 4, 7, 3],
                vec![1, 2, 6, 5],
            ],
        ))
        .unwrap()
    }

    /// 4x1 strip of unit quads along the x axis.
    fn quad_strip() -> HalfEdgeMesh {
        let mut positions = Vec::new();
        for j in 0..2 {
            for i in 0..5 {
                positions.push(Point3::new(i as f64, j as f64, 0.0));
            }
        }
        let faces = (0..4).map(|i| vec![i, i + 1, i + 6, i + 5]).collect();
        build(&IndexedMesh::from_parts(positions, faces)).unwrap()
    }

    fn contains_position(mesh: &IndexedMesh, p: Point3<f64>) -> bool {
        mesh.positions.iter().any(|q| (q - p).norm() < 1e-10)
    }

    #[test]
    fn test_unit_quad_one_round() {
        let out = catmull_clark_step(&single_quad()).unwrap();

        // 4 even + 1 face point + 4 edge points.
        assert_eq!(out.num_vertices(), 9);
        assert_eq!(out.num_faces(), 4);
        assert_eq!(out.num_halfedges(), 16);
        for f in out.face_ids() {
            assert_eq!(out.face_degree(f), 4);
        }

        // Every corner is a boundary vertex of valence 2, so the boundary
        // rule applies: 3/4 * corner + 1/8 * (both boundary neighbors).
        assert!((out.position(VertexId::new(0)) - Point3::new(0.125, 0.125, 0.0)).norm() < 1e-10);
        assert!((out.position(VertexId::new(1)) - Point3::new(0.875, 0.125, 0.0)).norm() < 1e-10);
        assert!((out.position(VertexId::new(2)) - Point3::new(0.875, 0.875, 0.0)).norm() < 1e-10);
        assert!((out.position(VertexId::new(3)) - Point3::new(0.125, 0.875, 0.0)).norm() < 1e-10);

        // Face point at the centroid, edge points at boundary midpoints.
        assert!((out.position(VertexId::new(4)) - Point3::new(0.5, 0.5, 0.0)).norm() < 1e-10);
        let restored = restore(&out);
        for p in [
            Point3::new(0.5, 0.0, 0.0),
            Point3::new(1.0, 0.5, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.0, 0.5, 0.0),
        ] {
            assert!(contains_position(&restored, p));
        }

        // Each new quad contains exactly one original corner.
        for f in out.face_ids() {
            let originals = out.face_vertices(f).filter(|v| v.index() < 4).count();
            assert_eq!(originals, 1);
        }
    }

    #[test]
    fn test_two_quads_counts() {
        let out = catmull_clark_step(&two_quads()).unwrap();

        // 6 even + 2 face points + 7 edge points.
        assert_eq!(out.num_vertices(), 15);
        assert_eq!(out.num_faces(), 8);
    }

    #[test]
    fn test_cube_conservation() {
        let mesh = quad_cube();
        let out = catmull_clark_step(&mesh).unwrap();

        // newV = oldV + oldF + oldE; newF = sum of degrees = 2 * oldE.
        assert_eq!(out.num_vertices(), 8 + 6 + 12);
        assert_eq!(out.num_faces(), 24);
        assert_eq!(out.num_halfedges(), 96);

        // Closed mesh stays closed; Euler characteristic is preserved.
        for he in out.halfedge_ids() {
            assert!(!out.is_boundary_halfedge(he));
        }
        let euler = out.num_vertices() as i64 - out.num_edges() as i64 + out.num_faces() as i64;
        assert_eq!(euler, 2);
    }

    #[test]
    fn test_cube_corner_position() {
        let out = catmull_clark_step(&quad_cube()).unwrap();

        // Corner (0,0,0): valence 3, R = (1/4, 1/4, 1/4), S = (1/3, 1/3, 1/3),
        // new = 0*old + (4/3)R - (1/3)S = (2/9, 2/9, 2/9).
        let expected = Point3::new(2.0 / 9.0, 2.0 / 9.0, 2.0 / 9.0);
        assert!((out.position(VertexId::new(0)) - expected).norm() < 1e-10);
    }

    #[test]
    fn test_interior_grid_vertex_fixed_point() {
        // 2x2 grid of unit quads; the center vertex (1,1) is interior with
        // valence 4 and by symmetry must stay exactly in place.
        let mut positions = Vec::new();
        for j in 0..3 {
            for i in 0..3 {
                positions.push(Point3::new(i as f64, j as f64, 0.0));
            }
        }
        let faces = vec![
            vec![0, 1, 4, 3],
            vec![1, 2, 5, 4],
            vec![3, 4, 7, 6],
            vec![4, 5, 8, 7],
        ];
        let mesh: HalfEdgeMesh = build(&IndexedMesh::from_parts(positions, faces)).unwrap();

        let out = catmull_clark_step(&mesh).unwrap();
        assert!((out.position(VertexId::new(4)) - Point3::new(1.0, 1.0, 0.0)).norm() < 1e-10);

        // The whole mesh is planar and stays planar.
        for v in out.vertex_ids() {
            assert!(out.position(v).z.abs() < 1e-12);
        }
    }

    #[test]
    fn test_straight_boundary_stays_collinear() {
        let out = catmull_clark_step(&quad_strip()).unwrap();
        let restored = restore(&out);

        // Interior vertices of the straight bottom boundary are fixed
        // points of the boundary rule.
        for i in 1..4 {
            assert!(
                (out.position(VertexId::new(i)) - Point3::new(i as f64, 0.0, 0.0)).norm() < 1e-10
            );
        }
        // Boundary edge points land on the same line.
        for i in 0..4 {
            assert!(contains_position(
                &restored,
                Point3::new(i as f64 + 0.5, 0.0, 0.0)
            ));
        }
    }

    #[test]
    fn test_two_iterations() {
        let mesh = quad_cube();
        let once = catmull_clark_step(&mesh).unwrap();
        let twice = catmull_clark_step(&once).unwrap();

        assert_eq!(twice.num_faces(), 96);
        assert!(twice.check_consistency().is_ok());
    }

    #[test]
    fn test_triangles_become_quads() {
        // Catmull-Clark accepts arbitrary degrees: a triangle yields 3 quads.
        let mesh: HalfEdgeMesh = build(&IndexedMesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.5, 1.0, 0.0),
            ],
            vec![vec![0, 1, 2]],
        ))
        .unwrap();

        let out = catmull_clark_step(&mesh).unwrap();
        assert_eq!(out.num_faces(), 3);
        assert_eq!(out.num_vertices(), 3 + 1 + 3);
        for f in out.face_ids() {
            assert_eq!(out.face_degree(f), 4);
        }
    }

    #[test]
    fn test_input_not_mutated() {
        let mesh = single_quad();
        let before = restore(&mesh);
        let _ = catmull_clark_step(&mesh).unwrap();
        assert_eq!(restore(&mesh), before);
    }
}
