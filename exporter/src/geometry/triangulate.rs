//! Polygon triangulation for triangle-mesh collision shapes

use super::{GeometryError, MeshData};
use glam::{Vec2, Vec3};
use tracing::{debug, trace};

/// Indexed triangle list
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleMesh {
    pub vertices: Vec<Vec3>,
    /// Three indices per triangle, wound like the source face
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Split every face of the mesh into triangles.
///
/// Faces are ear-clipped in their best-fit plane, so concave polygons are
/// handled; faces with no usable plane fall back to a fan. Faces with fewer
/// than three vertices produce nothing. Vertices are copied unchanged.
pub fn triangulate(mesh: &MeshData) -> Result<TriangleMesh, GeometryError> {
    mesh.validate()?;

    let mut indices = Vec::with_capacity(mesh.faces.len() * 6);
    for face in &mesh.faces {
        triangulate_polygon(&mesh.vertices, face, &mut indices);
    }

    debug!(
        mesh_name = %mesh.name,
        faces = mesh.faces.len(),
        triangles = indices.len() / 3,
        "Triangulated mesh"
    );

    Ok(TriangleMesh {
        vertices: mesh.vertices.clone(),
        indices,
    })
}

fn triangulate_polygon(vertices: &[Vec3], polygon: &[u32], out: &mut Vec<u32>) {
    match polygon.len() {
        0..=2 => return,
        3 => {
            out.extend_from_slice(polygon);
            return;
        }
        _ => {}
    }

    let points: Vec<Vec3> = polygon.iter().map(|&i| vertices[i as usize]).collect();
    let normal = newell_normal(&points);
    if normal.length_squared() <= f32::EPSILON * f32::EPSILON {
        trace!(len = polygon.len(), "Degenerate polygon, using fan");
        fan(polygon, out);
        return;
    }

    // (u, v, normal) is right-handed, so the face winds counter-clockwise in 2D
    let normal = normal.normalize();
    let u = normal.any_orthonormal_vector();
    let v = normal.cross(u);
    let flat: Vec<Vec2> = points.iter().map(|p| Vec2::new(p.dot(u), p.dot(v))).collect();

    let mut remaining: Vec<usize> = (0..polygon.len()).collect();
    while remaining.len() > 3 {
        match find_ear(&flat, &remaining) {
            Some(i) => {
                let m = remaining.len();
                let prev = remaining[(i + m - 1) % m];
                let next = remaining[(i + 1) % m];
                out.extend_from_slice(&[polygon[prev], polygon[remaining[i]], polygon[next]]);
                remaining.remove(i);
            }
            None => {
                trace!(left = remaining.len(), "No ear found, using fan");
                let rest: Vec<u32> = remaining.iter().map(|&i| polygon[i]).collect();
                fan(&rest, out);
                return;
            }
        }
    }
    out.extend(remaining.iter().map(|&i| polygon[i]));
}

/// Position in `remaining` of a convex vertex whose triangle holds no other vertex
fn find_ear(flat: &[Vec2], remaining: &[usize]) -> Option<usize> {
    let m = remaining.len();
    (0..m).find(|&i| {
        let prev = remaining[(i + m - 1) % m];
        let cur = remaining[i];
        let next = remaining[(i + 1) % m];
        let (a, b, c) = (flat[prev], flat[cur], flat[next]);

        if (b - a).perp_dot(c - b) <= 0.0 {
            return false;
        }
        !remaining
            .iter()
            .filter(|&&k| k != prev && k != cur && k != next)
            .any(|&k| point_in_triangle(flat[k], a, b, c))
    })
}

fn point_in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    (b - a).perp_dot(p - a) >= 0.0
        && (c - b).perp_dot(p - b) >= 0.0
        && (a - c).perp_dot(p - c) >= 0.0
}

fn newell_normal(points: &[Vec3]) -> Vec3 {
    let mut normal = Vec3::ZERO;
    for (i, current) in points.iter().enumerate() {
        let next = points[(i + 1) % points.len()];
        normal.x += (current.y - next.y) * (current.z + next.z);
        normal.y += (current.z - next.z) * (current.x + next.x);
        normal.z += (current.x - next.x) * (current.y + next.y);
    }
    normal
}

fn fan(polygon: &[u32], out: &mut Vec<u32>) {
    for i in 1..polygon.len().saturating_sub(1) {
        out.extend_from_slice(&[polygon[0], polygon[i], polygon[i + 1]]);
    }
}
