//! Indexed triangle geometry and its OBJ loading adapter.
//!
//! A [`Model`] owns flat arrays of positions, normals and texture coordinates
//! plus a list of [`Face`]s that index into them. Faces never own geometry.
//! The render pass reads a model immutably.

use std::fmt;
use std::path::Path;

use crate::colors::Rgb;
use crate::math::{Vec2, Vec3};
use crate::render::shader::face_normal;
use crate::vertex::Vertex;

/// Which attribute array an out-of-range index pointed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Position,
    Normal,
    TextureCoordinate,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attribute::Position => write!(f, "position"),
            Attribute::Normal => write!(f, "normal"),
            Attribute::TextureCoordinate => write!(f, "texture coordinate"),
        }
    }
}

/// Errors that can occur when building or loading a model.
#[derive(Debug)]
pub enum LoadError {
    /// The OBJ source could not be read or parsed.
    Obj(tobj::LoadError),
    /// A face referenced an attribute that does not exist.
    IndexOutOfRange {
        attribute: Attribute,
        index: usize,
        len: usize,
    },
    /// The source contained no triangles.
    Empty,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Obj(e) => write!(f, "OBJ error: {}", e),
            LoadError::IndexOutOfRange {
                attribute,
                index,
                len,
            } => write!(
                f,
                "Face references {} {} but only {} exist",
                attribute, index, len
            ),
            LoadError::Empty => write!(f, "Model contains no faces"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Obj(e) => Some(e),
            _ => None,
        }
    }
}

impl From<tobj::LoadError> for LoadError {
    fn from(e: tobj::LoadError) -> Self {
        LoadError::Obj(e)
    }
}

/// One triangle corner: zero-based indices into the model's arrays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Corner {
    pub vertex: usize,
    pub normal: Option<usize>,
    pub texture_coordinate: Option<usize>,
}

impl Corner {
    pub fn new(vertex: usize, normal: Option<usize>, texture_coordinate: Option<usize>) -> Self {
        Self {
            vertex,
            normal,
            texture_coordinate,
        }
    }
}

/// A triangle defined by three corners.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Face {
    pub corners: [Corner; 3],
}

impl Face {
    pub fn new(corners: [Corner; 3]) -> Self {
        Self { corners }
    }

    /// A face with positions only.
    pub fn positions(a: usize, b: usize, c: usize) -> Self {
        Self::new([
            Corner::new(a, None, None),
            Corner::new(b, None, None),
            Corner::new(c, None, None),
        ])
    }
}

/// Unit cube corners, centered on the origin.
const CUBE_VERTICES: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
    Vec3::new(-1.0, -1.0, 1.0),
];

/// Two triangles per side: front, right, back, left, top, bottom.
const CUBE_FACES: [[usize; 3]; 12] = [
    [0, 1, 2],
    [0, 2, 3],
    [3, 2, 4],
    [3, 4, 5],
    [5, 4, 6],
    [5, 6, 7],
    [7, 6, 1],
    [7, 1, 0],
    [1, 6, 4],
    [1, 4, 2],
    [5, 7, 0],
    [5, 0, 3],
];

/// Texture coordinates shared by every cube side.
const CUBE_UVS: [Vec2; 4] = [
    Vec2::new(0.0, 1.0),
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
];

#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    vertices: Vec<Vec3>,
    normals: Vec<Vec3>,
    texture_coordinates: Vec<Vec2>,
    faces: Vec<Face>,
}

impl Model {
    /// Builds a model, checking that every face index is in range.
    pub fn new(
        vertices: Vec<Vec3>,
        normals: Vec<Vec3>,
        texture_coordinates: Vec<Vec2>,
        faces: Vec<Face>,
    ) -> Result<Self, LoadError> {
        let check = |attribute, index: usize, len: usize| {
            if index < len {
                Ok(())
            } else {
                Err(LoadError::IndexOutOfRange {
                    attribute,
                    index,
                    len,
                })
            }
        };

        for corner in faces.iter().flat_map(|f| f.corners.iter()) {
            check(Attribute::Position, corner.vertex, vertices.len())?;
            if let Some(n) = corner.normal {
                check(Attribute::Normal, n, normals.len())?;
            }
            if let Some(t) = corner.texture_coordinate {
                check(Attribute::TextureCoordinate, t, texture_coordinates.len())?;
            }
        }

        Ok(Self {
            vertices,
            normals,
            texture_coordinates,
            faces,
        })
    }

    /// Load a model from an OBJ file. All objects in the file are merged.
    pub fn from_obj<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let (models, _materials) = tobj::load_obj(path, &Self::load_options())?;
        let model = Self::from_tobj(&models)?;
        log::info!("Loaded model {}", path.display());
        Ok(model)
    }

    /// Parse OBJ source held in memory. Material libraries are not resolved.
    pub fn from_obj_str(source: &str) -> Result<Self, LoadError> {
        let mut reader = source.as_bytes();
        let (models, _materials) =
            tobj::load_obj_buf(&mut reader, &Self::load_options(), |_| {
                Err(tobj::LoadError::OpenFileFailed)
            })?;
        Self::from_tobj(&models)
    }

    fn load_options() -> tobj::LoadOptions {
        tobj::LoadOptions {
            triangulate: true,
            ignore_points: true,
            ignore_lines: true,
            ..Default::default()
        }
    }

    fn from_tobj(models: &[tobj::Model]) -> Result<Self, LoadError> {
        let mut vertices = Vec::new();
        let mut normals = Vec::new();
        let mut texture_coordinates = Vec::new();
        let mut faces = Vec::new();

        for model in models {
            let mesh = &model.mesh;
            let vertex_base = vertices.len();
            let normal_base = normals.len();
            let uv_base = texture_coordinates.len();

            vertices.extend(
                mesh.positions
                    .chunks_exact(3)
                    .map(|p| Vec3::new(p[0], p[1], p[2])),
            );
            normals.extend(
                mesh.normals
                    .chunks_exact(3)
                    .map(|n| Vec3::new(n[0], n[1], n[2])),
            );
            // OBJ measures v from the bottom of the image, textures from the top.
            texture_coordinates.extend(
                mesh.texcoords
                    .chunks_exact(2)
                    .map(|t| Vec2::new(t[0], 1.0 - t[1])),
            );

            let corner = |i: usize| {
                Corner::new(
                    vertex_base + mesh.indices[i] as usize,
                    mesh.normal_indices
                        .get(i)
                        .map(|&n| normal_base + n as usize),
                    mesh.texcoord_indices
                        .get(i)
                        .map(|&t| uv_base + t as usize),
                )
            };
            faces.extend(
                (0..mesh.indices.len() / 3)
                    .map(|f| Face::new([corner(3 * f), corner(3 * f + 1), corner(3 * f + 2)])),
            );
        }

        if faces.is_empty() {
            return Err(LoadError::Empty);
        }

        log::info!(
            "Loaded {} vertices, {} normals, {} texture coordinates and {} faces",
            vertices.len(),
            normals.len(),
            texture_coordinates.len(),
            faces.len()
        );
        let corners = faces.iter().flat_map(|f| f.corners.iter());
        if corners.clone().any(|c| c.normal.is_none()) {
            log::warn!("Some faces have no vertex normals; using face normals instead");
        }
        if corners.clone().any(|c| c.texture_coordinate.is_none()) {
            log::warn!("Some faces have no texture coordinates; using (0, 0)");
        }

        Self::new(vertices, normals, texture_coordinates, faces)
    }

    /// A 2x2x2 cube centered on the origin with per-side texture coordinates.
    pub fn cube() -> Self {
        let faces = CUBE_FACES
            .iter()
            .enumerate()
            .map(|(i, indices)| {
                // First triangle of a side uses uv 0,1,2; second uses 0,2,3.
                let uvs = if i % 2 == 0 { [0, 1, 2] } else { [0, 2, 3] };
                Face::new([
                    Corner::new(indices[0], None, Some(uvs[0])),
                    Corner::new(indices[1], None, Some(uvs[1])),
                    Corner::new(indices[2], None, Some(uvs[2])),
                ])
            })
            .collect();

        Self {
            vertices: CUBE_VERTICES.to_vec(),
            normals: Vec::new(),
            texture_coordinates: CUBE_UVS.to_vec(),
            faces,
        }
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn texture_coordinates(&self) -> &[Vec2] {
        &self.texture_coordinates
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Resolves a face into three model-space vertices.
    ///
    /// Corners without a normal get the outward normal of the face, corners
    /// without texture coordinates get (0, 0).
    pub fn triangle(&self, face: &Face, color: Rgb) -> [Vertex; 3] {
        let positions = face.corners.map(|c| self.vertices[c.vertex]);
        // face_normal points against the winding-derived outward direction.
        let fallback_normal = -face_normal(positions);

        face.corners.map(|corner| Vertex {
            coordinate: self.vertices[corner.vertex],
            normal: corner
                .normal
                .map_or(fallback_normal, |n| self.normals[n]),
            color,
            texture_coordinate: corner
                .texture_coordinate
                .map_or(Vec2::ZERO, |t| self.texture_coordinates[t]),
        })
    }

    /// Axis-aligned bounds of the referenced positions, `None` when empty.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut points = self.vertices.iter().copied();
        let first = points.next()?;
        Some(points.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::WHITE;
    use approx::assert_relative_eq;

    const QUAD_OBJ: &str = "\
o quad
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
v 0.0 1.0 0.0
vt 0.0 0.0
vt 1.0 0.0
vt 1.0 1.0
vt 0.0 1.0
vn 0.0 0.0 1.0
f 1/1/1 2/2/1 3/3/1 4/4/1
";

    #[test]
    fn obj_polygons_are_triangulated() {
        let model = Model::from_obj_str(QUAD_OBJ).unwrap();
        assert_eq!(model.vertices().len(), 4);
        assert_eq!(model.normals().len(), 1);
        assert_eq!(model.faces().len(), 2);
        for face in model.faces() {
            for corner in face.corners {
                assert_eq!(corner.normal, Some(0));
                assert!(corner.texture_coordinate.is_some());
            }
        }
    }

    #[test]
    fn obj_texture_v_is_flipped_to_top_down() {
        let model = Model::from_obj_str(QUAD_OBJ).unwrap();
        assert_relative_eq!(model.texture_coordinates()[0], Vec2::new(0.0, 1.0));
        assert_relative_eq!(model.texture_coordinates()[2], Vec2::new(1.0, 0.0));
    }

    #[test]
    fn obj_without_faces_is_rejected() {
        let result = Model::from_obj_str("v 0 0 0\nv 1 0 0\n");
        assert!(matches!(result, Err(LoadError::Empty)));
    }

    #[test]
    fn out_of_range_indices_are_rejected() {
        let result = Model::new(
            vec![Vec3::ZERO, Vec3::RIGHT],
            vec![],
            vec![],
            vec![Face::positions(0, 1, 2)],
        );
        assert!(matches!(
            result,
            Err(LoadError::IndexOutOfRange {
                attribute: Attribute::Position,
                index: 2,
                len: 2
            })
        ));
    }

    #[test]
    fn missing_normals_fall_back_to_face_normal() {
        let model = Model::new(
            vec![Vec3::ZERO, Vec3::RIGHT, Vec3::UP],
            vec![],
            vec![],
            vec![Face::positions(0, 1, 2)],
        )
        .unwrap();
        let [a, b, c] = model.triangle(&model.faces()[0], WHITE);
        // Counter-clockwise in the XY plane faces +Z.
        assert_relative_eq!(a.normal, Vec3::FORWARD);
        assert_eq!(a.normal, b.normal);
        assert_eq!(b.normal, c.normal);
        assert_eq!(c.texture_coordinate, Vec2::ZERO);
    }

    #[test]
    fn cube_is_closed_and_bounded() {
        let cube = Model::cube();
        assert_eq!(cube.faces().len(), 12);
        assert_eq!(cube.bounds(), Some((-Vec3::ONE, Vec3::ONE)));
    }
}
