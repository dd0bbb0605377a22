//! The mesh container consumed by the contouring passes.

use std::borrow::Cow;
use std::collections::HashMap;

use glam::Vec3;

use contour_core::error::{ContourError, Result};

use crate::attribute::Attribute;

/// A triangulated surface mesh backed by flat typed arrays.
///
/// Positions are 3 floats per vertex. Triangle indices are optional: when
/// absent, vertices are implicitly grouped in consecutive triples in storage
/// order. Named per-vertex attributes (scalars, normals) ride alongside and
/// are validated against the vertex count on insertion.
#[derive(Debug, Clone, Default)]
pub struct MeshBuffer {
    positions: Vec<f32>,
    indices: Option<Vec<u32>>,
    attributes: HashMap<String, Attribute>,
}

impl MeshBuffer {
    /// Creates a mesh from flat positions and optional triangle indices.
    ///
    /// Validates that positions come in whole `(x, y, z)` triples and that
    /// every index refers to an existing vertex.
    pub fn new(positions: Vec<f32>, indices: Option<Vec<u32>>) -> Result<Self> {
        if positions.len() % 3 != 0 {
            return Err(ContourError::AttributeSizeMismatch {
                name: "position".to_string(),
                expected: 3,
                actual: positions.len(),
            });
        }
        let vertex_count = positions.len() / 3;

        if let Some(idx) = &indices {
            if idx.len() % 3 != 0 {
                return Err(ContourError::AttributeSizeMismatch {
                    name: "index".to_string(),
                    expected: 3,
                    actual: idx.len(),
                });
            }
            for &i in idx {
                if i as usize >= vertex_count {
                    return Err(ContourError::IndexOutOfRange {
                        kind: "vertex",
                        index: i as usize,
                        bound: vertex_count,
                    });
                }
            }
        }

        Ok(Self {
            positions,
            indices,
            attributes: HashMap::new(),
        })
    }

    /// Creates a mesh from `Vec3` positions and triangle triples.
    pub fn from_triangles(vertices: &[Vec3], triangles: &[[u32; 3]]) -> Result<Self> {
        let positions = vertices.iter().flat_map(|v| v.to_array()).collect();
        let indices = triangles.iter().flatten().copied().collect();
        Self::new(positions, Some(indices))
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Returns the number of triangles (explicit indices, or implicit triples).
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        match &self.indices {
            Some(idx) => idx.len() / 3,
            None => self.vertex_count() / 3,
        }
    }

    /// Returns the flat position array.
    #[must_use]
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Returns the positions viewed as `Vec3`s.
    #[must_use]
    pub fn positions_vec3(&self) -> &[Vec3] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Returns the explicit index array, if present.
    #[must_use]
    pub fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }

    /// Returns the triangle index array, materializing the implicit
    /// consecutive-triple grouping when no explicit indices are stored.
    #[must_use]
    pub fn triangle_indices(&self) -> Cow<'_, [u32]> {
        match &self.indices {
            Some(idx) => Cow::Borrowed(idx.as_slice()),
            None => {
                let n = (self.vertex_count() / 3) * 3;
                #[allow(clippy::cast_possible_truncation)]
                Cow::Owned((0..n as u32).collect())
            }
        }
    }

    /// Returns the position of one vertex.
    pub fn position(&self, index: usize) -> Result<Vec3> {
        if index >= self.vertex_count() {
            return Err(ContourError::IndexOutOfRange {
                kind: "vertex",
                index,
                bound: self.vertex_count(),
            });
        }
        let i = index * 3;
        Ok(Vec3::new(
            self.positions[i],
            self.positions[i + 1],
            self.positions[i + 2],
        ))
    }

    /// Returns the vertex ids of one triangle.
    pub fn triangle(&self, index: usize) -> Result<[u32; 3]> {
        if index >= self.triangle_count() {
            return Err(ContourError::IndexOutOfRange {
                kind: "triangle",
                index,
                bound: self.triangle_count(),
            });
        }
        let i = index * 3;
        Ok(match &self.indices {
            Some(idx) => [idx[i], idx[i + 1], idx[i + 2]],
            #[allow(clippy::cast_possible_truncation)]
            None => [i as u32, (i + 1) as u32, (i + 2) as u32],
        })
    }

    /// Iterates over all triangles as vertex-id triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        (0..self.triangle_count()).map(move |i| {
            // In-bounds by construction of triangle_count.
            self.triangle(i).expect("triangle index in bounds")
        })
    }

    /// Adds or replaces a named attribute.
    ///
    /// The attribute's per-vertex item count must equal the vertex count;
    /// attributes cannot be resized independently of the mesh.
    pub fn set_attribute(&mut self, name: impl Into<String>, attribute: Attribute) -> Result<()> {
        let name = name.into();
        if attribute.count() != self.vertex_count() {
            return Err(ContourError::AttributeSizeMismatch {
                name,
                expected: self.vertex_count(),
                actual: attribute.count(),
            });
        }
        self.attributes.insert(name, attribute);
        Ok(())
    }

    /// Gets a named attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Removes a named attribute, returning it if present.
    pub fn remove_attribute(&mut self, name: &str) -> Option<Attribute> {
        self.attributes.remove(name)
    }

    /// Returns the names of all attributes.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    /// Returns a named attribute as a per-vertex scalar field.
    ///
    /// The attribute must be a 1-component float array.
    pub fn scalar_attribute(&self, name: &str) -> Result<&[f32]> {
        let attr = self
            .attributes
            .get(name)
            .ok_or(ContourError::MissingGeometry("scalar attribute not found"))?;
        if attr.item_size() != 1 {
            return Err(ContourError::AttributeSizeMismatch {
                name: name.to_string(),
                expected: 1,
                actual: attr.item_size(),
            });
        }
        attr.as_f32().ok_or(ContourError::MissingGeometry(
            "scalar attribute is not a float array",
        ))
    }

    /// Returns a named attribute as per-vertex `Vec3`s (e.g. normals).
    pub fn vec3_attribute(&self, name: &str) -> Result<&[Vec3]> {
        let attr = self
            .attributes
            .get(name)
            .ok_or(ContourError::MissingGeometry("vec3 attribute not found"))?;
        attr.as_vec3().ok_or_else(|| ContourError::AttributeSizeMismatch {
            name: name.to_string(),
            expected: 3,
            actual: attr.item_size(),
        })
    }
}
