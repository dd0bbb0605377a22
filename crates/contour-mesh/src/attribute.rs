//! Typed per-vertex attributes.
//!
//! Attributes are flat typed arrays with a fixed number of components per
//! vertex (`item_size`). The element type is a tagged variant rather than a
//! dynamically typed array: scalar fields and colors are `f32`, index-like
//! data is one of the two unsigned widths.

use glam::Vec3;

use contour_core::error::{ContourError, Result};

/// The backing storage of an attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeData {
    /// 32-bit float elements (positions, normals, scalars, colors).
    F32(Vec<f32>),
    /// 16-bit unsigned elements (compact index-like data).
    U16(Vec<u16>),
    /// 32-bit unsigned elements (index-like data).
    U32(Vec<u32>),
}

impl AttributeData {
    /// Returns the number of elements in the backing array.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            AttributeData::F32(v) => v.len(),
            AttributeData::U16(v) => v.len(),
            AttributeData::U32(v) => v.len(),
        }
    }

    /// Returns true if the backing array is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A named per-vertex attribute: typed elements grouped `item_size` at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    data: AttributeData,
    item_size: usize,
}

impl Attribute {
    /// Creates an attribute from typed data and a per-vertex item size.
    ///
    /// The element count must be a multiple of `item_size`.
    pub fn new(name: &str, data: AttributeData, item_size: usize) -> Result<Self> {
        if item_size == 0 || data.len() % item_size != 0 {
            return Err(ContourError::AttributeSizeMismatch {
                name: name.to_string(),
                expected: item_size,
                actual: data.len(),
            });
        }
        Ok(Self { data, item_size })
    }

    /// Creates a 1-component float attribute (a scalar field).
    pub fn scalars(name: &str, values: Vec<f32>) -> Result<Self> {
        Self::new(name, AttributeData::F32(values), 1)
    }

    /// Creates a 3-component float attribute (normals, colors).
    pub fn vec3s(name: &str, values: Vec<f32>) -> Result<Self> {
        Self::new(name, AttributeData::F32(values), 3)
    }

    /// Returns the backing data.
    #[must_use]
    pub fn data(&self) -> &AttributeData {
        &self.data
    }

    /// Returns the number of components per vertex.
    #[must_use]
    pub fn item_size(&self) -> usize {
        self.item_size
    }

    /// Returns the number of per-vertex items (element count / item size).
    #[must_use]
    pub fn count(&self) -> usize {
        self.data.len() / self.item_size
    }

    /// Returns the elements as a float slice, if this is a float attribute.
    #[must_use]
    pub fn as_f32(&self) -> Option<&[f32]> {
        match &self.data {
            AttributeData::F32(v) => Some(v),
            _ => None,
        }
    }

    /// Returns a 3-component float attribute viewed as a `Vec3` slice.
    #[must_use]
    pub fn as_vec3(&self) -> Option<&[Vec3]> {
        if self.item_size != 3 {
            return None;
        }
        self.as_f32().map(bytemuck::cast_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_size_must_divide_length() {
        assert!(Attribute::new("n", AttributeData::F32(vec![0.0; 9]), 3).is_ok());
        assert!(matches!(
            Attribute::new("n", AttributeData::F32(vec![0.0; 8]), 3),
            Err(ContourError::AttributeSizeMismatch { .. })
        ));
        assert!(Attribute::new("n", AttributeData::U16(vec![0; 4]), 0).is_err());
    }

    #[test]
    fn test_count_is_per_vertex_items() {
        let attr = Attribute::vec3s("normal", vec![0.0; 12]).unwrap();
        assert_eq!(attr.count(), 4);
        assert_eq!(attr.item_size(), 3);
    }

    #[test]
    fn test_vec3_view_of_float_triples() {
        let attr = Attribute::vec3s("normal", vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let v = attr.as_vec3().unwrap();
        assert_eq!(v.len(), 2);
        assert_eq!(v[0], Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(v[1], Vec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_typed_accessors_reject_other_variants() {
        let attr = Attribute::new("ids", AttributeData::U32(vec![1, 2, 3]), 1).unwrap();
        assert!(attr.as_f32().is_none());
        assert!(attr.as_vec3().is_none());

        let scalars = Attribute::scalars("field", vec![0.5, 1.5]).unwrap();
        assert!(scalars.as_vec3().is_none(), "item_size 1 is not a vec3");
    }
}
