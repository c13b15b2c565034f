use foundation::math::Vec3;

/// Per-line material state; `resolution` must track the viewport size so
/// screen-space widths stay correct.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LineMaterial {
    pub color: u32,
    pub width_px: f64,
    pub resolution: [u32; 2],
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape3D {
    Cube { size: f64 },
    /// An opaque, externally loaded model referenced by its source url.
    Model { source: String },
    Line {
        points: Vec<Vec3>,
        material: LineMaterial,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Drawable3D {
    pub shape: Shape3D,
    pub color: u32,
}

impl Drawable3D {
    pub fn cube(size: f64, color: u32) -> Self {
        Self {
            shape: Shape3D::Cube { size },
            color,
        }
    }

    pub fn model(source: impl Into<String>) -> Self {
        Self {
            shape: Shape3D::Model {
                source: source.into(),
            },
            color: 0xffffff,
        }
    }

    pub fn line(points: Vec<Vec3>, material: LineMaterial) -> Self {
        Self {
            color: material.color,
            shape: Shape3D::Line { points, material },
        }
    }

    pub fn line_material_mut(&mut self) -> Option<&mut LineMaterial> {
        match &mut self.shape {
            Shape3D::Line { material, .. } => Some(material),
            _ => None,
        }
    }
}
