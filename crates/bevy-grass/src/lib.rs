//! # Bevy Grass Crate
//!
//! A stateless grass blade mesh builder for Bevy 0.17.
//!
//! Every blade is a tapered, vertically subdivided quad. All blades are merged
//! into one mesh; each vertex carries its blade's packed instance data in
//! [`ATTRIBUTE_BLADE_INSTANCE`] so a vertex shader can place, rotate and bend
//! it. `POSITION` holds the vertex in blade space with the root at y = 0.
//!
//! ## Usage
//! ```no_run
//! use bevy::prelude::*;
//! use bevy_grass::*;
//!
//! fn setup(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
//!     let blades = [[0.0, 0.0, 0.5, 0.3], [0.1, -0.2, 1.7, 0.9]];
//!
//!     let mesh = BladeMeshBuilder::new(BladeShape::default())
//!         .with_instances(blades)
//!         .build();
//!
//!     commands.spawn(Mesh3d(meshes.add(mesh)));
//! }
//! ```

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, Mesh, MeshVertexAttribute, PrimitiveTopology};
use bevy::render::render_resource::VertexFormat;

/// Per-blade `[x_norm, z_norm, rotation, seed]`, repeated on every vertex of
/// the blade
pub const ATTRIBUTE_BLADE_INSTANCE: MeshVertexAttribute =
    MeshVertexAttribute::new("BladeInstance", 988_540_917, VertexFormat::Float32x4);

/// Geometry of a single blade
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BladeShape {
    pub width: f32,
    pub height: f32,
    /// Vertical subdivisions, at least 1
    pub segments: u32,
    /// Tip width as a fraction of the base width (0..1)
    pub taper: f32,
}

impl Default for BladeShape {
    fn default() -> Self {
        Self {
            width: 0.2,
            height: 0.85,
            segments: 1,
            taper: 0.1,
        }
    }
}

impl BladeShape {
    /// Blade-space vertices, two per row from root to tip.
    ///
    /// Only the tip row is narrowed by `taper`; inner rows keep the full width.
    pub fn vertices(&self) -> Vec<[f32; 3]> {
        let segments = self.segments.max(1);
        let half = self.width * 0.5;
        (0..=segments)
            .flat_map(|row| {
                let y = self.height * row as f32 / segments as f32;
                let half = if row == segments { half * self.taper } else { half };
                [[-half, y, 0.0], [half, y, 0.0]]
            })
            .collect()
    }

    /// Triangle indices for one blade, relative to its first vertex
    pub fn indices(&self) -> Vec<u32> {
        let segments = self.segments.max(1);
        (0..segments)
            .flat_map(|row| {
                let i0 = row * 2;
                let i1 = i0 + 1;
                let i2 = i0 + 2;
                let i3 = i0 + 3;
                [i0, i1, i2, i1, i3, i2]
            })
            .collect()
    }

    pub fn vertex_count(&self) -> usize {
        (self.segments.max(1) as usize + 1) * 2
    }
}

/// Builder for the merged blade mesh
pub struct BladeMeshBuilder {
    shape: BladeShape,
    instances: Vec<[f32; 4]>,
}

impl BladeMeshBuilder {
    pub fn new(shape: BladeShape) -> Self {
        Self {
            shape,
            instances: Vec::new(),
        }
    }

    /// Append packed blades, see [`ATTRIBUTE_BLADE_INSTANCE`]
    pub fn with_instances(mut self, instances: impl IntoIterator<Item = [f32; 4]>) -> Self {
        self.instances.extend(instances);
        self
    }

    pub fn build(self) -> Mesh {
        let blade_vertices = self.shape.vertices();
        let blade_indices = self.shape.indices();
        let per_blade = blade_vertices.len();
        let total = per_blade * self.instances.len();

        let mut positions = Vec::with_capacity(total);
        let mut instance_data = Vec::with_capacity(total);
        let mut indices = Vec::with_capacity(blade_indices.len() * self.instances.len());

        for (blade, instance) in self.instances.iter().enumerate() {
            let first = (blade * per_blade) as u32;
            positions.extend_from_slice(&blade_vertices);
            instance_data.extend(std::iter::repeat_n(*instance, per_blade));
            indices.extend(blade_indices.iter().map(|i| first + i));
        }

        let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::RENDER_WORLD);
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
        mesh.insert_attribute(ATTRIBUTE_BLADE_INSTANCE, instance_data);
        mesh.insert_indices(Indices::U32(indices));

        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::mesh::VertexAttributeValues;

    #[test]
    fn test_single_segment_blade() {
        let shape = BladeShape::default();
        let vertices = shape.vertices();

        assert_eq!(vertices.len(), 4);
        assert_eq!(vertices[0], [-0.1, 0.0, 0.0]);
        assert_eq!(vertices[1], [0.1, 0.0, 0.0]);
        assert!((vertices[3][0] - 0.01).abs() < 1e-6);
        assert!((vertices[3][1] - 0.85).abs() < 1e-6);
        assert_eq!(shape.indices(), vec![0, 1, 2, 1, 3, 2]);
    }

    #[test]
    fn test_only_tip_row_is_tapered() {
        let shape = BladeShape {
            segments: 3,
            ..Default::default()
        };
        let vertices = shape.vertices();

        assert_eq!(vertices.len(), shape.vertex_count());
        assert_eq!(vertices[4][0], -0.1);
        assert!((vertices[7][0] - 0.01).abs() < 1e-6);
        assert_eq!(shape.indices().len(), 18);
    }

    #[test]
    fn test_zero_segments_builds_one_quad() {
        let shape = BladeShape {
            segments: 0,
            ..Default::default()
        };
        assert_eq!(shape.vertices().len(), 4);
        assert_eq!(shape.indices().len(), 6);
    }

    #[test]
    fn test_merged_mesh_repeats_instance_data() {
        let blades = [[0.1, 0.2, 0.3, 0.4], [0.5, 0.6, 0.7, 0.8]];
        let mesh = BladeMeshBuilder::new(BladeShape::default())
            .with_instances(blades)
            .build();

        assert_eq!(mesh.count_vertices(), 8);
        assert_eq!(mesh.indices().map(|i| i.len()), Some(12));

        let Some(VertexAttributeValues::Float32x4(data)) = mesh.attribute(ATTRIBUTE_BLADE_INSTANCE) else {
            panic!("missing blade instance attribute");
        };
        assert_eq!(data[3], blades[0]);
        assert_eq!(data[4], blades[1]);
    }

    #[test]
    fn test_second_blade_indices_are_offset() {
        let mesh = BladeMeshBuilder::new(BladeShape::default())
            .with_instances([[0.0; 4], [0.0; 4]])
            .build();

        let Some(Indices::U32(indices)) = mesh.indices() else {
            panic!("expected u32 indices");
        };
        assert_eq!(&indices[6..], &[4, 5, 6, 5, 7, 6]);
    }
}
