use cgmath::{Matrix4, Rad, Vector3};

use crate::gfx::resources::material::MaterialId;

/// Index of a geometry registered in the scene's geometry library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryId(pub usize);

/// Local transform of a scene node
///
/// Rotation is stored as XYZ Euler angles in radians and applied X first, so the
/// local matrix is `T * Rx * Ry * Rz * S`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> Matrix4<f32> {
        let t = Matrix4::from_translation(self.position);
        let r = Matrix4::from_angle_x(Rad(self.rotation.x))
            * Matrix4::from_angle_y(Rad(self.rotation.y))
            * Matrix4::from_angle_z(Rad(self.rotation.z));
        let s = Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z);
        t * r * s // Order matters: T * R * S
    }
}

/// What a node contributes to the frame
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Pure transform container
    Group,
    /// Drawable geometry with a material
    Mesh {
        geometry: GeometryId,
        material: MaterialId,
    },
}

/// A node of the static scene tree
///
/// Children are owned, so a node can only ever have one parent.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    pub kind: NodeKind,
    pub transform: Transform,
    children: Vec<SceneNode>,
}

impl SceneNode {
    pub fn group(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: NodeKind::Group,
            transform: Transform::default(),
            children: Vec::new(),
        }
    }

    pub fn mesh(name: &str, geometry: GeometryId, material: &str) -> Self {
        Self {
            kind: NodeKind::Mesh {
                geometry,
                material: material.to_string(),
            },
            ..Self::group(name)
        }
    }

    /// Builder pattern: Set position
    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.position = Vector3::new(x, y, z);
        self
    }

    /// Builder pattern: Set XYZ Euler rotation in radians
    pub fn with_rotation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.rotation = Vector3::new(x, y, z);
        self
    }

    /// Builder pattern: Set the same scale on all three axes
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.transform.scale = Vector3::new(scale, scale, scale);
        self
    }

    /// Builder pattern: Attach a child
    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.add_child(child);
        self
    }

    pub fn add_child(&mut self, child: SceneNode) {
        self.children.push(child);
    }

    pub fn children(&self) -> &[SceneNode] {
        &self.children
    }

    pub fn is_mesh(&self) -> bool {
        matches!(self.kind, NodeKind::Mesh { .. })
    }

    /// Depth-first search for a node by name, including this one
    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }

    /// Number of nodes in this subtree, including this one
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(SceneNode::node_count).sum::<usize>()
    }

    /// Visits this subtree depth-first with each node's world matrix
    pub fn visit_world<F>(&self, parent: Matrix4<f32>, visitor: &mut F)
    where
        F: FnMut(&SceneNode, Matrix4<f32>),
    {
        let world = parent * self.transform.matrix();
        visitor(self, world);
        for child in &self.children {
            child.visit_world(world, visitor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Point3, SquareMatrix, Transform as _};
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Point3<f32>, b: Point3<f32>) -> bool {
        (a.x - b.x).abs() < 1e-5 && (a.y - b.y).abs() < 1e-5 && (a.z - b.z).abs() < 1e-5
    }

    #[test]
    fn default_transform_is_identity() {
        assert_eq!(Transform::default().matrix(), Matrix4::identity());
    }

    #[test]
    fn scale_applies_before_rotation_and_translation() {
        let node = SceneNode::group("n")
            .with_uniform_scale(2.0)
            .with_rotation(0.0, FRAC_PI_2, 0.0)
            .with_position(1.0, 0.0, 0.0);

        let p = node.transform.matrix().transform_point(Point3::new(1.0, 0.0, 0.0));
        // scale to (2,0,0), rotate +90° about Y to (0,0,-2), translate
        assert!(approx(p, Point3::new(1.0, 0.0, -2.0)));
    }

    #[test]
    fn floor_rotation_lays_plane_flat() {
        let floor = SceneNode::group("floor").with_rotation(-FRAC_PI_2, 0.0, 0.0);
        let normal = floor
            .transform
            .matrix()
            .transform_vector(Vector3::new(0.0, 0.0, 1.0));
        assert!((normal.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn world_matrix_composes_parent_then_child() {
        let child = SceneNode::mesh("bush", GeometryId(0), "bush").with_position(0.0, 1.0, 0.0);
        let parent = SceneNode::group("house")
            .with_position(2.0, 0.0, 0.0)
            .with_uniform_scale(2.0)
            .with_child(child);

        let mut worlds = Vec::new();
        parent.visit_world(Matrix4::identity(), &mut |node, world| {
            worlds.push((node.name.clone(), world.transform_point(Point3::new(0.0, 0.0, 0.0))));
        });

        assert_eq!(worlds.len(), 2);
        assert_eq!(worlds[0].0, "house");
        assert!(approx(worlds[1].1, Point3::new(2.0, 2.0, 0.0)));
    }

    #[test]
    fn find_searches_depth_first() {
        let tree = SceneNode::group("root").with_child(
            SceneNode::group("house").with_child(SceneNode::mesh("door", GeometryId(1), "door")),
        );

        assert!(tree.find("door").is_some_and(SceneNode::is_mesh));
        assert!(tree.find("chimney").is_none());
        assert_eq!(tree.node_count(), 3);
    }
}
