use cgmath::{Matrix4, SquareMatrix};
use wgpu::Device;

use crate::{
    error::AppError,
    gfx::{
        geometry::GeometryData,
        resources::{
            material::{Material, MaterialId, MaterialManager},
            mesh::GpuMesh,
            transform::TransformBinding,
        },
    },
    wgpu_utils::binding_builder::BindGroupLayoutWithDesc,
};

use super::{
    lights::Lights,
    node::{GeometryId, NodeKind, SceneNode},
};

/// A named geometry shared by any number of mesh nodes
pub struct GeometryEntry {
    pub name: String,
    pub data: GeometryData,
}

/// A mesh node flattened with its world matrix
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub name: String,
    pub geometry: GeometryId,
    pub material: MaterialId,
    pub world: Matrix4<f32>,
}

struct GpuDraw {
    geometry: GeometryId,
    material: MaterialId,
    transform: TransformBinding,
}

struct SceneGpuResources {
    meshes: Vec<GpuMesh>,
    draws: Vec<GpuDraw>,
}

/// Everything the renderer needs for one draw call
pub struct GpuDrawCall<'a> {
    pub mesh: &'a GpuMesh,
    pub transform: &'a wgpu::BindGroup,
    pub material: &'a wgpu::BindGroup,
}

/// Static scene: the node tree, its lights, geometries and materials
pub struct Scene {
    nodes: Vec<SceneNode>,
    pub lights: Lights,
    geometries: Vec<GeometryEntry>,
    pub material_manager: MaterialManager,
    gpu_resources: Option<SceneGpuResources>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            lights: Lights::default(),
            geometries: Vec::new(),
            material_manager: MaterialManager::new(),
            gpu_resources: None,
        }
    }

    /// Registers a geometry and returns the id mesh nodes refer to it by
    pub fn add_geometry(&mut self, name: &str, data: GeometryData) -> GeometryId {
        self.geometries.push(GeometryEntry {
            name: name.to_string(),
            data,
        });
        GeometryId(self.geometries.len() - 1)
    }

    pub fn geometry(&self, id: GeometryId) -> Option<&GeometryEntry> {
        self.geometries.get(id.0)
    }

    pub fn geometry_by_name(&self, name: &str) -> Option<GeometryId> {
        self.geometries
            .iter()
            .position(|entry| entry.name == name)
            .map(GeometryId)
    }

    pub fn add_material(&mut self, material: Material) {
        self.material_manager.add_material(material);
    }

    /// Adds a top-level node; the scene takes ownership of the subtree
    pub fn add_node(&mut self, node: SceneNode) {
        self.nodes.push(node);
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        self.nodes.iter().find_map(|node| node.find(name))
    }

    /// Flattens every mesh node into draw order with its world matrix
    pub fn draw_items(&self) -> Vec<DrawItem> {
        let mut items = Vec::new();
        for root in &self.nodes {
            root.visit_world(Matrix4::identity(), &mut |node, world| {
                if let NodeKind::Mesh { geometry, material } = &node.kind {
                    items.push(DrawItem {
                        name: node.name.clone(),
                        geometry: *geometry,
                        material: material.clone(),
                        world,
                    });
                }
            });
        }
        items
    }

    /// Uploads geometries, materials and per-node transforms
    ///
    /// Must be called once the GPU context exists and before the first frame.
    pub fn init_gpu_resources(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        transform_layout: &BindGroupLayoutWithDesc,
        material_layout: &BindGroupLayoutWithDesc,
    ) -> Result<(), AppError> {
        let meshes = self
            .geometries
            .iter()
            .map(|entry| GpuMesh::from_geometry(device, &entry.data, &entry.name))
            .collect();

        let draws = self
            .draw_items()
            .into_iter()
            .map(|item| {
                Ok(GpuDraw {
                    transform: TransformBinding::new(
                        device,
                        transform_layout,
                        item.world,
                        &item.name,
                    )?,
                    geometry: item.geometry,
                    material: item.material,
                })
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        self.material_manager
            .update_all_gpu_resources(device, queue, material_layout)?;

        log::info!(
            "Uploaded {} geometries and {} draws to the GPU",
            self.geometries.len(),
            draws.len()
        );
        self.gpu_resources = Some(SceneGpuResources { meshes, draws });
        Ok(())
    }

    pub fn is_gpu_ready(&self) -> bool {
        self.gpu_resources.is_some()
    }

    /// Draw calls ready for a render pass; empty until GPU resources exist
    pub fn gpu_draw_calls(&self) -> Vec<GpuDrawCall<'_>> {
        let Some(gpu) = &self.gpu_resources else {
            return Vec::new();
        };

        gpu.draws
            .iter()
            .filter_map(|draw| {
                let mesh = gpu.meshes.get(draw.geometry.0)?;
                let material = self
                    .material_manager
                    .get_material_for_object(&draw.material)
                    .bind_group()?;
                Some(GpuDrawCall {
                    mesh,
                    transform: draw.transform.bind_group(),
                    material,
                })
            })
            .collect()
    }

    /// Gets statistics about the scene
    pub fn get_statistics(&self) -> SceneStatistics {
        let items = self.draw_items();
        let (total_triangles, total_vertices) = items
            .iter()
            .filter_map(|item| self.geometry(item.geometry))
            .fold((0, 0), |(triangles, vertices), entry| {
                (
                    triangles + entry.data.triangle_count(),
                    vertices + entry.data.vertex_count(),
                )
            });

        SceneStatistics {
            node_count: self.nodes.iter().map(SceneNode::node_count).sum(),
            mesh_count: items.len(),
            geometry_count: self.geometries.len(),
            material_count: self.material_manager.len(),
            total_triangles,
            total_vertices,
        }
    }
}

/// Scene statistics for debugging and UI display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneStatistics {
    pub node_count: usize,
    pub mesh_count: usize,
    pub geometry_count: usize,
    pub material_count: usize,
    pub total_triangles: usize,
    pub total_vertices: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::{generate_box, generate_plane};

    fn small_scene() -> Scene {
        let mut scene = Scene::new();
        let cube = scene.add_geometry("cube", generate_box(1.0, 1.0, 1.0));
        let quad = scene.add_geometry("quad", generate_plane(1.0, 1.0, 1, 1));
        scene.add_material(Material::from_hex("grey", 0x808080));

        scene.add_node(
            SceneNode::group("group")
                .with_position(0.0, 1.0, 0.0)
                .with_child(SceneNode::mesh("a", cube, "grey").with_position(1.0, 0.0, 0.0))
                .with_child(SceneNode::mesh("b", cube, "grey")),
        );
        scene.add_node(SceneNode::mesh("c", quad, "grey"));
        scene
    }

    #[test]
    fn draw_items_flatten_in_tree_order() {
        let scene = small_scene();
        let names: Vec<_> = scene.draw_items().into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn draw_items_carry_world_matrices() {
        let scene = small_scene();
        let items = scene.draw_items();
        assert_eq!(items[0].world.w.truncate(), cgmath::Vector3::new(1.0, 1.0, 0.0));
        assert_eq!(items[2].world, Matrix4::identity());
    }

    #[test]
    fn geometry_lookup_by_name() {
        let scene = small_scene();
        assert_eq!(scene.geometry_by_name("quad"), Some(GeometryId(1)));
        assert!(scene.geometry_by_name("sphere").is_none());
        assert!(scene.geometry(GeometryId(7)).is_none());
    }

    #[test]
    fn statistics_count_each_draw() {
        let stats = small_scene().get_statistics();
        assert_eq!(stats.node_count, 4);
        assert_eq!(stats.mesh_count, 3);
        assert_eq!(stats.geometry_count, 2);
        assert_eq!(stats.material_count, 1);
        assert_eq!(stats.total_triangles, 12 + 12 + 2);
        assert_eq!(stats.total_vertices, 24 + 24 + 4);
    }

    #[test]
    fn no_draw_calls_before_gpu_init() {
        let scene = small_scene();
        assert!(!scene.is_gpu_ready());
        assert!(scene.gpu_draw_calls().is_empty());
    }
}
