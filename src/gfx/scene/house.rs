//! Builds the haunted house scene
//!
//! ```text
//! scene
//! ├── house (group)
//! │   ├── walls, roof, door
//! │   └── bush 1..4
//! ├── graves (group, empty unless GraveConfig::count > 0)
//! └── floor
//! ```

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    config::GraveConfig,
    gfx::{
        geometry::{generate_box, generate_cone, generate_plane, generate_sphere},
        resources::material::Material,
    },
};

use super::{
    node::{GeometryId, SceneNode},
    scene::Scene,
};

pub const HOUSE: &str = "house";
pub const GRAVES: &str = "graves";
pub const FLOOR: &str = "floor";

const WALLS_HEIGHT: f32 = 2.5;
const ROOF_HEIGHT: f32 = 1.0;

/// (uniform scale, position) of each bush around the door
const BUSHES: [(f32, [f32; 3]); 4] = [
    (0.5, [0.8, 0.2, 2.2]),
    (0.25, [1.4, 0.1, 2.1]),
    (0.4, [-0.8, 0.1, 2.2]),
    (0.15, [-1.0, 0.05, 2.6]),
];

/// Builds the complete scene: house, graves, floor and default lights
pub fn build_haunted_house(graves: &GraveConfig) -> Scene {
    let mut scene = Scene::new();

    scene.add_material(Material::from_hex("walls", 0xac8e82));
    scene.add_material(Material::from_hex("roof", 0xb35f45));
    scene.add_material(Material::from_hex("door", 0xaa7b7b));
    scene.add_material(Material::from_hex("bush", 0x89c854));
    scene.add_material(Material::from_hex("grave", 0xb2b6b1));
    scene.add_material(Material::from_hex("grass", 0xa9c388));

    let walls = scene.add_geometry("walls", generate_box(4.0, WALLS_HEIGHT, 4.0));
    let roof = scene.add_geometry("roof", generate_cone(3.5, ROOF_HEIGHT, 4));
    let door = scene.add_geometry("door", generate_plane(2.0, 2.0, 1, 1));
    let bush = scene.add_geometry("bush", generate_sphere(16, 16));
    let grave = scene.add_geometry("grave", generate_box(0.6, 0.8, 0.2));
    let floor = scene.add_geometry("floor", generate_plane(20.0, 20.0, 1, 1));

    let mut house = SceneNode::group(HOUSE)
        .with_child(SceneNode::mesh("walls", walls, "walls").with_position(
            0.0,
            WALLS_HEIGHT / 2.0,
            0.0,
        ))
        .with_child(
            SceneNode::mesh("roof", roof, "roof")
                .with_position(0.0, WALLS_HEIGHT + ROOF_HEIGHT / 2.0, 0.0)
                .with_rotation(0.0, FRAC_PI_4, 0.0),
        )
        // Nudged off the wall to avoid z-fighting
        .with_child(SceneNode::mesh("door", door, "door").with_position(0.0, 1.0, 2.001));

    for (i, (scale, [x, y, z])) in BUSHES.into_iter().enumerate() {
        house.add_child(
            SceneNode::mesh(&format!("bush {}", i + 1), bush, "bush")
                .with_uniform_scale(scale)
                .with_position(x, y, z),
        );
    }

    scene.add_node(house);
    scene.add_node(build_graves(graves, grave));
    scene.add_node(
        SceneNode::mesh(FLOOR, floor, "grass").with_rotation(-FRAC_PI_2, 0.0, 0.0),
    );

    let stats = scene.get_statistics();
    log::info!(
        "Built haunted house: {} nodes, {} meshes, {} triangles",
        stats.node_count,
        stats.mesh_count,
        stats.total_triangles
    );

    scene
}

/// Scatters graves on a ring around the house
///
/// Stays empty for the default `count` of zero.
fn build_graves(config: &GraveConfig, grave: GeometryId) -> SceneNode {
    let mut group = SceneNode::group(GRAVES);
    if config.count == 0 {
        return group;
    }

    log::warn!(
        "Scattering {} graves (seed {}); the default scene leaves the graves group empty",
        config.count,
        config.seed
    );

    let mut rng = StdRng::seed_from_u64(config.seed);
    for i in 0..config.count {
        let angle = rng.random::<f32>() * PI * 2.0;
        let radius = 3.0 + rng.random::<f32>() * 6.0;
        let tilt_y = (rng.random::<f32>() - 0.5) * 0.4;
        let tilt_z = (rng.random::<f32>() - 0.5) * 0.4;

        group.add_child(
            SceneNode::mesh(&format!("grave {}", i + 1), grave, "grave")
                .with_position(angle.sin() * radius, 0.3, angle.cos() * radius)
                .with_rotation(0.0, tilt_y, tilt_z),
        );
    }

    group
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::node::NodeKind;
    use cgmath::{Point3, Transform};

    fn scene() -> Scene {
        build_haunted_house(&GraveConfig::default())
    }

    #[test]
    fn root_has_house_graves_and_floor() {
        let scene = scene();
        let names: Vec<_> = scene.nodes().iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec![HOUSE, GRAVES, FLOOR]);
    }

    #[test]
    fn house_has_seven_children() {
        let scene = scene();
        let house = scene.find(HOUSE).expect("house group");
        assert_eq!(house.kind, NodeKind::Group);

        let names: Vec<_> = house.children().iter().map(|n| n.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["walls", "roof", "door", "bush 1", "bush 2", "bush 3", "bush 4"]
        );
        assert!(house.children().iter().all(SceneNode::is_mesh));
    }

    #[test]
    fn graves_group_is_empty_by_default() {
        let scene = scene();
        let graves = scene.find(GRAVES).expect("graves group");
        assert!(graves.children().is_empty());
        // The grave assets are registered anyway
        assert!(scene.geometry_by_name("grave").is_some());
        assert!(scene.material_manager.get_material("grave").is_some());
    }

    #[test]
    fn bushes_share_one_geometry() {
        let scene = scene();
        let bush_geometries: Vec<_> = scene
            .draw_items()
            .into_iter()
            .filter(|item| item.name.starts_with("bush"))
            .map(|item| item.geometry)
            .collect();
        assert_eq!(bush_geometries.len(), 4);
        assert!(bush_geometries.iter().all(|g| *g == bush_geometries[0]));
    }

    #[test]
    fn placements_match_layout() {
        let scene = scene();
        let origin = |name: &str| {
            let item = scene
                .draw_items()
                .into_iter()
                .find(|item| item.name == name)
                .expect("draw item");
            item.world.transform_point(Point3::new(0.0, 0.0, 0.0))
        };

        assert_eq!(origin("walls"), Point3::new(0.0, 1.25, 0.0));
        assert_eq!(origin("roof"), Point3::new(0.0, 3.0, 0.0));
        assert_eq!(origin("door"), Point3::new(0.0, 1.0, 2.001));
        assert_eq!(origin("bush 4"), Point3::new(-1.0, 0.05, 2.6));
        assert_eq!(origin(FLOOR), Point3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn roof_sits_on_walls() {
        let scene = scene();
        let roof = scene.find("roof").expect("roof");
        let bottom = roof.transform.position.y - ROOF_HEIGHT / 2.0;
        assert!((bottom - WALLS_HEIGHT).abs() < 1e-6);
        assert!((roof.transform.rotation.y - FRAC_PI_4).abs() < 1e-6);
    }

    #[test]
    fn six_standard_materials() {
        let scene = scene();
        assert_eq!(scene.material_manager.len(), 6);
        let grass = scene.material_manager.get_material("grass").expect("grass");
        assert_eq!(grass.roughness, 1.0);
        assert_eq!(grass.metalness, 0.0);
    }

    #[test]
    fn opt_in_graves_are_seeded() {
        let config = GraveConfig { count: 12, seed: 7 };
        let a = build_haunted_house(&config);
        let b = build_haunted_house(&config);

        let graves = a.find(GRAVES).expect("graves group");
        assert_eq!(graves.children().len(), 12);
        assert_eq!(a.draw_items(), b.draw_items());

        for grave in graves.children() {
            let p = grave.transform.position;
            let radius = (p.x * p.x + p.z * p.z).sqrt();
            assert!((3.0 - 1e-4..=9.0 + 1e-4).contains(&radius));
        }
    }
}
