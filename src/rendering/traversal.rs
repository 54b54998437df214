use glam::Mat4;

use crate::rendering::renderer::{DrawMode, Renderer};
use crate::scene_graph::{EntityId, MeshRenderer, Scene};

/// Draws the subtree under `id` and returns the number of draw calls issued.
///
/// World transforms flow top-down: every child is visited with its parent's
/// world matrix. Draws are emitted bottom-up: an entity is drawn only after
/// all of its descendants, so siblings come out in child order and ancestors
/// last. Backends rely on this ordering, keep it.
///
/// Inactive entities are skipped together with their subtree. Only the first
/// mesh renderer of an entity is drawn, and only if it has a mesh.
pub fn render_object<R>(
    scene: &Scene,
    id: EntityId,
    parent_world: Mat4,
    mode: DrawMode,
    renderer: &mut R,
) -> usize
where
    R: Renderer + ?Sized,
{
    let Some(entity) = scene.get_entity(id) else {
        log::warn!("Skipping unknown entity {:?}", id);
        return 0;
    };

    if !entity.active {
        return 0;
    }

    let world = parent_world * entity.transform.matrix();

    let mut draws = 0;
    for &child in entity.children() {
        draws += render_object(scene, child, world, mode, renderer);
    }

    match entity.get::<MeshRenderer>() {
        Some(mesh_renderer) if mesh_renderer.has_mesh() => {
            renderer.draw(mesh_renderer.mesh, world, mode);
            draws + 1
        }
        _ => draws,
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::rendering::headless::HeadlessRenderer;
    use crate::resources::ResourceHandle;
    use crate::scene_graph::Transform;

    fn add_mesh(scene: &mut Scene, id: EntityId, mesh: u32) {
        scene
            .get_entity_mut(id)
            .unwrap()
            .add_component(MeshRenderer::new(ResourceHandle(mesh)));
    }

    fn drawn_meshes(renderer: &HeadlessRenderer) -> Vec<u32> {
        renderer.draws().map(|(mesh, _, _)| mesh.0).collect()
    }

    #[test]
    fn siblings_draw_in_order_without_root() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = scene.spawn_child(root, "A").unwrap();
        let b = scene.spawn_child(root, "B").unwrap();
        add_mesh(&mut scene, a, 1);
        add_mesh(&mut scene, b, 2);

        let mut renderer = HeadlessRenderer::new();
        let draws = render_object(&scene, root, Mat4::IDENTITY, DrawMode::Fill, &mut renderer);

        assert_eq!(draws, 2);
        assert_eq!(drawn_meshes(&renderer), vec![1, 2]);
    }

    #[test]
    fn descendants_draw_before_ancestors() {
        // root(1) -> [a(2) -> [a1(3), a2(4)], b(5) -> [b1(6)]]
        let mut scene = Scene::new();
        let root = scene.root();
        let a = scene.spawn_child(root, "a").unwrap();
        let a1 = scene.spawn_child(a, "a1").unwrap();
        let a2 = scene.spawn_child(a, "a2").unwrap();
        let b = scene.spawn_child(root, "b").unwrap();
        let b1 = scene.spawn_child(b, "b1").unwrap();

        for (id, mesh) in [(root, 1), (a, 2), (a1, 3), (a2, 4), (b, 5), (b1, 6)] {
            add_mesh(&mut scene, id, mesh);
        }

        let mut renderer = HeadlessRenderer::new();
        render_object(&scene, root, Mat4::IDENTITY, DrawMode::Fill, &mut renderer);

        assert_eq!(drawn_meshes(&renderer), vec![3, 4, 2, 6, 5, 1]);
    }

    #[test]
    fn world_transform_propagates_to_children() {
        let mut scene = Scene::new();
        let root = scene.root();
        scene.get_entity_mut(root).unwrap().transform =
            Transform::from_position(Vec3::new(1.0, 0.0, 0.0));
        let child = scene.spawn_child(root, "child").unwrap();
        scene.get_entity_mut(child).unwrap().transform =
            Transform::from_position(Vec3::new(0.0, 1.0, 0.0));
        add_mesh(&mut scene, child, 1);

        let mut renderer = HeadlessRenderer::new();
        render_object(&scene, root, Mat4::IDENTITY, DrawMode::Fill, &mut renderer);

        let (_, world, _) = renderer.draws().next().unwrap();
        let position = world.transform_point3(Vec3::ZERO);
        assert!(position.abs_diff_eq(Vec3::new(1.0, 1.0, 0.0), 1e-6));
        assert!(world.abs_diff_eq(scene.world_transform(child), 1e-6));
    }

    #[test]
    fn empty_mesh_and_missing_renderer_are_not_drawn() {
        let mut scene = Scene::new();
        let root = scene.root();
        let empty = scene.spawn_child(root, "empty").unwrap();
        add_mesh(&mut scene, empty, 0);
        scene.spawn_child(root, "bare").unwrap();

        let mut renderer = HeadlessRenderer::new();
        let draws = render_object(&scene, root, Mat4::IDENTITY, DrawMode::Fill, &mut renderer);

        assert_eq!(draws, 0);
        assert!(renderer.commands().is_empty());
    }

    #[test]
    fn only_first_mesh_renderer_is_drawn() {
        let mut scene = Scene::new();
        let root = scene.root();
        add_mesh(&mut scene, root, 7);
        add_mesh(&mut scene, root, 8);

        let mut renderer = HeadlessRenderer::new();
        render_object(&scene, root, Mat4::IDENTITY, DrawMode::Lines, &mut renderer);

        let draws: Vec<_> = renderer.draws().collect();
        assert_eq!(draws, vec![(ResourceHandle(7), Mat4::IDENTITY, DrawMode::Lines)]);
    }

    #[test]
    fn inactive_subtree_is_skipped() {
        let mut scene = Scene::new();
        let root = scene.root();
        let hidden = scene.spawn_child(root, "hidden").unwrap();
        let below = scene.spawn_child(hidden, "below").unwrap();
        let shown = scene.spawn_child(root, "shown").unwrap();
        add_mesh(&mut scene, hidden, 1);
        add_mesh(&mut scene, below, 2);
        add_mesh(&mut scene, shown, 3);
        scene.get_entity_mut(hidden).unwrap().active = false;

        let mut renderer = HeadlessRenderer::new();
        render_object(&scene, root, Mat4::IDENTITY, DrawMode::Fill, &mut renderer);

        assert_eq!(drawn_meshes(&renderer), vec![3]);
    }

    #[test]
    fn detached_entities_are_not_drawn() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = scene.spawn_child(root, "a").unwrap();
        add_mesh(&mut scene, a, 1);
        scene.remove_child(root, 0).unwrap();

        let mut renderer = HeadlessRenderer::new();
        assert_eq!(
            render_object(&scene, root, Mat4::IDENTITY, DrawMode::Fill, &mut renderer),
            0
        );
    }
}
