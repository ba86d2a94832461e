use crate::assets::registry::TextureId;
use crate::components::entity::Entity;
use crate::components::mesh::{BlendMode, Shape};
use crate::renderer::instance::{RenderBuffer, RenderInstance};

/// Turn one entity into a render instance, if it is visible.
pub fn instance_for(entity: &Entity) -> Option<RenderInstance> {
    if !entity.active {
        return None;
    }
    let mesh = entity.mesh.as_ref()?;
    if mesh.alpha <= 0.0 {
        return None;
    }

    let emissive = match mesh.shape {
        Shape::Ring { inner, outer } if outer > 0.0 => inner / outer,
        _ => mesh.emissive,
    };

    Some(RenderInstance {
        x: entity.pos.x,
        y: entity.pos.y,
        z: entity.pos.z,
        scale: mesh.shape.extent() * entity.scale,
        spin: entity.spin,
        alpha: mesh.alpha,
        r: mesh.color.r,
        g: mesh.color.g,
        b: mesh.color.b,
        shape: mesh.shape.code(),
        texture: TextureId::code(mesh.texture),
        emissive,
    })
}

/// Build the render buffer from a set of entities.
/// Alpha-blended instances come first, then additive ones starting at
/// `blend_split`. Stops at `max_instances`.
pub fn build_render_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    buffer: &mut RenderBuffer,
    max_instances: usize,
) {
    buffer.clear();

    let mut additive_instances: Vec<RenderInstance> = Vec::new();

    for entity in entities {
        let Some(instance) = instance_for(entity) else {
            continue;
        };
        let blend = entity.mesh.as_ref().map(|m| m.blend).unwrap_or_default();
        match blend {
            BlendMode::Alpha => buffer.push(instance),
            BlendMode::Additive => additive_instances.push(instance),
        }
    }

    buffer.instances.truncate(max_instances);
    let split = buffer.instances.len();
    buffer.set_blend_split(split as u32);

    let room = max_instances.saturating_sub(split);
    if additive_instances.len() > room {
        log::warn!(
            "render buffer full: dropping {} additive instances",
            additive_instances.len() - room
        );
    }
    buffer.instances.extend(additive_instances.into_iter().take(room));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::components::mesh::{Color, MeshComponent};
    use glam::Vec3;

    fn sphere(id: u32, blend: BlendMode) -> Entity {
        Entity::new(EntityId(id))
            .with_pos(Vec3::new(id as f32, 0.0, 0.0))
            .with_scale(2.0)
            .with_mesh(MeshComponent::sphere(3.0, Color::WHITE).with_blend(blend))
    }

    #[test]
    fn build_buffer_groups_by_blend_mode() {
        let entities = vec![
            sphere(1, BlendMode::Alpha),
            sphere(2, BlendMode::Additive),
            sphere(3, BlendMode::Alpha),
        ];

        let mut buffer = RenderBuffer::new();
        build_render_buffer(entities.iter(), &mut buffer, 64);

        assert_eq!(buffer.instance_count(), 3);
        assert_eq!(buffer.blend_split, 2);
        assert_eq!(buffer.instances[2].x, 2.0);
        assert_eq!(buffer.instances[0].scale, 6.0);
    }

    #[test]
    fn inactive_and_meshless_entities_are_skipped() {
        let mut hidden = sphere(1, BlendMode::Alpha);
        hidden.active = false;
        let bare = Entity::new(EntityId(2));

        let entities = vec![hidden, bare];
        let mut buffer = RenderBuffer::new();
        build_render_buffer(entities.iter(), &mut buffer, 64);
        assert_eq!(buffer.instance_count(), 0);
    }

    #[test]
    fn ring_carries_radius_ratio() {
        let ring = Entity::new(EntityId(1)).with_mesh(MeshComponent::ring(1.2, 2.2, Color::WHITE));
        let inst = instance_for(&ring).unwrap();
        assert_eq!(inst.shape, 1.0);
        assert!((inst.emissive - 1.2 / 2.2).abs() < 1e-6);
        assert_eq!(inst.texture, -1.0);
    }

    #[test]
    fn capacity_is_respected() {
        let entities: Vec<Entity> = (1..=10)
            .map(|i| sphere(i, if i % 2 == 0 { BlendMode::Additive } else { BlendMode::Alpha }))
            .collect();
        let mut buffer = RenderBuffer::new();
        build_render_buffer(entities.iter(), &mut buffer, 7);
        assert_eq!(buffer.instance_count(), 7);
        assert_eq!(buffer.blend_split, 5);
    }
}
