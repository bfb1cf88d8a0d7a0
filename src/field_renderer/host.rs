use bevy::{
    math::{Mat4, Vec2, Vec3},
    prelude::{default, Color, Commands, Entity, Sprite, SpriteBundle, Transform},
};

// cells are scaled up from an untextured sprite of this side
pub const DEFAULT_SPRITE_SIDE: f32 = 4.;

/// The visible screen area and its mapping into world space.
pub trait Viewport {
    fn viewport_size(&self) -> Vec2;
    // screen pixels are measured from the bottom left corner
    fn screen_to_world(&self, screen: Vec2) -> Vec3;
}

pub trait RenderHost {
    type Handle;

    fn create_square(&mut self, position: Vec3, edge: f32) -> Self::Handle;
    fn set_color(&mut self, handle: &Self::Handle, color: Color);
    fn destroy(&mut self, handle: Self::Handle);
}

#[derive(Debug, Clone, Copy)]
pub struct ViewProjection {
    window_size: Vec2,
    projection: Mat4,
    camera: Mat4,
}

impl ViewProjection {
    pub fn new(window_size: Vec2, projection: Mat4, camera: Mat4) -> ViewProjection {
        ViewProjection {
            window_size,
            projection,
            camera,
        }
    }
}

impl Viewport for ViewProjection {
    fn viewport_size(&self) -> Vec2 {
        self.window_size
    }

    fn screen_to_world(&self, screen: Vec2) -> Vec3 {
        // screen pixels -> normalized device coords in [-1, 1]
        let ndc = (screen / self.window_size) * 2. - Vec2::ONE;
        let ndc_to_world = self.camera * self.projection.inverse();
        ndc_to_world.project_point3(ndc.extend(0.))
    }
}

pub struct SpriteHost<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
}

impl<'a, 'w, 's> SpriteHost<'a, 'w, 's> {
    pub fn new(commands: &'a mut Commands<'w, 's>) -> SpriteHost<'a, 'w, 's> {
        SpriteHost { commands }
    }
}

fn cell_sprite(color: Color) -> Sprite {
    Sprite {
        color,
        custom_size: Some(Vec2::splat(DEFAULT_SPRITE_SIDE)),
        ..default()
    }
}

impl RenderHost for SpriteHost<'_, '_, '_> {
    type Handle = Entity;

    fn create_square(&mut self, position: Vec3, edge: f32) -> Entity {
        let scale = edge / DEFAULT_SPRITE_SIDE;
        self.commands
            .spawn_bundle(SpriteBundle {
                sprite: cell_sprite(Color::WHITE),
                transform: Transform {
                    translation: position,
                    scale: Vec3::new(scale, scale, 1.),
                    ..default()
                },
                ..default()
            })
            .id()
    }

    fn set_color(&mut self, handle: &Entity, color: Color) {
        // the entity may still be queued for spawning
        self.commands.entity(*handle).insert(cell_sprite(color));
    }

    fn destroy(&mut self, handle: Entity) {
        self.commands.entity(handle).despawn();
    }
}

#[cfg(test)]
mod test {
    use bevy::{
        math::{Mat4, Vec2, Vec3},
        prelude::default,
        render::camera::{CameraProjection, OrthographicProjection},
    };

    use super::{ViewProjection, Viewport};

    #[test]
    fn screen_corners_map_to_projection_bounds() {
        let projection = OrthographicProjection {
            left: -400.,
            right: 400.,
            bottom: -300.,
            top: 300.,
            ..default()
        };
        let camera = Mat4::from_translation(Vec3::new(10., 20., 999.9));
        let view = ViewProjection::new(
            Vec2::new(800., 600.),
            projection.get_projection_matrix(),
            camera,
        );

        assert_eq!(view.viewport_size(), Vec2::new(800., 600.));

        let min = view.screen_to_world(Vec2::ZERO);
        let max = view.screen_to_world(view.viewport_size());
        let mid = view.screen_to_world(Vec2::new(400., 300.));
        assert!(min.truncate().abs_diff_eq(Vec2::new(-390., -280.), 1e-3), "{}", min);
        assert!(max.truncate().abs_diff_eq(Vec2::new(410., 320.), 1e-3), "{}", max);
        assert!(mid.truncate().abs_diff_eq(Vec2::new(10., 20.), 1e-3), "{}", mid);
    }
}
