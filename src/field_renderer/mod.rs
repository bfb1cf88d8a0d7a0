mod error;
mod field_matrix;
mod host;
mod layout;
mod palette;
mod renderer;

use bevy::{
    prelude::*,
    render::camera::{Camera, CameraPlugin},
    window::WindowResized,
};

use crate::components::FieldCell;

pub use self::error::FieldError;
pub use self::field_matrix::FieldMatrix;
pub use self::host::{RenderHost, SpriteHost, ViewProjection, Viewport, DEFAULT_SPRITE_SIDE};
pub use self::layout::{FieldLayout, EDGE_MARGIN};
pub use self::palette::color_of;
pub use self::renderer::FieldRenderer;

/// Grid size and margin of the rendered field.
#[derive(Debug, Clone, Copy)]
pub struct FieldConfig {
    pub columns: usize,
    pub rows: usize,
    pub margin: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            columns: 10,
            rows: 20,
            margin: EDGE_MARGIN,
        }
    }
}

/// The field currently on screen; write to it to redraw.
pub struct Field(pub FieldMatrix);

pub struct FieldSprites(pub FieldRenderer<Entity>);

// logical size of the primary window, zero while there is none or it is minimized
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct WindowExtent(pub Vec2);

#[derive(SystemLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldSystem {
    Measure,
    Build,
    Redraw,
}

#[derive(Default)]
pub struct FieldRendererPlugin {
    pub config: FieldConfig,
}

impl Plugin for FieldRendererPlugin {
    fn build(&self, app: &mut App) {
        let config = self.config;
        app.insert_resource(config)
            .insert_resource(Field(FieldMatrix::new(config.columns, config.rows)))
            .insert_resource(WindowExtent::default())
            .add_system(measure_window.label(FieldSystem::Measure))
            .add_system(
                build_field_renderer
                    .label(FieldSystem::Build)
                    .after(FieldSystem::Measure),
            )
            .add_system(
                redraw_field
                    .label(FieldSystem::Redraw)
                    .after(FieldSystem::Build),
            )
            // despawns must be queued after any recolor of the same cells
            .add_system(rebuild_on_resize.after(FieldSystem::Redraw));
    }
}

fn measure_window(windows: Res<Windows>, mut extent: ResMut<WindowExtent>) {
    let size = windows
        .get_primary()
        .map_or(Vec2::ZERO, |window| Vec2::new(window.width(), window.height()));
    if extent.0 != size {
        extent.0 = size;
    }
}

fn is_2d_camera(camera: &Camera) -> bool {
    camera.name.as_deref() == Some(CameraPlugin::CAMERA_2D)
}

fn build_field_renderer(
    mut commands: Commands,
    config: Res<FieldConfig>,
    extent: Res<WindowExtent>,
    sprites: Option<Res<FieldSprites>>,
    mut resized: EventReader<WindowResized>,
    cameras: Query<(&Camera, &GlobalTransform), With<OrthographicProjection>>,
    mut gave_up: Local<bool>,
) {
    // a failed layout gets another try once the window changes
    if resized.iter().count() > 0 {
        *gave_up = false;
    }
    if sprites.is_some() || *gave_up {
        return;
    }
    if extent.0.x <= 0. || extent.0.y <= 0. {
        return;
    }

    let (camera, camera_transform) = match cameras.iter().find(|(camera, _)| is_2d_camera(camera))
    {
        Some(camera) => camera,
        None => return,
    };
    // the camera system fills in the projection on its first PostUpdate
    if camera.projection_matrix == Mat4::IDENTITY {
        debug!("camera projection not ready, deferring field layout");
        return;
    }

    let view = ViewProjection::new(
        extent.0,
        camera.projection_matrix,
        camera_transform.compute_matrix(),
    );
    let built = FieldRenderer::with_margin(
        &view,
        &mut SpriteHost::new(&mut commands),
        config.columns,
        config.rows,
        config.margin,
    );

    match built {
        Ok(renderer) => {
            for (column, row, &ent) in renderer.cells() {
                commands.entity(ent).insert(FieldCell { column, row });
            }
            info!(
                "built {}x{} field, cell edge {}",
                renderer.columns(),
                renderer.rows(),
                renderer.layout().edge()
            );
            commands.insert_resource(FieldSprites(renderer));
        }
        Err(err) => {
            error!("cannot lay out field: {}", err);
            *gave_up = true;
        }
    }
}

fn redraw_field(mut commands: Commands, field: Res<Field>, sprites: Option<Res<FieldSprites>>) {
    let sprites = match sprites {
        Some(sprites) => sprites,
        None => return,
    };
    if !field.is_changed() && !sprites.is_added() {
        return;
    }

    if let Err(err) = sprites.0.draw(&mut SpriteHost::new(&mut commands), &field.0) {
        error!("dropping field update: {}", err);
    }
}

// cell size depends on the window, so a resize drops the sprites and the build system lays them out again
fn rebuild_on_resize(
    mut commands: Commands,
    mut resized: EventReader<WindowResized>,
    sprites: Option<Res<FieldSprites>>,
) {
    if resized.iter().count() == 0 {
        return;
    }
    if let Some(sprites) = sprites {
        info!("window resized, rebuilding field");
        sprites.0.clone().destroy(&mut SpriteHost::new(&mut commands));
        commands.remove_resource::<FieldSprites>();
    }
}
