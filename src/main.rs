use bevy::{core::FixedTimestep, prelude::*};
use rand::{thread_rng, Rng};

use gravity_blocks::field_renderer::{Field, FieldConfig, FieldRendererPlugin, FieldSystem};

pub struct Dims {
    width: usize,
    height: usize,
}
pub const GRID_CELLS: Dims = Dims {
    width: 10,
    height: 20,
};
pub const WINDOW_SIDE_LEN: f32 = 640.;
// codes above the palette show up black
const MAX_CELL_CODE: i32 = 5;

fn main() {
    App::new()
        .insert_resource(WindowDescriptor {
            width: WINDOW_SIDE_LEN * 0.75,
            height: WINDOW_SIDE_LEN,
            title: "Gravity Blocks".to_string(),
            resizable: true,
            decorations: true,
            ..default()
        })
        .insert_resource(ClearColor(Color::rgb(0.5, 0.5, 0.5)))
        .add_startup_system(setup_camera)
        .add_plugins(DefaultPlugins)
        .add_plugin(FieldRendererPlugin {
            config: FieldConfig {
                columns: GRID_CELLS.width,
                rows: GRID_CELLS.height,
                ..default()
            },
        })
        .add_system_set(
            SystemSet::new()
                .with_run_criteria(FixedTimestep::step(0.5))
                .with_system(scramble_field.before(FieldSystem::Redraw)),
        )
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn_bundle(OrthographicCameraBundle::new_2d());
}

fn scramble_field(mut field: ResMut<Field>) {
    let mut rng = thread_rng();
    let (columns, rows) = (field.0.columns(), field.0.rows());
    for column in 0..columns {
        for row in 0..rows {
            field.0.set(column, row, rng.gen_range(0..=MAX_CELL_CODE));
        }
    }
}
