//! Demo viewer: a handful of labelled boxes framed by an orthographic
//! camera with trackball controls.

use std::path::PathBuf;

use clap::Parser;
use glam::{Quat, Vec3};
use orthoview::{
    options::Options,
    scene::{Geometry, Label, Object3D},
    Viewer,
};

#[derive(Parser)]
#[command(name = "orthoview", about = "Orthographic scene viewer demo")]
struct Cli {
    /// Options file (TOML); missing fields use defaults
    #[arg(long, short)]
    options: Option<PathBuf>,

    /// Write the default options to this path and exit
    #[arg(long, value_name = "PATH")]
    write_defaults: Option<PathBuf>,

    /// Print the options JSON schema and exit
    #[arg(long)]
    schema: bool,

    /// Number of boxes in the demo scene
    #[arg(long, default_value_t = 5)]
    count: u32,
}

fn demo_objects(count: u32) -> Vec<Object3D> {
    let palette = [
        [0.9, 0.3, 0.3],
        [0.3, 0.8, 0.4],
        [0.3, 0.5, 0.9],
        [0.9, 0.8, 0.3],
        [0.7, 0.4, 0.9],
    ];
    (0..count)
        .map(|i| {
            let t = i as f32;
            let size = Vec3::new(4.0 + t, 2.0 + (t * 0.7).sin().abs() * 6.0, 3.0);
            let name = format!("box-{i}");
            Object3D::mesh(name.clone(), Geometry::cuboid(size))
                .with_position(Vec3::new(t * 9.0, (t * 1.3).cos() * 4.0, -t * 2.0))
                .with_rotation(Quat::from_rotation_y(t * 0.4))
                .with_color(palette[i as usize % palette.len()])
                .with_label(Label::new(name).with_offset(Vec3::new(0.0, size.y * 0.5 + 1.0, 0.0)))
        })
        .collect()
}

fn run(cli: Cli) -> Result<(), orthoview::OrthoviewError> {
    if cli.schema {
        println!("{}", Options::json_schema_string()?);
        return Ok(());
    }
    if let Some(path) = cli.write_defaults {
        Options::default().save(&path)?;
        log::info!("wrote default options to {}", path.display());
        return Ok(());
    }

    let options = match &cli.options {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };

    let mut objects = demo_objects(cli.count);
    for object in &mut objects {
        if let Some(geometry) = object.geometry_mut() {
            geometry.compute_bounds_tree();
        }
    }

    Viewer::builder()
        .with_options(options)
        .with_objects(objects)
        .build()
        .run()
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Cli::parse()) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
