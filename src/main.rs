use std::path::PathBuf;

use clap::Parser;
use scanshade::colors::{BLACK, WHITE, YELLOW};
use scanshade::prelude::*;
use scanshade::window::{FrameLimiter, Keycode, Window, WindowEvent, WINDOW_HEIGHT, WINDOW_WIDTH};

const PERSPECTIVE: f32 = 0.0005;
const DRAG_SENSITIVITY: f32 = 0.01;
/// Share of the smaller window side the model's largest extent fills.
const FIT_RATIO: f32 = 0.8;

/// scanshade - CPU scanline rasterizer and model viewer
#[derive(Parser, Debug)]
#[command(name = "scanshade", version, about = "CPU scanline rasterizer and model viewer")]
struct Args {
    /// OBJ model to show. If omitted, shows the built-in cube.
    model: Option<PathBuf>,

    /// Image used to texture the model
    #[arg(short, long)]
    texture: Option<PathBuf>,

    /// Sample the texture with bilinear filtering
    #[arg(long)]
    bilinear: bool,

    /// Light each face once instead of per vertex
    #[arg(long)]
    flat: bool,

    /// Overlay triangle edges
    #[arg(short, long)]
    wireframe: bool,

    /// Keep triangles that face away from the camera
    #[arg(long)]
    no_cull: bool,

    /// Render one frame to this image file instead of opening a window
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Frame size as WIDTHxHEIGHT
    #[arg(long, value_parser = parse_size)]
    size: Option<(u32, u32)>,
}

impl Args {
    fn filter(&self) -> Filter {
        if self.bilinear {
            Filter::Bilinear
        } else {
            Filter::Nearest
        }
    }

    fn shading(&self) -> ShadingMode {
        if self.flat {
            ShadingMode::Flat
        } else {
            ShadingMode::Gouraud
        }
    }

    fn dimensions(&self) -> (u32, u32) {
        self.size.unwrap_or((WINDOW_WIDTH, WINDOW_HEIGHT))
    }
}

fn parse_size(value: &str) -> Result<(u32, u32), String> {
    let invalid = || format!("invalid size '{}', expected WIDTHxHEIGHT", value);
    let (w, h) = value.split_once('x').ok_or_else(invalid)?;
    let parse = |s: &str| match s.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(invalid()),
    };
    Ok((parse(w)?, parse(h)?))
}

/// Camera centered on the window, pushed back a little, with one white
/// light shining along the view direction.
fn default_scene(width: u32, height: u32) -> Scene {
    let view = Transform3D::translation(width as f32 / 2.0, height as f32 / 2.0, 100.0);
    Scene::new(view, PERSPECTIVE, BLACK).with_light(DirectionalLight::new(Vec3::FORWARD, WHITE))
}

/// Centers the model on the origin, scales it to the window and flips it
/// from y-up model space into y-down screen space.
fn fit_transform(model: &Model, width: u32, height: u32) -> Transform3D {
    let (min, max) = model.bounds().unwrap_or((-Vec3::ONE, Vec3::ONE));
    let center = (min + max) * 0.5;
    let extent = max - min;
    let largest = extent.x.max(extent.y).max(extent.z).max(f32::EPSILON);
    let s = FIT_RATIO * width.min(height) as f32 / largest;

    Transform3D::translation(-center.x, -center.y, -center.z).scale(s, -s, -s)
}

fn render(
    engine: &mut Engine,
    model: &Model,
    model_transform: &Transform3D,
    scene: &Scene,
    material: &Material,
) -> FrameStats {
    engine.clear();
    engine.draw_model(model, model_transform, scene, material)
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::debug!("{:?}", args);

    let model = match &args.model {
        Some(path) => Model::from_obj(path).map_err(|e| e.to_string())?,
        None => {
            log::info!("No model given, showing the built-in cube");
            Model::cube()
        }
    };
    let texture = args
        .texture
        .as_ref()
        .map(Texture::from_file)
        .transpose()
        .map_err(|e| e.to_string())?;
    let material = match &texture {
        Some(texture) => Material::textured(texture).with_filter(args.filter()),
        None => Material::solid(WHITE),
    };

    let (mut width, mut height) = args.dimensions();
    let mut engine = Engine::new(width, height);
    engine.clear_color = BLACK;
    engine.set_shading_mode(args.shading());
    engine.backface_culling = !args.no_cull;
    engine.wireframe = args.wireframe.then_some(YELLOW);

    let mut scene = default_scene(width, height);
    let mut fit = fit_transform(&model, width, height);

    if let Some(output) = &args.output {
        let stats = render(&mut engine, &model, &fit, &scene, &material);
        log::info!(
            "Rendered {} faces ({} culled)",
            stats.faces,
            stats.culled
        );
        return engine.framebuffer().save(output).map_err(|e| e.to_string());
    }

    let mut window = Window::new("scanshade", width, height)?;
    let mut limiter = FrameLimiter::new(&window);
    let mut placement = Transform::new();
    let mut dirty = true;

    loop {
        match window.poll_events() {
            WindowEvent::Quit => break,
            WindowEvent::Resize(w, h) => {
                (width, height) = (w, h);
                window.resize(width, height)?;
                engine.resize(width, height);
                scene = default_scene(width, height);
                fit = fit_transform(&model, width, height);
                dirty = true;
            }
            WindowEvent::Drag(dx, dy) => {
                placement.drag(dx as f32, dy as f32, DRAG_SENSITIVITY);
                dirty = true;
            }
            WindowEvent::KeyDown(Keycode::F) => {
                let mode = match engine.shading_mode() {
                    ShadingMode::Gouraud => ShadingMode::Flat,
                    ShadingMode::Flat => ShadingMode::Gouraud,
                };
                log::info!("Shading: {}", mode);
                engine.set_shading_mode(mode);
                dirty = true;
            }
            WindowEvent::KeyDown(Keycode::W) => {
                engine.wireframe = engine.wireframe.xor(Some(YELLOW));
                dirty = true;
            }
            WindowEvent::KeyDown(Keycode::C) => {
                engine.backface_culling = !engine.backface_culling;
                log::info!("Back-face culling: {}", engine.backface_culling);
                dirty = true;
            }
            WindowEvent::KeyDown(_) | WindowEvent::None => {}
        }

        if dirty {
            let model_transform = fit.concat(&placement.to_transform3d());
            render(&mut engine, &model, &model_transform, &scene, &material);
            dirty = false;
        }

        window.present(engine.framebuffer())?;
        limiter.wait_and_get_delta(&window);
    }

    Ok(())
}
