//! SDL2 presentation of a [`FrameBuffer`] plus the input the viewer needs.

use sdl2::event::Event;
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;

pub use sdl2::keyboard::Keycode;

use crate::render::FrameBuffer;

pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 800;
pub const FPS: u64 = 60;
pub const FRAME_TARGET_TIME: u64 = 1000 / FPS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    None,
    Quit,
    Resize(u32, u32),
    /// Mouse moved with the left button held, in pixels since the last poll.
    Drag(i32, i32),
    KeyDown(Keycode),
}

pub struct FrameLimiter {
    previous_frame_time: u64,
}

impl FrameLimiter {
    pub fn new(window: &Window) -> Self {
        Self {
            previous_frame_time: window.timer().ticks64(),
        }
    }

    /// Sleeps until the frame budget is spent and returns the milliseconds
    /// elapsed since the previous call.
    pub fn wait_and_get_delta(&mut self, window: &Window) -> u64 {
        let elapsed = window.timer().ticks64() - self.previous_frame_time;
        if elapsed < FRAME_TARGET_TIME {
            std::thread::sleep(std::time::Duration::from_millis(
                FRAME_TARGET_TIME - elapsed,
            ));
        }

        let now = window.timer().ticks64();
        let delta = now - self.previous_frame_time;
        self.previous_frame_time = now;
        delta
    }
}

pub struct Window {
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    // Declared before `texture_creator` so it is dropped first.
    texture: sdl2::render::Texture<'static>,
    texture_creator: Box<sdl2::render::TextureCreator<sdl2::video::WindowContext>>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    width: u32,
    height: u32,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let timer_subsystem = sdl_context.timer()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump()?;
        let texture = Self::streaming_texture(&texture_creator, width, height)?;

        log::info!("Opened {}x{} window", width, height);
        Ok(Self {
            canvas,
            texture,
            texture_creator,
            event_pump,
            timer_subsystem,
            width,
            height,
        })
    }

    fn streaming_texture(
        texture_creator: &sdl2::render::TextureCreator<sdl2::video::WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<sdl2::render::Texture<'static>, String> {
        // SAFETY: the creator is boxed, owned by the Window and outlives the
        // texture thanks to field drop order.
        let creator: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(texture_creator as *const _) };
        creator
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())
    }

    /// Drains pending events. Quit and resize are reported immediately;
    /// drags are summed over the whole batch.
    pub fn poll_events(&mut self) -> WindowEvent {
        let (mut dx, mut dy) = (0, 0);
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => return WindowEvent::Quit,
                Event::KeyDown {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => return WindowEvent::KeyDown(key),
                Event::Window {
                    win_event: sdl2::event::WindowEvent::Resized(w, h),
                    ..
                } => return WindowEvent::Resize(w as u32, h as u32),
                Event::MouseMotion {
                    mousestate,
                    xrel,
                    yrel,
                    ..
                } if mousestate.left() => {
                    dx += xrel;
                    dy += yrel;
                }
                _ => {}
            }
        }

        if dx != 0 || dy != 0 {
            WindowEvent::Drag(dx, dy)
        } else {
            WindowEvent::None
        }
    }

    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), String> {
        self.texture
            .update(None, framebuffer.argb_bytes(), framebuffer.stride())
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas.copy(
            &self.texture,
            None,
            Some(Rect::new(0, 0, framebuffer.width(), framebuffer.height())),
        )?;
        self.canvas.present();
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), String> {
        self.texture = Self::streaming_texture(&self.texture_creator, width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn timer(&self) -> &sdl2::TimerSubsystem {
        &self.timer_subsystem
    }
}
