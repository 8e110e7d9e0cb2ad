//! SDL2 window, streaming texture and input translation

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::EventPump;

use crate::paint::PixelBuffer;

pub struct Display {
    canvas: Canvas<Window>,
    event_pump: EventPump,
    width: u32,
    height: u32,
}

pub struct RenderTarget<'a> {
    texture: Texture<'a>,
    width: u32,
    height: u32,
}

#[derive(Debug, Clone)]
pub enum InputEvent {
    Quit,
    KeyDown(Keycode),
    KeyUp(Keycode),
    MouseMove {
        x: i32,
        y: i32,
    },
    MouseDown {
        x: i32,
        y: i32,
        button: MouseButtonKind,
    },
    MouseUp {
        x: i32,
        y: i32,
        button: MouseButtonKind,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButtonKind {
    Left,
    Right,
    Middle,
}

impl Display {
    /// Open a centred window of the given size
    /// vsync=true: present waits for the monitor refresh
    pub fn with_options(
        title: &str,
        width: u32,
        height: u32,
        vsync: bool,
    ) -> Result<(Self, TextureCreator<WindowContext>), String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;

        let mut canvas_builder = window.into_canvas().accelerated();
        if vsync {
            canvas_builder = canvas_builder.present_vsync();
        }
        let canvas = canvas_builder.build().map_err(|e| e.to_string())?;

        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context.event_pump()?;
        log::info!("opened {}x{} window (vsync {})", width, height, vsync);

        Ok((
            Self {
                canvas,
                event_pump,
                width,
                height,
            },
            texture_creator,
        ))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Upload `buffer` and show it. Buffers smaller than the target only
    /// update their own area; larger ones are clipped to the target.
    pub fn present(&mut self, target: &mut RenderTarget, buffer: &PixelBuffer) -> Result<(), String> {
        let w = buffer.width().min(target.width);
        let h = buffer.height().min(target.height);
        if w > 0 && h > 0 {
            let bytes = buffer.to_rgba8888();
            let pitch = (buffer.width() * 4) as usize;
            // rows arrive bottom-up, so a taller buffer is clipped at the top
            let skip = (buffer.height() - h) as usize * pitch;
            let rect = sdl2::rect::Rect::new(0, (target.height - h) as i32, w, h);
            target
                .texture
                .update(rect, &bytes[skip..], pitch)
                .map_err(|e| e.to_string())?;
        }

        self.canvas.copy(&target.texture, None, None)?;
        self.canvas.present();
        Ok(())
    }

    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => events.push(InputEvent::Quit),
                Event::KeyDown {
                    keycode: Some(k), ..
                } => events.push(InputEvent::KeyDown(k)),
                Event::KeyUp {
                    keycode: Some(k), ..
                } => events.push(InputEvent::KeyUp(k)),
                Event::MouseMotion { x, y, .. } => events.push(InputEvent::MouseMove { x, y }),
                Event::MouseButtonDown {
                    x, y, mouse_btn, ..
                } => {
                    if let Some(button) = map_mouse_button(mouse_btn) {
                        events.push(InputEvent::MouseDown { x, y, button });
                    }
                },
                Event::MouseButtonUp {
                    x, y, mouse_btn, ..
                } => {
                    if let Some(button) = map_mouse_button(mouse_btn) {
                        events.push(InputEvent::MouseUp { x, y, button });
                    }
                },
                _ => {},
            }
        }

        events
    }
}

impl<'a> RenderTarget<'a> {
    /// Streaming RGBA8888 texture the size of the canvas
    pub fn with_size(
        texture_creator: &'a TextureCreator<WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<Self, String> {
        let texture = texture_creator
            .create_texture_streaming(PixelFormatEnum::RGBA8888, width, height)
            .map_err(|e| e.to_string())?;
        Ok(Self {
            texture,
            width,
            height,
        })
    }
}

fn map_mouse_button(btn: MouseButton) -> Option<MouseButtonKind> {
    match btn {
        MouseButton::Left => Some(MouseButtonKind::Left),
        MouseButton::Right => Some(MouseButtonKind::Right),
        MouseButton::Middle => Some(MouseButtonKind::Middle),
        _ => None,
    }
}
