extern crate sfml;

use sfml::graphics::{Color, RectangleShape, RenderTarget, RenderWindow, Shape, Transformable};
use sfml::system::Vector2f;
use sfml::window::{ContextSettings, Event, Style, VideoMode};

use crate::emulator::basics::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::emulator::machine::FrameBuffer;
use crate::emulator::vm::VirtualMachine;
use crate::keymap::pad_key;

const SCALE: usize = 16;

/// Window front end. Single-threaded on purpose: the frame loop polls
/// events, forwards keys into the interpreter, and paints whatever the
/// framebuffer holds, once per frame at the window's 60 Hz limit.
pub struct Visualizer {
    window: RenderWindow,
    pixels: [[RectangleShape<'static>; SCREEN_HEIGHT as usize]; SCREEN_WIDTH as usize],
}

impl Visualizer {
    pub fn new() -> Visualizer {
        Visualizer {
            window: init_window(),
            pixels: init_pixels(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Drains pending window events, forwarding key transitions to the
    /// interpreter's key table (which also resolves an outstanding key
    /// wait).
    pub fn poll_input(&mut self, vm: &mut VirtualMachine) {
        while let Some(event) = self.window.poll_event() {
            match event {
                Event::Closed => self.window.close(),
                Event::KeyPressed { code, .. } => {
                    if let Some(key) = pad_key(code) {
                        vm.press_key(key);
                    }
                }
                Event::KeyReleased { code, .. } => {
                    if let Some(key) = pad_key(code) {
                        vm.release_key(key);
                    }
                }
                _ => { /* do nothing */ }
            }
        }
    }

    pub fn draw_frame(&mut self, frame: &FrameBuffer) {
        self.window.clear(Color::BLACK);
        for x in 0..SCREEN_WIDTH as usize {
            for y in 0..SCREEN_HEIGHT as usize {
                if frame.get(x, y) {
                    self.window.draw(&self.pixels[x][y]);
                }
            }
        }
        self.window.display();
    }
}

fn init_window() -> RenderWindow {
    let video_mode = VideoMode::new(
        SCREEN_WIDTH as u32 * SCALE as u32,
        SCREEN_HEIGHT as u32 * SCALE as u32,
        32,
    );
    let mut window = RenderWindow::new(
        video_mode,
        "pixel8",
        Style::CLOSE,
        &ContextSettings::default(),
    );
    window.set_framerate_limit(60);
    window
}

fn init_pixels() -> [[RectangleShape<'static>; SCREEN_HEIGHT as usize]; SCREEN_WIDTH as usize] {
    let mut pixels: [[RectangleShape; SCREEN_HEIGHT as usize]; SCREEN_WIDTH as usize] =
        std::iter::repeat(
            std::iter::repeat(RectangleShape::new())
                .collect::<arrayvec::ArrayVec<_>>()
                .into_inner()
                .unwrap(),
        )
        .collect::<arrayvec::ArrayVec<_>>()
        .into_inner()
        .unwrap();
    for x in 0..SCREEN_WIDTH as usize {
        for y in 0..SCREEN_HEIGHT as usize {
            let pixel = &mut pixels[x][y];
            pixel.set_size(Vector2f::new(SCALE as f32, SCALE as f32));
            pixel.set_position(Vector2f::new((SCALE * x) as f32, (SCALE * y) as f32));
            pixel.set_fill_color(Color::WHITE);
        }
    }
    pixels
}
