use super::basics::{SCREEN_HEIGHT, SCREEN_WIDTH};
use super::machine::FrameBuffer;

/// Renders the framebuffer as rows of `@`/space characters, one line per
/// display row. Handy for terminal inspection and for asserting whole
/// screens in tests.
pub fn render(frame: &FrameBuffer) -> String {
    let mut out = String::with_capacity((SCREEN_WIDTH as usize + 1) * SCREEN_HEIGHT as usize);
    for y in 0..SCREEN_HEIGHT as usize {
        for x in 0..SCREEN_WIDTH as usize {
            out.push(if frame.get(x, y) { '@' } else { ' ' });
        }
        out.push('\n');
    }
    out
}
