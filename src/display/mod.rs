//! Status lines on a screen.
//!
//! The control loops report a couple of short text lines every tick through
//! [`StatusDisplay`]. Showing them is best-effort: a display that fails to
//! draw is ignored, never retried and never reported.
//!
//! [`TextStatus`] renders the lines with
//! [`embedded-graphics`](https://crates.io/crates/embedded-graphics) onto any
//! [`DrawTarget`], which covers the V5 Brain screen (see `hardware`) as well
//! as simulator and test canvases.
//!
//! Screens that pay per call, like the Brain, should fill rectangles in one
//! go and feed pixels through [`spans`], so a line change costs one clear plus
//! a handful of glyph runs rather than one call per pixel.

use embedded_graphics::{
    mono_font::{MonoTextStyle, ascii::FONT_6X10},
    pixelcolor::Rgb888,
    prelude::*,
    primitives::Rectangle,
    text::{Baseline, Text},
};

/// Height of one status line in pixels.
pub const LINE_HEIGHT: u32 = 12;

/// Number of status lines a [`TextStatus`] keeps track of.
pub const LINES: usize = 4;

/// Somewhere to put short status text.
pub trait StatusDisplay {
    /// Replaces line `line` with `text`. Out-of-range lines are ignored.
    fn show(&mut self, line: u8, text: &str);
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDisplay;

impl StatusDisplay for NullDisplay {
    fn show(&mut self, _line: u8, _text: &str) {}
}

/// Monospace status lines drawn onto an `embedded-graphics` target.
///
/// A line is only redrawn when its text changes, so calling
/// [`show`](StatusDisplay::show) every tick costs nothing while the robot's
/// state is steady.
pub struct TextStatus<D> {
    target: D,
    shown:  [String; LINES],
}

impl<D: DrawTarget<Color = Rgb888>> TextStatus<D> {
    pub fn new(target: D) -> Self {
        Self {
            target,
            shown: Default::default(),
        }
    }

    pub fn target(&self) -> &D { &self.target }

    pub fn into_inner(self) -> D { self.target }

    fn draw(&mut self, line: u8, text: &str) -> Result<(), D::Error> {
        let top = i32::from(line) * LINE_HEIGHT as i32;
        let width = self.target.bounding_box().size.width;

        self.target.fill_solid(
            &Rectangle::new(Point::new(0, top), Size::new(width, LINE_HEIGHT)),
            Rgb888::BLACK,
        )?;
        Text::with_baseline(
            text,
            Point::new(2, top + 1),
            MonoTextStyle::new(&FONT_6X10, Rgb888::WHITE),
            Baseline::Top,
        )
        .draw(&mut self.target)?;
        Ok(())
    }
}

impl<D: DrawTarget<Color = Rgb888>> StatusDisplay for TextStatus<D> {
    fn show(&mut self, line: u8, text: &str) {
        let index = usize::from(line);
        if index >= LINES || self.shown[index] == text {
            return;
        }
        if self.draw(line, text).is_ok() {
            self.shown[index] = text.to_owned();
        }
    }
}

/// Merges a pixel stream into one-pixel-high runs of a single color.
///
/// Neighbouring pixels on the same row with the same color become one
/// [`Rectangle`]. Order is kept, so later runs still paint over earlier ones.
pub fn spans<I>(pixels: I) -> Spans<I::IntoIter>
where
    I: IntoIterator<Item = Pixel<Rgb888>>,
{
    Spans {
        pixels:  pixels.into_iter(),
        pending: None,
    }
}

/// Iterator returned by [`spans`].
pub struct Spans<I> {
    pixels:  I,
    pending: Option<Pixel<Rgb888>>,
}

impl<I: Iterator<Item = Pixel<Rgb888>>> Iterator for Spans<I> {
    type Item = (Rectangle, Rgb888);

    fn next(&mut self) -> Option<Self::Item> {
        let Pixel(start, color) = self.pending.take().or_else(|| self.pixels.next())?;
        let mut width = 1;
        for pixel in self.pixels.by_ref() {
            let Pixel(point, next) = pixel;
            if next == color && point.y == start.y && point.x == start.x + width as i32 {
                width += 1;
            } else {
                self.pending = Some(pixel);
                break;
            }
        }
        Some((Rectangle::new(start, Size::new(width, 1)), color))
    }
}
