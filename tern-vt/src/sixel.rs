//! Sixel graphics decoding.
//!
//! A sixel data stream paints columns of six vertically stacked pixels from
//! a palette of color registers. The [`SixelParser`] consumes the payload
//! codepoint by codepoint as the DCS hook receives them; the
//! [`SixelImageBuilder`] owns the growing RGBA canvas. The palette may be
//! shared with the interpreter (the VT default) or private to one image
//! (DEC mode 1070).

use std::cell::RefCell;
use std::rc::Rc;

use crate::color::{RgbColor, RgbaColor};
use crate::screen::Size;

/// Default number of color registers.
pub const DEFAULT_COLOR_REGISTERS: usize = 256;
/// Hard upper bound on registers for private palettes.
pub const MAX_COLOR_REGISTERS: usize = 4096;

/// Sixel color registers.
#[derive(Debug, Clone)]
pub struct SixelPalette {
    colors: Vec<RgbColor>,
}

impl SixelPalette {
    pub fn new(size: usize) -> Self {
        let mut colors = vec![RgbColor::default(); size.clamp(2, MAX_COLOR_REGISTERS)];
        // register 0 paints white on terminals that never define it
        colors[0] = RgbColor::new(255, 255, 255);
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, register: usize) -> RgbColor {
        self.colors.get(register).copied().unwrap_or_default()
    }

    pub fn set(&mut self, register: usize, color: RgbColor) {
        if let Some(slot) = self.colors.get_mut(register) {
            *slot = color;
        }
    }
}

impl Default for SixelPalette {
    fn default() -> Self {
        Self::new(DEFAULT_COLOR_REGISTERS)
    }
}

/// Accumulates decoded sixel bands into an RGBA canvas.
#[derive(Debug, Clone)]
pub struct SixelImageBuilder {
    max_size: Size,
    aspect_vertical: u32,
    background: RgbaColor,
    palette: Rc<RefCell<SixelPalette>>,
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    used_width: u32,
    used_height: u32,
    raster: Option<Size>,
    cursor_x: u32,
    band: u32,
    register: usize,
}

impl SixelImageBuilder {
    pub fn new(
        max_size: Size,
        aspect_vertical: u32,
        background: RgbaColor,
        palette: Rc<RefCell<SixelPalette>>,
    ) -> Self {
        Self {
            max_size,
            aspect_vertical: aspect_vertical.max(1),
            background,
            palette,
            pixels: Vec::new(),
            width: 0,
            height: 0,
            used_width: 0,
            used_height: 0,
            raster: None,
            cursor_x: 0,
            band: 0,
            register: 0,
        }
    }

    /// Raster attributes: declared image dimensions. Pre-sizes the canvas
    /// and fills it with the background.
    pub fn set_raster(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let width = width.min(self.max_size.width);
        let height = height.min(self.max_size.height);
        let size = Size::new(width, height);
        self.raster = Some(size);
        self.grow(width, height);
    }

    /// Select the active color register.
    pub fn use_register(&mut self, register: usize) {
        self.register = register;
    }

    /// Define a color register and make it active.
    pub fn define_register(&mut self, register: usize, color: RgbColor) {
        self.palette.borrow_mut().set(register, color);
        self.register = register;
    }

    /// Paint one sixel column (`value` is the data byte minus 0x3F).
    pub fn sixel(&mut self, value: u8) {
        if self.cursor_x >= self.max_size.width {
            return;
        }
        let color = self.palette.borrow().get(self.register);
        let base_y = self.band * 6 * self.aspect_vertical;
        for bit in 0..6u32 {
            if value & (1 << bit) != 0 {
                for rep in 0..self.aspect_vertical {
                    let y = base_y + (bit * self.aspect_vertical) + rep;
                    self.put_pixel(self.cursor_x, y, color);
                }
            }
        }
        self.cursor_x += 1;
        self.used_width = self.used_width.max(self.cursor_x);
    }

    /// Paint the same sixel column `count` times.
    pub fn repeat(&mut self, count: u32, value: u8) {
        for _ in 0..count.min(self.max_size.width) {
            self.sixel(value);
        }
    }

    /// `$` - return to the left edge of the current band.
    pub fn carriage_return(&mut self) {
        self.cursor_x = 0;
    }

    /// `-` - move to the next sixel band.
    pub fn next_line(&mut self) {
        self.cursor_x = 0;
        self.band += 1;
    }

    /// Dimensions the finished image will have.
    pub fn size(&self) -> Size {
        match self.raster {
            Some(raster) => Size::new(
                raster.width.max(self.used_width),
                raster.height.max(self.used_height),
            ),
            None => Size::new(self.used_width, self.used_height),
        }
    }

    /// Finish decoding; yields the final size and the RGBA buffer.
    pub fn finish(mut self) -> (Size, Vec<u8>) {
        let size = self.size();
        self.pixels
            .resize((size.width * size.height * 4) as usize, 0);
        if size.width != self.width && self.width != 0 {
            // canvas stride differs from final width; repack rows
            let mut packed = vec![0u8; (size.width * size.height * 4) as usize];
            let copy_width = self.width.min(size.width);
            for row in 0..self.height.min(size.height) {
                let src = (row * self.width * 4) as usize;
                let dst = (row * size.width * 4) as usize;
                packed[dst..dst + (copy_width * 4) as usize]
                    .copy_from_slice(&self.pixels[src..src + (copy_width * 4) as usize]);
            }
            return (size, packed);
        }
        (size, self.pixels)
    }

    fn put_pixel(&mut self, x: u32, y: u32, color: RgbColor) {
        if x >= self.max_size.width || y >= self.max_size.height {
            return;
        }
        if x >= self.width || y >= self.height {
            self.grow(
                self.width.max(x + 1).min(self.max_size.width),
                self.height.max(y + 1).min(self.max_size.height),
            );
        }
        let idx = ((y * self.width + x) * 4) as usize;
        self.pixels[idx] = color.r;
        self.pixels[idx + 1] = color.g;
        self.pixels[idx + 2] = color.b;
        self.pixels[idx + 3] = 255;
        self.used_height = self.used_height.max(y + 1);
        self.used_width = self.used_width.max(x + 1);
    }

    fn grow(&mut self, new_width: u32, new_height: u32) {
        if new_width <= self.width && new_height <= self.height {
            return;
        }
        let new_width = new_width.max(self.width);
        let new_height = new_height.max(self.height);
        let mut grown = Vec::with_capacity((new_width * new_height * 4) as usize);
        for _ in 0..new_width * new_height {
            grown.push(self.background.r);
            grown.push(self.background.g);
            grown.push(self.background.b);
            grown.push(self.background.a);
        }
        for row in 0..self.height {
            let src = (row * self.width * 4) as usize;
            let dst = (row * new_width * 4) as usize;
            let len = (self.width * 4) as usize;
            grown[dst..dst + len].copy_from_slice(&self.pixels[src..src + len]);
        }
        self.pixels = grown;
        self.width = new_width;
        self.height = new_height;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    Ground,
    RasterAttributes,
    ColorIntroducer,
    RepeatIntroducer,
}

/// Streaming decoder for the sixel payload of a DECSIXEL device control
/// string.
#[derive(Debug, Clone)]
pub struct SixelParser {
    builder: SixelImageBuilder,
    state: ParseState,
    params: Vec<u32>,
    current: u32,
    has_current: bool,
}

impl SixelParser {
    pub fn new(builder: SixelImageBuilder) -> Self {
        Self {
            builder,
            state: ParseState::Ground,
            params: Vec::new(),
            current: 0,
            has_current: false,
        }
    }

    /// Feed one payload codepoint.
    pub fn pass(&mut self, ch: char) {
        match self.state {
            ParseState::Ground => self.pass_ground(ch),
            ParseState::RasterAttributes
            | ParseState::ColorIntroducer
            | ParseState::RepeatIntroducer => match ch {
                '0'..='9' => {
                    self.has_current = true;
                    self.current = self
                        .current
                        .saturating_mul(10)
                        .saturating_add(ch as u32 - '0' as u32);
                }
                ';' => self.push_param(),
                _ => {
                    self.push_param();
                    let state = self.state;
                    self.state = ParseState::Ground;
                    match state {
                        ParseState::RasterAttributes => {
                            self.apply_raster();
                            self.pass_ground(ch);
                        }
                        ParseState::ColorIntroducer => {
                            self.apply_color();
                            self.pass_ground(ch);
                        }
                        ParseState::RepeatIntroducer => {
                            let count = self.params.first().copied().unwrap_or(1);
                            self.params.clear();
                            if ('\u{3F}'..='\u{7E}').contains(&ch) {
                                self.builder.repeat(count, ch as u8 - 0x3F);
                            } else {
                                self.pass_ground(ch);
                            }
                        }
                        ParseState::Ground => unreachable!(),
                    }
                }
            },
        }
    }

    /// Finish decoding; yields size and RGBA pixel buffer.
    pub fn finalize(mut self) -> (Size, Vec<u8>) {
        // close any introducer still collecting parameters
        self.push_param();
        match self.state {
            ParseState::RasterAttributes => self.apply_raster(),
            ParseState::ColorIntroducer => self.apply_color(),
            _ => {}
        }
        self.builder.finish()
    }

    fn pass_ground(&mut self, ch: char) {
        match ch {
            '"' => self.enter(ParseState::RasterAttributes),
            '#' => self.enter(ParseState::ColorIntroducer),
            '!' => self.enter(ParseState::RepeatIntroducer),
            '$' => self.builder.carriage_return(),
            '-' => self.builder.next_line(),
            '\u{3F}'..='\u{7E}' => self.builder.sixel(ch as u8 - 0x3F),
            _ => {}
        }
    }

    fn enter(&mut self, state: ParseState) {
        self.state = state;
        self.params.clear();
        self.current = 0;
        self.has_current = false;
    }

    fn push_param(&mut self) {
        if self.has_current || !self.params.is_empty() {
            self.params.push(self.current);
        }
        self.current = 0;
        self.has_current = false;
    }

    /// `" Pan ; Pad ; Ph ; Pv` - only the declared dimensions matter here;
    /// the pixel aspect ratio was already fixed by the DCS parameters.
    fn apply_raster(&mut self) {
        let ph = self.params.get(2).copied().unwrap_or(0);
        let pv = self.params.get(3).copied().unwrap_or(0);
        self.params.clear();
        if ph > 0 && pv > 0 {
            self.builder.set_raster(ph, pv);
        }
    }

    /// `# Pc` selects a register; `# Pc ; Pu ; Px ; Py ; Pz` defines and
    /// selects it. Pu 2 is RGB with 0..100 channels, Pu 1 is HLS.
    fn apply_color(&mut self) {
        if self.params.is_empty() {
            return;
        }
        let register = self.params[0] as usize;
        if self.params.len() >= 5 {
            let system = self.params[1];
            let (c1, c2, c3) = (self.params[2], self.params[3], self.params[4]);
            match system {
                2 => {
                    let scale = |v: u32| (v.min(100) * 255 / 100) as u8;
                    self.builder
                        .define_register(register, RgbColor::new(scale(c1), scale(c2), scale(c3)));
                }
                1 => {
                    let (r, g, b) = hls_to_rgb(c1, c2, c3);
                    self.builder.define_register(register, RgbColor::new(r, g, b));
                }
                _ => {}
            }
        } else {
            self.builder.use_register(register);
        }
        self.params.clear();
    }
}

fn hls_to_rgb(h: u32, l: u32, s: u32) -> (u8, u8, u8) {
    let h = (h % 360) as f64;
    let l = (l.min(100) as f64) / 100.0;
    let s = (s.min(100) as f64) / 100.0;

    if s == 0.0 {
        let v = (l * 255.0) as u8;
        return (v, v, v);
    }

    let m2 = if l <= 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let m1 = 2.0 * l - m2;

    let r = hue_to_rgb(m1, m2, h + 120.0);
    let g = hue_to_rgb(m1, m2, h);
    let b = hue_to_rgb(m1, m2, h - 120.0);

    ((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}

fn hue_to_rgb(m1: f64, m2: f64, mut h: f64) -> f64 {
    if h < 0.0 {
        h += 360.0;
    }
    if h > 360.0 {
        h -= 360.0;
    }

    if h < 60.0 {
        m1 + (m2 - m1) * h / 60.0
    } else if h < 180.0 {
        m2
    } else if h < 240.0 {
        m1 + (m2 - m1) * (240.0 - h) / 60.0
    } else {
        m1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> SixelParser {
        let palette = Rc::new(RefCell::new(SixelPalette::default()));
        let builder = SixelImageBuilder::new(
            Size::new(800, 600),
            1,
            RgbaColor::TRANSPARENT,
            palette,
        );
        SixelParser::new(builder)
    }

    fn decode(data: &str) -> (Size, Vec<u8>) {
        let mut p = parser();
        for ch in data.chars() {
            p.pass(ch);
        }
        p.finalize()
    }

    #[test]
    fn test_empty_payload() {
        let (size, _) = decode("");
        assert_eq!(size, Size::new(0, 0));
    }

    #[test]
    fn test_single_column() {
        // '~' - 0x3F = 0b111111: all six pixels set
        let (size, pixels) = decode("#0;2;100;0;0~");
        assert_eq!(size.width, 1);
        assert_eq!(size.height, 6);
        // first pixel red, opaque
        assert_eq!(&pixels[0..4], &[255, 0, 0, 255]);
        // last pixel of the column as well
        let idx = (5 * size.width * 4) as usize;
        assert_eq!(&pixels[idx..idx + 4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_repeat() {
        let (size, _) = decode("#0;2;0;100;0!5~");
        assert_eq!(size.width, 5);
        assert_eq!(size.height, 6);
    }

    #[test]
    fn test_bands() {
        let (size, _) = decode("~-~");
        assert_eq!(size.width, 1);
        assert_eq!(size.height, 12);
    }

    #[test]
    fn test_carriage_return_overpaints() {
        // '$' returns to column zero within the same band
        let (size, pixels) = decode("#0;2;100;100;100x$w");
        assert_eq!(size.width, 1);
        assert_eq!(size.height, 6);
        assert_eq!(pixels.len(), 24);
    }

    #[test]
    fn test_raster_attributes_presize() {
        let (size, pixels) = decode("\"1;1;4;12");
        assert_eq!(size, Size::new(4, 12));
        assert_eq!(pixels.len(), 4 * 12 * 4);
    }

    #[test]
    fn test_raster_background_fill_opaque() {
        let palette = Rc::new(RefCell::new(SixelPalette::default()));
        let builder = SixelImageBuilder::new(
            Size::new(800, 600),
            1,
            RgbaColor::new(10, 20, 30, 255),
            palette,
        );
        let mut p = SixelParser::new(builder);
        for ch in "\"1;1;2;6".chars() {
            p.pass(ch);
        }
        let (_, pixels) = p.finalize();
        assert_eq!(&pixels[0..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn test_color_definition_updates_palette() {
        let palette = Rc::new(RefCell::new(SixelPalette::default()));
        let builder = SixelImageBuilder::new(
            Size::new(800, 600),
            1,
            RgbaColor::TRANSPARENT,
            Rc::clone(&palette),
        );
        let mut p = SixelParser::new(builder);
        for ch in "#7;2;100;0;100~".chars() {
            p.pass(ch);
        }
        p.finalize();
        assert_eq!(palette.borrow().get(7), RgbColor::new(255, 0, 255));
    }

    #[test]
    fn test_hls_color() {
        // hue 120 (red in the VT coordinate system), half lightness, full sat
        let (r, g, b) = hls_to_rgb(120, 50, 100);
        assert!(r > 200);
        assert!(g < 50);
        assert!(b < 50);
    }

    #[test]
    fn test_vertical_aspect() {
        let palette = Rc::new(RefCell::new(SixelPalette::default()));
        let builder =
            SixelImageBuilder::new(Size::new(800, 600), 2, RgbaColor::TRANSPARENT, palette);
        let mut p = SixelParser::new(builder);
        p.pass('~');
        let (size, _) = p.finalize();
        assert_eq!(size.height, 12);
    }

    #[test]
    fn test_max_size_clamps() {
        let palette = Rc::new(RefCell::new(SixelPalette::default()));
        let builder =
            SixelImageBuilder::new(Size::new(4, 6), 1, RgbaColor::TRANSPARENT, palette);
        let mut p = SixelParser::new(builder);
        for ch in "!100~".chars() {
            p.pass(ch);
        }
        let (size, _) = p.finalize();
        assert_eq!(size.width, 4);
    }

    #[test]
    fn test_garbage_ignored() {
        let (size, _) = decode("\u{1}\u{2}\u{a0}~");
        // bytes outside the sixel alphabet are skipped, data still lands
        assert_eq!(size.width, 1);
        assert_eq!(size.height, 6);
    }
}
