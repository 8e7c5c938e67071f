//! tern-vt - VT/ANSI control sequence interpreter
//!
//! Sits between a PTY byte stream and a display surface: bytes go in
//! through [`Sequencer::write`], recognized control functions come out as
//! calls on a [`Screen`] implementation. The lexical layer lives in the
//! `tern-parser` crate; this crate owns sequence accumulation, the function
//! registry, dispatch, the DCS extensions (sixel graphics, message
//! payloads, status string requests) and synchronized output (DEC mode
//! 2026).
//!
//! ```no_run
//! use tern_vt::{Screen, EventListener, Sequencer};
//!
//! struct Listener;
//! impl EventListener for Listener {}
//!
//! struct MyScreen(Listener);
//! impl Screen for MyScreen {
//!     fn listener(&mut self) -> &mut dyn EventListener {
//!         &mut self.0
//!     }
//!     fn write_text(&mut self, ch: char) {
//!         print!("{ch}");
//!     }
//! }
//!
//! let mut screen = MyScreen(Listener);
//! let mut sequencer = Sequencer::new();
//! sequencer.write(&mut screen, b"\x1b[1mhello\x1b[0m");
//! ```

pub mod color;
pub mod functions;
pub mod message;
pub mod modes;
pub mod screen;
pub mod sequence;
pub mod sequencer;
pub mod sixel;

pub use color::{parse_rgb_spec, Color, DynamicColorName, RgbColor, RgbaColor};
pub use functions::{FunctionCategory, FunctionId};
pub use message::{Message, MessageParser};
pub use modes::Mode;
pub use screen::{
    CharsetId, CharsetTable, Coordinate, CursorDisplay, CursorShape, EventListener,
    GraphicsRendition, PixelArea, Screen, Size, StatusString, TabClear, XtSmGraphicsAction,
    XtSmGraphicsItem, XtSmGraphicsValue,
};
#[cfg(feature = "image-protocol")]
pub use screen::{ImageAlignment, ImageFormat, ImageResize};
pub use sequence::Sequence;
pub use sequencer::{ApplyResult, Sequencer};
pub use sixel::{SixelImageBuilder, SixelPalette, SixelParser};
