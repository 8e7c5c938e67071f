//! The display surface contract.
//!
//! The sequencer drives everything it recognizes through [`Screen`]. The
//! grid, scrollback, rendering and reply transport live on the other side of
//! this trait; the interpreter holds no owning reference to any of it.
//!
//! Side effects destined for the embedding application rather than the
//! display (bell, clipboard, window resize) go through the screen's
//! [`EventListener`] sub-surface.

use serde::{Deserialize, Serialize};

use crate::color::{Color, DynamicColorName, RgbColor};
use crate::modes::Mode;

/// Width/height pair, in pixels or grid cells depending on context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// One-based grid position, as used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: u16,
    pub column: u16,
}

impl Coordinate {
    pub const fn new(row: u16, column: u16) -> Self {
        Self { row, column }
    }
}

/// Text attribute changes selected by SGR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GraphicsRendition {
    /// Reset style and colors
    Reset,
    Bold,
    Faint,
    Italic,
    Underline,
    Blinking,
    Inverse,
    Hidden,
    CrossedOut,
    DoublyUnderlined,
    CurlyUnderlined,
    DottedUnderline,
    DashedUnderline,
    /// Neither bold nor faint
    Normal,
    NoItalic,
    NoUnderline,
    NoBlinking,
    NoInverse,
    NoHidden,
    NoCrossedOut,
    Framed,
    Overline,
    NoFramed,
    NoOverline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CursorDisplay {
    Steady,
    Blink,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CursorShape {
    Block,
    Rectangle,
    Underscore,
    Bar,
}

/// Charset slot designated by SCS or selected by a single shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharsetTable {
    G0,
    G1,
    G2,
    G3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharsetId {
    /// DEC Special Character and Line Drawing Set
    Special,
    UsAscii,
}

/// Settings requestable via DECRQSS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusString {
    Sgr,
    Decscl,
    Decscusr,
    Decsca,
    Decstbm,
    Decslrm,
    Decslpp,
    Decscpp,
    Decsnls,
}

/// TBC - which tab stops to clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabClear {
    AllTabs,
    UnderCursor,
}

/// Area whose pixel size is being requested (CSI 14 t family).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelArea {
    CellArea,
    TextArea,
    WindowArea,
}

/// XTSMGRAPHICS item selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XtSmGraphicsItem {
    NumberOfColorRegisters,
    SixelGraphicsGeometry,
    RegisGraphicsGeometry,
}

/// XTSMGRAPHICS action selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XtSmGraphicsAction {
    Read,
    ResetToDefault,
    SetToValue,
    ReadLimit,
}

/// XTSMGRAPHICS value operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XtSmGraphicsValue {
    None,
    Number(u32),
    Size(Size),
}

/// Pixel format of an uploaded image.
#[cfg(feature = "image-protocol")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    Rgb,
    Rgba,
    Png,
}

/// Placement within the target cell area, a row-major 3x3 grid.
#[cfg(feature = "image-protocol")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageAlignment {
    TopStart,
    TopCenter,
    TopEnd,
    MiddleStart,
    MiddleCenter,
    MiddleEnd,
    BottomStart,
    BottomCenter,
    BottomEnd,
}

/// How an image is scaled into its target cell area.
#[cfg(feature = "image-protocol")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageResize {
    NoResize,
    ResizeToFit,
    ResizeToFill,
    StretchToFill,
}

/// Side effects destined for the embedding application.
pub trait EventListener {
    fn bell(&mut self) {}
    fn copy_to_clipboard(&mut self, _data: &[u8]) {}
    /// Resize request; `(0, 0)` means "to full display size".
    fn resize_window(&mut self, _width: u16, _height: u16, _in_pixels: bool) {}
}

/// The operations the interpreter requires from its display surface.
///
/// Every method has an empty default implementation; implementors override
/// what they support. Reports (`report_*`, `send_*`, `request_*`) are
/// expected to emit their reply bytes through whatever channel the
/// implementor owns.
pub trait Screen {
    /// The embedder-facing sub-surface.
    fn listener(&mut self) -> &mut dyn EventListener;

    // text
    fn write_text(&mut self, _ch: char) {}

    // cursor movement
    fn move_cursor_up(&mut self, _n: u16) {}
    fn move_cursor_down(&mut self, _n: u16) {}
    fn move_cursor_forward(&mut self, _n: u16) {}
    fn move_cursor_backward(&mut self, _n: u16) {}
    fn move_cursor_to(&mut self, _position: Coordinate) {}
    fn move_cursor_to_column(&mut self, _column: u16) {}
    fn move_cursor_to_line(&mut self, _line: u16) {}
    fn move_cursor_to_next_line(&mut self, _n: u16) {}
    fn move_cursor_to_prev_line(&mut self, _n: u16) {}
    fn move_cursor_to_begin_of_line(&mut self) {}
    fn move_cursor_to_next_tab(&mut self) {}
    fn cursor_forward_tab(&mut self, _count: u16) {}
    fn cursor_backward_tab(&mut self, _count: u16) {}
    fn backspace(&mut self) {}
    fn linefeed(&mut self) {}
    fn index(&mut self) {}
    fn reverse_index(&mut self) {}
    fn back_index(&mut self) {}
    fn forward_index(&mut self) {}
    fn save_cursor(&mut self) {}
    fn restore_cursor(&mut self) {}

    // modes
    fn set_mode(&mut self, _mode: Mode, _enable: bool) {}
    fn save_modes(&mut self, _modes: &[Mode]) {}
    fn restore_modes(&mut self, _modes: &[Mode]) {}

    // attributes and colors
    fn set_graphics_rendition(&mut self, _rendition: GraphicsRendition) {}
    fn set_foreground_color(&mut self, _color: Color) {}
    fn set_background_color(&mut self, _color: Color) {}
    fn set_underline_color(&mut self, _color: Color) {}
    fn set_cursor_style(&mut self, _display: CursorDisplay, _shape: CursorShape) {}

    // erase
    fn clear_to_end_of_screen(&mut self) {}
    fn clear_to_begin_of_screen(&mut self) {}
    fn clear_screen(&mut self) {}
    fn clear_scrollback_buffer(&mut self) {}
    fn clear_to_end_of_line(&mut self) {}
    fn clear_to_begin_of_line(&mut self) {}
    fn clear_line(&mut self) {}

    // insert / delete / erase cells
    fn insert_characters(&mut self, _n: u16) {}
    fn delete_characters(&mut self, _n: u16) {}
    fn erase_characters(&mut self, _n: u16) {}
    fn insert_lines(&mut self, _n: u16) {}
    fn delete_lines(&mut self, _n: u16) {}
    fn insert_columns(&mut self, _n: u16) {}
    fn delete_columns(&mut self, _n: u16) {}

    // margins and scrolling
    fn set_top_bottom_margin(&mut self, _top: Option<u16>, _bottom: Option<u16>) {}
    fn set_left_right_margin(&mut self, _left: Option<u16>, _right: Option<u16>) {}
    fn scroll_up(&mut self, _n: u16) {}
    fn scroll_down(&mut self, _n: u16) {}

    // window
    fn set_window_title(&mut self, _title: &str) {}
    fn save_window_title(&mut self) {}
    fn restore_window_title(&mut self) {}
    fn resize_columns(&mut self, _count: u16, _clear: bool) {}

    // reports
    fn device_status_report(&mut self) {}
    fn report_cursor_position(&mut self) {}
    fn report_extended_cursor_position(&mut self) {}
    fn send_device_attributes(&mut self) {}
    fn send_terminal_id(&mut self) {}
    fn request_pixel_size(&mut self, _area: PixelArea) {}
    fn request_status_string(&mut self, _value: StatusString) {}
    fn request_tab_stops(&mut self) {}

    // dynamic colors
    fn request_dynamic_color(&mut self, _name: DynamicColorName) {}
    fn set_dynamic_color(&mut self, _name: DynamicColorName, _color: RgbColor) {}
    fn reset_dynamic_color(&mut self, _name: DynamicColorName) {}

    // hyperlinks and notifications
    fn hyperlink(&mut self, _id: &str, _uri: &str) {}
    fn notify(&mut self, _title: &str, _body: &str) {}

    // charsets
    fn designate_charset(&mut self, _table: CharsetTable, _charset: CharsetId) {}
    fn single_shift_select(&mut self, _table: CharsetTable) {}

    // tabs
    fn horizontal_tab_set(&mut self) {}
    fn horizontal_tab_clear(&mut self, _which: TabClear) {}

    // graphics
    fn sm_graphics(
        &mut self,
        _item: XtSmGraphicsItem,
        _action: XtSmGraphicsAction,
        _value: XtSmGraphicsValue,
    ) {
    }
    fn sixel_image(&mut self, _size: Size, _rgba: Vec<u8>) {}

    #[cfg(feature = "image-protocol")]
    fn upload_image(&mut self, _name: &str, _format: ImageFormat, _size: Size, _data: Vec<u8>) {}
    #[cfg(feature = "image-protocol")]
    #[allow(clippy::too_many_arguments)]
    fn render_image(
        &mut self,
        _name: &str,
        _extent: Size,
        _offset: Coordinate,
        _size: Size,
        _alignment: ImageAlignment,
        _resize: ImageResize,
        _auto_scroll: bool,
        _request_status: bool,
    ) {
    }
    #[cfg(feature = "image-protocol")]
    fn release_image(&mut self, _name: &str) {}
    #[cfg(feature = "image-protocol")]
    #[allow(clippy::too_many_arguments)]
    fn oneshot_render(
        &mut self,
        _format: ImageFormat,
        _size: Size,
        _data: Vec<u8>,
        _extent: Size,
        _alignment: ImageAlignment,
        _resize: ImageResize,
        _auto_scroll: bool,
    ) {
    }

    // resets and misc
    fn reset_hard(&mut self) {}
    fn reset_soft(&mut self) {}
    fn screen_alignment_pattern(&mut self) {}
    fn application_keypad_mode(&mut self, _enable: bool) {}
    fn set_mark(&mut self) {}
    fn dump_state(&mut self) {}
}
