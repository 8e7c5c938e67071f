//! The semantic layer: translates parser events into screen operations.
//!
//! The [`Sequencer`] accumulates parser events into a [`Sequence`], resolves
//! the finished sequence against the function registry and applies it to the
//! screen. It also owns the two stateful side-channels of that process: the
//! currently hooked DCS extension (sixel decoding, message payloads, status
//! string requests) and the synchronized-output batch queue (DEC mode 2026).

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info, trace};

use tern_parser::{Parser, ParserEvents};

use crate::color::{parse_rgb_spec, Color, DynamicColorName, RgbaColor};
use crate::functions::{self, FunctionCategory, FunctionId, FunctionSelector};
#[cfg(feature = "image-protocol")]
use crate::message::{Message, MessageParser};
use crate::modes::Mode;
use crate::screen::{
    Coordinate, CursorDisplay, CursorShape, CharsetId, CharsetTable, GraphicsRendition, PixelArea,
    Screen, Size, StatusString, TabClear, XtSmGraphicsAction, XtSmGraphicsItem, XtSmGraphicsValue,
};
#[cfg(feature = "image-protocol")]
use crate::screen::{ImageAlignment, ImageFormat, ImageResize};
use crate::sequence::Sequence;
use crate::sixel::{SixelImageBuilder, SixelPalette, SixelParser, DEFAULT_COLOR_REGISTERS};

/// Outcome of applying one resolved function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyResult {
    Ok,
    /// Recognized function, unusable parameters. No screen mutation happened.
    Invalid,
    /// Recognized function whose effect is deliberately not implemented.
    Unsupported,
}

/// Soft limit on deferred items; reaching it forces a flush that leaves the
/// batching state unchanged.
const BATCH_QUEUE_LIMIT: usize = 16384;

/// Work deferred while synchronized output is active.
#[derive(Debug, Clone)]
enum BatchItem {
    PrintChar(char),
    Seq(Sequence),
    SixelImage(Size, Vec<u8>),
}

/// Which callback a hooked message parser feeds on finalize.
#[cfg(feature = "image-protocol")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MessageRoute {
    Upload,
    Render,
    Release,
    Oneshot,
}

/// The active DCS extension between hook and unhook.
enum HookedExtension {
    Sixel(SixelParser),
    #[cfg(feature = "image-protocol")]
    Message(MessageParser, MessageRoute),
    StatusString(String),
}

/// The VT interpreter.
///
/// Feed PTY output through [`Sequencer::write`]; recognized control
/// functions are applied to the supplied [`Screen`] in input order, except
/// while synchronized output (mode 2026) defers the batchable ones.
pub struct Sequencer {
    parser: Parser,
    state: SequencerState,
}

struct SequencerState {
    sequence: Sequence,
    hooked: Option<HookedExtension>,
    batching: bool,
    batch: Vec<BatchItem>,
    instruction_counter: u64,
    sixel_palette: Rc<RefCell<SixelPalette>>,
    use_private_color_registers: bool,
    max_image_size: Size,
    max_image_register_count: usize,
    background_color: RgbaColor,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::with_config(
            Size::new(800, 600),
            RgbaColor::new(0, 0, 0, 255),
            Rc::new(RefCell::new(SixelPalette::default())),
        )
    }

    pub fn with_config(
        max_image_size: Size,
        background_color: RgbaColor,
        image_color_palette: Rc<RefCell<SixelPalette>>,
    ) -> Self {
        Self {
            parser: Parser::new(),
            state: SequencerState {
                sequence: Sequence::new(),
                hooked: None,
                batching: false,
                batch: Vec::new(),
                instruction_counter: 0,
                sixel_palette: image_color_palette,
                use_private_color_registers: false,
                max_image_size,
                max_image_register_count: DEFAULT_COLOR_REGISTERS,
                background_color,
            },
        }
    }

    /// Feed raw output bytes, applying side effects to `screen`.
    ///
    /// Partial sequences are carried over to the next call.
    pub fn write<S: Screen>(&mut self, screen: &mut S, bytes: &[u8]) {
        let Self { parser, state } = self;
        let mut performer = Performer { state, screen };
        parser.parse(bytes, &mut performer);
    }

    /// Discard any in-flight sequence and DCS extension, drop deferred work
    /// and leave batching disabled.
    pub fn reset(&mut self) {
        self.parser.reset();
        self.state.sequence.clear();
        self.state.hooked = None;
        self.state.batching = false;
        self.state.batch.clear();
    }

    /// Apply all deferred work now without changing the batching state.
    pub fn flush<S: Screen>(&mut self, screen: &mut S) {
        self.state.force_flush(screen);
    }

    pub fn is_batching(&self) -> bool {
        self.state.batching
    }

    pub fn instruction_counter(&self) -> u64 {
        self.state.instruction_counter
    }

    pub fn reset_instruction_counter(&mut self) {
        self.state.instruction_counter = 0;
    }

    pub fn set_max_image_size(&mut self, size: Size) {
        self.state.max_image_size = size;
    }

    pub fn set_max_image_color_registers(&mut self, count: usize) {
        self.state.max_image_register_count = count;
    }

    pub fn set_use_private_color_registers(&mut self, enable: bool) {
        self.state.use_private_color_registers = enable;
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

/// Borrow-split view used while one `write` call is in flight: parser events
/// arrive here and fan out to sequencer state and screen.
struct Performer<'a, S: Screen> {
    state: &'a mut SequencerState,
    screen: &'a mut S,
}

impl<S: Screen> ParserEvents for Performer<'_, S> {
    fn print(&mut self, ch: char) {
        self.state.print(self.screen, ch);
    }

    fn execute(&mut self, control: u8) {
        self.state.execute(self.screen, control);
    }

    fn clear(&mut self) {
        self.state.sequence.clear();
    }

    fn collect(&mut self, intermediate: u8) {
        self.state.sequence.collect(intermediate);
    }

    fn collect_leader(&mut self, leader: u8) {
        self.state.sequence.set_leader(leader);
    }

    fn param(&mut self, byte: u8) {
        self.state.sequence.param_byte(byte);
    }

    fn dispatch_esc(&mut self, final_byte: u8) {
        self.state.sequence.set_category(FunctionCategory::Esc);
        self.state.sequence.set_final(final_byte);
        self.state.handle_sequence(self.screen);
    }

    fn dispatch_csi(&mut self, final_byte: u8) {
        self.state.sequence.set_category(FunctionCategory::Csi);
        self.state.sequence.set_final(final_byte);
        self.state.handle_sequence(self.screen);
    }

    fn start_osc(&mut self) {
        self.state.sequence.set_category(FunctionCategory::Osc);
    }

    fn put_osc(&mut self, ch: char) {
        self.state.sequence.put_osc(ch);
    }

    fn dispatch_osc(&mut self) {
        self.state.dispatch_osc(self.screen);
    }

    fn hook(&mut self, final_byte: u8) {
        self.state.hook(final_byte);
    }

    fn put(&mut self, ch: char) {
        self.state.put(ch);
    }

    fn unhook(&mut self) {
        self.state.unhook(self.screen);
    }

    fn error(&mut self, message: &str) {
        debug!("parser error: {message}");
    }
}

impl SequencerState {
    fn print<S: Screen>(&mut self, screen: &mut S, ch: char) {
        if self.batching {
            self.enqueue(screen, BatchItem::PrintChar(ch));
        } else {
            self.instruction_counter += 1;
            screen.write_text(ch);
        }
    }

    fn execute<S: Screen>(&mut self, screen: &mut S, control: u8) {
        if self.batching {
            // route through the function table so batchable controls defer
            let mut seq = Sequence::new();
            seq.set_category(FunctionCategory::C0);
            seq.set_final(control);
            self.process_sequence(screen, seq);
            return;
        }
        self.execute_control(screen, control);
    }

    fn execute_control<S: Screen>(&mut self, screen: &mut S, control: u8) {
        match control {
            0x07 => screen.listener().bell(),
            0x08 => screen.backspace(),
            0x09 => screen.move_cursor_to_next_tab(),
            0x0A => screen.linefeed(),
            // VT and FF both behave as IND in practice
            0x0B | 0x0C => screen.index(),
            0x0D => screen.move_cursor_to_begin_of_line(),
            0x37 => screen.save_cursor(),
            0x38 => screen.restore_cursor(),
            _ => {
                debug!("unknown C0 control: 0x{control:02X}");
                return;
            }
        }
        self.instruction_counter += 1;
    }

    /// Finalize the in-flight sequence and process it.
    fn handle_sequence<S: Screen>(&mut self, screen: &mut S) {
        let seq = std::mem::take(&mut self.sequence);
        self.process_sequence(screen, seq);
    }

    fn process_sequence<S: Screen>(&mut self, screen: &mut S, seq: Sequence) {
        let func = resolve(&seq);
        let Some(id) = func else {
            info!("unknown VT sequence: {}", seq.text());
            return;
        };

        self.instruction_counter += 1;

        if id == FunctionId::Decsm && seq.contains_parameter(2026) {
            self.batching = true;
            self.apply(screen, id, &seq);
        } else if id == FunctionId::Decrm && seq.contains_parameter(2026) {
            self.batching = false;
            self.drain(screen);
            self.apply(screen, id, &seq);
        } else if self.batching && functions::is_batchable(id) {
            self.enqueue(screen, BatchItem::Seq(seq));
        } else {
            self.apply(screen, id, &seq);
        }
    }

    fn enqueue<S: Screen>(&mut self, screen: &mut S, item: BatchItem) {
        self.batch.push(item);
        if self.batch.len() >= BATCH_QUEUE_LIMIT {
            self.force_flush(screen);
        }
    }

    fn force_flush<S: Screen>(&mut self, screen: &mut S) {
        let was_batching = self.batching;
        self.batching = false;
        self.drain(screen);
        self.batching = was_batching;
    }

    /// Replay deferred work in FIFO order through the non-batching path.
    /// Callers must disable batching first.
    fn drain<S: Screen>(&mut self, screen: &mut S) {
        let items = std::mem::take(&mut self.batch);
        for item in items {
            match item {
                BatchItem::PrintChar(ch) => self.print(screen, ch),
                BatchItem::Seq(seq) => {
                    if let Some(id) = resolve(&seq) {
                        self.apply(screen, id, &seq);
                    }
                }
                BatchItem::SixelImage(size, rgba) => screen.sixel_image(size, rgba),
            }
        }
    }

    fn dispatch_osc<S: Screen>(&mut self, screen: &mut S) {
        let (code, skip) = parse_osc_prefix(self.sequence.osc_payload());
        self.sequence.strip_osc_prefix(skip);
        if code < 0 {
            // letter-leading legacy encodings are reported, never matched
            info!("unknown VT sequence: {}", self.sequence.text());
            self.sequence.clear();
            return;
        }
        self.sequence.push_parameter(code.min(u16::MAX as i32) as u16);
        self.handle_sequence(screen);
        self.sequence.clear();
    }

    fn hook(&mut self, final_byte: u8) {
        self.sequence.set_category(FunctionCategory::Dcs);
        self.sequence.set_final(final_byte);

        self.hooked = match resolve(&self.sequence) {
            Some(FunctionId::Decsixel) => Some(self.hook_sixel()),
            Some(FunctionId::Decrqss) => Some(HookedExtension::StatusString(String::new())),
            #[cfg(feature = "image-protocol")]
            Some(FunctionId::GiUpload) => {
                Some(HookedExtension::Message(MessageParser::new(), MessageRoute::Upload))
            }
            #[cfg(feature = "image-protocol")]
            Some(FunctionId::GiRender) => {
                Some(HookedExtension::Message(MessageParser::new(), MessageRoute::Render))
            }
            #[cfg(feature = "image-protocol")]
            Some(FunctionId::GiDelete) => {
                Some(HookedExtension::Message(MessageParser::new(), MessageRoute::Release))
            }
            #[cfg(feature = "image-protocol")]
            Some(FunctionId::GiOneshot) => {
                Some(HookedExtension::Message(MessageParser::new(), MessageRoute::Oneshot))
            }
            Some(_) | None => {
                info!("unknown DCS sequence: {}", self.sequence.text());
                None
            }
        };

        if self.hooked.is_some() {
            self.instruction_counter += 1;
        }
    }

    fn hook_sixel(&mut self) -> HookedExtension {
        let pa = self.sequence.param_or(0, 1);
        let pb = self.sequence.param_or(1, 2);

        let aspect_vertical = match pa {
            7..=9 => 1,
            5 | 6 => 2,
            3 | 4 => 3,
            2 => 5,
            _ => 2,
        };

        let transparent_background = pb != 1;

        let palette = if self.use_private_color_registers {
            Rc::new(RefCell::new(SixelPalette::new(self.max_image_register_count)))
        } else {
            Rc::clone(&self.sixel_palette)
        };

        let builder = SixelImageBuilder::new(
            self.max_image_size,
            aspect_vertical,
            if transparent_background {
                RgbaColor::TRANSPARENT
            } else {
                self.background_color
            },
            palette,
        );

        HookedExtension::Sixel(SixelParser::new(builder))
    }

    fn put(&mut self, ch: char) {
        match &mut self.hooked {
            Some(HookedExtension::Sixel(parser)) => parser.pass(ch),
            #[cfg(feature = "image-protocol")]
            Some(HookedExtension::Message(parser, _)) => parser.pass(ch),
            Some(HookedExtension::StatusString(data)) => {
                // valid requests are at most two bytes; anything longer can
                // only ever fail the strict match
                if data.len() < 16 {
                    data.push(ch);
                }
            }
            None => {}
        }
    }

    fn unhook<S: Screen>(&mut self, screen: &mut S) {
        match self.hooked.take() {
            Some(HookedExtension::Sixel(parser)) => {
                let (size, rgba) = parser.finalize();
                if size.width > 0 && size.height > 0 {
                    if self.batching {
                        self.enqueue(screen, BatchItem::SixelImage(size, rgba));
                    } else {
                        screen.sixel_image(size, rgba);
                    }
                }
            }
            #[cfg(feature = "image-protocol")]
            Some(HookedExtension::Message(parser, route)) => {
                self.dispatch_message(screen, route, parser.finalize());
            }
            Some(HookedExtension::StatusString(data)) => {
                match status_string_value(&data) {
                    Some(value) => screen.request_status_string(value),
                    None => trace!("invalid status string request: {data:?}"),
                }
            }
            None => {}
        }
    }

    #[cfg(feature = "image-protocol")]
    fn dispatch_message<S: Screen>(&mut self, screen: &mut S, route: MessageRoute, mut msg: Message) {
        match route {
            MessageRoute::Upload => {
                let Some(name) = msg.header("n").map(str::to_owned) else {
                    trace!("image upload without a name");
                    return;
                };
                let Some(format) = image_format(msg.header("f")) else {
                    trace!("image upload with unrecognized format");
                    return;
                };
                let width = header_number(msg.header("w"), 0);
                let height = header_number(msg.header("h"), 0);
                let valid = match format {
                    ImageFormat::Png => width == 0 && height == 0,
                    _ => width > 0 && height > 0,
                };
                if valid {
                    screen.upload_image(&name, format, Size::new(width, height), msg.take_body());
                }
            }
            MessageRoute::Render => {
                let name = msg.header("n").unwrap_or("").to_owned();
                let rows = header_number(msg.header("r"), 0);
                let cols = header_number(msg.header("c"), 0);
                let x = header_number(msg.header("x"), 0);
                let y = header_number(msg.header("y"), 0);
                let width = header_number(msg.header("w"), 0);
                let height = header_number(msg.header("h"), 0);
                let alignment = image_alignment(msg.header("a"));
                let resize = image_resize(msg.header("z"));
                let request_status = msg.header("s").is_some();
                let auto_scroll = msg.header("l").is_some();
                screen.render_image(
                    &name,
                    Size::new(cols, rows),
                    grid_coordinate(y, x),
                    Size::new(width, height),
                    alignment,
                    resize,
                    auto_scroll,
                    request_status,
                );
            }
            MessageRoute::Release => {
                if let Some(name) = msg.header("n") {
                    screen.release_image(name);
                }
            }
            MessageRoute::Oneshot => {
                let Some(format) = image_format(msg.header("f")) else {
                    trace!("image render with unrecognized format");
                    return;
                };
                let width = header_number(msg.header("w"), 0);
                let height = header_number(msg.header("h"), 0);
                let rows = header_number(msg.header("r"), 0);
                let cols = header_number(msg.header("c"), 0);
                let alignment = image_alignment(msg.header("a"));
                let resize = image_resize(msg.header("z"));
                let auto_scroll = msg.header("l").is_some();
                screen.oneshot_render(
                    format,
                    Size::new(width, height),
                    msg.take_body(),
                    Size::new(cols, rows),
                    alignment,
                    resize,
                    auto_scroll,
                );
            }
        }
    }

    /// Applies a resolved function, emitting the respective screen calls.
    fn apply<S: Screen>(&mut self, screen: &mut S, id: FunctionId, seq: &Sequence) -> ApplyResult {
        use FunctionId::*;

        let result = match id {
            // C0 (reachable when replayed out of the batch queue)
            Bel => {
                screen.listener().bell();
                ApplyResult::Ok
            }
            Bs => {
                screen.backspace();
                ApplyResult::Ok
            }
            Tab => {
                screen.move_cursor_to_next_tab();
                ApplyResult::Ok
            }
            Lf => {
                screen.linefeed();
                ApplyResult::Ok
            }
            Vt | Ff => {
                screen.index();
                ApplyResult::Ok
            }
            Cr => {
                screen.move_cursor_to_begin_of_line();
                ApplyResult::Ok
            }
            Eot | So | Si => ApplyResult::Unsupported,

            // ESC
            ScsG0Special => {
                screen.designate_charset(CharsetTable::G0, CharsetId::Special);
                ApplyResult::Ok
            }
            ScsG0UsAscii => {
                screen.designate_charset(CharsetTable::G0, CharsetId::UsAscii);
                ApplyResult::Ok
            }
            ScsG1Special => {
                screen.designate_charset(CharsetTable::G1, CharsetId::Special);
                ApplyResult::Ok
            }
            ScsG1UsAscii => {
                screen.designate_charset(CharsetTable::G1, CharsetId::UsAscii);
                ApplyResult::Ok
            }
            Decaln => {
                screen.screen_alignment_pattern();
                ApplyResult::Ok
            }
            Decbi => {
                screen.back_index();
                ApplyResult::Ok
            }
            Decfi => {
                screen.forward_index();
                ApplyResult::Ok
            }
            Deckpam => {
                screen.application_keypad_mode(true);
                ApplyResult::Ok
            }
            Deckpnm => {
                screen.application_keypad_mode(false);
                ApplyResult::Ok
            }
            Decrs => {
                screen.restore_cursor();
                ApplyResult::Ok
            }
            Decsc => {
                screen.save_cursor();
                ApplyResult::Ok
            }
            Hts => {
                screen.horizontal_tab_set();
                ApplyResult::Ok
            }
            Ind => {
                screen.index();
                ApplyResult::Ok
            }
            Nel => {
                screen.move_cursor_to_next_line(1);
                ApplyResult::Ok
            }
            Ri => {
                screen.reverse_index();
                ApplyResult::Ok
            }
            Ris => {
                screen.reset_hard();
                ApplyResult::Ok
            }
            Ss2 => {
                screen.single_shift_select(CharsetTable::G2);
                ApplyResult::Ok
            }
            Ss3 => {
                screen.single_shift_select(CharsetTable::G3);
                ApplyResult::Ok
            }

            // CSI
            AnsiSysSc => {
                screen.restore_cursor();
                ApplyResult::Ok
            }
            Cbt => {
                screen.cursor_backward_tab(seq.param_or(0, 1));
                ApplyResult::Ok
            }
            Cha => {
                screen.move_cursor_to_column(seq.param_or(0, 1));
                ApplyResult::Ok
            }
            Cht => {
                screen.cursor_forward_tab(seq.param_or(0, 1));
                ApplyResult::Ok
            }
            Cnl => {
                screen.move_cursor_to_next_line(seq.param_or(0, 1));
                ApplyResult::Ok
            }
            Cpl => {
                screen.move_cursor_to_prev_line(seq.param_or(0, 1));
                ApplyResult::Ok
            }
            Cpr => match seq.param(0) {
                5 => {
                    screen.device_status_report();
                    ApplyResult::Ok
                }
                6 => {
                    screen.report_cursor_position();
                    ApplyResult::Ok
                }
                _ => ApplyResult::Unsupported,
            },
            Cub => {
                screen.move_cursor_backward(seq.param_or(0, 1));
                ApplyResult::Ok
            }
            Cud => {
                screen.move_cursor_down(seq.param_or(0, 1));
                ApplyResult::Ok
            }
            Cuf => {
                screen.move_cursor_forward(seq.param_or(0, 1));
                ApplyResult::Ok
            }
            Cup | Hvp => {
                screen.move_cursor_to(Coordinate::new(seq.param_or(0, 1), seq.param_or(1, 1)));
                ApplyResult::Ok
            }
            Cuu => {
                screen.move_cursor_up(seq.param_or(0, 1));
                ApplyResult::Ok
            }
            Da1 => {
                screen.send_device_attributes();
                ApplyResult::Ok
            }
            Da2 => {
                screen.send_terminal_id();
                ApplyResult::Ok
            }
            Da3 => ApplyResult::Unsupported,
            Dch => {
                screen.delete_characters(seq.param_or(0, 1));
                ApplyResult::Ok
            }
            Decdc => {
                screen.delete_columns(seq.param_or(0, 1));
                ApplyResult::Ok
            }
            Decic => {
                screen.insert_columns(seq.param_or(0, 1));
                ApplyResult::Ok
            }
            Decrm => {
                for i in 0..seq.parameter_count() {
                    self.set_mode_dec(screen, seq, i, false);
                }
                ApplyResult::Ok
            }
            Decrqm => request_mode_dec(seq.param(0)),
            DecrqmAnsi => request_mode_ansi(seq.param(0)),
            Decrqpsr => match seq.param(0) {
                2 => {
                    screen.request_tab_stops();
                    ApplyResult::Ok
                }
                _ => ApplyResult::Invalid,
            },
            Decscl => ApplyResult::Unsupported,
            Decscpp => {
                let columns = seq.param_or(0, 80);
                if columns == 80 || columns == 132 {
                    screen.resize_columns(columns, false);
                    ApplyResult::Ok
                } else {
                    ApplyResult::Invalid
                }
            }
            Decscusr => match seq.param_or(0, 1) {
                0 | 1 => {
                    screen.set_cursor_style(CursorDisplay::Blink, CursorShape::Block);
                    ApplyResult::Ok
                }
                2 => {
                    screen.set_cursor_style(CursorDisplay::Steady, CursorShape::Block);
                    ApplyResult::Ok
                }
                3 => {
                    screen.set_cursor_style(CursorDisplay::Blink, CursorShape::Underscore);
                    ApplyResult::Ok
                }
                4 => {
                    screen.set_cursor_style(CursorDisplay::Steady, CursorShape::Underscore);
                    ApplyResult::Ok
                }
                5 => {
                    screen.set_cursor_style(CursorDisplay::Blink, CursorShape::Bar);
                    ApplyResult::Ok
                }
                6 => {
                    screen.set_cursor_style(CursorDisplay::Steady, CursorShape::Bar);
                    ApplyResult::Ok
                }
                _ => ApplyResult::Invalid,
            },
            Decslrm => {
                screen.set_left_right_margin(seq.param_opt(0), seq.param_opt(1));
                ApplyResult::Ok
            }
            Decsm => {
                for i in 0..seq.parameter_count() {
                    self.set_mode_dec(screen, seq, i, true);
                }
                ApplyResult::Ok
            }
            Decstbm => {
                screen.set_top_bottom_margin(seq.param_opt(0), seq.param_opt(1));
                ApplyResult::Ok
            }
            Decstr => {
                screen.reset_soft();
                ApplyResult::Ok
            }
            Decxcpr => {
                screen.report_extended_cursor_position();
                ApplyResult::Ok
            }
            Dl => {
                screen.delete_lines(seq.param_or(0, 1));
                ApplyResult::Ok
            }
            Ech => {
                screen.erase_characters(seq.param_or(0, 1));
                ApplyResult::Ok
            }
            Ed => {
                if seq.parameter_count() == 0 {
                    screen.clear_to_end_of_screen();
                } else {
                    for i in 0..seq.parameter_count() {
                        match seq.param(i) {
                            0 => screen.clear_to_end_of_screen(),
                            1 => screen.clear_to_begin_of_screen(),
                            2 => screen.clear_screen(),
                            3 => screen.clear_scrollback_buffer(),
                            _ => {}
                        }
                    }
                }
                ApplyResult::Ok
            }
            El => match seq.param(0) {
                0 => {
                    screen.clear_to_end_of_line();
                    ApplyResult::Ok
                }
                1 => {
                    screen.clear_to_begin_of_line();
                    ApplyResult::Ok
                }
                2 => {
                    screen.clear_line();
                    ApplyResult::Ok
                }
                _ => ApplyResult::Invalid,
            },
            Hpa => {
                screen.move_cursor_to_column(seq.param(0));
                ApplyResult::Ok
            }
            Hpr => {
                screen.move_cursor_forward(seq.param(0));
                ApplyResult::Ok
            }
            Ich => {
                screen.insert_characters(seq.param_or(0, 1));
                ApplyResult::Ok
            }
            Il => {
                screen.insert_lines(seq.param_or(0, 1));
                ApplyResult::Ok
            }
            Rm => {
                for i in 0..seq.parameter_count() {
                    set_mode_ansi(screen, seq, i, false);
                }
                ApplyResult::Ok
            }
            Scosc => {
                screen.save_cursor();
                ApplyResult::Ok
            }
            Sd => {
                screen.scroll_down(seq.param_or(0, 1));
                ApplyResult::Ok
            }
            SetMark => {
                screen.set_mark();
                ApplyResult::Ok
            }
            Sgr => self.apply_sgr(screen, seq),
            Sm => {
                for i in 0..seq.parameter_count() {
                    set_mode_ansi(screen, seq, i, true);
                }
                ApplyResult::Ok
            }
            Su => {
                screen.scroll_up(seq.param_or(0, 1));
                ApplyResult::Ok
            }
            Tbc => {
                if seq.parameter_count() != 1 {
                    screen.horizontal_tab_clear(TabClear::AllTabs);
                    ApplyResult::Ok
                } else {
                    match seq.param(0) {
                        0 => {
                            screen.horizontal_tab_clear(TabClear::UnderCursor);
                            ApplyResult::Ok
                        }
                        3 => {
                            screen.horizontal_tab_clear(TabClear::AllTabs);
                            ApplyResult::Ok
                        }
                        _ => ApplyResult::Invalid,
                    }
                }
            }
            Vpa => {
                screen.move_cursor_to_line(seq.param_or(0, 1));
                ApplyResult::Ok
            }
            WinManip => apply_window_manipulation(screen, seq),
            DecModeRestore => {
                let modes = collect_dec_modes(seq);
                screen.restore_modes(&modes);
                ApplyResult::Ok
            }
            DecModeSave => {
                let modes = collect_dec_modes(seq);
                screen.save_modes(&modes);
                ApplyResult::Ok
            }
            XtSmGraphics => apply_sm_graphics(screen, seq),

            // DCS prefixes resolve through `hook`, never through here.
            Decrqss | Decsixel => ApplyResult::Unsupported,
            #[cfg(feature = "image-protocol")]
            GiUpload | GiRender | GiDelete | GiOneshot => ApplyResult::Unsupported,

            // OSC
            SetTitle | SetWinTitle => {
                screen.set_window_title(seq.osc_payload());
                ApplyResult::Ok
            }
            SetIcon | SetXProp | ColorSpecial => ApplyResult::Unsupported,
            Hyperlink => apply_hyperlink(screen, seq),
            ColorFg => set_or_request_dynamic_color(screen, seq, DynamicColorName::DefaultForeground),
            ColorBg => set_or_request_dynamic_color(screen, seq, DynamicColorName::DefaultBackground),
            ColorCursor => set_or_request_dynamic_color(screen, seq, DynamicColorName::TextCursor),
            ColorMouseFg => {
                set_or_request_dynamic_color(screen, seq, DynamicColorName::MouseForeground)
            }
            ColorMouseBg => {
                set_or_request_dynamic_color(screen, seq, DynamicColorName::MouseBackground)
            }
            Clipboard => apply_clipboard(screen, seq),
            RColorFg => {
                screen.reset_dynamic_color(DynamicColorName::DefaultForeground);
                ApplyResult::Ok
            }
            RColorBg => {
                screen.reset_dynamic_color(DynamicColorName::DefaultBackground);
                ApplyResult::Ok
            }
            RColorCursor => {
                screen.reset_dynamic_color(DynamicColorName::TextCursor);
                ApplyResult::Ok
            }
            RColorMouseFg => {
                screen.reset_dynamic_color(DynamicColorName::MouseForeground);
                ApplyResult::Ok
            }
            RColorMouseBg => {
                screen.reset_dynamic_color(DynamicColorName::MouseBackground);
                ApplyResult::Ok
            }
            RColorHighlightFg => {
                screen.reset_dynamic_color(DynamicColorName::HighlightForeground);
                ApplyResult::Ok
            }
            RColorHighlightBg => {
                screen.reset_dynamic_color(DynamicColorName::HighlightBackground);
                ApplyResult::Ok
            }
            Notify => apply_notify(screen, seq),
            DumpState => {
                screen.dump_state();
                ApplyResult::Ok
            }
        };

        match result {
            ApplyResult::Invalid => trace!("invalid parameters: {}", seq.text()),
            ApplyResult::Unsupported => trace!("unsupported: {}", seq.text()),
            ApplyResult::Ok => {}
        }

        result
    }

    fn set_mode_dec<S: Screen>(
        &mut self,
        screen: &mut S,
        seq: &Sequence,
        index: usize,
        enable: bool,
    ) -> ApplyResult {
        match Mode::from_dec_code(seq.param(index)) {
            Some(mode) => {
                if mode == Mode::UsePrivateColorRegisters {
                    self.use_private_color_registers = enable;
                }
                screen.set_mode(mode, enable);
                ApplyResult::Ok
            }
            None => {
                trace!("unknown DEC mode: {}", seq.param(index));
                ApplyResult::Invalid
            }
        }
    }

    /// Walks SGR parameter groups left to right, one screen call per
    /// recognized code.
    fn apply_sgr<S: Screen>(&self, screen: &mut S, seq: &Sequence) -> ApplyResult {
        if seq.parameter_count() == 0 {
            screen.set_graphics_rendition(GraphicsRendition::Reset);
            return ApplyResult::Ok;
        }

        let mut i = 0;
        while i < seq.parameter_count() {
            match seq.param(i) {
                0 => screen.set_graphics_rendition(GraphicsRendition::Reset),
                1 => screen.set_graphics_rendition(GraphicsRendition::Bold),
                2 => screen.set_graphics_rendition(GraphicsRendition::Faint),
                3 => screen.set_graphics_rendition(GraphicsRendition::Italic),
                4 => {
                    let rendition = if seq.subparam_count(i) >= 1 {
                        match seq.subparam(i, 0) {
                            0 => GraphicsRendition::NoUnderline,
                            1 => GraphicsRendition::Underline,
                            2 => GraphicsRendition::DoublyUnderlined,
                            3 => GraphicsRendition::CurlyUnderlined,
                            4 => GraphicsRendition::DottedUnderline,
                            5 => GraphicsRendition::DashedUnderline,
                            _ => GraphicsRendition::Underline,
                        }
                    } else {
                        GraphicsRendition::Underline
                    };
                    screen.set_graphics_rendition(rendition);
                }
                5 => screen.set_graphics_rendition(GraphicsRendition::Blinking),
                7 => screen.set_graphics_rendition(GraphicsRendition::Inverse),
                8 => screen.set_graphics_rendition(GraphicsRendition::Hidden),
                9 => screen.set_graphics_rendition(GraphicsRendition::CrossedOut),
                21 => screen.set_graphics_rendition(GraphicsRendition::DoublyUnderlined),
                22 => screen.set_graphics_rendition(GraphicsRendition::Normal),
                23 => screen.set_graphics_rendition(GraphicsRendition::NoItalic),
                24 => screen.set_graphics_rendition(GraphicsRendition::NoUnderline),
                25 => screen.set_graphics_rendition(GraphicsRendition::NoBlinking),
                27 => screen.set_graphics_rendition(GraphicsRendition::NoInverse),
                28 => screen.set_graphics_rendition(GraphicsRendition::NoHidden),
                29 => screen.set_graphics_rendition(GraphicsRendition::NoCrossedOut),
                p @ 30..=37 => screen.set_foreground_color(Color::Indexed((p - 30) as u8)),
                38 => {
                    let color = parse_color_argument(seq, &mut i);
                    screen.set_foreground_color(color);
                }
                39 => screen.set_foreground_color(Color::Default),
                p @ 40..=47 => screen.set_background_color(Color::Indexed((p - 40) as u8)),
                48 => {
                    let color = parse_color_argument(seq, &mut i);
                    screen.set_background_color(color);
                }
                49 => screen.set_background_color(Color::Default),
                51 => screen.set_graphics_rendition(GraphicsRendition::Framed),
                53 => screen.set_graphics_rendition(GraphicsRendition::Overline),
                54 => screen.set_graphics_rendition(GraphicsRendition::NoFramed),
                55 => screen.set_graphics_rendition(GraphicsRendition::NoOverline),
                // used for underline colors by mintty, kitty, libvte and friends
                58 => {
                    let color = parse_color_argument(seq, &mut i);
                    screen.set_underline_color(color);
                }
                p @ 90..=97 => screen.set_foreground_color(Color::Bright((p - 90) as u8)),
                p @ 100..=107 => screen.set_background_color(Color::Bright((p - 100) as u8)),
                unknown => trace!("unknown SGR code: {unknown}"),
            }
            i += 1;
        }
        ApplyResult::Ok
    }
}

/// Resolve a sequence to its function id.
fn resolve(seq: &Sequence) -> Option<FunctionId> {
    match seq.category() {
        FunctionCategory::Osc => functions::select_osc(seq.param(0) as i32),
        category => {
            // only a single intermediate participates in resolution
            let intermediate = match seq.intermediates() {
                [single] => Some(*single),
                _ => None,
            };
            functions::select(&FunctionSelector {
                category,
                leader: seq.leader(),
                argc: seq.parameter_count(),
                intermediate,
                final_byte: seq.final_byte(),
            })
        }
    }
}

/// Splits an OSC payload into its numeric code and the offset of the first
/// data byte. Letter-leading variants (such as `L`) encode as the negated
/// character value.
fn parse_osc_prefix(payload: &str) -> (i32, usize) {
    let bytes = payload.as_bytes();
    let mut code: i32 = 0;
    let mut i = 0;

    while i < bytes.len() && bytes[i].is_ascii_digit() {
        code = code.saturating_mul(10).saturating_add((bytes[i] - b'0') as i32);
        i += 1;
    }

    if i == 0 && !bytes.is_empty() && bytes[0] != b';' {
        code = -(bytes[0] as i32);
        i += 1;
    }

    if i < bytes.len() && bytes[i] == b';' {
        i += 1;
    }

    (code, i)
}

/// Consumes the color argument after SGR 38/48/58.
///
/// Two shapes are accepted, decided by whether the SGR argument carries
/// sub-parameters:
/// - `38:2:R:G:B`, `38:2::R:G:B` or `38:5:P` - everything lives in one
///   parameter group, the walker index stays put;
/// - `38;2;R;G;B` or `38;5;P` - the following groups are consumed and `i`
///   advances to the last one used.
///
/// Out-of-range channels or indexes yield `Color::Default` with the walker
/// positioned so the outer loop resumes at the next unconsumed argument.
fn parse_color_argument(seq: &Sequence, i: &mut usize) -> Color {
    let index = *i;

    if seq.subparam_count(index) >= 1 {
        match seq.subparam(index, 0) {
            2 => {
                let n = seq.subparam_count(index);
                // some emitters leave an empty colorspace slot: 38:2::R:G:B
                let (r, g, b) = if n == 4 {
                    (
                        seq.subparam(index, 1),
                        seq.subparam(index, 2),
                        seq.subparam(index, 3),
                    )
                } else if n >= 5 {
                    (
                        seq.subparam(index, 2),
                        seq.subparam(index, 3),
                        seq.subparam(index, 4),
                    )
                } else {
                    return Color::Default;
                };
                if r <= 255 && g <= 255 && b <= 255 {
                    return Color::rgb(r as u8, g as u8, b as u8);
                }
            }
            5 => {
                if seq.subparam_count(index) >= 2 {
                    let palette_index = seq.subparam(index, 1);
                    if palette_index <= 255 {
                        return Color::Indexed(palette_index as u8);
                    }
                }
            }
            _ => {}
        }
        return Color::Default;
    }

    if index + 1 < seq.parameter_count() {
        match seq.param(index + 1) {
            5 => {
                if index + 2 < seq.parameter_count() {
                    let value = seq.param(index + 2);
                    *i = index + 2;
                    if value <= 255 {
                        return Color::Indexed(value as u8);
                    }
                } else {
                    *i = index + 1;
                }
            }
            2 => {
                if index + 4 < seq.parameter_count() {
                    let r = seq.param(index + 2);
                    let g = seq.param(index + 3);
                    let b = seq.param(index + 4);
                    *i = index + 4;
                    if r <= 255 && g <= 255 && b <= 255 {
                        return Color::rgb(r as u8, g as u8, b as u8);
                    }
                } else {
                    *i = seq.parameter_count() - 1;
                }
            }
            _ => {
                *i = index + 1;
            }
        }
    }

    Color::Default
}

fn set_mode_ansi<S: Screen>(screen: &mut S, seq: &Sequence, index: usize, enable: bool) -> ApplyResult {
    match Mode::from_ansi_code(seq.param(index)) {
        // insert mode is the only ANSI mode with an effect
        Some(Mode::Insert) => {
            screen.set_mode(Mode::Insert, enable);
            ApplyResult::Ok
        }
        // KAM, SRM and LNM translate but are deliberately without effect
        Some(_) | None => ApplyResult::Unsupported,
    }
}

fn request_mode_dec(mode: u16) -> ApplyResult {
    match mode {
        1..=8 | 18 | 19 | 25 | 34 | 35 | 36 | 42 | 57 | 60 | 61 | 64 | 66 | 67 | 68 | 69 | 73
        | 81 | 95..=104 | 106 | 2026 => ApplyResult::Unsupported,
        _ => ApplyResult::Invalid,
    }
}

fn request_mode_ansi(mode: u16) -> ApplyResult {
    match mode {
        1..=5 | 7 | 10..=20 => ApplyResult::Unsupported,
        _ => ApplyResult::Invalid,
    }
}

fn collect_dec_modes(seq: &Sequence) -> Vec<Mode> {
    (0..seq.parameter_count())
        .filter_map(|i| Mode::from_dec_code(seq.param(i)))
        .collect()
}

fn apply_window_manipulation<S: Screen>(screen: &mut S, seq: &Sequence) -> ApplyResult {
    match seq.parameter_count() {
        3 => match seq.param(0) {
            4 => {
                screen
                    .listener()
                    .resize_window(seq.param(2), seq.param(1), true);
                ApplyResult::Ok
            }
            8 => {
                screen
                    .listener()
                    .resize_window(seq.param(2), seq.param(1), false);
                ApplyResult::Ok
            }
            22 => {
                screen.save_window_title();
                ApplyResult::Ok
            }
            23 => {
                screen.restore_window_title();
                ApplyResult::Ok
            }
            _ => ApplyResult::Unsupported,
        },
        1 => match seq.param(0) {
            // resize to full display size
            4 => {
                screen.listener().resize_window(0, 0, true);
                ApplyResult::Ok
            }
            8 => {
                screen.listener().resize_window(0, 0, false);
                ApplyResult::Ok
            }
            14 => {
                screen.request_pixel_size(PixelArea::TextArea);
                ApplyResult::Ok
            }
            _ => ApplyResult::Unsupported,
        },
        _ => ApplyResult::Unsupported,
    }
}

fn apply_sm_graphics<S: Screen>(screen: &mut S, seq: &Sequence) -> ApplyResult {
    let item = match seq.param(0) {
        1 => XtSmGraphicsItem::NumberOfColorRegisters,
        2 => XtSmGraphicsItem::SixelGraphicsGeometry,
        3 => XtSmGraphicsItem::RegisGraphicsGeometry,
        _ => return ApplyResult::Invalid,
    };

    let action = match seq.param(1) {
        1 => XtSmGraphicsAction::Read,
        2 => XtSmGraphicsAction::ResetToDefault,
        3 => XtSmGraphicsAction::SetToValue,
        4 => XtSmGraphicsAction::ReadLimit,
        _ => return ApplyResult::Invalid,
    };

    let value = match action {
        XtSmGraphicsAction::SetToValue => {
            let pv = seq.param_or(2, 0) as u32;
            let pu = seq.param_or(3, 0) as u32;
            if item == XtSmGraphicsItem::NumberOfColorRegisters {
                XtSmGraphicsValue::Number(pv)
            } else {
                XtSmGraphicsValue::Size(Size::new(pv, pu))
            }
        }
        _ => XtSmGraphicsValue::None,
    };

    screen.sm_graphics(item, action, value);
    ApplyResult::Ok
}

fn apply_hyperlink<S: Screen>(screen: &mut S, seq: &Sequence) -> ApplyResult {
    let payload = seq.osc_payload();

    let Some(pos) = payload.find(';') else {
        screen.hyperlink("", "");
        return ApplyResult::Ok;
    };

    let params = &payload[..pos];
    let uri = &payload[pos + 1..];

    let id = params
        .split(':')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "id")
        .map(|(_, value)| value)
        .unwrap_or("");

    screen.hyperlink(id, uri);
    ApplyResult::Ok
}

fn apply_clipboard<S: Screen>(screen: &mut S, seq: &Sequence) -> ApplyResult {
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine;

    // setting clipboard contents is supported, reading is not
    let payload = seq.osc_payload();
    match payload.split_once(';') {
        Some(("c", data)) => match BASE64.decode(data) {
            Ok(decoded) => {
                screen.listener().copy_to_clipboard(&decoded);
                ApplyResult::Ok
            }
            Err(_) => ApplyResult::Invalid,
        },
        _ => ApplyResult::Invalid,
    }
}

fn apply_notify<S: Screen>(screen: &mut S, seq: &Sequence) -> ApplyResult {
    let payload = seq.osc_payload();
    let mut parts = payload.splitn(3, ';');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("notify"), Some(title), Some(body)) => {
            screen.notify(title, body);
            ApplyResult::Ok
        }
        _ => ApplyResult::Unsupported,
    }
}

fn set_or_request_dynamic_color<S: Screen>(
    screen: &mut S,
    seq: &Sequence,
    name: DynamicColorName,
) -> ApplyResult {
    let payload = seq.osc_payload();
    if payload == "?" {
        screen.request_dynamic_color(name);
        ApplyResult::Ok
    } else if let Some(color) = parse_rgb_spec(payload) {
        screen.set_dynamic_color(name, color);
        ApplyResult::Ok
    } else {
        ApplyResult::Invalid
    }
}

/// Strict full match of a DECRQSS data string against the requestable
/// settings.
fn status_string_value(data: &str) -> Option<StatusString> {
    match data {
        "m" => Some(StatusString::Sgr),
        "\"p" => Some(StatusString::Decscl),
        " q" => Some(StatusString::Decscusr),
        "\"q" => Some(StatusString::Decsca),
        "r" => Some(StatusString::Decstbm),
        "s" => Some(StatusString::Decslrm),
        "t" => Some(StatusString::Decslpp),
        "$|" => Some(StatusString::Decscpp),
        "*|" => Some(StatusString::Decsnls),
        _ => None,
    }
}

#[cfg(feature = "image-protocol")]
fn header_number(value: Option<&str>, default: u32) -> u32 {
    let Some(value) = value else {
        return default;
    };
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return default;
    }
    value
        .bytes()
        .fold(0u32, |acc, b| acc.saturating_mul(10).saturating_add((b - b'0') as u32))
}

#[cfg(feature = "image-protocol")]
fn image_format(value: Option<&str>) -> Option<ImageFormat> {
    match value {
        None => Some(ImageFormat::Rgb),
        Some("1") => Some(ImageFormat::Rgb),
        Some("2") => Some(ImageFormat::Rgba),
        Some("3") => Some(ImageFormat::Png),
        Some(_) => None,
    }
}

#[cfg(feature = "image-protocol")]
fn image_alignment(value: Option<&str>) -> ImageAlignment {
    match value {
        Some("1") => ImageAlignment::TopStart,
        Some("2") => ImageAlignment::TopCenter,
        Some("3") => ImageAlignment::TopEnd,
        Some("4") => ImageAlignment::MiddleStart,
        Some("5") => ImageAlignment::MiddleCenter,
        Some("6") => ImageAlignment::MiddleEnd,
        Some("7") => ImageAlignment::BottomStart,
        Some("8") => ImageAlignment::BottomCenter,
        Some("9") => ImageAlignment::BottomEnd,
        _ => ImageAlignment::MiddleCenter,
    }
}

#[cfg(feature = "image-protocol")]
fn image_resize(value: Option<&str>) -> ImageResize {
    match value {
        Some("0") => ImageResize::NoResize,
        Some("1") => ImageResize::ResizeToFit,
        Some("2") => ImageResize::ResizeToFill,
        Some("3") => ImageResize::StretchToFill,
        _ => ImageResize::NoResize,
    }
}

#[cfg(feature = "image-protocol")]
fn grid_coordinate(row: u32, column: u32) -> Coordinate {
    Coordinate::new(
        row.min(u16::MAX as u32) as u16,
        column.min(u16::MAX as u32) as u16,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_osc_prefix_numeric() {
        assert_eq!(parse_osc_prefix("8;id=x;uri"), (8, 2));
        assert_eq!(parse_osc_prefix("0;title"), (0, 2));
        assert_eq!(parse_osc_prefix("777;notify;t;b"), (777, 4));
        assert_eq!(parse_osc_prefix("112"), (112, 3));
    }

    #[test]
    fn test_parse_osc_prefix_letter() {
        let (code, skip) = parse_osc_prefix("Llabel");
        assert_eq!(code, -(b'L' as i32));
        assert_eq!(skip, 1);
    }

    #[test]
    fn test_parse_osc_prefix_empty() {
        assert_eq!(parse_osc_prefix(""), (0, 0));
        assert_eq!(parse_osc_prefix(";x"), (0, 1));
    }

    #[test]
    fn test_status_string_values() {
        assert_eq!(status_string_value("m"), Some(StatusString::Sgr));
        assert_eq!(status_string_value("\"p"), Some(StatusString::Decscl));
        assert_eq!(status_string_value(" q"), Some(StatusString::Decscusr));
        assert_eq!(status_string_value("\"q"), Some(StatusString::Decsca));
        assert_eq!(status_string_value("r"), Some(StatusString::Decstbm));
        assert_eq!(status_string_value("s"), Some(StatusString::Decslrm));
        assert_eq!(status_string_value("t"), Some(StatusString::Decslpp));
        assert_eq!(status_string_value("$|"), Some(StatusString::Decscpp));
        assert_eq!(status_string_value("*|"), Some(StatusString::Decsnls));
        // strict full match only
        assert_eq!(status_string_value(" m"), None);
        assert_eq!(status_string_value("m "), None);
        assert_eq!(status_string_value(""), None);
    }

    fn sgr_sequence(params: &[u8]) -> Sequence {
        let mut seq = Sequence::new();
        seq.set_category(FunctionCategory::Csi);
        for &b in params {
            seq.param_byte(b);
        }
        seq.set_final(b'm');
        seq
    }

    #[test]
    fn test_parse_color_argument_semicolon_rgb() {
        let seq = sgr_sequence(b"38;2;10;20;30");
        let mut i = 0;
        assert_eq!(parse_color_argument(&seq, &mut i), Color::rgb(10, 20, 30));
        assert_eq!(i, 4);
    }

    #[test]
    fn test_parse_color_argument_semicolon_indexed() {
        let seq = sgr_sequence(b"38;5;208");
        let mut i = 0;
        assert_eq!(parse_color_argument(&seq, &mut i), Color::Indexed(208));
        assert_eq!(i, 2);
    }

    #[test]
    fn test_parse_color_argument_indexed_out_of_range() {
        let seq = sgr_sequence(b"38;5;300");
        let mut i = 0;
        assert_eq!(parse_color_argument(&seq, &mut i), Color::Default);
        // walker consumed the mode and value so the outer loop resumes after
        assert_eq!(i, 2);
    }

    #[test]
    fn test_parse_color_argument_subparam_rgb() {
        let seq = sgr_sequence(b"38:2:10:20:30");
        let mut i = 0;
        assert_eq!(parse_color_argument(&seq, &mut i), Color::rgb(10, 20, 30));
        assert_eq!(i, 0);
    }

    #[test]
    fn test_parse_color_argument_subparam_rgb_empty_colorspace() {
        let seq = sgr_sequence(b"38:2::10:20:30");
        let mut i = 0;
        assert_eq!(parse_color_argument(&seq, &mut i), Color::rgb(10, 20, 30));
        assert_eq!(i, 0);
    }

    #[test]
    fn test_parse_color_argument_subparam_indexed() {
        let seq = sgr_sequence(b"38:5:123");
        let mut i = 0;
        assert_eq!(parse_color_argument(&seq, &mut i), Color::Indexed(123));
        assert_eq!(i, 0);
    }

    #[test]
    fn test_parse_color_argument_subparam_does_not_eat_followers() {
        let seq = sgr_sequence(b"38:2:1:2:3;1");
        let mut i = 0;
        assert_eq!(parse_color_argument(&seq, &mut i), Color::rgb(1, 2, 3));
        // the following group (bold) must remain for the outer walker
        assert_eq!(i, 0);
        assert_eq!(seq.param(1), 1);
    }

    #[test]
    fn test_parse_color_argument_rgb_out_of_range_totals_default() {
        let seq = sgr_sequence(b"38;2;300;0;0");
        let mut i = 0;
        assert_eq!(parse_color_argument(&seq, &mut i), Color::Default);
        assert_eq!(i, 4);
    }

    #[test]
    fn test_parse_color_argument_truncated() {
        let seq = sgr_sequence(b"38;2;1;2");
        let mut i = 0;
        assert_eq!(parse_color_argument(&seq, &mut i), Color::Default);
        assert_eq!(i, 3);
    }

    #[test]
    fn test_parse_color_argument_bare() {
        let seq = sgr_sequence(b"38");
        let mut i = 0;
        assert_eq!(parse_color_argument(&seq, &mut i), Color::Default);
        assert_eq!(i, 0);
    }

    #[test]
    fn test_request_modes() {
        assert_eq!(request_mode_dec(25), ApplyResult::Unsupported);
        assert_eq!(request_mode_dec(2026), ApplyResult::Unsupported);
        assert_eq!(request_mode_dec(12345), ApplyResult::Invalid);
        assert_eq!(request_mode_ansi(4), ApplyResult::Unsupported);
        assert_eq!(request_mode_ansi(42), ApplyResult::Invalid);
    }
}
