//! Escape sequence state machine.
//!
//! Implements the DEC ANSI-compatible parser model
//! (https://vt100.net/emu/dec_ansi_parser) over a stream of UTF-8 decoded
//! codepoints. Structure is reported through [`ParserEvents`]; no semantic
//! interpretation happens here.
//!
//! Deviations from the classic byte-oriented model:
//! - input is decoded to codepoints first, so printable text as well as OSC
//!   and DCS payloads arrive as `char`s;
//! - hook/unhook and OSC start/end are modeled as state entry/exit actions,
//!   which makes CAN, SUB, ESC and ST terminate control strings uniformly.

use crate::events::ParserEvents;
use crate::utf8::{Utf8Decoder, Utf8Result};

/// Parser state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Default state, consuming printable text and C0 controls
    Ground,
    /// After ESC
    Escape,
    /// Collecting intermediates of an escape sequence
    EscapeIntermediate,
    /// After CSI
    CsiEntry,
    /// Collecting CSI parameter bytes
    CsiParam,
    /// Collecting CSI intermediate bytes
    CsiIntermediate,
    /// Malformed CSI, consuming until the final byte
    CsiIgnore,
    /// Collecting an OSC payload
    OscString,
    /// After DCS
    DcsEntry,
    /// Collecting DCS parameter bytes
    DcsParam,
    /// Collecting DCS intermediate bytes
    DcsIntermediate,
    /// Streaming a DCS data string to the hooked handler
    DcsPassthrough,
    /// Malformed DCS, consuming until ST
    DcsIgnore,
    /// SOS, PM or APC control string (consumed, never dispatched)
    SosPmApcString,
}

/// The escape sequence parser.
///
/// Feed bytes with [`Parser::parse`]; structure is reported to the supplied
/// [`ParserEvents`] listener. The parser is streaming: chunk boundaries may
/// fall anywhere, including inside a UTF-8 sequence.
#[derive(Debug, Clone)]
pub struct Parser {
    state: State,
    utf8: Utf8Decoder,
}

impl Parser {
    pub fn new() -> Self {
        Self {
            state: State::Ground,
            utf8: Utf8Decoder::new(),
        }
    }

    /// Current parser state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Drop all lexer state and return to ground.
    pub fn reset(&mut self) {
        self.state = State::Ground;
        self.utf8.reset();
    }

    /// Feed a chunk of bytes, reporting structure to `events`.
    pub fn parse<E: ParserEvents>(&mut self, bytes: &[u8], events: &mut E) {
        for &byte in bytes {
            match self.utf8.feed(byte) {
                Utf8Result::Char(ch) => self.advance(ch, events),
                Utf8Result::Invalid => self.advance(Utf8Decoder::REPLACEMENT, events),
                Utf8Result::Pending => {}
            }
        }
    }

    /// Advance the state machine by one decoded codepoint.
    pub fn advance<E: ParserEvents>(&mut self, ch: char, events: &mut E) {
        let cp = ch as u32;

        // Transitions valid from any state. These fire the exit action of the
        // current state, which is what finalizes control strings on CAN, SUB,
        // ESC and 8-bit ST.
        match cp {
            0x18 | 0x1A | 0x9C | 0x80..=0x8F | 0x91..=0x97 => {
                self.transition(State::Ground, ch, events);
                return;
            }
            0x1B => {
                self.transition(State::Escape, ch, events);
                return;
            }
            0x90 => {
                self.transition(State::DcsEntry, ch, events);
                return;
            }
            0x98 | 0x9E | 0x9F => {
                self.transition(State::SosPmApcString, ch, events);
                return;
            }
            _ => {}
        }

        match self.state {
            State::Ground => match cp {
                0x00..=0x17 | 0x19 | 0x1C..=0x1F => events.execute(cp as u8),
                0x20..=0x7F => events.print(ch),
                0xA0.. => events.print(ch),
                _ => self.fail(cp, events),
            },
            State::Escape => match cp {
                0x00..=0x17 | 0x19 | 0x1C..=0x1F => events.execute(cp as u8),
                0x7F => {}
                0x5B => self.transition(State::CsiEntry, ch, events),
                0x5D => self.transition(State::OscString, ch, events),
                0x50 => self.transition(State::DcsEntry, ch, events),
                0x58 | 0x5E | 0x5F => self.transition(State::SosPmApcString, ch, events),
                // ST without a preceding control string
                0x5C => self.transition(State::Ground, ch, events),
                0x20..=0x2F => {
                    events.collect(cp as u8);
                    self.transition(State::EscapeIntermediate, ch, events);
                }
                0x30..=0x4F | 0x51..=0x57 | 0x59 | 0x5A | 0x60..=0x7E => {
                    events.dispatch_esc(cp as u8);
                    self.transition(State::Ground, ch, events);
                }
                _ => self.fail(cp, events),
            },
            State::EscapeIntermediate => match cp {
                0x00..=0x17 | 0x19 | 0x1C..=0x1F => events.execute(cp as u8),
                0x20..=0x2F => events.collect(cp as u8),
                0x7F => {}
                0x30..=0x7E => {
                    events.dispatch_esc(cp as u8);
                    self.transition(State::Ground, ch, events);
                }
                _ => self.fail(cp, events),
            },
            State::CsiEntry => match cp {
                0x00..=0x17 | 0x19 | 0x1C..=0x1F => events.execute(cp as u8),
                0x7F => {}
                0x20..=0x2F => {
                    events.collect(cp as u8);
                    self.transition(State::CsiIntermediate, ch, events);
                }
                0x3A => self.transition(State::CsiIgnore, ch, events),
                0x30..=0x39 | 0x3B => {
                    events.param(cp as u8);
                    self.transition(State::CsiParam, ch, events);
                }
                0x3C..=0x3F => {
                    events.collect_leader(cp as u8);
                    self.transition(State::CsiParam, ch, events);
                }
                0x40..=0x7E => {
                    events.dispatch_csi(cp as u8);
                    self.transition(State::Ground, ch, events);
                }
                _ => self.fail(cp, events),
            },
            State::CsiParam => match cp {
                0x00..=0x17 | 0x19 | 0x1C..=0x1F => events.execute(cp as u8),
                // digits, ':' and ';'
                0x30..=0x3B => events.param(cp as u8),
                0x7F => {}
                // private markers are only valid as the first character
                0x3C..=0x3F => self.transition(State::CsiIgnore, ch, events),
                0x20..=0x2F => {
                    events.collect(cp as u8);
                    self.transition(State::CsiIntermediate, ch, events);
                }
                0x40..=0x7E => {
                    events.dispatch_csi(cp as u8);
                    self.transition(State::Ground, ch, events);
                }
                _ => self.fail(cp, events),
            },
            State::CsiIntermediate => match cp {
                0x00..=0x17 | 0x19 | 0x1C..=0x1F => events.execute(cp as u8),
                0x20..=0x2F => events.collect(cp as u8),
                0x7F => {}
                0x30..=0x3F => self.transition(State::CsiIgnore, ch, events),
                0x40..=0x7E => {
                    events.dispatch_csi(cp as u8);
                    self.transition(State::Ground, ch, events);
                }
                _ => self.fail(cp, events),
            },
            State::CsiIgnore => match cp {
                0x00..=0x17 | 0x19 | 0x1C..=0x1F => events.execute(cp as u8),
                0x20..=0x3F | 0x7F => {}
                0x40..=0x7E => self.transition(State::Ground, ch, events),
                _ => self.fail(cp, events),
            },
            State::DcsEntry => match cp {
                0x00..=0x17 | 0x19 | 0x1C..=0x1F => {}
                0x7F => {}
                0x20..=0x2F => {
                    events.collect(cp as u8);
                    self.transition(State::DcsIntermediate, ch, events);
                }
                0x3A => self.transition(State::DcsIgnore, ch, events),
                0x30..=0x39 | 0x3B => {
                    events.param(cp as u8);
                    self.transition(State::DcsParam, ch, events);
                }
                0x3C..=0x3F => {
                    events.collect_leader(cp as u8);
                    self.transition(State::DcsParam, ch, events);
                }
                0x40..=0x7E => self.transition(State::DcsPassthrough, ch, events),
                _ => self.fail(cp, events),
            },
            State::DcsParam => match cp {
                0x00..=0x17 | 0x19 | 0x1C..=0x1F => events.execute(cp as u8),
                0x30..=0x39 | 0x3B => events.param(cp as u8),
                0x7F => {}
                0x3A | 0x3C..=0x3F => self.transition(State::DcsIgnore, ch, events),
                0x20..=0x2F => {
                    events.collect(cp as u8);
                    self.transition(State::DcsIntermediate, ch, events);
                }
                0x40..=0x7E => self.transition(State::DcsPassthrough, ch, events),
                _ => self.fail(cp, events),
            },
            State::DcsIntermediate => match cp {
                0x00..=0x17 | 0x19 | 0x1C..=0x1F => {}
                0x20..=0x2F => events.collect(cp as u8),
                0x7F => {}
                0x30..=0x3F => self.transition(State::DcsIgnore, ch, events),
                0x40..=0x7E => self.transition(State::DcsPassthrough, ch, events),
                _ => self.fail(cp, events),
            },
            State::DcsPassthrough => match cp {
                0x00..=0x17 | 0x19 | 0x1C..=0x1F => events.put(ch),
                0x20..=0x7E => events.put(ch),
                0x7F => {}
                0xA0.. => events.put(ch),
                _ => self.fail(cp, events),
            },
            State::DcsIgnore => {
                // consumed until ST / CAN / SUB / ESC
            }
            State::OscString => match cp {
                // xterm extension: BEL terminates the string
                0x07 => self.transition(State::Ground, ch, events),
                0x00..=0x06 | 0x08..=0x17 | 0x19 | 0x1C..=0x1F => {}
                0x20..=0x7F => events.put_osc(ch),
                0xA0.. => events.put_osc(ch),
                _ => self.fail(cp, events),
            },
            State::SosPmApcString => {
                // consumed until ST / CAN / SUB / ESC
            }
        }
    }

    /// Change state, firing the exit action of the old state and the entry
    /// action of the new one.
    fn transition<E: ParserEvents>(&mut self, to: State, ch: char, events: &mut E) {
        match self.state {
            State::DcsPassthrough => events.unhook(),
            State::OscString => events.dispatch_osc(),
            _ => {}
        }

        self.state = to;

        match to {
            State::Escape | State::CsiEntry | State::DcsEntry => events.clear(),
            State::OscString => events.start_osc(),
            State::DcsPassthrough => events.hook(ch as u8),
            _ => {}
        }
    }

    fn fail<E: ParserEvents>(&mut self, cp: u32, events: &mut E) {
        events.error(&format!(
            "unknown action for state/input pair ({:?}, U+{:04X})",
            self.state, cp
        ));
        self.state = State::Ground;
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}
