//! tern-parser - streaming VT escape sequence lexer
//!
//! This crate turns a raw byte stream into parser events: printable
//! codepoints, C0 executes, and the structural pieces of ESC/CSI/OSC/DCS
//! sequences. It is the lexical half of a terminal interpreter; attaching
//! meaning to the recognized sequences is the consumer's job (see the
//! `tern-vt` crate).
//!
//! Properties:
//! - Streaming: chunk boundaries may fall anywhere, including inside a
//!   UTF-8 sequence or an escape sequence.
//! - Deterministic: every input byte advances the state machine; rejected
//!   state/input pairs report an error and return to ground.
//! - Allocation-free on the hot path.

pub mod events;
pub mod parser;
pub mod utf8;

pub use events::ParserEvents;
pub use parser::{Parser, State};
pub use utf8::{Utf8Decoder, Utf8Result};
