//! Key/value message payloads for DCS-transported protocols.
//!
//! The format is a much simplified HTTP message: a header section of
//! `key=value` pairs separated by `,`, then optionally `;` and a raw body.
//! `;`, `,` and `=` never occur inside keys or values. A value or body
//! starting with `!` is base64 encoded. Duplicate header names are
//! last-writer-wins.
//!
//! Examples:
//!
//! * `first=Foo,second=Bar;some body here`
//! * `,first=Foo,second,,,another=value,also=;some body here`

use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// A parsed message: unique headers plus an opaque binary body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    headers: HashMap<String, String>,
    body: Vec<u8>,
}

impl Message {
    pub fn new(headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self { headers, body }
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(|v| v.as_str())
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn take_body(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.body)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ParamKey,
    ParamValue,
    BodyStart,
    Body,
}

/// Streaming parser for [`Message`] payloads.
///
/// Fed one codepoint at a time by the DCS hook; [`MessageParser::finalize`]
/// yields the assembled message.
#[derive(Debug, Clone)]
pub struct MessageParser {
    state: State,
    key: String,
    value: String,
    headers: HashMap<String, String>,
    body: Vec<u8>,
}

impl MessageParser {
    pub const MAX_KEY_LENGTH: usize = 64;
    pub const MAX_VALUE_LENGTH: usize = 512;
    pub const MAX_HEADER_COUNT: usize = 32;
    pub const MAX_BODY_LENGTH: usize = 8 * 1024 * 1024;

    pub fn new() -> Self {
        Self {
            state: State::ParamKey,
            key: String::new(),
            value: String::new(),
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Parse a complete payload in one go.
    pub fn parse(input: &str) -> Message {
        let mut parser = Self::new();
        for ch in input.chars() {
            parser.pass(ch);
        }
        parser.finalize()
    }

    /// Feed one payload codepoint.
    pub fn pass(&mut self, ch: char) {
        match self.state {
            State::ParamKey => {
                if ch == ',' {
                    self.flush_header();
                } else if ch == ';' {
                    self.state = State::BodyStart;
                } else if ch == '=' {
                    self.state = State::ParamValue;
                } else if self.key.len() < Self::MAX_KEY_LENGTH {
                    self.key.push(ch);
                }
            }
            State::ParamValue => {
                if ch == ',' {
                    self.flush_header();
                    self.state = State::ParamKey;
                } else if ch == ';' {
                    self.state = State::BodyStart;
                } else if self.value.len() < Self::MAX_VALUE_LENGTH {
                    self.value.push(ch);
                }
            }
            State::BodyStart => {
                self.flush_header();
                self.state = State::Body;
                self.push_body_char(ch);
            }
            State::Body => {
                self.push_body_char(ch);
            }
        }
    }

    /// Finish parsing and hand out the message. Consumes the accumulated
    /// state; the parser is not reusable afterwards.
    pub fn finalize(mut self) -> Message {
        match self.state {
            State::ParamKey | State::ParamValue | State::BodyStart => self.flush_header(),
            State::Body => {
                if self.body.first() == Some(&b'!') {
                    if let Ok(decoded) = BASE64.decode(&self.body[1..]) {
                        self.body = decoded;
                    }
                }
            }
        }
        Message::new(self.headers, self.body)
    }

    fn push_body_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        let encoded = ch.encode_utf8(&mut buf);
        if self.body.len() + encoded.len() <= Self::MAX_BODY_LENGTH {
            self.body.extend_from_slice(encoded.as_bytes());
        }
    }

    fn flush_header(&mut self) {
        let has_space =
            self.headers.len() < Self::MAX_HEADER_COUNT || self.headers.contains_key(&self.key);
        let valid = !self.key.is_empty();

        if self.value.starts_with('!') {
            if let Ok(decoded) = BASE64.decode(&self.value[1..]) {
                self.value = String::from_utf8_lossy(&decoded).into_owned();
            }
        }

        if has_space && valid {
            self.headers
                .insert(std::mem::take(&mut self.key), std::mem::take(&mut self.value));
        } else {
            self.key.clear();
            self.value.clear();
        }
    }
}

impl Default for MessageParser {
    fn default() -> Self {
        Self::new()
    }
}
