//! Sequence accumulation.
//!
//! A [`Sequence`] is the unit of dispatch: everything the parser collected
//! between the introducer and the final byte of one control function. It is
//! built incrementally from parser events and read-only once dispatched.

use crate::functions::FunctionCategory;

/// One numeric parameter. Empty positions read as 0; values saturate.
pub type Parameter = u16;

/// A control sequence under construction or ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    category: FunctionCategory,
    leader: u8,
    /// Parameter groups; each group is the parameter followed by its
    /// sub-parameters.
    parameters: Vec<Vec<Parameter>>,
    /// Intermediate bytes for ESC/CSI/DCS, or the textual OSC payload.
    intermediates: Vec<u8>,
    final_byte: u8,
    /// Payload accumulated between DCS hook and ST.
    data: String,
}

impl Sequence {
    /// Upper bound on parameter groups; extra groups are ignored.
    pub const MAX_PARAMETERS: usize = 16;
    /// Upper bound on sub-parameters per group; extras are ignored.
    pub const MAX_SUB_PARAMETERS: usize = 8;
    /// Upper bound on the OSC payload in bytes; excess is dropped but the
    /// truncated payload still dispatches.
    pub const MAX_OSC_LENGTH: usize = 8192;
    /// Upper bound on collected intermediate bytes. No registered function
    /// uses more than one; extras beyond this many only feed diagnostics.
    pub const MAX_INTERMEDIATES: usize = 4;

    pub fn new() -> Self {
        Self {
            category: FunctionCategory::C0,
            leader: 0,
            parameters: Vec::with_capacity(Self::MAX_PARAMETERS),
            intermediates: Vec::new(),
            final_byte: 0,
            data: String::new(),
        }
    }

    /// Forget everything; ready to accumulate the next sequence.
    pub fn clear(&mut self) {
        self.category = FunctionCategory::C0;
        self.leader = 0;
        self.parameters.clear();
        self.intermediates.clear();
        self.final_byte = 0;
        self.data.clear();
    }

    pub fn set_category(&mut self, category: FunctionCategory) {
        self.category = category;
    }

    pub fn set_leader(&mut self, leader: u8) {
        self.leader = leader;
    }

    pub fn set_final(&mut self, final_byte: u8) {
        self.final_byte = final_byte;
    }

    pub fn collect(&mut self, intermediate: u8) {
        if self.intermediates.len() < Self::MAX_INTERMEDIATES {
            self.intermediates.push(intermediate);
        }
    }

    /// Append one UTF-8 codepoint to the OSC payload, bounded by
    /// [`Self::MAX_OSC_LENGTH`].
    pub fn put_osc(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        let encoded = ch.encode_utf8(&mut buf);
        if self.intermediates.len() + encoded.len() <= Self::MAX_OSC_LENGTH {
            self.intermediates.extend_from_slice(encoded.as_bytes());
        }
    }

    /// Feed one parameter byte: a digit accumulates into the current
    /// sub-parameter (saturating at `u16::MAX`), `;` opens a new parameter
    /// group, `:` a new sub-parameter within the current group.
    pub fn param_byte(&mut self, byte: u8) {
        if self.parameters.is_empty() {
            self.parameters.push(vec![0]);
        }
        match byte {
            b';' => {
                if self.parameters.len() < Self::MAX_PARAMETERS {
                    self.parameters.push(vec![0]);
                }
            }
            b':' => {
                let group = self.parameters.last_mut().unwrap();
                if group.len() < Self::MAX_SUB_PARAMETERS {
                    group.push(0);
                }
            }
            b'0'..=b'9' => {
                let slot = self.parameters.last_mut().unwrap().last_mut().unwrap();
                *slot = slot
                    .saturating_mul(10)
                    .saturating_add((byte - b'0') as Parameter);
            }
            _ => {}
        }
    }

    /// Push a complete parameter group (used for the parsed OSC code).
    pub fn push_parameter(&mut self, value: Parameter) {
        if self.parameters.len() < Self::MAX_PARAMETERS {
            self.parameters.push(vec![value]);
        }
    }

    // accessors

    pub fn category(&self) -> FunctionCategory {
        self.category
    }

    pub fn leader(&self) -> Option<u8> {
        (self.leader != 0).then_some(self.leader)
    }

    pub fn final_byte(&self) -> u8 {
        self.final_byte
    }

    pub fn intermediates(&self) -> &[u8] {
        &self.intermediates
    }

    /// The OSC payload (valid UTF-8 by construction of `put_osc`).
    pub fn osc_payload(&self) -> &str {
        std::str::from_utf8(&self.intermediates).unwrap_or("")
    }

    /// Drop `n` leading bytes of the OSC payload (the parsed code prefix).
    pub fn strip_osc_prefix(&mut self, n: usize) {
        self.intermediates.drain(..n.min(self.intermediates.len()));
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut String {
        &mut self.data
    }

    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    /// Number of sub-parameters in group `index` (0 when absent).
    pub fn subparam_count(&self, index: usize) -> usize {
        self.parameters
            .get(index)
            .map(|g| g.len() - 1)
            .unwrap_or(0)
    }

    /// The parameter in group `index`; 0 when the group is absent.
    pub fn param(&self, index: usize) -> Parameter {
        self.parameters
            .get(index)
            .map(|g| g[0])
            .unwrap_or(0)
    }

    /// Sub-parameter `sub` of group `index`; 0 when absent.
    pub fn subparam(&self, index: usize, sub: usize) -> Parameter {
        self.parameters
            .get(index)
            .and_then(|g| g.get(sub + 1))
            .copied()
            .unwrap_or(0)
    }

    /// The parameter at `index`, `None` when absent *or zero*.
    ///
    /// Zero coalesces with absent because the callers of this accessor are
    /// functions for which zero historically means "use the default"
    /// (cursor movement counts and the like).
    pub fn param_opt(&self, index: usize) -> Option<Parameter> {
        match self.parameters.get(index) {
            Some(group) if group[0] != 0 => Some(group[0]),
            _ => None,
        }
    }

    pub fn param_or(&self, index: usize, default: Parameter) -> Parameter {
        self.param_opt(index).unwrap_or(default)
    }

    pub fn contains_parameter(&self, value: Parameter) -> bool {
        self.parameters.iter().any(|g| g[0] == value)
    }

    /// Reconstructs the raw byte form of this sequence (parameters are
    /// numerically normalized: leading zeros do not survive).
    pub fn raw(&self) -> String {
        let mut out = String::new();
        match self.category {
            FunctionCategory::C0 => {}
            FunctionCategory::Esc => out.push('\x1b'),
            FunctionCategory::Csi => out.push_str("\x1b["),
            FunctionCategory::Dcs => out.push_str("\x1bP"),
            FunctionCategory::Osc => out.push_str("\x1b]"),
        }

        if let Some(leader) = self.leader() {
            out.push(leader as char);
        }

        if self.parameter_count() > 1 || (self.parameter_count() == 1 && self.param(0) != 0) {
            for (i, group) in self.parameters.iter().enumerate() {
                if i > 0 {
                    out.push(';');
                }
                for (k, value) in group.iter().enumerate() {
                    if k > 0 {
                        out.push(':');
                    }
                    out.push_str(&value.to_string());
                }
            }
        }

        if self.category != FunctionCategory::Osc {
            for &b in &self.intermediates {
                out.push(b as char);
            }
        } else {
            out.push_str(self.osc_payload());
        }

        if self.final_byte != 0 {
            out.push(self.final_byte as char);
        }

        if !self.data.is_empty() {
            out.push_str(&self.data);
            out.push_str("\x1b\\");
        }

        out
    }

    /// Human readable rendering for diagnostics.
    pub fn text(&self) -> String {
        let mut out = String::new();
        out.push_str(match self.category {
            FunctionCategory::C0 => "C0",
            FunctionCategory::Esc => "ESC",
            FunctionCategory::Csi => "CSI",
            FunctionCategory::Dcs => "DCS",
            FunctionCategory::Osc => "OSC",
        });

        if let Some(leader) = self.leader() {
            out.push(' ');
            out.push(leader as char);
        }

        if self.parameter_count() > 1 || (self.parameter_count() == 1 && self.param(0) != 0) {
            out.push(' ');
            for (i, group) in self.parameters.iter().enumerate() {
                if i > 0 {
                    out.push(';');
                }
                for (k, value) in group.iter().enumerate() {
                    if k > 0 {
                        out.push(':');
                    }
                    out.push_str(&value.to_string());
                }
            }
        }

        if !self.intermediates.is_empty() {
            out.push(' ');
            if self.category == FunctionCategory::Osc {
                out.push_str(self.osc_payload());
            } else {
                for &b in &self.intermediates {
                    out.push(b as char);
                }
            }
        }

        if self.final_byte != 0 {
            out.push(' ');
            out.push(self.final_byte as char);
        }

        if !self.data.is_empty() {
            out.push_str(" \"");
            out.push_str(&self.data.escape_debug().to_string());
            out.push_str("\" ST");
        }

        out
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(seq: &mut Sequence, bytes: &[u8]) {
        for &b in bytes {
            seq.param_byte(b);
        }
    }

    #[test]
    fn test_empty() {
        let seq = Sequence::new();
        assert_eq!(seq.parameter_count(), 0);
        assert_eq!(seq.param(0), 0);
        assert_eq!(seq.param_opt(0), None);
        assert_eq!(seq.param_or(0, 7), 7);
    }

    #[test]
    fn test_single_param() {
        let mut seq = Sequence::new();
        feed(&mut seq, b"42");
        assert_eq!(seq.parameter_count(), 1);
        assert_eq!(seq.param(0), 42);
        assert_eq!(seq.param_opt(0), Some(42));
    }

    #[test]
    fn test_multiple_params() {
        let mut seq = Sequence::new();
        feed(&mut seq, b"1;22;333");
        assert_eq!(seq.parameter_count(), 3);
        assert_eq!(seq.param(0), 1);
        assert_eq!(seq.param(1), 22);
        assert_eq!(seq.param(2), 333);
    }

    #[test]
    fn test_empty_positions_default_to_zero() {
        let mut seq = Sequence::new();
        feed(&mut seq, b";5;");
        assert_eq!(seq.parameter_count(), 3);
        assert_eq!(seq.param(0), 0);
        assert_eq!(seq.param(1), 5);
        assert_eq!(seq.param(2), 0);
        assert_eq!(seq.param_or(0, 1), 1);
        assert_eq!(seq.param_or(1, 1), 5);
    }

    #[test]
    fn test_subparams() {
        let mut seq = Sequence::new();
        feed(&mut seq, b"38:2:10:20:30;1");
        assert_eq!(seq.parameter_count(), 2);
        assert_eq!(seq.param(0), 38);
        assert_eq!(seq.subparam_count(0), 4);
        assert_eq!(seq.subparam(0, 0), 2);
        assert_eq!(seq.subparam(0, 3), 30);
        assert_eq!(seq.param(1), 1);
        assert_eq!(seq.subparam_count(1), 0);
    }

    #[test]
    fn test_saturation() {
        let mut seq = Sequence::new();
        feed(&mut seq, b"99999999");
        assert_eq!(seq.param(0), u16::MAX);
    }

    #[test]
    fn test_param_count_bound() {
        let mut seq = Sequence::new();
        for _ in 0..40 {
            feed(&mut seq, b"1;");
        }
        assert_eq!(seq.parameter_count(), Sequence::MAX_PARAMETERS);
    }

    #[test]
    fn test_subparam_count_bound() {
        let mut seq = Sequence::new();
        feed(&mut seq, b"4");
        for _ in 0..20 {
            feed(&mut seq, b":1");
        }
        assert_eq!(seq.subparam_count(0), Sequence::MAX_SUB_PARAMETERS - 1);
    }

    #[test]
    fn test_osc_length_bound() {
        let mut seq = Sequence::new();
        seq.set_category(FunctionCategory::Osc);
        for _ in 0..Sequence::MAX_OSC_LENGTH + 100 {
            seq.put_osc('x');
        }
        assert_eq!(seq.osc_payload().len(), Sequence::MAX_OSC_LENGTH);
    }

    #[test]
    fn test_raw_csi() {
        let mut seq = Sequence::new();
        seq.set_category(FunctionCategory::Csi);
        feed(&mut seq, b"10;20");
        seq.set_final(b'H');
        assert_eq!(seq.raw(), "\x1b[10;20H");
    }

    #[test]
    fn test_raw_private_mode() {
        let mut seq = Sequence::new();
        seq.set_category(FunctionCategory::Csi);
        seq.set_leader(b'?');
        feed(&mut seq, b"2026");
        seq.set_final(b'h');
        assert_eq!(seq.raw(), "\x1b[?2026h");
    }

    #[test]
    fn test_raw_subparams_normalized() {
        let mut seq = Sequence::new();
        seq.set_category(FunctionCategory::Csi);
        feed(&mut seq, b"4:03");
        seq.set_final(b'm');
        // leading zeros are normalized away
        assert_eq!(seq.raw(), "\x1b[4:3m");
    }

    #[test]
    fn test_raw_dcs_with_data() {
        let mut seq = Sequence::new();
        seq.set_category(FunctionCategory::Dcs);
        seq.collect(b'$');
        seq.set_final(b'q');
        seq.data_mut().push('m');
        assert_eq!(seq.raw(), "\x1bP$qm\x1b\\");
    }

    #[test]
    fn test_raw_esc_omits_default_params() {
        let mut seq = Sequence::new();
        seq.set_category(FunctionCategory::Esc);
        seq.set_final(b'7');
        assert_eq!(seq.raw(), "\x1b7");
    }

    #[test]
    fn test_clear() {
        let mut seq = Sequence::new();
        seq.set_category(FunctionCategory::Csi);
        seq.set_leader(b'?');
        feed(&mut seq, b"1;2");
        seq.set_final(b'h');
        seq.clear();
        assert_eq!(seq.parameter_count(), 0);
        assert_eq!(seq.leader(), None);
        assert_eq!(seq.final_byte(), 0);
        assert_eq!(seq.category(), FunctionCategory::C0);
    }
}
