//! Terminal modes.
//!
//! Both ANSI modes (`CSI Pm h/l`) and DEC private modes (`CSI ? Pm h/l`)
//! are folded into one tagged enumeration so mode changes travel through a
//! single screen operation.

use serde::{Deserialize, Serialize};

/// A recognized terminal mode with two-valued state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    // ANSI modes
    KeyboardAction,
    Insert,
    SendReceive,
    AutomaticNewLine,

    // DEC private modes
    ApplicationCursorKeys,
    DesignateCharsetUsAscii,
    Columns132,
    SmoothScroll,
    ReverseVideo,
    Origin,
    AutoWrap,
    MouseProtocolX10,
    ShowToolbar,
    BlinkingCursor,
    PrinterExtend,
    VisibleCursor,
    ShowScrollbar,
    AllowColumns80to132,
    UseAlternateScreen,
    LeftRightMargin,
    SixelScrolling,
    UsePrivateColorRegisters,
    MouseProtocolNormalTracking,
    MouseProtocolHighlightTracking,
    MouseProtocolButtonTracking,
    MouseProtocolAnyEventTracking,
    FocusTracking,
    MouseExtended,
    MouseSgr,
    MouseAlternateScroll,
    MouseUrxvt,
    SaveCursor,
    ExtendedAltScreen,
    BracketedPaste,
    /// Synchronized output: deferred, atomically replayed rendering.
    BatchedRendering,
}

impl Mode {
    /// Translate a DEC private mode code (`CSI ? Pm`).
    pub fn from_dec_code(code: u16) -> Option<Mode> {
        match code {
            1 => Some(Mode::ApplicationCursorKeys),
            2 => Some(Mode::DesignateCharsetUsAscii),
            3 => Some(Mode::Columns132),
            4 => Some(Mode::SmoothScroll),
            5 => Some(Mode::ReverseVideo),
            6 => Some(Mode::Origin),
            7 => Some(Mode::AutoWrap),
            9 => Some(Mode::MouseProtocolX10),
            10 => Some(Mode::ShowToolbar),
            12 => Some(Mode::BlinkingCursor),
            19 => Some(Mode::PrinterExtend),
            25 => Some(Mode::VisibleCursor),
            30 => Some(Mode::ShowScrollbar),
            40 => Some(Mode::AllowColumns80to132),
            47 => Some(Mode::UseAlternateScreen),
            69 => Some(Mode::LeftRightMargin),
            80 => Some(Mode::SixelScrolling),
            1000 => Some(Mode::MouseProtocolNormalTracking),
            1001 => Some(Mode::MouseProtocolHighlightTracking),
            1002 => Some(Mode::MouseProtocolButtonTracking),
            1003 => Some(Mode::MouseProtocolAnyEventTracking),
            1004 => Some(Mode::FocusTracking),
            1005 => Some(Mode::MouseExtended),
            1006 => Some(Mode::MouseSgr),
            1007 => Some(Mode::MouseAlternateScroll),
            1015 => Some(Mode::MouseUrxvt),
            1047 => Some(Mode::UseAlternateScreen),
            1048 => Some(Mode::SaveCursor),
            1049 => Some(Mode::ExtendedAltScreen),
            1070 => Some(Mode::UsePrivateColorRegisters),
            2004 => Some(Mode::BracketedPaste),
            2026 => Some(Mode::BatchedRendering),
            _ => None,
        }
    }

    /// Translate an ANSI mode code (`CSI Pm`). Only the modes the
    /// interpreter recognizes at all appear here.
    pub fn from_ansi_code(code: u16) -> Option<Mode> {
        match code {
            2 => Some(Mode::KeyboardAction),
            4 => Some(Mode::Insert),
            12 => Some(Mode::SendReceive),
            20 => Some(Mode::AutomaticNewLine),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dec_mode_translation() {
        assert_eq!(Mode::from_dec_code(1), Some(Mode::ApplicationCursorKeys));
        assert_eq!(Mode::from_dec_code(25), Some(Mode::VisibleCursor));
        assert_eq!(Mode::from_dec_code(47), Some(Mode::UseAlternateScreen));
        assert_eq!(Mode::from_dec_code(1047), Some(Mode::UseAlternateScreen));
        assert_eq!(Mode::from_dec_code(1049), Some(Mode::ExtendedAltScreen));
        assert_eq!(Mode::from_dec_code(2004), Some(Mode::BracketedPaste));
        assert_eq!(Mode::from_dec_code(2026), Some(Mode::BatchedRendering));
        assert_eq!(Mode::from_dec_code(1070), Some(Mode::UsePrivateColorRegisters));
        assert_eq!(Mode::from_dec_code(9999), None);
    }

    #[test]
    fn test_ansi_mode_translation() {
        assert_eq!(Mode::from_ansi_code(4), Some(Mode::Insert));
        assert_eq!(Mode::from_ansi_code(20), Some(Mode::AutomaticNewLine));
        assert_eq!(Mode::from_ansi_code(2026), None);
    }
}
