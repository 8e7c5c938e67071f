//! The function registry.
//!
//! Every control function the interpreter understands is identified by a
//! [`FunctionId`]. Resolution goes from the syntactic shape of a sequence
//! (category, leader, intermediate, final byte, argument count, or the OSC
//! code) to an id; the dispatcher then matches exhaustively on the id, so a
//! newly registered function that is not handled fails to compile rather
//! than falling into a silent default.

use std::fmt;

use crate::sequence::Sequence;

/// Upper bound used for "takes any number of parameters" entries.
const ARGS_MAX: usize = Sequence::MAX_PARAMETERS;

/// Syntactic category of a control function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionCategory {
    C0,
    Esc,
    Csi,
    Osc,
    Dcs,
}

/// Lookup key resolved from an accumulated sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionSelector {
    pub category: FunctionCategory,
    pub leader: Option<u8>,
    /// Number of parameter groups supplied.
    pub argc: usize,
    /// At most one intermediate byte is significant for resolution.
    pub intermediate: Option<u8>,
    pub final_byte: u8,
}

/// Identity of a recognized control function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionId {
    // C0
    Eot,
    Bel,
    Bs,
    Tab,
    Lf,
    Vt,
    Ff,
    Cr,
    So,
    Si,

    // ESC
    ScsG0Special,
    ScsG0UsAscii,
    ScsG1Special,
    ScsG1UsAscii,
    Decaln,
    Decbi,
    Decfi,
    Deckpam,
    Deckpnm,
    Decrs,
    Decsc,
    Hts,
    Ind,
    Nel,
    Ri,
    Ris,
    Ss2,
    Ss3,

    // CSI
    AnsiSysSc,
    Cbt,
    Cha,
    Cht,
    Cnl,
    Cpl,
    Cpr,
    Cub,
    Cud,
    Cuf,
    Cup,
    Cuu,
    Da1,
    Da2,
    Da3,
    Dch,
    Decdc,
    Decic,
    DecModeRestore,
    DecModeSave,
    Decrm,
    Decrqm,
    DecrqmAnsi,
    Decrqpsr,
    Decscl,
    Decscpp,
    Decscusr,
    Decslrm,
    Decsm,
    Decstbm,
    Decstr,
    Decxcpr,
    Dl,
    Ech,
    Ed,
    El,
    Hpa,
    Hpr,
    Hvp,
    Ich,
    Il,
    Rm,
    Scosc,
    Sd,
    SetMark,
    Sgr,
    Sm,
    Su,
    Tbc,
    Vpa,
    WinManip,
    XtSmGraphics,

    // DCS
    Decrqss,
    Decsixel,
    #[cfg(feature = "image-protocol")]
    GiUpload,
    #[cfg(feature = "image-protocol")]
    GiRender,
    #[cfg(feature = "image-protocol")]
    GiDelete,
    #[cfg(feature = "image-protocol")]
    GiOneshot,

    // OSC
    SetTitle,
    SetIcon,
    SetWinTitle,
    SetXProp,
    Hyperlink,
    ColorFg,
    ColorBg,
    ColorCursor,
    ColorMouseFg,
    ColorMouseBg,
    Clipboard,
    ColorSpecial,
    RColorFg,
    RColorBg,
    RColorCursor,
    RColorMouseFg,
    RColorMouseBg,
    RColorHighlightBg,
    RColorHighlightFg,
    Notify,
    DumpState,
}

/// Registry metadata for one function: its syntax requirements plus the
/// parameter-count window used for resolution and diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct FunctionDef {
    pub id: FunctionId,
    pub category: FunctionCategory,
    pub leader: Option<u8>,
    pub intermediate: Option<u8>,
    pub final_byte: u8,
    pub min_args: usize,
    pub max_args: usize,
    /// For OSC entries: the numeric code.
    pub osc_code: u16,
    pub mnemonic: &'static str,
}

const fn c0(final_byte: u8, id: FunctionId, mnemonic: &'static str) -> FunctionDef {
    FunctionDef {
        id,
        category: FunctionCategory::C0,
        leader: None,
        intermediate: None,
        final_byte,
        min_args: 0,
        max_args: 0,
        osc_code: 0,
        mnemonic,
    }
}

const fn esc(
    intermediate: Option<u8>,
    final_byte: u8,
    id: FunctionId,
    mnemonic: &'static str,
) -> FunctionDef {
    FunctionDef {
        id,
        category: FunctionCategory::Esc,
        leader: None,
        intermediate,
        final_byte,
        min_args: 0,
        max_args: 0,
        osc_code: 0,
        mnemonic,
    }
}

const fn csi(
    leader: Option<u8>,
    min_args: usize,
    max_args: usize,
    intermediate: Option<u8>,
    final_byte: u8,
    id: FunctionId,
    mnemonic: &'static str,
) -> FunctionDef {
    FunctionDef {
        id,
        category: FunctionCategory::Csi,
        leader,
        intermediate,
        final_byte,
        min_args,
        max_args,
        osc_code: 0,
        mnemonic,
    }
}

const fn dcs(
    leader: Option<u8>,
    min_args: usize,
    max_args: usize,
    intermediate: Option<u8>,
    final_byte: u8,
    id: FunctionId,
    mnemonic: &'static str,
) -> FunctionDef {
    FunctionDef {
        id,
        category: FunctionCategory::Dcs,
        leader,
        intermediate,
        final_byte,
        min_args,
        max_args,
        osc_code: 0,
        mnemonic,
    }
}

const fn osc(code: u16, id: FunctionId, mnemonic: &'static str) -> FunctionDef {
    FunctionDef {
        id,
        category: FunctionCategory::Osc,
        leader: None,
        intermediate: None,
        final_byte: 0,
        min_args: 0,
        max_args: 0,
        osc_code: code,
        mnemonic,
    }
}

/// The complete registry. Resolution itself goes through [`select`] and
/// [`select_osc`]; this table backs [`definition`] for diagnostics.
pub static FUNCTIONS: &[FunctionDef] = &[
    // C0
    c0(0x04, FunctionId::Eot, "EOT"),
    c0(0x07, FunctionId::Bel, "BEL"),
    c0(0x08, FunctionId::Bs, "BS"),
    c0(0x09, FunctionId::Tab, "TAB"),
    c0(0x0A, FunctionId::Lf, "LF"),
    c0(0x0B, FunctionId::Vt, "VT"),
    c0(0x0C, FunctionId::Ff, "FF"),
    c0(0x0D, FunctionId::Cr, "CR"),
    c0(0x0E, FunctionId::So, "SO"),
    c0(0x0F, FunctionId::Si, "SI"),
    // ESC
    esc(Some(b'('), b'0', FunctionId::ScsG0Special, "SCS_G0_SPECIAL"),
    esc(Some(b'('), b'B', FunctionId::ScsG0UsAscii, "SCS_G0_USASCII"),
    esc(Some(b')'), b'0', FunctionId::ScsG1Special, "SCS_G1_SPECIAL"),
    esc(Some(b')'), b'B', FunctionId::ScsG1UsAscii, "SCS_G1_USASCII"),
    esc(Some(b'#'), b'8', FunctionId::Decaln, "DECALN"),
    esc(None, b'6', FunctionId::Decbi, "DECBI"),
    esc(None, b'9', FunctionId::Decfi, "DECFI"),
    esc(None, b'=', FunctionId::Deckpam, "DECKPAM"),
    esc(None, b'>', FunctionId::Deckpnm, "DECKPNM"),
    esc(None, b'8', FunctionId::Decrs, "DECRS"),
    esc(None, b'7', FunctionId::Decsc, "DECSC"),
    esc(None, b'H', FunctionId::Hts, "HTS"),
    esc(None, b'D', FunctionId::Ind, "IND"),
    esc(None, b'E', FunctionId::Nel, "NEL"),
    esc(None, b'M', FunctionId::Ri, "RI"),
    esc(None, b'c', FunctionId::Ris, "RIS"),
    esc(None, b'N', FunctionId::Ss2, "SS2"),
    esc(None, b'O', FunctionId::Ss3, "SS3"),
    // CSI
    csi(None, 0, 0, None, b'u', FunctionId::AnsiSysSc, "ANSISYSSC"),
    csi(None, 0, 1, None, b'Z', FunctionId::Cbt, "CBT"),
    csi(None, 0, 1, None, b'G', FunctionId::Cha, "CHA"),
    csi(None, 0, 1, None, b'I', FunctionId::Cht, "CHT"),
    csi(None, 0, 1, None, b'E', FunctionId::Cnl, "CNL"),
    csi(None, 0, 1, None, b'F', FunctionId::Cpl, "CPL"),
    csi(None, 1, 1, None, b'n', FunctionId::Cpr, "CPR"),
    csi(None, 0, 1, None, b'D', FunctionId::Cub, "CUB"),
    csi(None, 0, 1, None, b'B', FunctionId::Cud, "CUD"),
    csi(None, 0, 1, None, b'C', FunctionId::Cuf, "CUF"),
    csi(None, 0, 2, None, b'H', FunctionId::Cup, "CUP"),
    csi(None, 0, 1, None, b'A', FunctionId::Cuu, "CUU"),
    csi(None, 0, 1, None, b'c', FunctionId::Da1, "DA1"),
    csi(Some(b'>'), 0, 1, None, b'c', FunctionId::Da2, "DA2"),
    csi(Some(b'='), 0, 1, None, b'c', FunctionId::Da3, "DA3"),
    csi(None, 0, 1, None, b'P', FunctionId::Dch, "DCH"),
    csi(None, 0, 1, Some(b'\''), b'~', FunctionId::Decdc, "DECDC"),
    csi(None, 0, 1, Some(b'\''), b'}', FunctionId::Decic, "DECIC"),
    csi(Some(b'?'), 0, ARGS_MAX, None, b'r', FunctionId::DecModeRestore, "DECMODERESTORE"),
    csi(Some(b'?'), 0, ARGS_MAX, None, b's', FunctionId::DecModeSave, "DECMODESAVE"),
    csi(Some(b'?'), 1, ARGS_MAX, None, b'l', FunctionId::Decrm, "DECRM"),
    csi(Some(b'?'), 1, 1, Some(b'$'), b'p', FunctionId::Decrqm, "DECRQM"),
    csi(None, 1, 1, Some(b'$'), b'p', FunctionId::DecrqmAnsi, "DECRQM_ANSI"),
    csi(None, 1, 1, Some(b'$'), b'w', FunctionId::Decrqpsr, "DECRQPSR"),
    csi(None, 2, 2, Some(b'"'), b'p', FunctionId::Decscl, "DECSCL"),
    csi(None, 0, 1, Some(b'$'), b'|', FunctionId::Decscpp, "DECSCPP"),
    csi(None, 0, 1, Some(b' '), b'q', FunctionId::Decscusr, "DECSCUSR"),
    csi(None, 2, 2, None, b's', FunctionId::Decslrm, "DECSLRM"),
    csi(Some(b'?'), 1, ARGS_MAX, None, b'h', FunctionId::Decsm, "DECSM"),
    csi(None, 0, 2, None, b'r', FunctionId::Decstbm, "DECSTBM"),
    csi(None, 0, 0, Some(b'!'), b'p', FunctionId::Decstr, "DECSTR"),
    csi(None, 0, 0, None, b'6', FunctionId::Decxcpr, "DECXCPR"),
    csi(None, 0, 1, None, b'M', FunctionId::Dl, "DL"),
    csi(None, 0, 1, None, b'X', FunctionId::Ech, "ECH"),
    csi(None, 0, ARGS_MAX, None, b'J', FunctionId::Ed, "ED"),
    csi(None, 0, 1, None, b'K', FunctionId::El, "EL"),
    csi(None, 1, 1, None, b'`', FunctionId::Hpa, "HPA"),
    csi(None, 1, 1, None, b'a', FunctionId::Hpr, "HPR"),
    csi(None, 0, 2, None, b'f', FunctionId::Hvp, "HVP"),
    csi(None, 0, 1, None, b'@', FunctionId::Ich, "ICH"),
    csi(None, 0, 1, None, b'L', FunctionId::Il, "IL"),
    csi(None, 1, ARGS_MAX, None, b'l', FunctionId::Rm, "RM"),
    csi(None, 0, 0, None, b's', FunctionId::Scosc, "SCOSC"),
    csi(None, 0, 1, None, b'T', FunctionId::Sd, "SD"),
    csi(Some(b'>'), 0, 0, None, b'M', FunctionId::SetMark, "SETMARK"),
    csi(None, 0, ARGS_MAX, None, b'm', FunctionId::Sgr, "SGR"),
    csi(None, 1, ARGS_MAX, None, b'h', FunctionId::Sm, "SM"),
    csi(None, 0, 1, None, b'S', FunctionId::Su, "SU"),
    csi(None, 0, 1, None, b'g', FunctionId::Tbc, "TBC"),
    csi(None, 0, 1, None, b'd', FunctionId::Vpa, "VPA"),
    csi(None, 1, 3, None, b't', FunctionId::WinManip, "WINMANIP"),
    csi(Some(b'?'), 2, 4, None, b'S', FunctionId::XtSmGraphics, "XTSMGRAPHICS"),
    // DCS
    dcs(None, 0, 0, Some(b'$'), b'q', FunctionId::Decrqss, "DECRQSS"),
    dcs(None, 0, 3, None, b'q', FunctionId::Decsixel, "DECSIXEL"),
    #[cfg(feature = "image-protocol")]
    dcs(None, 0, 0, None, b'u', FunctionId::GiUpload, "GIUPLOAD"),
    #[cfg(feature = "image-protocol")]
    dcs(None, 0, 0, None, b'r', FunctionId::GiRender, "GIRENDER"),
    #[cfg(feature = "image-protocol")]
    dcs(None, 0, 0, None, b'd', FunctionId::GiDelete, "GIDELETE"),
    #[cfg(feature = "image-protocol")]
    dcs(None, 0, 0, None, b's', FunctionId::GiOneshot, "GIONESHOT"),
    // OSC
    osc(0, FunctionId::SetTitle, "SETTITLE"),
    osc(1, FunctionId::SetIcon, "SETICON"),
    osc(2, FunctionId::SetWinTitle, "SETWINTITLE"),
    osc(3, FunctionId::SetXProp, "SETXPROP"),
    osc(8, FunctionId::Hyperlink, "HYPERLINK"),
    osc(10, FunctionId::ColorFg, "COLORFG"),
    osc(11, FunctionId::ColorBg, "COLORBG"),
    osc(12, FunctionId::ColorCursor, "COLORCURSOR"),
    osc(13, FunctionId::ColorMouseFg, "COLORMOUSEFG"),
    osc(14, FunctionId::ColorMouseBg, "COLORMOUSEBG"),
    osc(52, FunctionId::Clipboard, "CLIPBOARD"),
    osc(106, FunctionId::ColorSpecial, "COLORSPECIAL"),
    osc(110, FunctionId::RColorFg, "RCOLORFG"),
    osc(111, FunctionId::RColorBg, "RCOLORBG"),
    osc(112, FunctionId::RColorCursor, "RCOLORCURSOR"),
    osc(113, FunctionId::RColorMouseFg, "RCOLORMOUSEFG"),
    osc(114, FunctionId::RColorMouseBg, "RCOLORMOUSEBG"),
    osc(117, FunctionId::RColorHighlightBg, "RCOLORHIGHLIGHTBG"),
    osc(119, FunctionId::RColorHighlightFg, "RCOLORHIGHLIGHTFG"),
    osc(777, FunctionId::Notify, "NOTIFY"),
    osc(888, FunctionId::DumpState, "DUMPSTATE"),
];

/// Registry metadata for a function id.
pub fn definition(id: FunctionId) -> &'static FunctionDef {
    FUNCTIONS
        .iter()
        .find(|def| def.id == id)
        .expect("every FunctionId has a registry entry")
}

/// Resolve a non-OSC selector to a function id.
///
/// Resolution keys on (category, leader, intermediate, final byte) and then
/// validates the supplied argument count against the function's window, so
/// over- and under-parameterized sequences resolve to nothing.
pub fn select(selector: &FunctionSelector) -> Option<FunctionId> {
    use FunctionCategory::*;
    use FunctionId::*;

    let id = match (
        selector.category,
        selector.leader,
        selector.intermediate,
        selector.final_byte,
    ) {
        (C0, None, None, 0x04) => Eot,
        (C0, None, None, 0x07) => Bel,
        (C0, None, None, 0x08) => Bs,
        (C0, None, None, 0x09) => Tab,
        (C0, None, None, 0x0A) => Lf,
        (C0, None, None, 0x0B) => Vt,
        (C0, None, None, 0x0C) => Ff,
        (C0, None, None, 0x0D) => Cr,
        (C0, None, None, 0x0E) => So,
        (C0, None, None, 0x0F) => Si,

        (Esc, None, Some(b'('), b'0') => ScsG0Special,
        (Esc, None, Some(b'('), b'B') => ScsG0UsAscii,
        (Esc, None, Some(b')'), b'0') => ScsG1Special,
        (Esc, None, Some(b')'), b'B') => ScsG1UsAscii,
        (Esc, None, Some(b'#'), b'8') => Decaln,
        (Esc, None, None, b'6') => Decbi,
        (Esc, None, None, b'9') => Decfi,
        (Esc, None, None, b'=') => Deckpam,
        (Esc, None, None, b'>') => Deckpnm,
        (Esc, None, None, b'8') => Decrs,
        (Esc, None, None, b'7') => Decsc,
        (Esc, None, None, b'H') => Hts,
        (Esc, None, None, b'D') => Ind,
        (Esc, None, None, b'E') => Nel,
        (Esc, None, None, b'M') => Ri,
        (Esc, None, None, b'c') => Ris,
        (Esc, None, None, b'N') => Ss2,
        (Esc, None, None, b'O') => Ss3,

        (Csi, None, None, b'u') => AnsiSysSc,
        (Csi, None, None, b'Z') => Cbt,
        (Csi, None, None, b'G') => Cha,
        (Csi, None, None, b'I') => Cht,
        (Csi, None, None, b'E') => Cnl,
        (Csi, None, None, b'F') => Cpl,
        (Csi, None, None, b'n') => Cpr,
        (Csi, None, None, b'D') => Cub,
        (Csi, None, None, b'B') => Cud,
        (Csi, None, None, b'C') => Cuf,
        (Csi, None, None, b'H') => Cup,
        (Csi, None, None, b'A') => Cuu,
        (Csi, None, None, b'c') => Da1,
        (Csi, Some(b'>'), None, b'c') => Da2,
        (Csi, Some(b'='), None, b'c') => Da3,
        (Csi, None, None, b'P') => Dch,
        (Csi, None, Some(b'\''), b'~') => Decdc,
        (Csi, None, Some(b'\''), b'}') => Decic,
        (Csi, Some(b'?'), None, b'r') => DecModeRestore,
        (Csi, Some(b'?'), None, b's') => DecModeSave,
        (Csi, Some(b'?'), None, b'l') => Decrm,
        (Csi, Some(b'?'), Some(b'$'), b'p') => Decrqm,
        (Csi, None, Some(b'$'), b'p') => DecrqmAnsi,
        (Csi, None, Some(b'$'), b'w') => Decrqpsr,
        (Csi, None, Some(b'"'), b'p') => Decscl,
        (Csi, None, Some(b'$'), b'|') => Decscpp,
        (Csi, None, Some(b' '), b'q') => Decscusr,
        // final byte shared between SCOSC (no args) and DECSLRM (two args)
        (Csi, None, None, b's') => {
            if selector.argc == 2 {
                Decslrm
            } else {
                Scosc
            }
        }
        (Csi, Some(b'?'), None, b'h') => Decsm,
        (Csi, None, None, b'r') => Decstbm,
        (Csi, None, Some(b'!'), b'p') => Decstr,
        (Csi, None, None, b'6') => Decxcpr,
        (Csi, None, None, b'M') => Dl,
        (Csi, None, None, b'X') => Ech,
        (Csi, None, None, b'J') => Ed,
        (Csi, None, None, b'K') => El,
        (Csi, None, None, b'`') => Hpa,
        (Csi, None, None, b'a') => Hpr,
        (Csi, None, None, b'f') => Hvp,
        (Csi, None, None, b'@') => Ich,
        (Csi, None, None, b'L') => Il,
        (Csi, None, None, b'l') => Rm,
        (Csi, None, None, b'T') => Sd,
        (Csi, Some(b'>'), None, b'M') => SetMark,
        (Csi, None, None, b'm') => Sgr,
        (Csi, None, None, b'h') => Sm,
        (Csi, None, None, b'S') => Su,
        (Csi, None, None, b'g') => Tbc,
        (Csi, None, None, b'd') => Vpa,
        (Csi, None, None, b't') => WinManip,
        (Csi, Some(b'?'), None, b'S') => XtSmGraphics,

        (Dcs, None, Some(b'$'), b'q') => Decrqss,
        (Dcs, None, None, b'q') => Decsixel,
        #[cfg(feature = "image-protocol")]
        (Dcs, None, None, b'u') => GiUpload,
        #[cfg(feature = "image-protocol")]
        (Dcs, None, None, b'r') => GiRender,
        #[cfg(feature = "image-protocol")]
        (Dcs, None, None, b'd') => GiDelete,
        #[cfg(feature = "image-protocol")]
        (Dcs, None, None, b's') => GiOneshot,

        _ => return None,
    };

    let def = definition(id);
    if selector.argc < def.min_args || selector.argc > def.max_args {
        return None;
    }
    Some(id)
}

/// Resolve an OSC code to a function id. Negative codes (letter-leading
/// payload encodings) never match.
pub fn select_osc(code: i32) -> Option<FunctionId> {
    use FunctionId::*;
    match code {
        0 => Some(SetTitle),
        1 => Some(SetIcon),
        2 => Some(SetWinTitle),
        3 => Some(SetXProp),
        8 => Some(Hyperlink),
        10 => Some(ColorFg),
        11 => Some(ColorBg),
        12 => Some(ColorCursor),
        13 => Some(ColorMouseFg),
        14 => Some(ColorMouseBg),
        52 => Some(Clipboard),
        106 => Some(ColorSpecial),
        110 => Some(RColorFg),
        111 => Some(RColorBg),
        112 => Some(RColorCursor),
        113 => Some(RColorMouseFg),
        114 => Some(RColorMouseBg),
        117 => Some(RColorHighlightBg),
        119 => Some(RColorHighlightFg),
        777 => Some(Notify),
        888 => Some(DumpState),
        _ => None,
    }
}

/// Whether a function may be deferred while synchronized output (mode 2026)
/// is active. Reports, mode changes and resets must not be deferred; nearly
/// every plain screen mutation may.
pub fn is_batchable(id: FunctionId) -> bool {
    use FunctionId::*;
    matches!(
        id,
        // C0
        Bs | Tab | Lf | Vt | Ff | Cr
        // ESC
        | ScsG0Special | ScsG0UsAscii | ScsG1Special | ScsG1UsAscii
        | Decaln | Decbi | Decfi | Decrs | Decsc | Hts | Ind | Nel | Ri
        | Ss2 | Ss3
        // CSI
        | AnsiSysSc | Cbt | Cha | Cht | Cnl | Cpl | Cub | Cud | Cuf | Cup
        | Cuu | Dch | Decdc | Decic | Decscusr | Decslrm | Decstbm | Dl
        | Ech | Ed | El | Hpa | Hpr | Hvp | Ich | Il | Scosc | Sd | SetMark
        | Sgr | Su | Tbc | Vpa
        // OSC
        | Hyperlink | RColorFg | RColorBg | RColorCursor | RColorMouseFg
        | RColorMouseBg | RColorHighlightFg | RColorHighlightBg
    )
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(definition(*self).mnemonic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csi_selector(
        leader: Option<u8>,
        argc: usize,
        intermediate: Option<u8>,
        final_byte: u8,
    ) -> FunctionSelector {
        FunctionSelector {
            category: FunctionCategory::Csi,
            leader,
            argc,
            intermediate,
            final_byte,
        }
    }

    #[test]
    fn test_select_cup() {
        assert_eq!(
            select(&csi_selector(None, 2, None, b'H')),
            Some(FunctionId::Cup)
        );
        assert_eq!(
            select(&csi_selector(None, 0, None, b'H')),
            Some(FunctionId::Cup)
        );
        // over-parameterized
        assert_eq!(select(&csi_selector(None, 3, None, b'H')), None);
    }

    #[test]
    fn test_select_leader_disambiguates() {
        assert_eq!(
            select(&csi_selector(None, 0, None, b'c')),
            Some(FunctionId::Da1)
        );
        assert_eq!(
            select(&csi_selector(Some(b'>'), 0, None, b'c')),
            Some(FunctionId::Da2)
        );
        assert_eq!(
            select(&csi_selector(Some(b'='), 0, None, b'c')),
            Some(FunctionId::Da3)
        );
    }

    #[test]
    fn test_select_argc_disambiguates_scosc_decslrm() {
        assert_eq!(
            select(&csi_selector(None, 0, None, b's')),
            Some(FunctionId::Scosc)
        );
        assert_eq!(
            select(&csi_selector(None, 2, None, b's')),
            Some(FunctionId::Decslrm)
        );
        assert_eq!(select(&csi_selector(None, 1, None, b's')), None);
    }

    #[test]
    fn test_select_intermediate() {
        assert_eq!(
            select(&csi_selector(None, 0, Some(b'!'), b'p')),
            Some(FunctionId::Decstr)
        );
        assert_eq!(
            select(&csi_selector(None, 1, Some(b'$'), b'p')),
            Some(FunctionId::DecrqmAnsi)
        );
        assert_eq!(
            select(&csi_selector(Some(b'?'), 1, Some(b'$'), b'p')),
            Some(FunctionId::Decrqm)
        );
        assert_eq!(
            select(&csi_selector(None, 1, Some(b' '), b'q')),
            Some(FunctionId::Decscusr)
        );
    }

    #[test]
    fn test_select_esc() {
        let sel = FunctionSelector {
            category: FunctionCategory::Esc,
            leader: None,
            argc: 0,
            intermediate: Some(b'('),
            final_byte: b'0',
        };
        assert_eq!(select(&sel), Some(FunctionId::ScsG0Special));

        let sel = FunctionSelector {
            category: FunctionCategory::Esc,
            leader: None,
            argc: 0,
            intermediate: None,
            final_byte: b'c',
        };
        assert_eq!(select(&sel), Some(FunctionId::Ris));
    }

    #[test]
    fn test_select_dcs() {
        let sel = FunctionSelector {
            category: FunctionCategory::Dcs,
            leader: None,
            argc: 0,
            intermediate: Some(b'$'),
            final_byte: b'q',
        };
        assert_eq!(select(&sel), Some(FunctionId::Decrqss));

        let sel = FunctionSelector {
            category: FunctionCategory::Dcs,
            leader: None,
            argc: 2,
            intermediate: None,
            final_byte: b'q',
        };
        assert_eq!(select(&sel), Some(FunctionId::Decsixel));
    }

    #[test]
    fn test_select_unknown() {
        assert_eq!(select(&csi_selector(None, 0, None, b'y')), None);
        assert_eq!(select(&csi_selector(Some(b'<'), 0, None, b'H')), None);
    }

    #[test]
    fn test_select_osc() {
        assert_eq!(select_osc(8), Some(FunctionId::Hyperlink));
        assert_eq!(select_osc(52), Some(FunctionId::Clipboard));
        assert_eq!(select_osc(777), Some(FunctionId::Notify));
        assert_eq!(select_osc(7), None);
        assert_eq!(select_osc(-76), None);
    }

    #[test]
    fn test_is_batchable() {
        assert!(is_batchable(FunctionId::Sgr));
        assert!(is_batchable(FunctionId::Cup));
        assert!(is_batchable(FunctionId::Ed));
        assert!(is_batchable(FunctionId::Lf));
        assert!(is_batchable(FunctionId::Hyperlink));
        // mode changes and reports must apply immediately
        assert!(!is_batchable(FunctionId::Decsm));
        assert!(!is_batchable(FunctionId::Decrm));
        assert!(!is_batchable(FunctionId::Cpr));
        assert!(!is_batchable(FunctionId::Da1));
        assert!(!is_batchable(FunctionId::Bel));
        assert!(!is_batchable(FunctionId::Ris));
    }

    #[test]
    fn test_every_id_has_a_definition() {
        for def in FUNCTIONS {
            assert_eq!(definition(def.id).mnemonic, def.mnemonic);
        }
    }

    #[test]
    fn test_mnemonic_display() {
        assert_eq!(FunctionId::Cup.to_string(), "CUP");
        assert_eq!(FunctionId::Decsixel.to_string(), "DECSIXEL");
    }
}
