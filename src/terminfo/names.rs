//! Canonical terminfo capability names and their aliases.
//!
//! Every standard capability has a long name (`cursor_address`), a terminfo
//! short name (`cup`) and a two-letter termcap code (`cm`). The enums below
//! list them in the order the compiled terminfo format stores them, so a
//! variant's discriminant is its slot in the binary tables.
//!
//! Lookup is case-sensitive. When one spelling is claimed by several
//! capabilities, long names win over terminfo names, which win over termcap
//! codes.

use std::collections::HashMap;
use std::sync::OnceLock;

macro_rules! capabilities {
    (
        $(#[$meta:meta])*
        $enum:ident {
            $($variant:ident = $long:literal, $info:literal, $cap:literal;)*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u16)]
        pub enum $enum {
            $($variant,)*
        }

        impl $enum {
            /// All capabilities in binary-table order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];

            /// Number of standard capabilities of this kind.
            pub const COUNT: usize = Self::ALL.len();

            /// Long (canonical) name.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $long,)*
                }
            }

            /// Terminfo short name.
            #[must_use]
            pub const fn info_name(self) -> &'static str {
                match self {
                    $(Self::$variant => $info,)*
                }
            }

            /// Two-letter termcap code.
            #[must_use]
            pub const fn termcap_name(self) -> &'static str {
                match self {
                    $(Self::$variant => $cap,)*
                }
            }

            /// Slot in the compiled terminfo table.
            #[must_use]
            pub const fn index(self) -> usize {
                self as usize
            }

            /// Capability stored at a binary-table slot.
            #[must_use]
            pub fn from_index(index: usize) -> Option<Self> {
                Self::ALL.get(index).copied()
            }
        }
    };
}

capabilities! {
    /// Boolean capabilities.
    BooleanCap {
        AutoLeftMargin = "auto_left_margin", "bw", "bw";
        AutoRightMargin = "auto_right_margin", "am", "am";
        NoEscCtlc = "no_esc_ctlc", "xsb", "xb";
        CeolStandoutGlitch = "ceol_standout_glitch", "xhp", "xs";
        EatNewlineGlitch = "eat_newline_glitch", "xenl", "xn";
        EraseOverstrike = "erase_overstrike", "eo", "eo";
        GenericType = "generic_type", "gn", "gn";
        HardCopy = "hard_copy", "hc", "hc";
        HasMetaKey = "has_meta_key", "km", "km";
        HasStatusLine = "has_status_line", "hs", "hs";
        InsertNullGlitch = "insert_null_glitch", "in", "in";
        MemoryAbove = "memory_above", "da", "da";
        MemoryBelow = "memory_below", "db", "db";
        MoveInsertMode = "move_insert_mode", "mir", "mi";
        MoveStandoutMode = "move_standout_mode", "msgr", "ms";
        OverStrike = "over_strike", "os", "os";
        StatusLineEscOk = "status_line_esc_ok", "eslok", "es";
        DestTabsMagicSmso = "dest_tabs_magic_smso", "xt", "xt";
        TildeGlitch = "tilde_glitch", "hz", "hz";
        TransparentUnderline = "transparent_underline", "ul", "ul";
        XonXoff = "xon_xoff", "xon", "xo";
        NeedsXonXoff = "needs_xon_xoff", "nxon", "nx";
        PrtrSilent = "prtr_silent", "mc5i", "5i";
        HardCursor = "hard_cursor", "chts", "HC";
        NonRevRmcup = "non_rev_rmcup", "nrrmc", "NR";
        NoPadChar = "no_pad_char", "npc", "NP";
        NonDestScrollRegion = "non_dest_scroll_region", "ndscr", "ND";
        CanChange = "can_change", "ccc", "cc";
        BackColorErase = "back_color_erase", "bce", "ut";
        HueLightnessSaturation = "hue_lightness_saturation", "hls", "hl";
        ColAddrGlitch = "col_addr_glitch", "xhpa", "YA";
        CrCancelsMicroMode = "cr_cancels_micro_mode", "crxm", "YB";
        HasPrintWheel = "has_print_wheel", "daisy", "YC";
        RowAddrGlitch = "row_addr_glitch", "xvpa", "YD";
        SemiAutoRightMargin = "semi_auto_right_margin", "sam", "YE";
        CpiChangesRes = "cpi_changes_res", "cpix", "YF";
        LpiChangesRes = "lpi_changes_res", "lpix", "YG";
        BackspacesWithBs = "backspaces_with_bs", "OTbs", "bs";
        CrtNoScrolling = "crt_no_scrolling", "OTns", "ns";
        NoCorrectlyWorkingCr = "no_correctly_working_cr", "OTnc", "nc";
        GnuHasMetaKey = "gnu_has_meta_key", "OTMT", "MT";
        LinefeedIsNewline = "linefeed_is_newline", "OTNL", "NL";
        HasHardwareTabs = "has_hardware_tabs", "OTpt", "pt";
        ReturnDoesClrEol = "return_does_clr_eol", "OTxr", "xr";
    }
}

capabilities! {
    /// Numeric capabilities.
    NumberCap {
        Columns = "columns", "cols", "co";
        InitTabs = "init_tabs", "it", "it";
        Lines = "lines", "lines", "li";
        LinesOfMemory = "lines_of_memory", "lm", "lm";
        MagicCookieGlitch = "magic_cookie_glitch", "xmc", "sg";
        PaddingBaudRate = "padding_baud_rate", "pb", "pb";
        VirtualTerminal = "virtual_terminal", "vt", "vt";
        WidthStatusLine = "width_status_line", "wsl", "ws";
        NumLabels = "num_labels", "nlab", "Nl";
        LabelHeight = "label_height", "lh", "lh";
        LabelWidth = "label_width", "lw", "lw";
        MaxAttributes = "max_attributes", "ma", "ma";
        MaximumWindows = "maximum_windows", "wnum", "MW";
        MaxColors = "max_colors", "colors", "Co";
        MaxPairs = "max_pairs", "pairs", "pa";
        NoColorVideo = "no_color_video", "ncv", "NC";
        BufferCapacity = "buffer_capacity", "bufsz", "Ya";
        DotVertSpacing = "dot_vert_spacing", "spinv", "Yb";
        DotHorzSpacing = "dot_horz_spacing", "spinh", "Yc";
        MaxMicroAddress = "max_micro_address", "maddr", "Yd";
        MaxMicroJump = "max_micro_jump", "mjump", "Ye";
        MicroColSize = "micro_col_size", "mcs", "Yf";
        MicroLineSize = "micro_line_size", "mls", "Yg";
        NumberOfPins = "number_of_pins", "npins", "Yh";
        OutputResChar = "output_res_char", "orc", "Yi";
        OutputResLine = "output_res_line", "orl", "Yj";
        OutputResHorzInch = "output_res_horz_inch", "orhi", "Yk";
        OutputResVertInch = "output_res_vert_inch", "orvi", "Yl";
        PrintRate = "print_rate", "cps", "Ym";
        WideCharSize = "wide_char_size", "widcs", "Yn";
        Buttons = "buttons", "btns", "BT";
        BitImageEntwining = "bit_image_entwining", "bitwin", "Yo";
        BitImageType = "bit_image_type", "bitype", "Yp";
        MagicCookieGlitchUl = "magic_cookie_glitch_ul", "OTug", "ug";
        CarriageReturnDelay = "carriage_return_delay", "OTdC", "dC";
        NewLineDelay = "new_line_delay", "OTdN", "dN";
        BackspaceDelay = "backspace_delay", "OTdB", "dB";
        HorizontalTabDelay = "horizontal_tab_delay", "OTdT", "dT";
        NumberOfFunctionKeys = "number_of_function_keys", "OTkn", "kn";
    }
}

capabilities! {
    /// String capabilities.
    StringCap {
        BackTab = "back_tab", "cbt", "bt";
        Bell = "bell", "bel", "bl";
        CarriageReturn = "carriage_return", "cr", "cr";
        ChangeScrollRegion = "change_scroll_region", "csr", "cs";
        ClearAllTabs = "clear_all_tabs", "tbc", "ct";
        ClearScreen = "clear_screen", "clear", "cl";
        ClrEol = "clr_eol", "el", "ce";
        ClrEos = "clr_eos", "ed", "cd";
        ColumnAddress = "column_address", "hpa", "ch";
        CommandCharacter = "command_character", "cmdch", "CC";
        CursorAddress = "cursor_address", "cup", "cm";
        CursorDown = "cursor_down", "cud1", "do";
        CursorHome = "cursor_home", "home", "ho";
        CursorInvisible = "cursor_invisible", "civis", "vi";
        CursorLeft = "cursor_left", "cub1", "le";
        CursorMemAddress = "cursor_mem_address", "mrcup", "CM";
        CursorNormal = "cursor_normal", "cnorm", "ve";
        CursorRight = "cursor_right", "cuf1", "nd";
        CursorToLl = "cursor_to_ll", "ll", "ll";
        CursorUp = "cursor_up", "cuu1", "up";
        CursorVisible = "cursor_visible", "cvvis", "vs";
        DeleteCharacter = "delete_character", "dch1", "dc";
        DeleteLine = "delete_line", "dl1", "dl";
        DisStatusLine = "dis_status_line", "dsl", "ds";
        DownHalfLine = "down_half_line", "hd", "hd";
        EnterAltCharsetMode = "enter_alt_charset_mode", "smacs", "as";
        EnterBlinkMode = "enter_blink_mode", "blink", "mb";
        EnterBoldMode = "enter_bold_mode", "bold", "md";
        EnterCaMode = "enter_ca_mode", "smcup", "ti";
        EnterDeleteMode = "enter_delete_mode", "smdc", "dm";
        EnterDimMode = "enter_dim_mode", "dim", "mh";
        EnterInsertMode = "enter_insert_mode", "smir", "im";
        EnterSecureMode = "enter_secure_mode", "invis", "mk";
        EnterProtectedMode = "enter_protected_mode", "prot", "mp";
        EnterReverseMode = "enter_reverse_mode", "rev", "mr";
        EnterStandoutMode = "enter_standout_mode", "smso", "so";
        EnterUnderlineMode = "enter_underline_mode", "smul", "us";
        EraseChars = "erase_chars", "ech", "ec";
        ExitAltCharsetMode = "exit_alt_charset_mode", "rmacs", "ae";
        ExitAttributeMode = "exit_attribute_mode", "sgr0", "me";
        ExitCaMode = "exit_ca_mode", "rmcup", "te";
        ExitDeleteMode = "exit_delete_mode", "rmdc", "ed";
        ExitInsertMode = "exit_insert_mode", "rmir", "ei";
        ExitStandoutMode = "exit_standout_mode", "rmso", "se";
        ExitUnderlineMode = "exit_underline_mode", "rmul", "ue";
        FlashScreen = "flash_screen", "flash", "vb";
        FormFeed = "form_feed", "ff", "ff";
        FromStatusLine = "from_status_line", "fsl", "fs";
        Init1string = "init_1string", "is1", "i1";
        Init2string = "init_2string", "is2", "is";
        Init3string = "init_3string", "is3", "i3";
        InitFile = "init_file", "if", "if";
        InsertCharacter = "insert_character", "ich1", "ic";
        InsertLine = "insert_line", "il1", "al";
        InsertPadding = "insert_padding", "ip", "ip";
        KeyBackspace = "key_backspace", "kbs", "kb";
        KeyCatab = "key_catab", "ktbc", "ka";
        KeyClear = "key_clear", "kclr", "kC";
        KeyCtab = "key_ctab", "kctab", "kt";
        KeyDc = "key_dc", "kdch1", "kD";
        KeyDl = "key_dl", "kdl1", "kL";
        KeyDown = "key_down", "kcud1", "kd";
        KeyEic = "key_eic", "krmir", "kM";
        KeyEol = "key_eol", "kel", "kE";
        KeyEos = "key_eos", "ked", "kS";
        KeyF0 = "key_f0", "kf0", "k0";
        KeyF1 = "key_f1", "kf1", "k1";
        KeyF10 = "key_f10", "kf10", "k;";
        KeyF2 = "key_f2", "kf2", "k2";
        KeyF3 = "key_f3", "kf3", "k3";
        KeyF4 = "key_f4", "kf4", "k4";
        KeyF5 = "key_f5", "kf5", "k5";
        KeyF6 = "key_f6", "kf6", "k6";
        KeyF7 = "key_f7", "kf7", "k7";
        KeyF8 = "key_f8", "kf8", "k8";
        KeyF9 = "key_f9", "kf9", "k9";
        KeyHome = "key_home", "khome", "kh";
        KeyIc = "key_ic", "kich1", "kI";
        KeyIl = "key_il", "kil1", "kA";
        KeyLeft = "key_left", "kcub1", "kl";
        KeyLl = "key_ll", "kll", "kH";
        KeyNpage = "key_npage", "knp", "kN";
        KeyPpage = "key_ppage", "kpp", "kP";
        KeyRight = "key_right", "kcuf1", "kr";
        KeySf = "key_sf", "kind", "kF";
        KeySr = "key_sr", "kri", "kR";
        KeyStab = "key_stab", "khts", "kT";
        KeyUp = "key_up", "kcuu1", "ku";
        KeypadLocal = "keypad_local", "rmkx", "ke";
        KeypadXmit = "keypad_xmit", "smkx", "ks";
        LabF0 = "lab_f0", "lf0", "l0";
        LabF1 = "lab_f1", "lf1", "l1";
        LabF10 = "lab_f10", "lf10", "la";
        LabF2 = "lab_f2", "lf2", "l2";
        LabF3 = "lab_f3", "lf3", "l3";
        LabF4 = "lab_f4", "lf4", "l4";
        LabF5 = "lab_f5", "lf5", "l5";
        LabF6 = "lab_f6", "lf6", "l6";
        LabF7 = "lab_f7", "lf7", "l7";
        LabF8 = "lab_f8", "lf8", "l8";
        LabF9 = "lab_f9", "lf9", "l9";
        MetaOff = "meta_off", "rmm", "mo";
        MetaOn = "meta_on", "smm", "mm";
        Newline = "newline", "nel", "nw";
        PadChar = "pad_char", "pad", "pc";
        ParmDch = "parm_dch", "dch", "DC";
        ParmDeleteLine = "parm_delete_line", "dl", "DL";
        ParmDownCursor = "parm_down_cursor", "cud", "DO";
        ParmIch = "parm_ich", "ich", "IC";
        ParmIndex = "parm_index", "indn", "SF";
        ParmInsertLine = "parm_insert_line", "il", "AL";
        ParmLeftCursor = "parm_left_cursor", "cub", "LE";
        ParmRightCursor = "parm_right_cursor", "cuf", "RI";
        ParmRindex = "parm_rindex", "rin", "SR";
        ParmUpCursor = "parm_up_cursor", "cuu", "UP";
        PkeyKey = "pkey_key", "pfkey", "pk";
        PkeyLocal = "pkey_local", "pfloc", "pl";
        PkeyXmit = "pkey_xmit", "pfx", "px";
        PrintScreen = "print_screen", "mc0", "ps";
        PrtrOff = "prtr_off", "mc4", "pf";
        PrtrOn = "prtr_on", "mc5", "po";
        RepeatChar = "repeat_char", "rep", "rp";
        Reset1string = "reset_1string", "rs1", "r1";
        Reset2string = "reset_2string", "rs2", "r2";
        Reset3string = "reset_3string", "rs3", "r3";
        ResetFile = "reset_file", "rf", "rf";
        RestoreCursor = "restore_cursor", "rc", "rc";
        RowAddress = "row_address", "vpa", "cv";
        SaveCursor = "save_cursor", "sc", "sc";
        ScrollForward = "scroll_forward", "ind", "sf";
        ScrollReverse = "scroll_reverse", "ri", "sr";
        SetAttributes = "set_attributes", "sgr", "sa";
        SetTab = "set_tab", "hts", "st";
        SetWindow = "set_window", "wind", "wi";
        Tab = "tab", "ht", "ta";
        ToStatusLine = "to_status_line", "tsl", "ts";
        UnderlineChar = "underline_char", "uc", "uc";
        UpHalfLine = "up_half_line", "hu", "hu";
        InitProg = "init_prog", "iprog", "iP";
        KeyA1 = "key_a1", "ka1", "K1";
        KeyA3 = "key_a3", "ka3", "K3";
        KeyB2 = "key_b2", "kb2", "K2";
        KeyC1 = "key_c1", "kc1", "K4";
        KeyC3 = "key_c3", "kc3", "K5";
        PrtrNon = "prtr_non", "mc5p", "pO";
        CharPadding = "char_padding", "rmp", "rP";
        AcsChars = "acs_chars", "acsc", "ac";
        PlabNorm = "plab_norm", "pln", "pn";
        KeyBtab = "key_btab", "kcbt", "kB";
        EnterXonMode = "enter_xon_mode", "smxon", "SX";
        ExitXonMode = "exit_xon_mode", "rmxon", "RX";
        EnterAmMode = "enter_am_mode", "smam", "SA";
        ExitAmMode = "exit_am_mode", "rmam", "RA";
        XonCharacter = "xon_character", "xonc", "XN";
        XoffCharacter = "xoff_character", "xoffc", "XF";
        EnaAcs = "ena_acs", "enacs", "eA";
        LabelOn = "label_on", "smln", "LO";
        LabelOff = "label_off", "rmln", "LF";
        KeyBeg = "key_beg", "kbeg", "@1";
        KeyCancel = "key_cancel", "kcan", "@2";
        KeyClose = "key_close", "kclo", "@3";
        KeyCommand = "key_command", "kcmd", "@4";
        KeyCopy = "key_copy", "kcpy", "@5";
        KeyCreate = "key_create", "kcrt", "@6";
        KeyEnd = "key_end", "kend", "@7";
        KeyEnter = "key_enter", "kent", "@8";
        KeyExit = "key_exit", "kext", "@9";
        KeyFind = "key_find", "kfnd", "@0";
        KeyHelp = "key_help", "khlp", "%1";
        KeyMark = "key_mark", "kmrk", "%2";
        KeyMessage = "key_message", "kmsg", "%3";
        KeyMove = "key_move", "kmov", "%4";
        KeyNext = "key_next", "knxt", "%5";
        KeyOpen = "key_open", "kopn", "%6";
        KeyOptions = "key_options", "kopt", "%7";
        KeyPrevious = "key_previous", "kprv", "%8";
        KeyPrint = "key_print", "kprt", "%9";
        KeyRedo = "key_redo", "krdo", "%0";
        KeyReference = "key_reference", "kref", "&1";
        KeyRefresh = "key_refresh", "krfr", "&2";
        KeyReplace = "key_replace", "krpl", "&3";
        KeyRestart = "key_restart", "krst", "&4";
        KeyResume = "key_resume", "kres", "&5";
        KeySave = "key_save", "ksav", "&6";
        KeySuspend = "key_suspend", "kspd", "&7";
        KeyUndo = "key_undo", "kund", "&8";
        KeySbeg = "key_sbeg", "kBEG", "&9";
        KeyScancel = "key_scancel", "kCAN", "&0";
        KeyScommand = "key_scommand", "kCMD", "*1";
        KeyScopy = "key_scopy", "kCPY", "*2";
        KeyScreate = "key_screate", "kCRT", "*3";
        KeySdc = "key_sdc", "kDC", "*4";
        KeySdl = "key_sdl", "kDL", "*5";
        KeySelect = "key_select", "kslt", "*6";
        KeySend = "key_send", "kEND", "*7";
        KeySeol = "key_seol", "kEOL", "*8";
        KeySexit = "key_sexit", "kEXT", "*9";
        KeySfind = "key_sfind", "kFND", "*0";
        KeyShelp = "key_shelp", "kHLP", "#1";
        KeyShome = "key_shome", "kHOM", "#2";
        KeySic = "key_sic", "kIC", "#3";
        KeySleft = "key_sleft", "kLFT", "#4";
        KeySmessage = "key_smessage", "kMSG", "%a";
        KeySmove = "key_smove", "kMOV", "%b";
        KeySnext = "key_snext", "kNXT", "%c";
        KeySoptions = "key_soptions", "kOPT", "%d";
        KeySprevious = "key_sprevious", "kPRV", "%e";
        KeySprint = "key_sprint", "kPRT", "%f";
        KeySredo = "key_sredo", "kRDO", "%g";
        KeySreplace = "key_sreplace", "kRPL", "%h";
        KeySright = "key_sright", "kRIT", "%i";
        KeySrsume = "key_srsume", "kRES", "%j";
        KeySsave = "key_ssave", "kSAV", "!1";
        KeySsuspend = "key_ssuspend", "kSPD", "!2";
        KeySundo = "key_sundo", "kUND", "!3";
        ReqForInput = "req_for_input", "rfi", "RF";
        KeyF11 = "key_f11", "kf11", "F1";
        KeyF12 = "key_f12", "kf12", "F2";
        KeyF13 = "key_f13", "kf13", "F3";
        KeyF14 = "key_f14", "kf14", "F4";
        KeyF15 = "key_f15", "kf15", "F5";
        KeyF16 = "key_f16", "kf16", "F6";
        KeyF17 = "key_f17", "kf17", "F7";
        KeyF18 = "key_f18", "kf18", "F8";
        KeyF19 = "key_f19", "kf19", "F9";
        KeyF20 = "key_f20", "kf20", "FA";
        KeyF21 = "key_f21", "kf21", "FB";
        KeyF22 = "key_f22", "kf22", "FC";
        KeyF23 = "key_f23", "kf23", "FD";
        KeyF24 = "key_f24", "kf24", "FE";
        KeyF25 = "key_f25", "kf25", "FF";
        KeyF26 = "key_f26", "kf26", "FG";
        KeyF27 = "key_f27", "kf27", "FH";
        KeyF28 = "key_f28", "kf28", "FI";
        KeyF29 = "key_f29", "kf29", "FJ";
        KeyF30 = "key_f30", "kf30", "FK";
        KeyF31 = "key_f31", "kf31", "FL";
        KeyF32 = "key_f32", "kf32", "FM";
        KeyF33 = "key_f33", "kf33", "FN";
        KeyF34 = "key_f34", "kf34", "FO";
        KeyF35 = "key_f35", "kf35", "FP";
        KeyF36 = "key_f36", "kf36", "FQ";
        KeyF37 = "key_f37", "kf37", "FR";
        KeyF38 = "key_f38", "kf38", "FS";
        KeyF39 = "key_f39", "kf39", "FT";
        KeyF40 = "key_f40", "kf40", "FU";
        KeyF41 = "key_f41", "kf41", "FV";
        KeyF42 = "key_f42", "kf42", "FW";
        KeyF43 = "key_f43", "kf43", "FX";
        KeyF44 = "key_f44", "kf44", "FY";
        KeyF45 = "key_f45", "kf45", "FZ";
        KeyF46 = "key_f46", "kf46", "Fa";
        KeyF47 = "key_f47", "kf47", "Fb";
        KeyF48 = "key_f48", "kf48", "Fc";
        KeyF49 = "key_f49", "kf49", "Fd";
        KeyF50 = "key_f50", "kf50", "Fe";
        KeyF51 = "key_f51", "kf51", "Ff";
        KeyF52 = "key_f52", "kf52", "Fg";
        KeyF53 = "key_f53", "kf53", "Fh";
        KeyF54 = "key_f54", "kf54", "Fi";
        KeyF55 = "key_f55", "kf55", "Fj";
        KeyF56 = "key_f56", "kf56", "Fk";
        KeyF57 = "key_f57", "kf57", "Fl";
        KeyF58 = "key_f58", "kf58", "Fm";
        KeyF59 = "key_f59", "kf59", "Fn";
        KeyF60 = "key_f60", "kf60", "Fo";
        KeyF61 = "key_f61", "kf61", "Fp";
        KeyF62 = "key_f62", "kf62", "Fq";
        KeyF63 = "key_f63", "kf63", "Fr";
        ClrBol = "clr_bol", "el1", "cb";
        ClearMargins = "clear_margins", "mgc", "MC";
        SetLeftMargin = "set_left_margin", "smgl", "ML";
        SetRightMargin = "set_right_margin", "smgr", "MR";
        LabelFormat = "label_format", "fln", "Lf";
        SetClock = "set_clock", "sclk", "SC";
        DisplayClock = "display_clock", "dclk", "DK";
        RemoveClock = "remove_clock", "rmclk", "RC";
        CreateWindow = "create_window", "cwin", "CW";
        GotoWindow = "goto_window", "wingo", "WG";
        Hangup = "hangup", "hup", "HU";
        DialPhone = "dial_phone", "dial", "DI";
        QuickDial = "quick_dial", "qdial", "QD";
        Tone = "tone", "tone", "TO";
        Pulse = "pulse", "pulse", "PU";
        FlashHook = "flash_hook", "hook", "fh";
        FixedPause = "fixed_pause", "pause", "PA";
        WaitTone = "wait_tone", "wait", "WA";
        User0 = "user0", "u0", "u0";
        User1 = "user1", "u1", "u1";
        User2 = "user2", "u2", "u2";
        User3 = "user3", "u3", "u3";
        User4 = "user4", "u4", "u4";
        User5 = "user5", "u5", "u5";
        User6 = "user6", "u6", "u6";
        User7 = "user7", "u7", "u7";
        User8 = "user8", "u8", "u8";
        User9 = "user9", "u9", "u9";
        OrigPair = "orig_pair", "op", "op";
        OrigColors = "orig_colors", "oc", "oc";
        InitializeColor = "initialize_color", "initc", "Ic";
        InitializePair = "initialize_pair", "initp", "Ip";
        SetColorPair = "set_color_pair", "scp", "sp";
        SetForeground = "set_foreground", "setf", "Sf";
        SetBackground = "set_background", "setb", "Sb";
        ChangeCharPitch = "change_char_pitch", "cpi", "ZA";
        ChangeLinePitch = "change_line_pitch", "lpi", "ZB";
        ChangeResHorz = "change_res_horz", "chr", "ZC";
        ChangeResVert = "change_res_vert", "cvr", "ZD";
        DefineChar = "define_char", "defc", "ZE";
        EnterDoublewideMode = "enter_doublewide_mode", "swidm", "ZF";
        EnterDraftQuality = "enter_draft_quality", "sdrfq", "ZG";
        EnterItalicsMode = "enter_italics_mode", "sitm", "ZH";
        EnterLeftwardMode = "enter_leftward_mode", "slm", "ZI";
        EnterMicroMode = "enter_micro_mode", "smicm", "ZJ";
        EnterNearLetterQuality = "enter_near_letter_quality", "snlq", "ZK";
        EnterNormalQuality = "enter_normal_quality", "snrmq", "ZL";
        EnterShadowMode = "enter_shadow_mode", "sshm", "ZM";
        EnterSubscriptMode = "enter_subscript_mode", "ssubm", "ZN";
        EnterSuperscriptMode = "enter_superscript_mode", "ssupm", "ZO";
        EnterUpwardMode = "enter_upward_mode", "sum", "ZP";
        ExitDoublewideMode = "exit_doublewide_mode", "rwidm", "ZQ";
        ExitItalicsMode = "exit_italics_mode", "ritm", "ZR";
        ExitLeftwardMode = "exit_leftward_mode", "rlm", "ZS";
        ExitMicroMode = "exit_micro_mode", "rmicm", "ZT";
        ExitShadowMode = "exit_shadow_mode", "rshm", "ZU";
        ExitSubscriptMode = "exit_subscript_mode", "rsubm", "ZV";
        ExitSuperscriptMode = "exit_superscript_mode", "rsupm", "ZW";
        ExitUpwardMode = "exit_upward_mode", "rum", "ZX";
        MicroColumnAddress = "micro_column_address", "mhpa", "ZY";
        MicroDown = "micro_down", "mcud1", "ZZ";
        MicroLeft = "micro_left", "mcub1", "Za";
        MicroRight = "micro_right", "mcuf1", "Zb";
        MicroRowAddress = "micro_row_address", "mvpa", "Zc";
        MicroUp = "micro_up", "mcuu1", "Zd";
        OrderOfPins = "order_of_pins", "porder", "Ze";
        ParmDownMicro = "parm_down_micro", "mcud", "Zf";
        ParmLeftMicro = "parm_left_micro", "mcub", "Zg";
        ParmRightMicro = "parm_right_micro", "mcuf", "Zh";
        ParmUpMicro = "parm_up_micro", "mcuu", "Zi";
        SelectCharSet = "select_char_set", "scs", "Zj";
        SetBottomMargin = "set_bottom_margin", "smgb", "Zk";
        SetBottomMarginParm = "set_bottom_margin_parm", "smgbp", "Zl";
        SetLeftMarginParm = "set_left_margin_parm", "smglp", "Zm";
        SetRightMarginParm = "set_right_margin_parm", "smgrp", "Zn";
        SetTopMargin = "set_top_margin", "smgt", "Zo";
        SetTopMarginParm = "set_top_margin_parm", "smgtp", "Zp";
        StartBitImage = "start_bit_image", "sbim", "Zq";
        StartCharSetDef = "start_char_set_def", "scsd", "Zr";
        StopBitImage = "stop_bit_image", "rbim", "Zs";
        StopCharSetDef = "stop_char_set_def", "rcsd", "Zt";
        SubscriptCharacters = "subscript_characters", "subcs", "Zu";
        SuperscriptCharacters = "superscript_characters", "supcs", "Zv";
        TheseCauseCr = "these_cause_cr", "docr", "Zw";
        ZeroMotion = "zero_motion", "zerom", "Zx";
        CharSetNames = "char_set_names", "csnm", "Zy";
        KeyMouse = "key_mouse", "kmous", "Km";
        MouseInfo = "mouse_info", "minfo", "Mi";
        ReqMousePos = "req_mouse_pos", "reqmp", "RQ";
        GetMouse = "get_mouse", "getm", "Gm";
        SetAForeground = "set_a_foreground", "setaf", "AF";
        SetABackground = "set_a_background", "setab", "AB";
        PkeyPlab = "pkey_plab", "pfxl", "xl";
        DeviceType = "device_type", "devt", "dv";
        CodeSetInit = "code_set_init", "csin", "ci";
        Set0DesSeq = "set0_des_seq", "s0ds", "s0";
        Set1DesSeq = "set1_des_seq", "s1ds", "s1";
        Set2DesSeq = "set2_des_seq", "s2ds", "s2";
        Set3DesSeq = "set3_des_seq", "s3ds", "s3";
        SetLrMargin = "set_lr_margin", "smglr", "ML";
        SetTbMargin = "set_tb_margin", "smgtb", "MT";
        BitImageRepeat = "bit_image_repeat", "birep", "Xy";
        BitImageNewline = "bit_image_newline", "binel", "Zz";
        BitImageCarriageReturn = "bit_image_carriage_return", "bicr", "Yv";
        ColorNames = "color_names", "colornm", "Yw";
        DefineBitImageRegion = "define_bit_image_region", "defbi", "Yx";
        EndBitImageRegion = "end_bit_image_region", "endbi", "Yy";
        SetColorBand = "set_color_band", "setcolor", "Yz";
        SetPageLength = "set_page_length", "slines", "YZ";
        DisplayPcChar = "display_pc_char", "dispc", "S1";
        EnterPcCharsetMode = "enter_pc_charset_mode", "smpch", "S2";
        ExitPcCharsetMode = "exit_pc_charset_mode", "rmpch", "S3";
        EnterScancodeMode = "enter_scancode_mode", "smsc", "S4";
        ExitScancodeMode = "exit_scancode_mode", "rmsc", "S5";
        PcTermOptions = "pc_term_options", "pctrm", "S6";
        ScancodeEscape = "scancode_escape", "scesc", "S7";
        AltScancodeEsc = "alt_scancode_esc", "scesa", "S8";
        EnterHorizontalHlMode = "enter_horizontal_hl_mode", "ehhlm", "Xh";
        EnterLeftHlMode = "enter_left_hl_mode", "elhlm", "Xl";
        EnterLowHlMode = "enter_low_hl_mode", "elohlm", "Xo";
        EnterRightHlMode = "enter_right_hl_mode", "erhlm", "Xr";
        EnterTopHlMode = "enter_top_hl_mode", "ethlm", "Xt";
        EnterVerticalHlMode = "enter_vertical_hl_mode", "evhlm", "Xv";
        SetAAttributes = "set_a_attributes", "sgr1", "sA";
        SetPglenInch = "set_pglen_inch", "slength", "sL";
        TermcapInit2 = "termcap_init2", "OTi2", "i2";
        TermcapReset = "termcap_reset", "OTrs", "rs";
        LinefeedIfNotLf = "linefeed_if_not_lf", "OTnl", "nl";
        BackspaceIfNotBs = "backspace_if_not_bs", "OTbc", "bc";
        OtherNonFunctionKeys = "other_non_function_keys", "OTko", "ko";
        ArrowKeyMap = "arrow_key_map", "OTma", "ma";
        AcsUlcorner = "acs_ulcorner", "OTG2", "G2";
        AcsLlcorner = "acs_llcorner", "OTG3", "G3";
        AcsUrcorner = "acs_urcorner", "OTG1", "G1";
        AcsLrcorner = "acs_lrcorner", "OTG4", "G4";
        AcsLtee = "acs_ltee", "OTGR", "GR";
        AcsRtee = "acs_rtee", "OTGL", "GL";
        AcsBtee = "acs_btee", "OTGU", "GU";
        AcsTtee = "acs_ttee", "OTGD", "GD";
        AcsHline = "acs_hline", "OTGH", "GH";
        AcsVline = "acs_vline", "OTGV", "GV";
        AcsPlus = "acs_plus", "OTGC", "GC";
        MemoryLock = "memory_lock", "meml", "ml";
        MemoryUnlock = "memory_unlock", "memu", "mu";
        BoxChars1 = "box_chars_1", "box1", "bx";
    }
}

/// A standard capability of any kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CapName {
    Boolean(BooleanCap),
    Number(NumberCap),
    String(StringCap),
}

impl CapName {
    /// Long (canonical) name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Boolean(c) => c.name(),
            Self::Number(c) => c.name(),
            Self::String(c) => c.name(),
        }
    }
}

impl From<BooleanCap> for CapName {
    fn from(cap: BooleanCap) -> Self {
        Self::Boolean(cap)
    }
}

impl From<NumberCap> for CapName {
    fn from(cap: NumberCap) -> Self {
        Self::Number(cap)
    }
}

impl From<StringCap> for CapName {
    fn from(cap: StringCap) -> Self {
        Self::String(cap)
    }
}

struct AliasTables {
    any: HashMap<&'static str, CapName>,
    termcap_bool: HashMap<&'static str, BooleanCap>,
    termcap_num: HashMap<&'static str, NumberCap>,
    termcap_str: HashMap<&'static str, StringCap>,
}

fn alias_tables() -> &'static AliasTables {
    static TABLES: OnceLock<AliasTables> = OnceLock::new();
    TABLES.get_or_init(|| {
        let mut any = HashMap::with_capacity(3 * (BooleanCap::COUNT + NumberCap::COUNT + StringCap::COUNT));
        let mut termcap_bool = HashMap::with_capacity(BooleanCap::COUNT);
        let mut termcap_num = HashMap::with_capacity(NumberCap::COUNT);
        let mut termcap_str = HashMap::with_capacity(StringCap::COUNT);

        for &c in BooleanCap::ALL {
            termcap_bool.entry(c.termcap_name()).or_insert(c);
        }
        for &c in NumberCap::ALL {
            termcap_num.entry(c.termcap_name()).or_insert(c);
        }
        for &c in StringCap::ALL {
            termcap_str.entry(c.termcap_name()).or_insert(c);
        }

        // Lowest priority first; later passes overwrite.
        for (&code, &c) in &termcap_str {
            any.insert(code, CapName::String(c));
        }
        for (&code, &c) in &termcap_num {
            any.insert(code, CapName::Number(c));
        }
        for (&code, &c) in &termcap_bool {
            any.insert(code, CapName::Boolean(c));
        }
        for &c in StringCap::ALL {
            any.insert(c.info_name(), CapName::String(c));
        }
        for &c in NumberCap::ALL {
            any.insert(c.info_name(), CapName::Number(c));
        }
        for &c in BooleanCap::ALL {
            any.insert(c.info_name(), CapName::Boolean(c));
        }
        for &c in StringCap::ALL {
            any.insert(c.name(), CapName::String(c));
        }
        for &c in NumberCap::ALL {
            any.insert(c.name(), CapName::Number(c));
        }
        for &c in BooleanCap::ALL {
            any.insert(c.name(), CapName::Boolean(c));
        }

        AliasTables {
            any,
            termcap_bool,
            termcap_num,
            termcap_str,
        }
    })
}

/// Resolve a long name, terminfo name or termcap code to a capability.
#[must_use]
pub fn lookup(name: &str) -> Option<CapName> {
    alias_tables().any.get(name).copied()
}

impl BooleanCap {
    /// Resolve a termcap boolean code.
    #[must_use]
    pub fn from_termcap(code: &str) -> Option<Self> {
        alias_tables().termcap_bool.get(code).copied()
    }

    /// Resolve a long or terminfo name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match lookup(name) {
            Some(CapName::Boolean(c)) if c.name() == name || c.info_name() == name => Some(c),
            _ => None,
        }
    }
}

impl NumberCap {
    /// Resolve a termcap numeric code.
    #[must_use]
    pub fn from_termcap(code: &str) -> Option<Self> {
        alias_tables().termcap_num.get(code).copied()
    }

    /// Resolve a long or terminfo name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match lookup(name) {
            Some(CapName::Number(c)) if c.name() == name || c.info_name() == name => Some(c),
            _ => None,
        }
    }
}

impl StringCap {
    /// Resolve a termcap string code.
    #[must_use]
    pub fn from_termcap(code: &str) -> Option<Self> {
        alias_tables().termcap_str.get(code).copied()
    }

    /// Resolve a long or terminfo name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match lookup(name) {
            Some(CapName::String(c)) if c.name() == name || c.info_name() == name => Some(c),
            _ => None,
        }
    }
}
