//! Block-context tracking shared by the reader and the writer.
//!
//! niri's `config.kdl` is a nested, brace-delimited document.  nirimatic
//! does not parse it; it walks the file one physical line at a time and
//! keeps just enough context to know which block a line belongs to:
//!
//! ```text
//! input {                       BlockState::Input
//!     focus-follows-mouse
//! }
//! layout {                      BlockState::Layout
//!     gaps 16
//!     border {                  BlockState::LayoutBorder
//!         width 2
//!     }
//!     shadow {                  BlockState::LayoutShadow
//!         on
//!     }
//! }
//! ```
//!
//! Both [`reader`](super::reader) and [`writer`](super::writer) drive the
//! same [`Scanner`], so they cannot disagree about what is "inside" a block.
//!
//! # Transition rules
//!
//! For every line, after trimming:
//!
//! 1. Blank lines and `//` comments are skipped entirely.
//! 2. The brace depth moves by the number of `{` minus `}` on the line.
//! 3. A line starting with `layout` or `input` that contains `{` enters that
//!    block.  While inside `layout`, a line starting with `shadow`, `border`
//!    or `focus-ring` that contains `{` enters the sub-block.  The line
//!    carries no value.
//! 4. A line that is exactly `}` closes the active sub-block if there is
//!    one, otherwise `layout` / `input` once the depth is back to zero.
//! 5. Any other line is matched against the keys valid in the current
//!    block.  `geometry-corner-radius` is valid everywhere.

use crate::niri::settings::{SettingKey, SettingValue};
use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

/// Which recognised block the scanner is currently inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockState {
    /// Top level, or inside a block nirimatic does not track.
    #[default]
    None,
    Layout,
    LayoutShadow,
    LayoutBorder,
    LayoutFocusRing,
    Input,
}

impl BlockState {
    /// Whether `layout` (or one of its sub-blocks) is active.
    pub fn in_layout(self) -> bool {
        matches!(
            self,
            BlockState::Layout
                | BlockState::LayoutShadow
                | BlockState::LayoutBorder
                | BlockState::LayoutFocusRing
        )
    }

    /// Whether one of `shadow`, `border` or `focus-ring` is active.
    pub fn in_sub_block(self) -> bool {
        self.in_layout() && self != BlockState::Layout
    }
}

/// A recognised setting on a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub key: SettingKey,
    pub value: SettingValue,
    /// Byte range of the value token within the untrimmed line.
    ///
    /// For integer keys this is the digit run; for the shadow `on`/`off`
    /// line and the `input` presence flags it is the trimmed content.
    pub span: Range<usize>,
}

/// Line-by-line block tracker.
///
/// Feed it every physical line of the file, in order, and it reports the
/// setting (if any) each line carries.
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    state: BlockState,
    depth: i32,
}

impl Scanner {
    /// A scanner positioned at the top of a file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current block context.
    pub fn state(&self) -> BlockState {
        self.state
    }

    /// Net number of unclosed `{` seen so far.
    pub fn depth(&self) -> i32 {
        self.depth
    }

    /// Advance over one physical line (without its newline).
    ///
    /// Returns the setting the line carries in the context that was active
    /// *before* the line, or `None` for blank, comment, block-entry,
    /// block-exit and unrecognised lines.
    pub fn feed(&mut self, line: &str) -> Option<Match> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("//") {
            return None;
        }

        self.depth += brace_delta(trimmed);

        if let Some(block) = self.entered_block(trimmed) {
            self.state = block;
            return None;
        }

        if trimmed == "}" {
            self.close_block();
            return None;
        }

        recognize(self.state, line)
    }

    fn entered_block(&self, trimmed: &str) -> Option<BlockState> {
        if !trimmed.contains('{') {
            return None;
        }
        if trimmed.starts_with("layout") {
            return Some(BlockState::Layout);
        }
        if trimmed.starts_with("input") {
            return Some(BlockState::Input);
        }
        if !self.state.in_layout() {
            return None;
        }
        if trimmed.starts_with("shadow") {
            Some(BlockState::LayoutShadow)
        } else if trimmed.starts_with("border") {
            Some(BlockState::LayoutBorder)
        } else if trimmed.starts_with("focus-ring") {
            Some(BlockState::LayoutFocusRing)
        } else {
            None
        }
    }

    // Sub-blocks close before their parent even though both move the same
    // depth counter.
    fn close_block(&mut self) {
        self.state = match self.state {
            s if s.in_sub_block() => BlockState::Layout,
            BlockState::Layout | BlockState::Input if self.depth == 0 => BlockState::None,
            s => s,
        };
    }
}

fn brace_delta(trimmed: &str) -> i32 {
    trimmed.chars().fold(0, |acc, c| match c {
        '{' => acc + 1,
        '}' => acc - 1,
        _ => acc,
    })
}

/// Match `line` against the keys valid in `state`.
///
/// This is the pure half of [`Scanner::feed`]: it performs no block
/// transitions and is only meaningful for lines that are not blank,
/// comments, or block delimiters.
pub fn recognize(state: BlockState, line: &str) -> Option<Match> {
    let trimmed = line.trim();
    let in_block = match state {
        BlockState::Input => flag(line, "focus-follows-mouse", SettingKey::FocusFollowsMouse)
            .or_else(|| {
                flag(
                    line,
                    "workspace-auto-back-and-forth",
                    SettingKey::WorkspaceAutoBackAndForth,
                )
            }),
        BlockState::Layout => int_value(line, IntKey::Gaps, SettingKey::Gaps),
        BlockState::LayoutShadow => shadow_toggle(line)
            .or_else(|| int_value(line, IntKey::Softness, SettingKey::ShadowSoftness))
            .or_else(|| int_value(line, IntKey::Spread, SettingKey::ShadowSpread)),
        BlockState::LayoutBorder => int_value(line, IntKey::Width, SettingKey::BorderWidth),
        BlockState::LayoutFocusRing => {
            int_value(line, IntKey::Width, SettingKey::FocusRingWidth)
        }
        BlockState::None => None,
    };

    in_block.or_else(|| {
        if trimmed.contains("geometry-corner-radius") {
            int_value(line, IntKey::CornerRadius, SettingKey::CornerRadius)
        } else {
            None
        }
    })
}

//  Token matchers

/// Byte range of the trimmed content within `line`.
fn trimmed_span(line: &str) -> Range<usize> {
    let start = line.len() - line.trim_start().len();
    let end = line.trim_end().len();
    start..end
}

fn flag(line: &str, token: &str, key: SettingKey) -> Option<Match> {
    (line.trim() == token).then(|| Match {
        key,
        value: SettingValue::Bool(true),
        span: trimmed_span(line),
    })
}

fn shadow_toggle(line: &str) -> Option<Match> {
    let enabled = match line.trim() {
        "on" => true,
        "off" => false,
        _ => return None,
    };
    Some(Match {
        key: SettingKey::ShadowEnabled,
        value: SettingValue::Bool(enabled),
        span: trimmed_span(line),
    })
}

/// The literal key texts that take an integer argument.
#[derive(Debug, Clone, Copy)]
enum IntKey {
    Gaps,
    Width,
    Softness,
    Spread,
    CornerRadius,
}

impl IntKey {
    fn pattern(self) -> &'static Regex {
        static PATTERNS: OnceLock<[Regex; 5]> = OnceLock::new();
        let patterns = PATTERNS.get_or_init(|| {
            ["gaps", "width", "softness", "spread", "geometry-corner-radius"]
                .map(|key| {
                    Regex::new(&format!(r"^\s*{}\s+(\d+)", regex::escape(key)))
                        .expect("static key pattern is valid")
                })
        });
        &patterns[self as usize]
    }
}

/// Match `<indent><key><ws><digits>` at the start of `line`.
///
/// A digit run that does not fit in a `u32` counts as "no value".
fn int_value(line: &str, key: IntKey, setting: SettingKey) -> Option<Match> {
    let digits = key.pattern().captures(line)?.get(1)?;
    let value = digits.as_str().parse::<u32>().ok()?;
    Some(Match {
        key: setting,
        value: SettingValue::Int(value),
        span: digits.range(),
    })
}
