//! Clickable UI components.
//!
//! Each component draws itself and registers its own click targets, so a
//! button's hit box can never drift away from where its text is drawn.
//!
//! - [`TabBar`]: horizontal tab navigation.
//! - [`ClickableList`]: vertical list with per-row click targets.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

// ── TabBar ─────────────────────────────────────────────────────

/// A horizontal tab bar component.
///
/// Renders tabs as a single row of styled labels separated by `separator`,
/// and registers click targets at the positions the labels actually occupy
/// (display width, not byte length).
///
/// # Example
/// ```ignore
/// TabBar::new(" │ ")
///     .tab("Game", active, TAB_BASE)
///     .tab("Gifts", inactive, TAB_BASE + 1)
///     .render(f, area, &mut cs);
/// ```
pub struct TabBar<'a> {
    tabs: Vec<(String, Style, u16)>,
    separator: &'a str,
    block: Option<Block<'a>>,
}

impl<'a> TabBar<'a> {
    pub fn new(separator: &'a str) -> Self {
        Self {
            tabs: Vec::new(),
            separator,
            block: None,
        }
    }

    /// Add a tab with its label, style, and action ID.
    pub fn tab(mut self, label: impl Into<String>, style: Style, action_id: u16) -> Self {
        self.tabs.push((label.into(), style, action_id));
        self
    }

    /// Wrap the tab bar in a [`Block`].
    ///
    /// When a block with borders is provided, click target positions are
    /// automatically adjusted using `Block::inner()`.
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Render the tab bar and register click targets.
    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let mut spans: Vec<Span> = Vec::new();
        let sep_width = Line::from(self.separator).width() as u16;
        let mut tab_widths: Vec<(u16, u16)> = Vec::new();

        for (i, (label, style, action_id)) in self.tabs.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(
                    self.separator,
                    Style::default().fg(Color::DarkGray),
                ));
            }
            let padded = format!(" {} ", label);
            tab_widths.push((Line::from(padded.as_str()).width() as u16, *action_id));
            spans.push(Span::styled(padded, *style));
        }

        // Compute inner content area (accounting for borders) before consuming block
        let inner = match &self.block {
            Some(block) => block.inner(area),
            None => area,
        };

        let line = Line::from(spans);
        let paragraph = match self.block {
            Some(block) => Paragraph::new(line).block(block),
            None => Paragraph::new(line),
        };
        f.render_widget(paragraph, area);

        // Use inner x/width for horizontal accuracy,
        // outer y/height for better tap tolerance on the full tab bar
        cs.register_tab_targets(
            &tab_widths,
            sep_width,
            inner.x,
            area.y,
            inner.width,
            area.height.max(1),
        );
    }
}

// ── ClickableList ──────────────────────────────────────────────

/// Pairs rendered [`Line`]s with click actions.
///
/// Mark a line clickable when it is added, then call
/// [`register_targets`](ClickableList::register_targets) once to place every
/// target on the row its line landed on.
///
/// # Example
/// ```ignore
/// let mut cl = ClickableList::new();
/// cl.push(Line::from("Available codes"));
/// cl.push_clickable(Line::from(" [S] Spin"), SPIN_WHEEL);
/// cl.register_targets(area, &mut cs, 1, 1, 0, 0);
/// f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
/// ```
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)` pairs, where line_index is the index into `lines`.
    actions: Vec<(u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Add a non-clickable line.
    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    /// Add a clickable line with a semantic action ID.
    ///
    /// The action is bound to whatever row this line ends up on. If you
    /// insert or remove lines before it, the target moves automatically.
    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        let idx = self.lines.len() as u16;
        self.actions.push((idx, action_id));
        self.lines.push(line);
    }

    /// Consume the builder, returning the lines for rendering.
    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register click targets for all clickable lines.
    ///
    /// * `area`: the widget area (including borders).
    /// * `cs`: mutable reference to the shared click state.
    /// * `top_offset`: rows before content (e.g. 1 for a top border).
    /// * `bottom_offset`: rows after content (e.g. 1 for a bottom border).
    /// * `scroll`: vertical scroll offset in visual rows (0 if not scrollable).
    /// * `inner_width`: content width for wrap calculation. Pass `0` when the
    ///   widget does **not** use `Wrap`, in which case each logical line is
    ///   assumed to occupy exactly one visual row.
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
        scroll: u16,
        inner_width: u16,
    ) {
        let content_y = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);

        if inner_width == 0 {
            // Legacy path: 1 logical line = 1 visual row (no wrapping).
            for &(line_idx, action_id) in &self.actions {
                if line_idx < scroll {
                    continue;
                }
                let row = content_y + (line_idx - scroll);
                if row >= content_end {
                    continue;
                }
                cs.add_row_target(area, row, action_id);
            }
            return;
        }

        // Wrap-aware path: compute the visual row offset for each logical line.
        let w = inner_width as usize;
        let mut visual_starts: Vec<u16> = Vec::with_capacity(self.lines.len());
        let mut visual_heights: Vec<u16> = Vec::with_capacity(self.lines.len());
        let mut cumulative: u16 = 0;
        for line in &self.lines {
            visual_starts.push(cumulative);
            let lw = line.width();
            let h = if lw <= w { 1 } else { lw.div_ceil(w) as u16 };
            visual_heights.push(h);
            cumulative += h;
        }

        for &(line_idx, action_id) in &self.actions {
            let li = line_idx as usize;
            if li >= self.lines.len() {
                continue;
            }
            let vstart = visual_starts[li];
            let vheight = visual_heights[li];

            // Register a click target for every visual row this line spans.
            for r in 0..vheight {
                let vr = vstart + r;
                if vr < scroll {
                    continue;
                }
                let screen_row = content_y + (vr - scroll);
                if screen_row >= content_end {
                    break;
                }
                cs.add_row_target(area, screen_row, action_id);
            }
        }
    }
}
