//! Shared input handling: coordinate conversion, click targets, and event types.
//!
//! Knows nothing about coins. The game maps these events to its own actions.

use ratzilla::ratatui::layout::Rect;

/// All possible input events, normalized from keyboard, mouse, and touch sources.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A printable key press. Tab arrives as `'\t'`.
    Key(char),
    /// A click/tap on a registered target, identified by a semantic action ID.
    Click(u16),
    /// Enter.
    Submit,
    /// Backspace.
    Erase,
    /// Escape.
    Cancel,
}

/// A region on screen that can be tapped/clicked to trigger an action.
#[derive(Debug, Clone)]
pub struct ClickTarget {
    /// The rectangular region (in terminal cell coordinates) for hit testing.
    pub rect: Rect,
    /// Semantic action ID. Each game defines its own constants.
    pub action_id: u16,
}

/// Shared state between the render loop and click handler.
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    /// Register a click target with a rectangular hit region and a semantic action ID.
    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        self.targets.push(ClickTarget { rect, action_id });
    }

    /// Convenience: register a full-row click target at the given row within an area.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.targets.push(ClickTarget {
                rect: Rect::new(area.x, row, area.width, 1),
                action_id,
            });
        }
    }

    /// Register click targets for a horizontal tab bar based on actual text widths.
    ///
    /// Each entry in `tab_widths` is `(display_width, action_id)` for the **padded**
    /// label text of that tab (e.g. `" Game "` → display_width = 6).
    /// `separator_width` is the display width of the separator string between tabs.
    ///
    /// Click targets are computed from the actual text positions so each target
    /// covers its label plus half of the adjacent separator(s).  The first tab
    /// extends to the left edge and the last tab extends to the right edge of
    /// the area, ensuring full coverage with no gaps.
    pub fn register_tab_targets(
        &mut self,
        tab_widths: &[(u16, u16)],
        separator_width: u16,
        x: u16,
        y: u16,
        total_width: u16,
        height: u16,
    ) {
        let n = tab_widths.len();
        if n == 0 || total_width == 0 {
            return;
        }

        // Compute the starting column of each tab label
        let mut starts: Vec<u16> = Vec::with_capacity(n);
        let mut cursor: u16 = 0;
        for (i, &(w, _)) in tab_widths.iter().enumerate() {
            if i > 0 {
                cursor += separator_width;
            }
            starts.push(cursor);
            cursor += w;
        }

        for i in 0..n {
            let (_, action_id) = tab_widths[i];

            // Left boundary: first tab from 0, others from midpoint of left separator
            let left = if i == 0 {
                0
            } else {
                let prev_end = starts[i - 1] + tab_widths[i - 1].0;
                prev_end + (starts[i] - prev_end) / 2
            };

            // Right boundary: last tab to total_width, others to midpoint of right sep
            let right = if i == n - 1 {
                total_width
            } else {
                let cur_end = starts[i] + tab_widths[i].0;
                let next_start = starts[i + 1];
                cur_end + (next_start - cur_end) / 2
            };

            let w = right.saturating_sub(left);
            if w > 0 {
                self.add_click_target(Rect::new(x + left, y, w, height), action_id);
            }
        }
    }

    /// Hit-test a terminal cell coordinate against all registered targets.
    /// Returns the action ID of the first matching target (last registered takes priority
    /// when targets overlap, matching typical UI layering where later elements are on top).
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        // Iterate in reverse so later-registered (topmost) targets win.
        self.targets.iter().rev().find_map(|t| {
            let r = &t.rect;
            if col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height {
                Some(t.action_id)
            } else {
                None
            }
        })
    }
}

/// Determine whether a screen width (in columns) should use narrow layout.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

/// Convert a pixel Y coordinate to a terminal row index.
///
/// `click_y` is relative to the grid container's top edge.
/// `grid_height` is the total pixel height of the grid container.
/// `terminal_rows` is the number of rows in the terminal.
///
/// Returns `None` if the click is outside the grid or inputs are invalid.
pub fn pixel_y_to_row(click_y: f64, grid_height: f64, terminal_rows: u16) -> Option<u16> {
    if grid_height <= 0.0 || terminal_rows == 0 || click_y < 0.0 {
        return None;
    }

    let cell_height = grid_height / terminal_rows as f64;
    let row = (click_y / cell_height) as u16;

    if row >= terminal_rows {
        return None;
    }

    Some(row)
}

/// Convert a pixel X coordinate to a terminal column index.
pub fn pixel_x_to_col(click_x: f64, grid_width: f64, terminal_cols: u16) -> Option<u16> {
    if grid_width <= 0.0 || terminal_cols == 0 || click_x < 0.0 {
        return None;
    }
    let cell_width = grid_width / terminal_cols as f64;
    let col = (click_x / cell_width) as u16;
    if col >= terminal_cols { None } else { Some(col) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_rows() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 10, 80, 1), 100);
        cs.add_click_target(Rect::new(0, 11, 80, 1), 101);

        assert_eq!(cs.hit_test(5, 10), Some(100));
        assert_eq!(cs.hit_test(5, 11), Some(101));
        assert_eq!(cs.hit_test(5, 9), None);
        assert_eq!(cs.hit_test(5, 12), None);
    }

    #[test]
    fn hit_test_panel_target() {
        // The coin panel is one multi-row target.
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 6, 30, 9), 0);

        assert_eq!(cs.hit_test(0, 6), Some(0));
        assert_eq!(cs.hit_test(29, 14), Some(0));
        assert_eq!(cs.hit_test(30, 10), None);
        assert_eq!(cs.hit_test(10, 15), None);
    }

    #[test]
    fn later_targets_win_on_overlap() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 5, 80, 1), 1);
        cs.add_click_target(Rect::new(5, 5, 10, 1), 2);

        assert_eq!(cs.hit_test(7, 5), Some(2));
        assert_eq!(cs.hit_test(0, 5), Some(1));
        assert_eq!(cs.hit_test(20, 5), Some(1));
    }

    #[test]
    fn row_target_outside_area_is_ignored() {
        let mut cs = ClickState::new();
        let area = Rect::new(5, 10, 30, 5);
        cs.add_row_target(area, 9, 99);
        cs.add_row_target(area, 15, 98);
        assert!(cs.targets.is_empty());

        cs.add_row_target(area, 12, 97);
        assert_eq!(cs.hit_test(15, 12), Some(97));
        assert_eq!(cs.hit_test(4, 12), None);
    }

    #[test]
    fn clear_targets_empties_registry() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 1, 80, 1), 1);
        cs.clear_targets();
        assert_eq!(cs.hit_test(0, 1), None);
    }

    #[test]
    fn narrow_layout_threshold() {
        assert!(is_narrow_layout(40));
        assert!(is_narrow_layout(59));
        assert!(!is_narrow_layout(60));
    }

    #[test]
    fn pixel_to_row() {
        assert_eq!(pixel_y_to_row(0.0, 450.0, 30), Some(0));
        assert_eq!(pixel_y_to_row(14.9, 450.0, 30), Some(0));
        assert_eq!(pixel_y_to_row(15.0, 450.0, 30), Some(1));
        assert_eq!(pixel_y_to_row(449.0, 450.0, 30), Some(29));
        assert_eq!(pixel_y_to_row(450.0, 450.0, 30), None);
        assert_eq!(pixel_y_to_row(-1.0, 450.0, 30), None);
        assert_eq!(pixel_y_to_row(10.0, 0.0, 30), None);
        assert_eq!(pixel_y_to_row(10.0, 450.0, 0), None);
    }

    #[test]
    fn pixel_to_col() {
        assert_eq!(pixel_x_to_col(0.0, 800.0, 80), Some(0));
        assert_eq!(pixel_x_to_col(10.0, 800.0, 80), Some(1));
        assert_eq!(pixel_x_to_col(799.0, 800.0, 80), Some(79));
        assert_eq!(pixel_x_to_col(800.0, 800.0, 80), None);
        assert_eq!(pixel_x_to_col(-1.0, 800.0, 80), None);
    }

    #[test]
    fn tab_targets_cover_labels_and_split_separators() {
        // " Game " (6) │ " Gifts " (7) │ " Profile " (9) │ " About " (7), separator 3
        let mut cs = ClickState::new();
        let tabs = [(6, 10), (7, 11), (9, 12), (7, 13)];
        cs.register_tab_targets(&tabs, 3, 1, 6, 78, 3);

        assert_eq!(cs.targets.len(), 4);
        // Game: 0..7 (label 0..6, plus one separator column)
        assert_eq!(cs.hit_test(1, 6), Some(10));
        assert_eq!(cs.hit_test(7, 6), Some(10));
        // Gifts starts at 9, left boundary 6 + 3/2 = 7
        assert_eq!(cs.hit_test(8, 7), Some(11));
        assert_eq!(cs.hit_test(16, 8), Some(11));
        // Profile label at 19..28
        assert_eq!(cs.hit_test(25, 6), Some(12));
        // About runs to the right edge
        assert_eq!(cs.hit_test(78, 6), Some(13));
        assert_eq!(cs.hit_test(79, 6), None);
        // Outside the bar height
        assert_eq!(cs.hit_test(25, 9), None);
    }

    #[test]
    fn tab_targets_empty_input() {
        let mut cs = ClickState::new();
        cs.register_tab_targets(&[], 3, 0, 0, 80, 1);
        cs.register_tab_targets(&[(6, 10)], 3, 0, 0, 0, 1);
        assert!(cs.targets.is_empty());
    }

    #[test]
    fn tap_to_action_pipeline() {
        let mut cs = ClickState::new();
        cs.terminal_cols = 80;
        cs.terminal_rows = 30;
        cs.add_click_target(Rect::new(32, 7, 48, 1), 100);
        cs.add_click_target(Rect::new(32, 8, 48, 1), 101);

        let (grid_w, grid_h) = (640.0, 450.0);
        let col = pixel_x_to_col(400.0, grid_w, cs.terminal_cols).unwrap();
        let row = pixel_y_to_row(8.0 * 15.0 + 7.0, grid_h, cs.terminal_rows).unwrap();
        assert_eq!((col, row), (50, 8));
        assert_eq!(cs.hit_test(col, row), Some(101));

        let col = pixel_x_to_col(100.0, grid_w, cs.terminal_cols).unwrap();
        assert_eq!(cs.hit_test(col, row), None);
    }
}
