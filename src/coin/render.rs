//! MAY COIN rendering: header, tab bar, the four tabs, notice log, and the
//! blocked notice.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::{ClickableList, TabBar};

use super::achievements;
use super::actions::*;
use super::logic::{format_coins, progress_percent, MAX_USERNAME_LEN};
use super::promo::PROMO_CODES;
use super::state::{InputMode, NoticeKind, Tab};
use super::wheel::{PrizeTier, SPIN_COST};
use super::CoinGame;

const NEON: Color = Color::Rgb(57, 255, 20);

/// Coin art, alternating frames; the second row is the face.
const COIN_ART: &[&[&str]] = &[
    &["  ▄▀▀▀▀▀▄  ", " █ MAY   █ ", " █  COIN █ ", "  ▀▄▄▄▄▄▀  "],
    &["  ▄▀▀▀▀▀▄  ", " █ MAY ✦ █ ", " █  COIN █ ", "  ▀▄▄▄▄▄▀  "],
];

const SPINNER: &[char] = &['◐', '◓', '◑', '◒'];

/// Goals behind the two profile progress bars.
const BALANCE_GOAL: f64 = 1000.0;
const CLICKS_GOAL: f64 = 100.0;

pub fn render(game: &CoinGame, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    if let Some(reason) = game.blocked_reason() {
        render_blocked(reason, f, area);
        return;
    }

    let (main_area, log_area) = if area.width >= 100 {
        let h = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(area);
        (h[0], h[1])
    } else {
        let v = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(10), Constraint::Length(6)])
            .split(area);
        (v[0], v[1])
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Length(3), // tabs
            Constraint::Min(5),    // content
        ])
        .split(main_area);

    render_header(game, f, chunks[0]);
    render_tab_bar(game, f, chunks[1], click_state);
    match game.ui.tab {
        Tab::Game => render_game_tab(game, f, chunks[2], click_state),
        Tab::Gifts => render_gifts_tab(game, f, chunks[2], click_state),
        Tab::Profile => render_profile_tab(game, f, chunks[2], click_state),
        Tab::About => render_about_tab(f, chunks[2]),
    }
    render_log(game, f, log_area);
}

fn bold(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Text progress bar, `width` cells wide.
fn progress_bar(percent: u16, width: usize) -> String {
    let filled = (usize::from(percent.min(100)) * width) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

// ── Header / tabs ───────────────────────────────────────────────

fn render_header(game: &CoinGame, f: &mut Frame, area: Rect) {
    let state = &game.state;
    let mut spans = vec![
        Span::styled(" MAY COIN ", bold(NEON)),
        Span::styled("│ ", dim()),
        Span::styled("Balance ", Style::default().fg(Color::Gray)),
        Span::styled(format_coins(state.balance), bold(Color::Yellow)),
    ];
    if state.has_premium {
        spans.push(Span::styled(" ★", bold(Color::Magenta)));
    }

    let border = if game.ui.purchase_flash > 0 { Color::White } else { NEON };
    let widget = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(widget, area);
}

fn render_tab_bar(game: &CoinGame, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let mut bar = TabBar::new(" │ ");
    for (i, tab) in Tab::all().iter().enumerate() {
        let style = if *tab == game.ui.tab {
            Style::default()
                .fg(Color::Black)
                .bg(NEON)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(NEON)
        };
        bar = bar.tab(tab.label(), style, TAB_BASE + i as u16);
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(dim())
        .title(Span::styled(" Tab ▸ ", dim()));

    let mut cs = click_state.borrow_mut();
    bar.block(block).render(f, area, &mut cs);
}

// ── Game tab ────────────────────────────────────────────────────

fn render_game_tab(game: &CoinGame, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let direction = if is_narrow_layout(area.width) {
        Direction::Vertical
    } else {
        Direction::Horizontal
    };
    let constraints = if is_narrow_layout(area.width) {
        [Constraint::Length(9), Constraint::Min(5)]
    } else {
        [Constraint::Percentage(40), Constraint::Percentage(60)]
    };
    let chunks = Layout::default()
        .direction(direction)
        .constraints(constraints)
        .split(area);

    render_coin(game, f, chunks[0], click_state);
    render_shop(game, f, chunks[1], click_state);
}

fn render_coin(game: &CoinGame, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let state = &game.state;
    let flashing = game.ui.click_flash > 0;
    let art = COIN_ART[(game.ui.anim_frame / 5) as usize % COIN_ART.len()];
    let art_style = if flashing {
        bold(Color::Black).bg(Color::Yellow)
    } else {
        bold(Color::Yellow)
    };

    let mut cl = ClickableList::new();
    for row in art.iter() {
        cl.push(Line::from(Span::styled(*row, art_style)));
    }
    cl.push(Line::from(Span::styled(
        format!("+{} per click", state.click_power),
        Style::default().fg(Color::Gray),
    )));
    if state.auto_income_rate > 0 {
        let spin = SPINNER[(game.ui.anim_frame / 3) as usize % SPINNER.len()];
        cl.push(Line::from(Span::styled(
            format!("{spin} +{} per second", state.auto_income_rate),
            Style::default().fg(NEON),
        )));
    }
    cl.push_clickable(Line::from(Span::styled("[C] Click the coin!", bold(NEON))), CLICK_COIN);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if flashing { Color::White } else { NEON }))
        .title(" Click and earn ");

    // The whole coin panel is the button.
    let mut cs = click_state.borrow_mut();
    cs.add_click_target(area, CLICK_COIN);
    cl.register_targets(area, &mut cs, 1, 1, 0, 0);
    drop(cs);
    f.render_widget(
        Paragraph::new(cl.into_lines()).alignment(Alignment::Center).block(block),
        area,
    );
}

fn render_shop(game: &CoinGame, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let state = &game.state;
    let mut cl = ClickableList::new();

    for (i, upgrade) in state.upgrades.iter().enumerate() {
        let affordable = state.balance >= upgrade.cost as f64;
        let (key_style, text_style) = if affordable {
            (bold(Color::Yellow), Style::default().fg(Color::White))
        } else {
            (dim(), dim())
        };
        let owned = if upgrade.owned > 0 {
            format!(" x{}", upgrade.owned)
        } else {
            String::new()
        };
        cl.push_clickable(
            Line::from(vec![
                Span::styled(format!(" [{}] ", i + 1), key_style),
                Span::styled(upgrade.name.clone(), text_style.add_modifier(Modifier::BOLD)),
                Span::styled(owned, bold(NEON)),
                Span::styled(format!("  {}", upgrade.description), text_style),
                Span::styled(format!("  {} ◎", format_coins(upgrade.cost as f64)), key_style),
            ]),
            BUY_UPGRADE_BASE + i as u16,
        );
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(" Upgrade shop ");

    let mut cs = click_state.borrow_mut();
    cl.register_targets(area, &mut cs, 1, 1, 0, 0);
    drop(cs);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

// ── Gifts tab ───────────────────────────────────────────────────

fn render_gifts_tab(game: &CoinGame, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let direction = if is_narrow_layout(area.width) {
        Direction::Vertical
    } else {
        Direction::Horizontal
    };
    let chunks = Layout::default()
        .direction(direction)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_promo(game, f, chunks[0], click_state);
    render_wheel(game, f, chunks[1], click_state);
}

/// Text entry line with a blinking cursor, plus submit/cancel buttons.
fn push_entry(cl: &mut ClickableList, game: &CoinGame, label: &str) {
    let cursor = if game.ui.anim_frame % 10 < 5 { "▏" } else { " " };
    cl.push(Line::from(vec![
        Span::styled(format!(" {label}: "), Style::default().fg(Color::Gray)),
        Span::styled(game.ui.input_buffer.clone(), bold(Color::White)),
        Span::styled(cursor, bold(NEON)),
    ]));
    cl.push_clickable(Line::from(Span::styled(" [⏎] Apply", bold(NEON))), SUBMIT_ENTRY);
    cl.push_clickable(Line::from(Span::styled(" [⎋] Cancel", dim())), CANCEL_ENTRY);
}

fn render_promo(game: &CoinGame, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let state = &game.state;
    let mut cl = ClickableList::new();

    if game.ui.input_mode == InputMode::PromoEntry {
        push_entry(&mut cl, game, "Code");
    } else {
        cl.push_clickable(
            Line::from(Span::styled(" [P] Enter a promo code", bold(NEON))),
            ENTER_PROMO,
        );
    }
    cl.push(Line::from(""));
    cl.push(Line::from(Span::styled(" Available codes", bold(Color::White))));
    for (code, reward) in PROMO_CODES {
        let status = if state.used_promo_codes.contains(*code) {
            Span::styled("✓ used", dim())
        } else {
            Span::styled(format!("+{reward} coins"), Style::default().fg(Color::Yellow))
        };
        cl.push(Line::from(vec![
            Span::styled(format!("  {code:<12}"), Style::default().fg(Color::Cyan)),
            status,
        ]));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Promo codes ");

    let mut cs = click_state.borrow_mut();
    cl.register_targets(area, &mut cs, 1, 1, 0, 0);
    drop(cs);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

fn render_wheel(game: &CoinGame, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let mut cl = ClickableList::new();

    for tier in PrizeTier::all() {
        let (lo, hi) = tier.range();
        let color = match tier {
            PrizeTier::Jackpot => Color::Magenta,
            _ => Color::Yellow,
        };
        cl.push(Line::from(vec![
            Span::styled(format!("  {:>3.0}%  ", tier.probability() * 100.0), dim()),
            Span::styled(format!("{lo}-{hi} coins"), Style::default().fg(color)),
        ]));
    }
    cl.push(Line::from(""));

    if game.state.wheel.is_spinning() {
        let spin = SPINNER[game.ui.anim_frame as usize % SPINNER.len()];
        let pct = (game.state.wheel.progress() * 100.0) as u16;
        cl.push(Line::from(vec![
            Span::styled(format!(" {spin} Spinning "), bold(Color::Yellow)),
            Span::styled(progress_bar(pct, 12), Style::default().fg(Color::Yellow)),
        ]));
    } else if game.state.balance < SPIN_COST as f64 {
        cl.push(Line::from(Span::styled(
            format!("  Spin ({SPIN_COST} coins) - not enough coins"),
            dim(),
        )));
    } else {
        cl.push_clickable(
            Line::from(Span::styled(format!(" [S] Spin ({SPIN_COST} coins)"), bold(NEON))),
            SPIN_WHEEL,
        );
    }

    if let Some(prize) = game.ui.last_prize {
        cl.push(Line::from(Span::styled(
            format!(" Last prize: +{prize} coins"),
            bold(Color::Yellow),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Wheel of fortune ");

    let mut cs = click_state.borrow_mut();
    cl.register_targets(area, &mut cs, 1, 1, 0, 0);
    drop(cs);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

// ── Profile tab ─────────────────────────────────────────────────

fn render_profile_tab(
    game: &CoinGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let direction = if is_narrow_layout(area.width) {
        Direction::Vertical
    } else {
        Direction::Horizontal
    };
    let chunks = Layout::default()
        .direction(direction)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_stats(game, f, chunks[0], click_state);
    render_achievements_and_board(game, f, chunks[1]);
}

fn stat_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {label:<14}"), Style::default().fg(Color::Gray)),
        Span::styled(value, bold(Color::White)),
    ])
}

fn render_stats(game: &CoinGame, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let state = &game.state;
    let mut cl = ClickableList::new();

    if game.ui.input_mode == InputMode::RenameEntry {
        push_entry(&mut cl, game, &format!("Name (max {MAX_USERNAME_LEN})"));
    } else {
        cl.push_clickable(
            Line::from(vec![
                Span::styled(format!(" {}", state.username), bold(NEON)),
                Span::styled("  [N] Rename", dim()),
            ]),
            RENAME,
        );
    }
    cl.push(stat_line("Referral id", state.referral_id.clone()));
    cl.push(stat_line("Balance", format_coins(state.balance)));
    cl.push(stat_line("Total earned", format_coins(state.total_earned)));
    cl.push(stat_line("Clicks", state.total_clicks.to_string()));
    cl.push(stat_line("Per click", format!("+{}", state.click_power)));
    cl.push(stat_line("Per second", format!("+{}", state.auto_income_rate)));

    for (label, value, goal) in [
        ("To 1000 coins", state.balance, BALANCE_GOAL),
        ("To 100 clicks", state.total_clicks as f64, CLICKS_GOAL),
    ] {
        let pct = progress_percent(value, goal);
        cl.push(Line::from(vec![
            Span::styled(format!(" {label:<14}"), Style::default().fg(Color::Gray)),
            Span::styled(progress_bar(pct, 10), Style::default().fg(NEON)),
            Span::styled(format!(" {pct}%"), Style::default().fg(Color::White)),
        ]));
    }

    let owned: Vec<String> = state
        .owned_upgrades()
        .map(|u| format!("{} x{}", u.name, u.owned))
        .collect();
    if !owned.is_empty() {
        cl.push(Line::from(""));
        cl.push(Line::from(Span::styled(" Upgrades", bold(Color::White))));
        for entry in owned {
            cl.push(Line::from(Span::styled(format!("  {entry}"), Style::default().fg(Color::Magenta))));
        }
    }

    cl.push(Line::from(""));
    if state.has_premium {
        cl.push(Line::from(Span::styled(" ★ Premium", bold(Color::Magenta))));
    } else {
        cl.push_clickable(
            Line::from(Span::styled(" [B] Get premium badge", bold(Color::Magenta))),
            BUY_PREMIUM,
        );
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(NEON))
        .title(" Profile ");

    let mut cs = click_state.borrow_mut();
    cl.register_targets(area, &mut cs, 1, 1, 0, 0);
    drop(cs);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

fn render_achievements_and_board(game: &CoinGame, f: &mut Frame, area: Rect) {
    let board = game.leaderboard();
    let mut lines: Vec<Line> = Vec::new();

    let earned = achievements::unlocked(&game.state, board).len();
    lines.push(Line::from(vec![
        Span::styled(" Achievements ", bold(Color::White)),
        Span::styled(format!("{earned}/{}", achievements::ACHIEVEMENTS.len()), dim()),
    ]));
    for (achievement, unlocked) in achievements::evaluate(&game.state, board) {
        let (mark, style) = if unlocked {
            ("✓", bold(Color::Yellow))
        } else {
            ("·", dim())
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  {mark} {:<15}", achievement.name), style),
            Span::styled(achievement.description, dim()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" Leaderboard", bold(Color::White))));
    if board.entries().is_empty() {
        lines.push(Line::from(Span::styled("  (no scores yet)", dim())));
    }
    for entry in board.entries() {
        let style = if entry.username == game.state.username {
            bold(NEON)
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::from(Span::styled(
            format!("  {:>2}. {:<16} {}", entry.rank, entry.username, format_coins(entry.balance)),
            style,
        )));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Hall of fame "),
    );
    f.render_widget(widget, area);
}

// ── About tab ───────────────────────────────────────────────────

fn render_about_tab(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(Span::styled(" MAY COIN", bold(NEON))),
        Line::from(""),
        Line::from(" Click the coin to earn. Spend coins on upgrades that make every"),
        Line::from(" click worth more or pay you every second."),
        Line::from(""),
        Line::from(" Gifts: redeem promo codes once each, or pay 190 coins to spin"),
        Line::from(" the wheel for 50 to 605 coins."),
        Line::from(""),
        Line::from(" Share your referral id as ?ref=<id>: new players arriving"),
        Line::from(" through it get a 50 coin welcome bonus."),
        Line::from(""),
        Line::from(Span::styled(
            " Keys: C click · 1-5 buy · P promo · S spin · N rename · B premium · Tab switch",
            dim(),
        )),
    ];
    let widget = Paragraph::new(text).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" About "),
    );
    f.render_widget(widget, area);
}

// ── Log / blocked ───────────────────────────────────────────────

fn render_log(game: &CoinGame, f: &mut Frame, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = game
        .ui
        .log
        .iter()
        .rev()
        .take(visible)
        .enumerate()
        .map(|(i, notice)| {
            let color = match notice.kind {
                NoticeKind::Info => Color::Gray,
                NoticeKind::Success => NEON,
                NoticeKind::Error => Color::Red,
            };
            let style = if i == 0 {
                bold(color)
            } else {
                Style::default().fg(color)
            };
            Line::from(Span::styled(format!(" {}", notice.text), style))
        })
        .collect();

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue))
            .title(" Log "),
    );
    f.render_widget(widget, area);
}

fn render_blocked(reason: &str, f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("ACCOUNT BLOCKED", bold(Color::Red))),
        Line::from(""),
        Line::from(Span::styled("Reason:", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(reason.to_string(), bold(Color::White))),
        Line::from(""),
        Line::from(Span::styled(
            "If you think this is a mistake, contact the administrator.",
            dim(),
        )),
    ];
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" MAY COIN "),
        );
    f.render_widget(widget, area);
}
