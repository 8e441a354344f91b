mod coin;
mod console;
mod error;
mod input;
mod storage;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

use coin::logic::format_coins;
use coin::rng::CoinRng;
use coin::save::Store;
use coin::CoinGame;
use input::{pixel_x_to_col, pixel_y_to_row, ClickState, InputEvent};
use storage::{MemoryStorage, Storage};
use time::FrameClock;

/// Query the grid container's bounding rect and convert pixel coordinates to a cell.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let col = pixel_x_to_col(mouse_x as f64 - rect.left(), rect.width(), cs.terminal_cols)?;
    let row = pixel_y_to_row(mouse_y as f64 - rect.top(), rect.height(), cs.terminal_rows)?;
    Some((col, row))
}

#[cfg(target_arch = "wasm32")]
fn open_storage() -> Box<dyn Storage> {
    match storage::LocalStorage::open() {
        Some(storage) => Box::new(storage),
        None => {
            console::warn("localStorage が使えません。進行状況は保存されません");
            Box::new(MemoryStorage::new())
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn open_storage() -> Box<dyn Storage> {
    Box::new(MemoryStorage::new())
}

/// `?ref=<id>` from the page URL.
fn referral_from_url() -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    params.get("ref")
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

fn set_document_title(title: &str) {
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        document.set_title(title);
    }
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let store = Store::new(open_storage());
    let referrer = referral_from_url();
    let mut game = CoinGame::load(store, CoinRng::from_entropy(), referrer.as_deref());
    game.subscribe(|state| {
        set_document_title(&format!("{} coins · MAY COIN", format_coins(state.balance)));
    });
    set_document_title(&format!("{} coins · MAY COIN", format_coins(game.state.balance)));

    let game = Rc::new(RefCell::new(game));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Mouse/touch click handler
    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let cs = click_state.borrow();
            if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                return;
            }
            let Some((col, row)) = dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs) else {
                return;
            };
            let action = cs.hit_test(col, row);
            drop(cs);

            if let Some(action_id) = action {
                game.borrow_mut().handle_input(&InputEvent::Click(action_id));
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            let event = match key_event.code {
                KeyCode::Char(c) => InputEvent::Key(c),
                KeyCode::Tab => InputEvent::Key('\t'),
                KeyCode::Enter => InputEvent::Submit,
                KeyCode::Backspace => InputEvent::Erase,
                KeyCode::Esc => InputEvent::Cancel,
                _ => return,
            };
            game.borrow_mut().handle_input(&event);
        }
    });

    terminal.draw_web({
        let click_state = click_state.clone();
        let mut clock = FrameClock::new();
        move |f| {
            let delta_ticks = clock.advance(now_ms());
            let mut game = game.borrow_mut();
            game.tick(delta_ticks);

            let size = f.area();
            {
                let mut cs = click_state.borrow_mut();
                cs.terminal_cols = size.width;
                cs.terminal_rows = size.height;
                cs.clear_targets();
            }
            game.render(f, size, &click_state);
        }
    });

    Ok(())
}
