//! Basic swipe menu demo.
//!
//! Three pages with a scrollable title strip. Click a title or use
//! Left/Right to switch pages, drag the content area to swipe, press `q`
//! or Esc to quit.
//!
//! Run with: `cargo run --example basic`

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor::{Hide, Show},
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};

use swipe_menu::{
    Attr, ChildId, ChildScreen, FrameBuffer, MenuOptions, Rect, Rgba, SwipeMenuController,
    SwipeMenuDelegate, TextAlign,
};

/// A page showing a headline centered in a colored band.
struct TextPage {
    headline: String,
    accent: Rgba,
}

impl ChildScreen for TextPage {
    fn render(&mut self, frame: &mut FrameBuffer, area: Rect) {
        let row = area.height / 2;
        frame.draw_text_aligned(
            area,
            row,
            &self.headline,
            TextAlign::Center,
            self.accent,
            Rgba::TRANSPARENT,
            Attr::BOLD,
            None,
        );
        frame.draw_text_aligned(
            area,
            row + 2,
            "click titles · drag to swipe · q quits",
            TextAlign::Center,
            Rgba::GRAY,
            Rgba::TRANSPARENT,
            Attr::DIM,
            None,
        );
    }
}

struct Host {
    titles: Vec<String>,
}

impl SwipeMenuDelegate for Host {
    fn title_for(&mut self, _position: usize, child: ChildId) -> Option<String> {
        self.titles.get(child.raw() as usize).cloned()
    }

    fn on_selected(&mut self, position: usize, _child: ChildId) {
        log::info!("selected page {position}");
    }

    fn on_repeat_selected(&mut self, position: usize, _child: ChildId) {
        log::info!("page {position} selected again");
    }
}

fn main() -> swipe_menu::Result<()> {
    env_logger::init();

    let host = Host {
        titles: vec!["Home".into(), "Messages".into(), "Settings".into()],
    };

    let options = MenuOptions {
        title_selected_color: Rgba::from_hex("#ffb86c").unwrap_or(Rgba::ORANGE),
        line_color: Rgba::from_hex("#ffb86c").unwrap_or(Rgba::ORANGE),
        title_attrs: Attr::BOLD,
        ..Default::default()
    };

    let mut menu = SwipeMenuController::new(options, Box::new(host));

    let pages = [
        ("Welcome home", Rgba::from_rgb_int(0x8be9fd)),
        ("No new messages", Rgba::from_rgb_int(0x50fa7b)),
        ("Nothing to configure", Rgba::from_rgb_int(0xbd93f9)),
    ];
    for (headline, accent) in pages {
        menu.add_child(Box::new(TextPage {
            headline: headline.to_string(),
            accent,
        }));
    }
    menu.update_current_index(0);

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, Hide)?;

    let result = run(&mut menu, &mut stdout);

    execute!(stdout, Show, DisableMouseCapture, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    result
}

fn run<W: Write>(menu: &mut SwipeMenuController, out: &mut W) -> swipe_menu::Result<()> {
    let (width, height) = crossterm::terminal::size()?;
    menu.resize(width, height);
    menu.draw(out)?;

    loop {
        if event::poll(Duration::from_millis(33))? {
            match event::read()? {
                Event::Key(key) if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) => {
                    return Ok(());
                }
                other => {
                    menu.handle_event(&other);
                }
            }
        }
        menu.tick();
        menu.draw(out)?;
    }
}
