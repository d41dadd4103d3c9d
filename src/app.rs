//! Application setup and window creation.

use gpui::{App, Bounds, WindowBounds, WindowOptions, prelude::*, px, size};
use gpui_component::Root;
use log::error;

use crate::config::GameConfig;
use crate::models::GameModel;
use crate::ui::BoardLayout;
use crate::ui::views::ChessBoardView;

/// Initialize and run the chess application
pub fn run(cx: &mut App, config: GameConfig) {
    gpui_component::init(cx);

    // Create the game model
    let model = cx.new(|_| GameModel::new(&config));

    let layout = BoardLayout::new(config.board_size);
    let bounds = Bounds::centered(
        None,
        size(px(layout.window_width()), px(layout.window_height())),
        cx,
    );
    let opened = cx.open_window(
        WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(bounds)),
            ..Default::default()
        },
        |window, cx| {
            let view = cx.new(|cx| ChessBoardView::new(model, cx));
            cx.new(|cx| Root::new(view, window, cx))
        },
    );

    if let Err(err) = opened {
        error!("Failed to open window: {:#}", err);
        cx.quit();
    }
}
