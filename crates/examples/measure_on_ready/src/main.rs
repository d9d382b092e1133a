//! Measures the component's rendered area once the first frame is on screen.
//!
//! The panel shows a placeholder while its first frame is still being drawn;
//! `on_view_ready` then records the laid-out geometry, and every later frame
//! displays it. Press `q` to quit.

use afterframe::prelude::*;
use parking_lot::Mutex;
use ratatui::{
    layout::Alignment,
    widgets::{Block, Borders, Paragraph},
};

static MEASURED: Mutex<Option<(Rect, u64)>> = Mutex::new(None);

#[derive(Clone)]
struct MeasurePanel;

impl Component for MeasurePanel {
    fn render(&self, area: Rect, frame: &mut Frame) {
        let body = match *MEASURED.lock() {
            Some((rect, frame_index)) => format!(
                "laid out at {}x{} (origin {},{}) on frame {}",
                rect.width, rect.height, rect.x, rect.y, frame_index
            ),
            None => "measuring...".to_string(),
        };

        let panel = Paragraph::new(body).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .title("measure_on_ready (q quits)"),
        );
        frame.render_widget(panel, area);
    }
}

impl ViewReady for MeasurePanel {
    fn on_view_ready(&self, view: &ViewHandle) {
        tracing::info!(area = ?view.area(), frame = view.frame_index(), "first frame measured");
        *MEASURED.lock() = Some((view.area(), view.frame_index()));
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    afterframe::setup_panic_handler();

    afterframe::run(|| Ready::new(MeasurePanel))?;
    Ok(())
}
