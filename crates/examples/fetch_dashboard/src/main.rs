//! Starts a data fetch only after the dashboard's first frame is laid out,
//! sized to the rendered viewport. The fetch is fire-and-forget: the hook
//! spawns it once and the render loop keeps drawing while it completes.
//! Press `q` to quit.

use std::time::Duration;

use afterframe::prelude::*;
use parking_lot::Mutex;
use ratatui::widgets::{Block, Borders, List, ListItem};

static ROWS: Mutex<Vec<String>> = Mutex::new(Vec::new());

#[derive(Clone)]
struct Dashboard;

impl Component for Dashboard {
    fn render(&self, area: Rect, frame: &mut Frame) {
        use_view_ready_async(|view| {
            // Fetch one row per visible line, minus the border.
            let visible_rows = view.area().height.saturating_sub(2);
            async move {
                tracing::info!(visible_rows, "loading dashboard rows");
                tokio::time::sleep(Duration::from_millis(400)).await;
                let mut rows = ROWS.lock();
                for n in 1..=visible_rows {
                    rows.push(format!("row {n} of {visible_rows}"));
                }
            }
        });

        let rows = ROWS.lock();
        let items: Vec<ListItem> = if rows.is_empty() {
            vec![ListItem::new("loading...")]
        } else {
            rows.iter().map(|row| ListItem::new(row.clone())).collect()
        };

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title("fetch_dashboard (q quits)"),
        );
        frame.render_widget(list, area);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    tokio::task::block_in_place(|| afterframe::run(|| Dashboard))?;
    Ok(())
}
