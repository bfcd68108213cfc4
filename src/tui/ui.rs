use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{CoinDetail, CoinList, SearchBar, TitleBar};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Length(3), Min(0)]);
    let full_area = frame.area();
    let [title_area, search_area, list_area] = layout.areas(full_area);

    let view = app.view();

    TitleBar {
        status_message: &app.status_message,
        loading: view.loading,
        spinner_frame,
    }
    .render(frame, title_area);

    SearchBar {
        text: &app.query.search_text,
        sort_key: app.query.sort_key,
        focused: app.detail.is_none() && view.error.is_none(),
    }
    .render(frame, search_area);

    CoinList {
        state: &mut tui.list,
        view: &view,
        spinner_frame,
    }
    .render(frame, list_area);

    if let Some(record) = &app.detail {
        CoinDetail { record }.render(frame, full_area);
    }
}
