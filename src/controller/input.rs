//! Key event handling

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::{ActiveSection, ContentView, GRID_COLUMNS, MoveDirection, Tab};
use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        let model = &self.model;

        // Error message blocks all other interactions
        if model.has_error().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                model.clear_error().await;
            }
            return;
        }

        if model.is_help_popup_open().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                model.toggle_help_popup().await;
            }
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
        {
            model.set_should_quit(true).await;
            return;
        }

        let ui_state = model.get_ui_state().await;
        let view = model.current_view().await;

        // Detail screen, including while its request is in flight
        if matches!(
            view,
            ContentView::MovieDetail { .. }
                | ContentView::LoadingDetail { .. }
                | ContentView::DetailUnavailable { .. }
        ) {
            match key.code {
                KeyCode::Esc | KeyCode::Backspace | KeyCode::Left => self.go_back().await,
                KeyCode::Char('f') | KeyCode::Char('F') => self.toggle_favorite().await,
                KeyCode::Char('?') => model.toggle_help_popup().await,
                KeyCode::Char('q') | KeyCode::Char('Q') => model.set_should_quit(true).await,
                _ => {}
            }
            return;
        }

        // Search input when the search bar has focus
        if ui_state.active_tab == Tab::Home && ui_state.active_section == ActiveSection::Search {
            match key.code {
                KeyCode::Tab => model.cycle_section().await,
                KeyCode::Down | KeyCode::Enter => {
                    model.set_active_section(ActiveSection::MainContent).await;
                }
                KeyCode::Esc => self.set_search_query(String::new()).await,
                KeyCode::Backspace => self.backspace_search().await,
                KeyCode::Char(c) => self.append_to_search(c).await,
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Up => self.move_selection(view, MoveDirection::Up).await,
            KeyCode::Down => self.move_selection(view, MoveDirection::Down).await,
            KeyCode::Left => self.move_selection(view, MoveDirection::Left).await,
            KeyCode::Right => self.move_selection(view, MoveDirection::Right).await,
            KeyCode::Enter => {
                // Detail fetch runs in the background so the UI keeps drawing
                let controller = self.clone();
                tokio::spawn(async move {
                    controller.open_selected().await;
                });
            }
            KeyCode::Tab | KeyCode::BackTab if ui_state.active_tab == Tab::Home => {
                model.cycle_section().await;
            }
            KeyCode::Char('/') | KeyCode::Esc if ui_state.active_tab == Tab::Home => {
                model.set_active_section(ActiveSection::Search).await;
            }
            KeyCode::Char('1') => self.switch_tab(Tab::Home).await,
            KeyCode::Char('2') => self.switch_tab(Tab::Saved).await,
            KeyCode::Char('?') => model.toggle_help_popup().await,
            KeyCode::Char('q') | KeyCode::Char('Q') => model.set_should_quit(true).await,
            _ => {}
        }
    }

    async fn move_selection(&self, view: ContentView, direction: MoveDirection) {
        match view {
            ContentView::Home => self.model.home_move(direction).await,
            ContentView::Saved { .. } => {
                let len = self.favorites.list_favorites().await.len();
                let delta = match direction {
                    MoveDirection::Up => -(GRID_COLUMNS as isize),
                    MoveDirection::Down => GRID_COLUMNS as isize,
                    MoveDirection::Left => -1,
                    MoveDirection::Right => 1,
                };
                self.model.move_saved_selection(delta, len).await;
            }
            ContentView::MovieDetail { .. }
            | ContentView::LoadingDetail { .. }
            | ContentView::DetailUnavailable { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use crate::controller::testing::{FakeApi, controller};
    use crate::model::{ActiveSection, ContentView, Tab};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test(start_paused = true)]
    async fn typing_in_search_bar_edits_the_query() {
        let controller = controller(Arc::new(FakeApi::default()));

        for c in "heat".chars() {
            controller.handle_key_event(key(KeyCode::Char(c))).await;
        }
        controller.handle_key_event(key(KeyCode::Backspace)).await;

        assert_eq!(controller.model.get_search_query().await, "hea");

        controller.handle_key_event(key(KeyCode::Esc)).await;
        assert_eq!(controller.model.get_search_query().await, "");
    }

    #[tokio::test]
    async fn q_types_in_search_but_quits_from_content() {
        let controller = controller(Arc::new(FakeApi::default()));

        controller.handle_key_event(key(KeyCode::Char('q'))).await;
        assert!(!controller.model.should_quit().await);

        controller.handle_key_event(key(KeyCode::Tab)).await;
        assert_eq!(
            controller.model.get_ui_state().await.active_section,
            ActiveSection::MainContent
        );
        controller.handle_key_event(key(KeyCode::Char('q'))).await;
        assert!(controller.model.should_quit().await);
    }

    #[tokio::test]
    async fn detail_keys_toggle_favorite_and_go_back() {
        let controller = controller(Arc::new(FakeApi::default()));
        controller.favorites.load().await;
        controller.load_browse_feeds().await;
        controller.handle_key_event(key(KeyCode::Tab)).await;

        controller.handle_key_event(key(KeyCode::Enter)).await;
        for _ in 0..50 {
            if matches!(controller.model.current_view().await, ContentView::MovieDetail { .. }) {
                break;
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }

        controller.handle_key_event(key(KeyCode::Char('f'))).await;
        assert!(controller.favorites.is_favorite(100).await);

        controller.handle_key_event(key(KeyCode::Esc)).await;
        assert!(matches!(controller.model.current_view().await, ContentView::Home));
    }

    #[tokio::test]
    async fn enter_while_detail_loads_is_ignored() {
        let controller = controller(Arc::new(FakeApi::default()));
        controller.load_browse_feeds().await;
        controller.switch_tab(Tab::Saved).await;
        controller.model.begin_detail(999).await;

        controller.handle_key_event(key(KeyCode::Enter)).await;
        tokio::task::yield_now().await;
        controller.open_selected().await;

        let content = controller.model.get_content_state().await;
        assert!(matches!(content.view, ContentView::LoadingDetail { movie_id: 999 }));
        assert_eq!(content.navigation_stack.len(), 1);
        assert_eq!(content.pending_detail, Some(999));

        controller.handle_key_event(key(KeyCode::Esc)).await;
        assert!(matches!(controller.model.current_view().await, ContentView::Saved { .. }));
    }

    #[tokio::test]
    async fn error_popup_swallows_keys_until_dismissed() {
        let controller = controller(Arc::new(FakeApi::default()));
        controller.model.set_error("boom".into()).await;

        controller.handle_key_event(key(KeyCode::Char('2'))).await;
        assert_eq!(controller.model.get_ui_state().await.active_tab, Tab::Home);

        controller.handle_key_event(key(KeyCode::Esc)).await;
        assert!(!controller.model.has_error().await);
    }
}
