//! Debounced search-as-you-type

use crate::model::QueryChange;
use super::AppController;

impl AppController {
    /// Records the new query text and (re)starts the debounce timer.
    ///
    /// A blank query returns to browsing immediately and cancels any pending timer.
    pub async fn set_search_query(&self, text: String) {
        let change = self.model.update_search_query(text).await;

        let mut timer = self.search_timer.lock().await;
        if let Some(handle) = timer.take() {
            handle.abort();
        }

        match change {
            QueryChange::Cleared => {
                tracing::debug!("Search cleared, showing browse feeds");
            }
            QueryChange::Debounce(query) => {
                let controller = self.clone();
                let delay = self.search_debounce;
                *timer = Some(tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    controller.dispatch_search(query).await;
                }));
            }
        }
    }

    pub async fn append_to_search(&self, c: char) {
        let mut query = self.model.get_search_query().await;
        query.push(c);
        self.set_search_query(query).await;
    }

    pub async fn backspace_search(&self) {
        let mut query = self.model.get_search_query().await;
        if query.pop().is_some() {
            self.set_search_query(query).await;
        }
    }

    /// Commits the query and sends it in its own task, so a later keystroke
    /// only cancels the timer and never the request itself.
    async fn dispatch_search(&self, query: String) {
        let Some(ticket) = self.model.commit_search(&query).await else {
            tracing::trace!(query = %query, "Debounced query no longer current");
            return;
        };

        tracing::debug!(query = %ticket.query, seq = ticket.seq, "Performing search");
        let controller = self.clone();
        tokio::spawn(async move {
            let response = match controller.api.search_movies(&ticket.query).await {
                Ok(page) => {
                    tracing::info!(
                        query = %ticket.query,
                        results = page.results.len(),
                        "Search completed successfully"
                    );
                    Ok(page.results)
                }
                Err(e) => Err(Self::format_error(&e)),
            };

            if !controller.model.apply_search_response(ticket.seq, response).await {
                tracing::debug!(
                    query = %ticket.query,
                    seq = ticket.seq,
                    "Discarded superseded search response"
                );
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::{Instant, sleep};

    use crate::controller::testing::{FakeApi, controller, movie};
    use crate::model::SearchMode;

    #[tokio::test(start_paused = true)]
    async fn keystroke_burst_issues_a_single_search() {
        let api = Arc::new(FakeApi::default().with_search("Inc", 0, vec![movie(1, "Inception")]));
        let controller = controller(api.clone());

        controller.set_search_query("I".into()).await;
        sleep(Duration::from_millis(100)).await;
        controller.set_search_query("In".into()).await;
        sleep(Duration::from_millis(100)).await;
        controller.set_search_query("Inc".into()).await;
        let last_keystroke = Instant::now();

        sleep(Duration::from_millis(499)).await;
        assert!(api.search_calls().is_empty());

        sleep(Duration::from_millis(1000)).await;
        let calls = api.search_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "Inc");
        assert!(calls[0].1.duration_since(last_keystroke) >= Duration::from_millis(500));

        let home = controller.model.get_home_state().await;
        assert_eq!(home.search.mode, SearchMode::Results);
        assert_eq!(home.search.results, vec![movie(1, "Inception")]);
    }

    #[tokio::test(start_paused = true)]
    async fn late_response_for_old_query_does_not_overwrite() {
        let api = Arc::new(
            FakeApi::default()
                .with_search("cat", 1000, vec![movie(1, "Cat People")])
                .with_search("dog", 10, vec![movie(2, "Dog Day Afternoon")]),
        );
        let controller = controller(api.clone());

        controller.set_search_query("cat".into()).await;
        // "cat" goes out at 500 ms and settles at 1500 ms.
        sleep(Duration::from_millis(600)).await;
        controller.set_search_query("dog".into()).await;

        sleep(Duration::from_millis(600)).await;
        let home = controller.model.get_home_state().await;
        assert_eq!(home.search.results, vec![movie(2, "Dog Day Afternoon")]);

        sleep(Duration::from_millis(1000)).await;
        let calls: Vec<String> = api.search_calls().into_iter().map(|(q, _)| q).collect();
        assert_eq!(calls, vec!["cat".to_string(), "dog".to_string()]);

        let home = controller.model.get_home_state().await;
        assert_eq!(home.search.results, vec![movie(2, "Dog Day Afternoon")]);
        assert_eq!(home.search.committed_query.as_deref(), Some("dog"));
    }

    #[tokio::test(start_paused = true)]
    async fn whitespace_query_returns_to_browsing() {
        let api = Arc::new(FakeApi::default().with_search("dog", 0, vec![movie(2, "Dog Day")]));
        let controller = controller(api.clone());

        controller.set_search_query("dog".into()).await;
        sleep(Duration::from_millis(600)).await;
        assert!(!controller.model.get_home_state().await.search.results.is_empty());

        controller.set_search_query("   ".into()).await;

        let home = controller.model.get_home_state().await;
        assert_eq!(home.search.mode, SearchMode::Browsing);
        assert!(!home.search.is_loading());
        assert!(!home.is_browse_loading());
        assert!(home.search.results.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn clearing_before_the_timer_fires_sends_nothing() {
        let api = Arc::new(FakeApi::default());
        let controller = controller(api.clone());

        controller.set_search_query("star".into()).await;
        sleep(Duration::from_millis(300)).await;
        controller.set_search_query(String::new()).await;
        sleep(Duration::from_millis(2000)).await;

        assert!(api.search_calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn failed_search_shows_no_results() {
        let api = Arc::new(FakeApi {
            failing_search: true,
            ..FakeApi::default()
        });
        let controller = controller(api.clone());

        controller.set_search_query("zzz".into()).await;
        sleep(Duration::from_millis(600)).await;

        let home = controller.model.get_home_state().await;
        assert_eq!(home.search.mode, SearchMode::Results);
        assert!(home.search.results.is_empty());
        assert!(home.search.last_error.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn typing_and_backspace_edit_the_query() {
        let api = Arc::new(FakeApi::default());
        let controller = controller(api.clone());

        for c in "up!".chars() {
            controller.append_to_search(c).await;
        }
        controller.backspace_search().await;
        sleep(Duration::from_millis(600)).await;

        let calls: Vec<String> = api.search_calls().into_iter().map(|(q, _)| q).collect();
        assert_eq!(calls, vec!["up".to_string()]);
    }
}
