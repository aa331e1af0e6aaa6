use crate::app::{AppContext, BirthboardError, Result};
use crate::board::{BirthdayBoard, ResultPanel};
use crate::domain::DateSelection;

/// Only month and day reach the service; a leap year keeps February 29 intact
/// in the printed heading.
const LABEL_YEAR: i32 = 2000;

pub async fn print_births(
    ctx: &AppContext,
    month: u32,
    day: u32,
    search: Option<&str>,
) -> Result<()> {
    let mut board = BirthdayBoard::new();
    let selection = DateSelection::new(LABEL_YEAR, month.saturating_sub(1), day);
    board.load(ctx.fetcher.as_ref(), selection).await?;

    if let Some(query) = search {
        board.set_search_query(query);
    }

    for line in report(&board)? {
        println!("{}", line);
    }
    Ok(())
}

/// Lines printed for a settled board, or the lookup failure.
fn report(board: &BirthdayBoard) -> Result<Vec<String>> {
    let heading = board
        .selected_date()
        .map(|date| format!("Birthdays on {}", date))
        .unwrap_or_else(|| "Birthdays".to_string());

    match board.result_panel() {
        ResultPanel::Entries(entries) => {
            let mut lines = vec![heading];
            if entries.is_empty() {
                lines.push("No births".to_string());
            }
            lines.extend(entries.iter().map(|entry| entry.display_text()));
            Ok(lines)
        }
        ResultPanel::Failed(message) => Err(BirthboardError::Other(message.to_string())),
        ResultPanel::NoDateSelected | ResultPanel::Loading => Ok(vec![heading]),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::config::Config;
    use crate::domain::{BirthEntry, BirthPayload};
    use crate::fetcher::BirthdayFetcher;

    struct StaticFetcher(Option<Vec<&'static str>>);

    #[async_trait]
    impl BirthdayFetcher for StaticFetcher {
        async fn fetch(&self, _month: &str, _day: &str) -> Result<BirthPayload> {
            match &self.0 {
                Some(texts) => Ok(BirthPayload::new(
                    texts.iter().map(|t| BirthEntry::new(*t)).collect(),
                )),
                None => Err(BirthboardError::Other("HTTP error: 503".into())),
            }
        }
    }

    fn context(fetcher: StaticFetcher) -> AppContext {
        AppContext::with_fetcher(Config::default(), Arc::new(fetcher))
    }

    #[tokio::test]
    async fn report_lists_filtered_entries() {
        let ctx = context(StaticFetcher(Some(vec!["Ada Lovelace", "Alan Turing"])));
        let mut board = BirthdayBoard::new();
        board
            .load(ctx.fetcher.as_ref(), DateSelection::new(LABEL_YEAR, 1, 29))
            .await
            .unwrap();
        board.set_search_query("TURING");

        let lines = report(&board).unwrap();
        assert_eq!(lines, vec!["Birthdays on February 29", "Alan Turing"]);
    }

    #[tokio::test]
    async fn report_notes_empty_result() {
        let ctx = context(StaticFetcher(Some(vec![])));
        let mut board = BirthdayBoard::new();
        board
            .load(ctx.fetcher.as_ref(), DateSelection::new(LABEL_YEAR, 0, 1))
            .await
            .unwrap();

        let lines = report(&board).unwrap();
        assert_eq!(lines, vec!["Birthdays on January 01", "No births"]);
    }

    #[tokio::test]
    async fn failure_becomes_error() {
        let ctx = context(StaticFetcher(None));
        let err = print_births(&ctx, 3, 14, None).await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP error: 503");
    }
}
