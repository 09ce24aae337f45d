use coinpulse_core::MarketStore;

use crate::cli::ListArgs;
use crate::error::CliError;

use super::{currency_of, CommandResult, View};

pub async fn run(args: &ListArgs, store: &MarketStore) -> Result<CommandResult, CliError> {
    if let Some(term) = &args.search {
        store.set_search_term(term.as_str());
    }
    Ok(CommandResult::single(load(store).await))
}

/// Load the listing and project it through the store's current search term.
pub(super) async fn load(store: &MarketStore) -> View {
    store.load_list().await;

    let state = store.list_state();
    if let Some(error) = state.error() {
        return View::Failure {
            resource: String::from("list"),
            error: error.clone(),
        };
    }

    let term = store.search_term();
    View::List {
        currency: currency_of(store),
        search: (!term.trim().is_empty()).then_some(term),
        assets: store.filtered_list(),
    }
}
