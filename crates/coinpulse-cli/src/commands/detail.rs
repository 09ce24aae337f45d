use coinpulse_core::{AssetId, MarketStore};

use crate::cli::DetailArgs;
use crate::error::CliError;

use super::{currency_of, CommandResult, View};

pub async fn run(args: &DetailArgs, store: &MarketStore) -> Result<CommandResult, CliError> {
    let id = AssetId::parse(&args.id)?;
    Ok(CommandResult::single(load(store, id).await))
}

pub(super) async fn load(store: &MarketStore, id: AssetId) -> View {
    let resource = format!("detail {id}");
    store.load_detail(id).await;

    let state = store.detail_state();
    match (state.data(), state.error()) {
        (_, Some(error)) => View::Failure {
            resource,
            error: error.clone(),
        },
        (Some(detail), None) => View::Detail {
            currency: currency_of(store),
            detail: detail.clone(),
        },
        // Neither is set only when the detail view was cleared mid-flight.
        (None, None) => View::Empty { resource },
    }
}
