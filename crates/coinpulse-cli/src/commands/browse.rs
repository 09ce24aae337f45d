use coinpulse_core::{AssetId, MarketStore};

use crate::cli::BrowseArgs;
use crate::error::CliError;

use super::{detail, list, CommandResult};

/// Walk the listing and then each requested detail, leaving the detail view
/// between assets the way a user navigating back would.
pub async fn run(args: &BrowseArgs, store: &MarketStore) -> Result<CommandResult, CliError> {
    let ids = args
        .ids
        .iter()
        .map(|raw| AssetId::parse(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let mut result = CommandResult::default();
    result.push(list::load(store).await);

    for id in ids {
        result.push(detail::load(store, id).await);
        store.clear_detail();
    }

    Ok(result)
}
