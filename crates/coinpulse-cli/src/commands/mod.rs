mod browse;
mod detail;
mod list;

use std::sync::Arc;

use coinpulse_core::{
    Asset, AssetDetail, ClientConfig, Currency, FetchError, MarketService, MarketStore,
    ReqwestHttpClient,
};

use tracing::{debug, info};

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// One rendered screen: the listing, a detail page, or a failure in place of either.
#[derive(Debug, Clone)]
pub enum View {
    List {
        currency: Currency,
        search: Option<String>,
        assets: Arc<Vec<Asset>>,
    },
    Detail {
        currency: Currency,
        detail: Arc<AssetDetail>,
    },
    /// Nothing to show: the detail view was left before its load settled.
    Empty { resource: String },
    Failure {
        resource: String,
        error: FetchError,
    },
}

#[derive(Debug, Default)]
pub struct CommandResult {
    pub views: Vec<View>,
}

impl CommandResult {
    pub fn single(view: View) -> Self {
        Self { views: vec![view] }
    }

    pub fn push(&mut self, view: View) {
        self.views.push(view);
    }

    pub fn has_failures(&self) -> bool {
        self.views
            .iter()
            .any(|view| matches!(view, View::Failure { .. }))
    }
}

pub async fn run(cli: &Cli) -> Result<CommandResult, CliError> {
    let config = build_config(cli)?;
    debug!(
        base_url = %config.base(),
        currency = %config.vs_currency,
        proxied = config.proxied,
        timeout_ms = config.timeout_ms,
        "client configuration resolved"
    );
    info!(command = command_name(&cli.command), "running command");

    let service = MarketService::with_http_client(config, Arc::new(ReqwestHttpClient::new()));
    let store = MarketStore::new(Arc::new(service));

    match &cli.command {
        Command::List(args) => list::run(args, &store).await,
        Command::Detail(args) => detail::run(args, &store).await,
        Command::Browse(args) => browse::run(args, &store).await,
    }
}

/// Environment configuration with command-line flags layered on top.
fn build_config(cli: &Cli) -> Result<ClientConfig, CliError> {
    let mut config = ClientConfig::from_env()?;

    if let Some(currency) = &cli.currency {
        config = config.with_currency(currency.parse()?);
    }
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.as_str());
    }
    if cli.proxied {
        config = config.with_proxied(true);
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config = config.with_timeout_ms(timeout_ms);
    }

    config.validate()?;
    Ok(config)
}

const fn command_name(command: &Command) -> &'static str {
    match command {
        Command::List(_) => "list",
        Command::Detail(_) => "detail",
        Command::Browse(_) => "browse",
    }
}

fn currency_of(store: &MarketStore) -> Currency {
    store.service().config().vs_currency
}
