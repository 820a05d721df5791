use clap::Subcommand;
use clap_handler::Handler;
use hikari::Client;
use hikari_goodgame::extract::GoodGameExtractor;
use hikari_plugin::{ExtractRegistry, ExtractorArgs, ExtractorEntry};

mod extract;
mod list;

#[derive(Subcommand, Clone, Handler)]
pub enum HikariCommand {
    Extract(extract::ExtractCommand),
    List(list::ListCommand),
}

pub(crate) fn default_registry(
    args: &ExtractorArgs,
    client: Client,
) -> anyhow::Result<ExtractRegistry> {
    let mut registry = ExtractRegistry::new();
    registry.add(GoodGameExtractor, args, client)?;
    Ok(registry)
}

/// Help entries of the bundled extractors, available without valid extractor configuration.
pub(crate) fn default_extractors() -> Vec<ExtractorEntry> {
    vec![ExtractorEntry::describe(&GoodGameExtractor)]
}
