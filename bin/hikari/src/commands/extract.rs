use std::time::Duration;

use clap::{Args, Parser};
use clap_handler::handler;
use hikari::{http::HttpOptions, ExtractError};
use hikari_plugin::ExtractorArgs;

use super::default_registry;

#[derive(Parser, Clone, Default)]
#[clap(name = "extract", visible_alias = "x", short_flag = 'X')]
pub struct ExtractCommand {
    #[clap(flatten)]
    pub http: HttpArgs,

    /// Additional arguments passed to extractors.
    ///
    /// Format: key=value
    #[clap(short = 'e', long = "arg")]
    pub extractor_args: Vec<String>,

    /// Print the media info on a single line
    #[clap(long)]
    pub compact: bool,

    /// URL to resolve
    pub url: String,
}

#[derive(Args, Clone, Debug)]
pub struct HttpArgs {
    /// Additional HTTP headers
    #[clap(short = 'H', long = "header")]
    pub headers: Vec<String>,

    /// HTTP timeout, in seconds
    #[clap(short, long, default_value = "10", env = "HIKARI_TIMEOUT")]
    pub timeout: u64,

    /// User agent to send, a random Chrome one by default
    #[clap(long, env = "HIKARI_USER_AGENT")]
    pub user_agent: Option<String>,
}

impl Default for HttpArgs {
    fn default() -> Self {
        Self {
            headers: Vec::new(),
            timeout: 10,
            user_agent: None,
        }
    }
}

impl From<HttpArgs> for HttpOptions {
    fn from(args: HttpArgs) -> Self {
        HttpOptions {
            headers: args.headers,
            timeout: Duration::from_secs(args.timeout),
            user_agent: args.user_agent,
        }
    }
}

#[handler(ExtractCommand)]
async fn handle_extract(this: ExtractCommand) -> anyhow::Result<()> {
    let client = HttpOptions::from(this.http).into_client()?;
    let args = ExtractorArgs::from_key_value(&this.extractor_args)?;
    let registry = default_registry(&args, client)?;

    let output = match registry.extract(&this.url).await {
        Ok(output) => output,
        Err(ExtractError::Offline(channel)) => {
            eprintln!("{channel} is offline");
            std::process::exit(2);
        }
        Err(e) => return Err(e.into()),
    };
    log::info!(
        "{}: resolved {} {}",
        output.extractor,
        output.kind,
        output.info.id
    );

    let json = if this.compact {
        serde_json::to_string(&output.info)?
    } else {
        serde_json::to_string_pretty(&output.info)?
    };
    println!("{json}");

    Ok(())
}
