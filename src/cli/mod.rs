mod args;
mod commands;
mod context;
mod dispatch;
mod output;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use console::style;
use tracing::debug;

use crate::core::api::auth::TokenProvider;
use crate::core::api::http::HttpResourceClient;
use crate::core::config::AzaConfig;
use crate::core::enrich::Enricher;
use crate::core::error::AzaError;
use crate::core::paginate::{MAX_PAGE_SIZE, PageRequest};
use crate::core::present::OutputMode;
use crate::core::terminal::{self, GuideSection};

use self::args::{CliArgs, parse_args};
use self::commands::Command;
use self::context::CommandContext;

fn print_help() {
    println!("{} - Azure AI Agents debugging CLI", style("aza").bold());

    GuideSection::new("Agents & Threads")
        .command("agents list", "List agents")
        .command("agents show <agentId>", "Show one agent")
        .command("threads list", "List threads")
        .command("threads show <threadId>", "Show one thread")
        .command("threads runs list <threadId>", "List runs of a thread (alias: runs list)")
        .command("threads runs show <threadId> <runId>", "Show one run (alias: runs show)")
        .print();

    GuideSection::new("Vector Stores & Files")
        .command("vs list", "List vector stores")
        .command("vs show <vectorStoreId>", "Show one vector store")
        .command("vs files list <vectorStoreId>", "List files in a vector store")
        .command("vs files show <vectorStoreId> <fileId>", "Show one vector store file")
        .command("files list", "List uploaded files")
        .command("files show <fileId>", "Show one file")
        .print();

    GuideSection::new("Global Flags")
        .command("-p, --project <endpoint>", "Project endpoint (or AZA_PROJECT)")
        .command("--api-version <ver>", "API version (default v1 or AZA_API_VERSION)")
        .command("--json", "Print converted JSON")
        .command("--raw", "Print the response body untouched")
        .command("--limit <n>", "Page size, at most 100")
        .command("--order <asc|desc>", "Sort order (default desc)")
        .command("--after <id> / --before <id>", "Start or end cursor")
        .command("--concurrency <n>", "Parallel detail fetches (default 5)")
        .command("--config <path>", "Config file (default ~/.aza/config.toml)")
        .command("--debug", "Log HTTP traffic to stderr")
        .command("-h, --help", "Show this help")
        .print();

    GuideSection::new("Examples")
        .text("AZA_PROJECT=https://myendpoint/projects/12345/v1 aza agents list")
        .text("aza -p https://myendpoint/projects/12345/v1 vs list --json")
        .blank()
        .text("aza vs files show vst_123456789 file_abcdef")
        .print();

    println!(
        "\n {} {} <command> [subcommand] [flags]\n",
        style("Usage:").bold(),
        style("aza").green()
    );
}

/// Layer flags over the file and environment settings.
async fn resolve_config(args: &CliArgs) -> Result<AzaConfig> {
    let path = args
        .config
        .clone()
        .or_else(|| std::env::var("AZA_CONFIG").ok().map(PathBuf::from));
    let mut config = AzaConfig::load(path.as_deref()).await?;
    config.apply_env(|key| std::env::var(key).ok())?;

    if let Some(project) = &args.project {
        config.project = Some(project.clone());
    }
    if let Some(version) = &args.api_version {
        config.api_version = version.clone();
    }
    if let Some(concurrency) = args.concurrency {
        config.concurrency = concurrency;
    }
    if let Some(limit) = args.limit {
        config.page_size = Some(limit);
    }
    config.debug |= args.debug;
    Ok(config)
}

pub async fn run_main() -> Result<()> {
    let argv: Vec<String> = std::env::args().collect();
    let args = parse_args(&argv, 1)?;

    if args.help || args.positional.first().map(String::as_str) == Some("help") {
        print_help();
        return Ok(());
    }

    let command = Command::parse(&args.positional)?;
    let config = resolve_config(&args).await?;
    crate::logging::init(config.debug);
    debug!(
        "Project {:?}, api-version {}, concurrency {}, page size {:?}",
        config.project, config.api_version, config.concurrency, config.page_size
    );

    let Some(project) = config.project.clone() else {
        return Err(
            AzaError::usage("Missing project endpoint: provide --project or AZA_PROJECT").into(),
        );
    };

    if command.is_list() && config.page_size.is_some_and(|size| size > MAX_PAGE_SIZE) {
        terminal::print_warn(&format!("Page size is capped at {}", MAX_PAGE_SIZE));
    }

    let tokens = TokenProvider::new(config.token_source());
    let client = HttpResourceClient::new(project, config.api_version.clone(), tokens)?;
    let page = PageRequest {
        limit: config.page_size,
        order: Some(args.order.unwrap_or_default()),
        after: args.after.clone(),
        before: args.before.clone(),
    };
    let ctx = CommandContext::new(
        Arc::new(client),
        OutputMode::from_flags(args.json, args.raw),
        page,
        Enricher::new(config.concurrency),
    );

    let presented = dispatch::execute(&ctx, &command).await?;
    output::emit(&presented)
}
