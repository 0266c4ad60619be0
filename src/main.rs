// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! parley-net CLI
//!
//! Inspect the requests the SDK would make against a chat API.

use std::env;
use std::process::ExitCode;

use anyhow::Context;

use parley_net::network::RequestLogger;
use parley_net::{
    extract_error_message, ImageKind, RequestConfigurator, SdkConfig, SharedConfig,
};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("parley_net=info".parse().unwrap()),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    let result = match args[1].as_str() {
        "image" => {
            if args.len() < 4 {
                eprintln!("Usage: parley-net image <message|media> <id>");
                return ExitCode::from(1);
            }
            show_image(&args[2], &args[3])
        }
        "get" => {
            if args.len() < 3 {
                eprintln!("Usage: parley-net get <path>");
                return ExitCode::from(1);
            }
            get_path(&args[2]).await
        }
        "--help" | "-h" | "help" => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        "--version" | "-v" | "version" => {
            println!("parley-net {}", parley_net::VERSION);
            return ExitCode::SUCCESS;
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            return ExitCode::from(1);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"parley-net - Parley chat API networking

USAGE:
    parley-net <COMMAND> [OPTIONS]

COMMANDS:
    image <message|media> <id>   Print an authenticated image URL and its headers
    get <path>                   GET a path relative to the base URL
    help                         Show this help message
    version                      Show version information

ENVIRONMENT:
    PARLEY_BASE_URL        API base URL, with trailing slash (required)
    PARLEY_SECRET          Application secret (required)
    PARLEY_DEVICE_ID       Device identifier (required)
    PARLEY_AUTHORIZATION   User authorization token
    PARLEY_HEADERS         Additional headers, name:value,name:value
    PARLEY_LOG_ERROR_BODIES  Log bodies of failed responses with `get` (1/true/yes),
                             shown at debug level (RUST_LOG=parley_net=debug)

EXAMPLES:
    parley-net image message 42
    parley-net get messages
"#
    );
}

fn configurator() -> anyhow::Result<RequestConfigurator> {
    let config = SdkConfig::from_env().context("failed to load configuration")?;
    Ok(RequestConfigurator::new(SharedConfig::new(config)))
}

fn show_image(kind: &str, id: &str) -> anyhow::Result<()> {
    let kind = match kind {
        "message" => ImageKind::Message,
        "media" => ImageKind::Media,
        other => anyhow::bail!("unknown image kind '{}', expected message or media", other),
    };

    let image = configurator()?.build_image_url(kind, id);

    println!("URL: {}", image.url());
    for header in image.headers() {
        println!("  {}: {}", header.name, header.value);
    }
    Ok(())
}

async fn get_path(path: &str) -> anyhow::Result<()> {
    let configurator = configurator()?;
    configurator.config().update(|c| {
        if c.interceptor.is_none() {
            c.interceptor = Some(std::sync::Arc::new(RequestLogger::from_env()));
        }
    });

    let client = configurator
        .build_rest_client()
        .context("failed to build REST client")?;
    let response = client
        .get(path)
        .await
        .with_context(|| format!("GET {} failed", path))?;

    println!("Status: {}", response.status);
    println!("Time: {}ms", response.response_time_ms);

    if response.is_success() {
        println!("\n{}", response.text_lossy());
        Ok(())
    } else {
        anyhow::bail!("{}", extract_error_message(&response))
    }
}
