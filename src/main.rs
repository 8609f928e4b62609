//! Weibo Pictures - CLI entry point.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use weibo_pictures::{
    api::WeiboApi,
    cli::Args,
    config::{validate_config, Config},
    download::{collect_picture_urls, download_with_progress},
    error::{exit_codes, Error, Result},
    fs::{ensure_dir, write_url_list},
    output::{
        create_spinner, print_banner, print_collect_stats, print_config_summary,
        print_download_stats, print_error, print_info, print_success, print_user_info,
        print_warning,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            match e {
                Error::Config(_)
                | Error::ConfigValidation { .. }
                | Error::MissingConfig(_)
                | Error::TomlParse(_) => ExitCode::from(exit_codes::CONFIG_ERROR as u8),
                Error::Api(_) | Error::AccountNotFound(_) | Error::Http(_) => {
                    ExitCode::from(exit_codes::API_ERROR as u8)
                }
                Error::Download(_) | Error::Io(_) => {
                    ExitCode::from(exit_codes::DOWNLOAD_ERROR as u8)
                }
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    print_banner();

    // Load configuration
    let mut config = if args.config.exists() {
        Config::load(&args.config)?
    } else {
        tracing::debug!(
            "Configuration file not found: {}, using CLI arguments only",
            args.config.display()
        );
        Config::default()
    };

    args.merge_into_config(&mut config);
    validate_config(&config)?;

    print_config_summary(&config);

    let api = WeiboApi::new(
        config.account.session_token.clone(),
        &config.account.user_agent,
    )?;

    // Profile lookup is informational only
    let spinner = create_spinner("Fetching account information...");
    let user_info = api.get_user_info(&config.account.user_id).await;
    spinner.finish_and_clear();
    match user_info {
        Ok(info) => print_user_info(&info),
        Err(e) => print_warning(&format!("Error getting user information: {}", e)),
    }

    let outcome = collect_picture_urls(&api, &config).await;

    let output_dir = config.output_directory();
    ensure_dir(&output_dir)?;
    let list_path = write_url_list(&output_dir, &config.account.user_id, &outcome.urls)?;
    print_collect_stats(&outcome, &list_path);

    if !config.options.download_images {
        print_success("URL list written, image download disabled");
        return Ok(());
    }

    if outcome.urls.is_empty() {
        print_info("Nothing to download");
        return Ok(());
    }

    print_info(&format!(
        "Downloading {} pictures to {}",
        outcome.urls.len(),
        output_dir.display()
    ));

    let summary = download_with_progress(
        Arc::new(api),
        outcome.urls.into_vec(),
        &output_dir,
        config.options.threads,
        !args.quiet,
    )
    .await;

    print_download_stats(&summary);

    if summary.failed > 0 {
        print_warning(&format!("{} picture(s) could not be saved", summary.failed));
    } else {
        print_success("All pictures downloaded");
    }

    Ok(())
}
