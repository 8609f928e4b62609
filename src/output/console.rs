//! Console output utilities.

use console::style;

use crate::api::UserInfo;
use crate::config::Config;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("OK").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     Weibo Pictures                                    ║
║     Collect and download a user's timeline photos     ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Hide all but the first characters of a secret.
pub fn mask_secret(secret: &str) -> String {
    const VISIBLE: usize = 6;
    let visible: String = secret.chars().take(VISIBLE).collect();
    let hidden = secret.chars().count().saturating_sub(VISIBLE);
    format!("{}{}", visible, "*".repeat(hidden))
}

/// Print configuration summary.
pub fn print_config_summary(config: &Config) {
    let limit = config
        .options
        .page_limit
        .map(|l| l.to_string())
        .unwrap_or_else(|| "none".to_string());

    println!();
    println!("{}", style("Configuration:").bold());
    println!("  User id:    {}", config.account.user_id);
    println!("  Token:      {}", mask_secret(&config.account.session_token));
    println!("  Directory:  {}", config.output_directory().display());
    println!("  Threads:    {}", config.options.threads);
    println!("  Interval:   {} ms", config.options.interval_ms);
    println!("  Page limit: {}", limit);
    println!(
        "  Download:   {}",
        if config.options.download_images { "yes" } else { "no (URL list only)" }
    );
    println!();
}

/// Print the profile of the target account.
pub fn print_user_info(info: &UserInfo) {
    let or_null = |value: Option<String>| value.unwrap_or_else(|| "Null".to_string());

    println!();
    println!("{}", style(format!("Account {}:", info.screen_name)).bold());
    println!("  Id:          {}", info.id);
    println!(
        "  Verified:    {}",
        or_null(info.verified_reason.clone().filter(|r| !r.is_empty()))
    );
    println!("  Description: {}", or_null(info.description.clone()));
    println!(
        "  Posts:       {}",
        or_null(info.statuses_count.as_ref().map(|c| c.to_string()))
    );
    println!(
        "  Following:   {}",
        or_null(info.follow_count.as_ref().map(|c| c.to_string()))
    );
    println!(
        "  Followers:   {}",
        or_null(info.followers_count.as_ref().map(|c| c.to_string()))
    );
    println!();
}
