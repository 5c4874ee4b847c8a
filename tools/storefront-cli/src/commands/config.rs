//! Configuration management commands.

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { name, force } => init_config(&name, force, ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    ctx.output.kv("directory", &ctx.config_dir.display().to_string());

    ctx.output.info("");
    ctx.output.info("[store]");
    ctx.output.kv("name", &ctx.config.store.name);

    ctx.output.info("");
    ctx.output.info("[catalog]");
    match &ctx.config.catalog.path {
        Some(path) => ctx.output.kv("path", path),
        None => ctx.output.kv("path", "(built-in demo catalog)"),
    }
    ctx.output.kv("currency", ctx.catalog.currency().code());

    ctx.output.info("");
    ctx.output.info("[checkout]");
    ctx.output.kv(
        "processing_delay_ms",
        &ctx.config.checkout.processing_delay_ms.to_string(),
    );
    ctx.output.kv(
        "decline_payments",
        &ctx.config.checkout.decline_payments.to_string(),
    );
    if ctx.config.checkout.decline_payments {
        ctx.output.kv("decline_reason", &ctx.config.checkout.decline_reason);
    }

    ctx.output.info("");
    ctx.output.info("[output]");
    ctx.output.kv("color", &ctx.config.output.color.to_string());

    Ok(())
}

async fn init_config(name: &str, force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, generate_default_config(name))?;
    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}
