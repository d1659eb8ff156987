use anyhow::{Context, Result};
use renderer::{Renderer, RendererConfig};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

pub fn run(args: Cli) -> Result<()> {
    initialise_tracing();

    let mut config = RendererConfig {
        antialiasing: args.antialias,
        ..RendererConfig::default()
    };
    if let Some(spec) = args.size.as_deref() {
        config.surface_size =
            parse_surface_size(spec).context("invalid --size specification")?;
    }

    tracing::info!(
        width = config.surface_size.0,
        height = config.surface_size.1,
        antialias = ?config.antialiasing,
        "starting blushwall"
    );

    Renderer::new(config).run()
}

fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn parse_surface_size(spec: &str) -> Result<(u32, u32)> {
    let trimmed = spec.trim();
    let (width, height) = trimmed
        .split_once(['x', 'X'])
        .ok_or_else(|| anyhow::anyhow!("expected WxH format, e.g. 1920x1080"))?;

    let width: u32 = width
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid width in size specification"))?;
    let height: u32 = height
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid height in size specification"))?;

    if width == 0 || height == 0 {
        anyhow::bail!("surface dimensions must be greater than zero");
    }

    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_size_parses_common_forms() {
        assert_eq!(parse_surface_size("1920x1080").unwrap(), (1920, 1080));
        assert_eq!(parse_surface_size(" 1280 X 720 ").unwrap(), (1280, 720));
    }

    #[test]
    fn surface_size_rejects_malformed_input() {
        assert!(parse_surface_size("1920").is_err());
        assert!(parse_surface_size("0x720").is_err());
        assert!(parse_surface_size("widexhigh").is_err());
    }
}
