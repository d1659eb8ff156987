use clap::Parser;
use renderer::Antialiasing;

#[derive(Parser, Debug)]
#[command(
    name = "blushwall",
    author,
    version,
    about = "Animated peach/pink shader background"
)]
pub struct Cli {
    /// Window size in physical pixels (e.g. `1280x720`).
    #[arg(long, value_name = "WIDTHxHEIGHT")]
    pub size: Option<String>,

    /// Anti-aliasing policy: `auto`, `off`, or an explicit MSAA sample count (e.g. `4`).
    #[arg(
        long,
        value_name = "MODE",
        value_parser = parse_antialias,
        default_value = "auto"
    )]
    pub antialias: Antialiasing,
}

pub fn parse() -> Cli {
    Cli::parse()
}

fn parse_antialias(value: &str) -> Result<Antialiasing, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("anti-alias mode must not be empty".to_string());
    }

    let normalized = trimmed.to_ascii_lowercase();
    match normalized.as_str() {
        "auto" | "max" | "default" => Ok(Antialiasing::Auto),
        "off" | "none" | "disable" | "disabled" | "0" => Ok(Antialiasing::Off),
        _ => {
            let samples: u32 = normalized.parse().map_err(|_| {
                format!("invalid anti-alias sample count '{trimmed}'; use auto/off or 2/4/8/16")
            })?;
            if !samples.is_power_of_two() {
                return Err(format!(
                    "anti-alias sample count '{samples}' must be a power of two"
                ));
            }
            Ok(Antialiasing::Samples(samples))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn antialias_accepts_named_modes() {
        assert_eq!(parse_antialias("auto").unwrap(), Antialiasing::Auto);
        assert_eq!(parse_antialias("OFF").unwrap(), Antialiasing::Off);
        assert_eq!(parse_antialias("4").unwrap(), Antialiasing::Samples(4));
    }

    #[test]
    fn antialias_rejects_garbage() {
        assert!(parse_antialias("").is_err());
        assert!(parse_antialias("fancy").is_err());
        assert!(parse_antialias("3").is_err());
    }
}
