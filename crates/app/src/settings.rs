//! Settings of the console application.
//!
//! Sources, lowest priority first: built-in defaults, the TOML file
//! (`config/pajak.toml` unless `--config` is given), `PAJAK_*` environment
//! variables (`__` separates nested keys, e.g. `PAJAK_PAYMENT__OPEN_QR`),
//! then command line flags.

use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/pajak.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data_file: String,
    pub log_level: String,
    pub payment: PaymentSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: engine::DEFAULT_ROSTER_PATH.to_string(),
            log_level: "warn".to_string(),
            payment: PaymentSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaymentSettings {
    /// Image shown to the taxpayer to complete the transfer.
    pub qr_image: String,
    pub open_qr: bool,
    pub progress_steps: u32,
    pub step_delay_ms: u64,
}

impl Default for PaymentSettings {
    fn default() -> Self {
        Self {
            qr_image: "qr_pembayaran.png".to_string(),
            open_qr: true,
            progress_steps: 5,
            step_delay_ms: 800,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "pajak", about = "Taxpayer roster and tax calculator")]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the roster file.
    #[arg(long)]
    data_file: Option<String>,
    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
    /// Override the payment QR image.
    #[arg(long)]
    qr_image: Option<String>,
    /// Do not launch an image viewer during payment.
    #[arg(long)]
    no_qr: bool,
}

pub fn load() -> Result<Settings> {
    from_args(Args::parse())
}

fn from_args(args: Args) -> Result<Settings> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(
        config::Environment::with_prefix("PAJAK")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );
    let mut settings: Settings = builder.build()?.try_deserialize()?;

    if let Some(data_file) = args.data_file {
        settings.data_file = data_file;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }
    if let Some(qr_image) = args.qr_image {
        settings.payment.qr_image = qr_image;
    }
    if args.no_qr {
        settings.payment.open_qr = false;
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["pajak"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults_apply_without_a_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("none.toml");
        let settings = from_args(args(&["--config", missing.to_str().unwrap()])).unwrap();

        assert_eq!(settings.payment.progress_steps, 5);
        assert_eq!(settings.payment.step_delay_ms, 800);
        assert_eq!(settings.payment.qr_image, "qr_pembayaran.png");
    }

    #[test]
    fn file_values_are_overridden_by_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pajak.toml");
        fs::write(
            &path,
            "data_file = \"from_file.txt\"\n[payment]\nstep_delay_ms = 0\nqr_image = \"file.png\"\n",
        )
        .unwrap();

        let settings = from_args(args(&[
            "--config",
            path.to_str().unwrap(),
            "--qr-image",
            "flag.png",
            "--no-qr",
        ]))
        .unwrap();

        assert_eq!(settings.data_file, "from_file.txt");
        assert_eq!(settings.payment.step_delay_ms, 0);
        assert_eq!(settings.payment.progress_steps, 5);
        assert_eq!(settings.payment.qr_image, "flag.png");
        assert!(!settings.payment.open_qr);
    }
}
