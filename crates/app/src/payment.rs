//! Simulated payment desk: shows the QR image and a short progress indicator.

use std::{
    io::{self, Write},
    process::{Command, Stdio},
    thread,
    time::Duration,
};

use crate::settings::PaymentSettings;

pub struct PaymentDesk {
    settings: PaymentSettings,
}

impl PaymentDesk {
    pub fn new(settings: PaymentSettings) -> Self {
        Self { settings }
    }

    /// Opens the QR image with the platform viewer. Failures are only logged.
    pub fn open_qr(&self) {
        if !self.settings.open_qr {
            tracing::debug!("QR viewer disabled");
            return;
        }

        let image = &self.settings.qr_image;
        let mut command = opener_command(image);
        match command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(_) => tracing::debug!("opened {image}"),
            Err(err) => tracing::warn!("could not open {image}: {err}"),
        }
    }

    /// Prints `message` followed by one dot per step, pausing between dots.
    pub fn show_progress<W: Write>(&self, out: &mut W, message: &str) -> io::Result<()> {
        write!(out, "{message}")?;
        out.flush()?;
        let delay = Duration::from_millis(self.settings.step_delay_ms);
        for _ in 0..self.settings.progress_steps {
            write!(out, ".")?;
            out.flush()?;
            thread::sleep(delay);
        }
        writeln!(out)
    }
}

fn opener_command(image: &str) -> Command {
    if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", "", image]);
        command
    } else if cfg!(target_os = "macos") {
        let mut command = Command::new("open");
        command.arg(image);
        command
    } else {
        let mut command = Command::new("xdg-open");
        command.arg(image);
        command
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_prints_one_dot_per_step() {
        let desk = PaymentDesk::new(PaymentSettings {
            progress_steps: 3,
            step_delay_ms: 0,
            ..PaymentSettings::default()
        });
        let mut out = Vec::new();
        desk.show_progress(&mut out, "Processing payment").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Processing payment...\n");
    }
}
