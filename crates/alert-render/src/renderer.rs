//! Alert Message Renderer
//!
//! Produces the message body sent to Gotify. The layout is fixed and
//! byte-stable:
//!
//! ```text
//! "\n"
//! for each alert: " \n" <block> "\n"
//! "\n"
//! ```
//!
//! Every line of a block ends with `\n`. Label and annotation values are
//! written as-is, without escaping.

use std::fmt::Write;

use tracing::debug;

use crate::{Alert, RenderError, TimeFormatter};

/// First line of a firing block
pub const FIRING_MARKER: &str = "**[⚠️告警]**";

/// First line of a resolved block
pub const RESOLVED_MARKER: &str = "**[✅恢复]**";

/// Renders alert batches into one message
#[derive(Debug, Clone, Default)]
pub struct AlertRenderer {
    formatter: TimeFormatter,
}

impl AlertRenderer {
    /// Create a renderer using the given timestamp formatter
    pub fn new(formatter: TimeFormatter) -> Self {
        Self { formatter }
    }

    /// Timestamp formatter in use
    pub fn formatter(&self) -> &TimeFormatter {
        &self.formatter
    }

    /// Render a batch into a new string, blocks in input order
    pub fn render(&self, alerts: &[Alert]) -> Result<String, RenderError> {
        let mut message = String::with_capacity(2 + alerts.len() * 256);
        self.render_into(&mut message, alerts)?;
        Ok(message)
    }

    /// Render a batch into any `fmt::Write` sink
    pub fn render_into<W: Write>(&self, out: &mut W, alerts: &[Alert]) -> Result<(), RenderError> {
        out.write_char('\n').map_err(RenderError::Frame)?;

        for (index, alert) in alerts.iter().enumerate() {
            self.write_block(out, alert)
                .map_err(|source| RenderError::Block { index, source })?;
        }

        out.write_char('\n').map_err(RenderError::Frame)?;
        Ok(())
    }

    fn write_block<W: Write>(&self, out: &mut W, alert: &Alert) -> std::fmt::Result {
        // Firing blocks print startsAt on the end-time line as well. Consumers
        // of the legacy format depend on it, so keep it.
        let (marker, ends_at) = if alert.status.is_firing() {
            (FIRING_MARKER, &alert.starts_at)
        } else {
            (RESOLVED_MARKER, &alert.ends_at)
        };

        debug!(
            alertname = alert.label("alertname"),
            status = alert.status.as_str(),
            "Rendering alert"
        );

        out.write_str(" \n")?;
        writeln!(out, "{}", marker)?;
        writeln!(out, "告警名称: {}", alert.label("alertname"))?;
        writeln!(out, "开始时间: {}", self.formatter.format(&alert.starts_at))?;
        writeln!(out, "结束时间: {}", self.formatter.format(ends_at))?;
        writeln!(out, "实例: {}", alert.label("instance"))?;
        writeln!(out, "IP: {}", alert.annotation("ip"))?;
        writeln!(out, "描述: {}", alert.annotation("description"))?;
        out.write_char('\n')
    }
}
