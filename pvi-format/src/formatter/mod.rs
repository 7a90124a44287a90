//! Screen formatters - complete layouts for a site's display managers.
//!
//! A formatter owns the layout presets and the embedded template for each
//! file type it writes. Templates are parsed fresh for every screen so that
//! nothing is shared between files.

mod aps;
mod dls;

pub use aps::ApsFormatter;
pub use dls::DlsFormatter;

use std::path::Path;

use anyhow::Context;
use pvi_api::Device;

use crate::FormatError;
use crate::screen::Screen;
use crate::template::WidgetTemplate;

/// Turns a device into screen files.
pub trait Formatter {
    /// Screen file contents for `device` in the format given by `extension`.
    fn render(
        &self,
        device: &Device,
        prefix: &str,
        extension: &str,
    ) -> Result<String, FormatError>;

    /// Write the screen for `device` to `path`, choosing the format from
    /// the file extension.
    fn format(&self, device: &Device, prefix: &str, path: &Path) -> anyhow::Result<()> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let text = self
            .render(device, prefix, extension)
            .with_context(|| format!("failed to format {} for {}", device.label, path.display()))?;
        std::fs::write(path, text)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!("wrote {} screen to {}", device.label, path.display());
        Ok(())
    }
}

/// Lay out `device` and render it through `template`.
pub(crate) fn render_screen<'a, T: WidgetTemplate>(
    template: &T,
    mut screen: Screen<'a, T>,
    device: &'a Device,
    prefix: &str,
) -> Result<String, FormatError> {
    let title = format!("{} - {}", device.label, prefix);
    let fragments = screen.screen(&device.children, &title)?.format()?;
    tracing::debug!("formatted {} into {} fragments", title, fragments.len());
    template.render(fragments)
}
