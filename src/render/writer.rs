use super::{RenderTrigger, TemplateSelector};
use crate::declaration::TypeTemplate;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

/// Host-side trigger that renders the declaration template to disk
///
/// Inside a tokio runtime, re-render requests write on the blocking pool.
/// Writes are serialized and each one renders the latest snapshot, so the
/// file always ends up matching the newest cache contents.
#[derive(Debug, Clone)]
pub struct TemplateWriter {
    template: TypeTemplate,
    out_dir: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl TemplateWriter {
    pub fn new(template: TypeTemplate, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            template,
            out_dir: out_dir.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Destination of the rendered artifact
    pub fn output_path(&self) -> PathBuf {
        self.out_dir.join(self.template.filename())
    }

    /// Renders the template and writes it, returning whether the file changed
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the directory or file cannot be written.
    pub fn write(&self) -> io::Result<bool> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let path = self.output_path();
        let contents = self.template.get_contents();

        if matches!(fs::read_to_string(&path), Ok(existing) if existing == contents) {
            debug!(path = %path.display(), "Declaration unchanged");
            return Ok(false);
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents.as_bytes())?;
        info!(path = %path.display(), bytes = contents.len(), "Wrote type declarations");
        Ok(true)
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }
}

impl RenderTrigger for TemplateWriter {
    fn request_rerender(&self, selector: &TemplateSelector) {
        if !selector.matches(self.template.filename()) {
            return;
        }
        match Handle::try_current() {
            Ok(handle) => {
                let writer = self.clone();
                handle.spawn_blocking(move || writer.write_logged());
            }
            Err(_) => self.write_logged(),
        }
    }
}

impl TemplateWriter {
    fn write_logged(&self) {
        if let Err(err) = self.write() {
            warn!(
                path = %self.output_path().display(),
                error = %err,
                "Failed to write type declarations"
            );
        }
    }
}
