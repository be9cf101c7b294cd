use crate::error::SketchResult;

/// File name used for exported drawings
pub const EXPORT_FILE_NAME: &str = "sketch.png";

/// Hands exported PNG bytes to the platform: a file on native, a download in the browser.
#[derive(Debug, Default)]
pub struct FileHandler {
    /// Native export directory, the working directory if unset
    #[cfg(not(target_arch = "wasm32"))]
    directory: Option<std::path::PathBuf>,
    /// Where the last export went, shown in the UI
    last_export: Option<String>,
}

impl FileHandler {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn with_directory(directory: impl Into<std::path::PathBuf>) -> Self {
        Self {
            directory: Some(directory.into()),
            last_export: None,
        }
    }

    pub fn last_export(&self) -> Option<&str> {
        self.last_export.as_deref()
    }

    /// Save `bytes` under `file_name` and remember where they went.
    pub fn save_png(&mut self, bytes: &[u8], file_name: &str) -> SketchResult<()> {
        #[cfg(not(target_arch = "wasm32"))]
        let location = save_bytes(self.directory.as_deref(), bytes, file_name)?;
        #[cfg(target_arch = "wasm32")]
        let location = save_bytes(bytes, file_name)?;
        log::info!("Exported {} bytes to {}", bytes.len(), location);
        self.last_export = Some(location);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn save_bytes(
    directory: Option<&std::path::Path>,
    bytes: &[u8],
    file_name: &str,
) -> SketchResult<String> {
    let path = match directory {
        Some(directory) => directory.join(file_name),
        None => std::env::current_dir()?.join(file_name),
    };
    std::fs::write(&path, bytes)?;
    Ok(path.display().to_string())
}

#[cfg(target_arch = "wasm32")]
fn save_bytes(bytes: &[u8], file_name: &str) -> SketchResult<String> {
    use wasm_bindgen::JsCast as _;

    let io_error = |what: &str| std::io::Error::new(std::io::ErrorKind::Other, what.to_owned());

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| io_error("No document available"))?;

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("image/png");
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|_| io_error("Failed to create blob"))?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|_| io_error("Failed to create object URL"))?;

    let anchor = document
        .create_element("a")
        .map_err(|_| io_error("Failed to create link"))?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| io_error("Link is not an anchor element"))?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    // The click has started the download, the URL is no longer needed
    if web_sys::Url::revoke_object_url(&url).is_err() {
        log::warn!("Failed to revoke object URL {}", url);
    }
    Ok(format!("download {}", file_name))
}
