use wasm_bindgen_futures::JsFuture;

/// Something that can be uploaded: name, size, type and bytes
#[allow(async_fn_in_trait)]
pub trait FileSource {
    fn name(&self) -> String;
    fn size(&self) -> u64;
    /// MIME type, empty when unknown
    fn mime_type(&self) -> String;
    async fn read_bytes(&self) -> Result<Vec<u8>, String>;
}

impl FileSource for web_sys::File {
    fn name(&self) -> String {
        web_sys::File::name(self)
    }

    fn size(&self) -> u64 {
        web_sys::Blob::size(self) as u64
    }

    fn mime_type(&self) -> String {
        self.type_()
    }

    async fn read_bytes(&self) -> Result<Vec<u8>, String> {
        let array_buffer = JsFuture::from(self.array_buffer())
            .await
            .map_err(|e| format!("Failed to read {}: {:?}", web_sys::File::name(self), e))?;
        let uint8_array = js_sys::Uint8Array::new(&array_buffer);
        Ok(uint8_array.to_vec())
    }
}

/// Content type sent to the upload endpoint.
/// Browsers leave `type` empty for formats like .psd or .eps.
pub fn content_type_for(source: &impl FileSource) -> String {
    let mime = source.mime_type();
    if mime.trim().is_empty() {
        "application/octet-stream".to_string()
    } else {
        mime
    }
}

/// Collect files from a `FileList` (input change or drop)
pub fn files_from_list(list: Option<web_sys::FileList>) -> Vec<web_sys::File> {
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}
