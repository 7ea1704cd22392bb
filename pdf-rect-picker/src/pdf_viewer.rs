use crate::error::{PickerError, Result};
use crate::geometry::{Page, PageSize, ZoomState};
use crate::renderer::PdfRenderer;
use iced::widget::image::Handle;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const PDF_MAGIC: &[u8] = b"%PDF-";
const MAX_CACHED_PAGES: usize = 10;

/// Page index plus the exact bits of the zoom factor it was rendered at.
type CacheKey = (usize, u32);

fn cache_key(page_index: usize, zoom: ZoomState) -> CacheKey {
    (page_index, zoom.factor().to_bits())
}

/// Raw bytes of a PDF file read from disk, not yet parsed.
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub path: PathBuf,
    pub bytes: Arc<Vec<u8>>,
}

/// Read a PDF file from disk, rejecting anything without a PDF header
pub fn read_pdf_file(path: &Path) -> Result<LoadedFile> {
    let bytes = std::fs::read(path).map_err(|e| PickerError::Load {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(PickerError::Load {
            path: path.to_path_buf(),
            reason: "not a PDF file".into(),
        });
    }
    Ok(LoadedFile {
        path: path.to_path_buf(),
        bytes: Arc::new(bytes),
    })
}

pub async fn load(path: PathBuf) -> Result<LoadedFile> {
    read_pdf_file(&path)
}

/// A page rasterized at a specific zoom.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub handle: Handle,
    pub width: u32,
    pub height: u32,
}

/// Manages a loaded PDF document with rendered page cache
#[derive(Debug)]
pub struct PdfDocument {
    path: PathBuf,
    bytes: Arc<Vec<u8>>,
    pages: Vec<PageSize>,
    page_cache: HashMap<CacheKey, RenderedPage>,
    cache_order: VecDeque<CacheKey>,
}

impl PdfDocument {
    /// Parse a file read by [`load`]. Documents without pages are rejected.
    pub fn open(renderer: &PdfRenderer, file: LoadedFile) -> Result<Self> {
        let pages = renderer
            .page_sizes(&file.bytes)
            .map_err(|e| PickerError::Load {
                path: file.path.clone(),
                reason: format!("{e:#}"),
            })?;
        if pages.is_empty() {
            return Err(PickerError::Load {
                path: file.path,
                reason: "document has no pages".into(),
            });
        }
        tracing::info!(path = %file.path.display(), pages = pages.len(), "opened document");
        Ok(Self::from_parts(file, pages))
    }

    pub(crate) fn from_parts(file: LoadedFile, pages: Vec<PageSize>) -> Self {
        Self {
            path: file.path,
            bytes: file.bytes,
            pages,
            page_cache: HashMap::new(),
            cache_order: VecDeque::new(),
        }
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("Untitled")
            .to_string()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page(&self, index: usize) -> Result<Page> {
        self.pages
            .get(index)
            .map(|size| Page::new(index, *size))
            .ok_or(PickerError::PageOutOfRange {
                index,
                count: self.pages.len(),
            })
    }

    pub fn get_rendered_page(
        &mut self,
        renderer: &PdfRenderer,
        page_index: usize,
        zoom: ZoomState,
    ) -> Result<RenderedPage> {
        let key = cache_key(page_index, zoom);

        // Check cache first
        if let Some(rendered) = self.page_cache.get(&key) {
            return Ok(rendered.clone());
        }

        self.page(page_index)?;
        let img = renderer
            .render_page(&self.bytes, page_index, zoom)
            .map_err(|e| PickerError::Render {
                index: page_index,
                reason: format!("{e:#}"),
            })?;

        let rendered = RenderedPage {
            width: img.width(),
            height: img.height(),
            handle: Handle::from_rgba(img.width(), img.height(), img.into_raw()),
        };
        self.cache_insert(key, rendered.clone());
        Ok(rendered)
    }

    fn cache_insert(&mut self, key: CacheKey, rendered: RenderedPage) {
        if self.page_cache.insert(key, rendered).is_none() {
            self.cache_order.push_back(key);
        }
        // Evict oldest renders first
        while self.cache_order.len() > MAX_CACHED_PAGES {
            if let Some(oldest) = self.cache_order.pop_front() {
                self.page_cache.remove(&oldest);
            }
        }
    }
}
