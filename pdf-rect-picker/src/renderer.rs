use anyhow::{Context, Result};
use pdfium_render::prelude::*;

use crate::geometry::{PageSize, ZoomState};
use crate::mapper;

/// PDF renderer using pdfium-render
pub struct PdfRenderer {
    pdfium: Pdfium,
}

impl PdfRenderer {
    pub fn new() -> Result<Self> {
        let pdfium = Pdfium::new(
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
                .or_else(|_| Pdfium::bind_to_system_library())
                .context("Failed to bind to PDFium library. Please install PDFium or download the library from https://github.com/bblanchon/pdfium-binaries")?,
        );
        Ok(Self { pdfium })
    }

    fn load<'a>(&'a self, bytes: &'a [u8]) -> Result<PdfDocument<'a>> {
        self.pdfium
            .load_pdf_from_byte_slice(bytes, None)
            .context("Failed to load PDF document")
    }

    /// Native size of every page, in document order.
    pub fn page_sizes(&self, bytes: &[u8]) -> Result<Vec<PageSize>> {
        let document = self.load(bytes)?;
        let sizes = document
            .pages()
            .iter()
            .map(|page| PageSize::new(page.width().value, page.height().value))
            .collect();
        Ok(sizes)
    }

    /// Rasterize one page at `zoom`. Deterministic for fixed inputs.
    pub fn render_page(
        &self,
        bytes: &[u8],
        page_index: usize,
        zoom: ZoomState,
    ) -> Result<image::RgbaImage> {
        let index = u16::try_from(page_index).context("Page index out of bounds")?;
        let document = self.load(bytes)?;
        let page = document
            .pages()
            .get(index)
            .context("Page index out of bounds")?;

        let size = PageSize::new(page.width().value, page.height().value);
        let (render_width, render_height) = mapper::pixmap_size(size, zoom);

        let render_config = PdfRenderConfig::new()
            .set_target_width(render_width as i32)
            .set_maximum_height(render_height as i32)
            .rotate_if_landscape(PdfPageRenderRotation::None, false);

        let bitmap = page
            .render_with_config(&render_config)
            .context("Failed to render page")?;

        let img = image::RgbaImage::from_raw(
            bitmap.width() as u32,
            bitmap.height() as u32,
            bitmap.as_rgba_bytes(),
        )
        .context("Failed to create image from bitmap")?;

        tracing::debug!(
            page = page_index,
            zoom = zoom.factor(),
            width = img.width(),
            height = img.height(),
            "rendered page"
        );
        Ok(img)
    }
}
