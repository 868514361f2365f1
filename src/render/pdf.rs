//! PDF output using `lopdf`.
//!
//! Pages are built in memory and serialized on [`PdfWriter::save`]. No stream
//! is compressed: image data is embedded as raw 8-bit samples so printed
//! proxies keep the exact resampled pixels.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

use crate::error::{ProxyError, Result};
use crate::layout::{GridGeometry, Rect};
use crate::types::Colour;

use super::SheetCanvas;

const PT_PER_MM: f64 = 72.0 / 25.4;

/// Convert millimetres to PDF points.
pub fn mm_to_pt(mm: f64) -> f32 {
    (mm * PT_PER_MM) as f32
}

/// Largest rectangle with the image's aspect ratio that fits in `rect`,
/// centred within it.
pub fn fit_within(width_px: u32, height_px: u32, rect: Rect) -> Rect {
    let (w, h) = (f64::from(width_px.max(1)), f64::from(height_px.max(1)));
    let scale = (rect.width / w).min(rect.height / h);
    let (fw, fh) = (w * scale, h * scale);
    Rect {
        x: rect.x + (rect.width - fw) / 2.0,
        y: rect.y + (rect.height - fh) / 2.0,
        width: fw,
        height: fh,
    }
}

/// An image XObject already embedded in the document.
#[derive(Debug, Clone)]
struct EmbeddedImage {
    id: ObjectId,
    name: String,
    width: u32,
    height: u32,
}

/// Operations and resources of the page being drawn.
struct PageBuffer {
    operations: Vec<Operation>,
    xobjects: Dictionary,
}

impl PageBuffer {
    fn new() -> Self {
        Self {
            operations: Vec::new(),
            xobjects: Dictionary::new(),
        }
    }
}

/// Multi-page PDF document writer.
pub struct PdfWriter {
    document: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
    page_width: f32,
    page_height: f32,
    current: Option<PageBuffer>,
    images: HashMap<PathBuf, EmbeddedImage>,
}

impl PdfWriter {
    /// Create a writer whose pages match the grid's page size.
    pub fn new(grid: &GridGeometry) -> Self {
        let mut document = Document::with_version("1.5");
        let pages_id = document.new_object_id();

        Self {
            document,
            pages_id,
            page_ids: Vec::new(),
            page_width: mm_to_pt(grid.page_width),
            page_height: mm_to_pt(grid.page_height),
            current: None,
            images: HashMap::new(),
        }
    }

    fn page(&mut self) -> &mut PageBuffer {
        self.current.get_or_insert_with(PageBuffer::new)
    }

    fn close_page(&mut self) -> Result<()> {
        let Some(page) = self.current.take() else {
            return Ok(());
        };

        let content = Content {
            operations: page.operations,
        };
        let bytes = content.encode().map_err(pdf_error)?;
        let content_id = self
            .document
            .add_object(Stream::new(Dictionary::new(), bytes).with_compression(false));

        let media_box: Vec<Object> = vec![
            0.into(),
            0.into(),
            self.page_width.into(),
            self.page_height.into(),
        ];
        let page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => media_box,
            "Contents" => content_id,
            "Resources" => dictionary! { "XObject" => page.xobjects },
        };
        let page_id = self.document.add_object(page_dict);
        self.page_ids.push(page_id);
        Ok(())
    }

    /// Add `image` to the document as an uncompressed RGB XObject, with a
    /// soft mask when any pixel is not fully opaque.
    fn embed(&mut self, key: &Path, image: &RgbaImage) -> EmbeddedImage {
        let (width, height) = image.dimensions();
        let pixels = width as usize * height as usize;
        let mut rgb = Vec::with_capacity(pixels * 3);
        let mut alpha = Vec::with_capacity(pixels);
        for px in image.pixels() {
            rgb.extend_from_slice(&px.0[..3]);
            alpha.push(px.0[3]);
        }

        let mut image_dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(width),
            "Height" => i64::from(height),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        };

        if alpha.iter().any(|&a| a < u8::MAX) {
            let mask_dict = dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(width),
                "Height" => i64::from(height),
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
            };
            let mask_id = self
                .document
                .add_object(Stream::new(mask_dict, alpha).with_compression(false));
            image_dict.set("SMask", mask_id);
        }

        let id = self
            .document
            .add_object(Stream::new(image_dict, rgb).with_compression(false));
        let embedded = EmbeddedImage {
            id,
            name: format!("Im{}", self.images.len() + 1),
            width,
            height,
        };
        self.images.insert(key.to_path_buf(), embedded.clone());
        embedded
    }

    fn place(&mut self, image: &EmbeddedImage, rect: Rect) {
        let fitted = fit_within(image.width, image.height, rect);
        let (x, y) = (mm_to_pt(fitted.x), mm_to_pt(fitted.y));
        let (w, h) = (mm_to_pt(fitted.width), mm_to_pt(fitted.height));

        let page = self.page();
        page.xobjects.set(image.name.clone(), image.id);
        page.operations.extend([
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![w.into(), 0.into(), 0.into(), h.into(), x.into(), y.into()],
            ),
            Operation::new("Do", vec![Object::Name(image.name.as_bytes().to_vec())]),
            Operation::new("Q", vec![]),
        ]);
    }

    /// Finish the open page and write the document to `path`.
    ///
    /// `path` is only touched once the whole document has been serialized.
    pub fn save(self, path: &Path) -> Result<()> {
        let bytes = self.finish()?;
        std::fs::write(path, bytes).map_err(|e| ProxyError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write PDF: {}", e),
        })
    }

    /// Finish the open page and serialize the document.
    pub fn finish(mut self) -> Result<Vec<u8>> {
        self.close_page()?;

        let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::from(*id)).collect();
        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => self.page_ids.len() as i64,
        };
        self.document
            .objects
            .insert(self.pages_id, Object::Dictionary(pages_dict));

        let catalog_id = self.document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.document.trailer.set("Root", catalog_id);

        let info_id = self.document.add_object(dictionary! {
            "Producer" => Object::string_literal(concat!("proxysheet ", env!("CARGO_PKG_VERSION"))),
        });
        self.document.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        self.document
            .save_to(&mut bytes)
            .map_err(|e| ProxyError::Pdf {
                message: format!("Failed to serialize PDF: {}", e),
            })?;
        Ok(bytes)
    }
}

impl SheetCanvas for PdfWriter {
    fn fill_rect(&mut self, rect: Rect, colour: Colour) -> Result<()> {
        let [r, g, b] = colour.to_unit_rgb();
        let (x, y) = (mm_to_pt(rect.x), mm_to_pt(rect.y));
        let (w, h) = (mm_to_pt(rect.width), mm_to_pt(rect.height));

        self.page().operations.extend([
            Operation::new("q", vec![]),
            Operation::new("rg", vec![r.into(), g.into(), b.into()]),
            Operation::new("re", vec![x.into(), y.into(), w.into(), h.into()]),
            Operation::new("f", vec![]),
            Operation::new("Q", vec![]),
        ]);
        Ok(())
    }

    fn draw_image(&mut self, key: &Path, image: &RgbaImage, rect: Rect) -> Result<()> {
        if image.width() == 0 || image.height() == 0 {
            return Err(ProxyError::Image {
                path: key.to_path_buf(),
                message: "image has no pixels".to_string(),
            });
        }
        let embedded = self.embed(key, image);
        self.place(&embedded, rect);
        Ok(())
    }

    fn has_image(&self, key: &Path) -> bool {
        self.images.contains_key(key)
    }

    fn draw_cached(&mut self, key: &Path, rect: Rect) -> Result<()> {
        let embedded = self.images.get(key).cloned().ok_or_else(|| ProxyError::Image {
            path: key.to_path_buf(),
            message: "image was never embedded".to_string(),
        })?;
        self.place(&embedded, rect);
        Ok(())
    }

    fn page_break(&mut self) -> Result<()> {
        self.close_page()
    }
}

fn pdf_error(e: lopdf::Error) -> ProxyError {
    ProxyError::Pdf {
        message: e.to_string(),
    }
}
