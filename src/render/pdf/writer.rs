//! PDF object graph assembly with lopdf.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};

use super::fonts::{encode_win_ansi, Font};
use super::layout::image_name;
use crate::error::Result;
use crate::render::PageSetup;

/// Raster image ready to be embedded as a DeviceRGB XObject.
#[derive(Debug, Clone)]
pub struct EmbeddedImage {
    pub width: u32,
    pub height: u32,
    /// Zlib-compressed 8-bit RGB samples
    pub data: Vec<u8>,
}

impl EmbeddedImage {
    /// Flatten a decoded image to RGB and compress its samples.
    pub fn from_image(image: &image::DynamicImage) -> Result<Self> {
        let rgb = image.to_rgb8();
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(rgb.as_raw())?;
        Ok(Self {
            width: rgb.width(),
            height: rgb.height(),
            data: encoder.finish()?,
        })
    }
}

/// Values for the document Info dictionary.
#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub author: Option<String>,
}

/// Serialize laid-out pages into PDF bytes.
///
/// Content streams are written uncompressed and no dates or IDs are
/// recorded, so identical input gives identical bytes.
pub fn write_document(
    pages: Vec<Vec<Operation>>,
    images: &[EmbeddedImage],
    setup: &PageSetup,
    info: &DocumentInfo,
) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for font in [Font::Regular, Font::Bold] {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font.resource_name(), font_id);
    }

    let mut xobjects = Dictionary::new();
    for (index, image) in images.iter().enumerate() {
        let stream = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => image.width as i64,
                "Height" => image.height as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8_i64,
                "Filter" => "FlateDecode",
            },
            image.data.clone(),
        );
        let image_id = doc.add_object(stream);
        xobjects.set(image_name(index), image_id);
    }

    let mut resources = dictionary! { "Font" => fonts };
    if !xobjects.is_empty() {
        resources.set("XObject", xobjects);
    }
    let resources_id = doc.add_object(resources);

    let mut kids = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                setup.width.into(),
                setup.height.into(),
            ],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut info_dict = dictionary! {
        "Producer" => Object::String(b"mdreport".to_vec(), StringFormat::Literal),
    };
    if let Some(title) = &info.title {
        info_dict.set("Title", Object::String(encode_win_ansi(title), StringFormat::Literal));
    }
    if let Some(author) = &info.author {
        info_dict.set("Author", Object::String(encode_win_ansi(author), StringFormat::Literal));
    }
    let info_id = doc.add_object(info_dict);
    doc.trailer.set("Info", info_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_empty_page() {
        let bytes = write_document(
            vec![Vec::new()],
            &[],
            &PageSetup::a4(),
            &DocumentInfo::default(),
        )
        .unwrap();

        assert!(bytes.starts_with(b"%PDF-1.7"));
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_info_dictionary() {
        let info = DocumentInfo {
            title: Some("Site Survey".to_string()),
            author: Some("Jane Doe".to_string()),
        };
        let bytes = write_document(vec![Vec::new()], &[], &PageSetup::a4(), &info).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("(Site Survey)"));
        assert!(text.contains("(Jane Doe)"));
        assert!(text.contains("/Helvetica-Bold"));
    }

    #[test]
    fn test_embedded_image() {
        let img = image::DynamicImage::ImageRgb8(image::RgbImage::new(4, 2));
        let embedded = EmbeddedImage::from_image(&img).unwrap();
        assert_eq!((embedded.width, embedded.height), (4, 2));

        let bytes = write_document(
            vec![Vec::new()],
            &[embedded],
            &PageSetup::a4(),
            &DocumentInfo::default(),
        )
        .unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Im1"));
        assert!(text.contains("/DeviceRGB"));
    }
}
