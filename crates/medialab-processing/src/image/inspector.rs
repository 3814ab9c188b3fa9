//! Image inspector - container format, color mode, dimensions, and EXIF

use std::collections::BTreeMap;
use std::fs;
use std::io::Cursor;
use std::path::Path;

use exif::In;
use image::{ColorType, GenericImageView, ImageReader};
use medialab_core::{MediaError, MediaResult};

use crate::metadata::{ImageInfo, TagView};
use crate::traits::MediaProcessor;

const NO_METADATA: &str = "No metadata found";

pub struct ImageProcessor;

impl MediaProcessor for ImageProcessor {
    type Metadata = ImageInfo;

    fn extract_metadata(&self, path: &Path) -> MediaResult<Self::Metadata> {
        inspect(path)
    }
}

/// Inspect an image file: format name, color mode, pixel dimensions, and
/// EXIF fields keyed by readable tag name where one exists. No side
/// effects.
pub fn inspect(path: &Path) -> MediaResult<ImageInfo> {
    let data = fs::read(path)?;

    let reader = ImageReader::new(Cursor::new(&data))
        .with_guessed_format()
        .map_err(MediaError::Io)?;
    let format = reader
        .format()
        .map(|f| format!("{f:?}").to_uppercase())
        .unwrap_or_else(|| "UNKNOWN".to_string());

    let img = reader
        .decode()
        .map_err(|e| MediaError::Decode(e.to_string()))?;

    Ok(ImageInfo {
        format,
        mode: color_mode_name(img.color()),
        size: img.dimensions(),
        metadata: read_exif_view(&data),
    })
}

/// PIL-style color mode name for a decoded color type.
fn color_mode_name(color: ColorType) -> String {
    match color {
        ColorType::L8 | ColorType::L16 => "L".to_string(),
        ColorType::La8 | ColorType::La16 => "LA".to_string(),
        ColorType::Rgb8 | ColorType::Rgb16 | ColorType::Rgb32F => "RGB".to_string(),
        ColorType::Rgba8 | ColorType::Rgba16 | ColorType::Rgba32F => "RGBA".to_string(),
        other => format!("{other:?}"),
    }
}

/// Decode the EXIF block into a readable mapping. Known tags keep their
/// names; unknown tags fall back to the numeric id. Images without an
/// EXIF block report a fixed placeholder instead of an empty mapping.
fn read_exif_view(data: &[u8]) -> TagView {
    let exif_data = match exif::Reader::new().read_from_container(&mut Cursor::new(data)) {
        Ok(exif_data) => exif_data,
        Err(_) => return TagView::unavailable(NO_METADATA),
    };

    let mut view = BTreeMap::new();
    for field in exif_data.fields() {
        if field.ifd_num != In::PRIMARY {
            continue;
        }
        let key = if field.tag.description().is_some() {
            field.tag.to_string()
        } else {
            field.tag.number().to_string()
        };
        view.insert(key, field.display_value().to_string());
    }

    if view.is_empty() {
        TagView::unavailable(NO_METADATA)
    } else {
        TagView::Tags(view)
    }
}
