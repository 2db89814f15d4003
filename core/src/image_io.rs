//! Image I/O

use crate::film::{FilmError, ImageMetadata};
use crate::pbrt::*;
use exr::prelude::{AttributeValue, IntegerBounds, Text, Vec2};
use image::{ImageBuffer, ImageError, ImageFormat, Rgb};
use std::collections::HashMap;

/// Write an image of linear RGB values. The format is chosen from the file
/// extension: OpenEXR files keep floating point values and carry the image
/// metadata as header attributes, other formats are sRGB encoded to 8 bits
/// per channel.
///
/// * `path`     - Output file path.
/// * `rgb`      - Floating point RGB pixel data in scanline order.
/// * `res_x`    - X resolution.
/// * `res_y`    - Y resolution.
/// * `metadata` - Information about the render.
pub fn write_image(
    path: &str,
    rgb: &[Float],
    res_x: u32,
    res_y: u32,
    metadata: &ImageMetadata,
) -> Result<(), FilmError> {
    if res_x == 0 || res_y == 0 {
        return Err(FilmError::EmptyImage(path.to_string()));
    }

    let format =
        ImageFormat::from_path(path).map_err(|_| FilmError::UnsupportedFormat(path.to_string()))?;

    info!("Writing image {path} with resolution {res_x}x{res_y}");
    match format {
        ImageFormat::OpenExr => write_exr(path, rgb, res_x, res_y, metadata),
        _ => {
            debug!("Metadata is not stored in {path}");
            write_8_bit(path, rgb, res_x, res_y, format)
        }
    }
}

/// Returns the OpenEXR header attributes that record the metadata.
///
/// * `metadata` - Information about the render.
pub fn exr_attributes(metadata: &ImageMetadata) -> HashMap<Text, AttributeValue> {
    let mut attributes = HashMap::new();
    if let Some(t) = metadata.render_time_in_seconds {
        attributes.insert(Text::from("renderTimeSeconds"), AttributeValue::F32(t));
    }
    if let Some(spp) = metadata.samples_per_pixel {
        let spp = i32::try_from(spp).unwrap_or(i32::MAX);
        attributes.insert(Text::from("samplesPerPixel"), AttributeValue::I32(spp));
    }
    if let Some(b) = metadata.pixel_bounds {
        let d = b.diagonal();
        let bounds = IntegerBounds::new(
            Vec2(b.p_min.x, b.p_min.y),
            Vec2(d.x.max(0) as usize, d.y.max(0) as usize),
        );
        attributes.insert(Text::from("pixelBounds"), AttributeValue::IntegerBounds(bounds));
    }
    if let Some(r) = metadata.full_resolution {
        attributes.insert(Text::from("fullResolution"), AttributeValue::IntVec2(Vec2(r.x, r.y)));
    }
    for (k, v) in metadata.strings.iter() {
        match (Text::new_or_none(k), Text::new_or_none(v)) {
            (Some(k), Some(v)) => {
                attributes.insert(k, AttributeValue::Text(v));
            }
            _ => warn!("Metadata {k} can't be stored in an OpenEXR header"),
        }
    }
    attributes
}

/// Writes the image in OpenEXR format.
///
/// * `path`     - Output file path.
/// * `rgb`      - Floating point RGB pixel data.
/// * `res_x`    - X resolution.
/// * `res_y`    - Y resolution.
/// * `metadata` - Information about the render.
fn write_exr(
    path: &str,
    rgb: &[Float],
    res_x: u32,
    res_y: u32,
    metadata: &ImageMetadata,
) -> Result<(), FilmError> {
    use exr::prelude::*;

    let size = Vec2(res_x as usize, res_y as usize);

    let layer = Layer::new(
        size,
        LayerAttributes::named("render"),
        Encoding::SMALL_LOSSLESS,
        SpecificChannels::rgb(|pos: Vec2<usize>| {
            let offset = 3 * (pos.1 * (res_x as usize) + pos.0);
            (rgb[offset], rgb[offset + 1], rgb[offset + 2])
        }),
    );

    let mut attributes = ImageAttributes::new(IntegerBounds::from_dimensions(size));
    attributes.other = exr_attributes(metadata);

    Image::empty(attributes)
        .with_layer(layer)
        .write()
        .to_file(path)
        .map_err(|source| FilmError::Exr {
            path: path.to_string(),
            source,
        })
}

/// Writes the image in an 8-bit image format.
///
/// * `path`         - Output file path.
/// * `rgb`          - Floating point RGB pixel data.
/// * `res_x`        - X resolution.
/// * `res_y`        - Y resolution.
/// * `image_format` - Image format.
fn write_8_bit(
    path: &str,
    rgb: &[Float],
    res_x: u32,
    res_y: u32,
    image_format: ImageFormat,
) -> Result<(), FilmError> {
    let mut imgbuf: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::new(res_x, res_y);
    for (i, pixel) in imgbuf.pixels_mut().enumerate() {
        let offset = 3 * i;
        *pixel = Rgb(apply_gamma(&[rgb[offset], rgb[offset + 1], rgb[offset + 2]]));
    }

    imgbuf
        .save_with_format(path, image_format)
        .map_err(|err| image_error(path, err))
}

/// Applies sRGB gamma correction and quantizes to 8 bits.
///
/// * `rgb` - Linear RGB values.
pub fn apply_gamma(rgb: &[Float; 3]) -> [u8; 3] {
    rgb.map(|v| clamp(255.0 * gamma_correct(v) + 0.5, 0.0, 255.0) as u8)
}

/// Separates I/O failures from encoding failures.
fn image_error(path: &str, err: ImageError) -> FilmError {
    match err {
        ImageError::IoError(source) => FilmError::Io {
            path: path.to_string(),
            source,
        },
        source => FilmError::Encoding {
            path: path.to_string(),
            source,
        },
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
