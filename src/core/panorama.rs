use image::imageops::FilterType;
use image::RgbaImage;

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("panorama is empty")]
    Empty,
    #[error("could not decode panorama: {0}")]
    Decode(#[from] image::ImageError),
}

/// Decode an encoded equirectangular image into RGBA8, shrinking it when
/// either side exceeds `max_dimension` (the GPU's 2D texture limit).
pub fn decode_panorama(bytes: &[u8], max_dimension: u32) -> Result<RgbaImage, AssetError> {
    if bytes.is_empty() {
        return Err(AssetError::Empty);
    }
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    Ok(fit_within(rgba, max_dimension))
}

/// Aspect-preserving downscale so that neither side exceeds `max_dimension`.
pub fn fit_within(img: RgbaImage, max_dimension: u32) -> RgbaImage {
    let (w, h) = img.dimensions();
    let max_dimension = max_dimension.max(1);
    if w <= max_dimension && h <= max_dimension {
        return img;
    }
    let scale = max_dimension as f64 / w.max(h) as f64;
    let nw = ((w as f64 * scale).round() as u32).clamp(1, max_dimension);
    let nh = ((h as f64 * scale).round() as u32).clamp(1, max_dimension);
    log::warn!(
        "[assets] panorama {}x{} exceeds texture limit {}, resizing to {}x{}",
        w,
        h,
        max_dimension,
        nw,
        nh
    );
    image::imageops::resize(&img, nw, nh, FilterType::Triangle)
}
