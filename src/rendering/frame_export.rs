use crate::rendering::backend::GpuBackend;
use crate::rendering::error::{EmptyCaptureErr, ScreenshotError, WriteErr};
use image::{ColorType, ImageFormat};
use snafu::{ResultExt, ensure};
use std::path::Path;

/// Reads the current framebuffer and writes it to `path` as a TGA image.
///
/// Synchronous by contract: callers accept the file write blocking the
/// render thread. The pixel buffer (`width * height * 4` bytes) lives only
/// for the duration of the call.
pub fn save_screenshot_tga(
    backend: &mut dyn GpuBackend,
    path: impl AsRef<Path>,
    width: u32,
    height: u32,
) -> Result<(), ScreenshotError> {
    ensure!(width > 0 && height > 0, EmptyCaptureErr { width, height });

    let pixels = backend.read_pixels(width, height);

    image::save_buffer_with_format(
        path,
        &pixels,
        width,
        height,
        ColorType::Rgba8,
        ImageFormat::Tga,
    )
    .context(WriteErr)
}
