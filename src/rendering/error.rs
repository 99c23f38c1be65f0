use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(context(suffix(Err)), visibility(pub(crate)))]
pub enum CreateError {
    #[snafu(display("OpenGL function \"{name}\" was not provided by the context loader"))]
    MissingFunction { name: &'static str },
}

#[derive(Debug, Snafu)]
#[snafu(context(suffix(Err)), visibility(pub(crate)))]
pub enum ScreenshotError {
    #[snafu(display("Cannot capture an empty framebuffer: {width}x{height}"))]
    EmptyCapture { width: u32, height: u32 },

    #[snafu(display("Failed to write screenshot: {source}"))]
    Write { source: image::ImageError },
}
