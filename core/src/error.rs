use embedded_bmp::BmpError;

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error(transparent)]
    Bmp(#[from] BmpError),

    #[error("failed to write output")]
    Write(#[from] core::fmt::Error),
}
