#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Could not read the seed image: {0}")]
    SeedImage(String),

    #[error("Frame ordering violated: decade {pushed} follows decade {last}")]
    FrameOrder { pushed: u16, last: u16 },
}
