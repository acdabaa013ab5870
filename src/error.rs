pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("failed to decode media: {0}")]
    MediaDecode(String),

    #[error("media contains no frames")]
    NoFrames,

    #[error("failed to encode frame: {0}")]
    Encode(String),

    #[error("unknown analysis style: {0}")]
    UnknownStyle(String),

    #[error("unknown substyle: {0}")]
    UnknownSubstyle(String),

    #[error("too many attachments: {count} exceeds the limit of {limit}")]
    TooManyAttachments { count: usize, limit: usize },

    #[error("transcript contains no words")]
    EmptyTranscript,

    #[error("invalid media duration: {0}")]
    InvalidDuration(f64),

    #[error("upstream API error: {0}")]
    Upstream(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<ffmpeg_next::Error> for Error {
    fn from(err: ffmpeg_next::Error) -> Self {
        Error::MediaDecode(err.to_string())
    }
}

impl From<async_openai::error::OpenAIError> for Error {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        Error::Upstream(err.to_string())
    }
}
