use std::fmt;

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ConversionCompleted {
        request_id: RequestId,
        result: Result<ConvertOutput, ConvertError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFormat {
    Audio,
    Video,
}

impl MediaFormat {
    /// The service tags audio-only variants with the string code `"3"`.
    /// Any other code, including `" 3"`, is a video.
    pub fn from_code(code: &str) -> Self {
        if code == "3" {
            MediaFormat::Audio
        } else {
            MediaFormat::Video
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    pub type_tag: String,
    pub format_code: String,
    pub format: MediaFormat,
    pub quality: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthorInfo {
    pub name: String,
    pub handle: String,
    pub avatar_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConvertOutput {
    pub author: AuthorInfo,
    pub description: String,
    pub cover_url: String,
    pub links: Vec<DownloadLink>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertError {
    pub kind: FailureKind,
    pub message: String,
}

impl ConvertError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ConvertError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    MalformedBody,
    Rejected { message: String },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::MalformedBody => write!(f, "malformed response body"),
            FailureKind::Rejected { message } => write!(f, "rejected by service: {message}"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
