/// Whether a link carries an audio track only or a full video.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Video,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Author {
    /// Display name shown as the heading.
    pub name: String,
    /// Account handle shown under the name.
    pub handle: String,
    pub avatar_url: String,
}

/// One downloadable media option, in the order the service returned it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaLink {
    pub type_tag: String,
    pub kind: MediaKind,
    pub quality: String,
    pub url: String,
}

/// A successful conversion: who posted the video and where to fetch it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Conversion {
    pub author: Author,
    pub description: String,
    pub cover_url: String,
    pub links: Vec<MediaLink>,
}
