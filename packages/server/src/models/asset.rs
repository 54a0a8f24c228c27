use serde::Deserialize;

/// Sort order of the public asset library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssetSort {
    #[default]
    Recent,
    MostDownloaded,
}

impl AssetSort {
    /// Unknown values fall back to the default order.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("download_count") => Self::MostDownloaded,
            _ => Self::Recent,
        }
    }

    pub fn as_param(self) -> &'static str {
        match self {
            Self::Recent => "created_at",
            Self::MostDownloaded => "download_count",
        }
    }
}

/// Query string for `GET /assets`.
#[derive(Debug, Default, Deserialize)]
pub struct AssetLibraryQuery {
    /// `all` or one of the stored MIME types.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub sort: Option<String>,
}

impl AssetLibraryQuery {
    /// The MIME type to filter on, if any.
    pub fn type_filter(&self) -> Option<&str> {
        match self.kind.as_deref().map(str::trim) {
            None | Some("") | Some("all") => None,
            Some(kind) => Some(kind),
        }
    }

    pub fn sort(&self) -> AssetSort {
        AssetSort::from_param(self.sort.as_deref())
    }
}
