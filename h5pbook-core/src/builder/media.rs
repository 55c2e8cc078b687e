//! Image and video placeholders

use super::{BlockBuilder, BuildContext};
use crate::decoder::parse_image_line;
use crate::types::{
    ContentMetadata, ContentObject, ContentParams, ContentType, Copyright, ImageFile, ImageParams,
    LibraryId, VideoParams,
};

/// Content-relative path of the packaged placeholder image
pub const PLACEHOLDER_IMAGE_PATH: &str = "images/placeholder.png";

pub const PLACEHOLDER_IMAGE_MIME: &str = "image/png";

/// Alt text used when the image line cannot be parsed or has none
pub const DEFAULT_IMAGE_ALT: &str = "Image";

/// Always points at the placeholder asset, never at the source path
pub struct ImageBuilder;

impl BlockBuilder for ImageBuilder {
    fn content_type(&self) -> ContentType {
        ContentType::Image
    }

    fn build_with(
        &self,
        library: LibraryId,
        lines: &[String],
        _ctx: &BuildContext<'_>,
    ) -> ContentObject {
        let alt = lines
            .first()
            .and_then(|line| parse_image_line(line))
            .map(|image| image.alt)
            .filter(|alt| !alt.is_empty())
            .unwrap_or_else(|| DEFAULT_IMAGE_ALT.to_string());

        ContentObject::new(
            library,
            ContentParams::Image(ImageParams {
                content_name: "Image".to_string(),
                file: ImageFile {
                    path: PLACEHOLDER_IMAGE_PATH.to_string(),
                    mime: PLACEHOLDER_IMAGE_MIME.to_string(),
                    copyright: Copyright {
                        license: "U".to_string(),
                    },
                },
                decorative: false,
                alt: alt.clone(),
            }),
            ContentMetadata::new(alt, ContentType::Image),
        )
    }
}

/// Empty player; block content is ignored
pub struct VideoBuilder;

impl BlockBuilder for VideoBuilder {
    fn content_type(&self) -> ContentType {
        ContentType::Video
    }

    fn build_with(
        &self,
        library: LibraryId,
        _lines: &[String],
        _ctx: &BuildContext<'_>,
    ) -> ContentObject {
        ContentObject::new(
            library,
            ContentParams::Video(VideoParams::default()),
            ContentMetadata::new("Video", ContentType::Video),
        )
    }
}
