/// Where the document that references an image lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLocation {
    /// A post page, one directory below the site root.
    PostPage,
    /// The homepage, at the site root.
    SiteRoot,
}

const IMAGE_DIR: &str = "assets/img/";
const ASSETS_DIR: &str = "assets/";

fn is_absolute(src: &str) -> bool {
    src.starts_with("http://") || src.starts_with("https://") || src.starts_with('/')
}

/// Turns an image reference from a submission into a path usable from
/// `location`. Bare file names live in `assets/img/`.
pub fn normalize_image(src: &str, location: PageLocation) -> String {
    let src = src.trim();
    if src.is_empty() || is_absolute(src) {
        return src.to_string();
    }

    match location {
        PageLocation::PostPage => {
            if src.starts_with("../") {
                src.to_string()
            } else if src.starts_with(ASSETS_DIR) {
                format!("../{}", src)
            } else {
                format!("../{}{}", IMAGE_DIR, src)
            }
        }
        PageLocation::SiteRoot => {
            if let Some(rest) = src.strip_prefix("../") {
                rest.to_string()
            } else if src.starts_with(ASSETS_DIR) {
                src.to_string()
            } else {
                format!("{}{}", IMAGE_DIR, src)
            }
        }
    }
}
