pub mod fragment;
pub mod html_serializer;
pub mod image_path;
pub mod page_renderer;
