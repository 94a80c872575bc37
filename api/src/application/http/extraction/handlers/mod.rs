pub mod extract_pantry_image;
pub mod get_upload;
pub mod get_uploads;
