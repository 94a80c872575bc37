pub mod pantry_upload_repository;
