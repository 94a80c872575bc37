pub mod tesseract;
