pub mod zip_utils;
