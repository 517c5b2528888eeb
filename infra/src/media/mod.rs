//! Media module - Cloudinary blob store adapter

pub mod cloudinary;

pub use cloudinary::CloudinaryStore;
