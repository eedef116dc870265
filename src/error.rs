//! # 错误类型模块
//!
//! 隐写编解码与图像容器读写的结构化错误。

use thiserror::Error;

/// 隐写编解码失败的原因。
///
/// 同一输入总是得到同一种错误，调用方可以据此映射为合适的响应。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StegError {
    #[error(
        "Not enough space in the image: {required} sample bytes required, {available} available"
    )]
    CapacityExceeded { required: usize, available: usize },

    #[error("The image already contains a hidden message")]
    AlreadyEncoded,

    #[error("The image does not contain a hidden message")]
    MagicMismatch,

    #[error("No message terminator found in the image data")]
    Truncated,
}

/// 图像容器 (像素采样来源) 读写失败的原因。
#[derive(Error, Debug)]
pub enum ContainerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid PPM header: {0}")]
    InvalidPpmHeader(String),

    #[error("PPM sample data too short: expected {expected} bytes, found {found}")]
    PpmTruncated { expected: usize, found: usize },

    #[error("Unsupported image format")]
    UnsupportedFormat,
}
