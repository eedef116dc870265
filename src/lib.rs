//! # lsb_steg 库
//!
//! 本库包含 LSB 隐写工具的核心逻辑：纯内存的隐写编解码 ([`steganography`])，
//! 以及围绕它的图像容器读写和命令行处理。

pub mod carrier;
pub mod cli;
pub mod constants;
pub mod container;
pub mod error;
pub mod handler;
pub mod steganography;

pub use carrier::{Carrier, CarrierMeta};
pub use error::{ContainerError, StegError};
