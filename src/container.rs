//! # 图像容器模块
//!
//! 负责把图像文件拆成载体 (采样字节 + 元数据)，并在隐写后按原来的格式写回。
//! 二进制 PPM (`P6`) 由本模块直接解析并原样保留头部；
//! 其他无损格式 (PNG, BMP, TIFF, WebP, QOI) 交给 `image` 解码和重新编码。

use crate::carrier::{Carrier, CarrierMeta};
use crate::error::ContainerError;
use image::{ColorType, DynamicImage, ImageFormat};
use log::{debug, warn};
use std::fs;
use std::path::Path;

const PPM_MAGIC: &[u8; 2] = b"P6";
const PPM_CHANNELS: usize = 3;

/// 载体来自哪种图像容器，以及写回时需要的信息。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Container {
    /// 原始 PPM 头部字节 (含注释)，写回时逐字节复制。
    Ppm { header: Vec<u8> },
    /// 经 `image` 解码的格式与采样布局。
    Raster { format: ImageFormat, color: ColorType },
}

/// 已加载的图像：载体加上容器描述。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedImage {
    carrier: Carrier,
    container: Container,
}

impl LoadedImage {
    /// 读取并解析图像文件。
    pub fn open(path: &Path) -> Result<Self, ContainerError> {
        let bytes = fs::read(path)?;
        debug!("Read {} bytes from {}", bytes.len(), path.display());
        Self::from_bytes(&bytes)
    }

    /// 从内存中的图像文件内容解析。以 `P6` 开头的数据按 PPM 处理。
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ContainerError> {
        if bytes.starts_with(PPM_MAGIC) {
            parse_ppm(bytes)
        } else {
            decode_raster(bytes)
        }
    }

    pub fn carrier(&self) -> &Carrier {
        &self.carrier
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    /// 用新的载体替换采样数据，容器描述保持不变。
    pub fn with_carrier(&self, carrier: Carrier) -> Self {
        debug_assert_eq!(carrier.meta(), self.carrier.meta());
        Self {
            carrier,
            container: self.container.clone(),
        }
    }

    /// 按原容器格式写出图像，与目标路径的扩展名无关。
    pub fn save(&self, path: &Path) -> Result<(), ContainerError> {
        let meta = self.carrier.meta();
        match &self.container {
            Container::Ppm { header } => {
                let mut out = Vec::with_capacity(header.len() + self.carrier.len());
                out.extend_from_slice(header);
                out.extend_from_slice(self.carrier.samples());
                fs::write(path, out)?;
            }
            Container::Raster { format, color } => {
                image::save_buffer_with_format(
                    path,
                    self.carrier.samples(),
                    meta.width,
                    meta.height,
                    *color,
                    *format,
                )?;
            }
        }
        debug!("Wrote image to {}", path.display());
        Ok(())
    }
}

/// 解析二进制 PPM：`P6 <width> <height> <maxval>` 加一个空白字节，其后是采样数据。
/// 头部各字段之间允许任意空白和 `#` 注释。
fn parse_ppm(bytes: &[u8]) -> Result<LoadedImage, ContainerError> {
    let mut pos = PPM_MAGIC.len();
    let width = next_ppm_number(bytes, &mut pos, "width")?;
    let height = next_ppm_number(bytes, &mut pos, "height")?;
    let max_sample_value = next_ppm_number(bytes, &mut pos, "maxval")?;

    if width == 0 || height == 0 {
        return Err(ContainerError::InvalidPpmHeader(format!(
            "zero dimension {width}x{height}"
        )));
    }
    if !(1..=255).contains(&max_sample_value) {
        return Err(ContainerError::InvalidPpmHeader(format!(
            "maxval {max_sample_value} is not an 8-bit sample range"
        )));
    }

    match bytes.get(pos) {
        Some(b) if b.is_ascii_whitespace() => pos += 1,
        _ => {
            return Err(ContainerError::InvalidPpmHeader(
                "missing whitespace after maxval".to_string(),
            ));
        }
    }

    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(PPM_CHANNELS))
        .ok_or_else(|| {
            ContainerError::InvalidPpmHeader(format!("dimensions {width}x{height} overflow"))
        })?;
    let data = &bytes[pos..];
    if data.len() < expected {
        return Err(ContainerError::PpmTruncated {
            expected,
            found: data.len(),
        });
    }

    let meta = CarrierMeta {
        width,
        height,
        max_sample_value,
        header_size: pos,
    };
    debug!("Parsed PPM header: {meta:?}");

    // 多余的尾部数据视为采样的一部分，保证写回的文件长度不变。
    Ok(LoadedImage {
        carrier: Carrier::new(data.to_vec(), meta),
        container: Container::Ppm {
            header: bytes[..pos].to_vec(),
        },
    })
}

fn next_ppm_number(bytes: &[u8], pos: &mut usize, field: &str) -> Result<u32, ContainerError> {
    loop {
        match bytes.get(*pos) {
            Some(b) if b.is_ascii_whitespace() => *pos += 1,
            Some(b'#') => {
                while bytes.get(*pos).is_some_and(|&b| b != b'\n') {
                    *pos += 1;
                }
            }
            _ => break,
        }
    }

    let start = *pos;
    while bytes.get(*pos).is_some_and(u8::is_ascii_digit) {
        *pos += 1;
    }

    std::str::from_utf8(&bytes[start..*pos])
        .ok()
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(|| ContainerError::InvalidPpmHeader(format!("invalid {field}")))
}

fn decode_raster(bytes: &[u8]) -> Result<LoadedImage, ContainerError> {
    let format = image::guess_format(bytes).map_err(|_| ContainerError::UnsupportedFormat)?;
    let img = image::load_from_memory_with_format(bytes, format)?;

    let img = match img.color() {
        ColorType::L8 | ColorType::La8 | ColorType::Rgb8 | ColorType::Rgba8 => img,
        other => {
            warn!("Converting {other:?} samples to RGBA8; precision beyond 8 bits is lost");
            DynamicImage::ImageRgba8(img.to_rgba8())
        }
    };

    let color = img.color();
    let meta = CarrierMeta {
        width: img.width(),
        height: img.height(),
        max_sample_value: u8::MAX as u32,
        header_size: 0,
    };
    debug!("Decoded {format:?} image ({color:?}): {meta:?}");

    Ok(LoadedImage {
        carrier: Carrier::new(img.into_bytes(), meta),
        container: Container::Raster { format, color },
    })
}
