//! # 载体图像模块
//!
//! 载体图像 = 像素采样字节序列 + 不可变的元数据。
//! 隐写核心只读取采样字节，元数据原样传递。

/// 载体图像的元数据。隐写过程从不检查或修改这些字段。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CarrierMeta {
    pub width: u32,
    pub height: u32,
    pub max_sample_value: u32,
    /// 图像文件中第一个采样字节之前的头部字节数。
    pub header_size: usize,
}

/// 载体图像：按扫描顺序排列的采样字节及其元数据。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carrier {
    samples: Vec<u8>,
    meta: CarrierMeta,
}

impl Carrier {
    pub fn new(samples: Vec<u8>, meta: CarrierMeta) -> Self {
        Self { samples, meta }
    }

    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    pub fn meta(&self) -> CarrierMeta {
        self.meta
    }

    /// 采样字节数，也就是可用于隐写的 bit 数。
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }
}
