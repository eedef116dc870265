/// 隐写帧的起始标记。
/// 解码时，终止符之前的数据必须以该标记开头才被视为有效的隐藏信息。
pub const MAGIC: &[u8; 3] = b"stg";

/// 隐写帧的终止符。解码遇到的第一个 0x00 字节即为信息的结尾。
pub const TERMINATOR: u8 = 0x00;

/// 每个信息字节需要的像素采样字节数。
/// 每个采样字节的最低有效位存储 1 bit，因此 1 个字节需要 8 个采样。
pub const BITS_PER_BYTE: usize = 8;

/// 帧的固定开销 (字节)：标记加上终止符。
pub const FRAME_OVERHEAD: usize = MAGIC.len() + 1;

/// 未指定输出路径时，隐写图像文件名的前缀。
pub const DOCTORED_PREFIX: &str = "doctored_";

/// 未指定输出路径时，恢复文本文件名的前缀。
pub const RECOVERED_PREFIX: &str = "recovered_";

/// 恢复文本文件的默认扩展名。
pub const RECOVERED_EXTENSION: &str = "txt";
