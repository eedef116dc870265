//! # 隐写核心模块
//!
//! 把 `MAGIC ‖ message ‖ 0x00` 按 MSB 优先的顺序逐 bit 写入采样字节的最低有效位，
//! 以及反向读取。两个操作都是纯函数：不做 I/O，不记录日志，也不修改传入的载体。

use crate::carrier::Carrier;
use crate::constants::{BITS_PER_BYTE, FRAME_OVERHEAD, MAGIC, TERMINATOR};
use crate::error::StegError;

/// 构造要嵌入的帧：`MAGIC ‖ message ‖ 0x00`。
pub fn frame(message: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(message.len() + FRAME_OVERHEAD);
    frame.extend_from_slice(MAGIC);
    frame.extend_from_slice(message);
    frame.push(TERMINATOR);
    frame
}

/// 隐藏长度为 `message_len` 的信息所需的采样字节数。
pub fn required_bits(message_len: usize) -> usize {
    (message_len + FRAME_OVERHEAD) * BITS_PER_BYTE
}

/// 该载体能容纳的最长信息 (字节)。
pub fn capacity(carrier: &Carrier) -> usize {
    (carrier.len() / BITS_PER_BYTE).saturating_sub(FRAME_OVERHEAD)
}

/// 把 `message` 隐藏到载体中，返回新的载体。
///
/// 元数据原样复制，只有前 `required_bits(message.len())` 个采样字节的最低位可能改变。
///
/// # Errors
///
/// * [`StegError::AlreadyEncoded`] - 载体本身就能解码出一条有效信息。
/// * [`StegError::CapacityExceeded`] - 采样字节不足以容纳整个帧。此时不会写入任何字节。
pub fn encode(carrier: &Carrier, message: &[u8]) -> Result<Carrier, StegError> {
    // 自解码成功只是启发式判断，随机数据也可能碰巧解出 MAGIC。
    if decode(carrier).is_ok() {
        return Err(StegError::AlreadyEncoded);
    }

    let frame = frame(message);
    let required = frame.len() * BITS_PER_BYTE;
    if required > carrier.len() {
        return Err(StegError::CapacityExceeded {
            required,
            available: carrier.len(),
        });
    }

    let mut samples = carrier.samples().to_vec();
    embed(&frame, &mut samples[..required]);

    Ok(Carrier::new(samples, carrier.meta()))
}

/// 从载体中恢复隐藏的信息 (不含 MAGIC 与终止符)。
///
/// # Errors
///
/// * [`StegError::Truncated`] - 读完所有采样也没有遇到终止符。
/// * [`StegError::MagicMismatch`] - 终止符之前的数据不以 MAGIC 开头。
pub fn decode(carrier: &Carrier) -> Result<Vec<u8>, StegError> {
    let mut decoded = Vec::new();
    let mut terminated = false;

    // 不足 8 个的尾部采样永远组不成终止符。
    for chunk in carrier.samples().chunks_exact(BITS_PER_BYTE) {
        let byte = extract(chunk);
        if byte == TERMINATOR {
            terminated = true;
            break;
        }
        decoded.push(byte);
    }

    if !terminated {
        return Err(StegError::Truncated);
    }

    match decoded.strip_prefix(MAGIC.as_slice()) {
        Some(message) => Ok(message.to_vec()),
        None => Err(StegError::MagicMismatch),
    }
}

/// 将 `bytes` 的各 bit (MSB 优先) 依次写入 `pix` 的最低位，高 7 位保持不变。
/// 调用方保证 `pix.len() == bytes.len() * 8`。
fn embed(bytes: &[u8], pix: &mut [u8]) {
    for (&value, sub_pix) in bytes.iter().zip(pix.chunks_exact_mut(BITS_PER_BYTE)) {
        for (i, sample) in sub_pix.iter_mut().enumerate() {
            let bit = (value >> (BITS_PER_BYTE - 1 - i)) & 1;
            *sample = (*sample & !1) | bit;
        }
    }
}

/// 由 8 个采样的最低位 (第一个采样为最高位) 拼出一个字节。
fn extract(sub_pix: &[u8]) -> u8 {
    sub_pix
        .iter()
        .fold(0u8, |acc, &sample| (acc << 1) | (sample & 1))
}
