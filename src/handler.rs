//! # 命令处理逻辑模块
//!
//! 包含处理 `hide`、`recover` 和 `capacity` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::cli::{CapacityArgs, HideArgs, RecoverArgs};
use crate::constants::{DOCTORED_PREFIX, RECOVERED_EXTENSION, RECOVERED_PREFIX, TERMINATOR};
use crate::container::LoadedImage;
use crate::steganography::{capacity, decode, encode};
use anyhow::{Context, Result};
use colored::Colorize;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// 处理 'Hide' 命令的执行逻辑。
///
/// 读取图像和文本文件，调用隐写核心隐藏文本，最后按原格式写出结果图像。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `--force`。
/// * 无法读取或解析输入的图像，或无法读取文本文件。
/// * 文本中含有 NUL 字节。
/// * 图像已包含隐藏信息，或空间不足 (源错误为 [`crate::error::StegError`])。
/// * 无法写入到目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let dest = args
        .dest
        .clone()
        .unwrap_or_else(|| default_doctored_path(&args.image));
    ensure_writable(&dest, args.force)?;

    let loaded = LoadedImage::open(&args.image).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let text = fs::read(&args.text).with_context(|| {
        format!(
            "Unable to read text file: {}",
            args.text.to_string_lossy().red().bold()
        )
    })?;

    if let Some(index) = text.iter().position(|&b| b == TERMINATOR) {
        anyhow::bail!(
            "The text contains a NUL byte at index {} and cannot be recovered intact.",
            index.to_string().red().bold()
        );
    }

    info!(
        "Hiding {} bytes in {} sample bytes",
        text.len(),
        loaded.carrier().len()
    );

    let doctored = encode(loaded.carrier(), &text).with_context(|| {
        format!(
            "Failed to hide the text in {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    loaded.with_carrier(doctored).save(&dest).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The text has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 读取经过隐写的图像文件，恢复隐藏的文本并写入目标文本文件。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `--force`。
/// * 无法读取或解析输入的图像文件。
/// * 图像中没有有效的隐藏信息。
/// * 无法写入到目标文本文件。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let text_path = args
        .text
        .clone()
        .unwrap_or_else(|| default_recovered_path(&args.image));
    ensure_writable(&text_path, args.force)?;

    let loaded = LoadedImage::open(&args.image).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let text = decode(loaded.carrier()).with_context(|| {
        format!(
            "Failed to recover a message from '{}'. \nThe image may not contain a hidden message or is corrupted.",
            args.image.to_string_lossy().red().bold()
        )
    })?;
    info!("Recovered {} bytes", text.len());

    fs::write(&text_path, text).with_context(|| {
        format!(
            "Unable to write to target text file: {}",
            text_path.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The text has been successfully recovered and saved: {}",
        text_path.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'Capacity' 命令：打印采样字节数与可隐藏的最大字节数。
pub fn handle_capacity(args: CapacityArgs) -> Result<()> {
    let loaded = LoadedImage::open(&args.image).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let carrier = loaded.carrier();
    let meta = carrier.meta();
    debug!("Carrier metadata: {meta:?}");

    println!(
        "{}: {}x{}, {} sample bytes, up to {} bytes of text",
        args.image.to_string_lossy().green().bold(),
        meta.width,
        meta.height,
        carrier.len().to_string().green(),
        capacity(carrier).to_string().green().bold()
    );
    Ok(())
}

fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

/// `dir/name.png` -> `dir/doctored_name.png`
pub fn default_doctored_path(image: &Path) -> PathBuf {
    let name = image
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    image.with_file_name(format!("{DOCTORED_PREFIX}{name}"))
}

/// `dir/name.png` -> `dir/recovered_name.txt`
pub fn default_recovered_path(image: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    image.with_file_name(format!("{RECOVERED_PREFIX}{stem}.{RECOVERED_EXTENSION}"))
}
