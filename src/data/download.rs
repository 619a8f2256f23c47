//! 通用下载工具：HTTP 下载与 MD5 校验

use std::io::Read;
use std::path::Path;

use md5::{Digest, Md5};

use super::error::DataError;

/// 下载`url`并保存到`dest_path`
///
/// 提供`expected_md5`时先校验下载内容，不一致则不写文件并返回`ChecksumMismatch`。
pub fn download_file(
    url: &str,
    dest_path: &Path,
    expected_md5: Option<&str>,
) -> Result<(), DataError> {
    tracing::info!("正在下载 {url} ...");

    let response = ureq::get(url)
        .call()
        .map_err(|e| DataError::DownloadError(format!("HTTP 请求失败: {e}")))?;

    if response.status() != 200 {
        return Err(DataError::DownloadError(format!(
            "HTTP 状态码: {}",
            response.status()
        )));
    }

    let mut bytes = Vec::new();
    response
        .into_reader()
        .read_to_end(&mut bytes)
        .map_err(|e| DataError::DownloadError(format!("读取响应失败: {e}")))?;

    if let Some(expected) = expected_md5 {
        verify_md5(&bytes, expected)?;
        tracing::debug!("MD5 校验通过: {expected}");
    }

    if let Some(parent) = dest_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(dest_path, &bytes)?;

    tracing::info!("下载完成: {}", dest_path.display());
    Ok(())
}

/// 计算数据的 MD5 校验码（小写十六进制）
pub fn compute_md5(data: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// 校验数据的 MD5（忽略大小写）
pub fn verify_md5(data: &[u8], expected: &str) -> Result<(), DataError> {
    let actual = compute_md5(data);
    if actual.eq_ignore_ascii_case(expected) {
        Ok(())
    } else {
        Err(DataError::ChecksumMismatch {
            expected: expected.to_string(),
            got: actual,
        })
    }
}
