use anyhow::{Context, Result};
use log::debug;
use std::time::Duration;

const PNG_SIGNATURE: &[u8; 8] = b"\x89PNG\r\n\x1a\n";

/// What the icon panel shows once the modpack icon has been fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconInfo {
    pub width: u32,
    pub height: u32,
    pub bytes: usize,
}

pub fn fetch_icon(url: &str) -> Result<IconInfo> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(15))
        .build()
        .context("failed to build HTTP client")?;
    let body = client
        .get(url)
        .send()
        .with_context(|| format!("failed to fetch {url}"))?
        .error_for_status()?
        .bytes()?;
    debug!("fetched {} bytes of icon from {url}", body.len());
    let (width, height) = png_dimensions(&body).context("icon is not a PNG image")?;
    Ok(IconInfo {
        width,
        height,
        bytes: body.len(),
    })
}

/// Width and height from a PNG's IHDR chunk.
pub fn png_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    if data.get(..8)? != PNG_SIGNATURE || data.get(12..16)? != b"IHDR" {
        return None;
    }
    let width = u32::from_be_bytes(data.get(16..20)?.try_into().ok()?);
    let height = u32::from_be_bytes(data.get(20..24)?.try_into().ok()?);
    Some((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_header(width: u32, height: u32) -> Vec<u8> {
        let mut data = PNG_SIGNATURE.to_vec();
        data.extend_from_slice(&13u32.to_be_bytes());
        data.extend_from_slice(b"IHDR");
        data.extend_from_slice(&width.to_be_bytes());
        data.extend_from_slice(&height.to_be_bytes());
        data.extend_from_slice(&[8, 6, 0, 0, 0]);
        data
    }

    #[test]
    fn test_png_dimensions() {
        assert_eq!(png_dimensions(&png_header(200, 120)), Some((200, 120)));
    }

    #[test]
    fn test_rejects_non_png() {
        assert_eq!(png_dimensions(b"GIF89a........................"), None);
        assert_eq!(png_dimensions(&png_header(1, 1)[..20]), None);
        assert_eq!(png_dimensions(&[]), None);
    }

    #[test]
    fn test_fetch_bad_url_fails() {
        assert!(fetch_icon("not a url").is_err());
    }
}
