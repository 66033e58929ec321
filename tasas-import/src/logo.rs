//! Logo lookup and attachment
//!
//! Source logos follow the `uni_<base-code>.jpg` convention, where the base
//! code is the short code with any center qualifier removed. Attached logos
//! are copied to `<media>/logos/` and referenced by their relative path.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Media subfolder attached logos are copied into
pub const LOGO_SUBDIR: &str = "logos";

/// Strip the center/branch qualifier from a short code
///
/// The base code is everything before the first `-`; a code without `-`
/// is already a base code. `"upm-etsii"` → `"upm"`, `"uam"` → `"uam"`.
pub fn short_code_without_center(code: &str) -> &str {
    code.split_once('-').map_or(code, |(base, _)| base)
}

/// Logo file name for a short code (`uni_<base-code>.jpg`)
pub fn logo_file_name(code: &str) -> String {
    format!("uni_{}.jpg", short_code_without_center(code))
}

/// Locate the logo file for a record
///
/// Returns `None` (with a warning for the first two cases) when the record
/// has no usable short code, the logo directory does not exist, or the
/// conventional file is absent.
pub fn resolve_logo(short_code: Option<&str>, logo_dir: &Path) -> Option<PathBuf> {
    let code = match short_code.map(str::trim) {
        Some(code) if !code.is_empty() => code,
        _ => {
            warn!("Short code '{}' not valid for logo lookup", short_code.unwrap_or(""));
            return None;
        }
    };

    if !logo_dir.is_dir() {
        warn!("Logo directory '{}' not valid", logo_dir.display());
        return None;
    }

    let path = logo_dir.join(logo_file_name(code));
    if path.is_file() {
        Some(path)
    } else {
        debug!("No logo for '{}' at {}", code, path.display());
        None
    }
}

/// Copy a logo into the media folder, returning the stored relative path
pub async fn attach_logo(source: &Path, media_dir: &Path) -> std::io::Result<String> {
    let file_name = source
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("logo path has no file name: {}", source.display()),
            )
        })?;

    let bytes = tokio::fs::read(source).await?;

    let target_dir = media_dir.join(LOGO_SUBDIR);
    tokio::fs::create_dir_all(&target_dir).await?;
    tokio::fs::write(target_dir.join(file_name), &bytes).await?;

    debug!("Attached logo {} ({} bytes)", file_name, bytes.len());
    Ok(format!("{}/{}", LOGO_SUBDIR, file_name))
}
